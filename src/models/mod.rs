// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    CandidateProfile, ExperienceLevel, JobFilter, JobPage, JobPosting, JobStatus, MatchResult,
    ScoringWeights, SkillGap, UserAccount, UserProfile, UserRole, Visibility, WorkMode,
};
pub use requests::{CreateJobRequest, ListJobsQuery, MatchJobsQuery, UpdateProfileRequest};
pub use responses::{
    CreateJobResponse, ErrorResponse, HealthResponse, JobListResponse, JobMatch,
    MatchJobsResponse, SkillGapResponse, UpdateProfileResponse,
};
