use serde::{Deserialize, Serialize};
use crate::models::domain::{JobPosting, SkillGap, UserProfile};

/// One recommended job with its score and reasons
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobMatch {
    pub job: JobPosting,
    pub match_score: u8,
    pub match_reasons: Vec<String>,
}

/// Response for the job recommendation endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchJobsResponse {
    pub matches: Vec<JobMatch>,
    pub total: usize,
    pub user_skills: Vec<String>,
    pub user_experience: f64,
}

/// Response for the skill gap endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillGapResponse {
    pub skill_gaps: Vec<SkillGap>,
    pub current_skills: Vec<String>,
    pub total_gaps: usize,
}

/// Paginated job board listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobListResponse {
    pub jobs: Vec<JobPosting>,
    pub total: i64,
    pub pages: i64,
    pub current_page: u32,
    pub per_page: u32,
    pub has_next: bool,
    pub has_prev: bool,
}

impl JobListResponse {
    pub fn new(jobs: Vec<JobPosting>, total: i64, page: u32, per_page: u32) -> Self {
        let per_page_i = i64::from(per_page.max(1));
        let pages = if total <= 0 {
            0
        } else {
            (total + per_page_i - 1) / per_page_i
        };

        Self {
            jobs,
            total,
            pages,
            current_page: page,
            per_page,
            has_next: i64::from(page) < pages,
            has_prev: page > 1,
        }
    }
}

/// Response after creating a job
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateJobResponse {
    pub message: String,
    pub job: JobPosting,
}

/// Response after updating the caller's profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateProfileResponse {
    pub message: String,
    pub user: UserProfile,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
