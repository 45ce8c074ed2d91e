//! Hire Match - job matching and job board service for the recruitment portal
//!
//! The scoring core in [`core`] is pure: it takes a candidate profile and a
//! list of open jobs and returns scores, reasons and skill gaps. Everything
//! around it (HTTP routes, PostgreSQL, cache, token checks) only loads data
//! for the core and serializes its answers.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{MatchError, MatchScorer, RankedMatches, experience_window};
pub use crate::models::{CandidateProfile, JobPosting, MatchResult, ScoringWeights, SkillGap};

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::Utc;
    use crate::models::{CandidateProfile, ExperienceLevel, JobPosting, JobStatus, Visibility, WorkMode};

    pub fn create_test_candidate(skills: &[&str], years: f64, city: Option<&str>) -> CandidateProfile {
        CandidateProfile {
            user_id: 42,
            city: city.map(str::to_string),
            years_of_experience: years,
            expected_salary_min: None,
            skills: skills.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn create_test_job(
        id: i64,
        skills: &[&str],
        level: ExperienceLevel,
        city: Option<&str>,
    ) -> JobPosting {
        JobPosting {
            id,
            employer_id: 7,
            title: format!("Job {}", id),
            description: "A job".to_string(),
            company_name: "Tech Corp".to_string(),
            job_type: "full-time".to_string(),
            work_mode: WorkMode::Onsite,
            experience_level: level,
            industry: "Technology".to_string(),
            category: "Software Development".to_string(),
            city: city.map(str::to_string),
            state: None,
            country: "United States".to_string(),
            allows_remote: false,
            salary_min: None,
            salary_max: None,
            salary_currency: "USD".to_string(),
            salary_period: "year".to_string(),
            status: JobStatus::Active,
            visibility: Visibility::Public,
            featured: false,
            urgent: false,
            views: 0,
            applications_count: 0,
            required_skills: skills.iter().map(|s| s.to_string()).collect(),
            application_deadline: None,
            created_at: Utc::now(),
            published_at: Some(Utc::now()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let scorer = MatchScorer::default();
        assert_eq!(scorer.weights(), &ScoringWeights::default());
        assert_eq!(experience_window(6.0).len(), 2);
    }
}
