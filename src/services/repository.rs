use async_trait::async_trait;
use std::collections::HashMap;
use thiserror::Error;
use crate::models::{
    CandidateProfile, CreateJobRequest, JobFilter, JobPage, JobPosting, UpdateProfileRequest, UserAccount,
    UserProfile,
};

/// Errors that can occur when loading or storing portal data
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Source of job postings
#[async_trait]
pub trait JobRepository: Send + Sync {
    /// Active, public postings, featured first then newest published.
    /// `limit` caps the number returned.
    async fn open_jobs(&self, limit: Option<usize>) -> Result<Vec<JobPosting>, RepositoryError>;

    async fn get_job(&self, job_id: i64) -> Result<Option<JobPosting>, RepositoryError>;

    /// Bump the view counter, returning the new count
    async fn increment_views(&self, job_id: i64) -> Result<i64, RepositoryError>;

    /// One page of open public postings matching the filter
    async fn list_jobs(
        &self,
        filter: &JobFilter,
        page: u32,
        per_page: u32,
    ) -> Result<JobPage, RepositoryError>;

    async fn create_job(
        &self,
        employer_id: i64,
        company_name: &str,
        job: &CreateJobRequest,
    ) -> Result<JobPosting, RepositoryError>;

    /// Display names for skill names, where the taxonomy has one.
    /// Names without a display name are left out of the map.
    async fn skill_display_names(&self, names: &[String]) -> Result<HashMap<String, String>, RepositoryError>;

    async fn health_check(&self) -> Result<bool, RepositoryError>;
}

/// Source of user accounts and job seeker profiles
#[async_trait]
pub trait CandidateRepository: Send + Sync {
    async fn get_account(&self, user_id: i64) -> Result<Option<UserAccount>, RepositoryError>;

    async fn get_candidate(&self, user_id: i64) -> Result<Option<CandidateProfile>, RepositoryError>;

    async fn get_user(&self, user_id: i64) -> Result<Option<UserProfile>, RepositoryError>;

    /// Apply a partial profile update. `Ok(None)` when the user does not exist.
    async fn update_profile(
        &self,
        user_id: i64,
        update: &UpdateProfileRequest,
    ) -> Result<Option<UserProfile>, RepositoryError>;
}
