// Route exports
pub mod ai;
pub mod auth;
pub mod error;
pub mod health;
pub mod jobs;

pub use error::{handle_json_payload_error, handle_query_payload_error, ApiError};

use actix_web::web;
use std::sync::Arc;
use crate::config::MatchingSettings;
use crate::core::MatchScorer;
use crate::services::{CacheManager, CandidateRepository, JobRepository};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub jobs: Arc<dyn JobRepository>,
    pub candidates: Arc<dyn CandidateRepository>,
    /// `None` when Redis was unreachable at startup
    pub cache: Option<Arc<CacheManager>>,
    pub scorer: MatchScorer,
    pub matching: MatchingSettings,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::configure).service(
        web::scope("/api")
            .configure(ai::configure)
            .configure(auth::configure)
            .configure(jobs::configure),
    );
}
