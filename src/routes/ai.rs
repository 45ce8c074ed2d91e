use actix_web::{web, HttpResponse};
use serde::{de::DeserializeOwned, Serialize};
use std::collections::HashMap;
use crate::models::{CandidateProfile, JobMatch, JobPosting, MatchJobsQuery, MatchJobsResponse, SkillGapResponse};
use crate::services::{AuthenticatedUser, CacheKey};
use super::{ApiError, AppState};

/// Configure recommendation routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/ai")
            .route("/match-jobs", web::get().to(match_jobs))
            .route("/skill-gap", web::get().to(skill_gap)),
    );
}

/// Recommended jobs for the caller
///
/// GET /api/ai/match-jobs?limit=10
///
/// `limit` defaults to `matching.default_limit` and is capped at
/// `matching.max_limit`.
async fn match_jobs(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    query: web::Query<MatchJobsQuery>,
) -> Result<HttpResponse, ApiError> {
    let limit = query
        .limit
        .unwrap_or(state.matching.default_limit)
        .min(state.matching.max_limit);

    tracing::info!("Matching jobs for user: {}, limit: {}", user.user_id, limit);

    let cache_key = CacheKey::matches(user.user_id, limit);
    if let Some(cached) = cached::<MatchJobsResponse>(&state, &cache_key).await {
        return Ok(HttpResponse::Ok().json(cached));
    }

    let candidate = load_candidate(&state, user.user_id).await?;
    let jobs = state.jobs.open_jobs(None).await?;

    let ranked = state.scorer.rank_jobs(&candidate, &jobs, limit)?;

    let by_id: HashMap<i64, &JobPosting> = jobs.iter().map(|job| (job.id, job)).collect();
    let matches: Vec<JobMatch> = ranked
        .matches
        .into_iter()
        .filter_map(|m| {
            by_id.get(&m.job_id).map(|job| JobMatch {
                job: (*job).clone(),
                match_score: m.score,
                match_reasons: m.reasons,
            })
        })
        .collect();

    tracing::info!(
        "Returning {} matches for user {} (from {} open jobs, {} scored above zero)",
        matches.len(),
        user.user_id,
        jobs.len(),
        ranked.total_matches
    );

    let response = MatchJobsResponse {
        matches,
        total: ranked.total_matches,
        user_experience: candidate.years_of_experience,
        user_skills: candidate.skills,
    };

    store(&state, &cache_key, &response).await;

    Ok(HttpResponse::Ok().json(response))
}

/// Skills the caller is missing, most requested first
///
/// GET /api/ai/skill-gap
async fn skill_gap(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, ApiError> {
    tracing::info!("Analyzing skill gaps for user: {}", user.user_id);

    let cache_key = CacheKey::skill_gap(user.user_id);
    if let Some(cached) = cached::<SkillGapResponse>(&state, &cache_key).await {
        return Ok(HttpResponse::Ok().json(cached));
    }

    let candidate = load_candidate(&state, user.user_id).await?;

    let sample_size = state.matching.skill_gap_sample_size;
    let jobs = state.jobs.open_jobs(Some(sample_size)).await?;

    let mut skill_gaps = state
        .scorer
        .skill_gap(&candidate, &jobs, sample_size, state.matching.skill_gap_top_n)?;

    let names: Vec<String> = skill_gaps.iter().map(|gap| gap.name.clone()).collect();
    match state.jobs.skill_display_names(&names).await {
        Ok(display) => {
            for gap in skill_gaps.iter_mut() {
                if let Some(label) = display.get(&gap.name) {
                    gap.name = label.clone();
                }
            }
        }
        Err(e) => tracing::warn!("Skill display names unavailable, keeping raw names: {}", e),
    }

    let response = SkillGapResponse {
        total_gaps: skill_gaps.len(),
        skill_gaps,
        current_skills: candidate.skills,
    };

    store(&state, &cache_key, &response).await;

    Ok(HttpResponse::Ok().json(response))
}

async fn load_candidate(state: &AppState, user_id: i64) -> Result<CandidateProfile, ApiError> {
    state
        .candidates
        .get_candidate(user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))
}

/// Cache read that treats every failure as a miss
async fn cached<T: DeserializeOwned>(state: &AppState, key: &str) -> Option<T> {
    let cache = state.cache.as_ref()?;

    match cache.get::<T>(key).await {
        Ok(hit) => {
            if hit.is_some() {
                tracing::debug!("Cache hit: {}", key);
            }
            hit
        }
        Err(e) => {
            tracing::warn!("Cache read failed for {}: {}", key, e);
            None
        }
    }
}

async fn store<T: Serialize>(state: &AppState, key: &str, value: &T) {
    if let Some(cache) = &state.cache {
        if let Err(e) = cache.set(key, value).await {
            tracing::warn!("Failed to cache {}: {}", key, e);
        }
    }
}
