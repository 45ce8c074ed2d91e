use actix_web::{web, HttpResponse};
use validator::Validate;
use crate::models::{UpdateProfileRequest, UpdateProfileResponse};
use crate::services::{AuthenticatedUser, CacheKey};
use super::{ApiError, AppState};

/// Configure account routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .route("/me", web::get().to(me))
            .route("/profile", web::put().to(update_profile)),
    );
}

/// The caller's own profile
///
/// GET /api/auth/me
async fn me(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, ApiError> {
    let profile = state
        .candidates
        .get_user(user.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(HttpResponse::Ok().json(profile))
}

/// Partial profile update. Absent fields are left alone; `skills`
/// replaces the whole list.
///
/// PUT /api/auth/profile
async fn update_profile(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    req: web::Json<UpdateProfileRequest>,
) -> Result<HttpResponse, ApiError> {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for update_profile request: {:?}", errors);
        return Err(errors.into());
    }

    let profile = state
        .candidates
        .update_profile(user.user_id, &req)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    tracing::info!("User {} updated their profile", user.user_id);

    // Cached answers were computed from the old profile
    if let Some(cache) = &state.cache {
        if let Err(e) = cache.delete(&CacheKey::skill_gap(user.user_id)).await {
            tracing::warn!("Failed to drop cached skill gap for user {}: {}", user.user_id, e);
        }
        if let Err(e) = cache
            .invalidate_prefix(&CacheKey::user_matches_prefix(user.user_id))
            .await
        {
            tracing::warn!("Failed to drop cached matches for user {}: {}", user.user_id, e);
        }
    }

    Ok(HttpResponse::Ok().json(UpdateProfileResponse {
        message: "Profile updated successfully".to_string(),
        user: profile,
    }))
}
