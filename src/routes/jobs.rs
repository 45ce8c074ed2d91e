use actix_web::{web, HttpResponse};
use validator::Validate;
use crate::models::{CreateJobRequest, CreateJobResponse, JobListResponse, ListJobsQuery, UserRole};
use crate::services::{AuthenticatedUser, CacheKey};
use super::{ApiError, AppState};

/// Configure job board routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/jobs")
            .route("", web::get().to(list_jobs))
            .route("", web::post().to(create_job))
            .route("/{job_id}", web::get().to(get_job)),
    );
}

/// Paginated listing of open public jobs
///
/// GET /api/jobs?page=1&per_page=20&search=rust&work_mode=remote
async fn list_jobs(
    state: web::Data<AppState>,
    query: web::Query<ListJobsQuery>,
) -> Result<HttpResponse, ApiError> {
    let filter = query.filter().map_err(ApiError::BadRequest)?;
    let page = query.page();
    let per_page = query.per_page();

    tracing::debug!("Listing jobs page {} ({} per page) with {:?}", page, per_page, filter);

    let result = state.jobs.list_jobs(&filter, page, per_page).await?;

    Ok(HttpResponse::Ok().json(JobListResponse::new(result.jobs, result.total, page, per_page)))
}

/// One job posting. Each fetch counts as a view.
///
/// GET /api/jobs/{job_id}
async fn get_job(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let job_id = path.into_inner();

    let mut job = state
        .jobs
        .get_job(job_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Job not found".to_string()))?;

    job.views = state.jobs.increment_views(job_id).await?;

    Ok(HttpResponse::Ok().json(job))
}

/// Publish a new job posting
///
/// POST /api/jobs
///
/// Only employers may post. The company name is taken from the
/// employer's account, not the request.
async fn create_job(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    req: web::Json<CreateJobRequest>,
) -> Result<HttpResponse, ApiError> {
    let account = state
        .candidates
        .get_account(user.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    if account.role != UserRole::Employer {
        tracing::info!("User {} with role {:?} tried to post a job", account.id, account.role);
        return Err(ApiError::Forbidden("Only employers can create jobs".to_string()));
    }

    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for create_job request: {:?}", errors);
        return Err(errors.into());
    }

    let company_name = account.company_name.unwrap_or_default();
    let job = state.jobs.create_job(account.id, &company_name, &req).await?;

    tracing::info!("Employer {} created job {} ({:?})", account.id, job.id, job.status);

    if let Some(cache) = &state.cache {
        for prefix in [CacheKey::MATCHES_PREFIX, CacheKey::SKILL_GAP_PREFIX] {
            if let Err(e) = cache.invalidate_prefix(prefix).await {
                tracing::warn!("Failed to invalidate {} cache: {}", prefix, e);
            }
        }
    }

    Ok(HttpResponse::Created().json(CreateJobResponse {
        message: "Job created successfully".to_string(),
        job,
    }))
}
