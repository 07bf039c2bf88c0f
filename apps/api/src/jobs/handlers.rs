use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::auth::extractor::AuthAgent;
use crate::errors::AppError;
use crate::jobs::models::{hot_jobs_limit, Job, JobFilter};
use crate::jobs::repository::JobRepository;
use crate::query::QueryPairs;
use crate::state::AppState;

#[derive(Serialize)]
pub struct JobListResponse {
    pub data: Vec<Job>,
}

#[derive(Serialize)]
pub struct JobResponse {
    pub job: Job,
}

/// GET /api/jobs?q=&category=...&status=&employmentType=&remoteOnly=
pub async fn handle_list_jobs(
    State(state): State<AppState>,
    _auth: AuthAgent,
    Query(pairs): Query<QueryPairs>,
) -> Result<Json<JobListResponse>, AppError> {
    let filter = JobFilter::from_query(&pairs)?;
    let data = JobRepository::find_many(&state.db, &filter).await?;
    Ok(Json(JobListResponse { data }))
}

/// GET /api/jobs/hot?limit=
pub async fn handle_hot_jobs(
    State(state): State<AppState>,
    _auth: AuthAgent,
    Query(pairs): Query<QueryPairs>,
) -> Result<Json<JobListResponse>, AppError> {
    let limit = hot_jobs_limit(&pairs)?;
    let data = JobRepository::get_hot(&state.db, limit).await?;
    Ok(Json(JobListResponse { data }))
}

/// GET /api/jobs/:id
pub async fn handle_get_job(
    State(state): State<AppState>,
    _auth: AuthAgent,
    Path(id): Path<Uuid>,
) -> Result<Json<JobResponse>, AppError> {
    let job = JobRepository::get_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {id} not found")))?;
    Ok(Json(JobResponse { job }))
}
