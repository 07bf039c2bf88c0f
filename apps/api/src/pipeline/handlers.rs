use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::auth::extractor::AuthAgent;
use crate::candidates::repository::CandidateRepository;
use crate::errors::AppError;
use crate::jobs::repository::JobRepository;
use crate::pipeline::models::{NewApplication, PipelineCard, PipelineColumn, UpdateStageRequest};
use crate::pipeline::repository::PipelineRepository;
use crate::state::AppState;

#[derive(Serialize)]
pub struct ColumnsResponse {
    pub columns: Vec<PipelineColumn>,
}

#[derive(Serialize)]
pub struct ApplicationResponse {
    pub application: PipelineCard,
}

/// GET /api/pipelines
pub async fn handle_get_columns(
    State(state): State<AppState>,
    _auth: AuthAgent,
) -> Result<Json<ColumnsResponse>, AppError> {
    let columns = PipelineRepository::get_columns(&state.db).await?;
    Ok(Json(ColumnsResponse { columns }))
}

/// GET /api/pipelines/:id
pub async fn handle_get_application(
    State(state): State<AppState>,
    _auth: AuthAgent,
    Path(id): Path<Uuid>,
) -> Result<Json<ApplicationResponse>, AppError> {
    let application = PipelineRepository::get_card(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Application {id} not found")))?;
    Ok(Json(ApplicationResponse { application }))
}

/// PATCH /api/pipelines/:id
pub async fn handle_update_stage(
    State(state): State<AppState>,
    auth: AuthAgent,
    Path(id): Path<Uuid>,
    payload: Result<Json<UpdateStageRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(req) = payload?;
    let stage = req.into_stage()?;
    tracing::debug!(
        agent = %auth.agent_id,
        role = ?auth.role,
        organization = %auth.organization,
        "Moving application {id} to {stage:?}"
    );

    PipelineRepository::update_stage(&state.db, id, stage)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Application {id} not found")))?;

    Ok(Json(json!({ "success": true })))
}

/// POST /api/pipelines
pub async fn handle_create_application(
    State(state): State<AppState>,
    _auth: AuthAgent,
    payload: Result<Json<NewApplication>, JsonRejection>,
) -> Result<(StatusCode, Json<ApplicationResponse>), AppError> {
    let Json(req) = payload?;
    let probability = req.probability()?;

    let candidate = CandidateRepository::get_by_id(&state.db, req.candidate_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Candidate {} not found", req.candidate_id)))?;
    let job = JobRepository::get_by_id(&state.db, req.job_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {} not found", req.job_id)))?;

    let application =
        PipelineRepository::create(&state.db, candidate.id, job.id, probability).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApplicationResponse {
            application: PipelineCard {
                application,
                candidate: Some(candidate),
                job: Some(job),
            },
        }),
    ))
}
