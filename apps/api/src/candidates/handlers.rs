use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::auth::extractor::AuthAgent;
use crate::candidates::models::{
    Candidate, CandidateFilter, CandidateNote, CandidatePatch, NewCandidate, NewNote,
};
use crate::candidates::repository::CandidateRepository;
use crate::errors::AppError;
use crate::query::QueryPairs;
use crate::state::AppState;

#[derive(Serialize)]
pub struct CandidateListResponse {
    pub data: Vec<Candidate>,
}

#[derive(Serialize)]
pub struct CandidateDetailResponse {
    pub candidate: Candidate,
    pub notes: Vec<CandidateNote>,
}

#[derive(Serialize)]
pub struct CandidateResponse {
    pub candidate: Candidate,
}

#[derive(Serialize)]
pub struct NoteResponse {
    pub note: CandidateNote,
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Candidate {id} not found"))
}

/// GET /api/candidates?q=&status=...&owner=
pub async fn handle_list_candidates(
    State(state): State<AppState>,
    _auth: AuthAgent,
    Query(pairs): Query<QueryPairs>,
) -> Result<Json<CandidateListResponse>, AppError> {
    let filter = CandidateFilter::from_query(&pairs)?;
    let data = CandidateRepository::find_many(&state.db, &filter).await?;
    Ok(Json(CandidateListResponse { data }))
}

/// GET /api/candidates/:id
pub async fn handle_get_candidate(
    State(state): State<AppState>,
    _auth: AuthAgent,
    Path(id): Path<Uuid>,
) -> Result<Json<CandidateDetailResponse>, AppError> {
    let candidate = CandidateRepository::get_by_id(&state.db, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    let notes = CandidateRepository::get_notes(&state.db, id).await?;
    Ok(Json(CandidateDetailResponse { candidate, notes }))
}

/// POST /api/candidates
pub async fn handle_create_candidate(
    State(state): State<AppState>,
    auth: AuthAgent,
    payload: Result<Json<NewCandidate>, JsonRejection>,
) -> Result<(StatusCode, Json<CandidateResponse>), AppError> {
    let Json(input) = payload?;
    input.validate()?;
    let candidate = CandidateRepository::create(&state.db, auth.agent_id, &input).await?;
    Ok((StatusCode::CREATED, Json(CandidateResponse { candidate })))
}

/// PATCH /api/candidates/:id
pub async fn handle_update_candidate(
    State(state): State<AppState>,
    auth: AuthAgent,
    Path(id): Path<Uuid>,
    payload: Result<Json<CandidatePatch>, JsonRejection>,
) -> Result<Json<CandidateResponse>, AppError> {
    let Json(patch) = payload?;
    patch.validate()?;
    let candidate = CandidateRepository::update(&state.db, id, &patch)
        .await?
        .ok_or_else(|| not_found(id))?;
    info!("Agent {} updated candidate {id}", auth.agent_id);
    Ok(Json(CandidateResponse { candidate }))
}

/// DELETE /api/candidates/:id
pub async fn handle_delete_candidate(
    State(state): State<AppState>,
    auth: AuthAgent,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if !CandidateRepository::delete(&state.db, id).await? {
        return Err(not_found(id));
    }
    info!("Agent {} deleted candidate {id}", auth.agent_id);
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/candidates/:id/notes
pub async fn handle_append_note(
    State(state): State<AppState>,
    auth: AuthAgent,
    Path(id): Path<Uuid>,
    payload: Result<Json<NewNote>, JsonRejection>,
) -> Result<(StatusCode, Json<NoteResponse>), AppError> {
    let Json(input) = payload?;
    let body = input
        .body
        .as_deref()
        .map(str::trim)
        .filter(|b| !b.is_empty())
        .ok_or_else(|| AppError::Validation("body is required".into()))?;

    if CandidateRepository::get_by_id(&state.db, id).await?.is_none() {
        return Err(not_found(id));
    }

    let note = CandidateRepository::append_note(&state.db, id, auth.agent_id, body).await?;
    Ok((StatusCode::CREATED, Json(NoteResponse { note })))
}
