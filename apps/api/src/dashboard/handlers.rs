use axum::{extract::State, Json};
use serde::Serialize;

use crate::auth::extractor::AuthAgent;
use crate::dashboard::models::DashboardSnapshot;
use crate::dashboard::repository::DashboardRepository;
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Serialize)]
pub struct DashboardResponse {
    pub snapshot: DashboardSnapshot,
}

/// GET /api/dashboard
pub async fn handle_get_dashboard(
    State(state): State<AppState>,
    _auth: AuthAgent,
) -> Result<Json<DashboardResponse>, AppError> {
    let snapshot = DashboardRepository::get_snapshot(&state.db).await?;
    Ok(Json(DashboardResponse { snapshot }))
}
