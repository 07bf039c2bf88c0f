use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Service version plus connection pool gauges. Never queries the database,
/// so it answers even while Postgres is unreachable.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "cube-api",
        "pool": {
            "size": state.db.size(),
            "idle": state.db.num_idle(),
        }
    }))
}
