use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use uuid::Uuid;

use crate::auth::jwt::validate_token;
use crate::errors::AppError;
use crate::models::enums::Role;
use crate::state::AppState;

/// The signed-in agent, taken from `Authorization: Bearer <token>`.
///
/// Adding this as a handler argument makes the route require a session.
#[derive(Debug, Clone)]
pub struct AuthAgent {
    pub agent_id: Uuid,
    pub role: Role,
    pub organization: String,
}

#[async_trait]
impl FromRequestParts<AppState> for AuthAgent {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::Unauthorized("Missing Authorization header".into()))?;

        let token = header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Unauthorized("Expected: Authorization: Bearer <token>".into())
        })?;

        let claims = validate_token(token, &state.config.jwt)
            .map_err(|_| AppError::Unauthorized("Invalid or expired token".into()))?;

        Ok(AuthAgent {
            agent_id: claims.sub,
            role: claims.role,
            organization: claims.organization,
        })
    }
}
