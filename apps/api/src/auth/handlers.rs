use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use tracing::{info, warn};

use crate::auth::extractor::AuthAgent;
use crate::auth::jwt::issue_token;
use crate::auth::models::{AgentUser, SignInRequest, SignInResponse};
use crate::auth::password::verify_password;
use crate::auth::repository::UserRepository;
use crate::errors::AppError;
use crate::state::AppState;

const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// POST /api/auth/signin
pub async fn handle_sign_in(
    State(state): State<AppState>,
    payload: Result<Json<SignInRequest>, JsonRejection>,
) -> Result<Json<SignInResponse>, AppError> {
    let Json(req) = payload?;
    let email = req
        .email
        .as_deref()
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .ok_or_else(|| AppError::Validation("email is required".into()))?;
    let password = req
        .password
        .as_deref()
        .filter(|p| !p.is_empty())
        .ok_or_else(|| AppError::Validation("password is required".into()))?;

    let agent = UserRepository::find_by_email(&state.db, email)
        .await?
        .ok_or_else(|| AppError::Unauthorized(INVALID_CREDENTIALS.into()))?;

    let Some(hash) = agent.password_hash.as_deref() else {
        warn!("Sign-in attempt for agent {} without a password hash", agent.id);
        return Err(AppError::Unauthorized(INVALID_CREDENTIALS.into()));
    };

    let valid = verify_password(password, hash)
        .map_err(|e| anyhow::anyhow!("stored password hash for agent {} is malformed: {e}", agent.id))?;
    if !valid {
        return Err(AppError::Unauthorized(INVALID_CREDENTIALS.into()));
    }

    let issued = issue_token(agent.id, agent.role, &agent.organization, &state.config.jwt)
        .map_err(|e| anyhow::anyhow!("failed to sign session token: {e}"))?;

    info!("Agent {} signed in ({})", agent.id, agent.role.as_str());
    Ok(Json(SignInResponse {
        token: issued.token,
        expires_at: issued.expires_at,
        user: AgentUser::from(&agent),
    }))
}

/// GET /api/auth/me
pub async fn handle_me(
    State(state): State<AppState>,
    auth: AuthAgent,
) -> Result<Json<AgentUser>, AppError> {
    let user = UserRepository::find_by_id(&state.db, auth.agent_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Agent {} not found", auth.agent_id)))?;
    Ok(Json(user))
}
