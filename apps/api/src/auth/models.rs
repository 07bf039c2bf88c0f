use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::agent::AgentRow;
use crate::models::enums::Role;

/// Public view of an agent account. Never carries the password hash.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AgentUser {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub organization: String,
    pub role: Role,
}

impl From<&AgentRow> for AgentUser {
    fn from(row: &AgentRow) -> Self {
        AgentUser {
            id: row.id,
            email: row.email.clone(),
            name: row.name.clone(),
            organization: row.organization.clone(),
            role: row.role,
        }
    }
}

/// An agent account to provision. There is no self sign-up.
#[derive(Debug, Clone)]
pub struct NewAgent {
    pub email: String,
    pub name: String,
    pub organization: String,
    pub phone: Option<String>,
    pub role: Role,
    pub password_hash: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SignInRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInResponse {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub user: AgentUser,
}
