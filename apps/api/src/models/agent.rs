use sqlx::FromRow;
use uuid::Uuid;

use crate::models::enums::Role;

#[derive(Debug, Clone, FromRow)]
pub struct AgentRow {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub organization: String,
    pub role: Role,
    pub password_hash: Option<String>,
}
