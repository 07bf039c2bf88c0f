//! Repository for the `agents` table.

use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::auth::models::{AgentUser, NewAgent};
use crate::models::agent::AgentRow;

const COLUMNS: &str = "id, email, name, organization, role, password_hash";

pub struct UserRepository;

impl UserRepository {
    /// Looks up an agent for sign-in. The row includes the password hash.
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<AgentRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM agents WHERE lower(email) = lower($1)");
        sqlx::query_as::<_, AgentRow>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<AgentUser>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM agents WHERE id = $1");
        let row = sqlx::query_as::<_, AgentRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row.as_ref().map(AgentUser::from))
    }

    /// Fails with a unique violation when the email is taken in any casing.
    pub async fn create(pool: &PgPool, input: &NewAgent) -> Result<AgentUser, sqlx::Error> {
        let query = format!(
            "INSERT INTO agents (email, name, organization, phone, role, password_hash)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, AgentRow>(&query)
            .bind(input.email.trim())
            .bind(input.name.trim())
            .bind(input.organization.trim())
            .bind(&input.phone)
            .bind(input.role)
            .bind(&input.password_hash)
            .fetch_one(pool)
            .await?;

        info!("Created agent {} ({})", row.id, row.role.as_str());
        Ok(AgentUser::from(&row))
    }
}
