use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::enums::StoredCandidateStatus;

/// A `candidates` row joined with its owning agent's name.
#[derive(Debug, Clone, FromRow)]
pub struct CandidateRow {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub kana: Option<String>,
    pub email: String,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub status: StoredCandidateStatus,
    pub experience_years: Option<i32>,
    pub current_company: Option<String>,
    pub current_title: Option<String>,
    pub desired_roles: Vec<String>,
    pub desired_salary_jpy: Option<i32>,
    pub notice_period_days: i32,
    pub labels: Vec<String>,
    pub skills: Vec<String>,
    pub resume_url: Option<String>,
    pub risk_flag: Option<String>,
    pub owner_id: Uuid,
    pub owner_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A `candidate_notes` row joined with its author's name.
#[derive(Debug, Clone, FromRow)]
pub struct CandidateNoteRow {
    pub id: Uuid,
    pub candidate_id: Uuid,
    pub author_name: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}
