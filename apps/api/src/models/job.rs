use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::enums::{StoredEmploymentType, StoredJobStatus};

/// A `jobs` row joined with its company, tag names, and placement rate.
#[derive(Debug, Clone, FromRow)]
pub struct JobRow {
    pub id: Uuid,
    pub company_id: Uuid,
    pub company_name: String,
    pub company_headcount: Option<i32>,
    pub title: String,
    pub summary: Option<String>,
    pub description: String,
    pub location: String,
    pub compensation_min: Option<i32>,
    pub compensation_max: Option<i32>,
    pub employment_type: StoredEmploymentType,
    pub status: StoredJobStatus,
    pub remote_friendly: bool,
    pub urgent: bool,
    pub openings: i32,
    pub tags: Vec<String>,
    pub success_rate: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
