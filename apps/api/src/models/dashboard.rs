use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::enums::{AnnouncementSeverity, StoredApplicationStage};

#[derive(Debug, Clone, FromRow)]
pub struct AnnouncementRow {
    pub id: Uuid,
    pub title: String,
    pub body: String,
    pub severity: AnnouncementSeverity,
    pub published_at: DateTime<Utc>,
}

/// A `projects` row with the sizes of its job and candidate sets.
#[derive(Debug, Clone, FromRow)]
pub struct ProjectSummaryRow {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub job_count: i64,
    pub candidate_count: i64,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
pub struct StageCountRow {
    pub stage: StoredApplicationStage,
    pub count: i64,
}
