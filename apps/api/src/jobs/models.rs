use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::enums::{EmploymentType, JobStatus};
use crate::models::job::JobRow;
use crate::query::normalize_keyword;

/// Category shown for jobs without any tag.
pub const UNCATEGORIZED: &str = "未分類";

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: Uuid,
    pub title: String,
    pub company_id: Uuid,
    pub company_name: String,
    pub company_size: String,
    pub location: String,
    pub compensation_min: Option<i32>,
    pub compensation_max: Option<i32>,
    pub compensation_range: String,
    pub employment_type: EmploymentType,
    pub status: JobStatus,
    pub category: String,
    pub tags: Vec<String>,
    pub summary: String,
    pub description: String,
    pub remote_friendly: bool,
    pub urgent: bool,
    pub openings: i32,
    /// Share of this job's applications that reached `hired`.
    pub success_rate: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<JobRow> for Job {
    fn from(row: JobRow) -> Self {
        Job {
            id: row.id,
            title: row.title,
            company_id: row.company_id,
            company_name: row.company_name,
            company_size: company_size(row.company_headcount),
            location: row.location,
            compensation_min: row.compensation_min,
            compensation_max: row.compensation_max,
            compensation_range: compensation_range(row.compensation_min, row.compensation_max),
            employment_type: row.employment_type.into(),
            status: row.status.into(),
            category: row
                .tags
                .first()
                .cloned()
                .unwrap_or_else(|| UNCATEGORIZED.to_string()),
            tags: row.tags,
            summary: row.summary.unwrap_or_default(),
            description: row.description,
            remote_friendly: row.remote_friendly,
            urgent: row.urgent,
            openings: row.openings,
            success_rate: row.success_rate,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Amounts are in 万円; a missing bound renders as 0.
pub fn compensation_range(min: Option<i32>, max: Option<i32>) -> String {
    format!("{}万円〜{}万円", min.unwrap_or(0), max.unwrap_or(0))
}

pub fn company_size(headcount: Option<i32>) -> String {
    match headcount {
        Some(n) if n > 0 => format!("{n}名"),
        _ => "非公開".to_string(),
    }
}

/// Default and ceiling for `GET /api/jobs/hot?limit=`.
pub const HOT_JOBS_DEFAULT_LIMIT: i64 = 20;
pub const HOT_JOBS_MAX_LIMIT: i64 = 100;

/// Reads `?limit=` for the hot jobs list. Must be an integer in `1..=100`.
pub fn hot_jobs_limit(pairs: &[(String, String)]) -> Result<i64, AppError> {
    let Some((_, raw)) = pairs.iter().rev().find(|(k, _)| k == "limit") else {
        return Ok(HOT_JOBS_DEFAULT_LIMIT);
    };
    match raw.trim().parse::<i64>() {
        Ok(limit) if (1..=HOT_JOBS_MAX_LIMIT).contains(&limit) => Ok(limit),
        _ => Err(AppError::Validation(format!(
            "limit must be an integer between 1 and {HOT_JOBS_MAX_LIMIT}"
        ))),
    }
}

/// Filter for the job list. Dimensions are AND-ed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobFilter {
    pub keyword: Option<String>,
    /// Matches jobs carrying any tag with one of these names.
    pub categories: Vec<String>,
    pub status: Option<JobStatus>,
    pub employment_type: Option<EmploymentType>,
    pub remote_only: bool,
}

impl JobFilter {
    /// Builds a filter from `?q=&category=...&status=&employmentType=&remoteOnly=`.
    pub fn from_query(pairs: &[(String, String)]) -> Result<Self, AppError> {
        let mut filter = JobFilter::default();
        for (key, value) in pairs {
            match key.as_str() {
                "q" => filter.keyword = normalize_keyword(value),
                "category" => {
                    if let Some(category) = normalize_keyword(value) {
                        if !filter.categories.contains(&category) {
                            filter.categories.push(category);
                        }
                    }
                }
                "status" if !value.is_empty() => {
                    filter.status = Some(JobStatus::parse(value).ok_or_else(|| {
                        AppError::Validation(format!("unknown job status '{value}'"))
                    })?);
                }
                "employmentType" if !value.is_empty() => {
                    filter.employment_type = Some(EmploymentType::parse(value).ok_or_else(|| {
                        AppError::Validation(format!("unknown employment type '{value}'"))
                    })?);
                }
                "remoteOnly" => filter.remote_only = value == "true",
                _ => {}
            }
        }
        Ok(filter)
    }
}
