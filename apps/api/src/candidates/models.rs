use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::candidate::{CandidateNoteRow, CandidateRow};
use crate::models::enums::CandidateStatus;
use crate::query::normalize_keyword;

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub id: Uuid,
    pub name: String,
    pub kana: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub status: CandidateStatus,
    pub headline: String,
    pub experience_years: i32,
    pub current_company: String,
    pub current_title: String,
    pub desired_roles: Vec<String>,
    pub desired_annual_salary: i32,
    pub notice_period_days: i32,
    pub labels: Vec<String>,
    pub skills: Vec<String>,
    pub owner: String,
    pub owner_id: Uuid,
    pub last_contact_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resume_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_flag: Option<String>,
}

impl From<CandidateRow> for Candidate {
    fn from(row: CandidateRow) -> Self {
        let current_title = row.current_title.unwrap_or_default();
        Candidate {
            id: row.id,
            name: format!("{} {}", row.first_name, row.last_name),
            kana: row.kana.unwrap_or_default(),
            email: row.email,
            phone: row.phone.unwrap_or_default(),
            location: row.location.unwrap_or_default(),
            status: row.status.into(),
            headline: current_title.clone(),
            experience_years: row.experience_years.unwrap_or(0),
            current_company: row.current_company.unwrap_or_default(),
            current_title,
            desired_roles: row.desired_roles,
            desired_annual_salary: row.desired_salary_jpy.unwrap_or(0),
            notice_period_days: row.notice_period_days,
            labels: row.labels,
            skills: row.skills,
            owner: row.owner_name,
            owner_id: row.owner_id,
            last_contact_at: row.updated_at,
            created_at: row.created_at,
            updated_at: row.updated_at,
            resume_url: row.resume_url,
            risk_flag: row.risk_flag,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CandidateNote {
    pub id: Uuid,
    pub candidate_id: Uuid,
    pub author: String,
    pub created_at: DateTime<Utc>,
    pub body: String,
}

impl From<CandidateNoteRow> for CandidateNote {
    fn from(row: CandidateNoteRow) -> Self {
        CandidateNote {
            id: row.id,
            candidate_id: row.candidate_id,
            author: row.author_name,
            created_at: row.created_at,
            body: row.body,
        }
    }
}

/// Filter for the candidate list. Dimensions are AND-ed; the keyword is
/// matched case-insensitively against any of the searchable text fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CandidateFilter {
    pub keyword: Option<String>,
    pub statuses: Vec<CandidateStatus>,
    pub owner: Option<String>,
}

impl CandidateFilter {
    /// Builds a filter from `?q=&status=...&owner=` pairs. `status` may repeat.
    pub fn from_query(pairs: &[(String, String)]) -> Result<Self, AppError> {
        let mut filter = CandidateFilter::default();
        for (key, value) in pairs {
            match key.as_str() {
                "q" => filter.keyword = normalize_keyword(value),
                "status" if !value.is_empty() => {
                    let status = CandidateStatus::parse(value).ok_or_else(|| {
                        AppError::Validation(format!("unknown candidate status '{value}'"))
                    })?;
                    if !filter.statuses.contains(&status) {
                        filter.statuses.push(status);
                    }
                }
                "owner" => filter.owner = normalize_keyword(value),
                _ => {}
            }
        }
        Ok(filter)
    }
}

/// Body of `POST /api/candidates`. The owner is the signed-in agent.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCandidate {
    pub first_name: String,
    pub last_name: String,
    pub kana: Option<String>,
    pub email: String,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub status: Option<CandidateStatus>,
    pub experience_years: Option<i32>,
    pub current_company: Option<String>,
    pub current_title: Option<String>,
    #[serde(default)]
    pub desired_roles: Vec<String>,
    pub desired_annual_salary: Option<i32>,
    pub notice_period_days: Option<i32>,
}

impl NewCandidate {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.first_name.trim().is_empty() || self.last_name.trim().is_empty() {
            return Err(AppError::Validation("firstName and lastName are required".into()));
        }
        if !self.email.contains('@') {
            return Err(AppError::Validation("email must be a valid address".into()));
        }
        if self.notice_period_days.is_some_and(|d| d < 0) {
            return Err(AppError::Validation("noticePeriodDays must not be negative".into()));
        }
        Ok(())
    }
}

/// Body of `PATCH /api/candidates/:id`. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidatePatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub kana: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub status: Option<CandidateStatus>,
    pub experience_years: Option<i32>,
    pub current_company: Option<String>,
    pub current_title: Option<String>,
    pub desired_roles: Option<Vec<String>>,
    pub desired_annual_salary: Option<i32>,
    pub notice_period_days: Option<i32>,
}

impl CandidatePatch {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.kana.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.location.is_none()
            && self.status.is_none()
            && self.experience_years.is_none()
            && self.current_company.is_none()
            && self.current_title.is_none()
            && self.desired_roles.is_none()
            && self.desired_annual_salary.is_none()
            && self.notice_period_days.is_none()
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.is_empty() {
            return Err(AppError::Validation("No fields to update".into()));
        }
        let blank = |v: &Option<String>| v.as_deref().is_some_and(|s| s.trim().is_empty());
        if blank(&self.first_name) || blank(&self.last_name) {
            return Err(AppError::Validation("firstName and lastName must not be empty".into()));
        }
        if self.email.as_deref().is_some_and(|e| !e.contains('@')) {
            return Err(AppError::Validation("email must be a valid address".into()));
        }
        if self.notice_period_days.is_some_and(|d| d < 0) {
            return Err(AppError::Validation("noticePeriodDays must not be negative".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewNote {
    pub body: Option<String>,
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use crate::models::enums::StoredCandidateStatus;

    pub fn candidate_row(first: &str, last: &str, updated_at: DateTime<Utc>) -> CandidateRow {
        CandidateRow {
            id: Uuid::new_v4(),
            first_name: first.to_string(),
            last_name: last.to_string(),
            kana: None,
            email: format!("{first}@example.com"),
            phone: None,
            location: Some("東京".to_string()),
            status: StoredCandidateStatus::Screening,
            experience_years: Some(5),
            current_company: None,
            current_title: Some("フロントエンドエンジニア".to_string()),
            desired_roles: vec!["フロントエンド".to_string()],
            desired_salary_jpy: None,
            notice_period_days: 30,
            labels: vec![],
            skills: vec![],
            resume_url: None,
            risk_flag: None,
            owner_id: Uuid::new_v4(),
            owner_name: "Akira".to_string(),
            created_at: updated_at,
            updated_at,
        }
    }
}
