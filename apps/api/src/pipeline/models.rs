use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::candidates::models::Candidate;
use crate::errors::AppError;
use crate::jobs::models::Job;
use crate::models::application::ApplicationRow;
use crate::models::enums::{ApplicationStage, ApplicationStatus};

/// One candidate submitted against one job.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: Uuid,
    pub candidate_id: Uuid,
    pub job_id: Uuid,
    pub stage: ApplicationStage,
    pub status: ApplicationStatus,
    /// In [0, 1].
    pub probability: f64,
    pub last_action_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ApplicationRow> for Application {
    fn from(row: ApplicationRow) -> Self {
        Application {
            id: row.id,
            candidate_id: row.candidate_id,
            job_id: row.job_id,
            stage: row.stage.into(),
            status: row.status.into(),
            probability: row.probability,
            last_action_at: row.updated_at,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// An application enriched with candidate and job snapshots for the board.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PipelineCard {
    #[serde(flatten)]
    pub application: Application,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub candidate: Option<Candidate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job: Option<Job>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PipelineColumn {
    pub stage: ApplicationStage,
    pub label: String,
    pub applications: Vec<PipelineCard>,
}

/// Body of `PATCH /api/pipelines/:id`. Kept loose so a missing or unknown
/// stage is reported as a validation error rather than a decode failure.
#[derive(Debug, Deserialize)]
pub struct UpdateStageRequest {
    pub stage: Option<String>,
}

impl UpdateStageRequest {
    pub fn into_stage(self) -> Result<ApplicationStage, AppError> {
        let raw = self
            .stage
            .filter(|s| !s.is_empty())
            .ok_or_else(|| AppError::Validation("Stage is required".into()))?;
        ApplicationStage::parse(&raw)
            .ok_or_else(|| AppError::Validation(format!("unknown stage '{raw}'")))
    }
}

/// Body of `POST /api/pipelines`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewApplication {
    pub candidate_id: Uuid,
    pub job_id: Uuid,
    pub probability: Option<f64>,
}

impl NewApplication {
    pub fn probability(&self) -> Result<f64, AppError> {
        let p = self.probability.unwrap_or(0.0);
        if !(0.0..=1.0).contains(&p) {
            return Err(AppError::Validation("probability must be between 0 and 1".into()));
        }
        Ok(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_stage_is_validation_error() {
        let req: UpdateStageRequest = serde_json::from_str("{}").unwrap();
        assert!(matches!(req.into_stage(), Err(AppError::Validation(m)) if m == "Stage is required"));

        let req: UpdateStageRequest = serde_json::from_str(r#"{"stage": ""}"#).unwrap();
        assert!(req.into_stage().is_err());
    }

    #[test]
    fn test_unknown_stage_is_validation_error() {
        let req: UpdateStageRequest = serde_json::from_str(r#"{"stage": "HIRED"}"#).unwrap();
        assert!(matches!(req.into_stage(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_known_stage_parses() {
        let req: UpdateStageRequest =
            serde_json::from_str(r#"{"stage": "secondInterview"}"#).unwrap();
        assert_eq!(req.into_stage().unwrap(), ApplicationStage::SecondInterview);
    }

    #[test]
    fn test_probability_bounds() {
        let make = |p: Option<f64>| NewApplication {
            candidate_id: Uuid::new_v4(),
            job_id: Uuid::new_v4(),
            probability: p,
        };
        assert_eq!(make(None).probability().unwrap(), 0.0);
        assert_eq!(make(Some(1.0)).probability().unwrap(), 1.0);
        assert!(make(Some(1.2)).probability().is_err());
        assert!(make(Some(-0.1)).probability().is_err());
        assert!(make(Some(f64::NAN)).probability().is_err());
    }
}
