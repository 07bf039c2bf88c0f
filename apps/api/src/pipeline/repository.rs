//! Repository for `applications` and the board built from them.

use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::candidates::repository::CandidateRepository;
use crate::jobs::repository::JobRepository;
use crate::models::application::ApplicationRow;
use crate::models::enums::{ApplicationStage, StoredApplicationStage};
use crate::pipeline::board::{build_columns, enrich};
use crate::pipeline::models::{Application, PipelineCard, PipelineColumn};

const COLUMNS: &str = "id, candidate_id, job_id, stage, status, probability, created_at, updated_at";

pub struct PipelineRepository;

impl PipelineRepository {
    /// Every application on the board, one column per stage. Unpaginated.
    pub async fn get_columns(pool: &PgPool) -> Result<Vec<PipelineColumn>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM applications ORDER BY updated_at DESC, id");
        let applications: Vec<Application> = sqlx::query_as::<_, ApplicationRow>(&query)
            .fetch_all(pool)
            .await?
            .into_iter()
            .map(Application::from)
            .collect();

        let cards = Self::enrich_all(pool, applications).await?;
        Ok(build_columns(cards))
    }

    /// A single application with its snapshots, or `None`.
    pub async fn get_card(pool: &PgPool, id: Uuid) -> Result<Option<PipelineCard>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM applications WHERE id = $1");
        let Some(row) = sqlx::query_as::<_, ApplicationRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?
        else {
            return Ok(None);
        };

        let cards = Self::enrich_all(pool, vec![Application::from(row)]).await?;
        Ok(cards.into_iter().next())
    }

    /// Overwrites the stage of one application. No transition rules apply and
    /// `status`/`probability` are left as they are. Concurrent updates are
    /// last-write-wins.
    ///
    /// Returns `None` when the id does not resolve.
    pub async fn update_stage(
        pool: &PgPool,
        id: Uuid,
        stage: ApplicationStage,
    ) -> Result<Option<Application>, sqlx::Error> {
        let query = format!(
            "UPDATE applications SET stage = $2, updated_at = NOW() WHERE id = $1 RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, ApplicationRow>(&query)
            .bind(id)
            .bind(StoredApplicationStage::from(stage))
            .fetch_optional(pool)
            .await?;

        if row.is_some() {
            info!("Moved application {id} to stage {}", stage.as_str());
        }
        Ok(row.map(Application::from))
    }

    /// Submits a candidate against a job. New applications start in `screening`.
    pub async fn create(
        pool: &PgPool,
        candidate_id: Uuid,
        job_id: Uuid,
        probability: f64,
    ) -> Result<Application, sqlx::Error> {
        let query = format!(
            "INSERT INTO applications (candidate_id, job_id, stage, status, probability)
             VALUES ($1, $2, 'SCREENING', 'ACTIVE', $3)
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, ApplicationRow>(&query)
            .bind(candidate_id)
            .bind(job_id)
            .bind(probability)
            .fetch_one(pool)
            .await?;

        info!("Created application {} for candidate {candidate_id} on job {job_id}", row.id);
        Ok(Application::from(row))
    }

    async fn enrich_all(pool: &PgPool, applications: Vec<Application>) -> Result<Vec<PipelineCard>, sqlx::Error> {
        let mut candidate_ids: Vec<Uuid> = applications.iter().map(|a| a.candidate_id).collect();
        candidate_ids.sort_unstable();
        candidate_ids.dedup();
        let mut job_ids: Vec<Uuid> = applications.iter().map(|a| a.job_id).collect();
        job_ids.sort_unstable();
        job_ids.dedup();

        let candidates = CandidateRepository::find_by_ids(pool, &candidate_ids).await?;
        let jobs = JobRepository::find_by_ids(pool, &job_ids).await?;
        Ok(enrich(applications, candidates, jobs))
    }
}

#[cfg(test)]
mod tests {
    use sqlx::PgPool;

    use super::*;
    use crate::models::enums::ApplicationStatus;
    use crate::test_support;

    fn columns_containing(columns: &[PipelineColumn], id: Uuid) -> Vec<ApplicationStage> {
        columns
            .iter()
            .filter(|c| c.applications.iter().any(|card| card.application.id == id))
            .map(|c| c.stage)
            .collect()
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_update_stage_then_board_shows_card_in_exactly_one_column(pool: PgPool) {
        let (id, candidate_id, job_id) = test_support::insert_application(&pool).await;

        for from in ApplicationStage::ALL {
            for to in ApplicationStage::ALL {
                PipelineRepository::update_stage(&pool, id, from).await.unwrap();
                let moved = PipelineRepository::update_stage(&pool, id, to)
                    .await
                    .unwrap()
                    .expect("application exists");
                assert_eq!(moved.stage, to);
                assert_eq!(moved.status, ApplicationStatus::Active);
                assert_eq!(moved.probability, 0.2);

                let columns = PipelineRepository::get_columns(&pool).await.unwrap();
                assert_eq!(columns.len(), 7);
                assert_eq!(columns_containing(&columns, id), vec![to], "{from:?} -> {to:?}");
            }
        }

        let card = PipelineRepository::get_card(&pool, id).await.unwrap().expect("card");
        assert_eq!(card.candidate.map(|c| c.id), Some(candidate_id));
        assert_eq!(card.job.map(|j| j.id), Some(job_id));
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_unknown_application_is_none(pool: PgPool) {
        let missing = Uuid::new_v4();
        assert!(PipelineRepository::get_card(&pool, missing).await.unwrap().is_none());
        assert!(PipelineRepository::update_stage(&pool, missing, ApplicationStage::Hired)
            .await
            .unwrap()
            .is_none());
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_create_starts_in_screening(pool: PgPool) {
        let (_, candidate_id, job_id) = test_support::insert_application(&pool).await;

        let created = PipelineRepository::create(&pool, candidate_id, job_id, 0.5).await.unwrap();

        assert_eq!(created.stage, ApplicationStage::Screening);
        assert_eq!(created.status, ApplicationStatus::Active);
        let columns = PipelineRepository::get_columns(&pool).await.unwrap();
        assert_eq!(columns[0].applications.len(), 2);
    }
}
