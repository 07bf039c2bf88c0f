//! Read-only aggregate queries for the dashboard.

use sqlx::PgPool;

use crate::candidates::repository::CandidateRepository;
use crate::dashboard::models::{
    build_funnel, build_kpis, Announcement, DashboardSnapshot, Project, StageCounts,
    CATEGORY_SHORTCUTS,
};
use crate::jobs::repository::JobRepository;
use crate::models::dashboard::{AnnouncementRow, ProjectSummaryRow, StageCountRow};

const NEW_JOBS_LIMIT: i64 = 3;
const ANNOUNCEMENTS_LIMIT: i64 = 5;
const PROJECTS_LIMIT: i64 = 10;

pub struct DashboardRepository;

impl DashboardRepository {
    pub async fn get_snapshot(pool: &PgPool) -> Result<DashboardSnapshot, sqlx::Error> {
        let (candidate_count, counts, new_jobs, announcements, projects) = tokio::try_join!(
            CandidateRepository::count(pool),
            Self::stage_counts(pool),
            JobRepository::get_latest(pool, NEW_JOBS_LIMIT),
            Self::latest_announcements(pool),
            Self::recent_projects(pool),
        )?;

        Ok(DashboardSnapshot {
            kpis: build_kpis(candidate_count, &counts),
            funnel: build_funnel(&counts),
            new_jobs,
            announcements,
            projects,
            category_shortcuts: CATEGORY_SHORTCUTS.iter().map(|s| s.to_string()).collect(),
        })
    }

    async fn stage_counts(pool: &PgPool) -> Result<StageCounts, sqlx::Error> {
        let rows = sqlx::query_as::<_, StageCountRow>(
            "SELECT stage, COUNT(*) AS count FROM applications GROUP BY stage",
        )
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().collect())
    }

    async fn latest_announcements(pool: &PgPool) -> Result<Vec<Announcement>, sqlx::Error> {
        let rows = sqlx::query_as::<_, AnnouncementRow>(
            r#"
            SELECT id, title, body, severity, published_at
            FROM announcements
            ORDER BY published_at DESC
            LIMIT $1
            "#,
        )
        .bind(ANNOUNCEMENTS_LIMIT)
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(Announcement::from).collect())
    }

    async fn recent_projects(pool: &PgPool) -> Result<Vec<Project>, sqlx::Error> {
        let rows = sqlx::query_as::<_, ProjectSummaryRow>(
            r#"
            SELECT p.id, p.name, p.description,
                   (SELECT COUNT(*) FROM project_jobs pj WHERE pj.project_id = p.id) AS job_count,
                   (SELECT COUNT(*) FROM project_candidates pc WHERE pc.project_id = p.id) AS candidate_count,
                   p.updated_at
            FROM projects p
            ORDER BY p.updated_at DESC
            LIMIT $1
            "#,
        )
        .bind(PROJECTS_LIMIT)
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(Project::from).collect())
    }
}
