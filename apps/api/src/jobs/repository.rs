//! Repository for `jobs`, joined with companies and tags.

use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::jobs::models::{Job, JobFilter};
use crate::models::enums::{StoredEmploymentType, StoredJobStatus};
use crate::models::job::JobRow;
use crate::query::push_keyword_clause;

const SELECT_JOBS: &str = r#"
    SELECT j.id, j.company_id, co.name AS company_name, co.headcount AS company_headcount,
           j.title, j.summary, j.description, j.location,
           j.compensation_min, j.compensation_max, j.employment_type, j.status,
           j.remote_friendly, j.urgent, j.openings,
           ARRAY(
               SELECT t.name FROM job_tag_links l
               JOIN job_tags t ON t.id = l.tag_id
               WHERE l.job_id = j.id
               ORDER BY t.name
           ) AS tags,
           COALESCE((
               SELECT AVG(CASE WHEN ap.stage = 'HIRED' THEN 1.0 ELSE 0.0 END)
               FROM applications ap
               WHERE ap.job_id = j.id
           ), 0)::float8 AS success_rate,
           j.created_at, j.updated_at
    FROM jobs j
    JOIN companies co ON co.id = j.company_id
"#;

const KEYWORD_COLUMNS: [&str; 4] = ["j.title", "j.description", "j.location", "co.name"];

pub struct JobRepository;

impl JobRepository {
    /// All jobs matching `filter`, most recently updated first. Unbounded.
    pub async fn find_many(pool: &PgPool, filter: &JobFilter) -> Result<Vec<Job>, sqlx::Error> {
        let mut qb = find_many_query(filter);
        let rows = qb.build_query_as::<JobRow>().fetch_all(pool).await?;
        Ok(rows.into_iter().map(Job::from).collect())
    }

    /// `None` when the id does not resolve.
    pub async fn get_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Job>, sqlx::Error> {
        let query = format!("{SELECT_JOBS} WHERE j.id = $1");
        let row = sqlx::query_as::<_, JobRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(Job::from))
    }

    /// Bulk lookup for enriching pipeline cards. Missing ids are skipped.
    pub async fn find_by_ids(pool: &PgPool, ids: &[Uuid]) -> Result<Vec<Job>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!("{SELECT_JOBS} WHERE j.id = ANY($1)");
        let rows = sqlx::query_as::<_, JobRow>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(Job::from).collect())
    }

    /// Newest open jobs by creation time.
    pub async fn get_latest(pool: &PgPool, limit: i64) -> Result<Vec<Job>, sqlx::Error> {
        let query = format!(
            "{SELECT_JOBS} WHERE j.status = 'OPEN' ORDER BY j.created_at DESC, j.id LIMIT $1"
        );
        let rows = sqlx::query_as::<_, JobRow>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(Job::from).collect())
    }

    /// Open jobs with the most recent activity first.
    pub async fn get_hot(pool: &PgPool, limit: i64) -> Result<Vec<Job>, sqlx::Error> {
        let query = format!(
            "{SELECT_JOBS} WHERE j.status = 'OPEN' ORDER BY j.updated_at DESC, j.id LIMIT $1"
        );
        let rows = sqlx::query_as::<_, JobRow>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(Job::from).collect())
    }
}

pub(crate) fn find_many_query(filter: &JobFilter) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(SELECT_JOBS);
    qb.push(" WHERE TRUE");

    if let Some(keyword) = &filter.keyword {
        push_keyword_clause(&mut qb, &KEYWORD_COLUMNS, keyword);
    }

    if !filter.categories.is_empty() {
        qb.push(
            " AND EXISTS (SELECT 1 FROM job_tag_links l JOIN job_tags t ON t.id = l.tag_id \
             WHERE l.job_id = j.id AND t.name = ANY(",
        )
        .push_bind(filter.categories.clone())
        .push("))");
    }

    if let Some(status) = filter.status {
        qb.push(" AND j.status = ")
            .push_bind(StoredJobStatus::from(status));
    }

    if let Some(kind) = filter.employment_type {
        qb.push(" AND j.employment_type = ")
            .push_bind(StoredEmploymentType::from(kind));
    }

    if filter.remote_only {
        qb.push(" AND j.remote_friendly");
    }

    qb.push(" ORDER BY j.updated_at DESC, j.id");
    qb
}
