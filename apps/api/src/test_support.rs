//! Row builders for the `#[sqlx::test]` suites. Each helper inserts the
//! minimum a row needs and returns its id.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

pub async fn insert_agent(pool: &PgPool, email: &str) -> Uuid {
    sqlx::query_scalar(
        "INSERT INTO agents (email, name, organization) VALUES ($1, $2, 'Cube Agency') RETURNING id",
    )
    .bind(email)
    .bind(email.split('@').next().unwrap_or(email))
    .fetch_one(pool)
    .await
    .expect("insert agent")
}

/// The candidate's last name is always `テスト`.
pub async fn insert_candidate(
    pool: &PgPool,
    owner_id: Uuid,
    first_name: &str,
    updated_at: DateTime<Utc>,
) -> Uuid {
    sqlx::query_scalar(
        "INSERT INTO candidates (first_name, last_name, email, owner_id, created_at, updated_at)
         VALUES ($1, 'テスト', $2, $3, $4, $4) RETURNING id",
    )
    .bind(first_name)
    .bind(format!("{}@candidate.example", Uuid::new_v4().simple()))
    .bind(owner_id)
    .bind(updated_at)
    .fetch_one(pool)
    .await
    .expect("insert candidate")
}

pub async fn insert_company(pool: &PgPool, name: &str) -> Uuid {
    sqlx::query_scalar("INSERT INTO companies (name, headcount) VALUES ($1, 120) RETURNING id")
        .bind(name)
        .fetch_one(pool)
        .await
        .expect("insert company")
}

/// `status` is the storage label, e.g. `OPEN` or `CLOSED`.
pub async fn insert_job(
    pool: &PgPool,
    company_id: Uuid,
    title: &str,
    status: &str,
    updated_at: DateTime<Utc>,
) -> Uuid {
    sqlx::query_scalar(
        "INSERT INTO jobs (company_id, title, status, created_at, updated_at)
         VALUES ($1, $2, $3::job_status, $4, $4) RETURNING id",
    )
    .bind(company_id)
    .bind(title)
    .bind(status)
    .bind(updated_at)
    .fetch_one(pool)
    .await
    .expect("insert job")
}

/// A candidate owned by a fresh agent, applied to an open job. Returns
/// `(application_id, candidate_id, job_id)`.
pub async fn insert_application(pool: &PgPool) -> (Uuid, Uuid, Uuid) {
    let owner = insert_agent(pool, &format!("{}@cube.example", Uuid::new_v4().simple())).await;
    let candidate_id = insert_candidate(pool, owner, "応募者", Utc::now()).await;
    let company_id = insert_company(pool, "株式会社テスト").await;
    let job_id = insert_job(pool, company_id, "バックエンドエンジニア", "OPEN", Utc::now()).await;

    let application_id = sqlx::query_scalar(
        "INSERT INTO applications (candidate_id, job_id, probability) VALUES ($1, $2, 0.2) RETURNING id",
    )
    .bind(candidate_id)
    .bind(job_id)
    .fetch_one(pool)
    .await
    .expect("insert application");

    (application_id, candidate_id, job_id)
}
