//! Repository for `candidates` and `candidate_notes`.

use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::info;
use uuid::Uuid;

use crate::candidates::models::{
    Candidate, CandidateFilter, CandidateNote, CandidatePatch, NewCandidate,
};
use crate::models::candidate::{CandidateNoteRow, CandidateRow};
use crate::models::enums::{CandidateStatus, StoredCandidateStatus};
use crate::query::push_keyword_clause;

const SELECT_CANDIDATES: &str = r#"
    SELECT c.id, c.first_name, c.last_name, c.kana, c.email, c.phone, c.location,
           c.status, c.experience_years, c.current_company, c.current_title,
           c.desired_roles, c.desired_salary_jpy, c.notice_period_days,
           c.labels, c.skills, c.resume_url, c.risk_flag,
           c.owner_id, a.name AS owner_name, c.created_at, c.updated_at
    FROM candidates c
    JOIN agents a ON a.id = c.owner_id
"#;

const KEYWORD_COLUMNS: [&str; 6] = [
    "c.first_name",
    "c.last_name",
    "c.kana",
    "c.email",
    "c.current_title",
    "c.current_company",
];

pub struct CandidateRepository;

impl CandidateRepository {
    /// All candidates matching `filter`, most recently updated first. Unbounded.
    pub async fn find_many(pool: &PgPool, filter: &CandidateFilter) -> Result<Vec<Candidate>, sqlx::Error> {
        let mut qb = find_many_query(filter);
        let rows = qb.build_query_as::<CandidateRow>().fetch_all(pool).await?;
        Ok(rows.into_iter().map(Candidate::from).collect())
    }

    /// `None` when the id does not resolve.
    pub async fn get_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Candidate>, sqlx::Error> {
        let query = format!("{SELECT_CANDIDATES} WHERE c.id = $1");
        let row = sqlx::query_as::<_, CandidateRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(Candidate::from))
    }

    /// Bulk lookup for enriching pipeline cards. Missing ids are skipped.
    pub async fn find_by_ids(pool: &PgPool, ids: &[Uuid]) -> Result<Vec<Candidate>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!("{SELECT_CANDIDATES} WHERE c.id = ANY($1)");
        let rows = sqlx::query_as::<_, CandidateRow>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(Candidate::from).collect())
    }

    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM candidates")
            .fetch_one(pool)
            .await
    }

    /// Notes for a candidate, newest first.
    pub async fn get_notes(pool: &PgPool, candidate_id: Uuid) -> Result<Vec<CandidateNote>, sqlx::Error> {
        let rows = sqlx::query_as::<_, CandidateNoteRow>(
            r#"
            SELECT n.id, n.candidate_id, a.name AS author_name, n.body, n.created_at
            FROM candidate_notes n
            JOIN agents a ON a.id = n.author_id
            WHERE n.candidate_id = $1
            ORDER BY n.created_at DESC, n.id
            "#,
        )
        .bind(candidate_id)
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(CandidateNote::from).collect())
    }

    /// Appends a note. Notes are never updated or deleted.
    pub async fn append_note(
        pool: &PgPool,
        candidate_id: Uuid,
        author_id: Uuid,
        body: &str,
    ) -> Result<CandidateNote, sqlx::Error> {
        let row = sqlx::query_as::<_, CandidateNoteRow>(
            r#"
            WITH inserted AS (
                INSERT INTO candidate_notes (candidate_id, author_id, body)
                VALUES ($1, $2, $3)
                RETURNING id, candidate_id, author_id, body, created_at
            )
            SELECT i.id, i.candidate_id, a.name AS author_name, i.body, i.created_at
            FROM inserted i
            JOIN agents a ON a.id = i.author_id
            "#,
        )
        .bind(candidate_id)
        .bind(author_id)
        .bind(body)
        .fetch_one(pool)
        .await?;

        info!("Appended note {} to candidate {candidate_id}", row.id);
        Ok(CandidateNote::from(row))
    }

    pub async fn create(pool: &PgPool, owner_id: Uuid, input: &NewCandidate) -> Result<Candidate, sqlx::Error> {
        let status = StoredCandidateStatus::from(input.status.unwrap_or(CandidateStatus::New));
        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO candidates
                (first_name, last_name, kana, email, phone, location, status,
                 experience_years, current_company, current_title, desired_roles,
                 desired_salary_jpy, notice_period_days, owner_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, COALESCE($13, 30), $14)
            RETURNING id
            "#,
        )
        .bind(input.first_name.trim())
        .bind(input.last_name.trim())
        .bind(&input.kana)
        .bind(input.email.trim())
        .bind(&input.phone)
        .bind(&input.location)
        .bind(status)
        .bind(input.experience_years)
        .bind(&input.current_company)
        .bind(&input.current_title)
        .bind(&input.desired_roles)
        .bind(input.desired_annual_salary)
        .bind(input.notice_period_days)
        .bind(owner_id)
        .fetch_one(pool)
        .await?;

        info!("Created candidate {id} owned by agent {owner_id}");
        Self::get_by_id(pool, id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    /// Applies the present fields of `patch` and bumps `updated_at`.
    /// `None` when the id does not resolve.
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        patch: &CandidatePatch,
    ) -> Result<Option<Candidate>, sqlx::Error> {
        let mut qb = update_query(id, patch);
        let updated = qb.build_query_scalar::<Uuid>().fetch_optional(pool).await?;
        match updated {
            Some(id) => Self::get_by_id(pool, id).await,
            None => Ok(None),
        }
    }

    /// Deletes the candidate with its notes and applications.
    /// `false` when the id does not resolve.
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM candidates WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        let deleted = result.rows_affected() > 0;
        if deleted {
            info!("Deleted candidate {id}");
        }
        Ok(deleted)
    }
}

/// Builds the `find_many` statement. Kept separate so the SQL can be checked
/// without a database.
pub(crate) fn find_many_query(filter: &CandidateFilter) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(SELECT_CANDIDATES);
    qb.push(" WHERE TRUE");

    if let Some(keyword) = &filter.keyword {
        push_keyword_clause(&mut qb, &KEYWORD_COLUMNS, keyword);
    }

    if !filter.statuses.is_empty() {
        let stored: Vec<StoredCandidateStatus> =
            filter.statuses.iter().copied().map(Into::into).collect();
        qb.push(" AND c.status = ANY(").push_bind(stored).push(")");
    }

    if let Some(owner) = &filter.owner {
        qb.push(" AND a.name = ").push_bind(owner.clone());
    }

    qb.push(" ORDER BY c.updated_at DESC, c.id");
    qb
}

fn push_set<T>(qb: &mut QueryBuilder<'static, Postgres>, column: &str, value: Option<T>)
where
    T: 'static + Send + sqlx::Encode<'static, Postgres> + sqlx::Type<Postgres>,
{
    if let Some(value) = value {
        qb.push(", ").push(column).push(" = ").push_bind(value);
    }
}

/// Builds the `update` statement. Only the fields present in `patch` are set.
pub(crate) fn update_query(id: Uuid, patch: &CandidatePatch) -> QueryBuilder<'static, Postgres> {
    let trimmed = |v: &Option<String>| v.as_deref().map(|s| s.trim().to_string());

    let mut qb = QueryBuilder::new("UPDATE candidates SET updated_at = NOW()");
    push_set(&mut qb, "first_name", trimmed(&patch.first_name));
    push_set(&mut qb, "last_name", trimmed(&patch.last_name));
    push_set(&mut qb, "kana", patch.kana.clone());
    push_set(&mut qb, "email", trimmed(&patch.email));
    push_set(&mut qb, "phone", patch.phone.clone());
    push_set(&mut qb, "location", patch.location.clone());
    push_set(&mut qb, "status", patch.status.map(StoredCandidateStatus::from));
    push_set(&mut qb, "experience_years", patch.experience_years);
    push_set(&mut qb, "current_company", patch.current_company.clone());
    push_set(&mut qb, "current_title", patch.current_title.clone());
    push_set(&mut qb, "desired_roles", patch.desired_roles.clone());
    push_set(&mut qb, "desired_salary_jpy", patch.desired_annual_salary);
    push_set(&mut qb, "notice_period_days", patch.notice_period_days);
    qb.push(" WHERE id = ").push_bind(id).push(" RETURNING id");
    qb
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalized(sql: &str) -> String {
        sql.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    #[test]
    fn test_empty_filter_orders_by_updated_at_desc() {
        let qb = find_many_query(&CandidateFilter::default());
        let sql = normalized(qb.sql());
        assert!(sql.ends_with("WHERE TRUE ORDER BY c.updated_at DESC, c.id"));
        assert!(!sql.contains("ILIKE"));
        assert!(!sql.contains('$'));
    }

    #[test]
    fn test_keyword_spans_all_text_fields() {
        let filter = CandidateFilter {
            keyword: Some("yamada".to_string()),
            ..Default::default()
        };
        let sql = normalized(find_many_query(&filter).sql());
        assert!(sql.contains(
            "AND (c.first_name ILIKE $1 OR c.last_name ILIKE $2 OR c.kana ILIKE $3 \
             OR c.email ILIKE $4 OR c.current_title ILIKE $5 OR c.current_company ILIKE $6)"
        ));
    }

    #[test]
    fn test_dimensions_are_anded() {
        let filter = CandidateFilter {
            keyword: Some("engineer".to_string()),
            statuses: vec![CandidateStatus::Interview, CandidateStatus::Offer],
            owner: Some("Akira".to_string()),
        };
        let sql = normalized(find_many_query(&filter).sql());
        assert!(sql.contains("ILIKE $6) AND c.status = ANY($7) AND a.name = $8 ORDER BY"));
    }

    #[test]
    fn test_update_sets_only_present_fields() {
        let patch = CandidatePatch {
            status: Some(CandidateStatus::Offer),
            desired_annual_salary: Some(900),
            ..Default::default()
        };
        let sql = normalized(update_query(Uuid::nil(), &patch).sql());
        assert_eq!(
            sql,
            "UPDATE candidates SET updated_at = NOW(), status = $1, desired_salary_jpy = $2 \
             WHERE id = $3 RETURNING id"
        );
    }

    // ── Database-backed ──────────────────────────────────────────────────

    mod db {
        use chrono::{Duration, Utc};
        use sqlx::PgPool;

        use super::*;
        use crate::test_support;

        #[sqlx::test(migrations = "./migrations")]
        async fn test_find_many_is_most_recently_updated_first(pool: PgPool) {
            let owner = test_support::insert_agent(&pool, "owner@cube.example").await;
            let now = Utc::now();
            for (i, name) in ["一郎", "二郎", "三郎", "四郎"].iter().enumerate() {
                let offset = Duration::hours([3, 1, 4, 2][i]);
                test_support::insert_candidate(&pool, owner, name, now - offset).await;
            }

            let found = CandidateRepository::find_many(&pool, &CandidateFilter::default())
                .await
                .unwrap();

            assert_eq!(found.len(), 4);
            assert!(found.windows(2).all(|w| w[0].updated_at >= w[1].updated_at));
            assert_eq!(found[0].name, "二郎 テスト");
        }

        #[sqlx::test(migrations = "./migrations")]
        async fn test_unknown_id_is_none(pool: PgPool) {
            let missing = Uuid::new_v4();
            assert!(CandidateRepository::get_by_id(&pool, missing).await.unwrap().is_none());

            let patch = CandidatePatch {
                status: Some(CandidateStatus::Placed),
                ..Default::default()
            };
            assert!(CandidateRepository::update(&pool, missing, &patch).await.unwrap().is_none());
            assert!(!CandidateRepository::delete(&pool, missing).await.unwrap());
        }

        #[sqlx::test(migrations = "./migrations")]
        async fn test_update_changes_fields_and_bumps_updated_at(pool: PgPool) {
            let owner = test_support::insert_agent(&pool, "owner@cube.example").await;
            let before = Utc::now() - Duration::days(2);
            let id = test_support::insert_candidate(&pool, owner, "花子", before).await;

            let patch = CandidatePatch {
                status: Some(CandidateStatus::Interview),
                current_title: Some("テックリード".to_string()),
                desired_roles: Some(vec!["EM".to_string()]),
                ..Default::default()
            };
            let updated = CandidateRepository::update(&pool, id, &patch)
                .await
                .unwrap()
                .expect("candidate exists");

            assert_eq!(updated.status, CandidateStatus::Interview);
            assert_eq!(updated.current_title, "テックリード");
            assert_eq!(updated.desired_roles, vec!["EM".to_string()]);
            assert_eq!(updated.name, "花子 テスト");
            assert!(updated.updated_at > before);
        }

        #[sqlx::test(migrations = "./migrations")]
        async fn test_delete_cascades_to_notes(pool: PgPool) {
            let owner = test_support::insert_agent(&pool, "owner@cube.example").await;
            let id = test_support::insert_candidate(&pool, owner, "健", Utc::now()).await;
            CandidateRepository::append_note(&pool, id, owner, "一次面接の日程調整中")
                .await
                .unwrap();

            assert!(CandidateRepository::delete(&pool, id).await.unwrap());
            assert!(CandidateRepository::get_notes(&pool, id).await.unwrap().is_empty());
            assert_eq!(CandidateRepository::count(&pool).await.unwrap(), 0);
        }
    }
}
