use std::collections::HashMap;

use rust_decimal::Decimal;
use sqlx::{Pool, Postgres};

use crate::api::job::{JobUpdate, NewJob};
use crate::db::error::RepositoryError;
use crate::db::filters::translate_filters;
use crate::db::models::JobRow;
use crate::db::sql::{bind_values, sql_for_partial_update};

const JOB_COLUMNS: &str = "id, title, salary, equity, company_handle";

/// Repository for Job database operations
#[derive(Clone)]
pub struct JobRepository {
    pool: Pool<Postgres>,
}

impl JobRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Job field names match their column names.
    fn column_map() -> HashMap<&'static str, &'static str> {
        HashMap::new()
    }

    /// Insert a job and return the full record.
    ///
    /// Fails with `DuplicateEntity` when (title, salary, equity, company_handle)
    /// already exists. The lookup gives the common case a clear error; the
    /// unique index catches inserts racing past it.
    pub async fn create(&self, job: &NewJob) -> Result<JobRow, RepositoryError> {
        let equity: Option<Decimal> = job.equity.map(Decimal::from);

        let existing = sqlx::query_scalar::<_, i32>(
            r#"
            SELECT id
            FROM jobs
            WHERE title = $1
              AND salary IS NOT DISTINCT FROM $2
              AND equity IS NOT DISTINCT FROM $3
              AND company_handle = $4
            "#,
        )
        .bind(&job.title)
        .bind(job.salary)
        .bind(equity)
        .bind(&job.company_handle)
        .fetch_optional(&self.pool)
        .await?;

        if existing.is_some() {
            return Err(RepositoryError::DuplicateEntity(describe(job)));
        }

        sqlx::query_as::<_, JobRow>(&format!(
            "INSERT INTO jobs (title, salary, equity, company_handle)
             VALUES ($1, $2, $3, $4)
             RETURNING {JOB_COLUMNS}"
        ))
        .bind(&job.title)
        .bind(job.salary)
        .bind(equity)
        .bind(&job.company_handle)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| classify(e, describe(job), &job.company_handle))
    }

    /// Jobs matching the raw search filters, ordered by title.
    pub async fn find_all(
        &self,
        filters: &[(String, String)],
    ) -> Result<Vec<JobRow>, RepositoryError> {
        let clause = translate_filters(filters)?;

        let mut query = format!("SELECT {JOB_COLUMNS} FROM jobs");
        if !clause.is_empty() {
            query.push_str(" WHERE ");
            query.push_str(&clause.sql);
        }
        query.push_str(" ORDER BY title, id");

        let rows = bind_values(sqlx::query_as::<_, JobRow>(&query), clause.params)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    pub async fn get(&self, id: i32) -> Result<JobRow, RepositoryError> {
        sqlx::query_as::<_, JobRow>(&format!("SELECT {JOB_COLUMNS} FROM jobs WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(RepositoryError::NotFound(id))
    }

    /// Apply a sparse update and return the updated record.
    ///
    /// An empty update fails before any query is sent.
    pub async fn update(&self, id: i32, update: &JobUpdate) -> Result<JobRow, RepositoryError> {
        let set = sql_for_partial_update(update.changes(), &Self::column_map())?;
        let id_placeholder = set.values.len() + 1;

        let query = format!(
            "UPDATE jobs SET {} WHERE id = ${} RETURNING {JOB_COLUMNS}",
            set.sql, id_placeholder
        );

        let row = bind_values(sqlx::query_as::<_, JobRow>(&query), set.values)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                let duplicate = format!("update of job {} collides with another job", id);
                classify(e, duplicate, "")
            })?;

        row.ok_or(RepositoryError::NotFound(id))
    }

    pub async fn remove(&self, id: i32) -> Result<(), RepositoryError> {
        sqlx::query_scalar::<_, i32>("DELETE FROM jobs WHERE id = $1 RETURNING id")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(|_| ())
            .ok_or(RepositoryError::NotFound(id))
    }
}

fn describe(job: &NewJob) -> String {
    format!("{} at {}", job.title, job.company_handle)
}

/// Translate constraint violations into domain errors.
fn classify(err: sqlx::Error, duplicate: String, company_handle: &str) -> RepositoryError {
    if let Some(db_err) = err.as_database_error() {
        if db_err.is_unique_violation() {
            return RepositoryError::DuplicateEntity(duplicate);
        }
        if db_err.is_foreign_key_violation() {
            return RepositoryError::UnknownCompany(company_handle.to_string());
        }
        if db_err.is_check_violation() {
            let constraint = db_err.constraint().unwrap_or("check").to_string();
            return RepositoryError::ConstraintViolation(constraint);
        }
    }
    RepositoryError::Database(err)
}
