use crate::infrastructure::db::database::DatabaseError;
use crate::infrastructure::db::dto::{JobRow, NewJobRow};
use crate::infrastructure::db::postgres::PostgresDatabase;
use crate::infrastructure::db::stores::job_store::{JobRepositoryError, JobStore};
use async_trait::async_trait;
use metrics::counter;
use sqlx::{FromRow, PgConnection};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, warn};

const DEFAULT_STATEMENT_TIMEOUT: Duration = Duration::from_secs(3);

#[derive(Clone)]
pub struct JobStorePostgres {
    db: Arc<PostgresDatabase>,
    timeout: Duration,
}

impl JobStorePostgres {
    /// Build a Postgres-backed job store.
    pub fn new(db: Arc<PostgresDatabase>) -> Self {
        Self {
            db,
            timeout: DEFAULT_STATEMENT_TIMEOUT,
        }
    }

    /// Bound every store operation by `timeout` instead of the default.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn bounded<T, F>(&self, op: &'static str, fut: F) -> Result<T, JobRepositoryError>
    where
        F: Future<Output = Result<T, JobRepositoryError>>,
    {
        match tokio::time::timeout(self.timeout, fut).await {
            Ok(result) => result,
            Err(_) => {
                let timeout_ms = self.timeout.as_millis() as u64;
                error!(op, timeout_ms, "job_store_timeout");
                Err(DatabaseError::Timeout(timeout_ms).into())
            }
        }
    }

    async fn insert_impl_conn(
        conn: &mut PgConnection,
        row: &NewJobRow,
    ) -> Result<JobRow, JobRepositoryError> {
        let stored = sqlx::query_as::<_, JobRow>(
            "INSERT INTO jobs (
                prompt,
                task,
                model_id,
                output,
                latency
            )
            VALUES ($1,$2,$3,$4,$5)
            RETURNING
                id,
                prompt,
                task,
                model_id,
                output,
                latency,
                created_at",
        )
        .bind(&row.prompt)
        .bind(&row.task)
        .bind(&row.model_id)
        .bind(&row.output)
        .bind(row.latency)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| {
            error!(error = %e, "job_insert_failed");
            JobRepositoryError::from(DatabaseError::Query(e.to_string()))
        })?;

        Ok(stored)
    }

    async fn list_recent_impl_conn(
        conn: &mut PgConnection,
        limit: u32,
    ) -> Result<Vec<JobRow>, JobRepositoryError> {
        let rows = sqlx::query(
            "SELECT
                id,
                prompt,
                task,
                model_id,
                output,
                latency,
                created_at
            FROM jobs
            ORDER BY id DESC
            LIMIT $1",
        )
        .bind(i64::from(limit))
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| {
            error!(error = %e, "job_list_failed");
            JobRepositoryError::from(DatabaseError::Query(e.to_string()))
        })?;

        // One undecodable row must not fail the whole page.
        let mut jobs = Vec::with_capacity(rows.len());
        for row in &rows {
            match JobRow::from_row(row) {
                Ok(job) => jobs.push(job),
                Err(e) => {
                    warn!(error = %e, "job_row_skipped");
                    counter!("jobs_list_rows_skipped_total").increment(1);
                }
            }
        }

        Ok(jobs)
    }
}

#[async_trait]
impl JobStore for JobStorePostgres {
    async fn insert(&self, row: &NewJobRow) -> Result<JobRow, JobRepositoryError> {
        let row = row.clone();
        self.bounded(
            "insert",
            self.db.with_conn(move |conn| {
                let row = row;
                Box::pin(async move { Self::insert_impl_conn(conn, &row).await })
            }),
        )
        .await
    }

    async fn list_recent(&self, limit: u32) -> Result<Vec<JobRow>, JobRepositoryError> {
        self.bounded(
            "list_recent",
            self.db.with_conn(move |conn| Box::pin(Self::list_recent_impl_conn(conn, limit))),
        )
        .await
    }
}
