use crate::config;
use crate::infrastructure::db::database::{Database, DatabaseError};
use crate::infrastructure::db::postgres::schema::{CREATE_JOBS_TABLE, SCHEMA_LOCK_KEY};
use async_trait::async_trait;
use sqlx::{PgPool, postgres::PgPoolOptions};
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;
use tracing::{info, warn};

/// How to reach Postgres at startup and how hard to try.
#[derive(Debug, Clone)]
pub struct ConnectOptions {
    pub url: String,
    pub max_connections: u32,
    pub connect_timeout: Duration,
    pub attempts: u32,
    pub retry_delay: Duration,
}

impl ConnectOptions {
    pub fn from_settings(db: &config::Db) -> Self {
        Self {
            url: db.url.clone(),
            max_connections: db.max_connections,
            connect_timeout: Duration::from_millis(db.connect_timeout_ms),
            attempts: db.connect_attempts,
            retry_delay: Duration::from_millis(db.connect_retry_delay_ms),
        }
    }
}

pub struct PostgresDatabase {
    pool: PgPool,
}

impl PostgresDatabase {
    /// Single connection attempt bounded by `options.connect_timeout`.
    pub async fn connect_with(options: &ConnectOptions) -> Result<Self, DatabaseError> {
        let connect = PgPoolOptions::new()
            .max_connections(options.max_connections)
            .acquire_timeout(options.connect_timeout)
            .connect(&options.url);

        let pool = tokio::time::timeout(options.connect_timeout, connect)
            .await
            .map_err(|_| DatabaseError::Timeout(options.connect_timeout.as_millis() as u64))?
            .map_err(|e| DatabaseError::Connection(e.to_string()))?;

        Ok(Self { pool })
    }

    /// Startup bootstrap: retry the connection with a fixed pause until it
    /// succeeds or `options.attempts` is spent. Callers treat the error as fatal.
    pub async fn connect_with_retry(options: &ConnectOptions) -> Result<Self, DatabaseError> {
        let attempts = options.attempts.max(1);
        let mut last_error = DatabaseError::Connection("no connection attempt made".to_string());

        for attempt in 1..=attempts {
            match Self::connect_with(options).await {
                Ok(db) => {
                    info!(attempt, "database_connected");
                    return Ok(db);
                }
                Err(err) => {
                    warn!(
                        attempt,
                        max_attempts = attempts,
                        error = %err,
                        "database_connect_failed"
                    );
                    last_error = err;
                }
            }

            if attempt < attempts {
                tokio::time::sleep(options.retry_delay).await;
            }
        }

        Err(last_error)
    }

    /// Create the `jobs` table if it is missing.
    ///
    /// Safe to call repeatedly and from several processes at once: the DDL runs
    /// under a transaction-scoped advisory lock.
    pub async fn ensure_schema(&self) -> Result<(), DatabaseError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DatabaseError::Connection(e.to_string()))?;

        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(SCHEMA_LOCK_KEY)
            .execute(&mut *tx)
            .await
            .map_err(|e| DatabaseError::Query(e.to_string()))?;

        sqlx::query(CREATE_JOBS_TABLE)
            .execute(&mut *tx)
            .await
            .map_err(|e| DatabaseError::Query(e.to_string()))?;

        tx.commit()
            .await
            .map_err(|e| DatabaseError::Query(e.to_string()))?;

        info!("jobs_table_ready");
        Ok(())
    }

    pub async fn with_conn<T, E, F>(&self, f: F) -> Result<T, E>
    where
        for<'c> F: FnOnce(
            &'c mut sqlx::PgConnection,
        ) -> Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'c>>,
        E: From<DatabaseError>,
    {
        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(|e| DatabaseError::Connection(e.to_string()))?;
        f(&mut conn).await
    }
}

#[async_trait]
impl Database for PostgresDatabase {
    async fn execute(&self, query: &str) -> Result<u64, DatabaseError> {
        let result = sqlx::query(query)
            .execute(&self.pool)
            .await
            .map_err(|e| DatabaseError::Query(e.to_string()))?;

        Ok(result.rows_affected())
    }
}
