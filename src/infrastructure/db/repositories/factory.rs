use std::sync::Arc;
use std::time::Duration;

use crate::infrastructure::db::database::{Database, DatabaseError};
use crate::infrastructure::db::postgres::PostgresDatabase;
use crate::infrastructure::db::postgres::job_store_postgres::JobStorePostgres;
use crate::infrastructure::db::repositories::job_repository::JobRepository;

/// Repositories sharing one long-lived database handle.
#[derive(Clone)]
pub struct Repositories {
    pub db: Option<Arc<dyn Database>>,
    pub job: Arc<JobRepository>,
}

impl Repositories {
    /// Build all repositories backed by Postgres stores.
    pub fn postgres(db: Arc<PostgresDatabase>, statement_timeout: Duration) -> Self {
        let job_store = Arc::new(JobStorePostgres::new(db.clone()).with_timeout(statement_timeout));

        Self {
            db: Some(db),
            job: Arc::new(JobRepository::new(job_store)),
        }
    }

    /// Execute a raw SQL statement outside a transaction.
    pub async fn execute(&self, query: &str) -> Result<u64, DatabaseError> {
        let Some(db) = self.db.as_ref() else {
            return Err(DatabaseError::Connection("db_unavailable".to_string()));
        };
        db.execute(query).await
    }
}
