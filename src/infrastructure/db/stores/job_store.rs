use crate::infrastructure::db::database::DatabaseError;
use crate::infrastructure::db::dto::{JobRow, NewJobRow};
use async_trait::async_trait;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobRepositoryError {
    Timeout,
    StorageUnavailable,
}

impl From<DatabaseError> for JobRepositoryError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::Timeout(_) => JobRepositoryError::Timeout,
            DatabaseError::Connection(_) | DatabaseError::Query(_) => {
                JobRepositoryError::StorageUnavailable
            }
        }
    }
}

impl std::fmt::Display for JobRepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JobRepositoryError::Timeout => write!(f, "storage timeout"),
            JobRepositoryError::StorageUnavailable => write!(f, "storage unavailable"),
        }
    }
}

/// Append-only job storage. There is no update or delete.
#[async_trait]
pub trait JobStore: Send + Sync {
    /// Insert a job and return exactly what was stored, including the
    /// store-assigned id and creation time.
    async fn insert(&self, row: &NewJobRow) -> Result<JobRow, JobRepositoryError>;
    /// Return up to `limit` rows, newest first by id. Rows that cannot be
    /// decoded are skipped.
    async fn list_recent(&self, limit: u32) -> Result<Vec<JobRow>, JobRepositoryError>;
}
