use crate::domain::entities::job::{JobRecord, NewJob};
use crate::infrastructure::db::dto::{JobRow, NewJobRow};
use crate::infrastructure::db::stores::job_store::{JobRepositoryError, JobStore};
use std::sync::Arc;

pub struct JobRepository {
    store: Arc<dyn JobStore>,
}

impl JobRepository {
    /// Build a repository that uses the given store implementation.
    pub fn new(store: Arc<dyn JobStore>) -> Self {
        Self { store }
    }

    /// Append a job and return what was actually stored in the database.
    pub async fn insert(&self, job: &NewJob) -> Result<JobRecord, JobRepositoryError> {
        let dto = NewJobRow::from_new_job(job);
        let stored = self.store.insert(&dto).await?;

        Ok(stored.into_record())
    }

    /// Fetch up to `limit` records, newest first.
    pub async fn list_recent(&self, limit: u32) -> Result<Vec<JobRecord>, JobRepositoryError> {
        let rows = self.store.list_recent(limit).await?;

        Ok(rows.into_iter().map(JobRow::into_record).collect())
    }
}
