// Use case: list_jobs.

use crate::application::context::AppContext;
use crate::domain::entities::job::JobRecord;
use crate::infrastructure::db::stores::job_store::JobRepositoryError;
use tracing::error;

/// Fixed page size of the recent-jobs listing. There is no pagination.
pub const RECENT_JOBS_PAGE_SIZE: u32 = 20;

/// Reads the most recent jobs, newest first.
pub struct ListJobsUseCase;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListJobsError {
    Storage(JobRepositoryError),
}

impl ListJobsUseCase {
    pub async fn execute(ctx: &AppContext) -> Result<Vec<JobRecord>, ListJobsError> {
        ctx.repos
            .job
            .list_recent(RECENT_JOBS_PAGE_SIZE)
            .await
            .map_err(|e| {
                error!(stage = "list", error = %e, "job_listing_failed");
                ListJobsError::Storage(e)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::{ListJobsError, ListJobsUseCase, RECENT_JOBS_PAGE_SIZE};
    use crate::application::context::test_support::{MemoryJobStore, test_context};
    use crate::application::usecases::submit_job::{SubmitJobCommand, SubmitJobUseCase};
    use crate::infrastructure::db::stores::job_store::JobRepositoryError;
    use crate::infrastructure::inference::client::test_support::{
        ScriptedTransport, sample_result,
    };
    use std::sync::Arc;

    fn transport() -> Arc<ScriptedTransport> {
        Arc::new(ScriptedTransport::failing_then(0, sample_result("bart")))
    }

    #[tokio::test]
    async fn given_more_jobs_than_page_when_execute_should_return_newest_twenty() {
        let store = Arc::new(MemoryJobStore::default());
        let ctx = test_context(store.clone(), transport());
        for i in 0..25 {
            let cmd = SubmitJobCommand {
                prompt: format!("prompt {i}"),
                task: "summarize".to_string(),
                model_id: None,
            };
            SubmitJobUseCase::execute(&ctx, cmd).await.unwrap();
        }

        let jobs = ListJobsUseCase::execute(&ctx).await.unwrap();

        assert_eq!(jobs.len(), RECENT_JOBS_PAGE_SIZE as usize);
        assert_eq!(jobs[0].id.0, 25);
        assert_eq!(jobs[0].prompt, "prompt 24");
        assert!(jobs.windows(2).all(|w| w[0].id > w[1].id));
    }

    #[tokio::test]
    async fn given_no_jobs_when_execute_should_return_empty_list() {
        let ctx = test_context(Arc::new(MemoryJobStore::default()), transport());

        let jobs = ListJobsUseCase::execute(&ctx).await.unwrap();

        assert!(jobs.is_empty());
    }

    #[tokio::test]
    async fn given_store_failure_when_execute_should_return_storage_error() {
        let store = Arc::new(MemoryJobStore::failing_list(JobRepositoryError::Timeout));
        let ctx = test_context(store, transport());

        let err = ListJobsUseCase::execute(&ctx).await.unwrap_err();

        assert_eq!(err, ListJobsError::Storage(JobRepositoryError::Timeout));
    }
}
