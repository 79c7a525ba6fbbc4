// Use case: submit_job.
// Orchestrates inference and persistence for one submission.

use crate::application::context::AppContext;
use crate::domain::entities::inference::InferenceRequest;
use crate::domain::entities::job::{JobRecord, NewJob};
use crate::infrastructure::db::stores::job_store::JobRepositoryError;
use crate::infrastructure::inference::InferenceError;
use metrics::counter;
use tracing::{error, info, instrument};

/// Runs one submission end to end: infer, then persist.
///
/// A record exists afterwards if and only if this returns `Ok`.
pub struct SubmitJobUseCase;

#[derive(Debug, Clone)]
pub struct SubmitJobCommand {
    pub prompt: String,
    pub task: String,
    pub model_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitJobError {
    Inference(InferenceError),
    Storage(JobRepositoryError),
}

impl SubmitJobUseCase {
    /// Submit a job and return the persisted record.
    #[instrument(skip(ctx, cmd), fields(task = %cmd.task))]
    pub async fn execute(
        ctx: &AppContext,
        cmd: SubmitJobCommand,
    ) -> Result<JobRecord, SubmitJobError> {
        // Step 1: Build the outbound request (an omitted model lets the backend choose).
        let request = InferenceRequest::new(cmd.prompt, cmd.task, cmd.model_id);

        // Step 2: Infer. Nothing is persisted on failure.
        let result = ctx.inference.infer(&request).await.map_err(|e| {
            error!(stage = "inference", error = %e, "submission_failed");
            SubmitJobError::Inference(e)
        })?;

        // Step 3: Persist with the backend's resolved model. A store failure
        // discards the inference result.
        let job = NewJob::from_inference(&request, result);
        let stored = ctx.repos.job.insert(&job).await.map_err(|e| {
            counter!("jobs_persist_failed_total").increment(1);
            error!(stage = "persist", error = %e, "submission_failed");
            SubmitJobError::Storage(e)
        })?;

        // Step 4: Return the stored record.
        counter!("jobs_submitted_total").increment(1);
        info!(
            job_id = %stored.id,
            model_id = %stored.model_id,
            latency = stored.latency,
            "job_stored"
        );
        Ok(stored)
    }
}
