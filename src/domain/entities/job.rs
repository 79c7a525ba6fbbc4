use crate::domain::entities::inference::{InferenceRequest, InferenceResult};
use crate::domain::value_objects::ids::JobId;
use crate::domain::value_objects::timestamps::Timestamp;

/// A job as it exists before the store assigns its id and creation time.
///
/// Only built from a successful inference result, so the persisted model is
/// always the backend's resolved choice.
#[derive(Debug, Clone, PartialEq)]
pub struct NewJob {
    pub prompt: String,
    pub task: String,
    pub model_id: String,
    pub output: String,
    pub latency: f64,
}

impl NewJob {
    pub fn from_inference(request: &InferenceRequest, result: InferenceResult) -> Self {
        Self {
            prompt: request.prompt.clone(),
            task: request.task.clone(),
            model_id: result.model_used,
            output: result.output,
            latency: result.latency,
        }
    }
}

/// A persisted, immutable job record.
#[derive(Debug, Clone, PartialEq)]
pub struct JobRecord {
    pub id: JobId,
    pub prompt: String,
    pub task: String,
    pub model_id: String,
    pub output: String,
    pub latency: f64,
    pub created_at: Timestamp,
}

#[cfg(test)]
mod tests {
    use super::NewJob;
    use crate::domain::entities::inference::{InferenceRequest, InferenceResult};

    #[test]
    fn given_backend_override_when_from_inference_should_keep_resolved_model() {
        let request = InferenceRequest::new("x", "y", Some("m1".to_string()));
        let result = InferenceResult {
            output: "out".to_string(),
            latency: 0.25,
            model_used: "m2".to_string(),
        };

        let job = NewJob::from_inference(&request, result);

        assert_eq!(job.model_id, "m2");
        assert_eq!(job.prompt, "x");
        assert_eq!(job.task, "y");
        assert_eq!(job.output, "out");
    }
}
