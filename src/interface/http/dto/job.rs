use crate::domain::entities::job::JobRecord;
use serde::{Deserialize, Serialize};

pub const SUBMIT_SUCCESS_MESSAGE: &str = "Job stored and inference completed";

#[derive(Debug, Deserialize)]
pub struct SubmitJobRequest {
    pub prompt: String,
    pub task: String,
    pub model_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SubmitJobResponse {
    pub message: &'static str,
    pub id: i64,
    pub prompt: String,
    pub task: String,
    pub model_id: String,
    pub output: String,
    pub latency: f64,
    pub created_at: String,
}

impl SubmitJobResponse {
    pub fn from_record(record: JobRecord) -> Self {
        Self {
            message: SUBMIT_SUCCESS_MESSAGE,
            id: record.id.value(),
            created_at: record.created_at.to_rfc3339(),
            prompt: record.prompt,
            task: record.task,
            model_id: record.model_id,
            output: record.output,
            latency: record.latency,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct JobResponse {
    pub id: i64,
    pub prompt: String,
    pub task: String,
    pub model_id: String,
    pub output: String,
    pub latency: f64,
    pub created_at: String,
}

impl JobResponse {
    pub fn from_record(record: JobRecord) -> Self {
        Self {
            id: record.id.value(),
            created_at: record.created_at.to_rfc3339(),
            prompt: record.prompt,
            task: record.task,
            model_id: record.model_id,
            output: record.output,
            latency: record.latency,
        }
    }
}
