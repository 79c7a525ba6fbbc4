use crate::domain::entities::job::{JobRecord, NewJob};
use crate::domain::value_objects::ids::JobId;
use crate::domain::value_objects::timestamps::Timestamp;
use time::OffsetDateTime;

/// Insert payload: every column the store does not assign itself.
#[derive(Debug, Clone, PartialEq)]
pub struct NewJobRow {
    pub prompt: String,
    pub task: String,
    pub model_id: String,
    pub output: String,
    pub latency: f64,
}

impl NewJobRow {
    pub fn from_new_job(job: &NewJob) -> Self {
        Self {
            prompt: job.prompt.clone(),
            task: job.task.clone(),
            model_id: job.model_id.clone(),
            output: job.output.clone(),
            latency: job.latency,
        }
    }
}

#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct JobRow {
    pub id: i64,
    pub prompt: String,
    pub task: String,
    pub model_id: String,
    pub output: String,
    pub latency: f64,
    pub created_at: OffsetDateTime,
}

impl JobRow {
    pub fn into_record(self) -> JobRecord {
        JobRecord {
            id: JobId(self.id),
            prompt: self.prompt,
            task: self.task,
            model_id: self.model_id,
            output: self.output,
            latency: self.latency,
            created_at: Timestamp::from(self.created_at),
        }
    }
}
