pub mod list_jobs;
pub mod submit_job;
