use crate::config;
use crate::domain::entities::inference::{InferenceRequest, InferenceResult};
use crate::domain::workflows::retry_policy::{RetryFailure, RetryPolicy};
use crate::infrastructure::inference::http_transport::HttpInferenceTransport;
use crate::infrastructure::inference::transport::{InferenceTransport, InferenceTransportError};
use metrics::counter;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InferenceError {
    /// Every attempt failed to reach the backend.
    #[error("inference backend unreachable after {attempts} attempts: {cause}")]
    Unavailable { attempts: u32, cause: String },

    /// The backend answered but not with a usable result. Never retried.
    #[error("inference backend contract violation: {0}")]
    ContractViolation(InferenceTransportError),
}

/// Calls the inference backend, retrying connection failures with a fixed delay.
pub struct InferenceClient {
    transport: Arc<dyn InferenceTransport>,
    policy: RetryPolicy<InferenceTransportError>,
}

impl InferenceClient {
    pub fn new(
        transport: Arc<dyn InferenceTransport>,
        policy: RetryPolicy<InferenceTransportError>,
    ) -> Self {
        Self { transport, policy }
    }

    /// Retry policy that only retries connection-level failures.
    pub fn connect_retry_policy(
        max_attempts: u32,
        delay: Duration,
    ) -> RetryPolicy<InferenceTransportError> {
        RetryPolicy::new(max_attempts, delay, InferenceTransportError::is_retryable)
    }

    /// Build the HTTP client described by the `[inference]` settings.
    pub fn from_settings(settings: &config::Inference) -> Result<Self, InferenceTransportError> {
        let transport = HttpInferenceTransport::new(
            &settings.base_url,
            Duration::from_millis(settings.connect_timeout_ms),
            Duration::from_millis(settings.request_timeout_ms),
        )?;
        let policy = Self::connect_retry_policy(
            settings.max_attempts,
            Duration::from_millis(settings.retry_delay_ms),
        );

        Ok(Self::new(Arc::new(transport), policy))
    }

    /// Run one inference, absorbing a backend that is still starting up.
    pub async fn infer(&self, request: &InferenceRequest) -> Result<InferenceResult, InferenceError> {
        let outcome = self
            .policy
            .run(|attempt| {
                counter!("inference_attempts_total").increment(1);
                debug!(attempt, task = %request.task, "inference_attempt");
                self.transport.infer(request)
            })
            .await;

        match outcome {
            Ok(result) => Ok(result),
            Err(RetryFailure { attempts, error }) if error.is_retryable() => {
                counter!("inference_failures_total", "kind" => "unavailable").increment(1);
                error!(attempts, error = %error, "inference_unavailable");
                Err(InferenceError::Unavailable {
                    attempts,
                    cause: error.to_string(),
                })
            }
            Err(RetryFailure { attempts, error }) => {
                counter!("inference_failures_total", "kind" => "contract").increment(1);
                error!(attempts, error = %error, "inference_contract_violation");
                Err(InferenceError::ContractViolation(error))
            }
        }
    }
}
