use crate::domain::entities::inference::{InferenceRequest, InferenceResult};
use async_trait::async_trait;
use thiserror::Error;

/// Outcome of a single call to the inference backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InferenceTransportError {
    /// The backend could not be reached at all.
    #[error("connection failed: {0}")]
    Connect(String),

    #[error("backend answered with HTTP {0}")]
    Status(u16),

    #[error("undecodable backend response: {0}")]
    Decode(String),

    /// The connection was made but the exchange broke off (timeout, reset).
    #[error("transport error: {0}")]
    Transport(String),
}

impl InferenceTransportError {
    /// Only connection-level failures are worth another attempt; a backend
    /// that answered, however badly, is up.
    pub fn is_retryable(&self) -> bool {
        matches!(self, InferenceTransportError::Connect(_))
    }
}

#[async_trait]
pub trait InferenceTransport: Send + Sync {
    /// Perform exactly one call to the backend. No retries.
    async fn infer(
        &self,
        request: &InferenceRequest,
    ) -> Result<InferenceResult, InferenceTransportError>;
}
