use crate::domain::entities::inference::{InferenceRequest, InferenceResult};
use crate::infrastructure::inference::transport::{InferenceTransport, InferenceTransportError};
use async_trait::async_trait;
use std::time::Duration;

/// reqwest-backed transport for `POST {base_url}/infer`.
///
/// Holds no per-call state; the inner client only pools connections.
#[derive(Clone)]
pub struct HttpInferenceTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpInferenceTransport {
    pub fn new(
        base_url: &str,
        connect_timeout: Duration,
        request_timeout: Duration,
    ) -> Result<Self, InferenceTransportError> {
        let client = reqwest::Client::builder()
            .connect_timeout(connect_timeout)
            .timeout(request_timeout)
            .build()
            .map_err(|e| InferenceTransportError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: format!("{}/infer", base_url.trim_end_matches('/')),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

fn classify(err: reqwest::Error) -> InferenceTransportError {
    if err.is_connect() {
        InferenceTransportError::Connect(err.to_string())
    } else {
        InferenceTransportError::Transport(err.to_string())
    }
}

#[async_trait]
impl InferenceTransport for HttpInferenceTransport {
    async fn infer(
        &self,
        request: &InferenceRequest,
    ) -> Result<InferenceResult, InferenceTransportError> {
        // Step 1: Send the request.
        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(classify)?;

        // Step 2: Reject non-success statuses without reading further.
        let status = response.status();
        if !status.is_success() {
            return Err(InferenceTransportError::Status(status.as_u16()));
        }

        // Step 3: Decode the body into the expected shape.
        let body = response.bytes().await.map_err(classify)?;
        let result: InferenceResult = serde_json::from_slice(&body)
            .map_err(|e| InferenceTransportError::Decode(e.to_string()))?;
        if result.latency < 0.0 {
            return Err(InferenceTransportError::Decode(format!(
                "negative latency {}",
                result.latency
            )));
        }

        Ok(result)
    }
}
