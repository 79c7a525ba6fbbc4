use serde::{Deserialize, Serialize};

/// Outbound payload for the inference backend.
///
/// An empty `model_id` lets the backend choose.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InferenceRequest {
    pub prompt: String,
    pub task: String,
    pub model_id: String,
}

impl InferenceRequest {
    pub fn new(
        prompt: impl Into<String>,
        task: impl Into<String>,
        model_id: Option<String>,
    ) -> Self {
        Self {
            prompt: prompt.into(),
            task: task.into(),
            model_id: model_id.unwrap_or_default(),
        }
    }
}

/// Decoded backend reply. Every field is required.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct InferenceResult {
    pub output: String,
    pub latency: f64,
    pub model_used: String,
}

#[cfg(test)]
mod tests {
    use super::{InferenceRequest, InferenceResult};

    #[test]
    fn given_missing_model_when_new_should_send_empty_model_id() {
        let request = InferenceRequest::new("hello", "summarize", None);
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model_id"], "");
    }

    #[test]
    fn given_error_shaped_body_when_decoded_should_fail() {
        let result = serde_json::from_str::<InferenceResult>(r#"{"error":"Unsupported task: x"}"#);
        assert!(result.is_err());
    }
}
