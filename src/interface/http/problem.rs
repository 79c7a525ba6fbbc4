use axum::Json;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// RFC 7807 Problem Details payload.
#[derive(Debug, Serialize)]
pub struct ProblemDetails {
    /// A URI reference that identifies the problem type.
    #[serde(rename = "type")]
    pub r#type: String,
    /// A short, human-readable summary of the problem type.
    pub title: String,
    /// The HTTP status code for this occurrence.
    pub status: u16,
    /// A human-readable explanation specific to this occurrence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    /// The trace id of the failed request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
    /// A stable, machine-readable application error code (MB_...).
    pub code: String,
}

/// Build a Problem Details response with the correct content-type.
pub fn problem(
    status: StatusCode,
    code: &str,
    detail: Option<String>,
    instance: Option<String>,
) -> Response {
    // Step 1: Build the problem payload.
    let payload = ProblemDetails {
        r#type: "about:blank".to_string(),
        title: status.canonical_reason().unwrap_or("Error").to_string(),
        status: status.as_u16(),
        detail,
        instance,
        code: code.to_string(),
    };

    // Step 2: Convert to an HTTP response with JSON body.
    let mut response = (status, Json(payload)).into_response();

    // Step 3: Ensure RFC 7807 content type.
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/problem+json"),
    );

    response
}

pub const MB_REQUEST_MALFORMED: &str = "MB_REQUEST_MALFORMED";
pub const MB_INFERENCE_UNAVAILABLE: &str = "MB_INFERENCE_UNAVAILABLE";
pub const MB_INFERENCE_INVALID_RESPONSE: &str = "MB_INFERENCE_INVALID_RESPONSE";
pub const MB_STORAGE_DB_ERROR: &str = "MB_STORAGE_DB_ERROR";

#[cfg(test)]
mod tests {
    use super::{MB_STORAGE_DB_ERROR, problem};
    use axum::body::to_bytes;
    use axum::http::{StatusCode, header};

    #[tokio::test]
    async fn given_status_and_code_when_problem_should_render_problem_json() {
        let response = problem(
            StatusCode::INTERNAL_SERVER_ERROR,
            MB_STORAGE_DB_ERROR,
            Some("Could not store job".to_string()),
            Some("trace-1".to_string()),
        );

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/problem+json"
        );
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["code"], "MB_STORAGE_DB_ERROR");
        assert_eq!(json["title"], "Internal Server Error");
        assert_eq!(json["instance"], "trace-1");
    }
}
