// HTTP routes: submit jobs and list recent ones.

use crate::application::usecases::list_jobs::{ListJobsError, ListJobsUseCase};
use crate::application::usecases::submit_job::{
    SubmitJobCommand, SubmitJobError, SubmitJobUseCase,
};
use crate::infrastructure::inference::InferenceError;
use crate::interface::http::dto::job::{JobResponse, SubmitJobRequest, SubmitJobResponse};
use crate::interface::http::problem::{
    MB_INFERENCE_INVALID_RESPONSE, MB_INFERENCE_UNAVAILABLE, MB_REQUEST_MALFORMED,
    MB_STORAGE_DB_ERROR, problem,
};
use crate::interface::http::state::AppState;
use crate::interface::http::trace::TraceId;
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Extension, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use tracing::warn;

/// Builds the job routes.
pub fn router() -> axum::Router<AppState> {
    axum::Router::new()
        .route("/submit", post(submit_job))
        .route("/jobs", get(list_jobs))
}

/// Runs the submission pipeline and returns the stored job.
async fn submit_job(
    State(state): State<AppState>,
    Extension(trace_id): Extension<TraceId>,
    payload: Result<Json<SubmitJobRequest>, JsonRejection>,
) -> Response {
    let trace_id = Some(trace_id.0);
    // Step 1: Structural validation only; empty strings are accepted.
    let payload = match payload {
        Ok(Json(payload)) => payload,
        Err(rejection) => {
            warn!(error = %rejection, "submit_rejected");
            return problem(
                StatusCode::BAD_REQUEST,
                MB_REQUEST_MALFORMED,
                Some("Invalid input".to_string()),
                trace_id,
            );
        }
    };

    // Step 2: Execute the submit use case.
    let result = SubmitJobUseCase::execute(
        &state.ctx,
        SubmitJobCommand {
            prompt: payload.prompt,
            task: payload.task,
            model_id: payload.model_id,
        },
    )
    .await;

    // Step 3: Map output to HTTP response without leaking causes.
    match result {
        Ok(record) => (StatusCode::OK, Json(SubmitJobResponse::from_record(record))).into_response(),
        Err(SubmitJobError::Inference(InferenceError::Unavailable { .. })) => problem(
            StatusCode::INTERNAL_SERVER_ERROR,
            MB_INFERENCE_UNAVAILABLE,
            Some("Inference service error".to_string()),
            trace_id,
        ),
        Err(SubmitJobError::Inference(InferenceError::ContractViolation(_))) => problem(
            StatusCode::INTERNAL_SERVER_ERROR,
            MB_INFERENCE_INVALID_RESPONSE,
            Some("Invalid inference response".to_string()),
            trace_id,
        ),
        Err(SubmitJobError::Storage(_)) => problem(
            StatusCode::INTERNAL_SERVER_ERROR,
            MB_STORAGE_DB_ERROR,
            Some("Could not store job".to_string()),
            trace_id,
        ),
    }
}

/// Lists the most recent jobs, newest first.
async fn list_jobs(
    State(state): State<AppState>,
    Extension(trace_id): Extension<TraceId>,
) -> Response {
    match ListJobsUseCase::execute(&state.ctx).await {
        Ok(records) => {
            let body: Vec<JobResponse> = records.into_iter().map(JobResponse::from_record).collect();
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(ListJobsError::Storage(_)) => problem(
            StatusCode::INTERNAL_SERVER_ERROR,
            MB_STORAGE_DB_ERROR,
            Some("Could not load jobs".to_string()),
            Some(trace_id.0),
        ),
    }
}

#[cfg(test)]
mod tests {
    use crate::application::context::test_support::{MemoryJobStore, test_context};
    use crate::infrastructure::db::stores::job_store::JobRepositoryError;
    use crate::infrastructure::inference::client::test_support::{
        ScriptedTransport, sample_result,
    };
    use crate::infrastructure::inference::transport::InferenceTransportError;
    use crate::interface::http;
    use crate::interface::http::state::AppState;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use std::sync::Arc;
    use tower::util::ServiceExt;

    fn state(store: Arc<MemoryJobStore>, transport: Arc<ScriptedTransport>) -> AppState {
        AppState {
            ctx: Arc::new(test_context(store, transport)),
            metrics: None,
        }
    }

    fn submit(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/submit")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn list() -> Request<Body> {
        Request::builder().uri("/jobs").body(Body::empty()).unwrap()
    }

    async fn response_json(response: axum::response::Response) -> Value {
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&body).unwrap_or(Value::Null)
    }

    #[tokio::test]
    async fn given_valid_submission_when_submit_should_return_stored_fields() {
        let store = Arc::new(MemoryJobStore::default());
        let transport = Arc::new(ScriptedTransport::failing_then(0, sample_result("bart")));
        let app = http::app(state(store.clone(), transport));

        let response = app
            .oneshot(submit(r#"{"prompt":"hello","task":"summarize"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = response_json(response).await;
        assert_eq!(json["message"], "Job stored and inference completed");
        assert_eq!(json["prompt"], "hello");
        assert_eq!(json["task"], "summarize");
        assert_eq!(json["model_id"], "bart");
        assert_eq!(json["output"], "a short summary");
        assert_eq!(json["latency"], 0.12);
        assert_eq!(json["id"], 1);
        assert_eq!(store.rows().len(), 1);
    }

    #[tokio::test]
    async fn given_malformed_body_when_submit_should_return_bad_request_without_calling_backend() {
        let store = Arc::new(MemoryJobStore::default());
        let transport = Arc::new(ScriptedTransport::failing_then(0, sample_result("bart")));
        let app = http::app(state(store.clone(), transport.clone()));

        for body in [r#"{"prompt":"hello"}"#, "not json", r#"{"prompt":1,"task":"t"}"#] {
            let response = app.clone().oneshot(submit(body)).await.unwrap();

            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            let json = response_json(response).await;
            assert_eq!(json["code"], "MB_REQUEST_MALFORMED");
        }
        assert_eq!(transport.calls(), 0);
        assert!(store.rows().is_empty());
    }

    #[tokio::test]
    async fn given_backend_down_when_submit_should_return_server_error_and_store_nothing() {
        let store = Arc::new(MemoryJobStore::default());
        let transport = Arc::new(ScriptedTransport::failing_then(5, sample_result("bart")));
        let app = http::app(state(store.clone(), transport.clone()));

        let response = app
            .oneshot(submit(r#"{"prompt":"hello","task":"summarize"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = response_json(response).await;
        assert_eq!(json["code"], "MB_INFERENCE_UNAVAILABLE");
        assert_eq!(transport.calls(), 5);
        assert!(store.rows().is_empty());
    }

    #[tokio::test]
    async fn given_wrong_shape_reply_when_submit_should_return_server_error_after_one_call() {
        let store = Arc::new(MemoryJobStore::default());
        let transport = Arc::new(ScriptedTransport::new(vec![Err(
            InferenceTransportError::Decode("missing field `output`".to_string()),
        )]));
        let app = http::app(state(store.clone(), transport.clone()));

        let response = app
            .oneshot(submit(r#"{"prompt":"hello","task":"summarize"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = response_json(response).await;
        assert_eq!(json["code"], "MB_INFERENCE_INVALID_RESPONSE");
        assert_eq!(transport.calls(), 1);
        assert!(store.rows().is_empty());
    }

    #[tokio::test]
    async fn given_store_failure_when_submit_should_return_server_error_without_cause() {
        let store = Arc::new(MemoryJobStore::failing_insert(
            JobRepositoryError::StorageUnavailable,
        ));
        let transport = Arc::new(ScriptedTransport::failing_then(0, sample_result("bart")));
        let app = http::app(state(store, transport));

        let response = app
            .oneshot(submit(r#"{"prompt":"hello","task":"summarize"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = response_json(response).await;
        assert_eq!(json["code"], "MB_STORAGE_DB_ERROR");
        assert_eq!(json["detail"], "Could not store job");
    }

    #[tokio::test]
    async fn given_successful_and_failed_submissions_when_listing_should_show_only_successes() {
        let store = Arc::new(MemoryJobStore::default());
        let ok = Arc::new(ScriptedTransport::failing_then(0, sample_result("bart")));
        let down = Arc::new(ScriptedTransport::failing_then(5, sample_result("bart")));
        let ok_app = http::app(state(store.clone(), ok));
        let down_app = http::app(state(store.clone(), down));
        let body = r#"{"prompt":"hello","task":"summarize"}"#;

        let first = ok_app.clone().oneshot(submit(body)).await.unwrap();
        let failed = down_app.oneshot(submit(body)).await.unwrap();
        let second = ok_app.clone().oneshot(submit(body)).await.unwrap();
        let listing = ok_app.oneshot(list()).await.unwrap();

        assert_eq!(first.status(), StatusCode::OK);
        assert_eq!(failed.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(second.status(), StatusCode::OK);
        assert_eq!(listing.status(), StatusCode::OK);
        let json = response_json(listing).await;
        let jobs = json.as_array().unwrap();
        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0]["id"], 2);
        assert_eq!(jobs[1]["id"], 1);
        assert!(jobs[0]["created_at"].as_str().is_some());
    }

    #[tokio::test]
    async fn given_more_than_twenty_jobs_when_listing_should_cap_page() {
        let store = Arc::new(MemoryJobStore::default());
        let transport = Arc::new(ScriptedTransport::failing_then(0, sample_result("bart")));
        let app = http::app(state(store, transport));
        for _ in 0..23 {
            let response = app
                .clone()
                .oneshot(submit(r#"{"prompt":"p","task":"t"}"#))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }

        let response = app.oneshot(list()).await.unwrap();

        let json = response_json(response).await;
        assert_eq!(json.as_array().unwrap().len(), 20);
    }

    #[tokio::test]
    async fn given_store_failure_when_listing_should_return_server_error() {
        let store = Arc::new(MemoryJobStore::failing_list(JobRepositoryError::Timeout));
        let transport = Arc::new(ScriptedTransport::failing_then(0, sample_result("bart")));
        let app = http::app(state(store, transport));

        let response = app.oneshot(list()).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
