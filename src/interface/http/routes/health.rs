use crate::interface::http::state::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::{Json, Router, routing::get};
use serde::Serialize;
use tracing::warn;

#[derive(Debug, Serialize)]
struct StatusResponse {
    status: &'static str,
}

/// Liveness (`/health`, no I/O) and readiness (`/ready`, store round trip).
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/ready", get(ready))
}

async fn health() -> Json<StatusResponse> {
    Json(StatusResponse { status: "ok" })
}

async fn ready(State(state): State<AppState>) -> (StatusCode, Json<StatusResponse>) {
    match state.ctx.repos.execute("SELECT 1").await {
        Ok(_) => (StatusCode::OK, Json(StatusResponse { status: "ready" })),
        Err(err) => {
            warn!(error = %err, "readiness_check_failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(StatusResponse {
                    status: "not_ready",
                }),
            )
        }
    }
}
