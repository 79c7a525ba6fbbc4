use modelbench::application::context::AppContext;
use modelbench::config::{self, LogFormat, Observability};
use modelbench::infrastructure::db::postgres::{ConnectOptions, PostgresDatabase};
use modelbench::infrastructure::db::repositories::Repositories;
use modelbench::infrastructure::inference::InferenceClient;
use modelbench::infrastructure::observability;
use modelbench::interface::http;
use modelbench::interface::http::state::AppState;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> ExitCode {
    // Step 1: Load configuration. Logging is not configured yet, so a failure
    // is reported through a default JSON subscriber.
    let settings = match config::load() {
        Ok(settings) => settings,
        Err(err) => {
            observability::init_tracing(&Observability {
                service_name: "modelbench".to_string(),
                log_format: LogFormat::Json,
                enable_metrics: false,
            });
            error!(error = %err, "config_load_failed");
            return ExitCode::FAILURE;
        }
    };

    // Step 2: Logging and metrics.
    observability::init_tracing(&settings.observability);
    let metrics = observability::init_metrics(&settings.observability);
    info!(
        service = %settings.observability.service_name,
        inference_url = %settings.inference.base_url,
        "starting"
    );

    // Step 3: Connect to the database, retrying while it starts up.
    let db = match PostgresDatabase::connect_with_retry(&ConnectOptions::from_settings(&settings.db))
        .await
    {
        Ok(db) => Arc::new(db),
        Err(err) => {
            error!(
                attempts = settings.db.connect_attempts,
                error = %err,
                "database_unreachable"
            );
            return ExitCode::FAILURE;
        }
    };

    // Step 4: Make sure the jobs table exists.
    if let Err(err) = db.ensure_schema().await {
        error!(error = %err, "schema_init_failed");
        return ExitCode::FAILURE;
    }

    // Step 5: Build repositories and the inference client.
    let repos = Repositories::postgres(db, settings.db.statement_timeout());
    let inference = match InferenceClient::from_settings(&settings.inference) {
        Ok(client) => Arc::new(client),
        Err(err) => {
            error!(error = %err, "inference_client_init_failed");
            return ExitCode::FAILURE;
        }
    };

    // Step 6: Assemble shared application context and HTTP state.
    let state = AppState {
        ctx: Arc::new(AppContext::new(repos, inference)),
        metrics,
    };
    let app = http::app(state);
    let bind_addr = format!("{}:{}", settings.server.host, settings.server.port);

    // Step 7: Bind and serve until Ctrl-C.
    let listener = match tokio::net::TcpListener::bind(&bind_addr).await {
        Ok(listener) => listener,
        Err(err) => {
            error!(addr = %bind_addr, error = %err, "bind_failed");
            return ExitCode::FAILURE;
        }
    };
    info!(addr = %bind_addr, "listening");

    if let Err(err) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!(error = %err, "server_failed");
        return ExitCode::FAILURE;
    }

    info!("shutdown_complete");
    ExitCode::SUCCESS
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "shutdown_signal_unavailable");
        std::future::pending::<()>().await;
    }
    info!("shutdown_requested");
}
