use crate::config::{LogFormat, Observability};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber. Returns `false` when one was already
/// installed; the existing subscriber is kept.
///
/// Filtering follows `RUST_LOG`, defaulting to `info`.
pub fn init_tracing(settings: &Observability) -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);
    let installed = match settings.log_format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
    };
    match installed {
        Ok(()) => true,
        Err(err) => {
            tracing::debug!(error = %err, "tracing_subscriber_already_installed");
            false
        }
    }
}

/// Install the Prometheus recorder when metrics are enabled.
///
/// Returns `None` when disabled or when a recorder is already installed.
pub fn init_metrics(settings: &Observability) -> Option<PrometheusHandle> {
    if !settings.enable_metrics {
        return None;
    }
    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => Some(handle),
        Err(err) => {
            tracing::warn!(error = %err, "metrics_recorder_unavailable");
            None
        }
    }
}
