mod counters;
mod prometheus_metrics;
mod recorder;

pub use counters::{HTTP_REQUESTS_TOTAL, HTTP_REQUEST_DURATION_SECONDS, MONGODB_OPERATIONS_TOTAL};
pub use prometheus_metrics::PrometheusMetrics;
use std::sync::Arc;

// Re-export utilities for internal use within this module
pub(crate) use counters::{
    increment_db_operation, increment_request_count, observe_request_duration,
};
pub use recorder::upkeep_running;
pub(crate) use recorder::init_metrics;

/// Creates a new Prometheus metrics implementation.
///
/// Installs the process-wide recorder, its process collector and its upkeep
/// thread on first use. Every instance created afterwards shares that
/// recorder, so rendering from any of them shows all recorded samples.
pub fn create() -> anyhow::Result<crate::domain::MetricsPtr> {
    tracing::info!("Initializing Prometheus metrics");
    let recorder = init_metrics()?;

    Ok(Arc::new(PrometheusMetrics::new(
        recorder.handle.clone(),
        Arc::clone(&recorder.process),
    )))
}
