// src/lib.rs
use anyhow::Result;
use axum::{routing::get, Router};

use handlers::{metrics_handler, visitor_info};
use middleware::track_http_metrics;

// Public exports (visible outside this module)
pub mod domain;

// Internal-only exports (sibling access within this module)
mod app_state;
mod config;
mod handlers;
mod infrastructure;
mod middleware;

pub use app_state::AppState;
pub use config::*;
pub use handlers::{HttpStatusError, VisitorInfo};

// Publicly expose the infrastructure creation functions
pub use infrastructure::{
    create_mongo_repository, // ---
    create_noop_metrics,
    create_prom_metrics,
    metrics::prometheus::{
        upkeep_running as prometheus_upkeep_running, HTTP_REQUESTS_TOTAL,
        HTTP_REQUEST_DURATION_SECONDS, MONGODB_OPERATIONS_TOTAL,
    },
};

/// Install the global `tracing` subscriber, filtered by `RUST_LOG` (default `info`).
///
/// Safe to call more than once; later calls are ignored.
pub fn init_tracing() {
    // ---
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt().with_env_filter(filter).try_init().ok();
}

/// Build the HTTP router around an already-assembled [`AppState`].
///
/// Every route, and the 404 fallback, runs inside the metrics middleware.
pub fn build_router(app_state: AppState) -> Router {
    // ---
    Router::new()
        .route("/", get(visitor_info))
        .route("/metrics", get(metrics_handler))
        .layer(axum::middleware::from_fn_with_state(
            app_state.clone(),
            track_http_metrics,
        ))
        .with_state(app_state)
}

/// Composition root: create the metrics backend and the MongoDB repository
/// from configuration and build the router on top of them.
pub async fn create_router(config: &AppConfig) -> Result<Router> {
    // ---
    let metrics = match config.metrics.backend {
        MetricsBackend::Prometheus => create_prom_metrics()?,
        MetricsBackend::Noop => create_noop_metrics()?,
    };

    let repository = create_mongo_repository(&config.mongo, metrics.clone()).await?;
    let app_state = AppState::new(repository, metrics, config.http.trust_proxy);

    Ok(build_router(app_state))
}
