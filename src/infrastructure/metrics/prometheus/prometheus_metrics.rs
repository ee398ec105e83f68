//! Prometheus metrics implementation.
//!
//! This module provides a concrete implementation of the `Metrics` trait using
//! the Prometheus metrics format. Recording goes through the helpers in
//! `counters.rs`, which write to the global `metrics` crate registry; the
//! handle obtained from `recorder.rs` renders that registry after refreshing
//! the process metrics.

use crate::domain::{DbOperationStatus, HttpRequestSample, Metrics};
use metrics_exporter_prometheus::PrometheusHandle;
use metrics_process::Collector;
use std::sync::Arc;

/// Prometheus-based metrics implementation.
pub struct PrometheusMetrics {
    handle: PrometheusHandle,
    process: Arc<Collector>,
}

impl PrometheusMetrics {
    pub fn new(handle: PrometheusHandle, process: Arc<Collector>) -> Self {
        tracing::info!("Creating Prometheus metrics");
        PrometheusMetrics { handle, process }
    }
}

impl Metrics for PrometheusMetrics {
    fn render(&self) -> String {
        self.process.collect();
        self.handle.render()
    }

    fn record_http_request(&self, sample: &HttpRequestSample) {
        tracing::debug!(
            method = %sample.method,
            route = %sample.route,
            status_code = sample.status_code,
            duration_seconds = sample.duration_seconds,
            "Recording HTTP request"
        );
        let HttpRequestSample {
            method,
            route,
            status_code,
            duration_seconds,
        } = sample;

        super::observe_request_duration(method, route, *status_code, *duration_seconds);
        super::increment_request_count(method, route, *status_code);
    }

    fn record_db_operation(&self, operation: &str, collection: &str, status: DbOperationStatus) {
        super::increment_db_operation(operation, collection, status.as_str());
    }
}
