use crate::domain::{DbOperationStatus, HttpRequestSample, Metrics};

/// No-op metrics implementation for development and tests.
pub struct NoopMetrics;

impl NoopMetrics {
    pub fn new() -> Self {
        NoopMetrics
    }
}

impl Default for NoopMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics for NoopMetrics {
    // ---
    fn render(&self) -> String {
        String::new()
    }
    fn record_http_request(&self, _: &HttpRequestSample) {}
    fn record_db_operation(&self, _: &str, _: &str, _: DbOperationStatus) {}
}
