use std::sync::Arc;

/// One measured HTTP request, ready to be recorded.
///
/// `route` is the matched route pattern when the router resolved one,
/// otherwise the raw request path.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequestSample {
    pub method: String,
    pub route: String,
    pub status_code: u16,
    pub duration_seconds: f64,
}

/// Outcome label for storage operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbOperationStatus {
    Success,
    Error,
}

impl DbOperationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DbOperationStatus::Success => "success",
            DbOperationStatus::Error => "error",
        }
    }
}

/// Abstraction for application metrics (counters, histograms).
pub trait Metrics: Send + Sync + 'static {
    // ---
    /// Render current metrics in Prometheus text format.
    fn render(&self) -> String;

    /// Record one HTTP request: a duration observation and a counter
    /// increment, both labelled with the sample's method, route and status.
    fn record_http_request(&self, sample: &HttpRequestSample);

    /// Record one storage operation against a collection.
    fn record_db_operation(&self, operation: &str, collection: &str, status: DbOperationStatus);
}

/// Type alias for any backend that implements Metrics.
pub type MetricsPtr = Arc<dyn Metrics>;
