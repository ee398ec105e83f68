use metrics::{counter, histogram};

/// Histogram of request latency, labelled by method, route and status code.
pub const HTTP_REQUEST_DURATION_SECONDS: &str = "http_request_duration_seconds";

/// Counter of handled requests, labelled like the duration histogram.
pub const HTTP_REQUESTS_TOTAL: &str = "http_requests_total";

/// Counter of storage operations, labelled by operation, collection and status.
pub const MONGODB_OPERATIONS_TOTAL: &str = "mongodb_operations_total";

/// Bucket boundaries (seconds) for the request duration histogram.
pub const HTTP_DURATION_BUCKETS: [f64; 8] = [0.001, 0.01, 0.1, 0.5, 1.0, 2.0, 5.0, 10.0];

/// Record one request latency observation.
pub fn observe_request_duration(method: &str, route: &str, status_code: u16, seconds: f64) {
    histogram!(
        HTTP_REQUEST_DURATION_SECONDS,
        "method" => method.to_owned(),
        "route" => route.to_owned(),
        "status_code" => status_code.to_string(),
    )
    .record(seconds);
}

/// Increment the request counter by one.
pub fn increment_request_count(method: &str, route: &str, status_code: u16) {
    counter!(
        HTTP_REQUESTS_TOTAL,
        "method" => method.to_owned(),
        "route" => route.to_owned(),
        "status_code" => status_code.to_string(),
    )
    .increment(1);
}

/// Increment the storage operation counter by one.
pub fn increment_db_operation(operation: &str, collection: &str, status: &'static str) {
    counter!(
        MONGODB_OPERATIONS_TOTAL,
        "operation" => operation.to_owned(),
        "collection" => collection.to_owned(),
        "status" => status,
    )
    .increment(1);
}
