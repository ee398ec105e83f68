mod http_metrics;

pub use http_metrics::{track_http_metrics, HandlerFailure};
