//! HTTP metrics middleware.
//!
//! Wraps every routed request in one measured span and records exactly one
//! [`HttpRequestSample`] when the response is known:
//! - `http_request_duration_seconds{method, route, status_code}`
//! - `http_requests_total{method, route, status_code}`
//!
//! The response passes through untouched.

use crate::app_state::AppState;
use crate::domain::HttpRequestSample;
use axum::{
    extract::{MatchedPath, Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
};
use std::time::Instant;

/// Marks a response produced by a failed handler.
///
/// `status` is the status the error itself carried; `None` means the error
/// had no status and is recorded as `500`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandlerFailure {
    pub status: Option<StatusCode>,
}

/// Axum middleware recording duration and count for each request.
///
/// Use with `axum::middleware::from_fn_with_state` and `Router::layer`, so
/// unmatched paths are recorded too (labelled with the raw path).
pub async fn track_http_metrics(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    // ---
    let method = request.method().as_str().to_owned();
    let route = route_label(&request);

    let start = Instant::now();
    let response = next.run(request).await;
    let duration_seconds = start.elapsed().as_secs_f64();

    state.metrics().record_http_request(&HttpRequestSample {
        method,
        route,
        status_code: status_label(&response),
        duration_seconds,
    });

    response
}

/// Matched route pattern (e.g. `/`), else the raw request path.
fn route_label(request: &Request) -> String {
    request
        .extensions()
        .get::<MatchedPath>()
        .map(|matched| matched.as_str().to_owned())
        .unwrap_or_else(|| request.uri().path().to_owned())
}

/// Response status on success; on failure the error's status, else 500.
fn status_label(response: &Response) -> u16 {
    // ---
    match response.extensions().get::<HandlerFailure>() {
        Some(failure) => failure
            .status
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            .as_u16(),
        None => response.status().as_u16(),
    }
}
