use crate::middleware::HandlerFailure;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use std::fmt;

/// An error that names the HTTP status it should be reported with.
///
/// Storage backends may return this (wrapped in `anyhow::Error`) to choose
/// the response status; any other error is reported as `500`.
#[derive(Debug)]
pub struct HttpStatusError {
    status: StatusCode,
    message: String,
}

impl HttpStatusError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        // ---
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl fmt::Display for HttpStatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message, self.status)
    }
}

impl std::error::Error for HttpStatusError {}

/// Failure of a request handler.
///
/// Carries the status found on the error chain, if any. Converting into a
/// response logs the error and tags the response with [`HandlerFailure`] so
/// the metrics middleware records the failure branch.
#[derive(Debug)]
pub struct HandlerError {
    status: Option<StatusCode>,
    source: anyhow::Error,
}

impl<E> From<E> for HandlerError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        // ---
        let source: anyhow::Error = err.into();
        let status = source
            .chain()
            .find_map(|cause| cause.downcast_ref::<HttpStatusError>())
            .map(HttpStatusError::status);

        Self { status, source }
    }
}

impl IntoResponse for HandlerError {
    fn into_response(self) -> Response {
        // ---
        let status = self.status.unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        tracing::error!(status = status.as_u16(), "Request failed: {:#}", self.source);

        let mut response = status.into_response();
        response.extensions_mut().insert(HandlerFailure {
            status: self.status,
        });
        response
    }
}
