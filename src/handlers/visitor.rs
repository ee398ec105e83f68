use crate::app_state::AppState;
use crate::domain::Visit;
use super::error::HandlerError;
use axum::{
    extract::{ConnectInfo, FromRequestParts, Query, State},
    http::{header::USER_AGENT, request::Parts, HeaderMap, Method, Uri},
    Json,
};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::net::SocketAddr;

/// Response body of `GET /`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisitorInfo {
    /// Normalized request line, e.g. `[GET] /?a=1&b=2`.
    pub request: String,
    pub user_agent: String,
}

/// What the request says about its caller. Either field may be missing.
#[derive(Debug)]
pub(crate) struct Caller {
    ip: Option<String>,
    user_agent: Option<String>,
}

impl FromRequestParts<AppState> for Caller {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        // ---
        let hint = if state.trust_proxy() {
            forwarded_client_ip(&parts.headers)
        } else {
            None
        };
        let socket_ip = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip().to_string());

        Ok(Caller {
            ip: hint.or(socket_ip),
            user_agent: header_user_agent(&parts.headers),
        })
    }
}

/// Client address announced by a reverse proxy: the first `X-Forwarded-For`
/// entry, else `X-Real-IP`.
fn forwarded_client_ip(headers: &HeaderMap) -> Option<String> {
    // ---
    let forwarded_for = headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|ip| !ip.is_empty());

    forwarded_for
        .or_else(|| {
            headers
                .get("x-real-ip")
                .and_then(|value| value.to_str().ok())
                .map(str::trim)
                .filter(|ip| !ip.is_empty())
        })
        .map(str::to_owned)
}

/// `User-Agent` header text. Empty or non-text values count as missing.
fn header_user_agent(headers: &HeaderMap) -> Option<String> {
    headers
        .get(USER_AGENT)
        .and_then(|value| value.to_str().ok())
        .filter(|agent| !agent.is_empty())
        .map(str::to_owned)
}

/// Format `[METHOD] /path`, plus `?` and the re-encoded query pairs when
/// there is at least one.
pub(crate) fn request_line(
    method: &Method,
    path: &str,
    query: &[(String, String)],
) -> anyhow::Result<String> {
    // ---
    if query.is_empty() {
        return Ok(format!("[{method}] {path}"));
    }

    let encoded = serde_urlencoded::to_string(query)?;
    Ok(format!("[{method}] {path}?{encoded}"))
}

/// Handler for the visitor endpoint (GET /).
///
/// Stores a visit (time, caller IP, user agent) and echoes the normalized
/// request line and user agent back to the caller.
///
/// - `200 OK` with a [`VisitorInfo`] body once the visit is stored.
/// - `500 Internal Server Error` (or the status carried by the storage
///   error) with an empty body if the insert fails.
#[tracing::instrument(skip_all, fields(method = %method, path = %uri.path()))]
pub(crate) async fn visitor_info(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    Query(query): Query<Vec<(String, String)>>,
    caller: Caller,
) -> Result<Json<VisitorInfo>, HandlerError> {
    // ---
    let visit = Visit::new(caller.ip, caller.user_agent);
    let user_agent = visit.user_agent.clone();

    tracing::debug!(ip = %visit.ip, user_agent = %visit.user_agent, "Recording visit");
    state.repository().insert_visit(visit).await?;

    let request = request_line(&method, uri.path(), &query)?;
    Ok(Json(VisitorInfo {
        request,
        user_agent,
    }))
}
