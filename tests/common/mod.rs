// Test helpers are intentionally partially used
#![allow(dead_code)]

use anyhow::Result;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use axum::Router;
use std::net::SocketAddr;
use std::sync::Mutex;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::time::sleep;
use visitor_log::domain::{
    DbOperationStatus, HttpRequestSample, Metrics, MetricsPtr, RepositoryPtr, Visit,
    VisitRepository,
};
use visitor_log::{build_router, AppState, HttpStatusError};

// ============================================================================
// Collaborators
// ============================================================================

/// Keeps every inserted visit in memory.
#[derive(Default)]
pub struct MemoryRepository {
    visits: Mutex<Vec<Visit>>,
}

impl MemoryRepository {
    pub fn visits(&self) -> Vec<Visit> {
        self.visits.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl VisitRepository for MemoryRepository {
    async fn insert_visit(&self, visit: Visit) -> Result<()> {
        self.visits.lock().unwrap().push(visit);
        Ok(())
    }
}

/// Rejects every insert, optionally with an HTTP status attached.
pub struct FailingRepository {
    pub status: Option<StatusCode>,
}

#[async_trait::async_trait]
impl VisitRepository for FailingRepository {
    async fn insert_visit(&self, _visit: Visit) -> Result<()> {
        // ---
        match self.status {
            Some(status) => Err(HttpStatusError::new(status, "storage unavailable").into()),
            None => Err(anyhow::anyhow!("connection reset by peer")),
        }
    }
}

/// Captures every sample instead of exporting it.
#[derive(Default)]
pub struct RecordingMetrics {
    requests: Mutex<Vec<HttpRequestSample>>,
    db_operations: Mutex<Vec<(String, String, DbOperationStatus)>>,
}

impl RecordingMetrics {
    pub fn requests(&self) -> Vec<HttpRequestSample> {
        self.requests.lock().unwrap().clone()
    }

    pub fn db_operations(&self) -> Vec<(String, String, DbOperationStatus)> {
        self.db_operations.lock().unwrap().clone()
    }
}

impl Metrics for RecordingMetrics {
    fn render(&self) -> String {
        format!("recorded_requests {}\n", self.requests.lock().unwrap().len())
    }

    fn record_http_request(&self, sample: &HttpRequestSample) {
        self.requests.lock().unwrap().push(sample.clone());
    }

    fn record_db_operation(&self, operation: &str, collection: &str, status: DbOperationStatus) {
        self.db_operations
            .lock()
            .unwrap()
            .push((operation.to_string(), collection.to_string(), status));
    }
}

// ============================================================================
// App construction
// ============================================================================

pub fn app(repository: RepositoryPtr, metrics: MetricsPtr, trust_proxy: bool) -> Router {
    build_router(AppState::new(repository, metrics, trust_proxy))
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    // ---
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

pub async fn body_text(response: Response) -> String {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(body.to_vec()).unwrap()
}

/// Value of `http_requests_total` for one label set in a Prometheus rendering.
pub fn requests_total(body: &str, method: &str, route: &str, status_code: u16) -> f64 {
    // ---
    let method = format!(r#"method="{method}""#);
    let route = format!(r#"route="{route}""#);
    let status = format!(r#"status_code="{status_code}""#);

    body.lines()
        .filter(|line| line.starts_with("http_requests_total{"))
        .find(|line| line.contains(&method) && line.contains(&route) && line.contains(&status))
        .and_then(|line| line.rsplit(' ').next())
        .and_then(|value| value.parse().ok())
        .unwrap_or(0.0)
}

// ============================================================================
// Listening server (needed for socket addresses)
// ============================================================================

pub struct TestServer {
    pub addr: SocketAddr,
    pub client: reqwest::Client,
}

impl TestServer {
    // ---
    pub async fn new(app: Router) -> Self {
        // --
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        // Spawn the server in the background
        tokio::spawn(async move {
            axum::serve(
                listener,
                app.into_make_service_with_connect_info::<SocketAddr>(),
            )
            .await
            .unwrap();
        });

        // Give the server a moment to start
        sleep(Duration::from_millis(100)).await;

        Self {
            addr,
            client: reqwest::Client::new(),
        }
    }

    pub fn url(&self, path: &str) -> String {
        // ---
        format!("http://{}{}", self.addr, path)
    }
}
