//! Behaviour of `GET /`: response shape, visit resolution, storage failures.

use axum::http::{Request, StatusCode};
use axum::body::Body;
use std::sync::Arc;
use tower::ServiceExt;
use visitor_log::create_noop_metrics;

mod common;
use common::{app, body_json, get, FailingRepository, MemoryRepository, TestServer};

#[tokio::test]
async fn root_echoes_request_line_and_user_agent() {
    // ---
    let repo = Arc::new(MemoryRepository::default());
    let app = app(repo.clone(), create_noop_metrics().unwrap(), false);

    let request = Request::builder()
        .uri("/")
        .header("user-agent", "curl/8.5.0")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json, serde_json::json!({ "request": "[GET] /", "user_agent": "curl/8.5.0" }));

    let visits = repo.visits();
    assert_eq!(visits.len(), 1);
    assert_eq!(visits[0].user_agent, "curl/8.5.0");
}

#[tokio::test]
async fn query_parameters_are_echoed_in_order() {
    // ---
    let repo = Arc::new(MemoryRepository::default());
    let app = app(repo, create_noop_metrics().unwrap(), false);

    let response = app.oneshot(get("/?a=1&b=2")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["request"], "[GET] /?a=1&b=2");
}

#[tokio::test]
async fn query_parameters_are_reencoded() {
    // ---
    let repo = Arc::new(MemoryRepository::default());
    let app = app(repo, create_noop_metrics().unwrap(), false);

    let response = app.oneshot(get("/?name=J%C3%BCrgen%20K&x")).await.unwrap();

    let json = body_json(response).await;
    assert_eq!(json["request"], "[GET] /?name=J%C3%BCrgen+K&x=");
}

#[tokio::test]
async fn bare_question_mark_is_not_echoed() {
    // ---
    let repo = Arc::new(MemoryRepository::default());
    let app = app(repo, create_noop_metrics().unwrap(), false);

    let response = app.oneshot(get("/?")).await.unwrap();

    let json = body_json(response).await;
    assert_eq!(json["request"], "[GET] /");
}

#[tokio::test]
async fn missing_metadata_falls_back_to_placeholders() {
    // ---
    // oneshot requests carry no socket address and no user agent
    let repo = Arc::new(MemoryRepository::default());
    let app = app(repo.clone(), create_noop_metrics().unwrap(), false);

    let response = app.oneshot(get("/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["user_agent"], "unknown");

    let visits = repo.visits();
    assert_eq!(visits.len(), 1);
    assert_eq!(visits[0].ip, "-");
    assert_eq!(visits[0].user_agent, "unknown");
}

#[tokio::test]
async fn forwarding_headers_ignored_unless_trusted() {
    // ---
    let repo = Arc::new(MemoryRepository::default());
    let app = app(repo.clone(), create_noop_metrics().unwrap(), false);

    let request = Request::builder()
        .uri("/")
        .header("x-forwarded-for", "203.0.113.9")
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap();

    assert_eq!(repo.visits()[0].ip, "-");
}

#[tokio::test]
async fn trusted_forwarding_header_is_the_client_ip() {
    // ---
    let repo = Arc::new(MemoryRepository::default());
    let app = app(repo.clone(), create_noop_metrics().unwrap(), true);

    let request = Request::builder()
        .uri("/")
        .header("x-forwarded-for", "203.0.113.9, 10.1.1.1")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(repo.visits()[0].ip, "203.0.113.9");
}

#[tokio::test]
async fn socket_address_used_without_hint() {
    // ---
    let repo = Arc::new(MemoryRepository::default());
    let server = TestServer::new(app(repo.clone(), create_noop_metrics().unwrap(), true)).await;

    let response = server
        .client
        .get(server.url("/?from=socket"))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 200);
    let json: serde_json::Value = response.json().await.unwrap();
    assert_eq!(json["request"], "[GET] /?from=socket");

    let visits = repo.visits();
    assert_eq!(visits.len(), 1);
    assert_eq!(visits[0].ip, "127.0.0.1");
}

#[tokio::test]
async fn storage_failure_is_an_error_response() {
    // ---
    let app = app(
        Arc::new(FailingRepository { status: None }),
        create_noop_metrics().unwrap(),
        false,
    );

    let response = app.oneshot(get("/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert!(body.is_empty());
}

#[tokio::test]
async fn storage_failure_status_is_used_for_response() {
    // ---
    let app = app(
        Arc::new(FailingRepository {
            status: Some(StatusCode::SERVICE_UNAVAILABLE),
        }),
        create_noop_metrics().unwrap(),
        false,
    );

    let response = app.oneshot(get("/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn other_methods_and_paths_are_rejected() {
    // ---
    let repo = Arc::new(MemoryRepository::default());
    let app = app(repo.clone(), create_noop_metrics().unwrap(), false);

    let post = Request::builder()
        .method("POST")
        .uri("/")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(post).await.unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);

    let response = app.oneshot(get("/nonexistent")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    assert!(repo.visits().is_empty());
}
