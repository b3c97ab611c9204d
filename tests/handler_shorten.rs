mod common;

use std::sync::Arc;

use axum::{Router, routing::post};
use axum_test::TestServer;
use serde_json::json;
use shortlink::api::handlers::shorten_handler;
use shortlink::domain::repositories::ShortLinkRepository;
use shortlink::infrastructure::persistence::InMemoryShortLinkRepository;

fn server_with(repo: Arc<dyn ShortLinkRepository>) -> TestServer {
    let state = common::create_test_state(repo);
    let app = Router::new()
        .route("/api/shorten", post(shorten_handler))
        .with_state(state);

    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_shorten_returns_short_url() {
    let repo = Arc::new(InMemoryShortLinkRepository::new());
    let server = server_with(repo.clone());

    let response = server
        .post("/api/shorten")
        .json(&json!({ "target_url": "https://example.com/a" }))
        .await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    let short_url = json["short_url"].as_str().unwrap();
    assert!(short_url.starts_with("https://s.example.com/r/"));

    let code = common::code_of(short_url);
    assert_eq!(code.len(), 6);
    assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));

    let stored = repo.find_by_code(code).await.unwrap().unwrap();
    assert_eq!(stored.target_url, "https://example.com/a");
}

#[tokio::test]
async fn test_shorten_is_idempotent() {
    let repo = Arc::new(InMemoryShortLinkRepository::new());
    let server = server_with(repo.clone());

    let first = server
        .post("/api/shorten")
        .json(&json!({ "target_url": "https://dedup.com" }))
        .await
        .json::<serde_json::Value>();

    let second = server
        .post("/api/shorten")
        .json(&json!({ "target_url": "https://dedup.com" }))
        .await
        .json::<serde_json::Value>();

    assert_eq!(first["short_url"], second["short_url"]);
    assert_eq!(repo.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_shorten_accepts_opaque_target() {
    let server = server_with(Arc::new(InMemoryShortLinkRepository::new()));

    let response = server
        .post("/api/shorten")
        .json(&json!({ "target_url": "not really a url" }))
        .await;

    response.assert_status_ok();
}

#[tokio::test]
async fn test_shorten_empty_target() {
    let server = server_with(Arc::new(InMemoryShortLinkRepository::new()));

    let response = server
        .post("/api/shorten")
        .json(&json!({ "target_url": "" }))
        .await;

    response.assert_status_bad_request();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "invalid_input");
}

#[tokio::test]
async fn test_shorten_missing_target() {
    let server = server_with(Arc::new(InMemoryShortLinkRepository::new()));

    let response = server.post("/api/shorten").json(&json!({})).await;

    response.assert_status_bad_request();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "invalid_input");
}

#[tokio::test]
async fn test_shorten_non_string_target() {
    let server = server_with(Arc::new(InMemoryShortLinkRepository::new()));

    let response = server
        .post("/api/shorten")
        .json(&json!({ "target_url": 42 }))
        .await;

    response.assert_status_bad_request();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "invalid_input");
}

#[tokio::test]
async fn test_shorten_store_unavailable() {
    let server = server_with(Arc::new(common::UnavailableRepository));

    let response = server
        .post("/api/shorten")
        .json(&json!({ "target_url": "https://example.com" }))
        .await;

    response.assert_status_service_unavailable();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "store_unavailable");
}
