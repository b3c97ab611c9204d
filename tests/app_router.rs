mod common;

use std::sync::Arc;

use axum::ServiceExt;
use axum::extract::Request;
use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::json;
use shortlink::infrastructure::persistence::InMemoryShortLinkRepository;
use shortlink::routes::app_router;

fn create_server() -> TestServer {
    let state = common::create_test_state(Arc::new(InMemoryShortLinkRepository::new()));
    let app = ServiceExt::<Request>::into_make_service(app_router(state));

    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_shorten_then_follow_through_composed_router() {
    let server = create_server();

    let response = server
        .post("/api/shorten/")
        .json(&json!({ "target_url": "https://example.com/a" }))
        .await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    let short_url = json["short_url"].as_str().unwrap();
    let code = common::code_of(short_url);

    let redirect = server.get(&format!("/r/{code}")).await;

    redirect.assert_status(StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(
        redirect.header("location").to_str().unwrap(),
        "https://example.com/a"
    );

    let trailing = server.get(&format!("/r/{code}/")).await;
    trailing.assert_status(StatusCode::TEMPORARY_REDIRECT);
}

#[tokio::test]
async fn test_health_through_composed_router() {
    let server = create_server();

    let response = server.get("/health").await;

    response.assert_status_ok();
    assert_eq!(response.json::<serde_json::Value>()["status"], "healthy");
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let server = create_server();

    server.get("/shorten").await.assert_status_not_found();
}
