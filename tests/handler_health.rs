mod common;

use std::sync::Arc;

use axum::{Router, routing::get};
use axum_test::TestServer;
use shortlink::api::handlers::health_handler;
use shortlink::domain::repositories::ShortLinkRepository;
use shortlink::infrastructure::persistence::InMemoryShortLinkRepository;

fn server_with(repo: Arc<dyn ShortLinkRepository>) -> TestServer {
    let state = common::create_test_state(repo);
    let app = Router::new()
        .route("/health", get(health_handler))
        .with_state(state);

    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_health_endpoint_success() {
    let server = server_with(Arc::new(InMemoryShortLinkRepository::new()));

    let response = server.get("/health").await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["checks"]["store"]["status"], "ok");
    assert_eq!(json["checks"]["cache"]["status"], "ok");
    assert!(json.get("version").is_some());
}

#[tokio::test]
async fn test_health_endpoint_degraded() {
    let server = server_with(Arc::new(common::UnavailableRepository));

    let response = server.get("/health").await;

    response.assert_status_service_unavailable();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["checks"]["store"]["status"], "error");
}
