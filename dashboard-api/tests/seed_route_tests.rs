/// Router tests for the seeding API
///
/// Drives the Axum router directly with `tower::ServiceExt::oneshot`.

mod common;

use axum::http::StatusCode;
use common::{get_json, test_app};
use dashboard_shared::seed::mock::{FailPoint, MockConnectionProvider};
use serde_json::json;

#[tokio::test]
async fn test_seed_success_body() {
    let provider = MockConnectionProvider::new();

    let (status, body) = get_json(test_app(&provider), "/seed").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Database seeded successfully" }));
    assert_eq!(provider.commit_count(), 1);
    assert_eq!(provider.release_count(), 1);
    assert_eq!(provider.rows("invoices").len(), 13);
}

#[tokio::test]
async fn test_seed_twice_succeeds() {
    let provider = MockConnectionProvider::new();
    let app = test_app(&provider);

    let (first, _) = get_json(app.clone(), "/seed").await;
    let (second, body) = get_json(app, "/seed").await;

    assert_eq!(first, StatusCode::OK);
    assert_eq!(second, StatusCode::OK);
    assert_eq!(body["message"], "Database seeded successfully");
    assert_eq!(provider.rows("users").len(), 1);
    assert_eq!(provider.release_count(), 2);
}

#[tokio::test]
async fn test_seed_failure_returns_500() {
    let provider =
        MockConnectionProvider::new().fail_at(FailPoint::statement("INSERT INTO revenue"));

    let (status, body) = get_json(test_app(&provider), "/seed").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let error = body["error"].as_str().expect("error should be a string");
    assert!(!error.is_empty());
    assert!(body.get("message").is_none());

    assert_eq!(provider.rollback_count(), 1);
    assert_eq!(provider.release_count(), 1);
    assert!(provider.rows("users").is_empty());
}

#[tokio::test]
async fn test_connect_failure_returns_500() {
    let provider = MockConnectionProvider::new().fail_at(FailPoint::Connect);

    let (status, body) = get_json(test_app(&provider), "/seed").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!body["error"].as_str().unwrap().is_empty());
    assert_eq!(provider.release_count(), 0);
}

#[tokio::test]
async fn test_seed_recovers_after_failure() {
    let provider = MockConnectionProvider::new().fail_at(FailPoint::Commit);
    let app = test_app(&provider);

    let (status, _) = get_json(app.clone(), "/seed").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    provider.clear_failures();
    let (status, _) = get_json(app, "/seed").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(provider.rows("revenue").len(), 12);
}

#[tokio::test]
async fn test_health_reports_degraded_without_database() {
    let provider = MockConnectionProvider::new();

    let (status, body) = get_json(test_app(&provider), "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["database"], "disconnected");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_unknown_route_returns_404() {
    let provider = MockConnectionProvider::new();

    let (status, body) = get_json(test_app(&provider), "/nope").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
    assert_eq!(provider.connect_count(), 0);
}
