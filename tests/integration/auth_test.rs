//! Authentication boundary and health endpoint tests.
//!
//! These never touch the database.

use http::StatusCode;
use uuid::Uuid;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_health_check() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/api/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
}

#[tokio::test]
async fn test_missing_token_rejected() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/api/notifications", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "UNAUTHENTICATED");
}

#[tokio::test]
async fn test_garbage_token_rejected() {
    let app = TestApp::new().await;

    let response = app
        .request("GET", "/api/notifications", Some("not-a-jwt"), None)
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_claim_attempt_requires_auth() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/items/1/claim-attempts",
            None,
            Some(serde_json::json!({ "answer": "Honda" })),
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_ws_upgrade_without_token() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/ws", None, None).await;

    assert!(
        response.status == StatusCode::BAD_REQUEST
            || response.status == StatusCode::UNAUTHORIZED
            || response.status == StatusCode::UPGRADE_REQUIRED,
        "Expected 400, 401, or 426, got {}",
        response.status
    );
}

#[tokio::test]
async fn test_token_minting_round_trip() {
    let app = TestApp::new().await;
    let token = app.token_for(Uuid::new_v4(), "alice");

    // A valid token on a database-free endpoint must not be rejected at
    // the auth boundary.
    let response = app.request("GET", "/api/health", Some(&token), None).await;
    assert_eq!(response.status, StatusCode::OK);
}
