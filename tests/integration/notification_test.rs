//! Notification inbox tests.
//!
//! These require a running PostgreSQL (set `TEST_DATABASE_URL`), so they
//! are ignored by default: `cargo test -- --ignored` runs them.

use http::StatusCode;
use uuid::Uuid;

use crate::helpers::TestApp;

/// Seed one claim-attempt notification addressed to the poster and
/// return its ID.
async fn seed_notification(app: &TestApp, poster_token: &str, claimant_token: &str) -> i64 {
    let category_id = app.seed_category(poster_token, "Keys").await;
    let item_id = app
        .seed_item(poster_token, category_id, "Car Keys", "Honda")
        .await;

    let response = app
        .request(
            "POST",
            &format!("/api/items/{item_id}/claim-attempts"),
            Some(claimant_token),
            Some(serde_json::json!({ "answer": "Honda" })),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .request("GET", "/api/notifications", Some(poster_token), None)
        .await;
    response.body["data"]["items"][0]["id"].as_i64().unwrap()
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL"]
async fn test_mark_read_transitions_once() {
    let app = TestApp::with_database().await;
    let poster = Uuid::new_v4();
    let poster_token = app.token_for(poster, "poster");
    let claimant_token = app.token_for(Uuid::new_v4(), "claimant");

    let notification_id = seed_notification(&app, &poster_token, &claimant_token).await;

    let response = app
        .request(
            "GET",
            "/api/notifications/unread-count",
            Some(&poster_token),
            None,
        )
        .await;
    assert_eq!(response.body["data"]["count"], 1);

    let response = app
        .request(
            "POST",
            &format!("/api/notifications/{notification_id}/read"),
            Some(&poster_token),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .request(
            "GET",
            "/api/notifications/unread-count",
            Some(&poster_token),
            None,
        )
        .await;
    assert_eq!(response.body["data"]["count"], 0);

    // Read notifications disappear from the unread view but stay listed.
    let response = app
        .request(
            "GET",
            "/api/notifications?unread=true",
            Some(&poster_token),
            None,
        )
        .await;
    assert!(response.body["data"]["items"].as_array().unwrap().is_empty());

    let response = app
        .request("GET", "/api/notifications", Some(&poster_token), None)
        .await;
    assert_eq!(response.body["data"]["items"].as_array().unwrap().len(), 1);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL"]
async fn test_mark_read_by_non_recipient_is_not_found() {
    let app = TestApp::with_database().await;
    let poster_token = app.token_for(Uuid::new_v4(), "poster");
    let claimant_token = app.token_for(Uuid::new_v4(), "claimant");
    let outsider_token = app.token_for(Uuid::new_v4(), "outsider");

    let notification_id = seed_notification(&app, &poster_token, &claimant_token).await;

    // The ID exists, but the caller is not the recipient.
    let response = app
        .request(
            "POST",
            &format!("/api/notifications/{notification_id}/read"),
            Some(&outsider_token),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL"]
async fn test_clear_all_removes_only_own_notifications() {
    let app = TestApp::with_database().await;
    let poster = Uuid::new_v4();
    let poster_token = app.token_for(poster, "poster");
    let claimant_token = app.token_for(Uuid::new_v4(), "claimant");

    seed_notification(&app, &poster_token, &claimant_token).await;

    let response = app
        .request("DELETE", "/api/notifications", Some(&poster_token), None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["removed"], 1);

    let response = app
        .request("GET", "/api/notifications", Some(&poster_token), None)
        .await;
    assert!(response.body["data"]["items"].as_array().unwrap().is_empty());

    // Clearing again removes nothing.
    let response = app
        .request("DELETE", "/api/notifications", Some(&poster_token), None)
        .await;
    assert_eq!(response.body["data"]["removed"], 0);
}
