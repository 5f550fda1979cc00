//! End-to-end claim workflow tests.
//!
//! These require a running PostgreSQL (set `TEST_DATABASE_URL`), so they
//! are ignored by default: `cargo test -- --ignored` runs them.

use http::StatusCode;
use uuid::Uuid;

use crate::helpers::TestApp;

#[tokio::test]
#[ignore = "requires a running PostgreSQL"]
async fn test_verified_claim_is_approved_end_to_end() {
    let app = TestApp::with_database().await;

    let poster = Uuid::new_v4();
    let claimant = Uuid::new_v4();
    let poster_token = app.token_for(poster, "poster");
    let claimant_token = app.token_for(claimant, "claimant");

    let category_id = app.seed_category(&poster_token, "Bikes").await;
    let item_id = app
        .seed_item(&poster_token, category_id, "Red Bike", "Honda")
        .await;

    // The claimant fetches the verification question.
    let response = app
        .request(
            "GET",
            &format!("/api/items/{item_id}/verification-question"),
            Some(&claimant_token),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["question"], "What brand is it?");

    // A trimmed, differently-cased answer still verifies; the claimant
    // only ever sees a bare success.
    let response = app
        .request(
            "POST",
            &format!("/api/items/{item_id}/claim-attempts"),
            Some(&claimant_token),
            Some(serde_json::json!({ "answer": " honda " })),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, serde_json::json!({ "success": true }));

    // The poster's notification carries the structured payload with the
    // match result.
    let response = app
        .request("GET", "/api/notifications", Some(&poster_token), None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let items = response.body["data"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["title"], "New Claim Attempt");
    let payload: serde_json::Value =
        serde_json::from_str(items[0]["message"].as_str().unwrap()).unwrap();
    assert_eq!(payload["notificationType"], "ClaimAttempt");
    assert_eq!(payload["verificationStatus"], "VERIFIED");
    assert_eq!(payload["claimantAnswer"], "honda");
    assert_eq!(payload["claimantId"], claimant.to_string());

    // The poster approves.
    let response = app
        .request(
            "POST",
            &format!("/api/items/{item_id}/claims/{claimant}/approve"),
            Some(&poster_token),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["is_claimed"], true);
    assert!(!response.body["data"]["claim_date"].is_null());

    // The claimant has exactly one unread "Claim Approved" notification.
    let response = app
        .request(
            "GET",
            "/api/notifications?unread=true",
            Some(&claimant_token),
            None,
        )
        .await;
    let items = response.body["data"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["title"], "Claim Approved");

    // A second approval is a conflict and produces no extra notification.
    let response = app
        .request(
            "POST",
            &format!("/api/items/{item_id}/claims/{claimant}/approve"),
            Some(&poster_token),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);

    let response = app
        .request("GET", "/api/notifications", Some(&claimant_token), None)
        .await;
    assert_eq!(response.body["data"]["items"].as_array().unwrap().len(), 1);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL"]
async fn test_unverified_claim_is_rejected_and_item_stays_open() {
    let app = TestApp::with_database().await;

    let poster = Uuid::new_v4();
    let claimant = Uuid::new_v4();
    let poster_token = app.token_for(poster, "poster");
    let claimant_token = app.token_for(claimant, "claimant");

    let category_id = app.seed_category(&poster_token, "Bikes").await;
    let item_id = app
        .seed_item(&poster_token, category_id, "Red Bike", "Honda")
        .await;

    // Wrong answer: the claimant still sees plain success.
    let response = app
        .request(
            "POST",
            &format!("/api/items/{item_id}/claim-attempts"),
            Some(&claimant_token),
            Some(serde_json::json!({ "answer": "Toyota" })),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, serde_json::json!({ "success": true }));

    let response = app
        .request("GET", "/api/notifications", Some(&poster_token), None)
        .await;
    let items = response.body["data"]["items"].as_array().unwrap();
    let payload: serde_json::Value =
        serde_json::from_str(items[0]["message"].as_str().unwrap()).unwrap();
    assert_eq!(payload["verificationStatus"], "UNVERIFIED");

    // The poster declines; the item remains open for other claimants.
    let response = app
        .request(
            "POST",
            &format!("/api/items/{item_id}/claims/{claimant}/reject"),
            Some(&poster_token),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .request(
            "GET",
            &format!("/api/items/{item_id}"),
            Some(&poster_token),
            None,
        )
        .await;
    assert_eq!(response.body["data"]["is_claimed"], false);
    assert!(response.body["data"]["claim_date"].is_null());

    let response = app
        .request("GET", "/api/notifications", Some(&claimant_token), None)
        .await;
    let items = response.body["data"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["title"], "Claim Declined");
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL"]
async fn test_only_poster_may_decide() {
    let app = TestApp::with_database().await;

    let poster = Uuid::new_v4();
    let intruder = Uuid::new_v4();
    let poster_token = app.token_for(poster, "poster");
    let intruder_token = app.token_for(intruder, "intruder");

    let category_id = app.seed_category(&poster_token, "Bikes").await;
    let item_id = app
        .seed_item(&poster_token, category_id, "Red Bike", "Honda")
        .await;

    let response = app
        .request(
            "POST",
            &format!("/api/items/{item_id}/claims/{intruder}/approve"),
            Some(&intruder_token),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL"]
async fn test_claim_attempt_on_missing_item() {
    let app = TestApp::with_database().await;
    let token = app.token_for(Uuid::new_v4(), "claimant");

    let response = app
        .request(
            "POST",
            "/api/items/999999/claim-attempts",
            Some(&token),
            Some(serde_json::json!({ "answer": "Honda" })),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL"]
async fn test_verification_answer_never_serialized() {
    let app = TestApp::with_database().await;

    let poster = Uuid::new_v4();
    let poster_token = app.token_for(poster, "poster");
    let category_id = app.seed_category(&poster_token, "Bikes").await;
    let item_id = app
        .seed_item(&poster_token, category_id, "Red Bike", "Honda")
        .await;

    let response = app
        .request(
            "GET",
            &format!("/api/items/{item_id}"),
            Some(&poster_token),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body["data"].get("verification_answer").is_none());
}
