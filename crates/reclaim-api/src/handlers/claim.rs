//! Claim workflow handlers.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;
use validator::Validate;

use reclaim_core::error::AppError;

use crate::dto::request::ClaimAttemptRequest;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/items/{item_id}/claim-attempts
///
/// Always reports success to the claimant; the match result is poster-only
/// information.
pub async fn submit_claim_attempt(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(item_id): Path<i64>,
    Json(req): Json<ClaimAttemptRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    state
        .claim_service
        .submit_attempt(&auth, item_id, &req.answer)
        .await?;

    Ok(Json(serde_json::json!({ "success": true })))
}

/// GET /api/items/{item_id}/verification-question
pub async fn verification_question(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(item_id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    match state.claim_service.verification_question(item_id).await? {
        Some(question) => Ok(Json(serde_json::json!({ "question": question }))),
        None => Ok(Json(serde_json::json!({ "success": false }))),
    }
}

/// POST /api/items/{item_id}/claims/{claimant_id}/approve
pub async fn approve_claim(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((item_id, claimant_id)): Path<(i64, Uuid)>,
) -> Result<Json<serde_json::Value>, AppError> {
    let item = state.claim_service.approve(&auth, item_id, claimant_id).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": item })))
}

/// POST /api/items/{item_id}/claims/{claimant_id}/reject
pub async fn reject_claim(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((item_id, claimant_id)): Path<(i64, Uuid)>,
) -> Result<Json<serde_json::Value>, AppError> {
    state.claim_service.reject(&auth, item_id, claimant_id).await?;
    Ok(Json(serde_json::json!({ "success": true })))
}
