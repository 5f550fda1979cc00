//! Reporting handlers.

use axum::Json;
use axum::extract::{Query, State};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;

use reclaim_core::error::AppError;

use crate::extractors::AuthUser;
use crate::state::AppState;

/// Date-window query for the claimed-items report.
#[derive(Debug, Deserialize)]
pub struct ClaimedItemsQuery {
    /// Inclusive window start.
    pub start: Option<DateTime<Utc>>,
    /// Inclusive window end.
    pub end: Option<DateTime<Utc>>,
}

/// GET /api/reports/claimed-items
pub async fn claimed_items(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(params): Query<ClaimedItemsQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    let entries = state
        .report_service
        .claimed_items(params.start, params.end)
        .await?;
    Ok(Json(serde_json::json!({ "success": true, "data": entries })))
}

/// Date-window query for the frequent-lost-items report.
#[derive(Debug, Deserialize)]
pub struct FrequentLostQuery {
    /// Inclusive window start.
    pub start: Option<NaiveDate>,
    /// Inclusive window end.
    pub end: Option<NaiveDate>,
}

/// GET /api/reports/frequent-lost-items
pub async fn frequent_lost_items(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(params): Query<FrequentLostQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    let counts = state
        .report_service
        .frequent_lost_items(params.start, params.end)
        .await?;
    Ok(Json(serde_json::json!({ "success": true, "data": counts })))
}
