//! Notification inbox handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;

use reclaim_core::error::AppError;

use crate::dto::response::{ApiResponse, CountResponse};
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// Filter parameters for the notification listing.
#[derive(Debug, Deserialize)]
pub struct ListNotificationsFilter {
    /// When true, only unread notifications are returned.
    pub unread: Option<bool>,
}

/// GET /api/notifications?unread=true|false
pub async fn list_notifications(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(filter): Query<ListNotificationsFilter>,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<serde_json::Value>, AppError> {
    let result = state
        .notification_service
        .list(
            &auth,
            filter.unread.unwrap_or(false),
            pagination.into_page_request(),
        )
        .await?;
    Ok(Json(serde_json::json!({ "success": true, "data": result })))
}

/// GET /api/notifications/unread-count
pub async fn unread_count(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<CountResponse>>, AppError> {
    let count = state.notification_service.unread_count(&auth).await?;
    Ok(Json(ApiResponse::ok(CountResponse { count })))
}

/// POST /api/notifications/{id}/read
pub async fn mark_read(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    state.notification_service.mark_read(&auth, id).await?;
    Ok(Json(
        serde_json::json!({ "success": true, "data": { "message": "Marked as read" } }),
    ))
}

/// DELETE /api/notifications
pub async fn clear_all(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<serde_json::Value>, AppError> {
    let removed = state.notification_service.clear_all(&auth).await?;
    Ok(Json(
        serde_json::json!({ "success": true, "data": { "removed": removed } }),
    ))
}
