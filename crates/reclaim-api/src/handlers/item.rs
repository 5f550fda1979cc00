//! Item report handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;
use validator::Validate;

use reclaim_core::error::AppError;
use reclaim_entity::item::ItemType;

use crate::dto::request::{CreateItemRequest, UpdateItemRequest};
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// Filter parameters for the item listing.
#[derive(Debug, Deserialize)]
pub struct ListItemsFilter {
    /// Filter by item type.
    #[serde(rename = "type")]
    pub item_type: Option<ItemType>,
    /// Filter by category.
    pub category: Option<i64>,
}

/// GET /api/items
pub async fn list_items(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(filter): Query<ListItemsFilter>,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<serde_json::Value>, AppError> {
    let result = state
        .item_service
        .list(
            filter.item_type,
            filter.category,
            pagination.into_page_request(),
        )
        .await?;
    Ok(Json(serde_json::json!({ "success": true, "data": result })))
}

/// GET /api/items/{id}
pub async fn get_item(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    let item = state.item_service.get(id).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": item })))
}

/// POST /api/items
pub async fn create_item(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateItemRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let item = state
        .item_service
        .create(&auth, req.into_create_item())
        .await?;
    Ok(Json(serde_json::json!({ "success": true, "data": item })))
}

/// PUT /api/items/{id}
pub async fn update_item(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
    Json(req): Json<UpdateItemRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let item = state
        .item_service
        .update(&auth, id, req.into_update_item())
        .await?;
    Ok(Json(serde_json::json!({ "success": true, "data": item })))
}

/// DELETE /api/items/{id}
pub async fn delete_item(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    state.item_service.delete(&auth, id).await?;
    Ok(Json(
        serde_json::json!({ "success": true, "data": { "message": "Item deleted" } }),
    ))
}
