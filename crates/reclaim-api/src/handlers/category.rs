//! Category handlers.

use axum::Json;
use axum::extract::{Path, State};
use validator::Validate;

use reclaim_core::error::AppError;

use crate::dto::request::CategoryRequest;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/categories
pub async fn list_categories(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<Json<serde_json::Value>, AppError> {
    let categories = state.category_service.list().await?;
    Ok(Json(
        serde_json::json!({ "success": true, "data": categories }),
    ))
}

/// GET /api/categories/{id}
pub async fn get_category(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    let category = state.category_service.get(id).await?;
    Ok(Json(
        serde_json::json!({ "success": true, "data": category }),
    ))
}

/// POST /api/categories
pub async fn create_category(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(req): Json<CategoryRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let category = state
        .category_service
        .create(req.into_create_category())
        .await?;
    Ok(Json(
        serde_json::json!({ "success": true, "data": category }),
    ))
}

/// PUT /api/categories/{id}
pub async fn update_category(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i64>,
    Json(req): Json<CategoryRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let category = state
        .category_service
        .update(id, req.into_create_category())
        .await?;
    Ok(Json(
        serde_json::json!({ "success": true, "data": category }),
    ))
}

/// DELETE /api/categories/{id}
pub async fn delete_category(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    state.category_service.delete(id).await?;
    Ok(Json(
        serde_json::json!({ "success": true, "data": { "message": "Category deleted" } }),
    ))
}

/// GET /api/categories/item-counts
pub async fn item_counts(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<Json<serde_json::Value>, AppError> {
    let counts = state.category_service.item_counts().await?;
    Ok(Json(serde_json::json!({ "success": true, "data": counts })))
}
