//! Health check handlers (no auth required).

use axum::Json;
use axum::extract::State;

use reclaim_core::error::AppError;

use crate::state::AppState;

/// GET /api/health
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// GET /api/health/detailed
pub async fn detailed_health(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, AppError> {
    let database = sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(&state.db_pool)
        .await
        .is_ok();

    Ok(Json(serde_json::json!({
        "status": if database { "ok" } else { "degraded" },
        "database": database,
        "connections": state.realtime.connection_count(),
    })))
}
