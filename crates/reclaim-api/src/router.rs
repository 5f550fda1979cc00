//! Route definitions for the Reclaim HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`.
//! The router receives `AppState` and passes it to all handlers via
//! Axum's `State` extractor.

use axum::{
    Router,
    routing::{delete, get, post, put},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(item_routes())
        .merge(claim_routes())
        .merge(category_routes())
        .merge(notification_routes())
        .merge(report_routes())
        .merge(health_routes());

    let ws_routes = Router::new().route("/ws", get(handlers::ws::ws_upgrade));

    let cors = build_cors_layer(&state);

    Router::new()
        .nest("/api", api_routes)
        .merge(ws_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Item report CRUD
fn item_routes() -> Router<AppState> {
    Router::new()
        .route("/items", get(handlers::item::list_items))
        .route("/items", post(handlers::item::create_item))
        .route("/items/{id}", get(handlers::item::get_item))
        .route("/items/{id}", put(handlers::item::update_item))
        .route("/items/{id}", delete(handlers::item::delete_item))
}

/// Claim workflow endpoints
fn claim_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/items/{id}/claim-attempts",
            post(handlers::claim::submit_claim_attempt),
        )
        .route(
            "/items/{id}/verification-question",
            get(handlers::claim::verification_question),
        )
        .route(
            "/items/{id}/claims/{claimant_id}/approve",
            post(handlers::claim::approve_claim),
        )
        .route(
            "/items/{id}/claims/{claimant_id}/reject",
            post(handlers::claim::reject_claim),
        )
}

/// Category endpoints
fn category_routes() -> Router<AppState> {
    Router::new()
        .route("/categories", get(handlers::category::list_categories))
        .route("/categories", post(handlers::category::create_category))
        .route(
            "/categories/item-counts",
            get(handlers::category::item_counts),
        )
        .route("/categories/{id}", get(handlers::category::get_category))
        .route(
            "/categories/{id}",
            put(handlers::category::update_category),
        )
        .route(
            "/categories/{id}",
            delete(handlers::category::delete_category),
        )
}

/// Notification endpoints
fn notification_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/notifications",
            get(handlers::notification::list_notifications),
        )
        .route(
            "/notifications",
            delete(handlers::notification::clear_all),
        )
        .route(
            "/notifications/unread-count",
            get(handlers::notification::unread_count),
        )
        .route(
            "/notifications/{id}/read",
            post(handlers::notification::mark_read),
        )
}

/// Reporting endpoints
fn report_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/reports/claimed-items",
            get(handlers::report::claimed_items),
        )
        .route(
            "/reports/frequent-lost-items",
            get(handlers::report::frequent_lost_items),
        )
}

/// Health check endpoints (no auth required)
fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/health/detailed", get(handlers::health::detailed_health))
}

/// Build CORS layer from configuration
fn build_cors_layer(state: &AppState) -> CorsLayer {
    use tower_http::cors::Any;

    let cors_config = &state.config.server.cors;

    let mut cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if cors_config.allowed_origins.contains(&"*".to_string()) {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<axum::http::HeaderValue> = cors_config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors = cors.allow_origin(origins);
    }

    cors.max_age(std::time::Duration::from_secs(cors_config.max_age_seconds))
}
