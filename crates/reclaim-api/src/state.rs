//! Application state shared across all handlers.

use std::sync::Arc;

use sqlx::PgPool;

use reclaim_core::config::AppConfig;
use reclaim_database::repositories::{CategoryRepository, ItemRepository, NotificationRepository};
use reclaim_realtime::connection::ConnectionManager;
use reclaim_service::category::CategoryService;
use reclaim_service::claim::ClaimService;
use reclaim_service::item::ItemService;
use reclaim_service::notification::NotificationService;
use reclaim_service::report::ReportService;

use crate::auth::JwtDecoder;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`. All fields are
/// `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// PostgreSQL connection pool.
    pub db_pool: PgPool,
    /// JWT token decoder and validator.
    pub jwt_decoder: Arc<JwtDecoder>,
    /// WebSocket connection manager (the live push channel).
    pub realtime: Arc<ConnectionManager>,

    /// Item repository.
    pub item_repo: Arc<ItemRepository>,
    /// Category repository.
    pub category_repo: Arc<CategoryRepository>,
    /// Notification repository.
    pub notification_repo: Arc<NotificationRepository>,

    /// Item service.
    pub item_service: Arc<ItemService>,
    /// Category service.
    pub category_service: Arc<CategoryService>,
    /// Claim workflow engine.
    pub claim_service: Arc<ClaimService>,
    /// Notification service.
    pub notification_service: Arc<NotificationService>,
    /// Report service.
    pub report_service: Arc<ReportService>,
}
