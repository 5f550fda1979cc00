//! Reclaim server — lost-and-found item registry.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use reclaim_core::config::AppConfig;
use reclaim_core::error::AppError;
use reclaim_service::ports::{ItemStore, NotificationStore, PushChannel};

#[tokio::main]
async fn main() {
    let env = std::env::var("RECLAIM_ENV").unwrap_or_else(|_| "development".to_string());
    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Reclaim v{}", env!("CARGO_PKG_VERSION"));

    // ── Database connection + migrations ─────────────────────────
    let db_pool = reclaim_database::DatabasePool::connect(&config.database)
        .await?
        .into_pool();
    reclaim_database::migration::run_migrations(&db_pool).await?;

    // ── Repositories ─────────────────────────────────────────────
    let item_repo = Arc::new(reclaim_database::repositories::ItemRepository::new(
        db_pool.clone(),
    ));
    let category_repo = Arc::new(reclaim_database::repositories::CategoryRepository::new(
        db_pool.clone(),
    ));
    let notification_repo = Arc::new(reclaim_database::repositories::NotificationRepository::new(
        db_pool.clone(),
    ));

    // ── Realtime engine ──────────────────────────────────────────
    let realtime = Arc::new(reclaim_realtime::connection::ConnectionManager::new(
        config.realtime.clone(),
    ));

    // ── Services ─────────────────────────────────────────────────
    let item_store: Arc<dyn ItemStore> = item_repo.clone();
    let notification_store: Arc<dyn NotificationStore> = notification_repo.clone();
    let push_channel: Arc<dyn PushChannel> = realtime.clone();

    let item_service = Arc::new(reclaim_service::item::ItemService::new(
        Arc::clone(&item_repo),
        Arc::clone(&category_repo),
    ));
    let category_service = Arc::new(reclaim_service::category::CategoryService::new(Arc::clone(
        &category_repo,
    )));
    let claim_service = Arc::new(reclaim_service::claim::ClaimService::new(
        item_store,
        Arc::clone(&notification_store),
        push_channel,
    ));
    let notification_service = Arc::new(reclaim_service::notification::NotificationService::new(
        notification_store,
    ));
    let report_service = Arc::new(reclaim_service::report::ReportService::new(Arc::clone(
        &item_repo,
    )));

    // ── Auth ─────────────────────────────────────────────────────
    let jwt_decoder = Arc::new(reclaim_api::auth::JwtDecoder::new(&config.auth));

    // ── HTTP server ──────────────────────────────────────────────
    let addr = format!("{}:{}", config.server.host, config.server.port);

    let app_state = reclaim_api::state::AppState {
        config: Arc::new(config),
        db_pool,
        jwt_decoder,
        realtime,
        item_repo,
        category_repo,
        notification_repo,
        item_service,
        category_service,
        claim_service,
        notification_service,
        report_service,
    };

    let app = reclaim_api::router::build_router(app_state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("Reclaim server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    tracing::info!("Reclaim server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
