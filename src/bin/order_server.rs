//! Order service entry point.
//!
//! Boots configuration, database, messaging, and the resilience layer, then
//! serves the web API until SIGINT/SIGTERM.

use std::sync::Arc;

use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use tokio::signal;
use tracing::info;

use order_core::config::ConfigManager;
use order_core::events::QueuedEventPublisher;
use order_core::inventory::ProtectedInventoryClient;
use order_core::logging::init_structured_logging;
use order_core::messaging::OrderQueueClient;
use order_core::orchestration::OrderPlacementService;
use order_core::resilience::CircuitBreakerManager;
use order_core::store::PgOrderStore;
use order_core::web::{create_app, AppState};

static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

/// Waits for a shutdown signal (SIGINT or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install SIGINT handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("received SIGINT, starting graceful shutdown");
        }
        () = terminate => {
            info!("received SIGTERM, starting graceful shutdown");
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_structured_logging();

    let config_manager = ConfigManager::load().context("Failed to load configuration")?;
    let config = config_manager.config();
    let environment = config_manager.environment();

    let database_url = config.database.database_url(environment);
    let pool = PgPoolOptions::new()
        .max_connections(config.database.pool)
        .connect(&database_url)
        .await
        .context("Failed to connect to PostgreSQL")?;

    MIGRATOR
        .run(&pool)
        .await
        .context("Failed to apply database migrations")?;
    info!("Database migrations applied");

    let queue_client = OrderQueueClient::new_with_pool(pool.clone()).await;
    queue_client
        .create_queue(&config.events.queue_name)
        .await
        .with_context(|| format!("Failed to create queue '{}'", config.events.queue_name))?;

    let circuit_manager = Arc::new(CircuitBreakerManager::from_config(&config.circuit_breakers));
    let availability = Arc::new(
        ProtectedInventoryClient::new(&config.inventory, Arc::clone(&circuit_manager))
            .context("Failed to create inventory client")?,
    );
    let store = Arc::new(PgOrderStore::new(pool.clone()));
    let publisher = Arc::new(QueuedEventPublisher::new(
        queue_client,
        config.events.queue_name.clone(),
    ));

    let order_placement = Arc::new(OrderPlacementService::new(availability, store, publisher));
    let app = create_app(AppState::new(order_placement));

    let listen_address = config.http.listen_address();
    info!(
        environment = environment,
        listen_address = listen_address,
        "🚀 Starting order service"
    );

    let listener = tokio::net::TcpListener::bind(&listen_address)
        .await
        .with_context(|| format!("Failed to bind {listen_address}"))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    info!("Server shut down gracefully");
    Ok(())
}
