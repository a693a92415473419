//! # Cardledger Server
//!
//! Main entry point for the Cardledger application: configuration, logging,
//! dependency injection, database migrations, and the HTTP server with
//! graceful shutdown.

use cardledger_config::{ConfigLoader, LoggingConfig};
use cardledger_core::{HasComponent, LedgerError, LedgerResult};
use cardledger_repository::DatabasePoolInterface;
use cardledger_rest::{create_router, AppState};
use cardledger_service::{CardService, UserService};
use std::sync::Arc;
use tokio::signal;
use tracing::info;

mod di;
mod startup;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Application error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> LedgerResult<()> {
    // Load configuration
    let config_loader = ConfigLoader::from_default_location()?;
    let config = config_loader.get().await;

    // Initialize logging
    init_logging(&config.logging);
    startup::print_banner();

    info!("Starting Cardledger Server...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));
    info!("Environment: {}", config.app.environment);

    // Build DI module - centralized dependency injection
    let module = di::build_module(&config.database).await?;

    // Run migrations
    let db_pool: Arc<dyn DatabasePoolInterface> = module.resolve();
    if config.database.migrate_on_startup {
        db_pool.run_migrations().await?;
    }

    // Resolve services from DI container
    let user_service: Arc<dyn UserService> = module.resolve();
    let card_service: Arc<dyn CardService> = module.resolve();

    // Create application state and router
    let app_state = AppState::new(user_service, card_service);
    let router = create_router(app_state, &config.server);

    // Start HTTP server
    let addr = config.server.addr();
    startup::print_startup_info(config.server.port);
    info!("Starting HTTP server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| LedgerError::Internal(format!("Failed to bind {}: {}", addr, e)))?;

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| LedgerError::Internal(format!("Server error: {}", e)))?;

    db_pool.close().await;
    info!("Server shutdown complete");
    Ok(())
}

fn init_logging(config: &LoggingConfig) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.filter.clone()));

    let registry = tracing_subscriber::registry().with(filter);

    if config.json {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .init();
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            info!("Received terminate signal, initiating graceful shutdown...");
        }
    }
}
