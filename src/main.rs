//! VPNHub Server: account management API for a VPN subscription service.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{EnvFilter, fmt};

use vpnhub_api::AppState;
use vpnhub_core::config::AppConfig;
use vpnhub_core::error::AppError;
use vpnhub_database::{AccountRepository, AccountStore, DatabasePool};
use vpnhub_worker::{CronScheduler, ExpirySweeper};

#[tokio::main]
async fn main() {
    // Later files never override variables that are already set.
    let _ = dotenv::from_filename(".env.local");
    let _ = dotenv::dotenv();

    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Load configuration from files and environment
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("VPNHUB_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
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
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting VPNHub v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Database connection + migrations ─────────────────
    let db = DatabasePool::connect(&config.database).await?;
    let store: Arc<dyn AccountStore> = Arc::new(AccountRepository::new(db.pool()));

    // ── Step 2: Auth system and services ─────────────────────────
    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);
    let worker_config = config.worker.clone();
    let state = AppState::new(config, Arc::clone(&store))?;
    tracing::info!("Services initialized");

    // ── Step 3: Expiry sweep scheduler ───────────────────────────
    let mut scheduler = if worker_config.enabled {
        let scheduler = CronScheduler::new().await?;
        scheduler
            .register_expiry_sweep(ExpirySweeper::new(Arc::clone(&store)), &worker_config)
            .await?;
        scheduler.start().await?;
        Some(scheduler)
    } else {
        tracing::info!("Expiry sweep disabled");
        None
    };

    // ── Step 4: HTTP server until shutdown signal ────────────────
    let served = vpnhub_api::app::run_server(state, async {
        shutdown_signal().await;
        tracing::info!("Shutdown signal received, starting graceful shutdown...");
    })
    .await;

    // ── Step 5: Stop background work and close the pool ──────────
    if let Some(scheduler) = scheduler.as_mut() {
        match tokio::time::timeout(grace, scheduler.shutdown()).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => tracing::warn!(error = %e, "Scheduler shutdown failed"),
            Err(_) => tracing::warn!("Scheduler did not stop within the grace period"),
        }
    }
    db.close().await;

    served?;
    tracing::info!("VPNHub server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
