//! Spicetable HTTP server binary.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use spicetable_db::{Database, DbConfig};
use spicetable_server::config::Config;
use spicetable_server::notify::EmailNotifier;
use spicetable_server::{routes, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("Starting Spicetable server...");

    let config = Config::load()?;
    info!(
        port = config.port,
        db_url = %config.database_url.chars().take(30).collect::<String>(),
        "Configuration loaded"
    );

    let db = Database::new(DbConfig::from_url(&config.database_url)).await?;
    info!("Connected to SQLite");

    let notifier = Arc::new(EmailNotifier::new(config.smtp_email.clone()));
    let state = Arc::new(AppState::new(&db, config.clone(), notifier));

    state.seed().await?;
    info!("Catalog and admin account seeded");

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "Starting HTTP server");

    axum::serve(listener, routes::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown...");
}
