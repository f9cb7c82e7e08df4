//! SyncPlay server - main entry point
//!
//! One shared "now playing" timeline, synchronized in real time across a
//! display and any number of controllers over a WebSocket channel.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use syncplay_server::api::{self, AppState};
use syncplay_server::catalog::Catalog;
use syncplay_server::config::Config;
use syncplay_server::hub::SyncHub;

/// Command-line arguments for syncplay-server
#[derive(Parser, Debug)]
#[command(name = "syncplay-server")]
#[command(about = "Shared playback synchronization server for SyncPlay")]
#[command(version)]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "3001", env = "SYNCPLAY_PORT")]
    port: u16,

    /// Path to the track catalog JSON file
    #[arg(short, long, default_value = "songs.json", env = "SYNCPLAY_CATALOG")]
    catalog: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "syncplay_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let config = Config {
        port: args.port,
        catalog_path: args.catalog,
    };

    info!("Starting SyncPlay server on port {}", config.port);

    // Load the read-only catalog once at startup
    let catalog = Arc::new(
        Catalog::load(&config.catalog_path)
            .context("Failed to load track catalog")?,
    );

    // Spawn the hub task that owns all playback state
    let hub = SyncHub::spawn(catalog.clone());

    let app = api::create_router(AppState { hub, catalog });

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("Starting HTTP server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
