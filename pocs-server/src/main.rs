use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use pocs_core::WordList;
use pocs_server::{
    config::Config, create_routes, datasets::Datasets, session_manager::SessionManager,
};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = run().await {
        error!("Server failed: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    info!("Starting POCs server...");

    let config = Config::from_env().context("invalid configuration")?;

    let words = match &config.words_file {
        Some(path) => {
            info!("Loading words from file: {}", path);
            WordList::from_file(path)
                .with_context(|| format!("failed to load words from '{}'", path))?
        }
        None => WordList::builtin(),
    };
    info!("Hangman word list has {} words", words.len());

    let session_manager = Arc::new(SessionManager::new(words));
    let datasets = Arc::new(Datasets::from_config(&config));
    info!("Using ODWB API at {}", config.odwb_base_url);

    let routes = create_routes(session_manager.clone(), datasets);

    // Start cleanup task
    let cleanup_session_manager = session_manager.clone();
    let session_timeout = config.session_timeout();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(30));
        loop {
            interval.tick().await;
            let removed = cleanup_session_manager
                .cleanup_expired_sessions(session_timeout)
                .await;
            if removed > 0 {
                info!("Cleaned up {} idle sessions", removed);
            }
        }
    });

    let host: IpAddr = config
        .host
        .parse()
        .with_context(|| format!("invalid HOST '{}'", config.host))?;

    info!("Server starting on {}:{}", config.host, config.port);
    let (addr, server) = warp::serve(routes)
        .try_bind_with_graceful_shutdown((host, config.port), shutdown_signal())?;

    info!("Server started successfully on {}. Press Ctrl+C to stop.", addr);
    server.await;
    info!("Server shutdown complete.");
    Ok(())
}

/// Wait for SIGINT (Ctrl+C) or SIGTERM
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        let mut sigint = match signal::unix::signal(signal::unix::SignalKind::interrupt()) {
            Ok(sigint) => sigint,
            Err(e) => {
                error!("Failed to install SIGINT handler: {}", e);
                return std::future::pending().await;
            }
        };
        let mut sigterm = match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(sigterm) => sigterm,
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                return std::future::pending().await;
            }
        };

        tokio::select! {
            _ = sigint.recv() => {
                info!("Received SIGINT, shutting down gracefully...");
            }
            _ = sigterm.recv() => {
                info!("Received SIGTERM, shutting down gracefully...");
            }
        }
    }

    #[cfg(not(unix))]
    {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for ctrl+c: {}", e);
            return std::future::pending().await;
        }
        info!("Received Ctrl+C, shutting down gracefully...");
    }
}
