//! Market data HTTP server.
//!
//! Binds the configured address and serves the dashboard routes:
//!
//! - `/api/market-overview`: four static index cards.
//! - `/api/stock-data?symbol=&period=`: a fresh random snapshot per call.
//! - `/api/stock-search?q=`: case-insensitive catalog search.
//! - `/api/ticker`: the ticker tape.
//! - `/api/health`: liveness and configured sources.
//!
//! Requests share no mutable state; the process stops on Ctrl+C after in-flight
//! requests finish.
#![warn(missing_docs)]
use std::sync::Arc;

use log::info;
use market_common::MarketError;
use market_common::Result;
use market_server::config::loopback;
use market_server::{AppState, Config, app_router};

#[tokio::main]
async fn main() -> Result<(), MarketError> {
    init_logger();
    let config = Config::load();
    info!(
        "Starting market server (generation: {}, catalog: {:?})",
        config.generation, config.catalog
    );

    let state = Arc::new(AppState::from_config(&config)?);
    let router = app_router(state, &config.cors_allow);

    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    info!(
        "HTTP server listening on {} (local: http://{})",
        listener.local_addr()?,
        loopback(config.listen_addr.port())
    );
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Ctrl+C received. Shutting down server...");
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}
