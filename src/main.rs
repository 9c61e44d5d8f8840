// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! WoW PvP Lookup API Server
//!
//! Serves character profiles and PvP ratings from the Blizzard API, or
//! fixture data when no credentials are configured.

use wow_pvp_lookup::{config::Config, AppState};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging()?;

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(
        port = config.port,
        mock_mode = config.is_mock_mode(),
        "Starting WoW PvP Lookup API"
    );

    let port = config.port;
    let state = Arc::new(AppState::from_config(config)?);

    // Build router
    let app = wow_pvp_lookup::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() -> Result<(), Box<dyn std::error::Error>> {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    let filter = EnvFilter::from_default_env()
        .add_directive("wow_pvp_lookup=debug".parse()?)
        .add_directive("info".parse()?);

    tracing_subscriber::registry().with(filter).with(format).init();
    Ok(())
}
