// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Mapty API Server
//!
//! Records running and cycling workouts placed on a map and keeps them in a
//! local storage file across restarts.

use mapty::{
    config::Config,
    db::FileBlobStore,
    services::{geolocation::PositionSource, WorkoutStore},
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging()?;

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(port = config.port, "Starting Mapty API");

    // Open local storage
    let blobs = FileBlobStore::new(&config.storage_path);
    tracing::info!(path = %blobs.path().display(), "Using local storage file");
    let store = WorkoutStore::new(Box::new(blobs));

    let locator = PositionSource::from_config(&config);

    // Build shared state (restores saved workouts into the list)
    let state = Arc::new(AppState::new(config.clone(), store, locator));

    // Position lookup runs once, in the background
    mapty::spawn_map_loader(state.clone());

    // Build router
    let app = mapty::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
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

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("mapty=debug".parse()?)
                .add_directive("info".parse()?),
        )
        .with(format)
        .init();
    Ok(())
}
