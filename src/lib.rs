// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Mapty: record running and cycling workouts on a map.
//!
//! This crate provides the workout model, the controller that keeps the
//! workout list, the map markers and local storage in sync, and an HTTP API
//! a thin map frontend can drive.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use config::Config;
use services::geolocation::{Geolocator, PositionSource};
use services::{HtmlWorkoutList, MapBinder, RecordingMap, WorkoutController, WorkoutStore};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Shared application state.
///
/// The controller sits behind one async mutex so each event is handled to
/// completion before the next one starts.
pub struct AppState {
    pub config: Config,
    pub controller: Mutex<WorkoutController>,
    pub locator: PositionSource,
}

impl AppState {
    /// Build the state and restore saved workouts from `store`.
    pub fn new(config: Config, store: WorkoutStore, locator: PositionSource) -> Self {
        let map = MapBinder::new(RecordingMap::default(), config.map_zoom);
        let controller = WorkoutController::new(store, map, HtmlWorkoutList::new());
        Self {
            config,
            controller: Mutex::new(controller),
            locator,
        }
    }
}

/// Request the position once and hand the result to the controller.
pub async fn locate_and_load_map(state: &AppState) {
    let position = state.locator.locate().await;
    state.controller.lock().await.on_position(position);
}

/// Run the position lookup in the background.
pub fn spawn_map_loader(state: Arc<AppState>) {
    tokio::spawn(async move {
        locate_and_load_map(&state).await;
    });
}
