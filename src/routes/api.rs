// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API routes driving the workout controller.
//!
//! Each handler locks the controller for its whole run, so events are
//! processed one at a time.

use crate::error::Result;
use crate::models::{
    Coords, FormRow, MapView, Marker, Workout, WorkoutForm, WorkoutId, WorkoutType,
};
use crate::services::controller::FormState;
use crate::services::{MapStatus, PendingIntent};
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// API routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/workouts", get(get_workouts).post(create_workout))
        .route("/api/workouts/list", get(get_list))
        .route("/api/workouts/{id}/select", post(select_workout))
        .route("/api/map", get(get_map))
        .route("/api/map/click", post(click_map))
        .route("/api/form/type", post(select_type))
        .route("/api/form", axum::routing::delete(cancel_form))
        .route("/api/reset", post(reset))
}

// ─── Workouts ────────────────────────────────────────────────

/// All workouts in creation order.
async fn get_workouts(State(state): State<Arc<AppState>>) -> Json<Vec<Workout>> {
    let controller = state.controller.lock().await;
    Json(controller.workouts().to_vec())
}

/// Submit the workout form.
async fn create_workout(
    State(state): State<Arc<AppState>>,
    Json(form): Json<WorkoutForm>,
) -> Result<(StatusCode, Json<Workout>)> {
    let mut controller = state.controller.lock().await;
    let workout = controller.submit(&form)?.clone();
    Ok((StatusCode::CREATED, Json(workout)))
}

#[derive(Serialize)]
pub struct ListResponse {
    /// Rendered entries, newest first
    pub entries: Vec<String>,
}

/// Rendered workout list markup.
async fn get_list(State(state): State<Arc<AppState>>) -> Json<ListResponse> {
    let controller = state.controller.lock().await;
    Json(ListResponse {
        entries: controller.list().entries().to_vec(),
    })
}

/// List entry clicked: recenter the map on that workout.
///
/// Unknown ids are not an error; they answer 204 and change nothing.
async fn select_workout(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Response {
    let mut controller = state.controller.lock().await;
    match controller.select(&WorkoutId::from(id.as_str())) {
        Some(workout) => Json(workout.clone()).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    }
}

// ─── Map ─────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct MapResponse {
    pub status: MapStatus,
    pub view: Option<MapView>,
    pub markers: Vec<Marker>,
    pub pending: Option<PendingIntent>,
    pub form: FormState,
}

/// Current map state for the frontend to draw.
async fn get_map(State(state): State<Arc<AppState>>) -> Json<MapResponse> {
    let controller = state.controller.lock().await;
    let map = controller.map();
    Json(MapResponse {
        status: controller.map_status().clone(),
        view: map.view,
        markers: map.markers.clone(),
        pending: controller.pending(),
        form: controller.form(),
    })
}

#[derive(Deserialize)]
struct ClickRequest {
    lat: f64,
    lng: f64,
}

/// Map clicked: open the form at that location.
async fn click_map(
    State(state): State<Arc<AppState>>,
    Json(click): Json<ClickRequest>,
) -> Result<Json<PendingIntent>> {
    if !click.lat.is_finite() || !click.lng.is_finite() {
        return Err(crate::error::AppError::BadRequest(
            "Click coordinates must be finite".to_string(),
        ));
    }
    let mut controller = state.controller.lock().await;
    let intent = controller.show_form(Coords::new(click.lat, click.lng))?;
    Ok(Json(intent))
}

// ─── Form ────────────────────────────────────────────────────

#[derive(Deserialize)]
struct TypeRequest {
    #[serde(rename = "type")]
    workout_type: WorkoutType,
}

#[derive(Serialize)]
pub struct TypeResponse {
    pub visible_row: FormRow,
}

/// Type selector changed.
async fn select_type(
    State(state): State<Arc<AppState>>,
    Json(req): Json<TypeRequest>,
) -> Json<TypeResponse> {
    let mut controller = state.controller.lock().await;
    Json(TypeResponse {
        visible_row: controller.select_type(req.workout_type),
    })
}

/// Close the form without saving.
async fn cancel_form(State(state): State<Arc<AppState>>) -> StatusCode {
    state.controller.lock().await.cancel();
    StatusCode::NO_CONTENT
}

// ─── Reset ───────────────────────────────────────────────────

/// Delete all saved workouts and reload.
///
/// Storage is cleared, the controller starts over from the (now empty)
/// store, and the map waits for a fresh position lookup.
async fn reset(State(state): State<Arc<AppState>>) -> StatusCode {
    {
        let mut controller = state.controller.lock().await;
        controller.reset(state.config.map_zoom);
    }
    tracing::info!("Reset requested, reloading map");
    crate::spawn_map_loader(state);
    StatusCode::NO_CONTENT
}
