// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::{
    body::Body,
    http::{header, Request, Response, StatusCode},
};
use mapty::config::Config;
use mapty::db::MemoryBlobStore;
use mapty::routes::create_router;
use mapty::services::geolocation::{FixedGeolocator, PositionSource};
use mapty::services::WorkoutStore;
use mapty::AppState;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

/// Create a test app over `blobs` with a position source that resolves
/// immediately (or is denied when `position` is `None`).
///
/// The map is not loaded; call `load_map` to resolve the position.
#[allow(dead_code)]
pub fn create_test_app_with(
    blobs: &MemoryBlobStore,
    position: Option<(f64, f64)>,
) -> (axum::Router, Arc<AppState>) {
    let config = Config::test_default();
    let store = WorkoutStore::new(Box::new(blobs.clone()));
    let locator = PositionSource::Fixed(FixedGeolocator::new(
        position.map(|(lat, lng)| mapty::models::Coords::new(lat, lng)),
    ));

    let state = Arc::new(AppState::new(config, store, locator));
    (create_router(state.clone()), state)
}

/// Test app with a working position and a ready map.
#[allow(dead_code)]
pub async fn create_test_app(blobs: &MemoryBlobStore) -> (axum::Router, Arc<AppState>) {
    let (app, state) = create_test_app_with(blobs, Some((51.5, -0.1)));
    mapty::locate_and_load_map(&state).await;
    (app, state)
}

/// Send a request with an optional JSON body.
#[allow(dead_code)]
pub async fn send(
    app: &axum::Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(request).await.unwrap()
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn json_body(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Click the map and submit a form, asserting the workout was created.
#[allow(dead_code)]
pub async fn create_workout(app: &axum::Router, lat: f64, lng: f64, form: Value) -> Value {
    let response = send(
        app,
        "POST",
        "/api/map/click",
        Some(serde_json::json!({ "lat": lat, "lng": lng })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send(app, "POST", "/api/workouts", Some(form)).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    json_body(response).await
}
