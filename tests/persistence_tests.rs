// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Storage round-trip tests against the real file-backed store.

use mapty::db::{keys, BlobStore, FileBlobStore, MemoryBlobStore};
use mapty::models::{Coords, Workout};
use mapty::services::WorkoutStore;
use serde_json::json;

mod common;

#[test]
fn test_file_store_reload_then_save_is_byte_identical() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("local_storage.json");

    let mut store = WorkoutStore::new(Box::new(FileBlobStore::new(&path)));
    store.save(&[
        Workout::running(Coords::new(10.0, 20.0), 5.0, 25.0, 180.0),
        Workout::cycling(Coords::new(47.37, 8.54), 42.2, 101.0, 640.0),
    ]);
    let original = store.raw().unwrap();

    let reopened = WorkoutStore::new(Box::new(FileBlobStore::new(&path)));
    let loaded = reopened.load();
    assert_eq!(loaded.len(), 2);

    let mut resaved = WorkoutStore::new(Box::new(FileBlobStore::new(&path)));
    resaved.save(&loaded);
    assert_eq!(resaved.raw().unwrap(), original);
}

#[test]
fn test_stored_pace_is_not_recomputed() {
    let mut blobs = MemoryBlobStore::new();
    // pace does not match duration / distance; the stored value wins
    blobs
        .set_item(
            keys::WORKOUTS,
            &json!([{
                "date": "2024-04-14T09:30:00Z", "id": "1713087000", "clicks": 0,
                "type": "running", "coords": [10.0, 20.0], "distance": 5.0,
                "duration": 25.0, "cadence": 180.0, "pace": 9.9,
                "description": "Running on April 14"
            }])
            .to_string(),
        )
        .unwrap();

    let store = WorkoutStore::new(Box::new(blobs));
    let loaded = store.load();
    assert_eq!(loaded[0].pace(), Some(9.9));
}

#[tokio::test]
async fn test_corrupt_blob_starts_empty() {
    let mut blobs = MemoryBlobStore::new();
    blobs.set_item(keys::WORKOUTS, "[{\"broken\":").unwrap();

    let (app, _) = common::create_test_app(&blobs).await;
    let workouts = common::json_body(common::send(&app, "GET", "/api/workouts", None).await).await;
    assert!(workouts.as_array().unwrap().is_empty());

    // The next commit overwrites the corrupt blob.
    common::create_workout(
        &app,
        1.0,
        1.0,
        json!({ "type": "running", "distance": "5", "duration": "25", "cadence": "180" }),
    )
    .await;
    let raw = blobs.get_item(keys::WORKOUTS).unwrap().unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(parsed.as_array().unwrap().len(), 1);
}
