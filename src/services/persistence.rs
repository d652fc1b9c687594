// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout collection persistence over a blob store.
//!
//! The whole ordered collection is written as one JSON array under a fixed
//! key. Loading deserializes the stored records directly, so derived fields
//! come back exactly as they were saved.

use crate::db::{keys, BlobStore};
use crate::models::Workout;

/// Saves and restores the workout collection.
pub struct WorkoutStore {
    blobs: Box<dyn BlobStore>,
}

impl WorkoutStore {
    pub fn new(blobs: Box<dyn BlobStore>) -> Self {
        Self { blobs }
    }

    /// Overwrite the stored collection. Write failures are logged, not retried.
    pub fn save(&mut self, workouts: &[Workout]) {
        let json = match serde_json::to_string(workouts) {
            Ok(json) => json,
            Err(e) => {
                tracing::error!(error = %e, "Failed to serialize workouts");
                return;
            }
        };

        match self.blobs.set_item(keys::WORKOUTS, &json) {
            Ok(()) => tracing::debug!(count = workouts.len(), "Workouts saved"),
            Err(e) => tracing::error!(error = %e, "Failed to save workouts"),
        }
    }

    /// Read the stored collection.
    ///
    /// Absent, unreadable or malformed data all read as an empty collection.
    pub fn load(&self) -> Vec<Workout> {
        let raw = match self.blobs.get_item(keys::WORKOUTS) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read stored workouts");
                return Vec::new();
            }
        };

        // `null` is what an empty browser slot parses to.
        match serde_json::from_str::<Option<Vec<Workout>>>(&raw) {
            Ok(workouts) => {
                let workouts = workouts.unwrap_or_default();
                tracing::debug!(count = workouts.len(), "Workouts loaded");
                workouts
            }
            Err(e) => {
                tracing::warn!(error = %e, "Stored workouts are malformed, ignoring");
                Vec::new()
            }
        }
    }

    /// Remove the stored collection.
    pub fn clear(&mut self) {
        if let Err(e) = self.blobs.remove_item(keys::WORKOUTS) {
            tracing::error!(error = %e, "Failed to clear stored workouts");
        }
    }

    /// The raw stored blob, if any.
    pub fn raw(&self) -> Option<String> {
        self.blobs.get_item(keys::WORKOUTS).ok().flatten()
    }
}
