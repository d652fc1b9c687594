// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Values passed to and recorded from the map surface.

use crate::models::{Coords, Workout};
use serde::Serialize;

/// Popup settings attached to each workout marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PopupOptions {
    pub max_width: u32,
    pub min_width: u32,
    pub auto_close: bool,
    pub close_on_click: bool,
    pub class_name: String,
}

impl PopupOptions {
    pub fn for_workout(workout: &Workout) -> Self {
        Self {
            max_width: 250,
            min_width: 100,
            auto_close: false,
            close_on_click: false,
            class_name: workout.workout_type().popup_class(),
        }
    }
}

/// A marker placed on the map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub coords: Coords,
    pub popup: PopupOptions,
    pub content: String,
}

/// Animation used when moving the view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PanOptions {
    pub animate: bool,
    pub duration_secs: f64,
}

impl Default for PanOptions {
    fn default() -> Self {
        Self {
            animate: true,
            duration_secs: 1.0,
        }
    }
}

/// Current map center and zoom.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MapView {
    pub center: Coords,
    pub zoom: u8,
}
