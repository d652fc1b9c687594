// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the application.

pub mod form;
pub mod map;
pub mod workout;

pub use form::{FormRow, WorkoutForm};
pub use map::{MapView, Marker, PanOptions, PopupOptions};
pub use workout::{Coords, Workout, WorkoutId, WorkoutKind, WorkoutType};
