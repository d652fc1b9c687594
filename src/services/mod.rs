// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod controller;
pub mod geolocation;
pub mod map;
pub mod persistence;
pub mod render;

pub use controller::{ValidationError, WorkoutController};
pub use geolocation::{GeolocationError, Geolocator, PositionSource};
pub use map::{MapBinder, MapStatus, MapSurface, PendingIntent, RecordingMap};
pub use persistence::WorkoutStore;
pub use render::{HtmlWorkoutList, ListRenderer};
