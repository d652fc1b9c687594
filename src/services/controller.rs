// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout controller.
//!
//! Owns the workout collection and keeps the map markers, the rendered list
//! and the stored blob in step with it. Creating a workout goes:
//! 1. Map click opens the form and records a pending location
//! 2. Form submit validates the fields for the selected type
//! 3. The workout is built and appended to the collection
//! 4. Marker, list entry and storage are updated
//! 5. The form is hidden
//!
//! A failed validation leaves the collection, the pending location and the
//! open form untouched.

use crate::error::{AppError, Result};
use crate::models::{Coords, FormRow, Workout, WorkoutForm, WorkoutId, WorkoutType};
use crate::services::geolocation::{GeolocationError, POSITION_ALERT};
use crate::services::map::{MapBinder, MapStatus, MapSurface, PendingIntent, RecordingMap};
use crate::services::persistence::WorkoutStore;
use crate::services::render::{HtmlWorkoutList, ListRenderer};
use serde::Serialize;

/// Alert text shown when form validation fails.
pub const INVALID_INPUT_ALERT: &str = "Inputs have to be positive numbers!";

/// Form visibility and selected type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FormState {
    pub open: bool,
    #[serde(rename = "type")]
    pub workout_type: WorkoutType,
    pub visible_row: FormRow,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            open: false,
            workout_type: WorkoutType::Running,
            visible_row: FormRow::Cadence,
        }
    }
}

/// Rejected form input. `field` is the first offending field.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Inputs have to be positive numbers!")]
pub struct ValidationError {
    pub field: &'static str,
}

/// Form input that passed validation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ValidatedWorkout {
    Running {
        distance: f64,
        duration: f64,
        cadence: f64,
    },
    Cycling {
        distance: f64,
        duration: f64,
        elevation_gain: f64,
    },
}

impl ValidatedWorkout {
    fn build(self, coords: Coords) -> Workout {
        match self {
            ValidatedWorkout::Running {
                distance,
                duration,
                cadence,
            } => Workout::running(coords, distance, duration, cadence),
            ValidatedWorkout::Cycling {
                distance,
                duration,
                elevation_gain,
            } => Workout::cycling(coords, distance, duration, elevation_gain),
        }
    }
}

/// Read a numeric form field: blank is 0, anything unparseable is NaN.
///
/// Unsigned `0x`, `0o` and `0b` integer literals are accepted as well.
fn parse_number(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    let radix = match trimmed.get(..2) {
        Some("0x" | "0X") => 16,
        Some("0o" | "0O") => 8,
        Some("0b" | "0B") => 2,
        _ => return trimmed.parse().unwrap_or(f64::NAN),
    };
    let digits = &trimmed[2..];
    if digits.is_empty() {
        return f64::NAN;
    }
    digits
        .chars()
        .try_fold(0.0, |acc: f64, c| {
            c.to_digit(radix).map(|d| acc * f64::from(radix) + f64::from(d))
        })
        .unwrap_or(f64::NAN)
}

/// Validate form input for the selected workout type.
///
/// All fields must be finite. Distance, duration and cadence must also be
/// positive; elevation gain may be zero or negative. The derived pace or
/// speed must be finite too, since storage cannot hold an infinite value.
pub fn validate(form: &WorkoutForm) -> std::result::Result<ValidatedWorkout, ValidationError> {
    let finite = |field: &'static str, raw: &str| -> std::result::Result<f64, ValidationError> {
        let value = parse_number(raw);
        if value.is_finite() {
            Ok(value)
        } else {
            Err(ValidationError { field })
        }
    };
    let positive = |field: &'static str, raw: &str| -> std::result::Result<f64, ValidationError> {
        let value = finite(field, raw)?;
        if value > 0.0 {
            Ok(value)
        } else {
            Err(ValidationError { field })
        }
    };

    let distance = positive("distance", &form.distance)?;
    let duration = positive("duration", &form.duration)?;

    match form.workout_type {
        WorkoutType::Running => {
            let cadence = positive("cadence", &form.cadence)?;
            if !(duration / distance).is_finite() {
                return Err(ValidationError { field: "pace" });
            }
            Ok(ValidatedWorkout::Running {
                distance,
                duration,
                cadence,
            })
        }
        WorkoutType::Cycling => {
            let elevation_gain = finite("elevation", &form.elevation)?;
            if !(distance / (duration / 60.0)).is_finite() {
                return Err(ValidationError { field: "speed" });
            }
            Ok(ValidatedWorkout::Cycling {
                distance,
                duration,
                elevation_gain,
            })
        }
    }
}

/// Owner of the workout collection and the creation workflow.
pub struct WorkoutController<M: MapSurface = RecordingMap, L: ListRenderer = HtmlWorkoutList> {
    workouts: Vec<Workout>,
    map: MapBinder<M>,
    list: L,
    store: WorkoutStore,
    form: FormState,
}

impl<M: MapSurface, L: ListRenderer> WorkoutController<M, L> {
    /// Restore stored workouts and render them into the list.
    ///
    /// Markers are not drawn here; they are drawn once the map is ready.
    pub fn new(store: WorkoutStore, map: MapBinder<M>, mut list: L) -> Self {
        let workouts = store.load();
        for workout in &workouts {
            list.render(workout);
        }
        tracing::info!(count = workouts.len(), "Restored workouts");

        Self {
            workouts,
            map,
            list,
            store,
            form: FormState::default(),
        }
    }

    /// Resolve the startup position lookup.
    ///
    /// On success the map is created and every restored workout gets its
    /// marker. On failure the map stays uninitialized for good.
    pub fn on_position(&mut self, position: std::result::Result<Coords, GeolocationError>) {
        match position {
            Ok(coords) => {
                if self.map.initialize(coords) {
                    for workout in &self.workouts {
                        self.map.render_marker(workout);
                    }
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "{}", POSITION_ALERT);
                self.map.fail(POSITION_ALERT);
            }
        }
    }

    /// Map click: open the form for a new workout at `coords`.
    pub fn show_form(&mut self, coords: Coords) -> Result<PendingIntent> {
        let intent = self.map.click(coords).ok_or(AppError::MapNotReady)?;
        self.form.open = true;
        tracing::debug!(lat = coords.lat, lng = coords.lng, "Form opened");
        Ok(intent)
    }

    /// Type selector changed: show the matching type-specific row.
    pub fn select_type(&mut self, workout_type: WorkoutType) -> FormRow {
        self.form.workout_type = workout_type;
        self.form.visible_row = FormRow::from(workout_type);
        self.form.visible_row
    }

    /// Form submit: validate, then commit a new workout.
    pub fn submit(&mut self, form: &WorkoutForm) -> Result<&Workout> {
        if self.map.pending().is_none() {
            return Err(AppError::NoPendingLocation);
        }

        let validated = validate(form).inspect_err(|e| {
            tracing::info!(
                field = e.field,
                workout_type = %form.workout_type,
                "Rejected workout input"
            );
        })?;

        let intent = self
            .map
            .take_pending()
            .ok_or(AppError::NoPendingLocation)?;
        let workout = validated.build(intent.coords);

        tracing::info!(
            id = %workout.id(),
            workout_type = %workout.workout_type(),
            distance = workout.distance(),
            duration = workout.duration(),
            "Workout created"
        );

        let index = self.workouts.len();
        self.workouts.push(workout);
        let workout = &self.workouts[index];
        self.map.render_marker(workout);
        self.list.render(workout);
        self.store.save(&self.workouts);
        self.form.open = false;

        Ok(&self.workouts[index])
    }

    /// Close the form without committing, dropping the pending location.
    pub fn cancel(&mut self) {
        self.map.discard_pending();
        self.form.open = false;
    }

    /// List entry click: find the workout by id and move the map to it.
    ///
    /// Unknown ids are ignored.
    pub fn select(&mut self, id: &WorkoutId) -> Option<&Workout> {
        let Some(workout) = self.workouts.iter_mut().find(|w| w.id() == id) else {
            tracing::debug!(id = %id, "No workout for selected entry");
            return None;
        };

        workout.click();
        self.map.recenter(workout.coords());
        Some(&*workout)
    }

    pub fn workouts(&self) -> &[Workout] {
        &self.workouts
    }

    pub fn form(&self) -> FormState {
        self.form
    }

    pub fn pending(&self) -> Option<PendingIntent> {
        self.map.pending()
    }

    pub fn map_status(&self) -> &MapStatus {
        self.map.status()
    }

    pub fn map(&self) -> &M {
        self.map.surface()
    }

    pub fn list(&self) -> &L {
        &self.list
    }
}

impl<M: MapSurface + Default, L: ListRenderer + Default> WorkoutController<M, L> {
    /// Drop all saved workouts and start over as if freshly loaded.
    ///
    /// The map goes back to waiting for a position.
    pub fn reset(&mut self, zoom: u8) {
        self.store.clear();
        self.workouts = self.store.load();
        self.map = MapBinder::new(M::default(), zoom);
        self.list = L::default();
        self.form = FormState::default();
        tracing::info!("Workouts reset");
    }
}
