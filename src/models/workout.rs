// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout model: running and cycling sessions with derived metrics.
//!
//! Derived fields (`pace`, `speed`, `description`) are computed once by the
//! constructors. Records read back from storage are deserialized as-is and
//! never recomputed, so a stored value is trusted verbatim.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};

/// Number of trailing clock digits used for a workout id.
const ID_DIGITS: u64 = 10_000_000_000;

/// A map position, stored as `[lat, lng]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coords {
    pub lat: f64,
    pub lng: f64,
}

impl Coords {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl From<[f64; 2]> for Coords {
    fn from([lat, lng]: [f64; 2]) -> Self {
        Self { lat, lng }
    }
}

impl From<Coords> for [f64; 2] {
    fn from(c: Coords) -> Self {
        [c.lat, c.lng]
    }
}

/// Opaque workout identifier, the only key used to find a workout from the UI.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkoutId(String);

static LAST_ID: AtomicU64 = AtomicU64::new(0);

impl WorkoutId {
    /// Generate an id from the last 10 digits of the millisecond clock.
    ///
    /// Ids are strictly increasing within a process, so two workouts created
    /// in the same millisecond still get distinct ids.
    pub fn generate(now: DateTime<Utc>) -> Self {
        let millis = now.timestamp_millis().max(0) as u64 % ID_DIGITS;
        let mut prev = LAST_ID.load(Ordering::Relaxed);
        loop {
            let next = if millis > prev { millis } else { prev + 1 };
            match LAST_ID.compare_exchange_weak(prev, next, Ordering::Relaxed, Ordering::Relaxed) {
                Ok(_) => return Self(format!("{:010}", next % ID_DIGITS)),
                Err(actual) => prev = actual,
            }
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for WorkoutId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl fmt::Display for WorkoutId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Workout discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutType {
    Running,
    Cycling,
}

impl WorkoutType {
    pub fn as_str(self) -> &'static str {
        match self {
            WorkoutType::Running => "running",
            WorkoutType::Cycling => "cycling",
        }
    }

    pub fn capitalized(self) -> &'static str {
        match self {
            WorkoutType::Running => "Running",
            WorkoutType::Cycling => "Cycling",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            WorkoutType::Running => "🏃‍♂️",
            WorkoutType::Cycling => "🚴‍♀️",
        }
    }

    /// CSS class applied to the marker popup.
    pub fn popup_class(self) -> String {
        format!("{}-popup", self.as_str())
    }
}

impl fmt::Display for WorkoutType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WorkoutType {
    type Err = UnknownWorkoutType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "running" => Ok(WorkoutType::Running),
            "cycling" => Ok(WorkoutType::Cycling),
            other => Err(UnknownWorkoutType(other.to_string())),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown workout type: {0}")]
pub struct UnknownWorkoutType(pub String);

/// Variant-specific payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum WorkoutKind {
    Running {
        /// Steps per minute
        cadence: f64,
        /// Minutes per km
        pace: f64,
    },
    Cycling {
        /// Meters, may be zero or negative
        #[serde(rename = "elevationGain")]
        elevation_gain: f64,
        /// Km per hour
        speed: f64,
    },
}

/// A recorded workout.
///
/// Everything is immutable after construction except `clicks`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    #[serde(rename = "date")]
    created_at: DateTime<Utc>,
    id: WorkoutId,
    clicks: u32,
    #[serde(flatten)]
    kind: WorkoutKind,
    coords: Coords,
    /// Kilometers
    distance: f64,
    /// Minutes
    duration: f64,
    description: String,
}

impl Workout {
    /// Create a running workout stamped with the current time.
    pub fn running(coords: Coords, distance: f64, duration: f64, cadence: f64) -> Self {
        let now = Utc::now();
        Self::running_at(WorkoutId::generate(now), now, coords, distance, duration, cadence)
    }

    /// Create a cycling workout stamped with the current time.
    pub fn cycling(coords: Coords, distance: f64, duration: f64, elevation_gain: f64) -> Self {
        let now = Utc::now();
        Self::cycling_at(
            WorkoutId::generate(now),
            now,
            coords,
            distance,
            duration,
            elevation_gain,
        )
    }

    pub fn running_at(
        id: WorkoutId,
        created_at: DateTime<Utc>,
        coords: Coords,
        distance: f64,
        duration: f64,
        cadence: f64,
    ) -> Self {
        let kind = WorkoutKind::Running {
            cadence,
            pace: duration / distance,
        };
        Self::build(id, created_at, coords, distance, duration, kind)
    }

    pub fn cycling_at(
        id: WorkoutId,
        created_at: DateTime<Utc>,
        coords: Coords,
        distance: f64,
        duration: f64,
        elevation_gain: f64,
    ) -> Self {
        let kind = WorkoutKind::Cycling {
            elevation_gain,
            speed: distance / (duration / 60.0),
        };
        Self::build(id, created_at, coords, distance, duration, kind)
    }

    fn build(
        id: WorkoutId,
        created_at: DateTime<Utc>,
        coords: Coords,
        distance: f64,
        duration: f64,
        kind: WorkoutKind,
    ) -> Self {
        let workout_type = match kind {
            WorkoutKind::Running { .. } => WorkoutType::Running,
            WorkoutKind::Cycling { .. } => WorkoutType::Cycling,
        };
        Self {
            description: describe(workout_type, created_at),
            created_at,
            id,
            clicks: 0,
            kind,
            coords,
            distance,
            duration,
        }
    }

    pub fn id(&self) -> &WorkoutId {
        &self.id
    }

    pub fn coords(&self) -> Coords {
        self.coords
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn clicks(&self) -> u32 {
        self.clicks
    }

    pub fn kind(&self) -> &WorkoutKind {
        &self.kind
    }

    pub fn workout_type(&self) -> WorkoutType {
        match self.kind {
            WorkoutKind::Running { .. } => WorkoutType::Running,
            WorkoutKind::Cycling { .. } => WorkoutType::Cycling,
        }
    }

    pub fn pace(&self) -> Option<f64> {
        match self.kind {
            WorkoutKind::Running { pace, .. } => Some(pace),
            WorkoutKind::Cycling { .. } => None,
        }
    }

    pub fn cadence(&self) -> Option<f64> {
        match self.kind {
            WorkoutKind::Running { cadence, .. } => Some(cadence),
            WorkoutKind::Cycling { .. } => None,
        }
    }

    pub fn speed(&self) -> Option<f64> {
        match self.kind {
            WorkoutKind::Cycling { speed, .. } => Some(speed),
            WorkoutKind::Running { .. } => None,
        }
    }

    pub fn elevation_gain(&self) -> Option<f64> {
        match self.kind {
            WorkoutKind::Cycling { elevation_gain, .. } => Some(elevation_gain),
            WorkoutKind::Running { .. } => None,
        }
    }

    /// Count a selection of this workout in the list.
    pub fn click(&mut self) {
        self.clicks += 1;
    }
}

/// Display label, e.g. "Running on April 14". Dates are taken in UTC.
fn describe(workout_type: WorkoutType, created_at: DateTime<Utc>) -> String {
    format!(
        "{} on {}",
        workout_type.capitalized(),
        created_at.format("%B %-d")
    )
}
