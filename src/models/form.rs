// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Raw workout form input.

use crate::models::WorkoutType;
use serde::{Deserialize, Serialize};

/// Values as typed into the workout form. Numeric fields are unparsed text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutForm {
    #[serde(rename = "type")]
    pub workout_type: WorkoutType,
    #[serde(default)]
    pub distance: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub cadence: String,
    #[serde(default)]
    pub elevation: String,
}

impl WorkoutForm {
    pub fn running(distance: &str, duration: &str, cadence: &str) -> Self {
        Self {
            workout_type: WorkoutType::Running,
            distance: distance.to_string(),
            duration: duration.to_string(),
            cadence: cadence.to_string(),
            elevation: String::new(),
        }
    }

    pub fn cycling(distance: &str, duration: &str, elevation: &str) -> Self {
        Self {
            workout_type: WorkoutType::Cycling,
            distance: distance.to_string(),
            duration: duration.to_string(),
            cadence: String::new(),
            elevation: elevation.to_string(),
        }
    }
}

/// The type-specific form row currently shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FormRow {
    Cadence,
    Elevation,
}

impl From<WorkoutType> for FormRow {
    fn from(t: WorkoutType) -> Self {
        match t {
            WorkoutType::Running => FormRow::Cadence,
            WorkoutType::Cycling => FormRow::Elevation,
        }
    }
}
