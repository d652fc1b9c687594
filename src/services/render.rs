// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout markup for the list and marker popups.

use crate::models::{Workout, WorkoutKind};
use html_escape::{encode_double_quoted_attribute, encode_text};

/// Popup text: type icon followed by the description.
pub fn popup_content(workout: &Workout) -> String {
    format!(
        "{} {}",
        workout.workout_type().icon(),
        workout.description()
    )
}

/// Render one list entry.
pub fn render_workout(workout: &Workout) -> String {
    let workout_type = workout.workout_type();
    let mut html = format!(
        r#"<li class="workout workout--{kind}" data-id="{id}">
  <h2 class="workout__title">{title}</h2>
{distance}{duration}"#,
        kind = workout_type.as_str(),
        id = encode_double_quoted_attribute(workout.id().as_str()),
        title = encode_text(workout.description()),
        distance = detail(workout_type.icon(), workout.distance(), "km"),
        duration = detail("⏱", workout.duration(), "min"),
    );

    match *workout.kind() {
        WorkoutKind::Running { cadence, pace } => {
            html.push_str(&detail("⚡️", format!("{:.1}", pace), "min/km"));
            html.push_str(&detail("🦶🏼", cadence, "spm"));
        }
        WorkoutKind::Cycling {
            elevation_gain,
            speed,
        } => {
            html.push_str(&detail("⚡️", format!("{:.1}", speed), "km/h"));
            html.push_str(&detail("⛰", elevation_gain, "m"));
        }
    }

    html.push_str("</li>");
    html
}

fn detail(icon: &str, value: impl std::fmt::Display, unit: &str) -> String {
    format!(
        r#"  <div class="workout__details">
    <span class="workout__icon">{icon}</span>
    <span class="workout__value">{value}</span>
    <span class="workout__unit">{unit}</span>
  </div>
"#
    )
}

/// Receives rendered list entries.
pub trait ListRenderer: Send {
    fn render(&mut self, workout: &Workout);
}

/// Workout list as markup, newest entry first (each entry goes right after the form).
#[derive(Debug, Clone, Default)]
pub struct HtmlWorkoutList {
    entries: Vec<String>,
}

impl HtmlWorkoutList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }
}

impl ListRenderer for HtmlWorkoutList {
    fn render(&mut self, workout: &Workout) {
        self.entries.insert(0, render_workout(workout));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Coords, WorkoutId};
    use chrono::{TimeZone, Utc};

    fn run() -> Workout {
        Workout::running_at(
            WorkoutId::from("1713087000"),
            Utc.with_ymd_and_hms(2024, 4, 14, 9, 30, 0).unwrap(),
            Coords::new(10.0, 20.0),
            5.2,
            24.0,
            178.0,
        )
    }

    #[test]
    fn test_popup_content() {
        assert_eq!(popup_content(&run()), "🏃‍♂️ Running on April 14");
    }

    #[test]
    fn test_render_running_entry() {
        let html = render_workout(&run());

        assert!(html.starts_with(r#"<li class="workout workout--running" data-id="1713087000">"#));
        assert!(html.contains(r#"<h2 class="workout__title">Running on April 14</h2>"#));
        assert!(html.contains(r#"<span class="workout__value">5.2</span>"#));
        // 24 / 5.2 = 4.615...
        assert!(html.contains(r#"<span class="workout__value">4.6</span>"#));
        assert!(html.contains(r#"<span class="workout__value">178</span>"#));
        assert!(html.ends_with("</li>"));
    }

    #[test]
    fn test_render_cycling_entry() {
        let ride = Workout::cycling_at(
            WorkoutId::from("1713087001"),
            Utc.with_ymd_and_hms(2024, 4, 14, 9, 30, 0).unwrap(),
            Coords::new(10.0, 20.0),
            27.0,
            95.0,
            -40.0,
        );
        let html = render_workout(&ride);

        assert!(html.contains("workout--cycling"));
        assert!(html.contains(r#"<span class="workout__value">17.1</span>"#));
        assert!(html.contains(r#"<span class="workout__value">-40</span>"#));
        assert!(html.contains("km/h"));
    }

    #[test]
    fn test_id_attribute_is_escaped() {
        let w = Workout::running_at(
            WorkoutId::from(r#"1"><script>"#),
            Utc.with_ymd_and_hms(2024, 4, 14, 9, 30, 0).unwrap(),
            Coords::new(0.0, 0.0),
            1.0,
            5.0,
            150.0,
        );
        let html = render_workout(&w);
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_list_newest_first() {
        let mut list = HtmlWorkoutList::new();
        let first = run();
        let second = Workout::cycling(Coords::new(1.0, 1.0), 10.0, 30.0, 0.0);

        list.render(&first);
        list.render(&second);

        assert_eq!(list.entries().len(), 2);
        assert!(list.entries()[0].contains("workout--cycling"));
        assert!(list.entries()[1].contains("workout--running"));
    }
}
