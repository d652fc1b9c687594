// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Map binding: view setup, click intents, workout markers.

use crate::models::{Coords, MapView, Marker, PanOptions, PopupOptions, Workout};
use crate::services::render::popup_content;
use serde::Serialize;

/// The map widget capability.
pub trait MapSurface: Send {
    fn create_view(&mut self, center: Coords, zoom: u8);
    fn add_marker(&mut self, coords: Coords, popup: PopupOptions, content: String);
    fn set_view(&mut self, center: Coords, zoom: u8, pan: PanOptions);
}

/// Map surface that records what it was asked to draw.
///
/// Used by the HTTP frontend, which draws the recorded state, and by tests.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RecordingMap {
    pub view: Option<MapView>,
    pub markers: Vec<Marker>,
    /// Animation used for the most recent recenter, if any
    pub last_pan: Option<PanOptions>,
}

impl MapSurface for RecordingMap {
    fn create_view(&mut self, center: Coords, zoom: u8) {
        self.view = Some(MapView { center, zoom });
    }

    fn add_marker(&mut self, coords: Coords, popup: PopupOptions, content: String) {
        self.markers.push(Marker {
            coords,
            popup,
            content,
        });
    }

    fn set_view(&mut self, center: Coords, zoom: u8, pan: PanOptions) {
        self.view = Some(MapView { center, zoom });
        self.last_pan = Some(pan);
    }
}

/// A map click waiting for the form to be submitted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PendingIntent {
    pub coords: Coords,
}

/// Map lifecycle as seen by the rest of the app.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "reason", rename_all = "snake_case")]
pub enum MapStatus {
    /// Waiting for the position request to resolve
    Locating,
    Ready,
    /// Position was denied or unavailable; map stays uninitialized
    Unavailable(String),
}

/// Owns the map surface and the pending click intent.
pub struct MapBinder<M: MapSurface> {
    surface: M,
    zoom: u8,
    status: MapStatus,
    pending: Option<PendingIntent>,
}

impl<M: MapSurface> MapBinder<M> {
    pub fn new(surface: M, zoom: u8) -> Self {
        Self {
            surface,
            zoom,
            status: MapStatus::Locating,
            pending: None,
        }
    }

    /// Create the view. Only the first call has any effect.
    pub fn initialize(&mut self, center: Coords) -> bool {
        if self.status == MapStatus::Ready {
            tracing::warn!("Map already initialized, ignoring");
            return false;
        }
        self.surface.create_view(center, self.zoom);
        self.status = MapStatus::Ready;
        tracing::info!(lat = center.lat, lng = center.lng, zoom = self.zoom, "Map initialized");
        true
    }

    /// Record that the map can never be initialized.
    pub fn fail(&mut self, reason: impl Into<String>) {
        if self.status != MapStatus::Ready {
            self.status = MapStatus::Unavailable(reason.into());
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == MapStatus::Ready
    }

    pub fn status(&self) -> &MapStatus {
        &self.status
    }

    /// Handle a map click. A later click replaces an earlier pending one.
    pub fn click(&mut self, coords: Coords) -> Option<PendingIntent> {
        if !self.is_ready() {
            return None;
        }
        let intent = PendingIntent { coords };
        self.pending = Some(intent);
        Some(intent)
    }

    pub fn pending(&self) -> Option<PendingIntent> {
        self.pending
    }

    pub fn take_pending(&mut self) -> Option<PendingIntent> {
        self.pending.take()
    }

    pub fn discard_pending(&mut self) {
        self.pending = None;
    }

    /// Place one marker for a workout. Each call adds a marker.
    pub fn render_marker(&mut self, workout: &Workout) {
        if !self.is_ready() {
            return;
        }
        self.surface.add_marker(
            workout.coords(),
            PopupOptions::for_workout(workout),
            popup_content(workout),
        );
    }

    /// Pan the view to a position at the configured zoom.
    pub fn recenter(&mut self, coords: Coords) {
        if !self.is_ready() {
            return;
        }
        self.surface
            .set_view(coords, self.zoom, PanOptions::default());
    }

    pub fn surface(&self) -> &M {
        &self.surface
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ready_binder() -> MapBinder<RecordingMap> {
        let mut binder = MapBinder::new(RecordingMap::default(), 13);
        binder.initialize(Coords::new(51.5, -0.1));
        binder
    }

    #[test]
    fn test_initialize_once() {
        let mut binder = MapBinder::new(RecordingMap::default(), 13);
        assert!(binder.initialize(Coords::new(1.0, 2.0)));
        assert!(!binder.initialize(Coords::new(3.0, 4.0)));

        let view = binder.surface().view.unwrap();
        assert_eq!(view.center, Coords::new(1.0, 2.0));
        assert_eq!(view.zoom, 13);
    }

    #[test]
    fn test_click_before_ready_is_ignored() {
        let mut binder = MapBinder::new(RecordingMap::default(), 13);
        assert!(binder.click(Coords::new(1.0, 1.0)).is_none());
        assert!(binder.pending().is_none());
    }

    #[test]
    fn test_second_click_overwrites_pending() {
        let mut binder = ready_binder();
        binder.click(Coords::new(1.0, 1.0));
        binder.click(Coords::new(2.0, 2.0));

        assert_eq!(binder.take_pending().unwrap().coords, Coords::new(2.0, 2.0));
        assert!(binder.pending().is_none());
    }

    #[test]
    fn test_render_marker_uses_type_specific_popup() {
        let mut binder = ready_binder();
        let run = Workout::running(Coords::new(10.0, 20.0), 5.0, 25.0, 180.0);
        let ride = Workout::cycling(Coords::new(11.0, 21.0), 20.0, 60.0, 300.0);

        binder.render_marker(&run);
        binder.render_marker(&ride);

        let markers = &binder.surface().markers;
        assert_eq!(markers.len(), 2);
        assert_eq!(markers[0].coords, Coords::new(10.0, 20.0));
        assert_eq!(markers[0].popup.class_name, "running-popup");
        assert!(markers[0].content.starts_with("🏃‍♂️ Running on"));
        assert_eq!(markers[1].popup.class_name, "cycling-popup");
        assert!(!markers[1].popup.auto_close);
        assert!(!markers[1].popup.close_on_click);
    }

    #[test]
    fn test_recenter_animates() {
        let mut binder = ready_binder();
        binder.recenter(Coords::new(5.0, 6.0));

        let map = binder.surface();
        assert_eq!(map.view.unwrap().center, Coords::new(5.0, 6.0));
        assert_eq!(map.last_pan, Some(PanOptions::default()));
    }

    #[test]
    fn test_fail_does_not_override_ready() {
        let mut binder = ready_binder();
        binder.fail("denied");
        assert!(binder.is_ready());

        let mut other = MapBinder::new(RecordingMap::default(), 13);
        other.fail("denied");
        assert_eq!(other.status(), &MapStatus::Unavailable("denied".to_string()));
    }
}
