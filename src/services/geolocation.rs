// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Position lookup used to center the map at startup.
//!
//! A lookup is a single attempt: there is no retry and no fallback between
//! sources. Failure leaves the map uninitialized for the rest of the process.

use crate::config::Config;
use crate::models::Coords;
use serde::Deserialize;
use std::future::Future;

/// Alert text shown when the position cannot be determined.
pub const POSITION_ALERT: &str = "Could not get your position";

/// Errors from a position lookup.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeolocationError {
    #[error("Position unavailable: no location source configured")]
    Denied,

    #[error("Position lookup failed: {0}")]
    Unavailable(String),

    #[error("Position out of range: {lat}, {lng}")]
    OutOfRange { lat: f64, lng: f64 },
}

/// Something that can report the user's position once.
pub trait Geolocator: Send + Sync {
    fn locate(&self) -> impl Future<Output = Result<Coords, GeolocationError>> + Send;
}

/// Reports a configured position, or denies when none is set.
#[derive(Debug, Clone)]
pub struct FixedGeolocator {
    position: Option<Coords>,
}

impl FixedGeolocator {
    pub fn new(position: Option<Coords>) -> Self {
        Self { position }
    }
}

impl Geolocator for FixedGeolocator {
    async fn locate(&self) -> Result<Coords, GeolocationError> {
        let coords = self.position.ok_or(GeolocationError::Denied)?;
        check_range(coords)
    }
}

/// Looks up the position from a JSON endpoint returning `latitude`/`longitude`.
#[derive(Debug, Clone)]
pub struct HttpGeolocator {
    http: reqwest::Client,
    url: String,
}

#[derive(Debug, Deserialize)]
struct PositionResponse {
    latitude: f64,
    longitude: f64,
}

impl HttpGeolocator {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            url: url.into(),
        }
    }
}

impl Geolocator for HttpGeolocator {
    async fn locate(&self) -> Result<Coords, GeolocationError> {
        let response = self
            .http
            .get(&self.url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| GeolocationError::Unavailable(e.to_string()))?;

        let position: PositionResponse = response
            .json()
            .await
            .map_err(|e| GeolocationError::Unavailable(e.to_string()))?;

        check_range(Coords::new(position.latitude, position.longitude))
    }
}

/// The position source selected by configuration.
#[derive(Debug, Clone)]
pub enum PositionSource {
    Fixed(FixedGeolocator),
    Http(HttpGeolocator),
}

impl PositionSource {
    /// Network lookup when a URL is configured, otherwise the fixed home position.
    pub fn from_config(config: &Config) -> Self {
        match &config.geolocation_url {
            Some(url) => PositionSource::Http(HttpGeolocator::new(url.clone())),
            None => PositionSource::Fixed(FixedGeolocator::new(config.home_position)),
        }
    }
}

impl Geolocator for PositionSource {
    async fn locate(&self) -> Result<Coords, GeolocationError> {
        match self {
            PositionSource::Fixed(g) => g.locate().await,
            PositionSource::Http(g) => g.locate().await,
        }
    }
}

fn check_range(coords: Coords) -> Result<Coords, GeolocationError> {
    let valid = coords.lat.is_finite()
        && coords.lng.is_finite()
        && (-90.0..=90.0).contains(&coords.lat)
        && (-180.0..=180.0).contains(&coords.lng);
    if valid {
        Ok(coords)
    } else {
        Err(GeolocationError::OutOfRange {
            lat: coords.lat,
            lng: coords.lng,
        })
    }
}
