//! Application configuration loaded from environment variables.

use crate::models::Coords;
use std::env;
use std::path::PathBuf;

/// Default map zoom level.
pub const DEFAULT_ZOOM: u8 = 13;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
    /// File used as the local blob store
    pub storage_path: PathBuf,
    /// Zoom level for the initial view and recentering
    pub map_zoom: u8,
    /// Fixed position reported to the map (HOME_LAT / HOME_LNG)
    pub home_position: Option<Coords>,
    /// JSON endpoint for network position lookup; takes precedence over home position
    pub geolocation_url: Option<String>,
}

impl Config {
    /// Config for tests: fixed home position, no network lookup.
    pub fn test_default() -> Self {
        Self {
            port: 8080,
            frontend_url: "http://localhost:5173".to_string(),
            storage_path: PathBuf::from("data/local_storage.json"),
            map_zoom: DEFAULT_ZOOM,
            home_position: Some(Coords::new(37.3861, -122.0839)),
            geolocation_url: None,
        }
    }

    /// Load configuration from environment variables (and `.env` if present).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            storage_path: env::var("MAPTY_STORAGE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data/local_storage.json")),
            map_zoom: match env::var("MAPTY_MAP_ZOOM") {
                Ok(raw) => parse_zoom(&raw)?,
                Err(_) => DEFAULT_ZOOM,
            },
            home_position: home_position()?,
            geolocation_url: env::var("GEOLOCATION_URL")
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty()),
        })
    }
}

fn parse_zoom(raw: &str) -> Result<u8, ConfigError> {
    match raw.trim().parse::<u8>() {
        Ok(zoom) if zoom <= 19 => Ok(zoom),
        _ => Err(ConfigError::Invalid("MAPTY_MAP_ZOOM", raw.to_string())),
    }
}

/// HOME_LAT and HOME_LNG must be set together.
fn home_position() -> Result<Option<Coords>, ConfigError> {
    let lat = env::var("HOME_LAT").ok();
    let lng = env::var("HOME_LNG").ok();
    match (lat, lng) {
        (None, None) => Ok(None),
        (Some(lat), Some(lng)) => {
            let lat = lat
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid("HOME_LAT", lat.clone()))?;
            let lng = lng
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid("HOME_LNG", lng.clone()))?;
            Ok(Some(Coords::new(lat, lng)))
        }
        (None, Some(_)) => Err(ConfigError::Missing("HOME_LAT")),
        (Some(_), None) => Err(ConfigError::Missing("HOME_LNG")),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1}")]
    Invalid(&'static str, String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env() {
        // Set env vars for test
        env::set_var("PORT", "9090");
        env::set_var("HOME_LAT", "51.5");
        env::set_var("HOME_LNG", "-0.12");
        env::set_var("MAPTY_MAP_ZOOM", "15");

        let config = Config::from_env().expect("Config should load");

        assert_eq!(config.port, 9090);
        assert_eq!(config.home_position, Some(Coords::new(51.5, -0.12)));
        assert_eq!(config.map_zoom, 15);
    }

    #[test]
    fn test_parse_zoom_bounds() {
        assert_eq!(parse_zoom("13").unwrap(), 13);
        assert!(parse_zoom("25").is_err());
        assert!(parse_zoom("far").is_err());
    }
}
