//! Environment-driven configuration.
//!
//! Values are read from the process environment; binaries load `.env` with
//! `dotenvy` before calling into this module.

use std::env;

/// Filter threshold applied to normalized level strength when nothing else is configured.
pub const DEFAULT_MIN_STRENGTH: f64 = 20.0;

const DEFAULT_PORT: u16 = 8080;

/// Deployment environment name (`ENVIRONMENT`), defaulting to `sandbox`.
pub fn get_environment() -> String {
    env::var("ENVIRONMENT").unwrap_or_else(|_| "sandbox".to_string())
}

/// HTTP port (`PORT`), defaulting to 8080.
pub fn get_port() -> u16 {
    env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_PORT)
}

/// Tunables for the level pipeline that are not tied to a timeframe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelSettings {
    /// Levels whose normalized strength is not strictly above this are dropped.
    pub min_strength: f64,
}

impl LevelSettings {
    pub fn new(min_strength: f64) -> Self {
        Self { min_strength }
    }

    /// Read `KEY_LEVELS_MIN_STRENGTH`, falling back to the default on absence or bad input.
    pub fn from_env() -> Self {
        let min_strength = env::var("KEY_LEVELS_MIN_STRENGTH")
            .ok()
            .and_then(|v| v.trim().parse::<f64>().ok())
            .filter(|v| v.is_finite())
            .unwrap_or(DEFAULT_MIN_STRENGTH);
        Self { min_strength }
    }
}

impl Default for LevelSettings {
    fn default() -> Self {
        Self {
            min_strength: DEFAULT_MIN_STRENGTH,
        }
    }
}
