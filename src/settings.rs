//! Game settings
//!
//! Startup configuration only: screen size, RNG seed and the initial sound
//! flag. Physics constants live in `consts` and are not configurable.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Default run seed
pub const DEFAULT_SEED: u64 = 0x00C0_FFEE;

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Screen width in pixels
    pub width: f32,
    /// Screen height in pixels
    pub height: f32,
    /// Seed for power-up rolls and effects
    pub seed: u64,
    /// Sound on at startup
    pub sound_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: SCREEN_WIDTH,
            height: SCREEN_HEIGHT,
            seed: DEFAULT_SEED,
            sound_enabled: true,
        }
    }
}

impl Settings {
    /// Screen bounds as a vector
    pub fn bounds(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Parse settings from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load settings from a JSON file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Check the screen can hold the brick wall
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fits = self.width.is_finite()
            && self.height.is_finite()
            && self.width >= MIN_SCREEN_WIDTH
            && self.height >= MIN_SCREEN_HEIGHT;
        if fits {
            Ok(())
        } else {
            Err(ConfigError::InvalidBounds {
                width: self.width,
                height: self.height,
                min_width: MIN_SCREEN_WIDTH,
                min_height: MIN_SCREEN_HEIGHT,
            })
        }
    }
}
