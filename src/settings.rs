//! Pointer and play-area settings
//!
//! Stored as JSON. Missing fields take their defaults, so a settings file
//! only needs the values it changes.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::PointerRequest;

/// Settings load/validation failures
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid settings JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("rock radius must be positive (got {0})")]
    NonPositiveRadius(f32),

    #[error("screen top ({top}) must be above screen bottom ({bottom})")]
    InvertedScreen { top: f32, bottom: f32 },

    #[error("screen half width must be positive (got {0})")]
    NonPositiveWidth(f32),

    #[error("max_reflections must be at least 1")]
    ZeroReflections,

    #[error("shots_with_pointer must be at least 1")]
    ZeroShotsWithPointer,
}

/// Visible play area in world units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenBounds {
    /// Walls sit at ±half_width
    pub half_width: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Default for ScreenBounds {
    fn default() -> Self {
        Self {
            half_width: SCREEN_HALF_WIDTH,
            top: SCREEN_HALF_HEIGHT,
            bottom: -SCREEN_HALF_HEIGHT,
        }
    }
}

impl ScreenBounds {
    /// Whether a point lies inside the play area (edges included)
    pub fn contains(&self, p: Vec2) -> bool {
        p.x.abs() <= self.half_width && p.y >= self.bottom && p.y <= self.top
    }
}

/// Pointer settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Rock collider radius
    pub radius: f32,
    /// Spring anchor position
    pub anchor: Vec2,
    /// Play area
    pub screen: ScreenBounds,
    /// Wall reflections followed before the pointer gives up
    pub max_reflections: usize,
    /// Shots over which the pointer shrinks away
    pub shots_with_pointer: u32,
    /// Height of the finish line
    pub finish_line: f32,

    // === Dashes ===
    /// Dash length in world units
    pub dash_length: f32,
    /// Gap between dashes
    pub dash_gap: f32,
    /// Dash scroll speed (world units per second)
    pub dash_speed: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            radius: ROCK_RADIUS,
            anchor: Vec2::new(ANCHOR_X, ANCHOR_Y),
            screen: ScreenBounds::default(),
            max_reflections: MAX_REFLECTIONS,
            shots_with_pointer: SHOTS_WITH_POINTER,
            finish_line: FINISH_LINE,

            dash_length: 0.2,
            dash_gap: 0.15,
            dash_speed: 1.0,
        }
    }
}

impl Settings {
    /// Parse and validate settings JSON
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load settings, falling back to defaults on any error
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Using default settings ({}: {})", path.display(), e);
                Self::default()
            }
        }
    }

    /// Write settings as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(self.radius > 0.0) {
            return Err(SettingsError::NonPositiveRadius(self.radius));
        }
        if !(self.screen.half_width > 0.0) {
            return Err(SettingsError::NonPositiveWidth(self.screen.half_width));
        }
        if !(self.screen.top > self.screen.bottom) {
            return Err(SettingsError::InvertedScreen {
                top: self.screen.top,
                bottom: self.screen.bottom,
            });
        }
        if self.max_reflections == 0 {
            return Err(SettingsError::ZeroReflections);
        }
        if self.shots_with_pointer == 0 {
            return Err(SettingsError::ZeroShotsWithPointer);
        }
        Ok(())
    }

    /// Prediction request for a rock dragged to `origin`
    pub fn request(&self, origin: Vec2) -> PointerRequest {
        PointerRequest::new(origin, self.anchor, self.radius, self.screen.top, self.screen.bottom)
            .with_max_reflections(self.max_reflections)
    }
}
