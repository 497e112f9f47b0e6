//! Simulation settings
//!
//! Tuning values for the field, friction, cue and random placement. Loaded
//! from JSON; every field falls back to the defaults in `consts`.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Result, SimError};

/// Random placement tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnSettings {
    /// Smallest radius a random body can have
    pub min_radius: f64,
    /// Largest random radius is min(width, height) / radius_ratio
    pub radius_ratio: f64,
    /// Velocity components are drawn from [-max_speed, max_speed]
    pub max_speed: f64,
    /// Rejection sampling cap
    pub max_attempts: u32,
}

impl Default for SpawnSettings {
    fn default() -> Self {
        Self {
            min_radius: MIN_SPAWN_RADIUS,
            radius_ratio: SPAWN_RADIUS_RATIO,
            max_speed: SPAWN_MAX_SPEED,
            max_attempts: MAX_PLACEMENT_ATTEMPTS,
        }
    }
}

/// Simulation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimSettings {
    // === Field ===
    pub field_width: f64,
    pub field_height: f64,

    // === Physics ===
    /// Velocity decay per tick (0 = none)
    pub friction: f64,
    /// Restitution given to randomly placed bodies
    pub restitution: f64,

    // === Cue ===
    pub cue_radius: f64,
    pub cue_strength: f64,

    // === Placement ===
    pub spawn: SpawnSettings,
    /// Seed for the placement RNG
    pub seed: u64,

    // === Presentation ===
    /// Draw velocity vectors
    pub debug_draw: bool,
}

impl Default for SimSettings {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,

            friction: FRICTION,
            restitution: RESTITUTION,

            cue_radius: CUE_RADIUS,
            cue_strength: CUE_STRENGTH,

            spawn: SpawnSettings::default(),
            seed: 0x5eed,

            debug_draw: false,
        }
    }
}

impl SimSettings {
    /// Default settings for a field of the given size
    pub fn with_field(width: f64, height: f64) -> Self {
        Self {
            field_width: width,
            field_height: height,
            ..Self::default()
        }
    }

    /// Check that every value is usable by the simulation
    pub fn validate(&self) -> Result<()> {
        let positive = |v: f64| v.is_finite() && v > 0.0;

        if !positive(self.field_width) || !positive(self.field_height) {
            return Err(SimError::InvalidField {
                width: self.field_width,
                height: self.field_height,
            });
        }
        if !(0.0..1.0).contains(&self.friction) {
            return Err(SimError::InvalidSettings(format!(
                "friction must be in [0, 1), got {}",
                self.friction
            )));
        }
        if !(0.0..=1.0).contains(&self.restitution) {
            return Err(SimError::InvalidRestitution(self.restitution));
        }
        if !positive(self.cue_radius) {
            return Err(SimError::InvalidSettings(format!(
                "cue_radius must be positive, got {}",
                self.cue_radius
            )));
        }
        if !self.cue_strength.is_finite() || self.cue_strength < 0.0 {
            return Err(SimError::InvalidSettings(format!(
                "cue_strength must be non-negative, got {}",
                self.cue_strength
            )));
        }
        if !positive(self.spawn.min_radius) || !positive(self.spawn.radius_ratio) {
            return Err(SimError::InvalidSettings(
                "spawn radius settings must be positive".to_string(),
            ));
        }
        if !self.spawn.max_speed.is_finite() || self.spawn.max_speed < 0.0 {
            return Err(SimError::InvalidSettings(format!(
                "spawn max_speed must be non-negative, got {}",
                self.spawn.max_speed
            )));
        }
        if self.spawn.max_attempts == 0 {
            return Err(SimError::InvalidSettings(
                "spawn max_attempts must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Parse and validate settings from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json_str(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load settings, falling back to defaults on any error
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Using default settings ({}: {})", path.display(), e);
                Self::default()
            }
        }
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
