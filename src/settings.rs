//! Simulation tuning
//!
//! Every constant the frame step reads lives here so a scene can be retuned
//! from a JSON file without recompiling. Defaults match `consts`.

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors raised while loading settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed settings JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid setting `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Axis-aligned playable volume for the projectile
///
/// There is no ceiling and no near plane: the ball is only ever launched
/// away from the camera.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayBounds {
    pub floor_y: f32,
    pub min_x: f32,
    pub max_x: f32,
    pub min_z: f32,
}

impl Default for PlayBounds {
    fn default() -> Self {
        Self {
            floor_y: FLOOR_Y,
            min_x: MIN_X,
            max_x: MAX_X,
            min_z: MIN_Z,
        }
    }
}

impl PlayBounds {
    /// True while `pos` is inside the playable volume
    pub fn contains(&self, pos: Vec3) -> bool {
        !(pos.y < self.floor_y || pos.z < self.min_z || pos.x < self.min_x || pos.x > self.max_x)
    }
}

/// Simulation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Kinematics ===
    /// Constant acceleration on the projectile
    pub gravity: Vec3,
    /// Launch speed used by `Launch::from_view` and the autopilot
    pub launch_speed: f32,
    /// Reset coordinate for an inactive projectile
    pub parked_position: Vec3,
    /// Projectile playable volume
    pub bounds: PlayBounds,

    // === Obstacles ===
    /// Vertical bob per frame
    pub bob_step: f32,
    /// Half-height of the bob band
    pub bob_amplitude: f32,
    /// Spin per frame in degrees
    pub spin_step_deg: f32,

    // === Driver ===
    /// Frame timestep used by the headless driver
    pub frame_dt: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            launch_speed: LAUNCH_SPEED,
            parked_position: PARKED_POSITION,
            bounds: PlayBounds::default(),

            bob_step: BOB_STEP,
            bob_amplitude: BOB_AMPLITUDE,
            spin_step_deg: SPIN_STEP_DEG,

            frame_dt: FRAME_DT,
        }
    }
}

impl Settings {
    /// Parse settings from JSON; missing fields take their defaults
    pub fn from_json_str(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let settings = Self::from_json_str(&json)?;
        log::info!("Loaded settings from {}", path.as_ref().display());
        Ok(settings)
    }

    /// Reject values the frame step cannot work with
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(self.bob_step > 0.0) {
            return Err(SettingsError::Invalid {
                field: "bob_step",
                reason: "must be positive",
            });
        }
        if !(self.bob_amplitude >= 0.0) {
            return Err(SettingsError::Invalid {
                field: "bob_amplitude",
                reason: "must not be negative",
            });
        }
        if !(self.launch_speed > 0.0) {
            return Err(SettingsError::Invalid {
                field: "launch_speed",
                reason: "must be positive",
            });
        }
        if !(self.frame_dt > 0.0) {
            return Err(SettingsError::Invalid {
                field: "frame_dt",
                reason: "must be positive",
            });
        }
        if self.bounds.min_x > self.bounds.max_x {
            return Err(SettingsError::Invalid {
                field: "bounds",
                reason: "min_x exceeds max_x",
            });
        }
        if !self.bounds.contains(self.parked_position) {
            return Err(SettingsError::Invalid {
                field: "parked_position",
                reason: "must lie inside the play bounds",
            });
        }
        Ok(())
    }
}
