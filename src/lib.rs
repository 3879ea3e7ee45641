//! Box Blaster - A 3D target range
//!
//! Core modules:
//! - `sim`: Frame-driven simulation (projectile kinematics, AABB collisions, scene registry)
//! - `renderer`: Read-only per-frame instance export for the draw layer
//! - `settings`: Data-driven tuning constants

pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{PlayBounds, Settings, SettingsError};

/// Game configuration constants
pub mod consts {
    use glam::Vec3;

    /// Fixed frame timestep for the headless driver (60 Hz)
    pub const FRAME_DT: f32 = 1.0 / 60.0;

    /// Constant gravity applied to the projectile (units/s²)
    pub const GRAVITY: Vec3 = Vec3::new(0.0, -9.8, 0.0);

    /// Vertical bob per frame for destructible boxes
    pub const BOB_STEP: f32 = 0.01;
    /// Half-height of the bob band around a box's spawn height
    pub const BOB_AMPLITUDE: f32 = 0.5;
    /// Spin per frame (degrees) for boxes and the flying ball
    pub const SPIN_STEP_DEG: f32 = 1.0;

    /// Half-extent of every asset's collision box
    pub const COLLISION_RADIUS: f32 = 1.0;

    /// Launch speed (units/s)
    pub const LAUNCH_SPEED: f32 = 50.0;
    /// Where the ball waits between shots
    pub const PARKED_POSITION: Vec3 = Vec3::new(0.0, -5.0, 15.0);

    /// Playable volume; leaving it parks the ball
    pub const FLOOR_Y: f32 = -10.0;
    pub const MIN_X: f32 = -13.0;
    pub const MAX_X: f32 = 13.0;
    pub const MIN_Z: f32 = -15.0;
}

/// Advance a yaw angle (degrees), wrapping to 0 once it passes a full turn
#[inline]
pub fn advance_spin(rotation: f32, step: f32) -> f32 {
    let next = rotation + step;
    if next > 360.0 { 0.0 } else { next }
}
