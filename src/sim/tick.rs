//! Per-frame simulation step
//!
//! Order within a frame: launch input, obstacle poses, projectile pose,
//! collision scan, hit resolution, boundary check.

use glam::Vec3;
use rand::Rng;

use super::collision::detect_collision;
use super::state::{ResetReason, SimEvent, SimulationState};

/// Aim jitter applied by the autopilot (per axis, in direction units)
pub const AUTOPILOT_JITTER: f32 = 0.01;

/// A launch request
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Launch {
    /// Velocity direction; scaled by `speed` as given (not normalized)
    pub direction: Vec3,
    pub speed: f32,
}

impl Launch {
    pub fn new(direction: Vec3, speed: f32) -> Self {
        Self { direction, speed }
    }

    /// Aim from a camera's front vector.
    ///
    /// The forward component is pinned to -1 so every shot heads for the
    /// targets; only the camera's horizontal and vertical look steer it.
    pub fn from_view(front: Vec3, speed: f32) -> Self {
        Self {
            direction: Vec3::new(front.x, front.y, -1.0),
            speed,
        }
    }
}

/// Input commands for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Fire the projectile (ignored while one is in flight)
    pub launch: Option<Launch>,
    /// Idle/demo mode - the autopilot aims and fires
    pub idle_mode: bool,
}

/// Advance the simulation by one frame at clock reading `now` (seconds)
pub fn tick(state: &mut SimulationState, input: &TickInput, now: f32) {
    if now < state.now {
        log::warn!("Clock went backwards ({} -> {}), holding", state.now, now);
    }
    let now = now.max(state.now);
    state.now = now;
    state.frame += 1;

    // Launch
    let launch = if input.idle_mode && !state.is_projectile_active() {
        autopilot_launch(state).or(input.launch)
    } else {
        input.launch
    };
    if let Some(launch) = launch {
        state.launch(launch.direction, launch.speed, now);
    }

    // Poses and bounds
    for entity in state.scene.iter_mut() {
        entity.update(now, &state.settings);
    }
    state.projectile.update(now, &state.settings);

    // Collision scan; the registry is not touched until it finishes
    let result = detect_collision(&state.projectile.bounds, &state.scene);
    for id in &result.ignored {
        if let Some(entity) = state.scene.get(*id) {
            log::trace!("Projectile grazed {} (not destructible)", entity.name);
        }
    }
    state.matched = result.matched;

    // Hit resolution
    if let Some(id) = state.matched.take() {
        if let Some(destroyed) = state.scene.remove(id) {
            state.meshes.release(destroyed.mesh);
            log::info!(
                "Destroyed {} at {:?} ({} targets left)",
                destroyed.name,
                destroyed.position,
                state.scene.destructible_count()
            );
            state.events.push(SimEvent::ObstacleDestroyed {
                id,
                name: destroyed.name,
            });
        }
        state.park_projectile(ResetReason::Hit);
    }

    // Safety net: park anything that leaves the playable volume
    if !state.settings.bounds.contains(state.projectile.position) {
        state.park_projectile(ResetReason::OutOfBounds);
    }
}

/// Pick a shot at the first remaining target, leading it for gravity
fn autopilot_launch(state: &mut SimulationState) -> Option<Launch> {
    let target = state
        .scene
        .iter()
        .find(|e| e.tag.is_destructible())
        .map(|e| e.position)?;

    let from = state.projectile.position;
    let speed = state.settings.launch_speed;
    let flight_time = (target - from).length() / speed;
    // Aim above the target by the expected drop
    let aim = target - 0.5 * state.settings.gravity * flight_time * flight_time;

    let jitter = Vec3::new(
        state.rng.random_range(-AUTOPILOT_JITTER..=AUTOPILOT_JITTER),
        state.rng.random_range(-AUTOPILOT_JITTER..=AUTOPILOT_JITTER),
        0.0,
    );
    let direction = ((aim - from).normalize_or_zero() + jitter).normalize_or_zero();
    if direction == Vec3::ZERO {
        return None;
    }

    Some(Launch::new(direction, speed))
}
