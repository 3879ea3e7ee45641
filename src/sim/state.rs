//! Simulation state
//!
//! Everything the frame step mutates lives in `SimulationState` and is passed
//! to `tick` by reference. There is no global state.

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::entity::{Entity, EntityId};
use super::mesh::MeshTable;
use super::scene::{Scene, SceneLayout};
use crate::settings::Settings;

/// Why the projectile went back to its parked position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetReason {
    /// Destroyed a box
    Hit,
    /// Left the playable volume
    OutOfBounds,
}

/// Something that happened during a tick, for HUD/audio/logging consumers
#[derive(Debug, Clone, PartialEq)]
pub enum SimEvent {
    Launched { velocity: Vec3, at: f32 },
    ObstacleDestroyed { id: EntityId, name: String },
    ProjectileReset { reason: ResetReason, last_position: Vec3 },
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct SimulationState {
    /// Tuning constants
    pub settings: Settings,
    /// Shared mesh handles
    pub meshes: MeshTable,
    /// Live obstacles in draw order
    pub scene: Scene,
    /// The single projectile (never inside `scene`)
    pub projectile: Entity,
    /// Pending destructible hit, consumed in the same tick
    pub matched: Option<EntityId>,
    /// Frames stepped so far
    pub frame: u64,
    /// Latest clock reading (seconds)
    pub now: f32,
    /// Seed used for the autopilot RNG
    pub seed: u64,
    /// Autopilot aim jitter
    pub rng: Pcg32,
    /// Events not yet drained by `take_events`
    pub events: Vec<SimEvent>,
}

impl SimulationState {
    /// Reference scene with the given settings
    pub fn new(settings: Settings, seed: u64) -> Self {
        Self::from_layout(&SceneLayout::reference(), settings, seed)
    }

    /// Build a state from a layout
    pub fn from_layout(layout: &SceneLayout, settings: Settings, seed: u64) -> Self {
        let mut meshes = MeshTable::new();
        let (scene, projectile) = layout.instantiate(&mut meshes, settings.parked_position);
        Self {
            settings,
            meshes,
            scene,
            projectile,
            matched: None,
            frame: 0,
            now: 0.0,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
        }
    }

    pub fn is_projectile_active(&self) -> bool {
        self.projectile.is_active()
    }

    /// Fire the projectile along `direction` at `speed` from its parked spot.
    ///
    /// Ignored (returns false) while a shot is already in flight.
    pub fn launch(&mut self, direction: Vec3, speed: f32, now: f32) -> bool {
        let velocity = direction * speed;
        if !self.projectile.launch(velocity, now) {
            log::trace!("Launch ignored: projectile already in flight");
            return false;
        }
        log::info!("Launched {} with velocity {:?} at t={:.3}", self.projectile.name, velocity, now);
        self.events.push(SimEvent::Launched { velocity, at: now });
        true
    }

    /// Deactivate the projectile and return it to the parked position
    pub fn park_projectile(&mut self, reason: ResetReason) {
        let last_position = self.projectile.position;
        self.projectile.park(self.settings.parked_position);
        log::debug!("Projectile reset ({:?}) from {:?}", reason, last_position);
        self.events.push(SimEvent::ProjectileReset {
            reason,
            last_position,
        });
    }

    /// Hand every event raised since the last drain to the caller
    pub fn take_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }

    /// True once every destructible obstacle is gone
    pub fn is_cleared(&self) -> bool {
        self.scene.destructible_count() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_parked() {
        let state = SimulationState::new(Settings::default(), 1);
        assert!(!state.is_projectile_active());
        assert_eq!(state.projectile.position, state.settings.parked_position);
        assert_eq!(state.scene.destructible_count(), 9);
        assert!(state.matched.is_none());
        assert!(!state.is_cleared());
    }

    #[test]
    fn test_launch_records_flight() {
        let mut state = SimulationState::new(Settings::default(), 1);
        assert!(state.launch(Vec3::new(0.0, 0.0, -1.0), 50.0, 4.0));

        let flight = state.projectile.projectile_state().unwrap();
        assert!(flight.active);
        assert_eq!(flight.initial_position, Vec3::new(0.0, -5.0, 15.0));
        assert_eq!(flight.initial_velocity, Vec3::new(0.0, 0.0, -50.0));
        assert_eq!(flight.launch_time, 4.0);

        // Second launch is a no-op
        assert!(!state.launch(Vec3::X, 50.0, 5.0));
        let events = state.take_events();
        assert_eq!(events.len(), 1);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_park_projectile() {
        let mut state = SimulationState::new(Settings::default(), 1);
        state.launch(Vec3::NEG_Z, 50.0, 0.0);
        state.projectile.position = Vec3::new(3.0, 2.0, 1.0);
        state.park_projectile(ResetReason::OutOfBounds);

        assert!(!state.is_projectile_active());
        assert_eq!(state.projectile.position, state.settings.parked_position);
        assert_eq!(
            state.events.last(),
            Some(&SimEvent::ProjectileReset {
                reason: ResetReason::OutOfBounds,
                last_position: Vec3::new(3.0, 2.0, 1.0),
            })
        );
    }
}
