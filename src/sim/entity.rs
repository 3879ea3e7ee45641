//! Scene entities
//!
//! One struct for everything placed in the scene. Behaviour is picked by
//! `EntityKind` (obstacle or projectile) and, for obstacles, by `Tag`.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::bounds::BoundingBox;
use super::mesh::MeshHandle;
use crate::advance_spin;
use crate::settings::Settings;

/// Stable entity identifier (never reused within a scene)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

/// Scene role of an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tag {
    /// Bobbing target, destroyed on hit
    Box,
    /// Static boundary wall (test-but-ignore)
    Wall,
    /// Static floor slab
    Floor,
    /// The launchable projectile
    Ball,
}

impl Tag {
    /// Returns true if a projectile hit removes entities with this tag
    pub fn is_destructible(&self) -> bool {
        *self == Tag::Box
    }

    /// Returns true if entities with this tag bob and spin every frame
    pub fn animates(&self) -> bool {
        *self == Tag::Box
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Tag::Box => "box",
            Tag::Wall => "wall",
            Tag::Floor => "floor",
            Tag::Ball => "ball",
        }
    }
}

/// Vertical bob direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Bob {
    #[default]
    Descending,
    Ascending,
}

/// Obstacle motion state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObstacleMotion {
    pub bob: Bob,
    /// Height the bob band is centered on
    pub spawn_y: f32,
}

/// Projectile flight state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectileState {
    pub initial_position: Vec3,
    pub initial_velocity: Vec3,
    /// Clock reading at launch (seconds)
    pub launch_time: f32,
    /// False while parked
    pub active: bool,
}

impl ProjectileState {
    /// Parked projectile waiting at `position`
    pub fn parked(position: Vec3) -> Self {
        Self {
            initial_position: position,
            initial_velocity: Vec3::ZERO,
            launch_time: 0.0,
            active: false,
        }
    }

    /// Position on the launch trajectory at clock reading `now`
    pub fn position_at(&self, now: f32, gravity: Vec3) -> Vec3 {
        ballistic_position(
            self.initial_position,
            self.initial_velocity,
            gravity,
            now - self.launch_time,
        )
    }
}

/// Per-kind payload
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EntityKind {
    Obstacle(ObstacleMotion),
    Projectile(ProjectileState),
}

/// A placed object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub name: String,
    pub tag: Tag,
    pub kind: EntityKind,
    pub position: Vec3,
    /// Yaw in degrees around +Y
    pub rotation: f32,
    pub scale: Vec3,
    pub visible: bool,
    pub mesh: MeshHandle,
    pub collision_radius: f32,
    pub bounds: BoundingBox,
}

impl Entity {
    /// Create an obstacle at its spawn pose
    #[allow(clippy::too_many_arguments)]
    pub fn obstacle(
        id: EntityId,
        name: impl Into<String>,
        tag: Tag,
        mesh: MeshHandle,
        collision_radius: f32,
        position: Vec3,
        rotation: f32,
        scale: Vec3,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            tag,
            kind: EntityKind::Obstacle(ObstacleMotion {
                bob: Bob::Descending,
                spawn_y: position.y,
            }),
            position,
            rotation,
            scale,
            visible: true,
            mesh,
            collision_radius,
            bounds: BoundingBox::around(position, collision_radius),
        }
    }

    /// Create a parked projectile
    pub fn projectile(
        id: EntityId,
        name: impl Into<String>,
        mesh: MeshHandle,
        collision_radius: f32,
        parked_at: Vec3,
        scale: Vec3,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            tag: Tag::Ball,
            kind: EntityKind::Projectile(ProjectileState::parked(parked_at)),
            position: parked_at,
            rotation: 0.0,
            scale,
            visible: true,
            mesh,
            collision_radius,
            bounds: BoundingBox::around(parked_at, collision_radius),
        }
    }

    pub fn is_projectile(&self) -> bool {
        matches!(self.kind, EntityKind::Projectile(_))
    }

    pub fn projectile_state(&self) -> Option<&ProjectileState> {
        match &self.kind {
            EntityKind::Projectile(p) => Some(p),
            EntityKind::Obstacle(_) => None,
        }
    }

    /// True for a projectile in flight
    pub fn is_active(&self) -> bool {
        self.projectile_state().is_some_and(|p| p.active)
    }

    /// Advance this entity by one frame and rebuild its bounds
    pub fn update(&mut self, now: f32, settings: &Settings) {
        match &mut self.kind {
            EntityKind::Obstacle(motion) => {
                if self.tag.animates() {
                    self.rotation = advance_spin(self.rotation, settings.spin_step_deg);
                    self.position.y =
                        step_bob(motion, self.position.y, settings.bob_step, settings.bob_amplitude);
                }
            }
            EntityKind::Projectile(state) => {
                if state.active {
                    self.position = state.position_at(now, settings.gravity);
                    self.rotation = advance_spin(self.rotation, settings.spin_step_deg);
                }
            }
        }
        self.refresh_bounds();
    }

    /// Start a flight from the current position.
    ///
    /// Returns false (and changes nothing) if this is not a parked projectile.
    pub fn launch(&mut self, velocity: Vec3, now: f32) -> bool {
        let position = self.position;
        match &mut self.kind {
            EntityKind::Projectile(state) if !state.active => {
                *state = ProjectileState {
                    initial_position: position,
                    initial_velocity: velocity,
                    launch_time: now,
                    active: true,
                };
                true
            }
            _ => false,
        }
    }

    /// Deactivate a projectile and move it to `parked_at`
    pub fn park(&mut self, parked_at: Vec3) {
        if let EntityKind::Projectile(state) = &mut self.kind {
            *state = ProjectileState::parked(parked_at);
            self.position = parked_at;
            self.refresh_bounds();
        }
    }

    /// Rebuild the bounding box from the current position
    #[inline]
    pub fn refresh_bounds(&mut self) {
        self.bounds.recompute(self.position, self.collision_radius);
    }
}

/// Move `y` one bob step and flip direction once it leaves the band
fn step_bob(motion: &mut ObstacleMotion, y: f32, step: f32, amplitude: f32) -> f32 {
    match motion.bob {
        Bob::Descending => {
            let y = y - step;
            if y < motion.spawn_y - amplitude {
                motion.bob = Bob::Ascending;
            }
            y
        }
        Bob::Ascending => {
            let y = y + step;
            if y > motion.spawn_y + amplitude {
                motion.bob = Bob::Descending;
            }
            y
        }
    }
}

/// Closed-form ballistic position: `p0 + v0 t + ½ g t²`
#[inline]
pub fn ballistic_position(p0: Vec3, v0: Vec3, gravity: Vec3, t: f32) -> Vec3 {
    p0 + v0 * t + 0.5 * gravity * t * t
}
