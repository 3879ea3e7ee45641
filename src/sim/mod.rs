//! Frame-driven simulation module
//!
//! All gameplay logic lives here:
//! - One step per frame, clock supplied by the caller
//! - Seeded RNG only (autopilot)
//! - Registry order is draw order and collision order
//! - No rendering or platform dependencies

pub mod bounds;
pub mod collision;
pub mod entity;
pub mod mesh;
pub mod scene;
pub mod state;
pub mod tick;

pub use bounds::BoundingBox;
pub use collision::{CollisionResult, detect_collision};
pub use entity::{Bob, Entity, EntityId, EntityKind, ObstacleMotion, ProjectileState, Tag, ballistic_position};
pub use mesh::{MeshAsset, MeshHandle, MeshTable};
pub use scene::{LayoutError, Placement, ProjectilePlacement, Scene, SceneLayout};
pub use state::{ResetReason, SimEvent, SimulationState};
pub use tick::{Launch, TickInput, tick};
