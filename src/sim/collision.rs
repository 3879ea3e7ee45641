//! Projectile vs scene collision detection
//!
//! Brute force: the projectile box is tested against every registered
//! entity in registry order. Only destructible entities can be matched;
//! everything else is tested and ignored.

use super::bounds::BoundingBox;
use super::entity::EntityId;
use super::scene::Scene;

/// Result of a collision scan
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollisionResult {
    /// First destructible entity overlapped, in registry order
    pub matched: Option<EntityId>,
    /// Non-destructible entities overlapped before the scan stopped
    pub ignored: Vec<EntityId>,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self::default()
    }

    pub fn hit(&self) -> bool {
        self.matched.is_some()
    }
}

/// Scan the registry for the projectile's first destructible overlap.
///
/// The scan stops at the first match, so at most one entity is reported per
/// call no matter how many overlap.
pub fn detect_collision(projectile: &BoundingBox, scene: &Scene) -> CollisionResult {
    let mut result = CollisionResult::miss();

    for entity in scene.iter() {
        if !projectile.overlaps(&entity.bounds) {
            continue;
        }
        if entity.tag.is_destructible() {
            result.matched = Some(entity.id);
            break;
        }
        result.ignored.push(entity.id);
    }

    result
}
