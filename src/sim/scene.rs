//! Scene registry and layouts
//!
//! The registry owns every placed obstacle in draw order. The projectile is
//! kept outside it by `SimulationState`.

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::entity::{Entity, EntityId, Tag};
use super::mesh::MeshTable;
use crate::consts::COLLISION_RADIUS;

/// Ordered collection of live obstacles
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scene {
    entities: Vec<Entity>,
    next_id: u32,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    pub fn new() -> Self {
        Self {
            entities: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Append an obstacle. Projectiles are refused.
    pub fn insert(&mut self, entity: Entity) -> Option<EntityId> {
        if entity.is_projectile() {
            log::warn!("Refusing to register projectile {} in the scene", entity.name);
            return None;
        }
        if self.get(entity.id).is_some() {
            log::warn!("Entity {:?} already registered", entity.id);
            return None;
        }
        let id = entity.id;
        self.entities.push(entity);
        Some(id)
    }

    /// Remove an entity, keeping survivors in order.
    ///
    /// Returns `None` if the id is not (or no longer) registered.
    pub fn remove(&mut self, id: EntityId) -> Option<Entity> {
        let idx = self.entities.iter().position(|e| e.id == id)?;
        Some(self.entities.remove(idx))
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.entities.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Number of entities a hit can still destroy
    pub fn destructible_count(&self) -> usize {
        self.entities
            .iter()
            .filter(|e| e.tag.is_destructible())
            .count()
    }
}

/// Errors raised while loading a layout
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("failed to read layout file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed layout JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("placement `{0}` is tagged as a ball; the projectile goes in `projectile`")]
    ProjectileInRegistry(String),
}

fn default_radius() -> f32 {
    COLLISION_RADIUS
}

fn unit_scale() -> Vec3 {
    Vec3::ONE
}

/// One obstacle placement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Placement {
    pub name: String,
    pub tag: Tag,
    /// Asset path handed to the mesh table
    pub asset: String,
    #[serde(default = "default_radius")]
    pub collision_radius: f32,
    pub position: Vec3,
    /// Yaw in degrees
    #[serde(default)]
    pub rotation: f32,
    #[serde(default = "unit_scale")]
    pub scale: Vec3,
}

/// Projectile placement; it spawns parked
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectilePlacement {
    pub name: String,
    pub asset: String,
    #[serde(default = "default_radius")]
    pub collision_radius: f32,
    #[serde(default = "unit_scale")]
    pub scale: Vec3,
}

/// Full scene description
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneLayout {
    pub placements: Vec<Placement>,
    pub projectile: ProjectilePlacement,
}

const BOX_ASSET: &str = "Models/Box/box.obj";
const FLOOR_ASSET: &str = "Models/Floor/floor.obj";
const WALL_ASSET: &str = "Models/Wall/wall.obj";
const BALL_ASSET: &str = "Models/Ball/ball.obj";

impl SceneLayout {
    /// The stock level: a 3x3 grid of boxes in front of a walled yard
    pub fn reference() -> Self {
        let mut placements = Vec::new();

        // Boxes, drawn in this order
        let grid = [
            (0.0, 0.0),
            (-5.0, 0.0),
            (5.0, 0.0),
            (0.0, 5.0),
            (0.0, -5.0),
            (5.0, -5.0),
            (-5.0, -5.0),
            (5.0, 5.0),
            (-5.0, 5.0),
        ];
        for (i, (x, y)) in grid.into_iter().enumerate() {
            placements.push(Placement {
                name: format!("box{}", i),
                tag: Tag::Box,
                asset: BOX_ASSET.to_string(),
                collision_radius: COLLISION_RADIUS,
                position: Vec3::new(x, y, -7.0),
                rotation: 0.0,
                scale: Vec3::splat(0.6),
            });
        }

        placements.push(Placement {
            name: "floor".to_string(),
            tag: Tag::Floor,
            asset: FLOOR_ASSET.to_string(),
            collision_radius: COLLISION_RADIUS,
            position: Vec3::new(0.0, -7.0, 0.0),
            rotation: 0.0,
            scale: Vec3::splat(7.0),
        });

        let walls = [
            (Vec3::new(0.0, -6.0, -15.0), 0.0),
            (Vec3::new(-13.0, -6.0, -7.0), 90.0),
            (Vec3::new(13.0, -6.0, -7.0), -90.0),
            (Vec3::new(13.0, -6.0, 10.0), -90.0),
            (Vec3::new(-13.0, -6.0, 10.0), 90.0),
            (Vec3::new(0.0, -6.0, 22.0), 180.0),
        ];
        for (i, (position, rotation)) in walls.into_iter().enumerate() {
            placements.push(Placement {
                name: format!("wall{}", i),
                tag: Tag::Wall,
                asset: WALL_ASSET.to_string(),
                collision_radius: COLLISION_RADIUS,
                position,
                rotation,
                scale: Vec3::splat(0.1),
            });
        }

        Self {
            placements,
            projectile: ProjectilePlacement {
                name: "ball".to_string(),
                asset: BALL_ASSET.to_string(),
                collision_radius: COLLISION_RADIUS,
                scale: Vec3::splat(0.1),
            },
        }
    }

    /// Parse a layout from JSON
    pub fn from_json_str(json: &str) -> Result<Self, LayoutError> {
        let layout: SceneLayout = serde_json::from_str(json)?;
        layout.validate()?;
        Ok(layout)
    }

    /// Load a layout from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LayoutError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let layout = Self::from_json_str(&json)?;
        log::info!(
            "Loaded layout from {} ({} placements)",
            path.as_ref().display(),
            layout.placements.len()
        );
        Ok(layout)
    }

    pub fn validate(&self) -> Result<(), LayoutError> {
        if let Some(p) = self.placements.iter().find(|p| p.tag == Tag::Ball) {
            return Err(LayoutError::ProjectileInRegistry(p.name.clone()));
        }
        Ok(())
    }

    /// Build the registry and the parked projectile.
    ///
    /// Ball-tagged placements are skipped; the only projectile is the one
    /// described by `projectile`.
    pub fn instantiate(&self, meshes: &mut MeshTable, parked_at: Vec3) -> (Scene, Entity) {
        let mut scene = Scene::new();
        for p in &self.placements {
            if p.tag == Tag::Ball {
                log::warn!("Skipping placement {}: balls cannot be obstacles", p.name);
                continue;
            }
            let mesh = meshes.intern(&p.asset, p.collision_radius);
            let id = scene.next_entity_id();
            let placed = scene.insert(Entity::obstacle(
                id,
                p.name.clone(),
                p.tag,
                mesh,
                p.collision_radius,
                p.position,
                p.rotation,
                p.scale,
            ));
            if placed.is_none() {
                meshes.release(mesh);
            }
        }

        let proj = &self.projectile;
        let mesh = meshes.intern(&proj.asset, proj.collision_radius);
        let id = scene.next_entity_id();
        let projectile = Entity::projectile(
            id,
            proj.name.clone(),
            mesh,
            proj.collision_radius,
            parked_at,
            proj.scale,
        );

        log::info!(
            "Scene ready: {} entities ({} destructible), {} meshes",
            scene.len(),
            scene.destructible_count(),
            meshes.len()
        );
        (scene, projectile)
    }
}

impl Default for SceneLayout {
    fn default() -> Self {
        Self::reference()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::mesh::MeshHandle;

    fn obstacle(scene: &mut Scene, name: &str) -> EntityId {
        let id = scene.next_entity_id();
        scene
            .insert(Entity::obstacle(
                id,
                name,
                Tag::Box,
                MeshHandle(0),
                1.0,
                Vec3::ZERO,
                0.0,
                Vec3::ONE,
            ))
            .unwrap()
    }

    fn names(scene: &Scene) -> Vec<String> {
        scene.iter().map(|e| e.name.clone()).collect()
    }

    #[test]
    fn test_remove_preserves_order() {
        let mut scene = Scene::new();
        obstacle(&mut scene, "a");
        let b = obstacle(&mut scene, "b");
        obstacle(&mut scene, "c");
        obstacle(&mut scene, "d");

        let removed = scene.remove(b).unwrap();
        assert_eq!(removed.name, "b");
        assert_eq!(names(&scene), vec!["a", "c", "d"]);
    }

    #[test]
    fn test_double_remove_is_none() {
        let mut scene = Scene::new();
        let a = obstacle(&mut scene, "a");
        assert!(scene.remove(a).is_some());
        assert!(scene.remove(a).is_none());
        assert!(scene.is_empty());
    }

    #[test]
    fn test_refuses_projectile_and_duplicates() {
        let mut scene = Scene::new();
        let id = scene.next_entity_id();
        let ball = Entity::projectile(id, "ball", MeshHandle(0), 1.0, Vec3::ZERO, Vec3::ONE);
        assert!(scene.insert(ball).is_none());

        let a = obstacle(&mut scene, "a");
        let dup = scene.get(a).unwrap().clone();
        assert!(scene.insert(dup).is_none());
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn test_ids_are_not_reused() {
        let mut scene = Scene::new();
        let a = obstacle(&mut scene, "a");
        scene.remove(a);
        let b = obstacle(&mut scene, "b");
        assert_ne!(a, b);
    }

    #[test]
    fn test_reference_layout() {
        let layout = SceneLayout::reference();
        let mut meshes = MeshTable::new();
        let (scene, ball) = layout.instantiate(&mut meshes, crate::consts::PARKED_POSITION);

        assert_eq!(scene.len(), 16);
        assert_eq!(scene.destructible_count(), 9);
        // box, floor, wall, ball
        assert_eq!(meshes.len(), 4);
        assert!(ball.is_projectile());
        assert_eq!(ball.position, Vec3::new(0.0, -5.0, 15.0));
        assert!(scene.iter().all(|e| e.id != ball.id));

        let boxes: Vec<_> = scene.iter().filter(|e| e.tag == Tag::Box).collect();
        assert!(boxes.iter().all(|e| e.mesh == boxes[0].mesh));
        assert!(boxes.iter().all(|e| e.position.z == -7.0));
    }

    #[test]
    fn test_instantiate_skips_ball_placements() {
        let mut layout = SceneLayout::reference();
        layout.placements.insert(
            1,
            Placement {
                name: "stray".to_string(),
                tag: Tag::Ball,
                asset: BALL_ASSET.to_string(),
                collision_radius: COLLISION_RADIUS,
                position: Vec3::ZERO,
                rotation: 0.0,
                scale: Vec3::ONE,
            },
        );
        assert!(layout.validate().is_err());

        let mut meshes = MeshTable::new();
        let (scene, ball) = layout.instantiate(&mut meshes, crate::consts::PARKED_POSITION);

        assert_eq!(scene.len(), 16);
        assert!(scene.iter().all(|e| e.tag != Tag::Ball && e.name != "stray"));
        assert_eq!(meshes.get(ball.mesh).unwrap().instances, 1);
    }

    #[test]
    fn test_layout_json_defaults() {
        let json = r#"{
            "placements": [
                { "name": "target", "tag": "box", "asset": "box.obj", "position": [1.0, 2.0, -3.0] }
            ],
            "projectile": { "name": "ball", "asset": "ball.obj" }
        }"#;
        let layout = SceneLayout::from_json_str(json).unwrap();
        let p = &layout.placements[0];
        assert_eq!(p.collision_radius, COLLISION_RADIUS);
        assert_eq!(p.scale, Vec3::ONE);
        assert_eq!(p.rotation, 0.0);
    }

    #[test]
    fn test_layout_rejects_ball_placement() {
        let json = r#"{
            "placements": [
                { "name": "stray", "tag": "ball", "asset": "ball.obj", "position": [0.0, 0.0, 0.0] }
            ],
            "projectile": { "name": "ball", "asset": "ball.obj" }
        }"#;
        let err = SceneLayout::from_json_str(json).unwrap_err();
        assert!(matches!(err, LayoutError::ProjectileInRegistry(name) if name == "stray"));
    }
}
