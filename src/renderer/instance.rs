//! Per-entity instance data for the draw layer

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

use crate::sim::{Entity, SimulationState};

/// One drawable entity, laid out for direct upload to an instance buffer
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct RenderInstance {
    /// Column-major model matrix: translate * rotate_y * scale
    pub model: [[f32; 4]; 4],
    /// Index into the shared mesh table
    pub mesh: u32,
    /// 1 if the entity should be drawn
    pub visible: u32,
    pub _padding: [u32; 2],
}

impl RenderInstance {
    pub fn from_entity(entity: &Entity) -> Self {
        Self {
            model: model_matrix(entity.position, entity.rotation, entity.scale).to_cols_array_2d(),
            mesh: entity.mesh.0,
            visible: entity.visible as u32,
            _padding: [0; 2],
        }
    }

    /// World-space translation of the instance
    pub fn translation(&self) -> Vec3 {
        let col = self.model[3];
        Vec3::new(col[0], col[1], col[2])
    }
}

/// Model matrix for a yaw-only pose (rotation in degrees)
pub fn model_matrix(position: Vec3, rotation_deg: f32, scale: Vec3) -> Mat4 {
    Mat4::from_translation(position)
        * Mat4::from_rotation_y(rotation_deg.to_radians())
        * Mat4::from_scale(scale)
}

/// Finalized instances for the current frame.
///
/// Registry entities come first in draw order, the projectile last.
pub fn snapshot(state: &SimulationState) -> Vec<RenderInstance> {
    let mut instances = Vec::with_capacity(state.scene.len() + 1);
    instances.extend(state.scene.iter().map(RenderInstance::from_entity));
    instances.push(RenderInstance::from_entity(&state.projectile));
    instances
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::{TickInput, tick};

    #[test]
    fn test_instance_is_gpu_sized() {
        assert_eq!(std::mem::size_of::<RenderInstance>(), 80);
        let zero = RenderInstance::zeroed();
        let bytes = bytemuck::bytes_of(&zero);
        assert_eq!(bytes.len(), 80);
    }

    #[test]
    fn test_model_matrix_order() {
        let m = model_matrix(Vec3::new(1.0, 2.0, 3.0), 90.0, Vec3::splat(2.0));
        // +X scaled then yawed 90° lands on -Z, then translated
        let p = m.transform_point3(Vec3::X);
        assert!((p - Vec3::new(1.0, 2.0, 1.0)).length() < 1e-5);
    }

    #[test]
    fn test_snapshot_matches_scene() {
        let mut state = SimulationState::new(Settings::default(), 3);
        tick(&mut state, &TickInput::default(), 0.0);

        let instances = snapshot(&state);
        assert_eq!(instances.len(), state.scene.len() + 1);
        for (instance, entity) in instances.iter().zip(state.scene.iter()) {
            assert_eq!(instance.mesh, entity.mesh.0);
            assert_eq!(instance.visible, 1);
            assert!((instance.translation() - entity.position).length() < 1e-6);
        }
        let ball = instances.last().unwrap();
        assert_eq!(ball.mesh, state.projectile.mesh.0);
        assert_eq!(ball.translation(), state.settings.parked_position);
    }

    #[test]
    fn test_hidden_entities_are_flagged() {
        let mut state = SimulationState::new(Settings::default(), 3);
        state.projectile.visible = false;
        let instances = snapshot(&state);
        assert_eq!(instances.last().unwrap().visible, 0);
    }
}
