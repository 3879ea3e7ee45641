//! Shared mesh asset table
//!
//! Duplicate placements of the same model share one table slot. Entities
//! keep a `MeshHandle`; the draw layer resolves it to GPU buffers it loaded
//! itself. The simulation only needs the per-asset collision radius.

use serde::{Deserialize, Serialize};

/// Index into a `MeshTable`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MeshHandle(pub u32);

/// One loaded asset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeshAsset {
    /// Asset path as given to the loader
    pub path: String,
    /// Half-extent of the collision box for every instance of this asset
    pub collision_radius: f32,
    /// Number of live entities aliasing this asset
    pub instances: u32,
}

/// Load-once, instance-many asset table
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MeshTable {
    assets: Vec<MeshAsset>,
}

impl MeshTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the handle for `path`, registering it on first use.
    ///
    /// The radius of the first registration wins; later placements alias the
    /// existing slot.
    pub fn intern(&mut self, path: &str, collision_radius: f32) -> MeshHandle {
        if let Some(idx) = self.assets.iter().position(|a| a.path == path) {
            let asset = &mut self.assets[idx];
            asset.instances += 1;
            if asset.collision_radius != collision_radius {
                log::debug!(
                    "Mesh {} reused with radius {} (keeping {})",
                    path,
                    collision_radius,
                    asset.collision_radius
                );
            }
            return MeshHandle(idx as u32);
        }

        log::debug!("Registered mesh {} (radius {})", path, collision_radius);
        self.assets.push(MeshAsset {
            path: path.to_string(),
            collision_radius,
            instances: 1,
        });
        MeshHandle((self.assets.len() - 1) as u32)
    }

    /// Drop one instance of an asset whose entity left the scene.
    ///
    /// The slot itself stays loaded so handles remain valid.
    pub fn release(&mut self, handle: MeshHandle) {
        match self.assets.get_mut(handle.0 as usize) {
            Some(asset) if asset.instances > 0 => asset.instances -= 1,
            Some(asset) => log::warn!("Mesh {} released with no live instances", asset.path),
            None => log::warn!("Released unknown mesh handle {:?}", handle),
        }
    }

    pub fn get(&self, handle: MeshHandle) -> Option<&MeshAsset> {
        self.assets.get(handle.0 as usize)
    }

    /// Number of distinct assets
    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (MeshHandle, &MeshAsset)> {
        self.assets
            .iter()
            .enumerate()
            .map(|(i, a)| (MeshHandle(i as u32), a))
    }
}
