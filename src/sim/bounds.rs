//! Axis-aligned bounding boxes
//!
//! Every entity carries one, rebuilt each frame from its position and a fixed
//! per-asset radius. Collision is a closed-interval overlap test.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// An axis-aligned box
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: Vec3,
    pub max: Vec3,
}

impl BoundingBox {
    /// Cube of half-extent `radius` centered on `center`
    pub fn around(center: Vec3, radius: f32) -> Self {
        let mut bounds = Self::default();
        bounds.recompute(center, radius);
        bounds
    }

    /// Overwrite the box with a cube of half-extent `radius` around `center`
    #[inline]
    pub fn recompute(&mut self, center: Vec3, radius: f32) {
        let half = Vec3::splat(radius.abs());
        self.min = center - half;
        self.max = center + half;
    }

    /// Closed-interval overlap on all three axes (touching counts)
    #[inline]
    pub fn overlaps(&self, other: &BoundingBox) -> bool {
        self.min.cmple(other.max).all() && self.max.cmpge(other.min).all()
    }

    /// Center point of the box
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Half-size along each axis
    pub fn half_extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_around_builds_cube() {
        let b = BoundingBox::around(Vec3::new(1.0, 2.0, 3.0), 1.0);
        assert_eq!(b.min, Vec3::new(0.0, 1.0, 2.0));
        assert_eq!(b.max, Vec3::new(2.0, 3.0, 4.0));
        assert_eq!(b.center(), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(b.half_extents(), Vec3::ONE);
    }

    #[test]
    fn test_recompute_overwrites() {
        let mut b = BoundingBox::around(Vec3::splat(100.0), 5.0);
        b.recompute(Vec3::ZERO, 0.5);
        assert_eq!(b.min, Vec3::splat(-0.5));
        assert_eq!(b.max, Vec3::splat(0.5));
    }

    #[test]
    fn test_overlap_and_touching() {
        let a = BoundingBox::around(Vec3::ZERO, 1.0);
        // Faces touch at x = 1
        let touching = BoundingBox::around(Vec3::new(2.0, 0.0, 0.0), 1.0);
        assert!(a.overlaps(&touching));
        // Separated on one axis only
        let apart = BoundingBox::around(Vec3::new(0.0, 0.0, 2.01), 1.0);
        assert!(!a.overlaps(&apart));
        // Corner overlap
        let corner = BoundingBox::around(Vec3::splat(1.5), 1.0);
        assert!(a.overlaps(&corner));
    }

    #[test]
    fn test_contained_box_overlaps() {
        let big = BoundingBox::around(Vec3::ZERO, 10.0);
        let small = BoundingBox::around(Vec3::new(3.0, -2.0, 1.0), 0.5);
        assert!(big.overlaps(&small));
        assert!(small.overlaps(&big));
    }

    fn arb_box() -> impl Strategy<Value = BoundingBox> {
        (
            -50.0f32..50.0,
            -50.0f32..50.0,
            -50.0f32..50.0,
            0.0f32..10.0,
        )
            .prop_map(|(x, y, z, r)| BoundingBox::around(Vec3::new(x, y, z), r))
    }

    proptest! {
        #[test]
        fn prop_overlap_is_symmetric(a in arb_box(), b in arb_box()) {
            prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
        }

        #[test]
        fn prop_overlap_is_reflexive(a in arb_box()) {
            prop_assert!(a.overlaps(&a));
        }

        #[test]
        fn prop_min_never_exceeds_max(a in arb_box()) {
            prop_assert!(a.min.cmple(a.max).all());
        }
    }
}
