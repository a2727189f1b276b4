//! Axis-aligned bounding-box collision
//!
//! Every entity in the arena is a rectangle in screen space (y grows
//! downward), so a single inclusive overlap test covers projectiles,
//! invaders, obstacles and the player ship.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle given by its top-left and bottom-right corners
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    /// Build from a top-left position and a size
    #[inline]
    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self {
            min: pos,
            max: pos + size,
        }
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Shrink each side by the given insets (left/right share `x`)
    pub fn inset(&self, x: f32, top: f32, bottom: f32) -> Self {
        Self {
            min: Vec2::new(self.min.x + x, self.min.y + top),
            max: Vec2::new(self.max.x - x, self.max.y - bottom),
        }
    }

    /// Inclusive overlap: rectangles that share an edge collide
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn rect(x: f32, y: f32, w: f32, h: f32) -> Aabb {
        Aabb::from_pos_size(Vec2::new(x, y), Vec2::new(w, h))
    }

    #[test]
    fn test_overlap_basic() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        assert!(a.overlaps(&rect(5.0, 5.0, 10.0, 10.0)));
        assert!(!a.overlaps(&rect(20.0, 0.0, 5.0, 5.0)));
        assert!(!a.overlaps(&rect(0.0, 11.0, 5.0, 5.0)));
    }

    #[test]
    fn test_touching_edges_collide() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        assert!(a.overlaps(&rect(10.0, 0.0, 5.0, 5.0)));
        assert!(a.overlaps(&rect(0.0, 10.0, 5.0, 5.0)));
    }

    #[test]
    fn test_thin_projectile_through_block() {
        // A 2px wide shot fully inside a wide obstacle
        let obstacle = rect(100.0, 300.0, 100.0, 20.0);
        let shot = rect(150.0, 290.0, 2.0, 20.0);
        assert!(obstacle.overlaps(&shot));
    }

    #[test]
    fn test_inset_and_center() {
        let a = rect(0.0, 0.0, 96.0, 96.0).inset(20.0, 22.0, 34.0);
        assert_eq!(a.min, Vec2::new(20.0, 22.0));
        assert_eq!(a.max, Vec2::new(76.0, 62.0));
        assert_eq!(rect(0.0, 0.0, 10.0, 20.0).center(), Vec2::new(5.0, 10.0));
    }

    proptest! {
        #[test]
        fn overlap_is_symmetric(
            ax in -500.0f32..500.0, ay in -500.0f32..500.0, aw in 0.0f32..200.0, ah in 0.0f32..200.0,
            bx in -500.0f32..500.0, by in -500.0f32..500.0, bw in 0.0f32..200.0, bh in 0.0f32..200.0,
        ) {
            let a = rect(ax, ay, aw, ah);
            let b = rect(bx, by, bw, bh);
            prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
        }

        #[test]
        fn box_overlaps_itself(x in -500.0f32..500.0, y in -500.0f32..500.0, w in 0.0f32..200.0, h in 0.0f32..200.0) {
            let a = rect(x, y, w, h);
            prop_assert!(a.overlaps(&a));
            prop_assert!(a.overlaps(&Aabb::from_pos_size(a.center(), Vec2::ZERO)));
        }
    }
}
