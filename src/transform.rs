//! 2D affine transform with lazy matrix caching
//!
//! Setters mark the cached matrix dirty; `matrix()` recomputes on demand.
//! The accessor takes `&mut self` so the cache is an ordinary mutable
//! field rather than interior mutability behind a shared reference.

use glam::{Mat3, Vec2, Vec3};

use crate::geometry::Aabb;

/// Anchor + position + non-uniform scale + rotation.
///
/// Composition order, applied to a point: scale, then rotate, then
/// subtract the anchor offset (so rotation and scale pivot around the
/// anchor rather than the origin), then translate to position.
#[derive(Debug, Clone)]
pub struct Transform2D {
    anchor: Vec2,
    position: Vec2,
    scale: Vec2,
    rotation: f32,
    cached: Mat3,
    dirty: bool,
}

impl Default for Transform2D {
    fn default() -> Self {
        Self {
            anchor: Vec2::ZERO,
            position: Vec2::ZERO,
            scale: Vec2::ONE,
            rotation: 0.0,
            cached: Mat3::IDENTITY,
            dirty: false,
        }
    }
}

impl Transform2D {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn anchor(&self) -> Vec2 {
        self.anchor
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    #[inline]
    pub fn scale(&self) -> Vec2 {
        self.scale
    }

    #[inline]
    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn set_anchor(&mut self, anchor: Vec2) {
        if self.anchor != anchor {
            self.anchor = anchor;
            self.dirty = true;
        }
    }

    pub fn set_position(&mut self, position: Vec2) {
        if self.position != position {
            self.position = position;
            self.dirty = true;
        }
    }

    pub fn set_scale(&mut self, scale: Vec2) {
        if self.scale != scale {
            self.scale = scale;
            self.dirty = true;
        }
    }

    /// Rotation in radians
    pub fn set_rotation(&mut self, rotation: f32) {
        if self.rotation != rotation {
            self.rotation = rotation;
            self.dirty = true;
        }
    }

    /// Builder-style setters for one-shot construction
    pub fn with_anchor(mut self, anchor: Vec2) -> Self {
        self.set_anchor(anchor);
        self
    }

    pub fn with_position(mut self, position: Vec2) -> Self {
        self.set_position(position);
        self
    }

    pub fn with_scale(mut self, scale: Vec2) -> Self {
        self.set_scale(scale);
        self
    }

    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.set_rotation(rotation);
        self
    }

    /// The 3x3 matrix, recomputed only when a component changed since the
    /// last call.
    pub fn matrix(&mut self) -> Mat3 {
        if self.dirty {
            self.cached = Mat3::from_scale_angle_translation(
                self.scale,
                self.rotation,
                self.position - self.anchor,
            );
            self.dirty = false;
        }
        self.cached
    }

    #[inline]
    pub fn transform_point(&mut self, p: Vec2) -> Vec2 {
        self.matrix().transform_point2(p)
    }

    /// Transform an AABB by mapping its min and max corners and rebuilding
    /// from the two results.
    ///
    /// Note: this does NOT compute the true rotated bounding box — only
    /// two opposite corners are transformed, which is exact for
    /// axis-aligned (unrotated) transforms and an approximation otherwise.
    /// Kept for compatibility with callers that rely on this behavior;
    /// code needing exact rotated extents must transform all four corners.
    pub fn transform_aabb(&mut self, aabb: &Aabb) -> Aabb {
        let m = self.matrix();
        let a = m.transform_point2(Vec2::new(aabb.min.x, aabb.min.y));
        let b = m.transform_point2(Vec2::new(aabb.max.x, aabb.max.y));
        Aabb::from_points(&[
            Vec3::new(a.x, a.y, aabb.min.z),
            Vec3::new(b.x, b.y, aabb.max.z),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;

    #[test]
    fn test_identity_by_default() {
        let mut t = Transform2D::new();
        assert_eq!(t.transform_point(Vec2::new(3.0, 4.0)), Vec2::new(3.0, 4.0));
    }

    #[test]
    fn test_translation_and_anchor() {
        let mut t = Transform2D::new()
            .with_position(Vec2::new(10.0, 20.0))
            .with_anchor(Vec2::new(2.0, 3.0));
        assert_eq!(t.transform_point(Vec2::ZERO), Vec2::new(8.0, 17.0));
    }

    #[test]
    fn test_scale_applies_before_translation() {
        let mut t = Transform2D::new()
            .with_scale(Vec2::new(2.0, 3.0))
            .with_position(Vec2::new(1.0, 1.0));
        assert_eq!(t.transform_point(Vec2::new(4.0, 4.0)), Vec2::new(9.0, 13.0));
    }

    #[test]
    fn test_rotation_pivot() {
        use std::f32::consts::FRAC_PI_2;
        let mut t = Transform2D::new().with_rotation(FRAC_PI_2);
        let p = t.transform_point(Vec2::new(1.0, 0.0));
        assert!((p.x - 0.0).abs() < 1e-5);
        assert!((p.y - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_setter_marks_dirty_and_recomputes() {
        let mut t = Transform2D::new();
        let m0 = t.matrix();
        t.set_position(Vec2::new(5.0, 0.0));
        let m1 = t.matrix();
        assert_ne!(m0, m1);
        // Same value again: no change
        t.set_position(Vec2::new(5.0, 0.0));
        assert_eq!(t.matrix(), m1);
    }

    #[test]
    fn test_aabb_transform_unrotated_is_exact() {
        let mut t = Transform2D::new().with_position(Vec2::new(10.0, 10.0));
        let aabb = Aabb::from(Rect::new(0, 0, 4, 4));
        let out = t.transform_aabb(&aabb);
        assert_eq!(out.min.x, 10.0);
        assert_eq!(out.min.y, 10.0);
        assert_eq!(out.max.x, 13.0);
        assert_eq!(out.max.y, 13.0);
    }

    #[test]
    fn test_aabb_transform_rotated_uses_two_corners() {
        use std::f32::consts::FRAC_PI_4;
        // 45° rotation of a square maps min/max onto a diagonal; the
        // rebuilt box is narrower than the true rotated extent.
        let mut t = Transform2D::new().with_rotation(FRAC_PI_4);
        let aabb = Aabb::from(Rect::new(0, 0, 11, 11));
        let out = t.transform_aabb(&aabb);
        assert!(out.width() < aabb.width() * 1.5);
    }
}
