//! Geometric primitives: rectangles, circles, spheres, and AABBs
//!
//! `Aabb` is the workhorse: every draw call clips against the target
//! image's bounds AABB, and `Rect` converts into it pervasively to unify
//! rectangle- and AABB-based APIs.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

// ============================================================================
// Rect
// ============================================================================

/// Axis-aligned rectangle given as origin + size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rect<T> {
    pub x: T,
    pub y: T,
    pub width: T,
    pub height: T,
}

impl<T: Copy> Rect<T> {
    pub const fn new(x: T, y: T, width: T, height: T) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

impl<T: Copy + std::ops::Add<Output = T>> Rect<T> {
    #[inline]
    pub fn right(&self) -> T {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> T {
        self.y + self.height
    }
}

/// Pixel convention: a WxH rect starting at (x, y) covers the inclusive
/// AABB [x, y] .. [x+W-1, y+H-1].
impl From<Rect<i32>> for Aabb {
    fn from(r: Rect<i32>) -> Self {
        Aabb::new(
            Vec3::new(r.x as f32, r.y as f32, 0.0),
            Vec3::new((r.x + r.width - 1) as f32, (r.y + r.height - 1) as f32, 0.0),
        )
    }
}

// ============================================================================
// Circle / Sphere
// ============================================================================

/// Circle as center + radius.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

impl Circle {
    pub const fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.center - Vec2::splat(self.radius)
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.center + Vec2::splat(self.radius)
    }

    #[inline]
    pub fn intersects(&self, other: &Circle) -> bool {
        let r = self.radius + other.radius;
        self.center.distance_squared(other.center) <= r * r
    }

    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        self.center.distance_squared(p) <= self.radius * self.radius
    }
}

impl From<Circle> for Aabb {
    fn from(c: Circle) -> Self {
        Aabb::new(c.min().extend(0.0), c.max().extend(0.0))
    }
}

/// Sphere as center + radius (z carried, unused for depth).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
}

impl Sphere {
    pub const fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    #[inline]
    pub fn min(&self) -> Vec3 {
        self.center - Vec3::splat(self.radius)
    }

    #[inline]
    pub fn max(&self) -> Vec3 {
        self.center + Vec3::splat(self.radius)
    }

    #[inline]
    pub fn intersects(&self, other: &Sphere) -> bool {
        let r = self.radius + other.radius;
        self.center.distance_squared(other.center) <= r * r
    }
}

// ============================================================================
// AABB
// ============================================================================

/// Cohen-Sutherland outcodes
const INSIDE: u8 = 0;
const LEFT: u8 = 1;
const RIGHT: u8 = 2;
const BOTTOM: u8 = 4;
const TOP: u8 = 8;

/// Axis-aligned bounding box with min/max corner points.
///
/// The default value is deliberately *invalid* (min = +INF, max = -INF)
/// so it acts as the identity for `expand`/union: expanding an invalid
/// AABB by a point yields that point. Operations like `clamped` may also
/// produce an invalid AABB when there is no overlap; callers iterating
/// pixels must go through `x_range`/`y_range`, which yield zero
/// iterations for invalid boxes.
///
/// z is carried to disambiguate stacked 2D shapes but is never used for
/// depth testing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Default for Aabb {
    fn default() -> Self {
        Self {
            min: Vec3::splat(f32::INFINITY),
            max: Vec3::splat(f32::NEG_INFINITY),
        }
    }
}

impl Aabb {
    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Smallest AABB containing all the given points
    pub fn from_points(points: &[Vec3]) -> Self {
        let mut aabb = Self::default();
        for &p in points {
            aabb.expand(p);
        }
        aabb
    }

    /// True when min <= max on every axis
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.min.x <= self.max.x && self.min.y <= self.max.y && self.min.z <= self.max.z
    }

    /// Horizontal extent in the inclusive-pixel convention
    #[inline]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x + 1.0
    }

    /// Vertical extent in the inclusive-pixel convention
    #[inline]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y + 1.0
    }

    #[inline]
    pub fn depth(&self) -> f32 {
        self.max.z - self.min.z + 1.0
    }

    /// Grow to contain a point. Expanding the invalid default yields a
    /// degenerate AABB at exactly that point.
    #[inline]
    pub fn expand(&mut self, p: Vec3) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    /// Union with another AABB
    #[inline]
    pub fn union(&self, other: &Aabb) -> Aabb {
        Aabb {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    #[inline]
    pub fn contains(&self, p: Vec3) -> bool {
        p.x >= self.min.x
            && p.x <= self.max.x
            && p.y >= self.min.y
            && p.y <= self.max.y
            && p.z >= self.min.z
            && p.z <= self.max.z
    }

    /// Separating-axis overlap test over per-axis min/max
    #[inline]
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }

    /// Conservative AABB-circle test: expands the box by the radius and
    /// checks the center. Slightly over-approximates near corners.
    #[inline]
    pub fn intersects_circle(&self, c: &Circle) -> bool {
        c.center.x >= self.min.x - c.radius
            && c.center.x <= self.max.x + c.radius
            && c.center.y >= self.min.y - c.radius
            && c.center.y <= self.max.y + c.radius
    }

    /// Conservative AABB-sphere test, same approximation as the circle one.
    #[inline]
    pub fn intersects_sphere(&self, s: &Sphere) -> bool {
        let expanded = Aabb {
            min: self.min - Vec3::splat(s.radius),
            max: self.max + Vec3::splat(s.radius),
        };
        expanded.contains(s.center)
    }

    /// Component-wise intersection, in place. May leave this AABB invalid
    /// when there is no overlap — check `is_valid` before iterating.
    #[inline]
    pub fn clamp(&mut self, other: &Aabb) {
        self.min = self.min.max(other.min);
        self.max = self.max.min(other.max);
    }

    /// Component-wise intersection, returning the result
    #[inline]
    pub fn clamped(&self, other: &Aabb) -> Aabb {
        let mut out = *self;
        out.clamp(other);
        out
    }

    /// Inclusive pixel columns covered by this AABB. Empty when invalid.
    pub fn x_range(&self) -> std::ops::RangeInclusive<i32> {
        if !self.is_valid() {
            #[allow(clippy::reversed_empty_ranges)]
            return 1..=0;
        }
        (self.min.x.floor() as i32)..=(self.max.x.floor() as i32)
    }

    /// Inclusive pixel rows covered by this AABB. Empty when invalid.
    pub fn y_range(&self) -> std::ops::RangeInclusive<i32> {
        if !self.is_valid() {
            #[allow(clippy::reversed_empty_ranges)]
            return 1..=0;
        }
        (self.min.y.floor() as i32)..=(self.max.y.floor() as i32)
    }

    #[inline]
    fn outcode(&self, x: f32, y: f32) -> u8 {
        let mut code = INSIDE;
        if x < self.min.x {
            code |= LEFT;
        } else if x > self.max.x {
            code |= RIGHT;
        }
        if y < self.min.y {
            code |= TOP;
        } else if y > self.max.y {
            code |= BOTTOM;
        }
        code
    }

    /// Cohen-Sutherland line clipping against this AABB's x/y bounds.
    ///
    /// Iteratively reprojects whichever endpoint lies outside onto the
    /// violated edge until both endpoints are inside (returns the clipped
    /// endpoints) or both share an outside region (returns None). Bounded
    /// iteration guards degenerate input (NaN endpoints).
    pub fn clip_line(&self, mut p0: Vec2, mut p1: Vec2) -> Option<(Vec2, Vec2)> {
        // Converges in at most 4 iterations for finite input
        const MAX_ITERATIONS: u32 = 16;

        if !self.is_valid() {
            return None;
        }

        let mut code0 = self.outcode(p0.x, p0.y);
        let mut code1 = self.outcode(p1.x, p1.y);

        for _ in 0..MAX_ITERATIONS {
            if code0 | code1 == 0 {
                return Some((p0, p1));
            }
            if code0 & code1 != 0 {
                return None;
            }

            let code_out = if code0 != 0 { code0 } else { code1 };
            let dx = p1.x - p0.x;
            let dy = p1.y - p0.y;

            let (x, y);
            if code_out & BOTTOM != 0 {
                if dy == 0.0 {
                    return None;
                }
                x = p0.x + dx * (self.max.y - p0.y) / dy;
                y = self.max.y;
            } else if code_out & TOP != 0 {
                if dy == 0.0 {
                    return None;
                }
                x = p0.x + dx * (self.min.y - p0.y) / dy;
                y = self.min.y;
            } else if code_out & RIGHT != 0 {
                if dx == 0.0 {
                    return None;
                }
                y = p0.y + dy * (self.max.x - p0.x) / dx;
                x = self.max.x;
            } else {
                if dx == 0.0 {
                    return None;
                }
                y = p0.y + dy * (self.min.x - p0.x) / dx;
                x = self.min.x;
            }

            if code_out == code0 {
                p0 = Vec2::new(x, y);
                code0 = self.outcode(p0.x, p0.y);
            } else {
                p1 = Vec2::new(x, y);
                code1 = self.outcode(p1.x, p1.y);
            }
        }

        None
    }
}

impl std::ops::Add<Vec3> for Aabb {
    type Output = Aabb;

    /// Translate both corners
    fn add(self, offset: Vec3) -> Aabb {
        Aabb {
            min: self.min + offset,
            max: self.max + offset,
        }
    }
}

impl std::ops::AddAssign<Vec3> for Aabb {
    fn add_assign(&mut self, offset: Vec3) {
        self.min += offset;
        self.max += offset;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_invalid_union_identity() {
        let mut aabb = Aabb::default();
        assert!(!aabb.is_valid());
        aabb.expand(Vec3::new(3.0, 4.0, 0.0));
        assert!(aabb.is_valid());
        assert_eq!(aabb.min, Vec3::new(3.0, 4.0, 0.0));
        assert_eq!(aabb.max, Vec3::new(3.0, 4.0, 0.0));
    }

    #[test]
    fn test_rect_round_trip() {
        let rect = Rect::new(5, 7, 12, 9);
        let aabb = Aabb::from(rect);
        assert_eq!(aabb.width() as i32, 12);
        assert_eq!(aabb.height() as i32, 9);
    }

    #[test]
    fn test_clamp_idempotent() {
        let a = Aabb::from(Rect::new(0, 0, 10, 10));
        let mut b = a;
        b.clamp(&a);
        assert_eq!(b, a);
    }

    #[test]
    fn test_clamp_disjoint_is_invalid() {
        let a = Aabb::from(Rect::new(0, 0, 4, 4));
        let b = Aabb::from(Rect::new(10, 10, 4, 4));
        let c = a.clamped(&b);
        assert!(!c.is_valid());
        assert_eq!(c.x_range().count(), 0);
        assert_eq!(c.y_range().count(), 0);
    }

    #[test]
    fn test_intersects() {
        let a = Aabb::from(Rect::new(0, 0, 10, 10));
        let b = Aabb::from(Rect::new(5, 5, 10, 10));
        let c = Aabb::from(Rect::new(20, 20, 3, 3));
        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn test_clip_line_inside_unchanged() {
        let bounds = Aabb::from(Rect::new(0, 0, 100, 100));
        let p0 = Vec2::new(10.0, 10.0);
        let p1 = Vec2::new(50.0, 60.0);
        assert_eq!(bounds.clip_line(p0, p1), Some((p0, p1)));
    }

    #[test]
    fn test_clip_line_fully_outside() {
        let bounds = Aabb::from(Rect::new(0, 0, 100, 100));
        let p0 = Vec2::new(-10.0, -10.0);
        let p1 = Vec2::new(-50.0, -5.0);
        assert_eq!(bounds.clip_line(p0, p1), None);
    }

    #[test]
    fn test_clip_line_crossing() {
        let bounds = Aabb::from(Rect::new(0, 0, 10, 10));
        let (p0, p1) = bounds
            .clip_line(Vec2::new(-5.0, 4.0), Vec2::new(20.0, 4.0))
            .expect("line crosses the box");
        assert_eq!(p0, Vec2::new(0.0, 4.0));
        assert_eq!(p1, Vec2::new(9.0, 4.0));
    }

    #[test]
    fn test_circle_test_is_conservative() {
        let aabb = Aabb::from(Rect::new(0, 0, 10, 10));
        // Center well inside the expanded box
        assert!(aabb.intersects_circle(&Circle::new(Vec2::new(-2.0, 5.0), 3.0)));
        // Center beyond the expansion
        assert!(!aabb.intersects_circle(&Circle::new(Vec2::new(-20.0, 5.0), 3.0)));
        // Corner case: exact distance test would reject, conservative accepts
        assert!(aabb.intersects_circle(&Circle::new(Vec2::new(-2.5, -2.5), 3.0)));
    }
}
