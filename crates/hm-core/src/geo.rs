//! Planar geometry and collision primitives.
//!
//! World coordinates are screen-style: `x` grows to the right and `y` grows
//! downward, so "above" means a smaller `y`.  All math is `f64`.
//!
//! Overlap tests are strict: shapes that merely touch along an edge do not
//! collide.  This matches how placement validation treats adjacent objects
//! (two huts may share a wall).

use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

// ── Vec2 ──────────────────────────────────────────────────────────────────────

/// A 2-D vector / point.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Unit vector pointing along `angle` radians.
    #[inline]
    pub fn from_angle(angle: f64) -> Self {
        Self::new(angle.cos(), angle.sin())
    }

    #[inline]
    pub fn length_sq(self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    #[inline]
    pub fn length(self) -> f64 {
        self.length_sq().sqrt()
    }

    #[inline]
    pub fn distance_sq(self, other: Vec2) -> f64 {
        (self - other).length_sq()
    }

    #[inline]
    pub fn distance(self, other: Vec2) -> f64 {
        (self - other).length()
    }

    #[inline]
    pub fn dot(self, other: Vec2) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Angle of the vector in radians, `atan2(y, x)`.
    #[inline]
    pub fn angle(self) -> f64 {
        self.y.atan2(self.x)
    }

    /// Counter-clockwise (in screen space: clockwise) perpendicular.
    #[inline]
    pub fn perp(self) -> Self {
        Self::new(-self.y, self.x)
    }

    /// Unit vector in the same direction, or `None` when the length is not
    /// above `min_len`.
    #[inline]
    pub fn normalize_or_none(self, min_len: f64) -> Option<Self> {
        let len = self.length();
        (len > min_len).then(|| self * (1.0 / len))
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    #[inline]
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    #[inline]
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vec2 {
    type Output = Vec2;
    #[inline]
    fn mul(self, rhs: f64) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Vec2 {
    type Output = Vec2;
    #[inline]
    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}

impl AddAssign for Vec2 {
    #[inline]
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl SubAssign for Vec2 {
    #[inline]
    fn sub_assign(&mut self, rhs: Vec2) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl std::fmt::Display for Vec2 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}

// ── Circle ────────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Circle {
    pub center: Vec2,
    pub radius: f64,
}

impl Circle {
    #[inline]
    pub fn new(center: Vec2, radius: f64) -> Self {
        Self { center, radius }
    }

    #[inline]
    pub fn overlaps_circle(&self, other: &Circle) -> bool {
        let reach = self.radius + other.radius;
        self.center.distance_sq(other.center) < reach * reach
    }

    /// Circle vs axis-aligned rectangle: the rectangle point closest to the
    /// centre lies strictly inside the circle.
    #[inline]
    pub fn overlaps_rect(&self, rect: &Rect) -> bool {
        let closest = rect.clamp_point(self.center);
        self.center.distance_sq(closest) < self.radius * self.radius
    }

    #[inline]
    pub fn contains_point(&self, p: Vec2) -> bool {
        self.center.distance_sq(p) < self.radius * self.radius
    }

    pub fn aabb(&self) -> Rect {
        let r = Vec2::new(self.radius, self.radius);
        Rect::from_min_max(self.center - r, self.center + r)
    }
}

// ── Rect ──────────────────────────────────────────────────────────────────────

/// Axis-aligned rectangle stored as min/max corners.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    #[inline]
    pub fn from_min_max(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Rectangle of `size` whose centre is `center`.
    #[inline]
    pub fn centered(center: Vec2, width: f64, height: f64) -> Self {
        let half = Vec2::new(width * 0.5, height * 0.5);
        Self::from_min_max(center - half, center + half)
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new((self.min.x + self.max.x) * 0.5, (self.min.y + self.max.y) * 0.5)
    }

    /// Smallest rectangle containing both.
    pub fn union(&self, other: &Rect) -> Rect {
        Rect::from_min_max(
            Vec2::new(self.min.x.min(other.min.x), self.min.y.min(other.min.y)),
            Vec2::new(self.max.x.max(other.max.x), self.max.y.max(other.max.y)),
        )
    }

    #[inline]
    pub fn overlaps_rect(&self, other: &Rect) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }

    #[inline]
    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x > self.min.x && p.x < self.max.x && p.y > self.min.y && p.y < self.max.y
    }

    #[inline]
    pub fn clamp_point(&self, p: Vec2) -> Vec2 {
        Vec2::new(p.x.clamp(self.min.x, self.max.x), p.y.clamp(self.min.y, self.max.y))
    }
}

// ── Bounds ────────────────────────────────────────────────────────────────────

/// Collision bounds of a static object: either a disc or a box.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Bounds {
    Circle(Circle),
    Rect(Rect),
}

impl Bounds {
    /// Centre used as the push-away origin for obstacle resolution.
    pub fn center(&self) -> Vec2 {
        match self {
            Bounds::Circle(c) => c.center,
            Bounds::Rect(r) => r.center(),
        }
    }

    /// Axis-aligned bounding box (exact for rectangles).
    pub fn aabb(&self) -> Rect {
        match self {
            Bounds::Circle(c) => c.aabb(),
            Bounds::Rect(r) => *r,
        }
    }

    /// Bottom edge (`max.y`), the depth key for back-to-front drawing.
    pub fn bottom(&self) -> f64 {
        self.aabb().max.y
    }

    pub fn overlaps(&self, other: &Bounds) -> bool {
        match (self, other) {
            (Bounds::Circle(a), Bounds::Circle(b)) => a.overlaps_circle(b),
            (Bounds::Circle(c), Bounds::Rect(r)) | (Bounds::Rect(r), Bounds::Circle(c)) => {
                c.overlaps_rect(r)
            }
            (Bounds::Rect(a), Bounds::Rect(b)) => a.overlaps_rect(b),
        }
    }

    pub fn overlaps_circle(&self, circle: &Circle) -> bool {
        match self {
            Bounds::Circle(c) => c.overlaps_circle(circle),
            Bounds::Rect(r) => circle.overlaps_rect(r),
        }
    }

    pub fn contains_point(&self, p: Vec2) -> bool {
        match self {
            Bounds::Circle(c) => c.contains_point(p),
            Bounds::Rect(r) => r.contains_point(p),
        }
    }
}

// ── Push-apart helpers ────────────────────────────────────────────────────────

/// Symmetric separation for two overlapping circles.
///
/// Returns the displacement to add to `a` (and subtract from `b`), or `None`
/// when the circles do not overlap or their centres are within
/// `sqrt(min_dist_sq)` of each other (no defined direction).
///
/// Each circle moves by half the overlap depth times `push_factor`; with
/// `push_factor = 1.0` one call fully separates an isolated pair.
pub fn separation(
    a: Vec2,
    ra: f64,
    b: Vec2,
    rb: f64,
    push_factor: f64,
    min_dist_sq: f64,
) -> Option<Vec2> {
    let delta = a - b;
    let dist_sq = delta.length_sq();
    let reach = ra + rb;
    if dist_sq >= reach * reach || dist_sq <= min_dist_sq {
        return None;
    }
    let dist = dist_sq.sqrt();
    let overlap = (reach - dist) * 0.5;
    Some(delta * (overlap * push_factor / dist))
}

/// Unit direction from `origin` towards `p`, falling back to `+x` when the
/// two points coincide.
pub fn push_direction(origin: Vec2, p: Vec2) -> Vec2 {
    (p - origin).normalize_or_none(0.01).unwrap_or(Vec2::new(1.0, 0.0))
}
