//! Immutable 3D vector algebra.
//!
//! [`Vector3`] is the position type every generator and transform works with.
//! All operations return new values; nothing mutates in place.
//!
//! Degenerate inputs never fail:
//! - normalizing the zero vector yields the zero vector
//! - angles involving a zero-norm vector yield `0.0`
//!
//! # Example
//!
//! ```
//! use trailgen::Vector3;
//! use std::f32::consts::FRAC_PI_2;
//!
//! let v = Vector3::AXIS_X.rotate_y(-FRAC_PI_2);
//! assert!(v.distance(Vector3::AXIS_Z) < 1e-6);
//! assert_eq!(Vector3::ORIGIN.normalize(), Vector3::ORIGIN);
//! ```

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Div, Mul, Neg, Sub};

/// A three-component vector of `f32`.
///
/// Equality and hashing are component-wise. `-0.0` and `0.0` compare and hash
/// equal. A vector with a NaN component is not equal to itself, so such
/// vectors must not be used as hash keys.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector3 {
    /// The zero vector.
    pub const ORIGIN: Vector3 = Vector3::new(0.0, 0.0, 0.0);
    /// Unit vector along X.
    pub const AXIS_X: Vector3 = Vector3::new(1.0, 0.0, 0.0);
    /// Unit vector along Y. This is the "up" direction of every drawing plane.
    pub const AXIS_Y: Vector3 = Vector3::new(0.0, 1.0, 0.0);
    /// Unit vector along Z.
    pub const AXIS_Z: Vector3 = Vector3::new(0.0, 0.0, 1.0);

    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub const fn splat(v: f32) -> Self {
        Self::new(v, v, v)
    }

    #[inline]
    pub fn with_x(self, x: f32) -> Self {
        Self::new(x, self.y, self.z)
    }

    #[inline]
    pub fn with_y(self, y: f32) -> Self {
        Self::new(self.x, y, self.z)
    }

    #[inline]
    pub fn with_z(self, z: f32) -> Self {
        Self::new(self.x, self.y, z)
    }

    /// Whether every component lies inside the box `[min, max]`, bounds included.
    pub fn is_between(self, min: Vector3, max: Vector3) -> bool {
        min.x <= self.x
            && min.y <= self.y
            && min.z <= self.z
            && self.x <= max.x
            && self.y <= max.y
            && self.z <= max.z
    }

    // ========== Products ==========

    #[inline]
    pub fn dot(self, other: Vector3) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    #[inline]
    pub fn cross(self, o: Vector3) -> Self {
        Self::new(
            self.y * o.z - o.y * self.z,
            self.z * o.x - o.z * self.x,
            self.x * o.y - o.x * self.y,
        )
    }

    /// Scalar triple product `self · (a × b)`.
    #[inline]
    pub fn mixed(self, a: Vector3, b: Vector3) -> f32 {
        a.cross(b).dot(self)
    }

    // ========== Norms and distances ==========

    #[inline]
    pub fn norm_squared(self) -> f32 {
        self.dot(self)
    }

    #[inline]
    pub fn norm(self) -> f32 {
        self.norm_squared().sqrt()
    }

    #[inline]
    pub fn distance_squared(self, o: Vector3) -> f32 {
        (self - o).norm_squared()
    }

    #[inline]
    pub fn distance(self, o: Vector3) -> f32 {
        self.distance_squared(o).sqrt()
    }

    // ========== Angles ==========

    /// Cosine of the angle between both vectors.
    ///
    /// Returns `1.0` when either vector has zero norm, and is clamped into
    /// `[-1, 1]` so rounding never pushes it out of the domain of `acos`.
    pub fn cosine(self, o: Vector3) -> f32 {
        let norms = self.norm() * o.norm();
        if norms == 0.0 {
            return 1.0;
        }
        (self.dot(o) / norms).clamp(-1.0, 1.0)
    }

    /// Unsigned angle in `[0, π]` between both vectors. `0.0` if either is zero.
    pub fn angle(self, o: Vector3) -> f32 {
        self.cosine(o).acos()
    }

    /// Signed angle in `[0, 2π)` that takes `self` onto `o`, measured
    /// counter-clockwise around `normal`.
    ///
    /// Both vectors should be perpendicular to `normal`; a zero vector on
    /// either side gives `0.0`.
    pub fn full_angle(self, o: Vector3, normal: Vector3) -> f32 {
        let dot = self.dot(o);
        let det = normal.mixed(self, o);
        let angle = det.atan2(dot);
        if angle >= 0.0 {
            return angle;
        }
        // Tiny negative angles round up to exactly 2π.
        let wrapped = angle + TAU;
        if wrapped < TAU {
            wrapped
        } else {
            0.0
        }
    }

    // ========== Normalization ==========

    /// Unit vector with the same direction. The zero vector stays zero.
    pub fn normalize(self) -> Self {
        let norm = self.norm();
        if norm == 0.0 {
            return Self::ORIGIN;
        }
        self / norm
    }

    /// Vector with the same direction and the given norm.
    pub fn with_norm(self, norm: f32) -> Self {
        self.normalize() * norm
    }

    /// Vector scaled by `factor`, keeping its direction.
    pub fn scale(self, factor: f32) -> Self {
        self.with_norm(self.norm() * factor)
    }

    // ========== Rotation ==========

    #[inline]
    pub fn rotate_x(self, angle: f32) -> Self {
        self.rotate(Self::AXIS_X, angle)
    }

    #[inline]
    pub fn rotate_y(self, angle: f32) -> Self {
        self.rotate(Self::AXIS_Y, angle)
    }

    #[inline]
    pub fn rotate_z(self, angle: f32) -> Self {
        self.rotate(Self::AXIS_Z, angle)
    }

    /// Rotate around `axis` by `angle` radians.
    ///
    /// The axis is normalized first. A zero axis leaves only the `cos` term of
    /// Rodrigues' formula, scaling the vector by `cos(angle)`.
    pub fn rotate(self, axis: Vector3, angle: f32) -> Self {
        let k = axis.normalize();
        if k == Self::ORIGIN {
            return self * angle.cos();
        }
        glam::Quat::from_axis_angle(k.into(), angle)
            .mul_vec3(self.into())
            .into()
    }

    // ========== Projection ==========

    /// Projection of `self` onto the line spanned by `onto`.
    ///
    /// Projecting onto the zero vector yields the zero vector.
    pub fn project(self, onto: Vector3) -> Self {
        let len = onto.norm_squared();
        if len == 0.0 {
            return Self::ORIGIN;
        }
        onto * (self.dot(onto) / len)
    }

    /// Projection onto the plane spanned by two orthogonal vectors.
    pub fn project_onto_plane(self, d1: Vector3, d2: Vector3) -> Self {
        self.project(d1) + self.project(d2)
    }

    #[inline]
    pub fn strip_x(self) -> Self {
        self.with_x(0.0)
    }

    #[inline]
    pub fn strip_y(self) -> Self {
        self.with_y(0.0)
    }

    #[inline]
    pub fn strip_z(self) -> Self {
        self.with_z(0.0)
    }

    #[inline]
    pub fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }
}

impl Eq for Vector3 {}

impl Hash for Vector3 {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // +0.0 and -0.0 are equal, so both hash as 0.
        for c in [self.x, self.y, self.z] {
            let bits = if c == 0.0 { 0 } else { c.to_bits() };
            bits.hash(state);
        }
    }
}

impl fmt::Display for Vector3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}; {}; {}]", self.x, self.y, self.z)
    }
}

impl From<[f32; 3]> for Vector3 {
    fn from(c: [f32; 3]) -> Self {
        Self::new(c[0], c[1], c[2])
    }
}

impl From<Vector3> for [f32; 3] {
    fn from(v: Vector3) -> Self {
        v.to_array()
    }
}

impl From<glam::Vec3> for Vector3 {
    fn from(v: glam::Vec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<Vector3> for glam::Vec3 {
    fn from(v: Vector3) -> Self {
        glam::Vec3::new(v.x, v.y, v.z)
    }
}

impl Add for Vector3 {
    type Output = Vector3;

    fn add(self, rhs: Vector3) -> Vector3 {
        Vector3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vector3 {
    type Output = Vector3;

    fn sub(self, rhs: Vector3) -> Vector3 {
        Vector3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f32> for Vector3 {
    type Output = Vector3;

    fn mul(self, rhs: f32) -> Vector3 {
        Vector3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Mul<Vector3> for Vector3 {
    type Output = Vector3;

    fn mul(self, rhs: Vector3) -> Vector3 {
        Vector3::new(self.x * rhs.x, self.y * rhs.y, self.z * rhs.z)
    }
}

impl Div<f32> for Vector3 {
    type Output = Vector3;

    fn div(self, rhs: f32) -> Vector3 {
        Vector3::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

impl Div<Vector3> for Vector3 {
    type Output = Vector3;

    fn div(self, rhs: Vector3) -> Vector3 {
        Vector3::new(self.x / rhs.x, self.y / rhs.y, self.z / rhs.z)
    }
}

impl Neg for Vector3 {
    type Output = Vector3;

    fn neg(self) -> Vector3 {
        Vector3::new(-self.x, -self.y, -self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::f32::consts::{FRAC_PI_2, PI};

    const EPS: f32 = 1e-5;

    fn close(a: Vector3, b: Vector3) -> bool {
        a.distance(b) < EPS
    }

    #[test]
    fn test_normalize_origin_is_origin() {
        assert_eq!(Vector3::ORIGIN.normalize(), Vector3::ORIGIN);
        assert_eq!(Vector3::ORIGIN.with_norm(3.0), Vector3::ORIGIN);
    }

    #[test]
    fn test_normalize_unit_length() {
        let v = Vector3::new(3.0, 4.0, 12.0).normalize();
        assert!((v.norm() - 1.0).abs() < EPS);
    }

    #[test]
    fn test_cross_right_handed() {
        assert!(close(Vector3::AXIS_X.cross(Vector3::AXIS_Y), Vector3::AXIS_Z));
        assert!(close(Vector3::AXIS_Y.cross(Vector3::AXIS_Z), Vector3::AXIS_X));
    }

    #[test]
    fn test_mixed_product() {
        let m = Vector3::AXIS_Z.mixed(Vector3::AXIS_X, Vector3::AXIS_Y);
        assert!((m - 1.0).abs() < EPS);
    }

    #[test]
    fn test_angle_between_axes() {
        assert!((Vector3::AXIS_X.angle(Vector3::AXIS_Y) - FRAC_PI_2).abs() < EPS);
        assert!((Vector3::AXIS_X.angle(-Vector3::AXIS_X) - PI).abs() < EPS);
    }

    #[test]
    fn test_angle_with_zero_vector() {
        assert_eq!(Vector3::ORIGIN.angle(Vector3::AXIS_X), 0.0);
        assert_eq!(Vector3::AXIS_X.cosine(Vector3::ORIGIN), 1.0);
        assert_eq!(Vector3::AXIS_Z.full_angle(Vector3::ORIGIN, Vector3::AXIS_Y), 0.0);
    }

    #[test]
    fn test_full_angle_wraps_into_positive_range() {
        // Z rotated towards X around Y is a quarter turn.
        let a = Vector3::AXIS_Z.full_angle(Vector3::AXIS_X, Vector3::AXIS_Y);
        assert!((a - FRAC_PI_2).abs() < EPS);

        // The other way round is three quarters.
        let b = Vector3::AXIS_X.full_angle(Vector3::AXIS_Z, Vector3::AXIS_Y);
        assert!((b - 3.0 * FRAC_PI_2).abs() < 1e-4);
        assert!(b < TAU);
    }

    #[test]
    fn test_rotate_quarter_turns() {
        assert!(close(Vector3::AXIS_X.rotate_z(FRAC_PI_2), Vector3::AXIS_Y));
        assert!(close(Vector3::AXIS_Y.rotate_x(FRAC_PI_2), Vector3::AXIS_Z));
        assert!(close(Vector3::AXIS_Z.rotate_y(FRAC_PI_2), Vector3::AXIS_X));
    }

    #[test]
    fn test_rotate_normalizes_axis() {
        let a = Vector3::new(1.0, 2.0, 3.0).rotate(Vector3::new(0.0, 5.0, 0.0), 0.7);
        let b = Vector3::new(1.0, 2.0, 3.0).rotate_y(0.7);
        assert!(close(a, b));
    }

    #[test]
    fn test_rotate_around_zero_axis_scales_by_cosine() {
        let v = Vector3::new(1.0, -2.0, 4.0);
        assert!(close(v.rotate(Vector3::ORIGIN, PI), -v));
        assert!(close(v.rotate(Vector3::ORIGIN, FRAC_PI_2), Vector3::ORIGIN));
    }

    #[test]
    fn test_nan_vector_is_not_equal_to_itself() {
        let v = Vector3::new(f32::NAN, 0.0, 0.0);
        assert_ne!(v, v);
        assert_eq!(Vector3::new(-0.0, 0.0, 0.0), Vector3::ORIGIN);
    }

    #[test]
    fn test_project() {
        let v = Vector3::new(2.0, 3.0, 4.0);
        assert!(close(v.project(Vector3::AXIS_X * 5.0), Vector3::new(2.0, 0.0, 0.0)));
        assert!(close(
            v.project_onto_plane(Vector3::AXIS_X, Vector3::AXIS_Z),
            v.strip_y()
        ));
        assert_eq!(v.project(Vector3::ORIGIN), Vector3::ORIGIN);
    }

    #[test]
    fn test_scale_keeps_direction() {
        let v = Vector3::new(1.0, 2.0, 2.0);
        assert!(close(v.scale(2.0), Vector3::new(2.0, 4.0, 4.0)));
        assert!(close(v.scale(-1.0), -v));
    }

    #[test]
    fn test_operators() {
        let a = Vector3::new(1.0, 2.0, 3.0);
        let b = Vector3::new(4.0, 5.0, 6.0);
        assert_eq!(a + b, Vector3::new(5.0, 7.0, 9.0));
        assert_eq!(b - a, Vector3::splat(3.0));
        assert_eq!(a * 2.0, Vector3::new(2.0, 4.0, 6.0));
        assert_eq!(a * b, Vector3::new(4.0, 10.0, 18.0));
        assert_eq!(b / 2.0, Vector3::new(2.0, 2.5, 3.0));
        assert_eq!(b / b, Vector3::splat(1.0));
    }

    #[test]
    fn test_signed_zero_hashes_equal() {
        let mut set = HashSet::new();
        set.insert(Vector3::new(0.0, 1.0, 0.0));
        assert!(set.contains(&Vector3::new(-0.0, 1.0, -0.0)));
    }

    #[test]
    fn test_is_between() {
        let min = Vector3::splat(-1.0);
        let max = Vector3::splat(1.0);
        assert!(Vector3::ORIGIN.is_between(min, max));
        assert!(max.is_between(min, max));
        assert!(!Vector3::new(0.0, 2.0, 0.0).is_between(min, max));
    }

    #[test]
    fn test_glam_round_trip() {
        let v = Vector3::new(1.5, -2.0, 0.25);
        let g: glam::Vec3 = v.into();
        assert_eq!(Vector3::from(g), v);
        assert_eq!(bytemuck::bytes_of(&v).len(), 12);
    }

    #[test]
    fn test_display() {
        assert_eq!(Vector3::new(1.0, 2.5, -3.0).to_string(), "[1; 2.5; -3]");
    }
}
