//! Composable position transforms.
//!
//! A [`Transform`] is a pure function `Vector3 -> Vector3`. Transforms are
//! built from a handful of primitives and chained with [`Transform::and_then`].
//! Composition is associative and [`Transform::identity`] is its neutral
//! element.
//!
//! The interesting primitive is [`Transform::rotate_render_plane`]: every
//! generator draws in the local XZ plane with +Y as "up", and this transform
//! reorients such a drawing so its plane faces an arbitrary direction.
//!
//! # Example
//!
//! ```
//! use trailgen::{Transform, Vector3};
//!
//! let facing = Vector3::new(1.0, 1.0, 0.0).normalize();
//! let t = Transform::rotate_render_plane(facing)
//!     .and_then(Transform::translate(Vector3::new(10.0, 64.0, -3.0)));
//!
//! let up = t.apply(Vector3::AXIS_Y) - Vector3::new(10.0, 64.0, -3.0);
//! assert!(up.distance(facing) < 1e-5);
//! ```

use crate::vector::Vector3;
use std::f32::consts::PI;
use std::fmt;
use std::sync::Arc;

type TransformFn = dyn Fn(Vector3) -> Vector3 + Send + Sync;

/// A shareable, immutable function from position to position.
///
/// Cloning is cheap: the underlying function is reference counted.
#[derive(Clone)]
pub struct Transform {
    f: Option<Arc<TransformFn>>,
}

impl Transform {
    /// The transform that returns its input unchanged.
    pub fn identity() -> Self {
        Self { f: None }
    }

    /// Wrap an arbitrary function.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(Vector3) -> Vector3 + Send + Sync + 'static,
    {
        Self { f: Some(Arc::new(f)) }
    }

    pub fn translate_xyz(dx: f32, dy: f32, dz: f32) -> Self {
        Self::translate(Vector3::new(dx, dy, dz))
    }

    pub fn translate(offset: Vector3) -> Self {
        Self::from_fn(move |v| v + offset)
    }

    pub fn scale(factor: f32) -> Self {
        Self::from_fn(move |v| v.scale(factor))
    }

    /// Rotation of `angle` radians around `axis`.
    pub fn rotate(axis: Vector3, angle: f32) -> Self {
        Self::from_fn(move |v| v.rotate(axis, angle))
    }

    /// Reorient a drawing authored in the XZ plane (normal +Y) so that its
    /// normal becomes `normal`.
    ///
    /// The drawing is first turned around Y by the yaw of `normal` plus half a
    /// turn, then tilted around `Y × normal` by the angle between Y and
    /// `normal`. The extra half turn keeps the tilt from mirroring the drawing.
    ///
    /// A normal parallel to +Y yields the identity. A normal parallel to -Y
    /// tilts around Z instead, since `Y × normal` vanishes.
    pub fn rotate_render_plane(normal: Vector3) -> Self {
        let mut axis = Vector3::AXIS_Y.cross(normal).normalize();
        if axis == Vector3::ORIGIN {
            if Vector3::AXIS_Y.dot(normal) > 0.0 {
                return Self::identity();
            }
            axis = Vector3::AXIS_Z;
        }

        let yaw = Vector3::AXIS_Z.full_angle(normal.strip_y(), Vector3::AXIS_Y);
        let tilt = normal.angle(Vector3::AXIS_Y);

        Self::from_fn(move |v| v.rotate_y(yaw + PI).rotate(axis, tilt))
    }

    /// Apply the transform to a single point.
    #[inline]
    pub fn apply(&self, v: Vector3) -> Vector3 {
        match &self.f {
            Some(f) => f(v),
            None => v,
        }
    }

    /// A transform that applies `self` first, then `next`.
    pub fn and_then(self, next: Transform) -> Transform {
        match (self.f, next.f) {
            (None, f) | (f, None) => Transform { f },
            (Some(first), Some(second)) => Self::from_fn(move |v| second(first(v))),
        }
    }

    /// Whether this is the no-op transform.
    pub fn is_identity(&self) -> bool {
        self.f.is_none()
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl fmt::Debug for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_identity() {
            f.write_str("Transform::identity")
        } else {
            f.write_str("Transform(<fn>)")
        }
    }
}
