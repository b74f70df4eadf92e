//! Concrete particle suppliers.
//!
//! Every supplier here precomputes its geometry once, in local coordinates
//! centred on the origin, drawing in the XZ plane with +Y as "up". Use
//! [`Transform::rotate_render_plane`](crate::Transform::rotate_render_plane)
//! (or an [`EntityTrail`](crate::EntityTrail)) to orient the drawing in the
//! world.
//!
//! | Supplier | Shape | Emission |
//! |----------|-------|----------|
//! | [`CircumferenceSupplier`] | evenly spaced points on a circle | whole set, gated |
//! | [`HelixSupplier`] | same points as a circumference | one point per tick |
//! | [`SinusoidSupplier`] | samples of a sine wave | one point per tick |
//! | [`PolySupplier`] | polygon / star polygon outline | whole set, gated |
//! | [`StarSupplier`] | star with inner and outer radius | whole set, gated |
//! | [`ScatteringSupplier`] | gaussian cloud of random particles | random set, gated |
//! | [`BitmapSupplier`] | coloured pixel grid | whole set, gated |
//! | [`SpirographSupplier`] | parametric trochoid curves | whole set, gated |
//! | [`LinearSupplier`] | a single fixed point | every tick |
//!
//! "Gated" suppliers emit only on ticks where `tick % appearing_interval == 0`
//! and nothing otherwise. An interval of `0` is treated as `1`.
//!
//! Precomputed sets are limited to [`MAX_POINTS`]. A shape whose steps would
//! need more points than that is built empty and a warning is logged.

mod bitmap;
mod circumference;
mod helix;
mod linear;
mod poly;
mod scattering;
mod sinusoid;
mod spirograph;
mod star;

pub use bitmap::{BitmapSupplier, FnPixels, PixelSource};
pub use circumference::CircumferenceSupplier;
pub use helix::HelixSupplier;
pub use linear::LinearSupplier;
pub use poly::PolySupplier;
pub use scattering::ScatteringSupplier;
pub use sinusoid::SinusoidSupplier;
pub use spirograph::{epitrochoid, hypotrochoid, SpirographSupplier, Trochoid};
pub use star::StarSupplier;

use crate::particle::{Particle, SuppliedParticle};
use crate::supplier::Particles;
use crate::vector::Vector3;
use crate::Tick;
use std::f32::consts::TAU;

/// Largest point set a supplier will precompute.
pub const MAX_POINTS: usize = 1 << 20;

/// `count` as a point count, or zero when it is over [`MAX_POINTS`] or not a
/// number.
pub(crate) fn point_budget(count: f64, shape: &str) -> usize {
    if count >= 0.0 && count <= MAX_POINTS as f64 {
        return count as usize;
    }
    log::warn!("{shape}: {count} points exceeds the limit of {MAX_POINTS}, nothing will be drawn");
    0
}

/// The full precomputed set on active ticks, nothing otherwise.
pub(crate) fn gated(particles: &[SuppliedParticle], interval: Tick, tick: Tick) -> Particles<'_> {
    if tick % interval.max(1) == 0 {
        Box::new(particles.iter().cloned())
    } else {
        Box::new(std::iter::empty())
    }
}

/// The single element at `tick` modulo the set size. Empty sets emit nothing.
pub(crate) fn cycled(particles: &[SuppliedParticle], tick: Tick) -> Particles<'_> {
    if particles.is_empty() {
        return Box::new(std::iter::empty());
    }
    let index = tick as usize % particles.len();
    Box::new(particles[index..=index].iter().cloned())
}

/// Number of `delta`-sized steps that fit in a full turn, rounded.
///
/// Non-positive or non-finite steps give zero, as do steps so small the turn
/// would take more than [`MAX_POINTS`].
pub(crate) fn steps_per_turn(delta: f32) -> usize {
    if !(delta > 0.0 && delta.is_finite()) {
        return 0;
    }
    point_budget((TAU as f64 / delta as f64).round(), "circle")
}

/// Greatest common divisor. `gcd(0, n) == n`.
pub(crate) fn gcd(a: u32, b: u32) -> u32 {
    let (mut a, mut b) = (a.max(b), a.min(b));
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }
    a
}

/// Rasterize the segment starting at `from` into `n` points `step` apart,
/// walking along the unit vector `direction`.
pub(crate) fn draw_line(
    out: &mut Vec<SuppliedParticle>,
    particle: &Particle,
    from: Vector3,
    direction: Vector3,
    step: f32,
    n: usize,
) {
    out.extend((0..n).map(|i| {
        SuppliedParticle::new(particle.clone(), from + direction * (step * i as f32))
    }));
}

/// Point on a circle of `radius` in the XZ plane.
#[inline]
pub(crate) fn on_circle(radius: f32, angle: f32) -> Vector3 {
    let (sin, cos) = angle.sin_cos();
    Vector3::new(radius * cos, 0.0, radius * sin)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particle::Effect;

    #[test]
    fn test_gcd() {
        assert_eq!(gcd(6, 1), 1);
        assert_eq!(gcd(5, 2), 1);
        assert_eq!(gcd(12, 18), 6);
        assert_eq!(gcd(0, 7), 7);
        assert_eq!(gcd(9, 9), 9);
    }

    #[test]
    fn test_steps_per_turn() {
        assert_eq!(steps_per_turn(std::f32::consts::FRAC_PI_2), 4);
        assert_eq!(steps_per_turn(0.0), 0);
        assert_eq!(steps_per_turn(-1.0), 0);
        assert_eq!(steps_per_turn(f32::NAN), 0);
    }

    #[test]
    fn test_tiny_steps_stay_within_budget() {
        assert_eq!(steps_per_turn(1e-30), 0);
        assert_eq!(steps_per_turn(f32::MIN_POSITIVE), 0);
        assert_eq!(point_budget(MAX_POINTS as f64, "edge"), MAX_POINTS);
        assert_eq!(point_budget(MAX_POINTS as f64 + 1.0, "over"), 0);
        assert_eq!(point_budget(f64::NAN, "nan"), 0);
        assert_eq!(point_budget(f64::INFINITY, "inf"), 0);
    }

    #[test]
    fn test_draw_line_spacing() {
        let mut out = Vec::new();
        let p = Particle::new(Effect::Crit);
        draw_line(&mut out, &p, Vector3::ORIGIN, Vector3::AXIS_X, 0.5, 4);
        let xs: Vec<f32> = out.iter().map(|p| p.position.x).collect();
        assert_eq!(xs, vec![0.0, 0.5, 1.0, 1.5]);
    }

    #[test]
    fn test_gated_and_cycled() {
        let set = vec![
            SuppliedParticle::new(Particle::new(Effect::Crit), Vector3::AXIS_X),
            SuppliedParticle::new(Particle::new(Effect::Crit), Vector3::AXIS_Z),
        ];
        assert_eq!(gated(&set, 3, 6).count(), 2);
        assert_eq!(gated(&set, 3, 7).count(), 0);
        assert_eq!(gated(&set, 0, 7).count(), 2);
        let picked: Vec<_> = cycled(&set, 5).map(|p| p.position).collect();
        assert_eq!(picked, vec![Vector3::AXIS_Z]);
        assert_eq!(cycled(&[], 5).count(), 0);
    }
}
