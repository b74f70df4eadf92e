use super::{gated, point_budget};
use crate::particle::{Particle, SuppliedParticle};
use crate::supplier::{ParticleSupplier, Particles};
use crate::vector::Vector3;
use crate::Tick;
use std::f32::consts::TAU;

/// Relative tolerance of the float gcd used to find the curve period.
const GCD_TOLERANCE: f32 = 1e-3;

/// Upper bound on the number of turns of the rolling circle. Radii with no
/// small common divisor would otherwise need an enormous point set.
const MAX_REVOLUTIONS: f32 = 64.0;

/// Parameters of a curve traced by a pen fixed to a circle rolling around
/// another one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trochoid {
    /// Radius of the fixed circle, `R`.
    pub fixed_radius: f32,
    /// Radius of the rolling circle, `r`.
    pub rolling_radius: f32,
    /// Distance from the rolling circle's centre to the pen, `h`.
    pub pen_offset: f32,
}

impl Trochoid {
    pub fn new(fixed_radius: f32, rolling_radius: f32, pen_offset: f32) -> Self {
        Self {
            fixed_radius,
            rolling_radius,
            pen_offset,
        }
    }

    /// The angle after which the curve closes: `2π · r / gcd(R, r)`.
    ///
    /// Capped at [`MAX_REVOLUTIONS`] full turns.
    pub fn period(&self) -> f32 {
        let r = self.rolling_radius.abs();
        let d = float_gcd(self.fixed_radius.abs(), r);
        if d <= 0.0 || !d.is_finite() {
            return TAU;
        }
        (TAU * r / d).min(TAU * MAX_REVOLUTIONS)
    }
}

/// Pen position of a circle of radius `r` rolling outside a circle of radius `R`.
pub fn epitrochoid(fixed: f32, rolling: f32, pen: f32, theta: f32) -> Vector3 {
    let sum = fixed + rolling;
    let inner = theta * sum / rolling;
    Vector3::new(
        sum * theta.cos() - pen * inner.cos(),
        0.0,
        sum * theta.sin() - pen * inner.sin(),
    )
}

/// Pen position of a circle of radius `r` rolling inside a circle of radius `R`.
pub fn hypotrochoid(fixed: f32, rolling: f32, pen: f32, theta: f32) -> Vector3 {
    let diff = fixed - rolling;
    let inner = theta * diff / rolling;
    Vector3::new(
        diff * theta.cos() + pen * inner.cos(),
        0.0,
        diff * theta.sin() - pen * inner.sin(),
    )
}

/// A closed parametric curve sampled every `delta` radians over its period.
///
/// The curve itself is any `(R, r, h, θ) -> Vector3` function, so the same
/// supplier draws epitrochoids, hypotrochoids or custom roulettes:
///
/// ```
/// use trailgen::prelude::*;
/// use trailgen::suppliers::{epitrochoid, Trochoid};
///
/// let rose = SpirographSupplier::new(
///     Particle::new(Effect::WitchMagic),
///     Trochoid::new(3.0, 1.0, 0.5),
///     0.05,
///     2,
///     epitrochoid,
/// );
/// assert!(rose.supply(0).count() > 0);
/// assert_eq!(rose.supply(1).count(), 0);
/// ```
#[derive(Clone, Debug)]
pub struct SpirographSupplier {
    particles: Vec<SuppliedParticle>,
    trochoid: Trochoid,
    appearing_interval: Tick,
}

impl SpirographSupplier {
    pub fn new<F>(particle: Particle, trochoid: Trochoid, delta: f32, appearing_interval: Tick, curve: F) -> Self
    where
        F: Fn(f32, f32, f32, f32) -> Vector3,
    {
        let particles = if delta > 0.0 && delta.is_finite() {
            let n = point_budget((trochoid.period() as f64 / delta as f64).ceil(), "spirograph");
            (0..n)
                .map(|i| {
                    let theta = delta * i as f32;
                    let position = curve(
                        trochoid.fixed_radius,
                        trochoid.rolling_radius,
                        trochoid.pen_offset,
                        theta,
                    );
                    SuppliedParticle::new(particle.clone(), position)
                })
                .collect()
        } else {
            Vec::new()
        };
        log::trace!("spirograph: {} points", particles.len());

        Self {
            particles,
            trochoid,
            appearing_interval,
        }
    }

    /// Shorthand for an [`epitrochoid`] curve.
    pub fn epitrochoid(particle: Particle, trochoid: Trochoid, delta: f32, appearing_interval: Tick) -> Self {
        Self::new(particle, trochoid, delta, appearing_interval, epitrochoid)
    }

    /// Shorthand for a [`hypotrochoid`] curve.
    pub fn hypotrochoid(particle: Particle, trochoid: Trochoid, delta: f32, appearing_interval: Tick) -> Self {
        Self::new(particle, trochoid, delta, appearing_interval, hypotrochoid)
    }

    pub fn particles(&self) -> &[SuppliedParticle] {
        &self.particles
    }

    pub fn trochoid(&self) -> Trochoid {
        self.trochoid
    }

    pub fn appearing_interval(&self) -> Tick {
        self.appearing_interval
    }
}

impl ParticleSupplier for SpirographSupplier {
    fn supply(&self, tick: Tick) -> Particles<'_> {
        gated(&self.particles, self.appearing_interval, tick)
    }
}

/// Euclid's algorithm on floats; remainders under the tolerance count as zero.
fn float_gcd(a: f32, b: f32) -> f32 {
    let eps = GCD_TOLERANCE * a.max(b).max(1.0);
    let (mut a, mut b) = (a.max(b), a.min(b));
    while b > eps {
        let r = a % b;
        a = b;
        b = r;
    }
    a
}
