use super::{gated, on_circle, steps_per_turn};
use crate::particle::{Particle, SuppliedParticle};
use crate::supplier::{ParticleSupplier, Particles};
use crate::Tick;

/// Points evenly spaced on a circle in the XZ plane.
///
/// The circle holds `round(2π / delta)` points, the first one at angle
/// `offset`, each following one `delta` radians further.
///
/// # Example
///
/// ```
/// use trailgen::prelude::*;
/// use std::f32::consts::FRAC_PI_2;
///
/// let ring = CircumferenceSupplier::new(Particle::new(Effect::Flame), 1.0, FRAC_PI_2, 0.0, 2);
/// assert_eq!(ring.supply(0).count(), 4);
/// assert_eq!(ring.supply(1).count(), 0);
/// ```
#[derive(Clone, Debug)]
pub struct CircumferenceSupplier {
    particles: Vec<SuppliedParticle>,
    appearing_interval: Tick,
}

impl CircumferenceSupplier {
    pub fn new(particle: Particle, radius: f32, delta: f32, offset: f32, appearing_interval: Tick) -> Self {
        let particles = circle_points(&particle, radius, delta, offset);
        log::trace!("circumference: {} points", particles.len());
        Self {
            particles,
            appearing_interval,
        }
    }

    /// The precomputed points.
    pub fn particles(&self) -> &[SuppliedParticle] {
        &self.particles
    }

    pub fn appearing_interval(&self) -> Tick {
        self.appearing_interval
    }
}

impl ParticleSupplier for CircumferenceSupplier {
    fn supply(&self, tick: Tick) -> Particles<'_> {
        gated(&self.particles, self.appearing_interval, tick)
    }
}

pub(super) fn circle_points(particle: &Particle, radius: f32, delta: f32, offset: f32) -> Vec<SuppliedParticle> {
    (0..steps_per_turn(delta))
        .map(|i| {
            let angle = offset + delta * i as f32;
            SuppliedParticle::new(particle.clone(), on_circle(radius, angle))
        })
        .collect()
}
