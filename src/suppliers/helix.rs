use super::circumference::circle_points;
use super::cycled;
use crate::particle::{Particle, SuppliedParticle};
use crate::supplier::{ParticleSupplier, Particles};
use crate::Tick;

/// A single point walking around a circle, one step per tick.
///
/// Holds the same points as a [`CircumferenceSupplier`](super::CircumferenceSupplier)
/// but emits only the one at index `tick % n`, on every tick. Attached to a
/// moving emitter this leaves a helix behind.
#[derive(Clone, Debug)]
pub struct HelixSupplier {
    particles: Vec<SuppliedParticle>,
}

impl HelixSupplier {
    pub fn new(particle: Particle, radius: f32, delta: f32, offset: f32) -> Self {
        Self {
            particles: circle_points(&particle, radius, delta, offset),
        }
    }

    pub fn particles(&self) -> &[SuppliedParticle] {
        &self.particles
    }
}

impl ParticleSupplier for HelixSupplier {
    fn supply(&self, tick: Tick) -> Particles<'_> {
        cycled(&self.particles, tick)
    }
}
