use crate::particle::{Particle, SuppliedParticle};
use crate::supplier::{ParticleSupplier, Particles};
use crate::vector::Vector3;
use crate::Tick;

/// A single particle at a fixed offset, emitted on every tick.
#[derive(Clone, Debug)]
pub struct LinearSupplier {
    particle: SuppliedParticle,
}

impl LinearSupplier {
    /// A particle at the origin.
    pub fn new(particle: Particle) -> Self {
        Self::with_offset(particle, Vector3::ORIGIN)
    }

    pub fn with_offset(particle: Particle, offset: Vector3) -> Self {
        Self {
            particle: SuppliedParticle::new(particle, offset),
        }
    }
}

impl ParticleSupplier for LinearSupplier {
    fn supply(&self, _tick: Tick) -> Particles<'_> {
        Box::new(std::iter::once(self.particle.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particle::Effect;

    #[test]
    fn test_always_one_point() {
        let s = LinearSupplier::with_offset(Particle::new(Effect::Cloud), Vector3::new(0.0, 1.0, 0.0));
        for tick in [0, 1, 7, 1000] {
            let points: Vec<_> = s.supply(tick).map(|p| p.position).collect();
            assert_eq!(points, vec![Vector3::AXIS_Y]);
        }
    }
}
