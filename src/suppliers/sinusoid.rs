use super::{cycled, point_budget};
use crate::particle::{Particle, SuppliedParticle};
use crate::supplier::{ParticleSupplier, Particles};
use crate::vector::Vector3;
use crate::Tick;
use std::f32::consts::TAU;

/// A point oscillating along a line, one sample per tick.
///
/// Precomputes `floor(2π / delta)` samples of `radius * sin(offset + i * delta)`
/// along Z, turned around Y by `rotation`, and emits sample `tick % n`.
#[derive(Clone, Debug)]
pub struct SinusoidSupplier {
    particles: Vec<SuppliedParticle>,
}

impl SinusoidSupplier {
    pub fn new(particle: Particle, radius: f32, delta: f32, offset: f32, rotation: f32) -> Self {
        let n = if delta > 0.0 && delta.is_finite() {
            point_budget((TAU as f64 / delta as f64).floor(), "sinusoid")
        } else {
            0
        };
        let particles = (0..n)
            .map(|i| {
                let angle = offset + delta * i as f32;
                let position = Vector3::new(0.0, 0.0, angle.sin() * radius).rotate_y(rotation);
                SuppliedParticle::new(particle.clone(), position)
            })
            .collect();
        Self { particles }
    }

    pub fn particles(&self) -> &[SuppliedParticle] {
        &self.particles
    }
}

impl ParticleSupplier for SinusoidSupplier {
    fn supply(&self, tick: Tick) -> Particles<'_> {
        cycled(&self.particles, tick)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particle::Effect;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_sample_count_is_floored() {
        // 2π / 0.3 = 20.94..., floored to 20.
        let wave = SinusoidSupplier::new(Particle::new(Effect::Note), 1.0, 0.3, 0.0, 0.0);
        assert_eq!(wave.particles().len(), 20);
    }

    #[test]
    fn test_tiny_delta_builds_empty() {
        let wave = SinusoidSupplier::new(Particle::new(Effect::Note), 1.0, 1e-30, 0.0, 0.0);
        assert!(wave.particles().is_empty());
        assert_eq!(wave.supply(3).count(), 0);
    }

    #[test]
    fn test_samples_follow_sine() {
        let wave = SinusoidSupplier::new(Particle::new(Effect::Note), 2.0, FRAC_PI_2, 0.0, 0.0);
        let zs: Vec<f32> = (0..4)
            .flat_map(|t| wave.supply(t).map(|p| p.position.z).collect::<Vec<_>>())
            .collect();
        let expected = [0.0, 2.0, 0.0, -2.0];
        for (z, e) in zs.iter().zip(expected) {
            assert!((z - e).abs() < 1e-5);
        }
        // Wraps around.
        assert_eq!(wave.supply(5).next().map(|p| p.position), Some(wave.particles()[1].position));
    }

    #[test]
    fn test_rotation_turns_the_line() {
        let wave = SinusoidSupplier::new(Particle::new(Effect::Note), 1.0, FRAC_PI_2, 0.0, FRAC_PI_2);
        let peak = wave.particles()[1].position;
        assert!(peak.distance(Vector3::AXIS_X) < 1e-5);
    }
}
