use crate::particle::{Particle, SuppliedParticle};
use crate::supplier::{ParticleSupplier, Particles};
use crate::vector::Vector3;
use crate::Tick;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::sync::{Mutex, PoisonError};

/// A random cloud of particles around an offset.
///
/// On each active tick a random number of points is drawn, each displaced
/// from `offset` by independent standard normal samples scaled by half the
/// spread space on every axis. Every point picks its particle uniformly from
/// the candidate set.
///
/// The number of points per active tick is `uniform[0, max - min) + min + 1`,
/// which lies in `[min + 1, max]`. When `max <= min` exactly `min + 1` points
/// are drawn.
///
/// The random source is guarded by a mutex, so concurrent `supply` calls are
/// serialized. Use [`with_seed`](Self::with_seed) for reproducible output.
#[derive(Debug)]
pub struct ScatteringSupplier {
    particles: Vec<Particle>,
    half_spread: Vector3,
    offset: Vector3,
    min_particles: u32,
    max_particles: u32,
    appearing_interval: Tick,
    rng: Mutex<SmallRng>,
}

impl ScatteringSupplier {
    pub fn new(
        particles: Vec<Particle>,
        spread_space: Vector3,
        offset: Vector3,
        min_particles: u32,
        max_particles: u32,
        appearing_interval: Tick,
    ) -> Self {
        Self {
            particles,
            half_spread: spread_space * 0.5,
            offset,
            min_particles,
            max_particles,
            appearing_interval,
            rng: Mutex::new(SmallRng::from_entropy()),
        }
    }

    /// Reseed the random source.
    pub fn with_seed(self, seed: u64) -> Self {
        Self {
            rng: Mutex::new(SmallRng::seed_from_u64(seed)),
            ..self
        }
    }

    pub fn candidates(&self) -> &[Particle] {
        &self.particles
    }

    /// Half the spread space on each axis: the standard deviation of the cloud.
    pub fn half_spread(&self) -> Vector3 {
        self.half_spread
    }

    pub fn offset(&self) -> Vector3 {
        self.offset
    }

    pub fn appearing_interval(&self) -> Tick {
        self.appearing_interval
    }

    fn scatter(&self) -> Vec<SuppliedParticle> {
        if self.particles.is_empty() {
            return Vec::new();
        }
        // Nothing in here can panic while the lock is held, but recover anyway.
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);

        let spread = self.max_particles.saturating_sub(self.min_particles);
        let extra = if spread > 0 { rng.gen_range(0..spread) } else { 0 };
        let n = (self.min_particles + extra).saturating_add(1);

        (0..n)
            .map(|_| {
                let particle = self.particles[rng.gen_range(0..self.particles.len())].clone();
                let g = Vector3::new(gaussian(&mut *rng), gaussian(&mut *rng), gaussian(&mut *rng));
                SuppliedParticle::new(particle, self.offset + self.half_spread * g)
            })
            .collect()
    }
}

impl ParticleSupplier for ScatteringSupplier {
    fn supply(&self, tick: Tick) -> Particles<'_> {
        if tick % self.appearing_interval.max(1) != 0 {
            return Box::new(std::iter::empty());
        }
        let cloud = self.scatter();
        log::trace!("scattering: {} points at tick {tick}", cloud.len());
        Box::new(cloud.into_iter())
    }
}

/// Standard normal sample, Marsaglia polar method.
fn gaussian<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    loop {
        let u: f64 = rng.gen_range(-1.0..1.0);
        let v: f64 = rng.gen_range(-1.0..1.0);
        let s = u * u + v * v;
        if s > 0.0 && s < 1.0 {
            return (u * (-2.0 * s.ln() / s).sqrt()) as f32;
        }
    }
}
