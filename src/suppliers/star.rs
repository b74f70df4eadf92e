use super::poly::points_per_line;
use super::{draw_line, gated, on_circle, point_budget};
use crate::particle::{Particle, SuppliedParticle};
use crate::supplier::{ParticleSupplier, Particles};
use crate::vector::Vector3;
use crate::Tick;
use std::f32::consts::TAU;

/// A star bounded by an outer and an inner circle.
///
/// For every vertex two edges are drawn: outer tip to the inner notch half a
/// sector further, then that notch to the next outer tip.
#[derive(Clone, Debug)]
pub struct StarSupplier {
    particles: Vec<SuppliedParticle>,
    appearing_interval: Tick,
}

impl StarSupplier {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        particle: Particle,
        appearing_interval: Tick,
        vertex: u32,
        step: f32,
        high_radius: f32,
        low_radius: f32,
        angle_offset: f32,
    ) -> Self {
        if vertex == 0 {
            return Self {
                particles: Vec::new(),
                appearing_interval,
            };
        }

        let full_angle = TAU / vertex as f32;
        let mid_angle = full_angle / 2.0;
        let edge = Vector3::new(high_radius, 0.0, 0.0).distance(on_circle(low_radius, mid_angle));
        let per_line = points_per_line(edge, step);

        let total = point_budget(2.0 * per_line as f64 * vertex as f64, "star");
        let drawn_vertices = if total == 0 { 0 } else { vertex };
        let mut particles = Vec::with_capacity(total);
        for i in 0..drawn_vertices {
            let high = angle_offset + full_angle * i as f32;
            let tip = on_circle(high_radius, high);
            let notch = on_circle(low_radius, high + mid_angle);
            let next_tip = on_circle(high_radius, high + full_angle);

            draw_line(&mut particles, &particle, tip, (notch - tip).normalize(), step, per_line);
            draw_line(&mut particles, &particle, notch, (next_tip - notch).normalize(), step, per_line);
        }
        log::trace!("star: {} points", particles.len());

        Self {
            particles,
            appearing_interval,
        }
    }

    pub fn particles(&self) -> &[SuppliedParticle] {
        &self.particles
    }

    pub fn appearing_interval(&self) -> Tick {
        self.appearing_interval
    }
}

impl ParticleSupplier for StarSupplier {
    fn supply(&self, tick: Tick) -> Particles<'_> {
        gated(&self.particles, self.appearing_interval, tick)
    }
}
