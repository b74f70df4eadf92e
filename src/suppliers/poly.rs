use super::{draw_line, gated, gcd, on_circle, point_budget};
use crate::particle::{Particle, SuppliedParticle};
use crate::supplier::{ParticleSupplier, Particles};
use crate::vector::Vector3;
use crate::Tick;
use std::f32::consts::TAU;

/// Outline of a regular polygon or star polygon.
///
/// `vertex` points sit on a circle of `radius`. Each edge joins a vertex to
/// the one `jumps + 1` positions further, so `jumps == 0` draws the convex
/// polygon and `vertex = 5, jumps = 1` draws a pentagram. Edges are drawn
/// until the path closes, which takes `vertex / gcd(vertex, jumps + 1)` of
/// them.
#[derive(Clone, Debug)]
pub struct PolySupplier {
    particles: Vec<SuppliedParticle>,
    appearing_interval: Tick,
    line_count: usize,
}

impl PolySupplier {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        particle: Particle,
        appearing_interval: Tick,
        vertex: u32,
        jumps: u32,
        radius: f32,
        step: f32,
        angle_offset: f32,
    ) -> Self {
        if vertex == 0 {
            return Self {
                particles: Vec::new(),
                appearing_interval,
                line_count: 0,
            };
        }

        // Jumping a whole lap lands on the same vertex, so only the remainder counts.
        let jump = jumps % vertex + 1;
        let full_angle = TAU / vertex as f32 * jump as f32;
        let edge = Vector3::new(radius, 0.0, 0.0).distance(on_circle(radius, full_angle));
        let per_line = points_per_line(edge, step);
        let line_count = (vertex / gcd(vertex, jump)) as usize;

        let total = point_budget(line_count as f64 * per_line as f64, "poly");
        let drawn_lines = if total == 0 { 0 } else { line_count };
        let mut particles = Vec::with_capacity(total);
        for i in 0..drawn_lines {
            let origin = angle_offset + i as f32 * full_angle;
            let from = on_circle(radius, origin);
            let to = on_circle(radius, origin + full_angle);
            draw_line(&mut particles, &particle, from, (to - from).normalize(), step, per_line);
        }
        log::trace!("poly: {line_count} lines, {} points", particles.len());

        Self {
            particles,
            appearing_interval,
            line_count,
        }
    }

    pub fn particles(&self) -> &[SuppliedParticle] {
        &self.particles
    }

    /// Number of edges drawn before the outline closes.
    pub fn line_count(&self) -> usize {
        self.line_count
    }

    pub fn appearing_interval(&self) -> Tick {
        self.appearing_interval
    }
}

impl ParticleSupplier for PolySupplier {
    fn supply(&self, tick: Tick) -> Particles<'_> {
        gated(&self.particles, self.appearing_interval, tick)
    }
}

/// Points needed to cover `length` at `step` spacing. Zero for bad steps.
pub(super) fn points_per_line(length: f32, step: f32) -> usize {
    if !(step > 0.0 && step.is_finite()) {
        return 0;
    }
    point_budget((length as f64 / step as f64).round(), "line")
}
