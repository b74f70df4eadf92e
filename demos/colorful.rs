//! # Colorful Example
//!
//! A ring of coloured dust spins around a flying arrow while its colour
//! cycles through the hue wheel.
//!
//! The three offset channels of coloured dust are read as RGB, and each one
//! is a function of the trail's age.
//!
//! Run with: `cargo run --example colorful`

use std::cell::Cell;
use std::f32::consts::PI;
use std::rc::Rc;
use trailgen::prelude::*;
use trailgen::HostError;

/// Piecewise hue ramp for one channel, repeating every 1536 steps.
/// Green and blue reuse it shifted by a third and two thirds of the cycle.
fn tick_to_color(tick: Tick) -> f32 {
    let step = (tick.wrapping_mul(20)) % 1536;
    match step {
        0..=255 => 1.0,
        256..=511 => ((255 - step % 256) as f32 / 256.0).max(0.001),
        512..=1023 => 0.0,
        1024..=1279 => ((step % 256) as f32 / 256.0).max(0.001),
        _ => 1.0,
    }
}

struct Arrow {
    position: Cell<Vector3>,
}

impl Emitter for Arrow {
    type World = ();

    fn world(&self) -> &() {
        &()
    }

    fn is_valid(&self) -> bool {
        self.position.get().z < 40.0
    }

    fn kind(&self) -> EmitterKind {
        EmitterKind::Arrow
    }

    fn position(&self) -> Result<Vector3, HostError> {
        Ok(self.position.get())
    }

    fn direction(&self) -> Result<Vector3, HostError> {
        Ok(Vector3::AXIS_Z)
    }
}

fn main() -> Result<(), TrailError> {
    env_logger::init();

    let dust = Particle::new(Effect::ColouredDust)
        .with_count(0)
        .with_speed(1.0)
        .with_offset(
            Channel::varying(tick_to_color),
            Channel::varying(|t: Tick| tick_to_color(t.wrapping_add(256))),
            Channel::varying(|t: Tick| tick_to_color(t.wrapping_add(512))),
        )
        .with_radius(120);

    let ring = CircumferenceSupplier::new(dust, 1.2, 0.9, 0.0, 1).rotate_y(|tick| tick as f32 * 2.0 * PI / 20.0);

    let sink = |_: &(), frame: &ParticleFrame, pos: Vector3, tick: Tick| -> Result<(), HostError> {
        if tick % 10 == 0 {
            let [r, g, b] = frame.offset().to_array();
            println!("tick {tick:>3}  {pos}  rgb({:>3}, {:>3}, {:>3})", (r * 255.0) as u8, (g * 255.0) as u8, (b * 255.0) as u8);
        }
        Ok(())
    };

    let arrow = Rc::new(Arrow {
        position: Cell::new(Vector3::new(0.0, 5.0, 0.0)),
    });
    let trail = EntityTrail::new(Rc::clone(&arrow), ring, sink, 1);
    let mut scheduler = TickScheduler::new();
    trail.begin(&mut scheduler);

    while trail.is_active() {
        arrow.position.set(arrow.position.get() + Vector3::new(0.0, 0.0, 0.5));
        scheduler.tick()?;
    }
    println!("Trail ended after {} ticks", trail.ticks_alive());
    Ok(())
}
