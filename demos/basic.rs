//! # Basic Example
//!
//! An arrow is shot into the air and leaves a cloud of sparks, flames and
//! smoke behind it until it hits the ground.
//!
//! The host world is simulated: spawned particles are just counted.
//!
//! Run with: `RUST_LOG=debug cargo run --example basic`

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;
use trailgen::prelude::*;
use trailgen::HostError;

const GRAVITY: f32 = 0.05;

/// A flying arrow, advanced by hand every tick.
struct Arrow {
    position: Cell<Vector3>,
    velocity: Cell<Vector3>,
    stuck: Cell<bool>,
}

impl Arrow {
    fn shoot(from: Vector3, velocity: Vector3) -> Rc<Self> {
        Rc::new(Self {
            position: Cell::new(from),
            velocity: Cell::new(velocity),
            stuck: Cell::new(false),
        })
    }

    /// Returns `true` on the tick the arrow hits the ground.
    fn step(&self) -> bool {
        if self.stuck.get() {
            return false;
        }
        let velocity = self.velocity.get() - Vector3::new(0.0, GRAVITY, 0.0);
        let position = self.position.get() + velocity;
        self.velocity.set(velocity);
        if position.y <= 0.0 {
            self.position.set(position.with_y(0.0));
            self.stuck.set(true);
            return true;
        }
        self.position.set(position);
        false
    }
}

impl Emitter for Arrow {
    type World = ();

    fn world(&self) -> &() {
        &()
    }

    fn is_valid(&self) -> bool {
        true
    }

    fn kind(&self) -> EmitterKind {
        EmitterKind::Arrow
    }

    fn position(&self) -> Result<Vector3, HostError> {
        Ok(self.position.get())
    }

    // Projectiles report their facing mirrored on X and Y, like the host does.
    fn direction(&self) -> Result<Vector3, HostError> {
        let v = self.velocity.get();
        Ok(Vector3::new(-v.x, -v.y, v.z))
    }
}

fn main() -> Result<(), TrailError> {
    env_logger::init();

    let particles = [Effect::FireworksSpark, Effect::Flame, Effect::Smoke]
        .into_iter()
        .map(|effect| Particle::new(effect).with_count(3).with_radius(120))
        .collect();
    let cloud = ScatteringSupplier::new(particles, Vector3::new(2.0, 1.0, 2.0), Vector3::ORIGIN, 5, 20, 1);

    let spawned: Rc<RefCell<BTreeMap<String, usize>>> = Rc::default();
    let counter = spawned.clone();
    let sink = move |_: &(), frame: &ParticleFrame, _: Vector3, _: Tick| -> Result<(), HostError> {
        *counter.borrow_mut().entry(format!("{:?}", frame.effect)).or_default() += frame.count as usize;
        Ok(())
    };

    let arrow = Arrow::shoot(Vector3::new(0.0, 1.6, 0.0), Vector3::new(0.0, 0.8, 1.5));
    let trail = EntityTrail::new(Rc::clone(&arrow), cloud, sink, 1);

    let mut scheduler = TickScheduler::new();
    trail.begin(&mut scheduler);

    while trail.is_active() {
        if arrow.step() {
            log::info!("arrow landed at {}", arrow.position.get());
            trail.stop();
        }
        scheduler.tick()?;
    }

    println!("=== trailgen basic example ===");
    println!("Flight time: {} ticks", trail.ticks_alive());
    for (effect, count) in spawned.borrow().iter() {
        println!("{effect:>16}: {count}");
    }
    Ok(())
}
