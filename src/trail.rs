//! Trails bound to moving emitters.
//!
//! An [`EntityTrail`] ties a [`ParticleSupplier`] to an [`Emitter`] (an arrow,
//! a player, any moving and facing entity) and a [`RenderSink`]. Every
//! `interval` ticks it:
//!
//! 1. stops itself if the emitter is gone,
//! 2. reads the emitter's position and facing direction and runs them through
//!    the trail's position and direction transforms,
//! 3. turns the supplier's drawing plane to face the direction and moves it to
//!    the position,
//! 4. feeds the trail's age (`ticks_alive`) to the supplier and hands every
//!    particle to the sink,
//! 5. ages the trail by `interval`.
//!
//! # Lifecycle
//!
//! | State | `begin` | `stop` | `reset` |
//! |-------|---------|--------|---------|
//! | Idle | registers the periodic task, becomes Active | no-op | zeroes the age |
//! | Active | no-op | cancels the task, becomes Idle | zeroes the age |
//!
//! Stopping keeps the age, so a trail that begins again resumes where it was
//! unless it is reset first.
//!
//! # Example
//!
//! ```
//! use trailgen::prelude::*;
//! use trailgen::HostError;
//!
//! struct Bolt;
//!
//! impl Emitter for Bolt {
//!     type World = ();
//!     fn world(&self) -> &() { &() }
//!     fn is_valid(&self) -> bool { true }
//!     fn kind(&self) -> EmitterKind { EmitterKind::Arrow }
//!     fn position(&self) -> Result<Vector3, HostError> { Ok(Vector3::new(0.0, 70.0, 0.0)) }
//!     fn direction(&self) -> Result<Vector3, HostError> { Ok(Vector3::AXIS_Z) }
//! }
//!
//! let sparks = CircumferenceSupplier::new(Particle::new(Effect::FireworksSpark), 0.5, 0.4, 0.0, 2);
//! let sink = |_: &(), frame: &ParticleFrame, pos: Vector3, _tick: Tick| -> Result<(), HostError> {
//!     assert_eq!(frame.effect, Effect::FireworksSpark);
//!     assert!((pos.y - 70.0).abs() <= 0.5 + 1e-4);
//!     Ok(())
//! };
//!
//! let trail = EntityTrail::new(Bolt, sparks, sink, 2);
//! let mut scheduler = TickScheduler::new();
//! trail.begin(&mut scheduler);
//! for _ in 0..6 {
//!     scheduler.tick()?;
//! }
//! assert_eq!(trail.ticks_alive(), 6);
//! # Ok::<(), TrailError>(())
//! ```

use crate::error::{HostError, TrailError};
use crate::particle::ParticleFrame;
use crate::scheduler::{TaskHandle, TaskScheduler};
use crate::supplier::ParticleSupplier;
use crate::transform::Transform;
use crate::vector::Vector3;
use crate::Tick;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

/// Families of emitters that need their facing direction corrected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EmitterKind {
    /// Projectiles report a direction mirrored on X and Y.
    Arrow,
    #[default]
    Generic,
}

impl EmitterKind {
    /// The direction correction applied by [`EntityTrail::new`].
    pub fn default_direction_transform(self) -> Transform {
        match self {
            EmitterKind::Arrow => Transform::from_fn(|v| Vector3::new(-v.x, -v.y, v.z)),
            EmitterKind::Generic => Transform::identity(),
        }
    }
}

/// Anything a trail can follow.
pub trait Emitter {
    /// Context handed to the render sink along with every particle.
    type World: ?Sized;

    fn world(&self) -> &Self::World;

    /// `false` once the emitter is dead or removed. The trail stops itself.
    fn is_valid(&self) -> bool;

    fn kind(&self) -> EmitterKind {
        EmitterKind::Generic
    }

    fn position(&self) -> Result<Vector3, HostError>;

    /// Facing direction. Does not need to be normalized.
    fn direction(&self) -> Result<Vector3, HostError>;
}

macro_rules! forward_emitter {
    ($($ptr:ident),*) => {$(
        impl<E: Emitter + ?Sized> Emitter for $ptr<E> {
            type World = E::World;

            fn world(&self) -> &Self::World {
                (**self).world()
            }

            fn is_valid(&self) -> bool {
                (**self).is_valid()
            }

            fn kind(&self) -> EmitterKind {
                (**self).kind()
            }

            fn position(&self) -> Result<Vector3, HostError> {
                (**self).position()
            }

            fn direction(&self) -> Result<Vector3, HostError> {
                (**self).direction()
            }
        }
    )*};
}

forward_emitter!(Box, Rc, Arc);

/// Host-side particle renderer.
pub trait RenderSink<W: ?Sized> {
    /// Draw one particle at an absolute `position`. `tick` is the trail's age.
    fn spawn(&mut self, world: &W, frame: &ParticleFrame, position: Vector3, tick: Tick) -> Result<(), HostError>;
}

impl<W, F> RenderSink<W> for F
where
    W: ?Sized,
    F: FnMut(&W, &ParticleFrame, Vector3, Tick) -> Result<(), HostError>,
{
    fn spawn(&mut self, world: &W, frame: &ParticleFrame, position: Vector3, tick: Tick) -> Result<(), HostError> {
        self(world, frame, position, tick)
    }
}

struct TrailInner<E, R> {
    emitter: E,
    interval: Tick,
    active: Cell<bool>,
    ticks_alive: Cell<Tick>,
    task: RefCell<Option<Box<dyn TaskHandle>>>,
    supplier: RefCell<Rc<dyn ParticleSupplier>>,
    direction_transform: RefCell<Transform>,
    position_transform: RefCell<Transform>,
    sink: RefCell<R>,
}

impl<E, R> Drop for TrailInner<E, R> {
    fn drop(&mut self) {
        if let Some(task) = self.task.get_mut().take() {
            task.cancel();
        }
    }
}

/// A supplier rendered around a moving emitter.
///
/// This is a shared handle: clones refer to the same trail, which lets a
/// render sink or host event handler hold on to it and call
/// [`stop`](Self::stop) at any time, including from inside a tick.
pub struct EntityTrail<E, R> {
    inner: Rc<TrailInner<E, R>>,
}

impl<E, R> Clone for EntityTrail<E, R> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<E, R> EntityTrail<E, R>
where
    E: Emitter + 'static,
    R: RenderSink<E::World> + 'static,
{
    /// A trail using the emitter kind's default direction correction and no
    /// position correction.
    pub fn new<S>(emitter: E, supplier: S, sink: R, interval: Tick) -> Self
    where
        S: ParticleSupplier + 'static,
    {
        let direction = emitter.kind().default_direction_transform();
        Self::with_transforms(emitter, direction, Transform::identity(), supplier, sink, interval)
    }

    pub fn with_transforms<S>(
        emitter: E,
        direction_transform: Transform,
        position_transform: Transform,
        supplier: S,
        sink: R,
        interval: Tick,
    ) -> Self
    where
        S: ParticleSupplier + 'static,
    {
        Self {
            inner: Rc::new(TrailInner {
                emitter,
                interval: interval.max(1),
                active: Cell::new(false),
                ticks_alive: Cell::new(0),
                task: RefCell::new(None),
                supplier: RefCell::new(Rc::new(supplier)),
                direction_transform: RefCell::new(direction_transform),
                position_transform: RefCell::new(position_transform),
                sink: RefCell::new(sink),
            }),
        }
    }

    /// Start rendering: registers a task running every `interval` ticks,
    /// starting now. Does nothing if the trail is already active.
    pub fn begin<S: TaskScheduler>(&self, scheduler: &mut S) {
        if self.inner.active.get() {
            return;
        }
        self.inner.active.set(true);

        let weak = Rc::downgrade(&self.inner);
        let handle = scheduler.run_timer(
            0,
            self.inner.interval,
            Box::new(move || match weak.upgrade() {
                Some(inner) => EntityTrail { inner }.tick(),
                None => Ok(()),
            }),
        );
        *self.inner.task.borrow_mut() = Some(Box::new(handle));
        log::debug!("trail started, every {} ticks", self.inner.interval);
    }

    /// Stop rendering and cancel the periodic task. Does nothing if the trail
    /// is idle.
    ///
    /// Safe to call from inside the render sink: no particle is handed to the
    /// sink after this returns.
    pub fn stop(&self) {
        if !self.inner.active.replace(false) {
            return;
        }
        if let Some(task) = self.inner.task.borrow_mut().take() {
            task.cancel();
        }
        log::debug!("trail stopped at age {}", self.inner.ticks_alive.get());
    }

    /// Set the age back to zero, keeping the active or idle state.
    pub fn reset(&self) {
        self.inner.ticks_alive.set(0);
        log::debug!("trail reset");
    }

    /// Render one period. Normally called by the scheduler task registered in
    /// [`begin`](Self::begin); idle trails do nothing.
    ///
    /// Emitter and sink failures abort the period without aging the trail.
    pub fn tick(&self) -> Result<(), TrailError> {
        let inner = &*self.inner;
        if !inner.active.get() {
            return Ok(());
        }
        if !inner.emitter.is_valid() {
            log::debug!("trail emitter is gone");
            self.stop();
            return Ok(());
        }

        let position = inner.emitter.position().map_err(TrailError::Emitter)?;
        let direction = inner.emitter.direction().map_err(TrailError::Emitter)?;
        let position = inner.position_transform.borrow().apply(position);
        let direction = inner.direction_transform.borrow().apply(direction);

        let placement = Transform::rotate_render_plane(direction).and_then(Transform::translate(position));
        let supplier = Rc::clone(&inner.supplier.borrow());
        let age = inner.ticks_alive.get();

        let Ok(mut sink) = inner.sink.try_borrow_mut() else {
            log::warn!("re-entrant trail tick ignored");
            return Ok(());
        };
        let world = inner.emitter.world();

        let mut spawned = 0usize;
        for p in (&supplier).transform_vectors(|v| placement.apply(v)).supply(age) {
            if !inner.active.get() {
                break;
            }
            let frame = p.particle.resolve(age);
            sink.spawn(world, &frame, p.position, age).map_err(TrailError::Render)?;
            spawned += 1;
        }
        log::trace!("trail age {age}: {spawned} particles");

        inner.ticks_alive.set(age.wrapping_add(inner.interval));
        Ok(())
    }

    pub fn is_active(&self) -> bool {
        self.inner.active.get()
    }

    /// Accumulated age in ticks. Advances by `interval` per rendered period.
    pub fn ticks_alive(&self) -> Tick {
        self.inner.ticks_alive.get()
    }

    pub fn interval(&self) -> Tick {
        self.inner.interval
    }

    pub fn emitter(&self) -> &E {
        &self.inner.emitter
    }

    /// Replace the supplier. Takes effect on the next period.
    pub fn set_supplier<S: ParticleSupplier + 'static>(&self, supplier: S) {
        *self.inner.supplier.borrow_mut() = Rc::new(supplier);
    }

    pub fn set_direction_transform(&self, transform: Transform) {
        *self.inner.direction_transform.borrow_mut() = transform;
    }

    pub fn set_position_transform(&self, transform: Transform) {
        *self.inner.position_transform.borrow_mut() = transform;
    }
}

impl<E, R> fmt::Debug for EntityTrail<E, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityTrail")
            .field("interval", &self.inner.interval)
            .field("active", &self.inner.active.get())
            .field("ticks_alive", &self.inner.ticks_alive.get())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particle::{Effect, Particle};
    use crate::scheduler::TickScheduler;
    use crate::suppliers::LinearSupplier;

    struct Still {
        alive: Cell<bool>,
        kind: EmitterKind,
    }

    impl Still {
        fn new(kind: EmitterKind) -> Rc<Self> {
            Rc::new(Self {
                alive: Cell::new(true),
                kind,
            })
        }
    }

    impl Emitter for Still {
        type World = str;

        fn world(&self) -> &str {
            "overworld"
        }

        fn is_valid(&self) -> bool {
            self.alive.get()
        }

        fn kind(&self) -> EmitterKind {
            self.kind
        }

        fn position(&self) -> Result<Vector3, HostError> {
            Ok(Vector3::new(1.0, 2.0, 3.0))
        }

        fn direction(&self) -> Result<Vector3, HostError> {
            Ok(Vector3::AXIS_Y)
        }
    }

    type Spawned = Rc<RefCell<Vec<(Vector3, Tick)>>>;

    fn recording_sink(out: &Spawned) -> impl FnMut(&str, &ParticleFrame, Vector3, Tick) -> Result<(), HostError> {
        let out = out.clone();
        move |world, _frame, pos, tick| {
            assert_eq!(world, "overworld");
            out.borrow_mut().push((pos, tick));
            Ok(())
        }
    }

    #[test]
    fn test_arrow_direction_is_mirrored() {
        let t = EmitterKind::Arrow.default_direction_transform();
        assert_eq!(t.apply(Vector3::new(1.0, 2.0, 3.0)), Vector3::new(-1.0, -2.0, 3.0));
        assert!(EmitterKind::Generic.default_direction_transform().is_identity());
    }

    #[test]
    fn test_idle_trail_does_nothing() {
        let out = Spawned::default();
        let trail = EntityTrail::new(
            Still::new(EmitterKind::Generic),
            LinearSupplier::new(Particle::new(Effect::Heart)),
            recording_sink(&out),
            1,
        );
        trail.tick().unwrap();
        assert!(out.borrow().is_empty());
        assert_eq!(trail.ticks_alive(), 0);
    }

    #[test]
    fn test_particles_are_placed_at_emitter() {
        let out = Spawned::default();
        let trail = EntityTrail::new(
            Still::new(EmitterKind::Generic),
            LinearSupplier::with_offset(Particle::new(Effect::Heart), Vector3::AXIS_X),
            recording_sink(&out),
            5,
        );
        let mut s = TickScheduler::new();
        trail.begin(&mut s);
        trail.begin(&mut s);
        assert_eq!(s.task_count(), 1);

        for _ in 0..11 {
            s.tick().unwrap();
        }
        let spawned = out.borrow();
        assert_eq!(spawned.len(), 3);
        assert_eq!(spawned[0], (Vector3::new(2.0, 2.0, 3.0), 0));
        assert_eq!(spawned[1].1, 5);
        assert_eq!(spawned[2].1, 10);
        assert_eq!(trail.ticks_alive(), 15);
    }

    #[test]
    fn test_invalid_emitter_stops_trail() {
        let out = Spawned::default();
        let emitter = Still::new(EmitterKind::Generic);
        let trail = EntityTrail::new(
            Rc::clone(&emitter),
            LinearSupplier::new(Particle::new(Effect::Heart)),
            recording_sink(&out),
            1,
        );
        let mut s = TickScheduler::new();
        trail.begin(&mut s);
        s.tick().unwrap();
        emitter.alive.set(false);
        s.tick().unwrap();
        s.tick().unwrap();

        assert!(!trail.is_active());
        assert_eq!(out.borrow().len(), 1);
        assert_eq!(trail.ticks_alive(), 1);
        assert_eq!(s.task_count(), 0);
    }

    #[test]
    fn test_stop_from_inside_sink() {
        let count = Rc::new(Cell::new(0));
        let slot: Rc<RefCell<Option<Box<dyn Fn()>>>> = Rc::new(RefCell::new(None));
        let (c, stopper) = (count.clone(), slot.clone());
        let sink = move |_: &str, _: &ParticleFrame, _: Vector3, _: Tick| -> Result<(), HostError> {
            c.set(c.get() + 1);
            if let Some(stop) = stopper.borrow().as_ref() {
                stop();
            }
            Ok(())
        };

        let many = crate::supplier::from_fn(|_| {
            (0..10).map(|i| crate::particle::SuppliedParticle::new(Particle::new(Effect::Note), Vector3::splat(i as f32)))
        });
        let trail = EntityTrail::new(Still::new(EmitterKind::Generic), many, sink, 1);
        let handle = trail.clone();
        *slot.borrow_mut() = Some(Box::new(move || handle.stop()));

        let mut s = TickScheduler::new();
        trail.begin(&mut s);
        s.tick().unwrap();
        s.tick().unwrap();

        assert_eq!(count.get(), 1);
        assert!(!trail.is_active());
        // Break the handle cycle.
        slot.borrow_mut().take();
    }

    #[test]
    fn test_reset_keeps_state() {
        let out = Spawned::default();
        let trail = EntityTrail::new(
            Still::new(EmitterKind::Generic),
            LinearSupplier::new(Particle::new(Effect::Heart)),
            recording_sink(&out),
            2,
        );
        let mut s = TickScheduler::new();
        trail.begin(&mut s);
        s.tick().unwrap();
        assert_eq!(trail.ticks_alive(), 2);
        trail.reset();
        assert_eq!(trail.ticks_alive(), 0);
        assert!(trail.is_active());

        trail.stop();
        trail.stop();
        trail.reset();
        assert!(!trail.is_active());
    }

    #[test]
    fn test_sink_error_does_not_age() {
        let sink = |_: &str, _: &ParticleFrame, _: Vector3, _: Tick| -> Result<(), HostError> { Err("full".into()) };
        let trail = EntityTrail::new(
            Still::new(EmitterKind::Generic),
            LinearSupplier::new(Particle::new(Effect::Heart)),
            sink,
            1,
        );
        let mut s = TickScheduler::new();
        trail.begin(&mut s);
        assert!(matches!(s.tick(), Err(TrailError::Render(_))));
        assert_eq!(trail.ticks_alive(), 0);
        assert!(trail.is_active());
    }
}
