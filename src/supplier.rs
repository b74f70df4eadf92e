//! The generator abstraction.
//!
//! A [`ParticleSupplier`] maps a tick to a finite sequence of
//! [`SuppliedParticle`]s. Output is produced lazily through a boxed iterator.
//!
//! Suppliers compose the way iterators do: each combinator consumes the
//! supplier and returns an adapter that is itself a supplier. To keep using
//! the original, combine a reference instead (`(&supplier).translate(..)` or
//! [`ParticleSupplier::by_ref`]); references, `Box`, `Rc` and `Arc` are all
//! suppliers too.
//!
//! # Example
//!
//! ```
//! use trailgen::prelude::*;
//!
//! let dot = Particle::new(Effect::Flame);
//! let ring = CircumferenceSupplier::new(dot.clone(), 1.0, std::f32::consts::FRAC_PI_2, 0.0, 1);
//! let center = LinearSupplier::new(dot);
//!
//! let spinning = ring
//!     .rotate_y(|tick| tick as f32 * 0.1)
//!     .translate(|_| Vector3::new(0.0, 2.0, 0.0))
//!     .combine([center]);
//!
//! assert_eq!(spinning.supply(0).count(), 5);
//! ```

use crate::particle::SuppliedParticle;
use crate::vector::Vector3;
use crate::Tick;
use std::rc::Rc;
use std::sync::Arc;

/// Lazily produced output of a supplier for one tick.
pub type Particles<'a> = Box<dyn Iterator<Item = SuppliedParticle> + 'a>;

/// A type-erased supplier.
pub type BoxedSupplier<'a> = Box<dyn ParticleSupplier + 'a>;

/// A tick-indexed source of positioned particles.
pub trait ParticleSupplier {
    /// Particles that should be rendered at `tick`.
    ///
    /// Callers are expected to invoke this with consecutive tick values at a
    /// fixed rate. The returned sequence is finite and often empty.
    fn supply(&self, tick: Tick) -> Particles<'_>;

    /// Rewrite the whole output sequence as a function of the sequence and
    /// the tick.
    fn transform_stream<F>(self, f: F) -> TransformStream<Self, F>
    where
        Self: Sized,
        F: for<'a> Fn(Particles<'a>, Tick) -> Particles<'a>,
    {
        TransformStream { inner: self, f }
    }

    /// Map every supplied particle as a function of the particle and the tick.
    fn transform_particles<F>(self, f: F) -> TransformParticles<Self, F>
    where
        Self: Sized,
        F: Fn(SuppliedParticle, Tick) -> SuppliedParticle,
    {
        TransformParticles { inner: self, f }
    }

    /// Map every position, leaving the particles themselves alone.
    fn transform_vectors<F>(self, f: F) -> TransformVectors<Self, F>
    where
        Self: Sized,
        F: Fn(Vector3) -> Vector3,
    {
        TransformVectors { inner: self, f }
    }

    /// Shift every position by the vector `f(tick)`.
    fn translate<F>(self, f: F) -> Translate<Self, F>
    where
        Self: Sized,
        F: Fn(Tick) -> Vector3,
    {
        Translate { inner: self, f }
    }

    /// Scale every position about the origin by the factor `f(tick)`.
    fn scale<F>(self, f: F) -> Scale<Self, F>
    where
        Self: Sized,
        F: Fn(Tick) -> f32,
    {
        Scale { inner: self, f }
    }

    /// Rotate every position around `axis` by the angle `f(tick)`.
    fn rotate<F>(self, axis: Vector3, f: F) -> Rotate<Self, F>
    where
        Self: Sized,
        F: Fn(Tick) -> f32,
    {
        Rotate { inner: self, axis, f }
    }

    fn rotate_x<F>(self, f: F) -> Rotate<Self, F>
    where
        Self: Sized,
        F: Fn(Tick) -> f32,
    {
        self.rotate(Vector3::AXIS_X, f)
    }

    fn rotate_y<F>(self, f: F) -> Rotate<Self, F>
    where
        Self: Sized,
        F: Fn(Tick) -> f32,
    {
        self.rotate(Vector3::AXIS_Y, f)
    }

    fn rotate_z<F>(self, f: F) -> Rotate<Self, F>
    where
        Self: Sized,
        F: Fn(Tick) -> f32,
    {
        self.rotate(Vector3::AXIS_Z, f)
    }

    /// Append the output of `others`, in order, after this supplier's output
    /// for the same tick.
    ///
    /// Nothing is deduplicated: combining a supplier with itself repeats its
    /// particles.
    fn combine<'a, I>(self, others: I) -> Combine<'a, Self>
    where
        Self: Sized,
        I: IntoIterator,
        I::Item: ParticleSupplier + 'a,
    {
        Combine {
            first: self,
            others: others
                .into_iter()
                .map(|s| Box::new(s) as BoxedSupplier<'a>)
                .collect(),
        }
    }

    /// Borrow this supplier so combinators leave it usable.
    fn by_ref(&self) -> &Self
    where
        Self: Sized,
    {
        self
    }

    /// Erase the concrete type.
    fn boxed<'a>(self) -> BoxedSupplier<'a>
    where
        Self: Sized + 'a,
    {
        Box::new(self)
    }
}

impl<S: ParticleSupplier + ?Sized> ParticleSupplier for &S {
    fn supply(&self, tick: Tick) -> Particles<'_> {
        (**self).supply(tick)
    }
}

impl<S: ParticleSupplier + ?Sized> ParticleSupplier for Box<S> {
    fn supply(&self, tick: Tick) -> Particles<'_> {
        (**self).supply(tick)
    }
}

impl<S: ParticleSupplier + ?Sized> ParticleSupplier for Rc<S> {
    fn supply(&self, tick: Tick) -> Particles<'_> {
        (**self).supply(tick)
    }
}

impl<S: ParticleSupplier + ?Sized> ParticleSupplier for Arc<S> {
    fn supply(&self, tick: Tick) -> Particles<'_> {
        (**self).supply(tick)
    }
}

/// Build a supplier from a closure.
///
/// ```
/// use trailgen::prelude::*;
///
/// let blink = trailgen::from_fn(|tick| {
///     (tick % 2 == 0)
///         .then(|| SuppliedParticle::new(Particle::new(Effect::Heart), Vector3::ORIGIN))
/// });
/// assert_eq!(blink.supply(0).count(), 1);
/// assert_eq!(blink.supply(1).count(), 0);
/// ```
pub fn from_fn<F, I>(f: F) -> FromFn<F>
where
    F: Fn(Tick) -> I,
    I: IntoIterator<Item = SuppliedParticle>,
    I::IntoIter: 'static,
{
    FromFn { f }
}

/// Supplier returned by [`from_fn`].
#[derive(Clone)]
pub struct FromFn<F> {
    f: F,
}

impl<F, I> ParticleSupplier for FromFn<F>
where
    F: Fn(Tick) -> I,
    I: IntoIterator<Item = SuppliedParticle>,
    I::IntoIter: 'static,
{
    fn supply(&self, tick: Tick) -> Particles<'_> {
        Box::new((self.f)(tick).into_iter())
    }
}

/// Supplier returned by [`ParticleSupplier::transform_stream`].
#[derive(Clone)]
pub struct TransformStream<S, F> {
    inner: S,
    f: F,
}

impl<S, F> ParticleSupplier for TransformStream<S, F>
where
    S: ParticleSupplier,
    F: for<'a> Fn(Particles<'a>, Tick) -> Particles<'a>,
{
    fn supply(&self, tick: Tick) -> Particles<'_> {
        (self.f)(self.inner.supply(tick), tick)
    }
}

/// Supplier returned by [`ParticleSupplier::transform_particles`].
#[derive(Clone)]
pub struct TransformParticles<S, F> {
    inner: S,
    f: F,
}

impl<S, F> ParticleSupplier for TransformParticles<S, F>
where
    S: ParticleSupplier,
    F: Fn(SuppliedParticle, Tick) -> SuppliedParticle,
{
    fn supply(&self, tick: Tick) -> Particles<'_> {
        let f = &self.f;
        Box::new(self.inner.supply(tick).map(move |p| f(p, tick)))
    }
}

/// Supplier returned by [`ParticleSupplier::transform_vectors`].
#[derive(Clone)]
pub struct TransformVectors<S, F> {
    inner: S,
    f: F,
}

impl<S, F> ParticleSupplier for TransformVectors<S, F>
where
    S: ParticleSupplier,
    F: Fn(Vector3) -> Vector3,
{
    fn supply(&self, tick: Tick) -> Particles<'_> {
        let f = &self.f;
        Box::new(self.inner.supply(tick).map(move |p| {
            let position = f(p.position);
            p.with_position(position)
        }))
    }
}

/// Supplier returned by [`ParticleSupplier::translate`].
#[derive(Clone)]
pub struct Translate<S, F> {
    inner: S,
    f: F,
}

impl<S, F> ParticleSupplier for Translate<S, F>
where
    S: ParticleSupplier,
    F: Fn(Tick) -> Vector3,
{
    fn supply(&self, tick: Tick) -> Particles<'_> {
        let offset = (self.f)(tick);
        Box::new(self.inner.supply(tick).map(move |p| {
            let position = p.position + offset;
            p.with_position(position)
        }))
    }
}

/// Supplier returned by [`ParticleSupplier::scale`].
#[derive(Clone)]
pub struct Scale<S, F> {
    inner: S,
    f: F,
}

impl<S, F> ParticleSupplier for Scale<S, F>
where
    S: ParticleSupplier,
    F: Fn(Tick) -> f32,
{
    fn supply(&self, tick: Tick) -> Particles<'_> {
        let factor = (self.f)(tick);
        Box::new(self.inner.supply(tick).map(move |p| {
            let position = p.position.scale(factor);
            p.with_position(position)
        }))
    }
}

/// Supplier returned by [`ParticleSupplier::rotate`] and its per-axis shorthands.
#[derive(Clone)]
pub struct Rotate<S, F> {
    inner: S,
    axis: Vector3,
    f: F,
}

impl<S, F> ParticleSupplier for Rotate<S, F>
where
    S: ParticleSupplier,
    F: Fn(Tick) -> f32,
{
    fn supply(&self, tick: Tick) -> Particles<'_> {
        let angle = (self.f)(tick);
        let axis = self.axis;
        Box::new(self.inner.supply(tick).map(move |p| {
            let position = p.position.rotate(axis, angle);
            p.with_position(position)
        }))
    }
}

/// Supplier returned by [`ParticleSupplier::combine`].
pub struct Combine<'a, S> {
    first: S,
    others: Vec<BoxedSupplier<'a>>,
}

impl<S: ParticleSupplier> ParticleSupplier for Combine<'_, S> {
    fn supply(&self, tick: Tick) -> Particles<'_> {
        let rest = self.others.iter().flat_map(move |s| s.supply(tick));
        Box::new(self.first.supply(tick).chain(rest))
    }
}
