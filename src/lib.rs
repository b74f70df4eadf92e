//! # trailgen - procedural particle trails
//!
//! Time-varying 3D point clouds for visual effects: circles, polygons, stars,
//! scattering clouds, bitmaps drawn as particle grids and parametric curves,
//! all expressed as functions of a discrete tick.
//!
//! trailgen computes *where* particles go. Drawing them is left to the host
//! through a [`RenderSink`].
//!
//! ## Quick Start
//!
//! ```
//! use trailgen::prelude::*;
//! use std::f32::consts::PI;
//!
//! let flame = Particle::new(Effect::Flame).with_radius(64);
//!
//! // A pentagram that spins slowly and floats one block up.
//! let sigil = PolySupplier::new(flame, 1, 5, 1, 1.5, 0.1, 0.0)
//!     .rotate_y(|tick| tick as f32 * PI / 40.0)
//!     .translate(|_| Vector3::new(0.0, 1.0, 0.0));
//!
//! for particle in sigil.supply(0) {
//!     assert!((particle.position.y - 1.0).abs() < 1e-6);
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Generators
//!
//! A [`ParticleSupplier`] maps a tick to a finite sequence of
//! [`SuppliedParticle`]s (a [`Particle`] descriptor plus a position). Every
//! supplier draws in its local XZ plane with +Y as "up". Suppliers compose:
//!
//! ```ignore
//! ring.rotate_y(|t| t as f32 * 0.1)     // spin
//!     .scale(|t| 1.0 + (t % 20) as f32 / 20.0)  // pulse
//!     .combine([core, sparks])          // add more shapes
//! ```
//!
//! ### Transforms
//!
//! A [`Transform`] is a composable `Vector3 -> Vector3` function.
//! [`Transform::rotate_render_plane`] turns a flat drawing to face any
//! direction, which is how trails follow where an emitter is looking.
//!
//! ### Trails
//!
//! An [`EntityTrail`] binds a supplier to a moving [`Emitter`] and renders it
//! every few ticks through a [`TaskScheduler`]. [`TickScheduler`] is a
//! cooperative scheduler for hosts without one.
//!
//! ## Generators
//!
//! | Supplier | Shape |
//! |----------|-------|
//! | [`CircumferenceSupplier`] | points on a circle |
//! | [`HelixSupplier`] | one point per tick walking a circle |
//! | [`SinusoidSupplier`] | one point per tick along a sine wave |
//! | [`PolySupplier`] | polygons and star polygons |
//! | [`StarSupplier`] | stars with inner and outer radius |
//! | [`ScatteringSupplier`] | random gaussian clouds |
//! | [`BitmapSupplier`] | images as coloured particle grids |
//! | [`SpirographSupplier`] | epitrochoids, hypotrochoids, custom curves |
//! | [`LinearSupplier`] | a single point |
//!
//! Presets can also be loaded from JSON, see [`config`].

pub mod config;
mod error;
mod particle;
pub mod scheduler;
mod supplier;
pub mod suppliers;
mod trail;
mod transform;
mod vector;

pub use bytemuck;
pub use glam;

pub use config::TrailConfig;
pub use error::{ConfigError, HostError, TrailError};
pub use particle::{Channel, Effect, Particle, ParticleFrame, SuppliedParticle};
pub use scheduler::{TaskHandle, TaskScheduler, TickScheduler};
pub use supplier::{from_fn, BoxedSupplier, ParticleSupplier, Particles};
pub use suppliers::{
    BitmapSupplier, CircumferenceSupplier, FnPixels, HelixSupplier, LinearSupplier, PolySupplier,
    ScatteringSupplier, SinusoidSupplier, SpirographSupplier, StarSupplier,
};
pub use trail::{Emitter, EmitterKind, EntityTrail, RenderSink};
pub use transform::Transform;
pub use vector::Vector3;

/// Discrete simulation time step.
pub type Tick = u32;

/// Adapter types returned by [`ParticleSupplier`] combinators.
pub mod adapters {
    pub use crate::supplier::{
        Combine, FromFn, Rotate, Scale, TransformParticles, TransformStream, TransformVectors, Translate,
    };
}

/// Convenience re-exports for common types.
pub mod prelude {
    pub use crate::config::TrailConfig;
    pub use crate::error::{ConfigError, TrailError};
    pub use crate::particle::{Channel, Effect, Particle, ParticleFrame, SuppliedParticle};
    pub use crate::scheduler::{TaskHandle, TaskScheduler, TickScheduler};
    pub use crate::supplier::{from_fn, ParticleSupplier};
    pub use crate::suppliers::{
        BitmapSupplier, CircumferenceSupplier, HelixSupplier, LinearSupplier, PolySupplier,
        ScatteringSupplier, SinusoidSupplier, SpirographSupplier, StarSupplier,
    };
    pub use crate::trail::{Emitter, EmitterKind, EntityTrail, RenderSink};
    pub use crate::transform::Transform;
    pub use crate::vector::Vector3;
    pub use crate::Tick;
}
