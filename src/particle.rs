//! Particle descriptors.
//!
//! A [`Particle`] describes *what* to draw: the host effect, its sub-parameters
//! and five channels (three offsets, speed, count) that may vary with the tick.
//! A [`SuppliedParticle`] pairs a descriptor with *where* to draw it, and is the
//! unit every [`ParticleSupplier`](crate::ParticleSupplier) produces.
//!
//! # Example
//!
//! ```
//! use trailgen::{Channel, Effect, Particle};
//!
//! let dust = Particle::new(Effect::ColouredDust)
//!     .with_count(0)
//!     .with_speed(1.0)
//!     .with_offset_x(Channel::varying(|tick| (tick % 20) as f32 / 20.0))
//!     .with_radius(120);
//!
//! let frame = dust.resolve(5);
//! assert_eq!(frame.offset_x, 0.25);
//! assert_eq!(frame.count, 0);
//! ```

use crate::vector::Vector3;
use crate::Tick;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Visual effect kinds understood by the host renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Effect {
    FireworksSpark,
    Crit,
    MagicCrit,
    PotionSwirl,
    PotionSwirlTransparent,
    /// Spell particles. The offsets are read as an RGB colour.
    Spell,
    InstantSpell,
    WitchMagic,
    Note,
    Portal,
    FlyingGlyph,
    Flame,
    LavaPop,
    Footstep,
    Splash,
    Smoke,
    LargeSmoke,
    Cloud,
    /// Redstone dust. The offsets are read as an RGB colour.
    ColouredDust,
    SnowballBreak,
    WaterDrip,
    LavaDrip,
    Slime,
    Heart,
    HappyVillager,
    AngryVillager,
    Explosion,
    ExplosionLarge,
    ExplosionHuge,
    VoidFog,
}

impl Effect {
    /// Whether the host interprets the three offset channels as a colour.
    pub fn supports_color(self) -> bool {
        matches!(self, Effect::ColouredDust | Effect::Spell)
    }
}

/// A value that is either fixed or computed from the current tick.
#[derive(Clone)]
pub enum Channel<T> {
    /// Same value on every tick.
    Constant(T),
    /// Value recomputed on every tick.
    Varying(Arc<dyn Fn(Tick) -> T + Send + Sync>),
}

impl<T: Copy> Channel<T> {
    /// Build a tick-dependent channel.
    pub fn varying<F>(f: F) -> Self
    where
        F: Fn(Tick) -> T + Send + Sync + 'static,
    {
        Channel::Varying(Arc::new(f))
    }

    /// Value of the channel at `tick`.
    #[inline]
    pub fn at(&self, tick: Tick) -> T {
        match self {
            Channel::Constant(v) => *v,
            Channel::Varying(f) => f(tick),
        }
    }

    pub fn is_constant(&self) -> bool {
        matches!(self, Channel::Constant(_))
    }
}

impl<T> From<T> for Channel<T> {
    fn from(v: T) -> Self {
        Channel::Constant(v)
    }
}

impl<T: Default> Default for Channel<T> {
    fn default() -> Self {
        Channel::Constant(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for Channel<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Channel::Constant(v) => f.debug_tuple("Constant").field(v).finish(),
            Channel::Varying(_) => f.write_str("Varying(<fn>)"),
        }
    }
}

/// Immutable description of a particle effect.
///
/// Every `with_*` method returns a modified copy; the original is untouched.
#[derive(Clone, Debug)]
pub struct Particle {
    /// Host effect to draw.
    pub effect: Effect,
    /// Effect-specific sub-parameter (e.g. a block or item id).
    pub id: i32,
    /// Effect-specific sub-parameter (e.g. block data).
    pub data: i32,
    pub offset_x: Channel<f32>,
    pub offset_y: Channel<f32>,
    pub offset_z: Channel<f32>,
    pub speed: Channel<f32>,
    pub count: Channel<u32>,
    /// Distance from which viewers can see the particle.
    pub radius: u32,
}

impl Particle {
    /// A particle with zero offsets and speed, a count of one and radius zero.
    pub fn new(effect: Effect) -> Self {
        Self {
            effect,
            id: 0,
            data: 0,
            offset_x: Channel::Constant(0.0),
            offset_y: Channel::Constant(0.0),
            offset_z: Channel::Constant(0.0),
            speed: Channel::Constant(0.0),
            count: Channel::Constant(1),
            radius: 0,
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effect = effect;
        self
    }

    pub fn with_id(mut self, id: i32) -> Self {
        self.id = id;
        self
    }

    pub fn with_data(mut self, data: i32) -> Self {
        self.data = data;
        self
    }

    pub fn with_radius(mut self, radius: u32) -> Self {
        self.radius = radius;
        self
    }

    pub fn with_offset_x(mut self, offset: impl Into<Channel<f32>>) -> Self {
        self.offset_x = offset.into();
        self
    }

    pub fn with_offset_y(mut self, offset: impl Into<Channel<f32>>) -> Self {
        self.offset_y = offset.into();
        self
    }

    pub fn with_offset_z(mut self, offset: impl Into<Channel<f32>>) -> Self {
        self.offset_z = offset.into();
        self
    }

    /// Set all three offsets at once.
    pub fn with_offset(
        self,
        x: impl Into<Channel<f32>>,
        y: impl Into<Channel<f32>>,
        z: impl Into<Channel<f32>>,
    ) -> Self {
        self.with_offset_x(x).with_offset_y(y).with_offset_z(z)
    }

    pub fn with_speed(mut self, speed: impl Into<Channel<f32>>) -> Self {
        self.speed = speed.into();
        self
    }

    pub fn with_count(mut self, count: impl Into<Channel<u32>>) -> Self {
        self.count = count.into();
        self
    }

    /// Evaluate every channel at `tick`.
    pub fn resolve(&self, tick: Tick) -> ParticleFrame {
        ParticleFrame {
            effect: self.effect,
            id: self.id,
            data: self.data,
            offset_x: self.offset_x.at(tick),
            offset_y: self.offset_y.at(tick),
            offset_z: self.offset_z.at(tick),
            speed: self.speed.at(tick),
            count: self.count.at(tick),
            radius: self.radius,
        }
    }
}

/// A [`Particle`] with every channel evaluated; what a render sink receives.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleFrame {
    pub effect: Effect,
    pub id: i32,
    pub data: i32,
    pub offset_x: f32,
    pub offset_y: f32,
    pub offset_z: f32,
    pub speed: f32,
    pub count: u32,
    pub radius: u32,
}

impl ParticleFrame {
    /// The three offsets as a vector.
    pub fn offset(&self) -> Vector3 {
        Vector3::new(self.offset_x, self.offset_y, self.offset_z)
    }
}

/// A particle placed at a position relative to the generator's origin.
#[derive(Clone, Debug)]
pub struct SuppliedParticle {
    pub particle: Particle,
    pub position: Vector3,
}

impl SuppliedParticle {
    pub fn new(particle: Particle, position: Vector3) -> Self {
        Self { particle, position }
    }

    /// Same position, different particle.
    pub fn with_particle(self, particle: Particle) -> Self {
        Self { particle, ..self }
    }

    /// Same particle, different position.
    pub fn with_position(self, position: Vector3) -> Self {
        Self { position, ..self }
    }
}
