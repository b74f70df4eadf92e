//! Serializable trail presets.
//!
//! A [`TrailConfig`] describes a complete trail (particle, generator shape
//! and scheduling interval) as plain data, so trails can live in JSON files
//! next to the host's other settings.
//!
//! ```
//! use trailgen::config::TrailConfig;
//! use trailgen::ParticleSupplier;
//!
//! let preset = TrailConfig::from_json(r#"{
//!     "name": "halo",
//!     "particle": { "effect": "coloured_dust", "offset": [1.0, 0.8, 0.001], "count": 0, "speed": 1.0 },
//!     "generator": { "shape": "circumference", "radius": 0.6, "delta": 0.3 },
//!     "interval": 2
//! }"#)?;
//!
//! let halo = preset.build_supplier();
//! assert_eq!(halo.supply(0).count(), 21);
//! # Ok::<(), trailgen::ConfigError>(())
//! ```
//!
//! Bitmaps are not expressible as presets; build them from pixels with
//! [`BitmapSupplier`](crate::suppliers::BitmapSupplier).

use crate::error::ConfigError;
use crate::particle::{Effect, Particle};
use crate::supplier::{BoxedSupplier, ParticleSupplier};
use crate::suppliers::{
    CircumferenceSupplier, HelixSupplier, LinearSupplier, PolySupplier, ScatteringSupplier,
    SinusoidSupplier, SpirographSupplier, StarSupplier, Trochoid,
};
use crate::vector::Vector3;
use crate::Tick;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

fn one() -> Tick {
    1
}

fn one_u32() -> u32 {
    1
}

/// Constant particle parameters.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ParticleConfig {
    pub effect: Effect,
    #[serde(default)]
    pub id: i32,
    #[serde(default)]
    pub data: i32,
    /// Offsets, or the RGB colour for colourable effects.
    #[serde(default)]
    pub offset: [f32; 3],
    #[serde(default)]
    pub speed: f32,
    #[serde(default = "one_u32")]
    pub count: u32,
    #[serde(default)]
    pub radius: u32,
}

impl ParticleConfig {
    pub fn new(effect: Effect) -> Self {
        Self {
            effect,
            id: 0,
            data: 0,
            offset: [0.0; 3],
            speed: 0.0,
            count: 1,
            radius: 0,
        }
    }

    pub fn to_particle(&self) -> Particle {
        let [x, y, z] = self.offset;
        Particle::new(self.effect)
            .with_id(self.id)
            .with_data(self.data)
            .with_offset(x, y, z)
            .with_speed(self.speed)
            .with_count(self.count)
            .with_radius(self.radius)
    }
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self::new(Effect::Flame)
    }
}

/// Generator geometry, tagged by `shape`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum ShapeConfig {
    Circumference {
        radius: f32,
        delta: f32,
        #[serde(default)]
        offset: f32,
        #[serde(default = "one")]
        appearing_interval: Tick,
    },
    Helix {
        radius: f32,
        delta: f32,
        #[serde(default)]
        offset: f32,
    },
    Sinusoid {
        radius: f32,
        delta: f32,
        #[serde(default)]
        offset: f32,
        #[serde(default)]
        rotation: f32,
    },
    Polygon {
        vertex: u32,
        #[serde(default)]
        jumps: u32,
        radius: f32,
        step: f32,
        #[serde(default)]
        angle_offset: f32,
        #[serde(default = "one")]
        appearing_interval: Tick,
    },
    Star {
        vertex: u32,
        step: f32,
        high_radius: f32,
        low_radius: f32,
        #[serde(default)]
        angle_offset: f32,
        #[serde(default = "one")]
        appearing_interval: Tick,
    },
    Scattering {
        /// Candidate particles. Empty means "the preset's particle".
        #[serde(default)]
        particles: Vec<ParticleConfig>,
        spread: [f32; 3],
        #[serde(default)]
        offset: [f32; 3],
        min_particles: u32,
        max_particles: u32,
        #[serde(default = "one")]
        appearing_interval: Tick,
        #[serde(default)]
        seed: Option<u64>,
    },
    Epitrochoid {
        fixed_radius: f32,
        rolling_radius: f32,
        pen_offset: f32,
        delta: f32,
        #[serde(default = "one")]
        appearing_interval: Tick,
    },
    Hypotrochoid {
        fixed_radius: f32,
        rolling_radius: f32,
        pen_offset: f32,
        delta: f32,
        #[serde(default = "one")]
        appearing_interval: Tick,
    },
    Linear {
        #[serde(default)]
        offset: [f32; 3],
    },
}

impl Default for ShapeConfig {
    fn default() -> Self {
        ShapeConfig::Linear { offset: [0.0; 3] }
    }
}

impl ShapeConfig {
    pub fn name(&self) -> &'static str {
        match self {
            ShapeConfig::Circumference { .. } => "Circumference",
            ShapeConfig::Helix { .. } => "Helix",
            ShapeConfig::Sinusoid { .. } => "Sinusoid",
            ShapeConfig::Polygon { .. } => "Polygon",
            ShapeConfig::Star { .. } => "Star",
            ShapeConfig::Scattering { .. } => "Scattering",
            ShapeConfig::Epitrochoid { .. } => "Epitrochoid",
            ShapeConfig::Hypotrochoid { .. } => "Hypotrochoid",
            ShapeConfig::Linear { .. } => "Linear",
        }
    }

    /// Instantiate the generator, drawing with `particle`.
    pub fn build(&self, particle: Particle) -> BoxedSupplier<'static> {
        match self.clone() {
            ShapeConfig::Circumference {
                radius,
                delta,
                offset,
                appearing_interval,
            } => CircumferenceSupplier::new(particle, radius, delta, offset, appearing_interval).boxed(),
            ShapeConfig::Helix { radius, delta, offset } => {
                HelixSupplier::new(particle, radius, delta, offset).boxed()
            }
            ShapeConfig::Sinusoid {
                radius,
                delta,
                offset,
                rotation,
            } => SinusoidSupplier::new(particle, radius, delta, offset, rotation).boxed(),
            ShapeConfig::Polygon {
                vertex,
                jumps,
                radius,
                step,
                angle_offset,
                appearing_interval,
            } => PolySupplier::new(particle, appearing_interval, vertex, jumps, radius, step, angle_offset).boxed(),
            ShapeConfig::Star {
                vertex,
                step,
                high_radius,
                low_radius,
                angle_offset,
                appearing_interval,
            } => StarSupplier::new(
                particle,
                appearing_interval,
                vertex,
                step,
                high_radius,
                low_radius,
                angle_offset,
            )
            .boxed(),
            ShapeConfig::Scattering {
                particles,
                spread,
                offset,
                min_particles,
                max_particles,
                appearing_interval,
                seed,
            } => {
                let candidates = if particles.is_empty() {
                    vec![particle]
                } else {
                    particles.iter().map(ParticleConfig::to_particle).collect()
                };
                let supplier = ScatteringSupplier::new(
                    candidates,
                    Vector3::from(spread),
                    Vector3::from(offset),
                    min_particles,
                    max_particles,
                    appearing_interval,
                );
                match seed {
                    Some(seed) => supplier.with_seed(seed).boxed(),
                    None => supplier.boxed(),
                }
            }
            ShapeConfig::Epitrochoid {
                fixed_radius,
                rolling_radius,
                pen_offset,
                delta,
                appearing_interval,
            } => SpirographSupplier::epitrochoid(
                particle,
                Trochoid::new(fixed_radius, rolling_radius, pen_offset),
                delta,
                appearing_interval,
            )
            .boxed(),
            ShapeConfig::Hypotrochoid {
                fixed_radius,
                rolling_radius,
                pen_offset,
                delta,
                appearing_interval,
            } => SpirographSupplier::hypotrochoid(
                particle,
                Trochoid::new(fixed_radius, rolling_radius, pen_offset),
                delta,
                appearing_interval,
            )
            .boxed(),
            ShapeConfig::Linear { offset } => LinearSupplier::with_offset(particle, Vector3::from(offset)).boxed(),
        }
    }
}

/// A complete trail preset.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct TrailConfig {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub particle: ParticleConfig,
    #[serde(default)]
    pub generator: ShapeConfig,
    /// Ticks between two renders of the trail.
    #[serde(default = "one")]
    pub interval: Tick,
}

impl Default for TrailConfig {
    fn default() -> Self {
        Self {
            name: "Untitled".into(),
            particle: ParticleConfig::default(),
            generator: ShapeConfig::default(),
            interval: 1,
        }
    }
}

impl TrailConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load a preset from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Save the preset as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Instantiate the preset's generator.
    pub fn build_supplier(&self) -> BoxedSupplier<'static> {
        log::debug!("building {} trail '{}'", self.generator.name(), self.name);
        self.generator.build(self.particle.to_particle())
    }
}
