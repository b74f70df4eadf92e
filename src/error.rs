//! Error types for trailgen.
//!
//! The geometry core is total; the only fallible operations are preset and
//! bitmap construction ([`ConfigError`]) and driving a trail, where the host's
//! emitter or render sink may fail ([`TrailError`]).

use crate::particle::Effect;
use thiserror::Error;

/// Failure reported by host-side code (emitters, render sinks).
pub type HostError = Box<dyn std::error::Error + Send + Sync>;

/// Errors raised while building a generator or parsing a preset.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Bitmaps need an effect whose offsets are read as a colour.
    #[error("effect {0:?} cannot carry RGB colours")]
    ColorUnsupported(Effect),
    /// Failed to load or decode a bitmap image.
    #[error("failed to load image: {0}")]
    Image(#[from] image::ImageError),
    /// Failed to read or write a preset file.
    #[error("preset file error: {0}")]
    Io(#[from] std::io::Error),
    /// Malformed trail preset.
    #[error("invalid trail preset: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors that abort a trail tick.
#[derive(Debug, Error)]
pub enum TrailError {
    /// The emitter could not report its position or direction.
    #[error("emitter query failed: {0}")]
    Emitter(#[source] HostError),
    /// The render sink refused a particle.
    #[error("render sink failed: {0}")]
    Render(#[source] HostError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let e = ConfigError::ColorUnsupported(Effect::Flame);
        assert_eq!(e.to_string(), "effect Flame cannot carry RGB colours");

        let e = TrailError::Render("client gone".into());
        assert_eq!(e.to_string(), "render sink failed: client gone");
        assert!(std::error::Error::source(&e).is_some());
    }

    #[test]
    fn test_parse_conversion() {
        let json_err = serde_json::from_str::<u32>("nope").unwrap_err();
        let e: ConfigError = json_err.into();
        assert!(matches!(e, ConfigError::Parse(_)));
    }
}
