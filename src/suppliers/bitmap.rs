use super::gated;
use crate::error::ConfigError;
use crate::particle::{Effect, Particle, SuppliedParticle};
use crate::supplier::{ParticleSupplier, Particles};
use crate::vector::Vector3;
use crate::Tick;
use image::RgbaImage;
use std::path::Path;

/// Minimum value of a colour channel. A zero offset makes the host fall back
/// to its default colour.
const MIN_CHANNEL: f32 = 0.001;

/// Pixels with less alpha than this are skipped.
const ALPHA_THRESHOLD: u32 = 127;

/// A readable grid of ARGB8888 pixels (`0xAARRGGBB`).
pub trait PixelSource {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    /// Pixel at column `x`, row `y`. Row 0 is the top of the image.
    fn argb(&self, x: u32, y: u32) -> u32;
}

impl PixelSource for RgbaImage {
    fn width(&self) -> u32 {
        self.dimensions().0
    }

    fn height(&self) -> u32 {
        self.dimensions().1
    }

    fn argb(&self, x: u32, y: u32) -> u32 {
        let [r, g, b, a] = self.get_pixel(x, y).0;
        u32::from_be_bytes([a, r, g, b])
    }
}

/// A [`PixelSource`] backed by a closure.
///
/// ```
/// use trailgen::FnPixels;
/// use trailgen::suppliers::PixelSource;
///
/// let checker = FnPixels::new(8, 8, |x, y| if (x + y) % 2 == 0 { 0xFF00_0000 } else { 0xFFFF_FFFF });
/// assert_eq!(checker.argb(1, 0), 0xFFFF_FFFF);
/// ```
pub struct FnPixels<F> {
    width: u32,
    height: u32,
    f: F,
}

impl<F: Fn(u32, u32) -> u32> FnPixels<F> {
    pub fn new(width: u32, height: u32, f: F) -> Self {
        Self { width, height, f }
    }
}

impl<F: Fn(u32, u32) -> u32> PixelSource for FnPixels<F> {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn argb(&self, x: u32, y: u32) -> u32 {
        (self.f)(x, y)
    }
}

/// An image drawn as a grid of coloured particles.
///
/// The image covers `width` × `height` blocks centred on the origin in the XZ
/// plane, with `horizontal_resolution` × `vertical_resolution` particles per
/// block. The source is sampled nearest-neighbour; image row 0 lands on the
/// most positive Z.
///
/// Each visible pixel becomes a particle of the given colourable effect with
/// its normalised red, green and blue in the three offset channels, count 0
/// and speed 1.
#[derive(Clone, Debug)]
pub struct BitmapSupplier {
    particles: Vec<SuppliedParticle>,
    appearing_interval: Tick,
}

impl BitmapSupplier {
    /// Build the particle grid from `source`.
    ///
    /// Fails with [`ConfigError::ColorUnsupported`] when `effect` does not read
    /// its offsets as a colour.
    #[allow(clippy::too_many_arguments)]
    pub fn new<P: PixelSource + ?Sized>(
        effect: Effect,
        appearing_interval: Tick,
        visibility_radius: u32,
        source: &P,
        width: f32,
        height: f32,
        horizontal_resolution: f32,
        vertical_resolution: f32,
    ) -> Result<Self, ConfigError> {
        if !effect.supports_color() {
            return Err(ConfigError::ColorUnsupported(effect));
        }

        let cols = (width * horizontal_resolution).max(0.0) as u32;
        let rows = (height * vertical_resolution).max(0.0) as u32;
        let x_dist = 1.0 / horizontal_resolution;
        let z_dist = 1.0 / vertical_resolution;
        let x_scale = source.width() as f64 / cols as f64;
        let y_scale = source.height() as f64 / rows as f64;

        let base = Particle::new(effect)
            .with_radius(visibility_radius)
            .with_count(0)
            .with_speed(1.0);

        let mut particles = Vec::new();
        for i in 0..rows {
            let py = (i as f64 * y_scale).floor() as u32;
            for j in 0..cols {
                let px = (j as f64 * x_scale).floor() as u32;
                let argb = source.argb(px, py);
                if (argb >> 24) & 0xFF < ALPHA_THRESHOLD {
                    continue;
                }

                let particle = base.clone().with_offset(
                    channel(argb >> 16),
                    channel(argb >> 8),
                    channel(argb),
                );
                let position = Vector3::new(
                    j as f32 * x_dist - width / 2.0,
                    0.0,
                    height / 2.0 - i as f32 * z_dist,
                );
                particles.push(SuppliedParticle::new(particle, position));
            }
        }
        log::trace!("bitmap: {} of {} pixels visible", particles.len(), cols * rows);

        Ok(Self {
            particles,
            appearing_interval,
        })
    }

    /// Load an image file and build the grid from it.
    #[allow(clippy::too_many_arguments)]
    pub fn from_file<A: AsRef<Path>>(
        effect: Effect,
        appearing_interval: Tick,
        visibility_radius: u32,
        path: A,
        width: f32,
        height: f32,
        horizontal_resolution: f32,
        vertical_resolution: f32,
    ) -> Result<Self, ConfigError> {
        let img = image::open(path.as_ref())?.into_rgba8();
        Self::new(
            effect,
            appearing_interval,
            visibility_radius,
            &img,
            width,
            height,
            horizontal_resolution,
            vertical_resolution,
        )
    }

    pub fn particles(&self) -> &[SuppliedParticle] {
        &self.particles
    }

    pub fn appearing_interval(&self) -> Tick {
        self.appearing_interval
    }
}

impl ParticleSupplier for BitmapSupplier {
    fn supply(&self, tick: Tick) -> Particles<'_> {
        gated(&self.particles, self.appearing_interval, tick)
    }
}

#[inline]
fn channel(bits: u32) -> f32 {
    ((bits & 0xFF) as f32 / 256.0).max(MIN_CHANNEL)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    const PIXELS: [u32; 4] = [0xFF_FF_00_00, 0xFF_00_80_00, 0xFF_00_00_40, 0xFF_00_00_00];

    fn grid() -> FnPixels<impl Fn(u32, u32) -> u32> {
        FnPixels::new(2, 2, |x, y| PIXELS[(y * 2 + x) as usize])
    }

    #[test]
    fn test_two_by_two_colours() {
        let bmp = BitmapSupplier::new(Effect::ColouredDust, 1, 32, &grid(), 1.0, 1.0, 2.0, 2.0).unwrap();
        let frames: Vec<_> = bmp.supply(0).map(|p| p.particle.resolve(0)).collect();
        assert_eq!(frames.len(), 4);

        let rgb: Vec<[f32; 3]> = frames.iter().map(|f| f.offset().to_array()).collect();
        assert_eq!(rgb[0], [255.0 / 256.0, 0.001, 0.001]);
        assert_eq!(rgb[1], [0.001, 0.5, 0.001]);
        assert_eq!(rgb[2], [0.001, 0.001, 0.25]);
        assert_eq!(rgb[3], [0.001, 0.001, 0.001]);

        for f in &frames {
            assert_eq!(f.count, 0);
            assert_eq!(f.speed, 1.0);
            assert_eq!(f.radius, 32);
        }
    }

    #[test]
    fn test_layout_is_centred_top_down() {
        let bmp = BitmapSupplier::new(Effect::Spell, 1, 0, &grid(), 1.0, 1.0, 2.0, 2.0).unwrap();
        let positions: Vec<Vector3> = bmp.particles().iter().map(|p| p.position).collect();
        assert_eq!(
            positions,
            vec![
                Vector3::new(-0.5, 0.0, 0.5),
                Vector3::new(0.0, 0.0, 0.5),
                Vector3::new(-0.5, 0.0, 0.0),
                Vector3::new(0.0, 0.0, 0.0),
            ]
        );
    }

    #[test]
    fn test_transparent_pixels_skipped() {
        let clear = FnPixels::new(2, 2, |_, _| 0x7E_FF_FF_FF);
        let bmp = BitmapSupplier::new(Effect::ColouredDust, 1, 0, &clear, 1.0, 1.0, 2.0, 2.0).unwrap();
        assert_eq!(bmp.supply(0).count(), 0);

        let edge = FnPixels::new(2, 2, |_, _| 0x7F_FF_FF_FF);
        let bmp = BitmapSupplier::new(Effect::ColouredDust, 1, 0, &edge, 1.0, 1.0, 2.0, 2.0).unwrap();
        assert_eq!(bmp.supply(0).count(), 4);
    }

    #[test]
    fn test_nearest_neighbour_upscale() {
        let bmp = BitmapSupplier::new(Effect::ColouredDust, 1, 0, &grid(), 2.0, 2.0, 2.0, 2.0).unwrap();
        assert_eq!(bmp.particles().len(), 16);
        // Top-left 2x2 block comes from the red pixel.
        let red = bmp.particles()[5].particle.resolve(0);
        assert_eq!(red.offset_x, 255.0 / 256.0);
    }

    #[test]
    fn test_rejects_plain_effect() {
        let err = BitmapSupplier::new(Effect::Flame, 1, 0, &grid(), 1.0, 1.0, 2.0, 2.0).unwrap_err();
        assert!(matches!(err, ConfigError::ColorUnsupported(Effect::Flame)));
    }

    #[test]
    fn test_rgba_image_source() {
        let mut img = RgbaImage::new(1, 1);
        img.put_pixel(0, 0, Rgba([0x12, 0x34, 0x56, 0x78]));
        assert_eq!(img.argb(0, 0), 0x7812_3456);
        assert_eq!(PixelSource::width(&img), 1);
    }

    #[test]
    fn test_gating() {
        let bmp = BitmapSupplier::new(Effect::ColouredDust, 3, 0, &grid(), 1.0, 1.0, 2.0, 2.0).unwrap();
        assert_eq!(bmp.supply(3).count(), 4);
        assert_eq!(bmp.supply(4).count(), 0);
    }
}
