//! # Skin Example
//!
//! Draws a player's face as a grid of coloured dust floating above their head,
//! turned towards where they look.
//!
//! The face is read from a 64x64 skin PNG: the helmet overlay where it is
//! painted, the bare head elsewhere. Without a path argument a generated skin
//! is used.
//!
//! Run with: `cargo run --example skin -- path/to/skin.png`

use image::{Rgba, RgbaImage};
use std::f32::consts::TAU;
use trailgen::prelude::*;
use trailgen::suppliers::PixelSource;
use trailgen::ConfigError;

/// The 8x8 face of a skin, helmet layer first.
struct Face<'a> {
    skin: &'a RgbaImage,
}

impl PixelSource for Face<'_> {
    fn width(&self) -> u32 {
        8
    }

    fn height(&self) -> u32 {
        8
    }

    fn argb(&self, x: u32, y: u32) -> u32 {
        let helmet = self.skin.argb(40 + x, 8 + y);
        if helmet >> 24 > 0 {
            helmet
        } else {
            self.skin.argb(8 + x, 8 + y)
        }
    }
}

/// A blocky face with a half painted helmet.
fn generated_skin() -> RgbaImage {
    let mut skin = RgbaImage::new(64, 64);
    for y in 8..16 {
        for x in 8..16 {
            let eyes = y == 12 && (x == 9 || x == 14);
            let pixel = if eyes { Rgba([40, 40, 160, 255]) } else { Rgba([200, 150, 110, 255]) };
            skin.put_pixel(x, y, pixel);
        }
        for x in 40..48 {
            if y < 10 {
                skin.put_pixel(x, y, Rgba([90, 60, 20, 255]));
            }
        }
    }
    skin
}

fn face_supplier(skin: &RgbaImage) -> Result<BitmapSupplier, ConfigError> {
    BitmapSupplier::new(Effect::ColouredDust, 1, 60, &Face { skin }, 2.0, 2.0, 8.0, 8.0)
}

fn main() -> Result<(), ConfigError> {
    env_logger::init();

    let skin = match std::env::args().nth(1) {
        Some(path) => image::open(&path)?.into_rgba8(),
        None => {
            log::info!("no skin given, using a generated one");
            generated_skin()
        }
    };
    let skin = if skin.dimensions() == (64, 64) {
        skin
    } else {
        log::warn!("expected a 64x64 skin, got {:?}; using a generated one", skin.dimensions());
        generated_skin()
    };
    let face = face_supplier(&skin)?;
    println!("Face made of {} particles", face.particles().len());

    // The viewer turns on the spot; render every fifth tick like a host task.
    let player = Vector3::new(12.0, 64.0, -3.0);
    for tick in (0..40).step_by(5) {
        let yaw = tick as f32 / 40.0 * TAU;
        let look = Vector3::AXIS_Z.rotate_y(yaw).strip_y();
        let above = player + Vector3::new(0.0, 3.0, 0.0);

        let placement = Transform::translate_xyz(0.1, 0.0, 0.0)
            .and_then(Transform::rotate_render_plane(look))
            .and_then(Transform::translate(above));

        let frame: Vec<_> = face.by_ref().transform_vectors(|v| placement.apply(v)).supply(1).collect();
        let centre = frame.iter().fold(Vector3::ORIGIN, |acc, p| acc + p.position) / frame.len().max(1) as f32;
        println!("tick {tick:>2}: {} particles around {centre}", frame.len());
    }
    Ok(())
}
