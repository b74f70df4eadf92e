//! Generator behaviour through the public API.

use std::f32::consts::{FRAC_PI_2, PI};
use trailgen::prelude::*;
use trailgen::suppliers::{epitrochoid, Trochoid};
use trailgen::FnPixels;

fn positions<S: ParticleSupplier>(s: &S, tick: Tick) -> Vec<Vector3> {
    s.supply(tick).map(|p| p.position).collect()
}

#[test]
fn test_circumference_quarter_turns() {
    let ring = CircumferenceSupplier::new(Particle::new(Effect::Flame), 1.0, FRAC_PI_2, 0.0, 1);
    let points = positions(&ring, 0);
    assert_eq!(points.len(), 4);
    for (i, p) in points.iter().enumerate() {
        let a = i as f32 * FRAC_PI_2;
        assert!(p.distance(Vector3::new(a.cos(), 0.0, a.sin())) < 1e-6);
    }
}

#[test]
fn test_gated_generators_share_interval_semantics() {
    let flame = Particle::new(Effect::Flame);
    let gated: Vec<Box<dyn ParticleSupplier>> = vec![
        CircumferenceSupplier::new(flame.clone(), 1.0, 0.5, 0.0, 4).boxed(),
        PolySupplier::new(flame.clone(), 4, 6, 0, 1.0, 0.1, 0.0).boxed(),
        StarSupplier::new(flame.clone(), 4, 5, 0.1, 1.0, 0.4, 0.0).boxed(),
        SpirographSupplier::epitrochoid(flame, Trochoid::new(3.0, 1.0, 1.0), 0.1, 4).boxed(),
    ];
    for s in &gated {
        let full = s.supply(0).count();
        assert!(full > 0);
        for tick in 1..12 {
            let expected = if tick % 4 == 0 { full } else { 0 };
            assert_eq!(s.supply(tick).count(), expected);
        }
    }
}

#[test]
fn test_bitmap_two_by_two() {
    let pixels = [0xFF_C0_40_00u32, 0xFF_00_00_00, 0xFF_FF_FF_FF, 0xFF_10_20_30];
    let source = FnPixels::new(2, 2, |x, y| pixels[(y * 2 + x) as usize]);
    let bmp = BitmapSupplier::new(Effect::ColouredDust, 1, 16, &source, 1.0, 1.0, 2.0, 2.0).unwrap();

    let frames: Vec<ParticleFrame> = bmp.supply(0).map(|p| p.particle.resolve(0)).collect();
    assert_eq!(frames.len(), 4);
    for (frame, argb) in frames.iter().zip(pixels) {
        let channel = |shift: u32| (((argb >> shift) & 0xFF) as f32 / 256.0).max(0.001);
        assert_eq!(frame.offset(), Vector3::new(channel(16), channel(8), channel(0)));
    }

    let hidden = FnPixels::new(2, 2, |_, _| 0x40_FF_FF_FF);
    let bmp = BitmapSupplier::new(Effect::Spell, 1, 16, &hidden, 1.0, 1.0, 2.0, 2.0).unwrap();
    assert_eq!(bmp.supply(0).count(), 0);
}

#[test]
fn test_bitmap_requires_colour_effect() {
    let source = FnPixels::new(1, 1, |_, _| 0xFFFF_FFFF);
    let err = BitmapSupplier::new(Effect::Smoke, 1, 16, &source, 1.0, 1.0, 1.0, 1.0).unwrap_err();
    assert!(matches!(err, ConfigError::ColorUnsupported(Effect::Smoke)));
}

#[test]
fn test_combine_order() {
    let a = LinearSupplier::with_offset(Particle::new(Effect::Note), Vector3::AXIS_X);
    let b = LinearSupplier::with_offset(Particle::new(Effect::Note), Vector3::AXIS_Y);
    let c = LinearSupplier::with_offset(Particle::new(Effect::Note), Vector3::AXIS_Z);
    let all = a.combine([b, c]);
    assert_eq!(positions(&all, 0), vec![Vector3::AXIS_X, Vector3::AXIS_Y, Vector3::AXIS_Z]);
}

#[test]
fn test_helix_and_sinusoid_cycle() {
    let helix = HelixSupplier::new(Particle::new(Effect::Portal), 1.0, FRAC_PI_2, 0.0);
    let wave = SinusoidSupplier::new(Particle::new(Effect::Note), 1.0, FRAC_PI_2, 0.0, 0.0);
    for tick in 0..8 {
        assert_eq!(positions(&helix, tick), positions(&helix, tick + 4));
        assert_eq!(positions(&wave, tick), positions(&wave, tick + 4));
    }
}

#[test]
fn test_spirograph_uses_given_curve() {
    let t = Trochoid::new(3.0, 1.0, 0.5);
    let s = SpirographSupplier::new(Particle::new(Effect::WitchMagic), t, PI / 8.0, 1, epitrochoid);
    for (i, p) in s.supply(0).enumerate() {
        let theta = PI / 8.0 * i as f32;
        assert_eq!(p.position, epitrochoid(3.0, 1.0, 0.5, theta));
    }
}

#[test]
fn test_combinators_on_concrete_suppliers() {
    let ring = CircumferenceSupplier::new(Particle::new(Effect::Flame), 1.0, FRAC_PI_2, 0.0, 1);
    let spun = ring
        .by_ref()
        .rotate_y(|tick| tick as f32 * FRAC_PI_2)
        .translate(|_| Vector3::new(0.0, 5.0, 0.0));

    // A quarter turn maps the ring's point set onto itself.
    let base = positions(&ring, 1);
    for p in positions(&spun, 1) {
        let local = p - Vector3::new(0.0, 5.0, 0.0);
        assert!(base.iter().any(|b| b.distance(local) < 1e-5));
    }
}

#[test]
fn test_scattering_cloud_is_reproducible_and_centred() {
    let make = || {
        ScatteringSupplier::new(
            vec![Particle::new(Effect::Cloud), Particle::new(Effect::Smoke)],
            Vector3::new(1.0, 1.0, 1.0),
            Vector3::new(0.0, 10.0, 0.0),
            200,
            400,
            1,
        )
        .with_seed(99)
    };
    let a = positions(&make(), 0);
    assert_eq!(a, positions(&make(), 0));

    let mean = a.iter().fold(Vector3::ORIGIN, |acc, p| acc + *p) / a.len() as f32;
    assert!(mean.distance(Vector3::new(0.0, 10.0, 0.0)) < 0.2);
}
