use rand::{rngs::StdRng, Rng, SeedableRng};
use rayon::prelude::*;

use warpmc_image::{ImageError, ImageSize, Plane, PlaneMut};
use warpmc_imgproc::warp::{warp_affine, warp_plane, warp_plane_exact, WarpConfig};
use warpmc_motion::{MotionModel, ShearParams, MODEL_ONE};

fn rotation(angle: f64, tx: f64, ty: f64) -> MotionModel {
    let one = MODEL_ONE as f64;
    MotionModel::RotZoom {
        translation: [(tx * one).round() as i32, (ty * one).round() as i32],
        scale_rot: [
            (angle.cos() * one).round() as i32,
            (-angle.sin() * one).round() as i32,
        ],
    }
}

fn texture(size: ImageSize) -> Result<Plane<u8>, ImageError> {
    Plane::from_fn(size, |x, y| {
        let v = 128.0 + 60.0 * (x as f64 / 5.0).sin() * (y as f64 / 7.0).cos();
        v.round() as u8
    })
}

#[test]
fn test_fast_and_exact_agree_on_a_ramp() -> Result<(), Box<dyn std::error::Error>> {
    let reference = Plane::<u8>::from_fn([64, 64].into(), |x, y| (16 + x + y) as u8)?;
    let model = rotation(0.02, 1.25, 0.0);
    let shear = ShearParams::from_model(&model)?;
    let config = WarpConfig::default();

    let mut fast = Plane::<u8>::from_size_val([32, 32].into(), 0)?;
    let mut exact = Plane::<u8>::from_size_val([32, 32].into(), 0)?;
    warp_affine(&model, &shear, &reference.view(), &mut fast.view_mut(), (16, 16), &config)?;
    warp_plane_exact(&model, &reference.view(), &mut exact.view_mut(), (16, 16), &config)?;

    for (i, (a, b)) in fast.as_slice().iter().zip(exact.as_slice()).enumerate() {
        assert!(
            (*a as i32 - *b as i32).abs() <= 1,
            "sample {i}: fast {a} exact {b}"
        );
    }
    Ok(())
}

#[test]
fn test_fast_and_exact_agree_on_a_ramp_10bit() -> Result<(), Box<dyn std::error::Error>> {
    let reference = Plane::<u16>::from_fn([64, 64].into(), |x, y| (64 + 4 * x + 4 * y) as u16)?;
    let model = MotionModel::Affine {
        translation: [-(MODEL_ONE / 2), MODEL_ONE * 3 / 4],
        linear: [MODEL_ONE + 300, 500, -400, MODEL_ONE - 200],
    };
    let shear = ShearParams::from_model(&model)?;
    let config = WarpConfig::with_bit_depth(10);

    let mut fast = Plane::<u16>::from_size_val([24, 24].into(), 0)?;
    let mut exact = Plane::<u16>::from_size_val([24, 24].into(), 0)?;
    warp_affine(&model, &shear, &reference.view(), &mut fast.view_mut(), (20, 20), &config)?;
    warp_plane_exact(&model, &reference.view(), &mut exact.view_mut(), (20, 20), &config)?;

    for (a, b) in fast.as_slice().iter().zip(exact.as_slice()) {
        assert!((*a as i32 - *b as i32).abs() <= 1, "fast {a} exact {b}");
    }
    Ok(())
}

#[test]
fn test_fast_and_exact_agree_on_random_models() -> Result<(), Box<dyn std::error::Error>> {
    let mut rng = StdRng::seed_from_u64(1234);
    let reference = Plane::<u16>::from_fn([96, 96].into(), |x, y| (100 + 7 * x + 3 * y) as u16)?;
    let config = WarpConfig::with_bit_depth(12);

    for _ in 0..20 {
        let model = MotionModel::Affine {
            translation: [
                rng.random_range(-3 * MODEL_ONE..3 * MODEL_ONE),
                rng.random_range(-3 * MODEL_ONE..3 * MODEL_ONE),
            ],
            linear: [
                MODEL_ONE + rng.random_range(-1500..1500),
                rng.random_range(-1500..1500),
                rng.random_range(-1500..1500),
                MODEL_ONE + rng.random_range(-1500..1500),
            ],
        };
        let shear = ShearParams::from_model(&model)?;

        let mut fast = Plane::<u16>::from_size_val([16, 16].into(), 0)?;
        let mut exact = Plane::<u16>::from_size_val([16, 16].into(), 0)?;
        warp_affine(&model, &shear, &reference.view(), &mut fast.view_mut(), (40, 40), &config)?;
        warp_plane_exact(&model, &reference.view(), &mut exact.view_mut(), (40, 40), &config)?;

        for (a, b) in fast.as_slice().iter().zip(exact.as_slice()) {
            assert!((*a as i32 - *b as i32).abs() <= 1, "{model:?}: fast {a} exact {b}");
        }
    }
    Ok(())
}

#[test]
fn test_integer_translation_on_both_paths() -> Result<(), Box<dyn std::error::Error>> {
    let reference = texture([32, 32].into())?;
    let model = MotionModel::Affine {
        translation: [5 * MODEL_ONE, -3 * MODEL_ONE],
        linear: [MODEL_ONE, 0, 0, MODEL_ONE],
    };
    let shear = ShearParams::from_model(&model)?;
    let config = WarpConfig::default();

    // the block reaches past the right edge of the reference
    let mut fast = Plane::<u8>::from_size_val([16, 16].into(), 0)?;
    let mut exact = Plane::<u8>::from_size_val([16, 16].into(), 0)?;
    warp_affine(&model, &shear, &reference.view(), &mut fast.view_mut(), (24, 2), &config)?;
    warp_plane_exact(&model, &reference.view(), &mut exact.view_mut(), (24, 2), &config)?;

    let view = reference.view();
    for y in 0..16 {
        for x in 0..16 {
            let expected = view.clamped(x as i64 + 24 + 5, y as i64 + 2 - 3) as u8;
            assert_eq!(fast.pixel(x, y), expected, "fast ({x}, {y})");
            assert_eq!(exact.pixel(x, y), expected, "exact ({x}, {y})");
        }
    }
    Ok(())
}

#[test]
fn test_bands_warped_concurrently_match_a_single_call() -> Result<(), Box<dyn std::error::Error>> {
    let reference = texture([96, 96].into())?;
    let model = rotation(-0.03, 2.5, -1.75);
    let config = WarpConfig::default();
    let position = (16, 16);

    let mut single = Plane::<u8>::from_size_val([64, 64].into(), 0)?;
    warp_plane(&model, &reference.view(), &mut single.view_mut(), position, &config)?;

    // four bands of 16 rows, aligned to the 8x8 block grid
    let mut banded = Plane::<u8>::from_size_val([64, 64].into(), 0)?;
    let mut bands: Vec<(usize, PlaneMut<'_, u8>)> = Vec::new();
    let mut rest = banded.view_mut();
    for row in [0, 16, 32] {
        let (top, bottom) = rest.split_at_row(16)?;
        bands.push((row, top));
        rest = bottom;
    }
    bands.push((48, rest));

    let reference = reference.view();
    bands
        .into_par_iter()
        .map(|(row, mut band)| {
            warp_plane(
                &model,
                &reference,
                &mut band,
                (position.0, position.1 + row),
                &config,
            )
        })
        .collect::<Result<Vec<_>, _>>()?;

    assert_eq!(single.as_slice(), banded.as_slice());
    Ok(())
}
