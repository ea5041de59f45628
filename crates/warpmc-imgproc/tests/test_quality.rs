use warpmc_image::{ImageError, ImageSize, Plane};
use warpmc_imgproc::{
    metrics::warp_error_advantage,
    warp::{warp_plane, WarpConfig},
};
use warpmc_motion::{MotionModel, MODEL_ONE};

fn texture(size: ImageSize) -> Result<Plane<u16>, ImageError> {
    Plane::from_fn(size, |x, y| {
        let v = 512.0 + 300.0 * (x as f64 / 4.0).sin() * (y as f64 / 6.0).cos();
        v.round() as u16
    })
}

#[test]
fn test_better_models_score_lower() -> Result<(), Box<dyn std::error::Error>> {
    let reference = texture([80, 80].into())?;
    let config = WarpConfig::with_bit_depth(10);
    let position = (24, 24);

    let truth = MotionModel::Affine {
        translation: [3 * MODEL_ONE, -2 * MODEL_ONE + MODEL_ONE / 3],
        linear: [MODEL_ONE + 600, -700, 650, MODEL_ONE + 400],
    };
    let mut observed = Plane::<u16>::from_size_val([32, 32].into(), 0)?;
    warp_plane(&truth, &reference.view(), &mut observed.view_mut(), position, &config)?;

    let score = |model: &MotionModel| {
        warp_error_advantage(model, &reference.view(), &observed.view(), position, &config)
    };

    let exact = score(&truth)?;
    assert_eq!(exact, 0.0);

    // the displacement of the block center without the linear part
    let approximate = score(&MotionModel::from_translation(192676, -67502))?;
    assert!(approximate > 0.0 && approximate < 1.0, "ratio {approximate}");

    let none = score(&MotionModel::identity())?;
    assert_eq!(none, 1.0);
    Ok(())
}
