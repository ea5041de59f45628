use argh::FromArgs;

use warpmc::fit::find_projection;
use warpmc::image::{ImageSize, Plane};
use warpmc::imgproc::{
    metrics::warp_error_advantage,
    warp::{warp_plane, warp_plane_exact, WarpConfig},
};
use warpmc::motion::{project_points, MotionModel, Subsampling, TransformationType};

fn parse_model_type(value: &str) -> Result<TransformationType, String> {
    match value {
        "translation" => Ok(TransformationType::Translation),
        "rotzoom" => Ok(TransformationType::RotZoom),
        "affine" => Ok(TransformationType::Affine),
        "homography" => Ok(TransformationType::Homography),
        _ => Err(format!("unknown model type: {value}")),
    }
}

#[derive(FromArgs)]
/// Fit a motion model to synthetic correspondences and warp a block with it
struct Args {
    /// model type to fit: translation, rotzoom, affine or homography
    #[argh(option, default = "TransformationType::RotZoom", from_str_fn(parse_model_type))]
    model: TransformationType,

    /// rotation of the synthetic motion in degrees
    #[argh(option, default = "1.5")]
    angle: f64,

    /// zoom of the synthetic motion
    #[argh(option, default = "1.01")]
    zoom: f64,

    /// horizontal translation of the synthetic motion in pixels
    #[argh(option, default = "2.25")]
    tx: f64,

    /// vertical translation of the synthetic motion in pixels
    #[argh(option, default = "-1.5")]
    ty: f64,

    /// side of the predicted block in pixels
    #[argh(option, default = "32")]
    block_size: usize,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    // synthetic reference frame
    let frame_size = ImageSize {
        width: 4 * args.block_size,
        height: 4 * args.block_size,
    };
    let reference = Plane::<u8>::from_fn(frame_size, |x, y| {
        let (x, y) = (x as f64, y as f64);
        (128.0 + 50.0 * (x / 6.0).sin() * (y / 9.0).cos() + 20.0 * ((x + y) / 13.0).sin()) as u8
    })?;

    // ground truth motion
    let (s, c) = args.angle.to_radians().sin_cos();
    let truth = MotionModel::from_float_params(
        TransformationType::Affine,
        &[
            args.tx,
            args.ty,
            args.zoom * c,
            -args.zoom * s,
            args.zoom * s,
            args.zoom * c,
            0.0,
            0.0,
        ],
    )?;
    log::info!("ground truth model: {truth:?}");

    // correspondences on a grid covering the frame
    let step = (args.block_size / 2).max(1);
    let src: Vec<[i32; 2]> = (0..8)
        .flat_map(|i| (0..8).map(move |j| [(i * step) as i32, (j * step) as i32]))
        .collect();
    let mut proj = vec![[0; 2]; src.len()];
    project_points(&truth, &src, &mut proj, Subsampling::NONE)?;
    let dst: Vec<[i32; 2]> = proj
        .iter()
        .map(|p| p.map(|v| (v as f64 / 64.0).round() as i32))
        .collect();

    let fitted = find_projection(args.model, &src, &dst)?;
    println!("fitted {:?} parameters: {:?}", args.model, fitted.to_params());

    // the observed block is the reference moved by the ground truth
    let position = (args.block_size, args.block_size);
    let block_size = ImageSize {
        width: args.block_size,
        height: args.block_size,
    };
    let config = WarpConfig::default();
    let mut observed = Plane::<u8>::from_size_val(block_size, 0)?;
    warp_plane_exact(&truth, &reference.view(), &mut observed.view_mut(), position, &config)?;

    // predict the block with the fitted model on both paths
    let mut fast = Plane::<u8>::from_size_val(block_size, 0)?;
    let mut exact = Plane::<u8>::from_size_val(block_size, 0)?;
    warp_plane(&fitted, &reference.view(), &mut fast.view_mut(), position, &config)?;
    warp_plane_exact(&fitted, &reference.view(), &mut exact.view_mut(), position, &config)?;

    let max_diff = fast
        .as_slice()
        .iter()
        .zip(exact.as_slice())
        .map(|(a, b)| (*a as i32 - *b as i32).abs())
        .max()
        .unwrap_or(0);
    println!("max difference between the warp paths: {max_diff}");

    let ratio = warp_error_advantage(
        &fitted,
        &reference.view(),
        &observed.view(),
        position,
        &config,
    )?;
    println!("warp error advantage: {ratio:.4}");

    Ok(())
}
