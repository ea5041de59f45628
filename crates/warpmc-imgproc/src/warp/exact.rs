use warpmc_image::{ImageError, Pixel, PlaneMut, PlaneRef};
use warpmc_motion::{round_pow2_signed, MotionModel};

use super::config::{store, WarpConfig};
use crate::interpolation::interpolate_pixel;

/// Warp a reference plane into a predicted block, one pixel at a time.
///
/// Every destination pixel is projected through the model, scaled to the
/// reference resolution and interpolated with the kernel selected by the
/// available filter support. Works for every model type and reference scale.
///
/// # Arguments
///
/// * `model` - The motion model, mapping frame positions into the reference.
/// * `reference` - The reference plane.
/// * `pred` - The predicted block.
/// * `position` - The frame position `(col, row)` of the top left corner of `pred`.
/// * `config` - The warp parameters.
///
/// # Errors
///
/// Returns an error if the bit depth is not supported by `T`, a reference scale
/// is not positive or the block does not fit in 32-bit frame coordinates.
///
/// # Example
///
/// ```
/// use warpmc_image::{ImageSize, Plane};
/// use warpmc_imgproc::warp::{warp_plane_exact, WarpConfig};
/// use warpmc_motion::MotionModel;
///
/// let reference = Plane::<u8>::from_fn(ImageSize { width: 8, height: 8 }, |x, y| (8 * y + x) as u8).unwrap();
/// let mut pred = Plane::<u8>::from_size_val(ImageSize { width: 2, height: 2 }, 0).unwrap();
///
/// // one pixel right, two pixels down
/// let model = MotionModel::from_translation(1 << 16, 2 << 16);
/// warp_plane_exact(&model, &reference.view(), &mut pred.view_mut(), (3, 3), &WarpConfig::default()).unwrap();
///
/// assert_eq!(pred.as_slice(), &[44, 45, 52, 53]);
/// ```
pub fn warp_plane_exact<T: Pixel>(
    model: &MotionModel,
    reference: &PlaneRef<'_, T>,
    pred: &mut PlaneMut<'_, T>,
    position: (usize, usize),
    config: &WarpConfig,
) -> Result<(), ImageError> {
    config.validate(pred, position)?;

    let (p_col, p_row) = position;
    let (scale_x, scale_y) = (config.scale.x as i64, config.scale.y as i64);

    for i in 0..pred.height() {
        for j in 0..pred.width() {
            let point = [(p_col + j) as i32, (p_row + i) as i32];
            let [x, y] = model.project_point(point, config.subsampling);
            let x = round_pow2_signed(x as i64 * scale_x, 4);
            let y = round_pow2_signed(y as i64 * scale_y, 4);

            let v = interpolate_pixel(reference, x, y, config.bit_depth, config.border_rule);
            store(pred, j, i, v, config.compound);
        }
    }

    Ok(())
}
