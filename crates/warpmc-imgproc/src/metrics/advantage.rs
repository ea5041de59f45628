use warpmc_image::{ImageError, Pixel, Plane, PlaneRef};
use warpmc_motion::MotionModel;

use super::error_measure::error_measure;
use crate::warp::{warp_plane, WarpConfig};

/// Ratio of the warped prediction error to the error of the co-located reference.
///
/// The block is warped into scratch storage and both predictions are scored with
/// [`error_measure`] against `dst`. A ratio below one means the model predicts the
/// block better than no motion at all.
///
/// # Arguments
///
/// * `model` - The motion model to score.
/// * `reference` - The reference plane.
/// * `dst` - The observed block.
/// * `position` - The frame position `(col, row)` of the top left corner of `dst`.
/// * `config` - The warp parameters. Compound prediction is ignored.
///
/// # Returns
///
/// The ratio of the summed errors. When the co-located error is zero the ratio is
/// `1.0` if the warped error is zero as well and [`f64::INFINITY`] otherwise.
///
/// # Errors
///
/// Returns an error if the co-located block does not fit in the reference plane or
/// the warp rejects its parameters.
pub fn warp_error_advantage<T: Pixel>(
    model: &MotionModel,
    reference: &PlaneRef<'_, T>,
    dst: &PlaneRef<'_, T>,
    position: (usize, usize),
    config: &WarpConfig,
) -> Result<f64, ImageError> {
    let colocated = reference.region(position.0, position.1, dst.size())?;

    let mut warped = Plane::<T>::from_size_val(dst.size(), T::default())?;
    let config = WarpConfig {
        compound: false,
        ..*config
    };
    warp_plane(model, reference, &mut warped.view_mut(), position, &config)?;
    let warped = warped.view();

    let mut gm_sum = 0i64;
    let mut no_gm_sum = 0i64;
    for y in 0..dst.height() {
        let (d, w, c) = (dst.row(y), warped.row(y), colocated.row(y));
        for ((&d, &w), &c) in d.iter().zip(w).zip(c) {
            gm_sum += error_measure(d.to_i32() - w.to_i32(), config.bit_depth) as i64;
            no_gm_sum += error_measure(d.to_i32() - c.to_i32(), config.bit_depth) as i64;
        }
    }

    log::trace!("warp error {gm_sum}, co-located error {no_gm_sum}");

    Ok(match (gm_sum, no_gm_sum) {
        (0, 0) => 1.0,
        (_, 0) => f64::INFINITY,
        (gm, no_gm) => gm as f64 / no_gm as f64,
    })
}
