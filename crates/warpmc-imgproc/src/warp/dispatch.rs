use warpmc_image::{ImageError, Pixel, PlaneMut, PlaneRef};
use warpmc_motion::{MotionModel, ShearParams, TransformationType};

use super::affine::warp_affine;
use super::config::WarpConfig;
use super::exact::warp_plane_exact;

/// Warp a reference plane into a predicted block.
///
/// Rotation-zoom and affine models whose shear factorization is in range are
/// predicted with the separable block filter [`warp_affine`] when the reference
/// has the resolution of the prediction. Every other case goes through the
/// per-pixel path [`warp_plane_exact`].
///
/// # Arguments
///
/// * `model` - The motion model.
/// * `reference` - The reference plane.
/// * `pred` - The predicted block.
/// * `position` - The frame position `(col, row)` of the top left corner of `pred`.
/// * `config` - The warp parameters.
///
/// # Errors
///
/// Returns an error if the bit depth is not supported by `T`, a reference scale
/// is not positive or the block does not fit in 32-bit frame coordinates.
pub fn warp_plane<T: Pixel>(
    model: &MotionModel,
    reference: &PlaneRef<'_, T>,
    pred: &mut PlaneMut<'_, T>,
    position: (usize, usize),
    config: &WarpConfig,
) -> Result<(), ImageError> {
    if config.scale.is_unit() {
        match ShearParams::from_model(model) {
            Ok(shear) => return warp_affine(model, &shear, reference, pred, position, config),
            Err(err) => {
                if matches!(
                    model.ty(),
                    TransformationType::RotZoom | TransformationType::Affine
                ) {
                    log::debug!("block filter rejected, using per-pixel warp: {err}");
                }
            }
        }
    }

    warp_plane_exact(model, reference, pred, position, config)
}
