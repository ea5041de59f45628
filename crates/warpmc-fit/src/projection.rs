use crate::affine::find_affine;
use crate::error::FitError;
use crate::homography::find_homography;
use crate::rotzoom::find_rotzoom;
use crate::translation::find_translation;
use warpmc_motion::{MotionModel, ShearParams, TransformationType};

/// Fit a model of type `ty` to point correspondences and integerize it.
///
/// Rotation-zoom and affine models must also be usable by the separable block
/// warp filter.
///
/// # Arguments
///
/// * `ty` - The model type to fit.
/// * `src` - The source points.
/// * `dst` - The destination points, one per source point.
///
/// # Errors
///
/// Returns the fitting error of the model type, [`FitError::Model`] if a
/// parameter cannot be represented in fixed point and
/// [`FitError::IncompatibleFastPath`] if a rotation-zoom or affine model fails
/// the shear range check.
///
/// # Example
///
/// ```
/// use warpmc_fit::find_projection;
/// use warpmc_motion::{MotionModel, TransformationType};
///
/// let src = [[0, 0], [16, 0], [0, 16], [16, 16]];
/// let dst = [[2, 1], [18, 1], [2, 17], [18, 17]];
/// let model = find_projection(TransformationType::Affine, &src, &dst).unwrap();
/// assert_eq!(
///     model,
///     MotionModel::Affine { translation: [2 << 16, 1 << 16], linear: [65536, 0, 0, 65536] }
/// );
/// ```
pub fn find_projection(
    ty: TransformationType,
    src: &[[i32; 2]],
    dst: &[[i32; 2]],
) -> Result<MotionModel, FitError> {
    let params = match ty {
        TransformationType::Translation => find_translation(src, dst)?,
        TransformationType::RotZoom => find_rotzoom(src, dst)?,
        TransformationType::Affine => find_affine(src, dst)?,
        TransformationType::Homography => find_homography(src, dst)?,
    };
    log::trace!("fitted {ty:?} parameters {params:?}");

    let model = MotionModel::from_float_params(ty, &params)?;

    if matches!(ty, TransformationType::RotZoom | TransformationType::Affine) {
        if let Err(err) = ShearParams::from_model(&model) {
            log::debug!("fitted {ty:?} model rejected: {err}");
            return Err(FitError::IncompatibleFastPath(err));
        }
    }

    Ok(model)
}

#[cfg(test)]
mod tests {
    use super::*;
    use warpmc_motion::MotionError;

    #[test]
    fn test_find_projection_rotzoom() -> Result<(), FitError> {
        // a = 17/16, b = 1/16 on multiples of 16
        let src = [[0, 0], [16, 0], [48, 32], [96, 80], [0, 80], [96, 0]];
        let dst = src.map(|[x, y]| [(17 * x + y) / 16 + 5, (-x + 17 * y) / 16 - 3]);
        let model = find_projection(TransformationType::RotZoom, &src, &dst)?;
        assert_eq!(
            model,
            MotionModel::RotZoom {
                translation: [5 << 16, -3 << 16],
                scale_rot: [69632, 4096],
            }
        );
        Ok(())
    }

    #[test]
    fn test_find_projection_translation() -> Result<(), FitError> {
        let src = [[3, 4], [10, -2]];
        let dst = [[1, 4], [8, -2]];
        let model = find_projection(TransformationType::Translation, &src, &dst)?;
        assert_eq!(model, MotionModel::from_translation(-2 << 16, 0));
        Ok(())
    }

    #[test]
    fn test_find_projection_large_shear() {
        let src = [[0, 0], [40, 8], [-16, 32], [100, -60]];
        let dst = src.map(|[x, y]| [x + y / 2, x / 4 + y]);
        let res = find_projection(TransformationType::Affine, &src, &dst);
        assert!(matches!(
            res,
            Err(FitError::IncompatibleFastPath(MotionError::ShearOutOfRange { .. }))
        ));
    }

    #[test]
    fn test_find_projection_homography_skips_shear_check() -> Result<(), FitError> {
        let src = [[0, 0], [40, 8], [-16, 32], [100, -60], [12, 12]];
        let dst = src.map(|[x, y]| [x + y / 2, x / 4 + y]);
        let model = find_projection(TransformationType::Homography, &src, &dst)?;
        assert_eq!(model.ty(), TransformationType::Homography);
        assert_eq!(model.linear(), [65536, 32768, 16384, 65536]);
        assert_eq!(model.perspective(), [0, 0]);
        Ok(())
    }
}
