use crate::error::MotionError;
use crate::fixed::{MODEL_ONE, MODEL_PREC_BITS};
use crate::model::{MotionModel, TransformationType};

/// Factorization of a 2x2 linear part into two shears.
///
/// ```text
/// / m2 m3 \   /   1        0     \   / 1 + alpha  beta \
/// \ m4 m5 / = \ gamma  1 + delta / * \     0       1   /
/// ```
///
/// The horizontal pass of the separable filter applies `alpha` and `beta`, the
/// vertical pass `gamma` and `delta`. All four are in model precision.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShearParams {
    /// Horizontal zoom offset, `m2 - 1`.
    pub alpha: i32,
    /// Horizontal shear, `m3`.
    pub beta: i32,
    /// Vertical shear.
    pub gamma: i32,
    /// Vertical zoom offset.
    pub delta: i32,
}

impl ShearParams {
    /// Derive the shear parameters of a rotation-zoom or affine model.
    ///
    /// # Errors
    ///
    /// * [`MotionError::UnsupportedModel`] for translations and homographies.
    /// * [`MotionError::ZeroScale`] if `m2 == 0`.
    /// * [`MotionError::ShearOutOfRange`] if `4|alpha| + 7|beta|` or
    ///   `4|gamma| + 4|delta|` exceeds one, i.e. the per-pixel filter offsets of an
    ///   8x8 block would leave the `[-1, 2)` pixel reach of the 8-tap filter.
    ///
    /// # Example
    ///
    /// ```
    /// use warpmc_motion::{MotionModel, ShearParams};
    ///
    /// let model = MotionModel::RotZoom { translation: [0, 0], scale_rot: [65536, 1024] };
    /// let shear = ShearParams::from_model(&model).unwrap();
    /// assert_eq!((shear.alpha, shear.beta, shear.gamma), (0, 1024, -1024));
    /// ```
    pub fn from_model(model: &MotionModel) -> Result<Self, MotionError> {
        match model.ty() {
            TransformationType::RotZoom | TransformationType::Affine => {}
            ty => return Err(MotionError::UnsupportedModel(ty)),
        }

        let [m2, m3, m4, m5] = model.linear().map(i64::from);
        if m2 == 0 {
            return Err(MotionError::ZeroScale);
        }

        let one = MODEL_ONE as i64;
        let alpha = m2 - one;
        let beta = m3;
        let gamma = (m4 << MODEL_PREC_BITS) / m2;
        let delta = m5 - (m3 * m4 + m2 / 2) / m2 - one;

        if 4 * alpha.abs() + 7 * beta.abs() > one || 4 * gamma.abs() + 4 * delta.abs() > one {
            log::trace!(
                "shear out of range: alpha={alpha} beta={beta} gamma={gamma} delta={delta}"
            );
            return Err(MotionError::ShearOutOfRange {
                alpha,
                beta,
                gamma,
                delta,
            });
        }

        // the bounds above keep every term well inside i32
        Ok(Self {
            alpha: alpha as i32,
            beta: beta as i32,
            gamma: gamma as i32,
            delta: delta as i32,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_affine_has_zero_shear() -> Result<(), MotionError> {
        let model = MotionModel::Affine {
            translation: [123, -456],
            linear: [MODEL_ONE, 0, 0, MODEL_ONE],
        };
        let shear = ShearParams::from_model(&model)?;
        assert_eq!(
            shear,
            ShearParams {
                alpha: 0,
                beta: 0,
                gamma: 0,
                delta: 0
            }
        );
        Ok(())
    }

    #[test]
    fn test_rotzoom_shear() -> Result<(), MotionError> {
        // small rotation with a slight zoom
        let model = MotionModel::RotZoom {
            translation: [0, 0],
            scale_rot: [66000, 1500],
        };
        let shear = ShearParams::from_model(&model)?;
        assert_eq!(shear.alpha, 66000 - 65536);
        assert_eq!(shear.beta, 1500);
        // gamma = (-1500 << 16) / 66000, truncated towards zero
        assert_eq!(shear.gamma, -1489);
        // delta = 66000 - (1500 * -1500 + 33000) / 66000 - 65536
        assert_eq!(shear.delta, 66000 + 33 - 65536);
        Ok(())
    }

    #[test]
    fn test_unsupported_models() {
        let translation = MotionModel::from_translation(1, 2);
        assert_eq!(
            ShearParams::from_model(&translation),
            Err(MotionError::UnsupportedModel(TransformationType::Translation))
        );

        let homography = MotionModel::Homography {
            translation: [0, 0],
            linear: [MODEL_ONE, 0, 0, MODEL_ONE],
            perspective: [0, 0],
        };
        assert_eq!(
            ShearParams::from_model(&homography),
            Err(MotionError::UnsupportedModel(TransformationType::Homography))
        );
    }

    #[test]
    fn test_zero_scale() {
        let model = MotionModel::Affine {
            translation: [0, 0],
            linear: [0, MODEL_ONE, -MODEL_ONE, 0],
        };
        assert_eq!(ShearParams::from_model(&model), Err(MotionError::ZeroScale));
    }

    #[test]
    fn test_shear_bounds() {
        // 4 * |alpha| exactly one is still accepted
        let model = MotionModel::Affine {
            translation: [0, 0],
            linear: [MODEL_ONE + MODEL_ONE / 4, 0, 0, MODEL_ONE],
        };
        assert!(ShearParams::from_model(&model).is_ok());

        let model = MotionModel::Affine {
            translation: [0, 0],
            linear: [MODEL_ONE + MODEL_ONE / 4 + 1, 0, 0, MODEL_ONE],
        };
        assert!(matches!(
            ShearParams::from_model(&model),
            Err(MotionError::ShearOutOfRange { .. })
        ));

        // a strong vertical shear fails the second bound
        let model = MotionModel::Affine {
            translation: [0, 0],
            linear: [MODEL_ONE, 0, MODEL_ONE / 2, MODEL_ONE],
        };
        assert!(matches!(
            ShearParams::from_model(&model),
            Err(MotionError::ShearOutOfRange { gamma: 32768, .. })
        ));
    }
}
