use serde::{Deserialize, Serialize};

use crate::error::MotionError;
use crate::fixed::{HOMOGRAPHY_ROW_PREC_BITS, MODEL_ONE, MODEL_PREC_BITS};

/// The family of a parametric motion model.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransformationType {
    /// Pure translation, two parameters.
    Translation,
    /// Similarity (rotation and uniform zoom), four parameters.
    RotZoom,
    /// General affine transform, six parameters.
    Affine,
    /// Projective transform, eight parameters.
    Homography,
}

impl TransformationType {
    /// Minimum number of point correspondences needed to fit the model.
    pub const fn min_correspondences(self) -> usize {
        match self {
            TransformationType::Translation => 2,
            TransformationType::RotZoom => 3,
            TransformationType::Affine => 3,
            TransformationType::Homography => 4,
        }
    }

    /// Number of free parameters of the model.
    pub const fn num_params(self) -> usize {
        match self {
            TransformationType::Translation => 2,
            TransformationType::RotZoom => 4,
            TransformationType::Affine => 6,
            TransformationType::Homography => 8,
        }
    }
}

/// A fixed-point parametric motion model.
///
/// Each variant only carries its own coefficients. The canonical parameter layout
/// is `[tx, ty, m2, m3, m4, m5, h6, h7]` where the first six slots carry
/// [`MODEL_PREC_BITS`] fractional bits and the homogeneous row carries
/// [`HOMOGRAPHY_ROW_PREC_BITS`].
///
/// The model maps a destination position `(x, y)` into the reference frame:
///
/// ```text
/// x' = m2 * x + m3 * y + tx
/// y' = m4 * x + m5 * y + ty
/// ```
///
/// followed by a perspective divide for homographies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MotionModel {
    /// Pure translation.
    Translation {
        /// Offset `[tx, ty]` in model precision.
        translation: [i32; 2],
    },
    /// Rotation and zoom. The second row is derived as `m4 = -m3, m5 = m2`.
    RotZoom {
        /// Offset `[tx, ty]` in model precision.
        translation: [i32; 2],
        /// First row of the linear part `[m2, m3]`.
        scale_rot: [i32; 2],
    },
    /// General affine transform.
    Affine {
        /// Offset `[tx, ty]` in model precision.
        translation: [i32; 2],
        /// Linear part `[m2, m3, m4, m5]` in row-major order.
        linear: [i32; 4],
    },
    /// Projective transform.
    Homography {
        /// Offset `[tx, ty]` in model precision.
        translation: [i32; 2],
        /// Linear part `[m2, m3, m4, m5]` in row-major order.
        linear: [i32; 4],
        /// Homogeneous row `[h6, h7]` in homography row precision.
        perspective: [i32; 2],
    },
}

impl Default for MotionModel {
    fn default() -> Self {
        Self::identity()
    }
}

impl MotionModel {
    /// The identity model, a zero translation.
    pub const fn identity() -> Self {
        MotionModel::Translation {
            translation: [0, 0],
        }
    }

    /// A translation by `(tx, ty)` given in model precision.
    pub const fn from_translation(tx: i32, ty: i32) -> Self {
        MotionModel::Translation {
            translation: [tx, ty],
        }
    }

    /// The family of the model.
    pub const fn ty(&self) -> TransformationType {
        match self {
            MotionModel::Translation { .. } => TransformationType::Translation,
            MotionModel::RotZoom { .. } => TransformationType::RotZoom,
            MotionModel::Affine { .. } => TransformationType::Affine,
            MotionModel::Homography { .. } => TransformationType::Homography,
        }
    }

    /// The translation `[tx, ty]`.
    pub const fn translation(&self) -> [i32; 2] {
        match self {
            MotionModel::Translation { translation }
            | MotionModel::RotZoom { translation, .. }
            | MotionModel::Affine { translation, .. }
            | MotionModel::Homography { translation, .. } => *translation,
        }
    }

    /// The linear part `[m2, m3, m4, m5]`.
    ///
    /// Translations report the identity and rotation-zoom models derive their
    /// second row from the first.
    pub const fn linear(&self) -> [i32; 4] {
        match self {
            MotionModel::Translation { .. } => [MODEL_ONE, 0, 0, MODEL_ONE],
            MotionModel::RotZoom {
                scale_rot: [m2, m3],
                ..
            } => [*m2, *m3, -*m3, *m2],
            MotionModel::Affine { linear, .. } | MotionModel::Homography { linear, .. } => *linear,
        }
    }

    /// The homogeneous row `[h6, h7]`, zero for non projective models.
    pub const fn perspective(&self) -> [i32; 2] {
        match self {
            MotionModel::Homography { perspective, .. } => *perspective,
            _ => [0, 0],
        }
    }

    /// The canonical 8-slot parameter block `[tx, ty, m2, m3, m4, m5, h6, h7]`.
    ///
    /// # Example
    ///
    /// ```
    /// use warpmc_motion::MotionModel;
    ///
    /// let model = MotionModel::RotZoom {
    ///     translation: [1, 2],
    ///     scale_rot: [65536, 100],
    /// };
    /// assert_eq!(model.to_params(), [1, 2, 65536, 100, -100, 65536, 0, 0]);
    /// ```
    pub const fn to_params(&self) -> [i32; 8] {
        let [tx, ty] = self.translation();
        let [m2, m3, m4, m5] = self.linear();
        let [h6, h7] = self.perspective();
        [tx, ty, m2, m3, m4, m5, h6, h7]
    }

    /// Build a model of type `ty` from a canonical parameter block.
    ///
    /// Slots the model does not use are ignored; rotation-zoom models read
    /// `m2, m3` only.
    pub const fn from_params(ty: TransformationType, params: &[i32; 8]) -> Self {
        let translation = [params[0], params[1]];
        let linear = [params[2], params[3], params[4], params[5]];
        match ty {
            TransformationType::Translation => MotionModel::Translation { translation },
            TransformationType::RotZoom => MotionModel::RotZoom {
                translation,
                scale_rot: [params[2], params[3]],
            },
            TransformationType::Affine => MotionModel::Affine {
                translation,
                linear,
            },
            TransformationType::Homography => MotionModel::Homography {
                translation,
                linear,
                perspective: [params[6], params[7]],
            },
        }
    }

    /// Integerize a floating point parameter block into a model of type `ty`.
    ///
    /// Slots `0..6` are scaled by `2^16` and slots `6..8` by `2^12`, then rounded
    /// half to even. Only the slots used by `ty` are read and validated.
    ///
    /// # Errors
    ///
    /// Returns [`MotionError::ParameterOutOfRange`] if a used slot is not finite
    /// or does not fit into an `i32` once scaled.
    ///
    /// # Example
    ///
    /// ```
    /// use warpmc_motion::{MotionModel, TransformationType};
    ///
    /// let params = [2.0, -0.5, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0];
    /// let model = MotionModel::from_float_params(TransformationType::Affine, &params).unwrap();
    /// assert_eq!(model.to_params(), [131072, -32768, 65536, 0, 0, 65536, 0, 0]);
    /// ```
    pub fn from_float_params(ty: TransformationType, params: &[f64; 8]) -> Result<Self, MotionError> {
        let mut out = [0i32; 8];
        let used: &[usize] = match ty {
            TransformationType::Translation => &[0, 1],
            TransformationType::RotZoom => &[0, 1, 2, 3],
            TransformationType::Affine => &[0, 1, 2, 3, 4, 5],
            TransformationType::Homography => &[0, 1, 2, 3, 4, 5, 6, 7],
        };
        for &index in used {
            let bits = if index < 6 {
                MODEL_PREC_BITS
            } else {
                HOMOGRAPHY_ROW_PREC_BITS
            };
            out[index] = integerize(params[index], bits)
                .ok_or(MotionError::ParameterOutOfRange {
                    index,
                    value: params[index],
                })?;
        }
        Ok(Self::from_params(ty, &out))
    }
}

fn integerize(value: f64, bits: u32) -> Option<i32> {
    let scaled = (value * (1u64 << bits) as f64).round_ties_even();
    if scaled.is_finite() && scaled >= i32::MIN as f64 && scaled <= i32::MAX as f64 {
        Some(scaled as i32)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_correspondences() {
        assert_eq!(TransformationType::Translation.min_correspondences(), 2);
        assert_eq!(TransformationType::RotZoom.min_correspondences(), 3);
        assert_eq!(TransformationType::Affine.min_correspondences(), 3);
        assert_eq!(TransformationType::Homography.min_correspondences(), 4);
    }

    #[test]
    fn test_rotzoom_derives_second_row() {
        let model = MotionModel::from_params(
            TransformationType::RotZoom,
            &[10, 20, 70000, -300, 1, 2, 3, 4],
        );
        assert_eq!(model.linear(), [70000, -300, 300, 70000]);
        assert_eq!(model.perspective(), [0, 0]);
        assert_eq!(model.ty(), TransformationType::RotZoom);
    }

    #[test]
    fn test_translation_identity_linear() {
        let model = MotionModel::from_translation(5, -7);
        assert_eq!(model.to_params(), [5, -7, 65536, 0, 0, 65536, 0, 0]);
        assert_eq!(MotionModel::default(), MotionModel::identity());
    }

    #[test]
    fn test_from_float_params_rounds_half_even() -> Result<(), MotionError> {
        // 0.5 / 2^16 and 1.5 / 2^16 land exactly on ties
        let half = 0.5 / 65536.0;
        let params = [half, 3.0 * half, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0];
        let model = MotionModel::from_float_params(TransformationType::Translation, &params)?;
        assert_eq!(model.translation(), [0, 2]);
        Ok(())
    }

    #[test]
    fn test_from_float_params_homography_row_precision() -> Result<(), MotionError> {
        let params = [0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.25, -0.5];
        let model = MotionModel::from_float_params(TransformationType::Homography, &params)?;
        assert_eq!(model.perspective(), [1024, -2048]);
        Ok(())
    }

    #[test]
    fn test_from_float_params_out_of_range() {
        let mut params = [0.0; 8];
        params[3] = 1e6;
        let res = MotionModel::from_float_params(TransformationType::Affine, &params);
        assert!(matches!(
            res,
            Err(MotionError::ParameterOutOfRange { index: 3, .. })
        ));

        params[3] = 0.0;
        params[1] = f64::NAN;
        let res = MotionModel::from_float_params(TransformationType::Translation, &params);
        assert!(matches!(
            res,
            Err(MotionError::ParameterOutOfRange { index: 1, .. })
        ));
    }

    #[test]
    fn test_unused_slots_are_ignored() -> Result<(), MotionError> {
        let params = [0.0, 0.0, 1.0, 0.0, f64::INFINITY, f64::NAN, 1e9, 1e9];
        let model = MotionModel::from_float_params(TransformationType::RotZoom, &params)?;
        assert_eq!(model.linear(), [65536, 0, 0, 65536]);
        Ok(())
    }

    #[test]
    fn test_serde_roundtrip() -> Result<(), Box<dyn std::error::Error>> {
        let model = MotionModel::Homography {
            translation: [1, 2],
            linear: [65536, 3, 4, 65536],
            perspective: [5, 6],
        };
        let json = serde_json::to_string(&model)?;
        let back: MotionModel = serde_json::from_str(&json)?;
        assert_eq!(model, back);
        Ok(())
    }
}
