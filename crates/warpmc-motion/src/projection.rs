use serde::{Deserialize, Serialize};

use crate::error::MotionError;
use crate::fixed::{
    round_pow2_signed, saturate_i32, DIFF_PREC_BITS, HOMOGRAPHY_ROW_PREC_BITS, MODEL_ONE,
    MODEL_PREC_BITS, PIXEL_PREC_BITS,
};
use crate::model::MotionModel;

/// Chroma subsampling flags of the plane being predicted.
///
/// When a flag is set, positions along that axis are in half resolution units
/// relative to the luma grid the model was estimated on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Subsampling {
    /// Horizontal subsampling.
    pub x: bool,
    /// Vertical subsampling.
    pub y: bool,
}

impl Subsampling {
    /// Full resolution on both axes.
    pub const NONE: Self = Self { x: false, y: false };

    /// 4:2:0 chroma.
    pub const YUV420: Self = Self { x: true, y: true };
}

/// One output coordinate of an affine row `a * x + b * y + t`.
#[inline]
fn project_affine_axis(a: i64, b: i64, t: i64, x: i64, y: i64, subsampled: bool) -> i64 {
    if subsampled {
        round_pow2_signed(
            a * 2 * x + b * 2 * y + t + (a + b - MODEL_ONE as i64) / 2,
            DIFF_PREC_BITS + 1,
        )
    } else {
        round_pow2_signed(a * x + b * y + t, DIFF_PREC_BITS)
    }
}

#[inline]
fn project_translation_axis(v: i64, t: i64, subsampled: bool) -> i64 {
    if subsampled {
        round_pow2_signed(v * (1 << (MODEL_PREC_BITS + 1)) + t, DIFF_PREC_BITS + 1)
    } else {
        round_pow2_signed(v * (1 << MODEL_PREC_BITS) + t, DIFF_PREC_BITS)
    }
}

/// Divide rounding to nearest, ties away from zero.
#[inline]
fn divide_round(num: i128, den: i128) -> i128 {
    if num >= 0 {
        (num + den / 2) / den
    } else {
        (num - den / 2) / den
    }
}

#[inline]
fn saturate_wide(value: i128) -> i32 {
    value.clamp(i32::MIN as i128, i32::MAX as i128) as i32
}

impl MotionModel {
    /// Project a destination position into the reference frame.
    ///
    /// The output carries [`PIXEL_PREC_BITS`] fractional bits, i.e. it is scaled
    /// by 64. Intermediates are wide enough for any `i32` model and position, and
    /// the result saturates to the `i32` range. A homography whose denominator
    /// vanishes at `point` maps it as if the denominator were one, which sends the
    /// point far outside any reference frame.
    ///
    /// # Example
    ///
    /// ```
    /// use warpmc_motion::{MotionModel, Subsampling};
    ///
    /// // half a pixel to the right
    /// let model = MotionModel::from_translation(1 << 15, 0);
    /// assert_eq!(model.project_point([3, 4], Subsampling::NONE), [3 * 64 + 32, 4 * 64]);
    /// ```
    pub fn project_point(&self, point: [i32; 2], subsampling: Subsampling) -> [i32; 2] {
        let (x, y) = (point[0] as i64, point[1] as i64);
        let [tx, ty] = self.translation().map(i64::from);

        match self {
            MotionModel::Translation { .. } => [
                saturate_i32(project_translation_axis(x, tx, subsampling.x)),
                saturate_i32(project_translation_axis(y, ty, subsampling.y)),
            ],
            MotionModel::RotZoom { .. } | MotionModel::Affine { .. } => {
                let [m2, m3, m4, m5] = self.linear().map(i64::from);
                [
                    saturate_i32(project_affine_axis(m2, m3, tx, x, y, subsampling.x)),
                    saturate_i32(project_affine_axis(m4, m5, ty, x, y, subsampling.y)),
                ]
            }
            MotionModel::Homography { .. } => {
                // products of 32-bit coefficients and doubled positions exceed 64 bits
                let [m2, m3, m4, m5] = self.linear().map(i128::from);
                let [h6, h7] = self.perspective().map(i128::from);
                let [tx, ty] = [tx as i128, ty as i128];
                let (x, y) = (x as i128, y as i128);

                let x = if subsampling.x { 4 * x + 1 } else { 2 * x };
                let y = if subsampling.y { 4 * y + 1 } else { 2 * y };

                let mut z = h6 * x + h7 * y + (1 << (HOMOGRAPHY_ROW_PREC_BITS + 1));
                if z == 0 {
                    z = 1;
                }
                let shift = PIXEL_PREC_BITS + HOMOGRAPHY_ROW_PREC_BITS - MODEL_PREC_BITS;
                let xp = (m2 * x + m3 * y + 2 * tx) << shift;
                let yp = (m4 * x + m5 * y + 2 * ty) << shift;

                let mut xp = divide_round(xp, z);
                let mut yp = divide_round(yp, z);

                let half = 1 << (PIXEL_PREC_BITS - 1);
                if subsampling.x {
                    xp = (xp - half) / 2;
                }
                if subsampling.y {
                    yp = (yp - half) / 2;
                }
                [saturate_wide(xp), saturate_wide(yp)]
            }
        }
    }
}

/// Project a batch of destination positions into the reference frame.
///
/// # Arguments
///
/// * `model` - The motion model.
/// * `points` - The destination positions in whole pixels.
/// * `proj` - The projected positions in 1/64 pixel units.
/// * `subsampling` - The subsampling of the plane the points belong to.
///
/// # Errors
///
/// Returns [`MotionError::LengthMismatch`] if `points` and `proj` differ in length.
pub fn project_points(
    model: &MotionModel,
    points: &[[i32; 2]],
    proj: &mut [[i32; 2]],
    subsampling: Subsampling,
) -> Result<(), MotionError> {
    if points.len() != proj.len() {
        return Err(MotionError::LengthMismatch(points.len(), proj.len()));
    }

    points
        .iter()
        .zip(proj.iter_mut())
        .for_each(|(p, out)| *out = model.project_point(*p, subsampling));

    Ok(())
}
