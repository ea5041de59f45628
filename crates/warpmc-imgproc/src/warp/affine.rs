use warpmc_image::{clip_pixel, ImageError, Pixel, PlaneMut, PlaneRef};
use warpmc_motion::{
    round_pow2, round_pow2_signed, MotionModel, ShearParams, DIFF_PREC_BITS, FILTER_BITS,
    MODEL_ONE, MODEL_PREC_BITS, PIXEL_PREC_SHIFTS,
};

use super::config::{store, WarpConfig};
use crate::filter::{WARPED_FILTER, WARP_FILTER_PHASES, WARP_FILTER_TAPS};

/// Side of the blocks the separable filter works on.
const BLOCK: usize = 8;

/// Rows of horizontally filtered samples needed by one block.
const TMP_ROWS: usize = BLOCK + WARP_FILTER_TAPS - 1;

/// Row of the block warp filter for a phase at model precision.
///
/// High bit depth rounds phase ties away from zero, 8-bit rounds them up.
/// Phases reaching exactly two pixels select the last row.
#[inline]
fn filter_row(phase: i64, signed: bool) -> &'static [i16; WARP_FILTER_TAPS] {
    let offset = if signed {
        round_pow2_signed(phase, DIFF_PREC_BITS)
    } else {
        round_pow2(phase, DIFF_PREC_BITS)
    };
    let index = offset + PIXEL_PREC_SHIFTS as i64;
    &WARPED_FILTER[index.clamp(0, WARP_FILTER_PHASES as i64 - 1) as usize]
}

/// Project the center of a block at full model precision.
#[inline]
fn project_block_center(a: i64, b: i64, t: i64, x: i64, y: i64, subsampled: bool) -> i64 {
    if subsampled {
        round_pow2_signed(
            a * 2 * x + b * 2 * y + t + (a + b - MODEL_ONE as i64) / 2,
            1,
        )
    } else {
        a * x + b * y + t
    }
}

/// Warp a reference plane into a predicted block with the separable block filter.
///
/// The linear part of the model is factored into a horizontal and a vertical
/// shear (see [`ShearParams`]). Each 8x8 block projects its center, filters 15
/// reference rows horizontally with per-column phases, then filters the
/// intermediate rows vertically with per-row phases. Reads outside the reference
/// are clamped to the nearest edge sample.
///
/// # Arguments
///
/// * `model` - A rotation-zoom or affine model.
/// * `shear` - The shear factorization of `model`, from [`ShearParams::from_model`].
/// * `reference` - The reference plane.
/// * `pred` - The predicted block.
/// * `position` - The frame position `(col, row)` of the top left corner of `pred`.
/// * `config` - The warp parameters. The reference scale must be unit.
///
/// # Errors
///
/// Returns an error if the bit depth is not supported by `T`, the reference scale
/// is not unit or the block does not fit in 32-bit frame coordinates.
///
/// # Example
///
/// ```
/// use warpmc_image::{ImageSize, Plane};
/// use warpmc_imgproc::warp::{warp_affine, WarpConfig};
/// use warpmc_motion::{MotionModel, ShearParams};
///
/// let reference = Plane::<u8>::from_fn(ImageSize { width: 32, height: 32 }, |x, y| (x + y) as u8).unwrap();
/// let mut pred = Plane::<u8>::from_size_val(ImageSize { width: 8, height: 8 }, 0).unwrap();
///
/// let model = MotionModel::Affine { translation: [1 << 16, 0], linear: [65536, 0, 0, 65536] };
/// let shear = ShearParams::from_model(&model).unwrap();
/// warp_affine(&model, &shear, &reference.view(), &mut pred.view_mut(), (8, 8), &WarpConfig::default()).unwrap();
///
/// assert_eq!(pred.pixel(0, 0), 17);
/// ```
pub fn warp_affine<T: Pixel>(
    model: &MotionModel,
    shear: &ShearParams,
    reference: &PlaneRef<'_, T>,
    pred: &mut PlaneMut<'_, T>,
    position: (usize, usize),
    config: &WarpConfig,
) -> Result<(), ImageError> {
    config.validate(pred, position)?;
    if !config.scale.is_unit() {
        return Err(ImageError::InvalidScale(if config.scale.x != 16 {
            config.scale.x
        } else {
            config.scale.y
        }));
    }

    let (w, h) = (reference.width() as i64, reference.height() as i64);
    let [tx, ty] = model.translation().map(i64::from);
    let [m2, m3, m4, m5] = model.linear().map(i64::from);
    let (alpha, beta) = (shear.alpha as i64, shear.beta as i64);
    let (gamma, delta) = (shear.gamma as i64, shear.delta as i64);

    let bit_depth = config.bit_depth;
    let saturate = bit_depth == 8;
    let signed = !saturate;
    let unity = 1i32 << FILTER_BITS;
    let (p_col, p_row) = position;

    let mut tmp = [0i32; TMP_ROWS * BLOCK];

    for bi in (0..pred.height()).step_by(BLOCK) {
        for bj in (0..pred.width()).step_by(BLOCK) {
            let i = (p_row + bi) as i64 + 4;
            let j = (p_col + bj) as i64 + 4;

            let x4 = project_block_center(m2, m3, tx, j, i, config.subsampling.x);
            let y4 = project_block_center(m4, m5, ty, j, i, config.subsampling.y);

            let mask = (1i64 << MODEL_PREC_BITS) - 1;
            let (ix4, sx4) = (x4 >> MODEL_PREC_BITS, x4 & mask);
            let (iy4, sy4) = (y4 >> MODEL_PREC_BITS, y4 & mask);

            // horizontal filter
            for k in -7i64..8 {
                let iy = (iy4 + k).clamp(0, h - 1);
                let row = &mut tmp[(k + 7) as usize * BLOCK..(k + 8) as usize * BLOCK];

                if ix4 <= -7 {
                    // every tap lands on or left of the first column
                    row.fill(reference.clamped(0, iy) * unity);
                } else if ix4 >= w + 6 {
                    // every tap lands on or right of the last column
                    row.fill(reference.clamped(w - 1, iy) * unity);
                } else {
                    let mut sx = sx4 - 4 * alpha + beta * k;
                    for (l, out) in row.iter_mut().enumerate() {
                        let ix = ix4 + l as i64 - 4 - 3;
                        let coeffs = filter_row(sx, signed);
                        let sum: i32 = coeffs
                            .iter()
                            .enumerate()
                            .map(|(m, &c)| reference.clamped(ix + m as i64, iy) * c as i32)
                            .sum();
                        *out = if saturate {
                            sum.clamp(i16::MIN as i32, i16::MAX as i32)
                        } else {
                            sum
                        };
                        sx += alpha;
                    }
                }
            }

            // vertical filter, cropped to the predicted block
            let rows = BLOCK.min(pred.height() - bi);
            let cols = BLOCK.min(pred.width() - bj);
            for k in 0..rows {
                let mut sy = sy4 - 4 * gamma + delta * (k as i64 - 4);
                for l in 0..cols {
                    let coeffs = filter_row(sy, signed);
                    let sum: i64 = coeffs
                        .iter()
                        .enumerate()
                        .map(|(m, &c)| tmp[(k + m) * BLOCK + l] as i64 * c as i64)
                        .sum();
                    let v = clip_pixel(round_pow2(sum, 2 * FILTER_BITS) as i32, bit_depth);
                    store(pred, bj + l, bi + k, v, config.compound);
                    sy += gamma;
                }
            }
        }
    }

    Ok(())
}
