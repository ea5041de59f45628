/// Fractional bits of the translation and linear model terms.
pub const MODEL_PREC_BITS: u32 = 16;

/// Fractional bits of the homogeneous row `h6, h7` of a homography.
pub const HOMOGRAPHY_ROW_PREC_BITS: u32 = 12;

/// Fractional bits of a projected pixel position.
pub const PIXEL_PREC_BITS: u32 = 6;

/// Number of sub-pixel phases per pixel.
pub const PIXEL_PREC_SHIFTS: i32 = 1 << PIXEL_PREC_BITS;

/// Bits dropped when going from model precision to pixel precision.
pub const DIFF_PREC_BITS: u32 = MODEL_PREC_BITS - PIXEL_PREC_BITS;

/// Fixed-point representation of `1.0` at model precision.
pub const MODEL_ONE: i32 = 1 << MODEL_PREC_BITS;

/// Precision bits of the resampling filter taps.
pub const FILTER_BITS: u32 = 7;

/// Round `value / 2^n` to nearest, ties away from zero.
///
/// # Example
///
/// ```
/// use warpmc_motion::round_pow2_signed;
///
/// assert_eq!(round_pow2_signed(5, 2), 1);
/// assert_eq!(round_pow2_signed(-5, 2), -1);
/// assert_eq!(round_pow2_signed(6, 2), 2);
/// assert_eq!(round_pow2_signed(-6, 2), -2);
/// ```
#[inline(always)]
pub const fn round_pow2_signed(value: i64, n: u32) -> i64 {
    if n == 0 {
        return value;
    }
    if value >= 0 {
        (value + (1 << (n - 1))) >> n
    } else {
        -((-value + (1 << (n - 1))) >> n)
    }
}

/// Round `value / 2^n` with an arithmetic shift, ties towards positive infinity.
///
/// ```
/// use warpmc_motion::round_pow2;
///
/// assert_eq!(round_pow2(6, 2), 2);
/// assert_eq!(round_pow2(-6, 2), -1);
/// ```
#[inline(always)]
pub const fn round_pow2(value: i64, n: u32) -> i64 {
    if n == 0 {
        return value;
    }
    (value + (1 << (n - 1))) >> n
}

/// Saturate a 64-bit intermediate into the `i32` range.
#[inline(always)]
pub(crate) fn saturate_i32(value: i64) -> i32 {
    value.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}
