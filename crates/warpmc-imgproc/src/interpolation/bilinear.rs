use warpmc_image::{Pixel, PlaneRef};
use warpmc_motion::{round_pow2_signed, PIXEL_PREC_BITS, PIXEL_PREC_SHIFTS};

/// Kernel for bilinear interpolation
///
/// Returns the interpolated value at pixel scale, not yet clipped.
pub(crate) fn bilinear_filter<T: Pixel>(reference: &PlaneRef<'_, T>, x: i64, y: i64) -> i32 {
    let shifts = PIXEL_PREC_SHIFTS as i64;
    let (ix, iy) = (x >> PIXEL_PREC_BITS, y >> PIXEL_PREC_BITS);
    let (sx, sy) = (x - ix * shifts, y - iy * shifts);

    let p00 = reference.clamped(ix, iy) as i64;
    let p01 = reference.clamped(ix + 1, iy) as i64;
    let p10 = reference.clamped(ix, iy + 1) as i64;
    let p11 = reference.clamped(ix + 1, iy + 1) as i64;

    let sum = p00 * (shifts - sy) * (shifts - sx)
        + p01 * (shifts - sy) * sx
        + p10 * sy * (shifts - sx)
        + p11 * sy * sx;

    round_pow2_signed(sum, 2 * PIXEL_PREC_BITS) as i32
}

/// 2-tap linear interpolation between two neighbouring samples.
#[inline]
pub(crate) fn linear_filter(p0: i32, p1: i32, frac: i64) -> i32 {
    let shifts = PIXEL_PREC_SHIFTS as i64;
    round_pow2_signed(p0 as i64 * (shifts - frac) + p1 as i64 * frac, PIXEL_PREC_BITS) as i32
}
