use warpmc_image::{Pixel, PlaneRef};
use warpmc_motion::{round_pow2_signed, FILTER_BITS, PIXEL_PREC_BITS, PIXEL_PREC_SHIFTS};

use crate::filter::{PIXEL_FILTER_TAPS, WARPED_PIXEL_FILTER};

/// Offset of the first tap relative to the integer position.
const TAP_OFFSET: i64 = PIXEL_FILTER_TAPS as i64 / 2 - 1;

#[inline]
fn ntap_1d(p: &[i64; PIXEL_FILTER_TAPS], phase: i64) -> i64 {
    WARPED_PIXEL_FILTER[phase as usize]
        .iter()
        .zip(p.iter())
        .map(|(&c, &v)| c as i64 * v)
        .sum()
}

/// Separable 6-tap table filter.
///
/// Each of the six columns around the position is filtered vertically, then the
/// column results are filtered horizontally. Returns the value at pixel scale.
pub(crate) fn ntap_filter<T: Pixel>(reference: &PlaneRef<'_, T>, x: i64, y: i64) -> i32 {
    let shifts = PIXEL_PREC_SHIFTS as i64;
    let (ix, iy) = (x >> PIXEL_PREC_BITS, y >> PIXEL_PREC_BITS);
    let (sx, sy) = (x - ix * shifts, y - iy * shifts);

    let mut arr = [0i64; PIXEL_FILTER_TAPS];
    for (k, out) in arr.iter_mut().enumerate() {
        let col = ix + k as i64 - TAP_OFFSET;
        let mut column = [0i64; PIXEL_FILTER_TAPS];
        for (r, v) in column.iter_mut().enumerate() {
            *v = reference.clamped(col, iy + r as i64 - TAP_OFFSET) as i64;
        }
        *out = ntap_1d(&column, sy);
    }

    round_pow2_signed(ntap_1d(&arr, sx), 2 * FILTER_BITS) as i32
}
