use warpmc_image::{Pixel, PlaneRef};
use warpmc_motion::{round_pow2_signed, FILTER_BITS, PIXEL_PREC_BITS, PIXEL_PREC_SHIFTS};

/// Cubic convolution through `p[1]` and `p[2]` at phase `x` in `[0, 64]`.
///
/// `p` holds the samples at offsets `-1, 0, 1, 2`. The result is scaled by
/// `1 << FILTER_BITS`.
fn cubic_1d(p: &[i64; 4], x: i64) -> i64 {
    let [pm1, p0, p1, p2] = *p;
    if x == 0 {
        p0 << FILTER_BITS
    } else if x == PIXEL_PREC_SHIFTS as i64 {
        p1 << FILTER_BITS
    } else {
        let v1 = x * x * x * (3 * (p0 - p1) + p2 - pm1);
        let v2 = x * x * (2 * pm1 - 5 * p0 + 4 * p1 - p2);
        let v3 = x * (p1 - pm1);
        let v4 = 2 * p0;
        round_pow2_signed(
            (v4 << (3 * PIXEL_PREC_BITS)) + (v3 << (2 * PIXEL_PREC_BITS)) + (v2 << PIXEL_PREC_BITS) + v1,
            3 * PIXEL_PREC_BITS + 1 - FILTER_BITS,
        )
    }
}

/// Separable cubic convolution over a 4x4 support. Returns the value at pixel
/// scale.
pub(crate) fn cubic_filter<T: Pixel>(reference: &PlaneRef<'_, T>, x: i64, y: i64) -> i32 {
    let shifts = PIXEL_PREC_SHIFTS as i64;
    let (ix, iy) = (x >> PIXEL_PREC_BITS, y >> PIXEL_PREC_BITS);
    let (sx, sy) = (x - ix * shifts, y - iy * shifts);

    let mut arr = [0i64; 4];
    for (k, out) in arr.iter_mut().enumerate() {
        let col = ix + k as i64 - 1;
        let column = [
            reference.clamped(col, iy - 1) as i64,
            reference.clamped(col, iy) as i64,
            reference.clamped(col, iy + 1) as i64,
            reference.clamped(col, iy + 2) as i64,
        ];
        *out = cubic_1d(&column, sy);
    }

    round_pow2_signed(cubic_1d(&arr, sx), 2 * FILTER_BITS) as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use warpmc_image::{ImageError, Plane};

    #[test]
    fn test_cubic_1d_passes_through_samples() {
        let p = [3, 10, 20, 7];
        assert_eq!(cubic_1d(&p, 0), 10 << FILTER_BITS);
        assert_eq!(cubic_1d(&p, 64), 20 << FILTER_BITS);
    }

    #[test]
    fn test_cubic_1d_reproduces_linear() {
        // a straight line is reproduced exactly by cubic convolution
        let p = [0, 64, 128, 192];
        assert_eq!(cubic_1d(&p, 16), (64 + 16) << FILTER_BITS);
        assert_eq!(cubic_1d(&p, 32), (64 + 32) << FILTER_BITS);
    }

    #[test]
    fn test_cubic_filter_midpoint() -> Result<(), ImageError> {
        let plane = Plane::<u8>::from_fn([4, 4].into(), |x, _| (x * 10) as u8)?;
        // halfway between columns 1 and 2 on row 1
        assert_eq!(cubic_filter(&plane.view(), 64 + 32, 64), 15);
        Ok(())
    }
}
