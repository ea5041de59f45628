use super::lut::ERROR_MEASURE_LUT;

/// Fixed-point error of a single sample difference.
///
/// For 8-bit content this is a direct table lookup. Higher bit depths look up the
/// top 8 bits of `|err|` and interpolate linearly with the remaining bits, so the
/// result is scaled by `2^(bit_depth - 8)`.
///
/// # Arguments
///
/// * `err` - The difference between two samples.
/// * `bit_depth` - The bit depth of the samples, at least 8.
///
/// # Example
///
/// ```
/// use warpmc_imgproc::metrics::error_measure;
///
/// assert_eq!(error_measure(0, 8), 0);
/// assert_eq!(error_measure(-255, 8), 16384);
/// assert_eq!(error_measure(4 * 255, 10), 4 * 16384);
/// ```
pub fn error_measure(err: i32, bit_depth: u32) -> i32 {
    let b = bit_depth.saturating_sub(8);
    let max = (1i32 << (b + 8)) - 1;
    let e = err.unsigned_abs().min(max as u32) as i32;
    let e1 = (e >> b) as usize;
    let e2 = e & ((1 << b) - 1);
    ERROR_MEASURE_LUT[255 + e1] * ((1 << b) - e2) + ERROR_MEASURE_LUT[256 + e1] * e2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symmetric() {
        for e in 0..=255 {
            assert_eq!(error_measure(e, 8), error_measure(-e, 8));
        }
        for e in (0..4096).step_by(37) {
            assert_eq!(error_measure(e, 12), error_measure(-e, 12));
        }
    }

    #[test]
    fn test_monotonic() {
        for bd in [8, 10, 12] {
            let max = (1 << bd) - 1;
            let mut prev = error_measure(0, bd);
            for e in 1..=max {
                let cur = error_measure(e, bd);
                assert!(cur >= prev, "bd {bd} err {e}");
                prev = cur;
            }
        }
    }

    #[test]
    fn test_high_bit_depth_scales_the_8bit_table() {
        for e in -255..=255 {
            assert_eq!(error_measure(e << 2, 10), error_measure(e, 8) << 2);
            assert_eq!(error_measure(e << 4, 12), error_measure(e, 8) << 4);
        }
    }

    #[test]
    fn test_interpolates_between_entries() {
        // halfway between |e| = 1 and |e| = 2 at 10 bits
        let v = error_measure(6, 10);
        assert_eq!(v, 339 * 2 + 550 * 2);
    }

    #[test]
    fn test_out_of_range_saturates() {
        assert_eq!(error_measure(1000, 8), error_measure(255, 8));
        assert_eq!(error_measure(i32::MIN, 10), error_measure(1023, 10));
    }
}
