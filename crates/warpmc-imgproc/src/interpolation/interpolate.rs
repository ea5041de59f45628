use serde::{Deserialize, Serialize};
use warpmc_image::{clip_pixel, Pixel, PlaneRef};
use warpmc_motion::{PIXEL_PREC_BITS, PIXEL_PREC_SHIFTS};

use super::bilinear::{bilinear_filter, linear_filter};
use super::cubic::cubic_filter;
use super::ntap::ntap_filter;

/// How the far edges of the reference plane are classified.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BorderRule {
    /// A position on the last column or row is an edge position (`ix >= width - 1`).
    #[default]
    Inclusive,
    /// Only positions past the last column or row are edge positions
    /// (`ix > width - 1`). Kept for streams produced with the historical
    /// high bit depth classifier.
    Legacy,
}

impl BorderRule {
    #[inline]
    fn past_end(self, i: i64, len: i64) -> bool {
        match self {
            BorderRule::Inclusive => i >= len - 1,
            BorderRule::Legacy => i > len - 1,
        }
    }
}

/// Interpolate the reference plane at a sub-pixel position.
///
/// # Arguments
///
/// * `reference` - The reference plane.
/// * `x` - The horizontal position in 1/64 pixel units.
/// * `y` - The vertical position in 1/64 pixel units.
/// * `bit_depth` - The bit depth of the samples, used to clip the result.
/// * `rule` - The classification of the far edges.
///
/// # Returns
///
/// The interpolated sample, clipped to `[0, 2^bit_depth - 1]`.
///
/// # Example
///
/// ```
/// use warpmc_image::{ImageSize, Plane};
/// use warpmc_imgproc::interpolation::{interpolate_pixel, BorderRule};
///
/// let plane = Plane::<u8>::from_fn(ImageSize { width: 8, height: 8 }, |x, _| (x * 8) as u8).unwrap();
///
/// // a quarter pixel right of column 3
/// let v = interpolate_pixel(&plane.view(), 3 * 64 + 16, 4 * 64, 8, BorderRule::Inclusive);
/// assert_eq!(v, 26);
/// ```
pub fn interpolate_pixel<T: Pixel>(
    reference: &PlaneRef<'_, T>,
    x: i64,
    y: i64,
    bit_depth: u32,
    rule: BorderRule,
) -> i32 {
    let shifts = PIXEL_PREC_SHIFTS as i64;
    let (w, h) = (reference.width() as i64, reference.height() as i64);
    let (ix, iy) = (x >> PIXEL_PREC_BITS, y >> PIXEL_PREC_BITS);
    let (sx, sy) = (x - ix * shifts, y - iy * shifts);

    let left = ix < 0;
    let top = iy < 0;
    let right = rule.past_end(ix, w);
    let bottom = rule.past_end(iy, h);

    let v = match (left, top, right, bottom) {
        // corners
        (true, true, _, _) => reference.clamped(0, 0),
        (true, _, _, true) => reference.clamped(0, h - 1),
        (_, true, true, _) => reference.clamped(w - 1, 0),
        (_, _, true, true) => reference.clamped(w - 1, h - 1),
        // edges
        (true, ..) => linear_filter(
            reference.clamped(0, iy),
            reference.clamped(0, iy + 1),
            sy,
        ),
        (_, true, ..) => linear_filter(
            reference.clamped(ix, 0),
            reference.clamped(ix + 1, 0),
            sx,
        ),
        (_, _, true, _) => linear_filter(
            reference.clamped(w - 1, iy),
            reference.clamped(w - 1, iy + 1),
            sy,
        ),
        (_, _, _, true) => linear_filter(
            reference.clamped(ix, h - 1),
            reference.clamped(ix + 1, h - 1),
            sx,
        ),
        // interior
        _ if ix >= 2 && iy >= 2 && ix < w - 3 && iy < h - 3 => ntap_filter(reference, x, y),
        _ if ix >= 1 && iy >= 1 && ix < w - 2 && iy < h - 2 => cubic_filter(reference, x, y),
        _ => bilinear_filter(reference, x, y),
    };

    clip_pixel(v, bit_depth)
}

#[cfg(test)]
mod tests {
    use super::*;
    use warpmc_image::{ImageError, Plane};

    fn test_plane() -> Result<Plane<u16>, ImageError> {
        Plane::from_fn([6, 5].into(), |x, y| (100 * y + 10 * x) as u16)
    }

    #[test]
    fn test_corners() -> Result<(), ImageError> {
        let plane = test_plane()?;
        let view = plane.view();
        let rule = BorderRule::Inclusive;
        assert_eq!(interpolate_pixel(&view, -100, -5, 10, rule), 0);
        assert_eq!(interpolate_pixel(&view, -1, 10_000, 10, rule), 400);
        assert_eq!(interpolate_pixel(&view, 10_000, -64, 10, rule), 50);
        assert_eq!(interpolate_pixel(&view, 10_000, 10_000, 10, rule), 450);
        Ok(())
    }

    #[test]
    fn test_edges_are_linear() -> Result<(), ImageError> {
        let plane = test_plane()?;
        let view = plane.view();
        let rule = BorderRule::Inclusive;
        // left edge, halfway between rows 1 and 2
        assert_eq!(interpolate_pixel(&view, -64, 64 + 32, 10, rule), 150);
        // top edge, quarter way between columns 2 and 3
        assert_eq!(interpolate_pixel(&view, 2 * 64 + 16, -1, 10, rule), 23);
        // last column is an edge for the inclusive rule
        assert_eq!(interpolate_pixel(&view, 5 * 64 + 40, 2 * 64 + 32, 10, rule), 300);
        Ok(())
    }

    #[test]
    fn test_border_rules_agree_with_clamped_reads() -> Result<(), ImageError> {
        let plane = Plane::<u16>::from_fn([6, 6].into(), |x, y| (x * x + 7 * y) as u16)?;
        let view = plane.view();

        // last column, fractional row: the inclusive rule filters along the edge,
        // the legacy rule falls through to bilinear with a replicated column
        let (x, y) = (5 * 64 + 20, 2 * 64 + 16);
        assert_eq!(interpolate_pixel(&view, x, y, 12, BorderRule::Inclusive), 41);
        assert_eq!(interpolate_pixel(&view, x, y, 12, BorderRule::Legacy), 41);

        // sweep the band around the far edges
        for y in (3 * 64..8 * 64).step_by(7) {
            for x in (3 * 64..8 * 64).step_by(5) {
                assert_eq!(
                    interpolate_pixel(&view, x, y, 12, BorderRule::Inclusive),
                    interpolate_pixel(&view, x, y, 12, BorderRule::Legacy),
                    "position ({x}, {y})"
                );
            }
        }
        Ok(())
    }

    #[test]
    fn test_interior_integer_positions() -> Result<(), ImageError> {
        let plane = test_plane()?;
        let view = plane.view();
        for y in 0..4 {
            for x in 0..5 {
                let v = interpolate_pixel(&view, x * 64, y * 64, 10, BorderRule::Inclusive);
                assert_eq!(v, view.pixel(x as usize, y as usize) as i32);
            }
        }
        Ok(())
    }

    #[test]
    fn test_result_is_clipped() -> Result<(), ImageError> {
        // a sharp step makes the 6-tap filter overshoot
        let plane = Plane::<u8>::from_fn([10, 10].into(), |x, _| if x < 5 { 0 } else { 255 })?;
        let view = plane.view();
        for phase in 0..64 {
            let v = interpolate_pixel(&view, 4 * 64 + phase, 4 * 64, 8, BorderRule::Inclusive);
            assert!((0..=255).contains(&v));
        }
        Ok(())
    }
}
