use crate::error::FitError;
use crate::normalize::{check_correspondences, denormalize, to_params, Normalization};
use warpmc_linalg::{svd, Matrix};
use warpmc_motion::TransformationType;

/// Ratio between the second smallest and the largest singular value below which
/// the homography system is considered to have a multi-dimensional null space.
const RANK_TOLERANCE: f64 = 1e-9;

/// Fit a homography to point correspondences.
///
/// Each correspondence contributes the three rows of `d x (H s) = 0` to a
/// homogeneous system between the normalized point sets. The solution is the right
/// singular vector of the smallest singular value, mapped back to pixel units and
/// scaled so that its bottom right entry is one.
///
/// # Returns
///
/// The canonical parameters `[tx, ty, m2, m3, m4, m5, h6, h7]`.
///
/// # Errors
///
/// Returns an error if the sets differ in length, hold fewer than four points or
/// cannot be normalized, and [`FitError::DegenerateHomography`] if the solution is
/// not unique (e.g. collinear points) or maps points to infinity.
pub fn find_homography(src: &[[i32; 2]], dst: &[[i32; 2]]) -> Result<[f64; 8], FitError> {
    check_correspondences(TransformationType::Homography, src, dst)?;
    let (t1, src_n) = Normalization::from_points(src)?;
    let (t2, dst_n) = Normalization::from_points(dst)?;

    let mut a = Matrix::try_zeros(3 * src_n.len(), 9)?;
    for (i, (s, d)) in src_n.iter().zip(&dst_n).enumerate() {
        let (sx, sy) = (s[0], s[1]);
        let (dx, dy) = (d[0], d[1]);
        let r = 3 * i;

        a[(r, 3)] = -sx;
        a[(r, 4)] = -sy;
        a[(r, 5)] = -1.0;
        a[(r, 6)] = dy * sx;
        a[(r, 7)] = dy * sy;
        a[(r, 8)] = dy;

        a[(r + 1, 0)] = sx;
        a[(r + 1, 1)] = sy;
        a[(r + 1, 2)] = 1.0;
        a[(r + 1, 6)] = -dx * sx;
        a[(r + 1, 7)] = -dx * sy;
        a[(r + 1, 8)] = -dx;

        a[(r + 2, 0)] = -dy * sx;
        a[(r + 2, 1)] = -dy * sy;
        a[(r + 2, 2)] = -dy;
        a[(r + 2, 3)] = dx * sx;
        a[(r + 2, 4)] = dx * sy;
        a[(r + 2, 5)] = dx;
    }

    let res = svd(&a)?;

    let mut w = res.w().to_vec();
    w.sort_by(f64::total_cmp);
    if w[1] < RANK_TOLERANCE * w[w.len() - 1] {
        log::debug!(
            "homography null space is not one dimensional: singular values {:e}, {:e}",
            w[0],
            w[1]
        );
        return Err(FitError::DegenerateHomography);
    }

    let h = res.v().column(res.argmin());
    let h = [[h[0], h[1], h[2]], [h[3], h[4], h[5]], [h[6], h[7], h[8]]];
    let h = denormalize(&h, &t1, &t2);
    if h[2][2] == 0.0 {
        return Err(FitError::DegenerateHomography);
    }

    let f = 1.0 / h[2][2];
    Ok(to_params(&h).map(|v| v * f))
}
