use crate::error::FitError;
use crate::normalize::{
    check_correspondences, denormalize, solve_least_squares, to_params, Normalization,
};
use warpmc_linalg::Matrix;
use warpmc_motion::TransformationType;

/// Fit a rotation-zoom model to point correspondences.
///
/// Solves for `(a, b, tx, ty)` in
///
/// ```text
/// x' =  a * x + b * y + tx
/// y' = -b * x + a * y + ty
/// ```
///
/// in the least squares sense between the normalized point sets.
///
/// # Returns
///
/// The canonical parameters `[tx, ty, a, b, -b, a, 0, 0]`.
///
/// # Errors
///
/// Returns an error if the sets differ in length, hold fewer than three points,
/// cannot be normalized, or the system is rank deficient.
pub fn find_rotzoom(src: &[[i32; 2]], dst: &[[i32; 2]]) -> Result<[f64; 8], FitError> {
    check_correspondences(TransformationType::RotZoom, src, dst)?;
    let (t1, src_n) = Normalization::from_points(src)?;
    let (t2, dst_n) = Normalization::from_points(dst)?;

    let mut a = Matrix::try_zeros(2 * src_n.len(), 4)?;
    let mut b = Vec::with_capacity(2 * src_n.len());
    for (i, (s, d)) in src_n.iter().zip(&dst_n).enumerate() {
        let (sx, sy) = (s[0], s[1]);
        a[(2 * i, 0)] = sx;
        a[(2 * i, 1)] = sy;
        a[(2 * i, 2)] = 1.0;
        a[(2 * i + 1, 0)] = sy;
        a[(2 * i + 1, 1)] = -sx;
        a[(2 * i + 1, 3)] = 1.0;
        b.extend_from_slice(d);
    }

    let p = solve_least_squares(&a, &b)?;
    let h = [[p[0], p[1], p[2]], [-p[1], p[0], p[3]], [0.0, 0.0, 1.0]];
    let mut params = to_params(&denormalize(&h, &t1, &t2));
    params[4] = -params[3];
    params[5] = params[2];
    params[6] = 0.0;
    params[7] = 0.0;
    Ok(params)
}
