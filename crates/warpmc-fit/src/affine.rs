use crate::error::FitError;
use crate::normalize::{
    check_correspondences, denormalize, solve_least_squares, to_params, Normalization,
};
use warpmc_linalg::Matrix;
use warpmc_motion::TransformationType;

/// Fit an affine model to point correspondences.
///
/// Solves for the six affine parameters in the least squares sense between the
/// normalized point sets.
///
/// # Returns
///
/// The canonical parameters `[tx, ty, m2, m3, m4, m5, 0, 0]`.
///
/// # Errors
///
/// Returns an error if the sets differ in length, hold fewer than three points,
/// cannot be normalized, or the points are collinear.
///
/// # Example
///
/// ```
/// use warpmc_fit::find_affine;
///
/// let src = [[0, 0], [10, 0], [0, 10], [10, 10]];
/// let dst = [[1, 2], [21, 2], [6, 12], [26, 12]];
/// let params = find_affine(&src, &dst).unwrap();
/// let expected = [1.0, 2.0, 2.0, 0.5, 0.0, 1.0, 0.0, 0.0];
/// for (a, b) in params.iter().zip(&expected) {
///     assert!((a - b).abs() < 1e-9);
/// }
/// ```
pub fn find_affine(src: &[[i32; 2]], dst: &[[i32; 2]]) -> Result<[f64; 8], FitError> {
    check_correspondences(TransformationType::Affine, src, dst)?;
    let (t1, src_n) = Normalization::from_points(src)?;
    let (t2, dst_n) = Normalization::from_points(dst)?;

    let mut a = Matrix::try_zeros(2 * src_n.len(), 6)?;
    let mut b = Vec::with_capacity(2 * src_n.len());
    for (i, (s, d)) in src_n.iter().zip(&dst_n).enumerate() {
        let (sx, sy) = (s[0], s[1]);
        a[(2 * i, 0)] = sx;
        a[(2 * i, 1)] = sy;
        a[(2 * i, 4)] = 1.0;
        a[(2 * i + 1, 2)] = sx;
        a[(2 * i + 1, 3)] = sy;
        a[(2 * i + 1, 5)] = 1.0;
        b.extend_from_slice(d);
    }

    let p = solve_least_squares(&a, &b)?;
    let h = [[p[0], p[1], p[4]], [p[2], p[3], p[5]], [0.0, 0.0, 1.0]];
    let mut params = to_params(&denormalize(&h, &t1, &t2));
    params[6] = 0.0;
    params[7] = 0.0;
    Ok(params)
}
