use crate::error::LinalgError;
use crate::matrix::Matrix;
use crate::svd::svd;

/// Singular values with a magnitude below this threshold are treated as zero.
pub const SINGULAR_VALUE_EPSILON: f64 = 1e-12;

/// Compute the Moore-Penrose pseudo-inverse `A⁺ = V · W⁻¹ · Uᵀ` of a tall matrix.
///
/// # Arguments
///
/// * `a` - The input matrix with shape `(m, n)`, `m >= n`.
///
/// # Returns
///
/// The `n x m` pseudo-inverse.
///
/// # Errors
///
/// Returns [`LinalgError::RankDeficient`] if any singular value is smaller than
/// [`SINGULAR_VALUE_EPSILON`], and propagates any SVD failure.
pub fn pseudo_inverse(a: &Matrix) -> Result<Matrix, LinalgError> {
    let (m, n) = (a.rows(), a.cols());
    let res = svd(a)?;
    let (u, w, v) = (res.u(), res.w(), res.v());

    if let Some((index, &value)) = w
        .iter()
        .enumerate()
        .find(|(_, s)| s.abs() < SINGULAR_VALUE_EPSILON)
    {
        log::debug!("pseudo_inverse: singular value {index} is {value:e}");
        return Err(LinalgError::RankDeficient { index, value });
    }

    let mut inv = Matrix::try_zeros(n, m)?;
    for i in 0..n {
        for j in 0..m {
            let mut sum = 0.0;
            for k in 0..n {
                sum += v[(i, k)] * u[(j, k)] / w[k];
            }
            inv[(i, j)] = sum;
        }
    }
    Ok(inv)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_pseudo_inverse_left_identity() -> Result<(), LinalgError> {
        let a = Matrix::from_rows(&[
            [2.0, -1.0, 0.5],
            [1.0, 3.0, 0.0],
            [0.0, 1.0, 4.0],
            [1.5, 0.0, -2.0],
            [0.5, 0.5, 0.5],
        ]);
        let inv = pseudo_inverse(&a)?;
        assert_eq!((inv.rows(), inv.cols()), (3, 5));

        let id = inv.matmul(&a)?;
        for i in 0..3 {
            for j in 0..3 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert_relative_eq!(id[(i, j)], expected, epsilon = 1e-10);
            }
        }
        Ok(())
    }

    #[test]
    fn test_pseudo_inverse_least_squares() -> Result<(), LinalgError> {
        // fit y = 2x + 1 through exact samples
        let a = Matrix::from_rows(&[[0.0, 1.0], [1.0, 1.0], [2.0, 1.0], [3.0, 1.0]]);
        let b = Matrix::from_rows(&[[1.0], [3.0], [5.0], [7.0]]);
        let x = pseudo_inverse(&a)?.matmul(&b)?;
        assert_relative_eq!(x[(0, 0)], 2.0, epsilon = 1e-10);
        assert_relative_eq!(x[(1, 0)], 1.0, epsilon = 1e-10);
        Ok(())
    }

    #[test]
    fn test_pseudo_inverse_rank_deficient() {
        let a = Matrix::from_rows(&[[1.0, 2.0], [2.0, 4.0], [3.0, 6.0]]);
        let res = pseudo_inverse(&a);
        assert!(matches!(res, Err(LinalgError::RankDeficient { .. })));
    }
}
