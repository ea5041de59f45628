use crate::error::FitError;
use crate::normalize::{check_correspondences, denormalize, to_params, Normalization};
use warpmc_motion::TransformationType;

/// Fit a translation to point correspondences.
///
/// The translation is the mean displacement between the normalized point sets,
/// mapped back to pixel units.
///
/// # Arguments
///
/// * `src` - The source points.
/// * `dst` - The destination points, one per source point.
///
/// # Returns
///
/// The canonical parameters `[tx, ty, 1, 0, 0, 1, 0, 0]`.
///
/// # Errors
///
/// Returns an error if the sets differ in length, hold fewer than two points or
/// either set has all its points on top of each other.
///
/// # Example
///
/// ```
/// use warpmc_fit::find_translation;
///
/// let src = [[0, 0], [4, 1], [2, 9]];
/// let dst = [[3, -1], [7, 0], [5, 8]];
/// let params = find_translation(&src, &dst).unwrap();
/// assert!((params[0] - 3.0).abs() < 1e-9);
/// assert!((params[1] + 1.0).abs() < 1e-9);
/// ```
pub fn find_translation(src: &[[i32; 2]], dst: &[[i32; 2]]) -> Result<[f64; 8], FitError> {
    check_correspondences(TransformationType::Translation, src, dst)?;
    let (t1, src_n) = Normalization::from_points(src)?;
    let (t2, dst_n) = Normalization::from_points(dst)?;

    let n = src_n.len() as f64;
    let (mut sum_x, mut sum_y) = (0.0, 0.0);
    for (s, d) in src_n.iter().zip(&dst_n) {
        sum_x += d[0] - s[0];
        sum_y += d[1] - s[1];
    }

    let h = [[1.0, 0.0, sum_x / n], [0.0, 1.0, sum_y / n], [0.0, 0.0, 1.0]];
    let mut params = to_params(&denormalize(&h, &t1, &t2));
    // only the translation survives
    params[2..].copy_from_slice(&[1.0, 0.0, 0.0, 1.0, 0.0, 0.0]);
    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use warpmc_motion::MotionModel;

    #[test]
    fn test_find_translation() -> Result<(), FitError> {
        let src = [[10, 20], [-30, 5], [44, -8], [0, 0]];
        let dst = src.map(|[x, y]| [x + 7, y - 3]);
        let params = find_translation(&src, &dst)?;
        let expected = [7.0, -3.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0];
        for (a, b) in params.iter().zip(&expected) {
            assert_relative_eq!(a, b, epsilon = 1e-9);
        }
        Ok(())
    }

    #[test]
    fn test_find_translation_two_points() -> Result<(), FitError> {
        let params = find_translation(&[[0, 0], [2, 0]], &[[1, 1], [3, 1]])?;
        assert_relative_eq!(params[0], 1.0, epsilon = 1e-9);
        assert_relative_eq!(params[1], 1.0, epsilon = 1e-9);
        Ok(())
    }

    #[test]
    fn test_find_translation_two_point_example() -> Result<(), FitError> {
        let src = [[0, 0], [10, 0]];
        let dst = [[2, 3], [12, 3]];
        let params = find_translation(&src, &dst)?;
        assert_eq!(params, [2.0, 3.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0]);

        let model = crate::find_projection(TransformationType::Translation, &src, &dst)?;
        assert_eq!(model, MotionModel::from_translation(2 << 16, 3 << 16));
        Ok(())
    }

    #[test]
    fn test_find_translation_errors() {
        assert!(matches!(
            find_translation(&[[0, 0]], &[[1, 1]]),
            Err(FitError::InsufficientCorrespondences { required: 2, actual: 1, .. })
        ));
        assert!(matches!(
            find_translation(&[[3, 3], [3, 3]], &[[1, 1], [2, 2]]),
            Err(FitError::Degenerate)
        ));
    }
}
