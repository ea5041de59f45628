use crate::error::FitError;
use warpmc_linalg::{pseudo_inverse, Matrix};
use warpmc_motion::TransformationType;

/// Isotropic similarity moving the centroid of a point set to the origin with a
/// mean distance of `sqrt(2)` from it.
///
/// ```text
/// T = [[s, 0, -s * mx], [0, s, -s * my], [0, 0, 1]]
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Normalization {
    scale: f64,
    mean: [f64; 2],
}

impl Normalization {
    /// Normalize a point set.
    ///
    /// Returns the normalized points along with the transform applied to them.
    pub(crate) fn from_points(points: &[[i32; 2]]) -> Result<(Self, Vec<[f64; 2]>), FitError> {
        let n = points.len() as f64;
        let (mut mx, mut my) = (0.0, 0.0);
        for p in points {
            mx += p[0] as f64;
            my += p[1] as f64;
        }
        mx /= n;
        my /= n;

        let mut mean_dist = 0.0;
        for p in points {
            let dx = p[0] as f64 - mx;
            let dy = p[1] as f64 - my;
            mean_dist += (dx * dx + dy * dy).sqrt();
        }
        mean_dist /= n;
        if mean_dist <= 0.0 {
            return Err(FitError::Degenerate);
        }
        let scale = std::f64::consts::SQRT_2 / mean_dist;

        let normalized = points
            .iter()
            .map(|p| [(p[0] as f64 - mx) * scale, (p[1] as f64 - my) * scale])
            .collect();

        Ok((
            Self {
                scale,
                mean: [mx, my],
            },
            normalized,
        ))
    }

    pub(crate) fn matrix(&self) -> [[f64; 3]; 3] {
        let s = self.scale;
        [
            [s, 0.0, -s * self.mean[0]],
            [0.0, s, -s * self.mean[1]],
            [0.0, 0.0, 1.0],
        ]
    }

    pub(crate) fn inverse(&self) -> [[f64; 3]; 3] {
        let is = 1.0 / self.scale;
        [
            [is, 0.0, self.mean[0]],
            [0.0, is, self.mean[1]],
            [0.0, 0.0, 1.0],
        ]
    }
}

fn mat33_mul(a: &[[f64; 3]; 3], b: &[[f64; 3]; 3]) -> [[f64; 3]; 3] {
    let mut out = [[0.0; 3]; 3];
    for (i, row) in out.iter_mut().enumerate() {
        for (j, v) in row.iter_mut().enumerate() {
            *v = (0..3).map(|k| a[i][k] * b[k][j]).sum();
        }
    }
    out
}

/// Map a model fitted between normalized sets back to pixel units,
/// `H = T2^-1 * H * T1`.
pub(crate) fn denormalize(
    h: &[[f64; 3]; 3],
    src: &Normalization,
    dst: &Normalization,
) -> [[f64; 3]; 3] {
    mat33_mul(&dst.inverse(), &mat33_mul(h, &src.matrix()))
}

/// Canonical parameter layout `[tx, ty, m2, m3, m4, m5, h6, h7]` of a 3x3 model.
pub(crate) fn to_params(h: &[[f64; 3]; 3]) -> [f64; 8] {
    [
        h[0][2], h[1][2], h[0][0], h[0][1], h[1][0], h[1][1], h[2][0], h[2][1],
    ]
}

/// Least squares solution of `A x = b` through the pseudo-inverse of `A`.
pub(crate) fn solve_least_squares(a: &Matrix, b: &[f64]) -> Result<Vec<f64>, FitError> {
    let inv = pseudo_inverse(a)?;
    Ok((0..inv.rows())
        .map(|i| inv.row(i).iter().zip(b).map(|(x, y)| x * y).sum())
        .collect())
}

/// Check the correspondence counts for a model type.
pub(crate) fn check_correspondences(
    ty: TransformationType,
    src: &[[i32; 2]],
    dst: &[[i32; 2]],
) -> Result<(), FitError> {
    if src.len() != dst.len() {
        return Err(FitError::LengthMismatch(src.len(), dst.len()));
    }
    let required = ty.min_correspondences();
    if src.len() < required {
        return Err(FitError::InsufficientCorrespondences {
            ty,
            required,
            actual: src.len(),
        });
    }
    Ok(())
}
