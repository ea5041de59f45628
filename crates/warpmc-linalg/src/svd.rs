//! Singular Value Decomposition for dense `m x n` matrices with `m >= n`.
//!
//! The decomposition follows the classic two-phase scheme:
//!
//! 1. Householder reflections reduce the input to upper bidiagonal form while the
//!    left and right transformations are accumulated.
//! 2. Implicitly shifted QR sweeps (Givens rotations) chase the superdiagonal to
//!    zero, one singular value at a time.
//!
//! ```text
//! A = U Σ Vᵀ
//! ```
//!
//! `U` is `m x n` with orthonormal columns, `Σ` holds the `n` non-negative singular
//! values (not sorted) and `V` is `n x n` orthogonal.
//!
//! # Example
//!
//! ```
//! use warpmc_linalg::{svd, Matrix};
//!
//! let a = Matrix::from_rows(&[[3.0, 0.0], [0.0, -2.0], [0.0, 0.0]]);
//! let res = svd(&a).unwrap();
//!
//! let mut w = res.w().to_vec();
//! w.sort_by(|a, b| b.total_cmp(a));
//! assert!((w[0] - 3.0).abs() < 1e-12);
//! assert!((w[1] - 2.0).abs() < 1e-12);
//! ```
//!
//! # References
//!
//! * Golub and Reinsch (1970). "Singular value decomposition and least squares
//!   solutions." Numerische Mathematik 14.

use crate::error::LinalgError;
use crate::matrix::{try_zeroed, Matrix};

/// Maximum number of QR sweeps spent on a single singular value.
pub const MAX_ITERATIONS: usize = 30;

/// Result of a singular value decomposition.
#[derive(Debug, Clone)]
pub struct Svd {
    u: Matrix,
    w: Vec<f64>,
    v: Matrix,
}

impl Svd {
    /// Left singular vectors, `m x n`.
    #[inline]
    pub fn u(&self) -> &Matrix {
        &self.u
    }

    /// Singular values, one per column of the input. Not sorted.
    #[inline]
    pub fn w(&self) -> &[f64] {
        &self.w
    }

    /// Right singular vectors, `n x n`. Column `k` pairs with `w()[k]`.
    #[inline]
    pub fn v(&self) -> &Matrix {
        &self.v
    }

    /// Index of the smallest singular value.
    pub fn argmin(&self) -> usize {
        let mut best = 0;
        for (i, &s) in self.w.iter().enumerate() {
            if s < self.w[best] {
                best = i;
            }
        }
        best
    }
}

#[inline]
fn sign(a: f64, b: f64) -> f64 {
    if b >= 0.0 {
        a.abs()
    } else {
        -a.abs()
    }
}

/// `sqrt(a² + b²)` without destructive underflow or overflow.
#[inline]
fn pythag(a: f64, b: f64) -> f64 {
    let (absa, absb) = (a.abs(), b.abs());
    if absa > absb {
        let ct = absb / absa;
        absa * (1.0 + ct * ct).sqrt()
    } else if absb == 0.0 {
        0.0
    } else {
        let ct = absa / absb;
        absb * (1.0 + ct * ct).sqrt()
    }
}

/// Compute the singular value decomposition of `a`.
///
/// # Arguments
///
/// * `a` - The input matrix with shape `(m, n)`, `m >= n > 0`.
///
/// # Errors
///
/// * [`LinalgError::InvalidShape`] if `m < n` or `n == 0`.
/// * [`LinalgError::NotConverged`] if a singular value needs more than
///   [`MAX_ITERATIONS`] sweeps.
/// * [`LinalgError::Allocation`] if the work storage cannot be allocated.
pub fn svd(a: &Matrix) -> Result<Svd, LinalgError> {
    svd_with_budget(a, MAX_ITERATIONS)
}

pub(crate) fn svd_with_budget(a: &Matrix, max_iterations: usize) -> Result<Svd, LinalgError> {
    let (m, n) = (a.rows(), a.cols());
    if n == 0 || m < n {
        return Err(LinalgError::InvalidShape { rows: m, cols: n });
    }

    let mut u = a.clone();
    let mut v = Matrix::try_zeros(n, n)?;
    let mut w = try_zeroed(n)?;
    let mut rv1 = try_zeroed(n)?;

    // householder reduction to bidiagonal form
    let (mut g, mut scale, mut anorm) = (0.0f64, 0.0f64, 0.0f64);
    let mut l = 0;
    for i in 0..n {
        l = i + 1;
        rv1[i] = scale * g;
        g = 0.0;
        scale = 0.0;
        if i < m {
            for k in i..m {
                scale += u[(k, i)].abs();
            }
            if scale != 0.0 {
                let mut s = 0.0;
                for k in i..m {
                    u[(k, i)] /= scale;
                    s += u[(k, i)] * u[(k, i)];
                }
                let f = u[(i, i)];
                g = -sign(s.sqrt(), f);
                let h = f * g - s;
                u[(i, i)] = f - g;
                for j in l..n {
                    let mut s = 0.0;
                    for k in i..m {
                        s += u[(k, i)] * u[(k, j)];
                    }
                    let f = s / h;
                    for k in i..m {
                        u[(k, j)] += f * u[(k, i)];
                    }
                }
                for k in i..m {
                    u[(k, i)] *= scale;
                }
            }
        }
        w[i] = scale * g;
        g = 0.0;
        scale = 0.0;
        if i < m && i != n - 1 {
            for k in l..n {
                scale += u[(i, k)].abs();
            }
            if scale != 0.0 {
                let mut s = 0.0;
                for k in l..n {
                    u[(i, k)] /= scale;
                    s += u[(i, k)] * u[(i, k)];
                }
                let f = u[(i, l)];
                g = -sign(s.sqrt(), f);
                let h = f * g - s;
                u[(i, l)] = f - g;
                for k in l..n {
                    rv1[k] = u[(i, k)] / h;
                }
                for j in l..m {
                    let mut s = 0.0;
                    for k in l..n {
                        s += u[(j, k)] * u[(i, k)];
                    }
                    for k in l..n {
                        u[(j, k)] += s * rv1[k];
                    }
                }
                for k in l..n {
                    u[(i, k)] *= scale;
                }
            }
        }
        anorm = anorm.max(w[i].abs() + rv1[i].abs());
    }

    // accumulation of right-hand transformations
    for i in (0..n).rev() {
        if i < n - 1 {
            if g != 0.0 {
                // double division avoids possible underflow
                for j in l..n {
                    v[(j, i)] = (u[(i, j)] / u[(i, l)]) / g;
                }
                for j in l..n {
                    let mut s = 0.0;
                    for k in l..n {
                        s += u[(i, k)] * v[(k, j)];
                    }
                    for k in l..n {
                        v[(k, j)] += s * v[(k, i)];
                    }
                }
            }
            for j in l..n {
                v[(i, j)] = 0.0;
                v[(j, i)] = 0.0;
            }
        }
        v[(i, i)] = 1.0;
        g = rv1[i];
        l = i;
    }

    // accumulation of left-hand transformations
    for i in (0..m.min(n)).rev() {
        let l = i + 1;
        let g = w[i];
        for j in l..n {
            u[(i, j)] = 0.0;
        }
        if g != 0.0 {
            let g = 1.0 / g;
            for j in l..n {
                let mut s = 0.0;
                for k in l..m {
                    s += u[(k, i)] * u[(k, j)];
                }
                let f = (s / u[(i, i)]) * g;
                for k in i..m {
                    u[(k, j)] += f * u[(k, i)];
                }
            }
            for j in i..m {
                u[(j, i)] *= g;
            }
        } else {
            for j in i..m {
                u[(j, i)] = 0.0;
            }
        }
        u[(i, i)] += 1.0;
    }

    // diagonalization of the bidiagonal form
    for k in (0..n).rev() {
        let mut converged = false;
        for its in 0..max_iterations {
            // test for splitting; rv1[0] is always zero
            let mut l = k;
            let mut cancel = true;
            loop {
                if l == 0 || rv1[l].abs() + anorm == anorm {
                    cancel = false;
                    break;
                }
                if w[l - 1].abs() + anorm == anorm {
                    break;
                }
                l -= 1;
            }

            if cancel {
                // cancellation of rv1[l]
                let nm = l - 1;
                let (mut c, mut s) = (0.0, 1.0);
                for i in l..=k {
                    let f = s * rv1[i];
                    rv1[i] *= c;
                    if f.abs() + anorm == anorm {
                        break;
                    }
                    let g = w[i];
                    let h = pythag(f, g);
                    w[i] = h;
                    let h = 1.0 / h;
                    c = g * h;
                    s = -f * h;
                    for j in 0..m {
                        let y = u[(j, nm)];
                        let z = u[(j, i)];
                        u[(j, nm)] = y * c + z * s;
                        u[(j, i)] = z * c - y * s;
                    }
                }
            }

            let z = w[k];
            if l == k {
                // singular values are made non-negative
                if z < 0.0 {
                    w[k] = -z;
                    for j in 0..n {
                        v[(j, k)] = -v[(j, k)];
                    }
                }
                converged = true;
                break;
            }

            if its + 1 == max_iterations {
                break;
            }

            // shift from the bottom 2x2 minor
            let mut x = w[l];
            let nm = k - 1;
            let mut y = w[nm];
            let mut g = rv1[nm];
            let mut h = rv1[k];
            let mut f = ((y - z) * (y + z) + (g - h) * (g + h)) / (2.0 * h * y);
            g = pythag(f, 1.0);
            f = ((x - z) * (x + z) + h * ((y / (f + sign(g, f))) - h)) / x;

            // next QR transformation
            let (mut c, mut s) = (1.0, 1.0);
            for j in l..=nm {
                let i = j + 1;
                g = rv1[i];
                y = w[i];
                h = s * g;
                g *= c;
                let mut z = pythag(f, h);
                rv1[j] = z;
                c = f / z;
                s = h / z;
                f = x * c + g * s;
                g = g * c - x * s;
                h = y * s;
                y *= c;
                for jj in 0..n {
                    let vx = v[(jj, j)];
                    let vz = v[(jj, i)];
                    v[(jj, j)] = vx * c + vz * s;
                    v[(jj, i)] = vz * c - vx * s;
                }
                z = pythag(f, h);
                w[j] = z;
                // rotation can be arbitrary if z is zero
                if z != 0.0 {
                    z = 1.0 / z;
                    c = f * z;
                    s = h * z;
                }
                f = c * g + s * y;
                x = c * y - s * g;
                for jj in 0..m {
                    let uy = u[(jj, j)];
                    let uz = u[(jj, i)];
                    u[(jj, j)] = uy * c + uz * s;
                    u[(jj, i)] = uz * c - uy * s;
                }
            }
            rv1[l] = 0.0;
            rv1[k] = f;
            w[k] = x;
        }

        if !converged {
            log::debug!(
                "svd: singular value {} did not converge in {} iterations",
                k,
                max_iterations
            );
            return Err(LinalgError::NotConverged {
                index: k,
                iterations: max_iterations,
            });
        }
    }

    Ok(Svd { u, w, v })
}
