use std::ops::{Index, IndexMut};

use crate::error::LinalgError;

/// Allocate a zero-filled vector, reporting allocation failures instead of aborting.
pub(crate) fn try_zeroed(len: usize) -> Result<Vec<f64>, LinalgError> {
    let mut data = Vec::new();
    data.try_reserve_exact(len)?;
    data.resize(len, 0.0);
    Ok(data)
}

/// A dense matrix of `f64` stored in row-major order.
///
/// Elements are addressed with `(row, col)` tuples:
///
/// ```
/// use warpmc_linalg::Matrix;
///
/// let mut m = Matrix::try_zeros(2, 3).unwrap();
/// m[(1, 2)] = 5.0;
///
/// assert_eq!(m.rows(), 2);
/// assert_eq!(m.cols(), 3);
/// assert_eq!(m.as_slice()[5], 5.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Matrix {
    data: Vec<f64>,
    rows: usize,
    cols: usize,
}

impl Matrix {
    /// Create a zero-filled matrix.
    ///
    /// # Errors
    ///
    /// Returns [`LinalgError::Allocation`] if the storage cannot be reserved.
    pub fn try_zeros(rows: usize, cols: usize) -> Result<Self, LinalgError> {
        Ok(Self {
            data: try_zeroed(rows * cols)?,
            rows,
            cols,
        })
    }

    /// Create a matrix from row-major data.
    ///
    /// # Errors
    ///
    /// Returns [`LinalgError::InvalidDataLength`] if `data.len() != rows * cols`.
    pub fn from_row_slice(rows: usize, cols: usize, data: &[f64]) -> Result<Self, LinalgError> {
        if data.len() != rows * cols {
            return Err(LinalgError::InvalidDataLength(data.len(), rows * cols));
        }
        Ok(Self {
            data: data.to_vec(),
            rows,
            cols,
        })
    }

    /// Create a matrix from an array of rows.
    pub fn from_rows<const R: usize, const C: usize>(rows: &[[f64; C]; R]) -> Self {
        Self {
            data: rows.iter().flatten().copied().collect(),
            rows: R,
            cols: C,
        }
    }

    /// Create an `n x n` identity matrix.
    pub fn try_identity(n: usize) -> Result<Self, LinalgError> {
        let mut m = Self::try_zeros(n, n)?;
        for i in 0..n {
            m[(i, i)] = 1.0;
        }
        Ok(m)
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// The underlying row-major data.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// A single row as a slice.
    pub fn row(&self, r: usize) -> &[f64] {
        &self.data[r * self.cols..(r + 1) * self.cols]
    }

    /// Copy a column into a new vector.
    pub fn column(&self, c: usize) -> Vec<f64> {
        (0..self.rows).map(|r| self[(r, c)]).collect()
    }

    /// Return the transposed matrix.
    pub fn transpose(&self) -> Result<Self, LinalgError> {
        let mut t = Self::try_zeros(self.cols, self.rows)?;
        for r in 0..self.rows {
            for c in 0..self.cols {
                t[(c, r)] = self[(r, c)];
            }
        }
        Ok(t)
    }

    /// Compute the matrix product `self * rhs`.
    ///
    /// # Errors
    ///
    /// Returns [`LinalgError::DimensionMismatch`] if the inner dimensions differ.
    pub fn matmul(&self, rhs: &Matrix) -> Result<Self, LinalgError> {
        if self.cols != rhs.rows {
            return Err(LinalgError::DimensionMismatch(
                self.rows, self.cols, rhs.rows, rhs.cols,
            ));
        }
        let mut out = Self::try_zeros(self.rows, rhs.cols)?;
        for r in 0..self.rows {
            for c in 0..rhs.cols {
                let mut sum = 0.0;
                for k in 0..self.cols {
                    sum += self[(r, k)] * rhs[(k, c)];
                }
                out[(r, c)] = sum;
            }
        }
        Ok(out)
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    #[inline]
    fn index(&self, (r, c): (usize, usize)) -> &f64 {
        assert!(
            r < self.rows && c < self.cols,
            "index ({r}, {c}) out of bounds for a {}x{} matrix",
            self.rows,
            self.cols
        );
        &self.data[r * self.cols + c]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    #[inline]
    fn index_mut(&mut self, (r, c): (usize, usize)) -> &mut f64 {
        assert!(
            r < self.rows && c < self.cols,
            "index ({r}, {c}) out of bounds for a {}x{} matrix",
            self.rows,
            self.cols
        );
        &mut self.data[r * self.cols + c]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matmul() -> Result<(), LinalgError> {
        let a = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]]);
        let b = Matrix::from_rows(&[[1.0, 0.0, -1.0], [2.0, 1.0, 0.0]]);
        let c = a.matmul(&b)?;
        assert_eq!(c.rows(), 3);
        assert_eq!(c.cols(), 3);
        assert_eq!(
            c.as_slice(),
            &[5.0, 2.0, -1.0, 11.0, 4.0, -3.0, 17.0, 6.0, -5.0]
        );
        Ok(())
    }

    #[test]
    fn test_matmul_dimension_mismatch() {
        let a = Matrix::from_rows(&[[1.0, 2.0]]);
        let res = a.matmul(&a);
        assert!(matches!(res, Err(LinalgError::DimensionMismatch(1, 2, 1, 2))));
    }

    #[test]
    fn test_transpose() -> Result<(), LinalgError> {
        let a = Matrix::from_row_slice(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0])?;
        let t = a.transpose()?;
        assert_eq!(t.rows(), 3);
        assert_eq!(t.row(0), &[1.0, 4.0]);
        assert_eq!(t.column(1), vec![4.0, 5.0, 6.0]);
        Ok(())
    }

    #[test]
    fn test_from_row_slice_invalid() {
        let res = Matrix::from_row_slice(2, 2, &[1.0, 2.0, 3.0]);
        assert!(matches!(res, Err(LinalgError::InvalidDataLength(3, 4))));
    }

    #[test]
    #[should_panic(expected = "index (0, 2) out of bounds for a 2x2 matrix")]
    fn test_index_column_out_of_bounds() {
        let a = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]);
        let _ = a[(0, 2)];
    }
}
