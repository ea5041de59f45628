use std::collections::TryReserveError;

/// An error type for the linear algebra kernels.
#[derive(thiserror::Error, Debug)]
pub enum LinalgError {
    /// The matrix shape is not supported by the operation.
    #[error("Invalid matrix shape {rows}x{cols}: expected rows >= cols > 0")]
    InvalidShape {
        /// Number of rows of the offending matrix.
        rows: usize,
        /// Number of columns of the offending matrix.
        cols: usize,
    },

    /// The data length does not match the requested shape.
    #[error("Data length ({0}) does not match the matrix size ({1})")]
    InvalidDataLength(usize, usize),

    /// The inner dimensions of a product do not agree.
    #[error("Cannot multiply a {0}x{1} matrix by a {2}x{3} matrix")]
    DimensionMismatch(usize, usize, usize, usize),

    /// A singular value did not converge within the iteration budget.
    #[error("Singular value {index} did not converge after {iterations} iterations")]
    NotConverged {
        /// Index of the singular value being refined.
        index: usize,
        /// Number of iterations spent on it.
        iterations: usize,
    },

    /// A singular value is too close to zero to be inverted.
    #[error("Matrix is rank deficient: singular value {index} is {value:e}")]
    RankDeficient {
        /// Index of the near-zero singular value.
        index: usize,
        /// The singular value itself.
        value: f64,
    },

    /// Work storage could not be allocated.
    #[error("Failed to allocate work storage")]
    Allocation(#[from] TryReserveError),
}
