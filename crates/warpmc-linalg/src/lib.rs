#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Error types for the linear algebra kernels.
pub mod error;

/// Owned dense row-major matrix.
pub mod matrix;

/// Moore-Penrose pseudo-inverse built on top of the SVD.
pub mod pinv;

/// Singular value decomposition of general `m x n` matrices.
pub mod svd;

pub use crate::error::LinalgError;
pub use crate::matrix::Matrix;
pub use crate::pinv::{pseudo_inverse, SINGULAR_VALUE_EPSILON};
pub use crate::svd::{svd, Svd, MAX_ITERATIONS};
