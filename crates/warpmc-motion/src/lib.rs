#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Error types for the motion model module.
pub mod error;

/// Fixed-point precision constants and rounding primitives.
pub mod fixed;

/// Motion model types and parameter integerization.
pub mod model;

/// Projection of integer pixel positions through a motion model.
pub mod projection;

/// Shear factorization used by the separable warp filter.
pub mod shear;

pub use crate::error::MotionError;
pub use crate::fixed::*;
pub use crate::model::{MotionModel, TransformationType};
pub use crate::projection::{project_points, Subsampling};
pub use crate::shear::ShearParams;
