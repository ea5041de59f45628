#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Error types for the fitting module.
pub mod error;

/// Fitting of affine models.
pub mod affine;

/// Fitting of homographies.
pub mod homography;

/// Fitting and integerization of any model type.
pub mod projection;

/// Fitting of rotation-zoom models.
pub mod rotzoom;

/// Fitting of translations.
pub mod translation;

mod normalize;

pub use crate::affine::find_affine;
pub use crate::error::FitError;
pub use crate::homography::find_homography;
pub use crate::projection::find_projection;
pub use crate::rotzoom::find_rotzoom;
pub use crate::translation::find_translation;
