#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Error types for the image module.
pub mod error;

/// Owned planes and borrowed plane views.
pub mod plane;

/// Pixel sample types and bit depth handling.
pub mod pixel;

pub use crate::error::ImageError;
pub use crate::pixel::{check_bit_depth, clip_pixel, Pixel};
pub use crate::plane::{ImageSize, Plane, PlaneMut, PlaneRef};
