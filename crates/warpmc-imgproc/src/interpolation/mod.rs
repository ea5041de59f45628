//! Fixed-point sub-pixel interpolation of reference samples.
//!
//! Positions are given in 1/64 pixel units. The kernel used for a position depends
//! on how much filter support is available around it:
//!
//! - **Corner / edge**: nearest corner sample or 2-tap linear along the edge
//! - **N-tap**: separable 6-tap table filter when the full support is inside
//! - **Cubic**: separable analytic cubic convolution with a 4 sample support
//! - **Bilinear**: everything else
//!
//! All kernels read through clamped accessors, so no position can read outside
//! the reference plane.

mod bilinear;
mod cubic;
pub(crate) mod interpolate;
mod ntap;

pub use interpolate::{interpolate_pixel, BorderRule};
