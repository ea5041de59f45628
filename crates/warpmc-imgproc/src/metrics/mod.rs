//! Scoring how well a motion model predicts an observed block.
//!
//! The per-sample error is a fixed-point `|e|^0.7` curve, so large residuals are
//! penalized sub-linearly. [`warp_error_advantage`] compares the warped prediction
//! against the co-located reference block.

mod advantage;
mod error_measure;
mod lut;

pub use advantage::warp_error_advantage;
pub use error_measure::error_measure;
