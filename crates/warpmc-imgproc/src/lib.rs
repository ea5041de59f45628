#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// sub-pixel filter banks module.
pub mod filter;

/// utilities for sub-pixel interpolation.
pub mod interpolation;

/// model quality metrics module.
pub mod metrics;

/// warped prediction module.
pub mod warp;
