//! Sub-pixel filter banks
//!
//! Two independently indexed fixed-point banks: a 6-tap, 64-phase bank used by the
//! per-pixel resampler and an 8-tap, 192-phase bank used by the block warp filter.

/// Filter kernels
pub mod kernels;

pub use kernels::{
    PIXEL_FILTER_TAPS, WARPED_FILTER, WARPED_PIXEL_FILTER, WARP_FILTER_PHASES, WARP_FILTER_TAPS,
};
