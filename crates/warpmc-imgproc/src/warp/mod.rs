//! Motion compensated prediction by warping a reference plane.
//!
//! - [`warp_plane_exact`]: per-pixel projection and interpolation, any model
//! - [`warp_affine`]: separable 8x8 block filter for rotation-zoom and affine models
//! - [`warp_plane`]: picks the block filter when the model allows it and falls
//!   back to the per-pixel path otherwise
//!
//! # Examples
//!
//! Predicting a block with a slight zoom:
//!
//! ```
//! use warpmc_image::{ImageSize, Plane};
//! use warpmc_imgproc::warp::{warp_plane, WarpConfig};
//! use warpmc_motion::MotionModel;
//!
//! let reference = Plane::<u8>::from_fn(ImageSize { width: 64, height: 64 }, |x, y| (x + y) as u8)?;
//! let mut pred = Plane::<u8>::from_size_val(ImageSize { width: 16, height: 16 }, 0)?;
//!
//! let model = MotionModel::RotZoom { translation: [0, 0], scale_rot: [66000, 0] };
//! warp_plane(&model, &reference.view(), &mut pred.view_mut(), (8, 8), &WarpConfig::default())?;
//! # Ok::<(), warpmc_image::ImageError>(())
//! ```

mod affine;
mod config;
mod dispatch;
mod exact;

pub use affine::warp_affine;
pub use config::{ReferenceScale, WarpConfig};
pub use dispatch::warp_plane;
pub use exact::warp_plane_exact;
