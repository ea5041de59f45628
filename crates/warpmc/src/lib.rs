#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

#[doc(inline)]
pub use warpmc_fit as fit;

#[doc(inline)]
pub use warpmc_image as image;

#[doc(inline)]
pub use warpmc_imgproc as imgproc;

#[doc(inline)]
pub use warpmc_linalg as linalg;

#[doc(inline)]
pub use warpmc_motion as motion;
