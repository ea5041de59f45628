use num_traits::{AsPrimitive, PrimInt};

use crate::error::ImageError;

/// Trait for pixel sample types.
///
/// Samples are widened to `i32` for filtering and narrowed back once the result
/// has been clipped to the valid range of the bit depth.
///
/// Send and Sync are required to warp disjoint regions from several threads.
pub trait Pixel:
    PrimInt + AsPrimitive<i32> + Default + std::fmt::Debug + Send + Sync + 'static
{
    /// Bit depths the sample type can hold.
    const BIT_DEPTHS: &'static [u32];

    /// Narrow a value already clipped to `[0, 2^bd - 1]`.
    fn from_clipped(v: i32) -> Self;

    /// Widen the sample for filtering.
    #[inline(always)]
    fn to_i32(self) -> i32 {
        self.as_()
    }
}

impl Pixel for u8 {
    const BIT_DEPTHS: &'static [u32] = &[8];

    #[inline(always)]
    fn from_clipped(v: i32) -> Self {
        v as u8
    }
}

impl Pixel for u16 {
    const BIT_DEPTHS: &'static [u32] = &[8, 10, 12];

    #[inline(always)]
    fn from_clipped(v: i32) -> Self {
        v as u16
    }
}

/// Clip a filtered value to the valid range of `bit_depth`.
///
/// ```
/// use warpmc_image::clip_pixel;
///
/// assert_eq!(clip_pixel(300, 8), 255);
/// assert_eq!(clip_pixel(-4, 10), 0);
/// assert_eq!(clip_pixel(1000, 10), 1000);
/// ```
#[inline(always)]
pub fn clip_pixel(v: i32, bit_depth: u32) -> i32 {
    v.clamp(0, (1 << bit_depth) - 1)
}

/// Check that `T` can carry samples of `bit_depth`.
///
/// # Errors
///
/// Returns [`ImageError::UnsupportedBitDepth`] otherwise.
pub fn check_bit_depth<T: Pixel>(bit_depth: u32) -> Result<(), ImageError> {
    if T::BIT_DEPTHS.contains(&bit_depth) {
        Ok(())
    } else {
        Err(ImageError::UnsupportedBitDepth(bit_depth))
    }
}
