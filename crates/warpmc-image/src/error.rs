/// An error type for the image module.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ImageError {
    /// The row stride is smaller than the plane width.
    #[error("Stride ({0}) is smaller than the plane width ({1})")]
    InvalidStride(usize, usize),

    /// The sample buffer is too short for the plane geometry.
    #[error("Data length ({0}) does not match the plane size ({1})")]
    InvalidDataLength(usize, usize),

    /// The plane has no samples.
    #[error("Plane has zero width or height")]
    EmptyImage,

    /// The bit depth is not supported by the sample type.
    #[error("Unsupported bit depth {0}")]
    UnsupportedBitDepth(u32),

    /// A region does not fit inside its plane.
    #[error("Region at ({x}, {y}) of size {width}x{height} exceeds the {plane_width}x{plane_height} plane")]
    RegionOutOfBounds {
        /// Left column of the region.
        x: usize,
        /// Top row of the region.
        y: usize,
        /// Width of the region.
        width: usize,
        /// Height of the region.
        height: usize,
        /// Width of the enclosing plane.
        plane_width: usize,
        /// Height of the enclosing plane.
        plane_height: usize,
    },

    /// A reference scale factor is out of range.
    #[error("Invalid reference scale {0}")]
    InvalidScale(i32),
}
