use serde::{Deserialize, Serialize};

use crate::error::ImageError;
use crate::pixel::Pixel;

/// Plane size in pixels
///
/// # Examples
///
/// ```
/// use warpmc_image::ImageSize;
///
/// let size = ImageSize {
///   width: 10,
///   height: 20,
/// };
///
/// assert_eq!(size.width, 10);
/// assert_eq!(size.height, 20);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageSize {
    /// Width of the plane in pixels
    pub width: usize,
    /// Height of the plane in pixels
    pub height: usize,
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "ImageSize {{ width: {}, height: {} }}",
            self.width, self.height
        )
    }
}

impl From<[usize; 2]> for ImageSize {
    fn from(size: [usize; 2]) -> Self {
        ImageSize {
            width: size[0],
            height: size[1],
        }
    }
}

/// Minimum buffer length holding `size` with the given row stride.
fn required_len(size: ImageSize, stride: usize) -> usize {
    if size.height == 0 {
        0
    } else {
        stride * (size.height - 1) + size.width
    }
}

fn check_geometry(size: ImageSize, stride: usize, len: usize) -> Result<(), ImageError> {
    if size.width == 0 || size.height == 0 {
        return Err(ImageError::EmptyImage);
    }
    if stride < size.width {
        return Err(ImageError::InvalidStride(stride, size.width));
    }
    let required = required_len(size, stride);
    if len < required {
        return Err(ImageError::InvalidDataLength(len, required));
    }
    Ok(())
}

fn check_region(
    x: usize,
    y: usize,
    region: ImageSize,
    plane: ImageSize,
) -> Result<(), ImageError> {
    let fits = region.width > 0
        && region.height > 0
        && x.checked_add(region.width).is_some_and(|r| r <= plane.width)
        && y.checked_add(region.height).is_some_and(|b| b <= plane.height);
    if fits {
        Ok(())
    } else {
        Err(ImageError::RegionOutOfBounds {
            x,
            y,
            width: region.width,
            height: region.height,
            plane_width: plane.width,
            plane_height: plane.height,
        })
    }
}

/// An owned single channel plane of samples stored row by row.
///
/// Rows are `stride` samples apart; samples past `width` in a row are padding and
/// never read.
#[derive(Clone, Debug, PartialEq)]
pub struct Plane<T: Pixel> {
    data: Vec<T>,
    size: ImageSize,
    stride: usize,
}

impl<T: Pixel> Plane<T> {
    /// Create a new tightly packed plane from sample data.
    ///
    /// # Errors
    ///
    /// If the plane is empty or the length of the data does not match the size,
    /// an error is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use warpmc_image::{ImageSize, Plane};
    ///
    /// let plane = Plane::<u8>::new(ImageSize { width: 4, height: 2 }, vec![0u8; 8]).unwrap();
    ///
    /// assert_eq!(plane.width(), 4);
    /// assert_eq!(plane.stride(), 4);
    /// ```
    pub fn new(size: ImageSize, data: Vec<T>) -> Result<Self, ImageError> {
        if data.len() != size.width * size.height {
            return Err(ImageError::InvalidDataLength(
                data.len(),
                size.width * size.height,
            ));
        }
        Self::with_stride(size, size.width, data)
    }

    /// Create a new plane whose rows are `stride` samples apart.
    pub fn with_stride(size: ImageSize, stride: usize, data: Vec<T>) -> Result<Self, ImageError> {
        check_geometry(size, stride, data.len())?;
        Ok(Self { data, size, stride })
    }

    /// Create a new plane filled with `val`.
    pub fn from_size_val(size: ImageSize, val: T) -> Result<Self, ImageError> {
        Self::new(size, vec![val; size.width * size.height])
    }

    /// Create a new plane by evaluating `f(x, y)` at every sample.
    ///
    /// ```
    /// use warpmc_image::{ImageSize, Plane};
    ///
    /// let ramp = Plane::<u16>::from_fn(ImageSize { width: 3, height: 2 }, |x, y| (x + 10 * y) as u16)
    ///     .unwrap();
    /// assert_eq!(ramp.as_slice(), &[0, 1, 2, 10, 11, 12]);
    /// ```
    pub fn from_fn(
        size: ImageSize,
        mut f: impl FnMut(usize, usize) -> T,
    ) -> Result<Self, ImageError> {
        let mut data = Vec::with_capacity(size.width * size.height);
        for y in 0..size.height {
            for x in 0..size.width {
                data.push(f(x, y));
            }
        }
        Self::new(size, data)
    }

    /// The size of the plane in pixels.
    #[inline]
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// The width of the plane in pixels.
    #[inline]
    pub fn width(&self) -> usize {
        self.size.width
    }

    /// The height of the plane in pixels.
    #[inline]
    pub fn height(&self) -> usize {
        self.size.height
    }

    /// The distance between rows in samples.
    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// The raw sample buffer, including row padding.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Get the sample at `(x, y)`.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> T {
        self.data[y * self.stride + x]
    }

    /// Borrow the whole plane as a read-only view.
    pub fn view(&self) -> PlaneRef<'_, T> {
        PlaneRef {
            data: &self.data,
            size: self.size,
            stride: self.stride,
        }
    }

    /// Borrow the whole plane as a mutable view.
    pub fn view_mut(&mut self) -> PlaneMut<'_, T> {
        PlaneMut {
            data: &mut self.data,
            size: self.size,
            stride: self.stride,
        }
    }
}

/// A borrowed read-only view of a plane.
///
/// Views are `Copy` and can be shared across threads.
#[derive(Clone, Copy, Debug)]
pub struct PlaneRef<'a, T: Pixel> {
    data: &'a [T],
    size: ImageSize,
    stride: usize,
}

impl<'a, T: Pixel> PlaneRef<'a, T> {
    /// Wrap an externally owned sample buffer.
    ///
    /// # Errors
    ///
    /// Returns an error if the plane is empty, the stride is smaller than the
    /// width or the buffer is too short.
    pub fn new(data: &'a [T], size: ImageSize, stride: usize) -> Result<Self, ImageError> {
        check_geometry(size, stride, data.len())?;
        Ok(Self { data, size, stride })
    }

    /// The size of the view in pixels.
    #[inline]
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// The width of the view in pixels.
    #[inline]
    pub fn width(&self) -> usize {
        self.size.width
    }

    /// The height of the view in pixels.
    #[inline]
    pub fn height(&self) -> usize {
        self.size.height
    }

    /// The distance between rows in samples.
    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Get the sample at `(x, y)`.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> T {
        self.data[y * self.stride + x]
    }

    /// Get the sample nearest to `(x, y)`, widened to `i32`.
    ///
    /// Coordinates outside the view are clamped to the closest edge, which
    /// behaves like an infinitely replicated border.
    #[inline]
    pub fn clamped(&self, x: i64, y: i64) -> i32 {
        let x = x.clamp(0, self.size.width as i64 - 1) as usize;
        let y = y.clamp(0, self.size.height as i64 - 1) as usize;
        self.data[y * self.stride + x].to_i32()
    }

    /// The samples of row `y`, without padding.
    #[inline]
    pub fn row(&self, y: usize) -> &'a [T] {
        let start = y * self.stride;
        &self.data[start..start + self.size.width]
    }

    /// A view of the `size` region whose top left corner is `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::RegionOutOfBounds`] if the region does not fit.
    pub fn region(&self, x: usize, y: usize, size: ImageSize) -> Result<PlaneRef<'a, T>, ImageError> {
        check_region(x, y, size, self.size)?;
        let start = y * self.stride + x;
        let end = start + required_len(size, self.stride);
        Ok(PlaneRef {
            data: &self.data[start..end],
            size,
            stride: self.stride,
        })
    }
}

/// A borrowed mutable view of a plane.
#[derive(Debug)]
pub struct PlaneMut<'a, T: Pixel> {
    data: &'a mut [T],
    size: ImageSize,
    stride: usize,
}

impl<'a, T: Pixel> PlaneMut<'a, T> {
    /// Wrap an externally owned mutable sample buffer.
    ///
    /// # Errors
    ///
    /// Returns an error if the plane is empty, the stride is smaller than the
    /// width or the buffer is too short.
    pub fn new(data: &'a mut [T], size: ImageSize, stride: usize) -> Result<Self, ImageError> {
        check_geometry(size, stride, data.len())?;
        Ok(Self { data, size, stride })
    }

    /// The size of the view in pixels.
    #[inline]
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// The width of the view in pixels.
    #[inline]
    pub fn width(&self) -> usize {
        self.size.width
    }

    /// The height of the view in pixels.
    #[inline]
    pub fn height(&self) -> usize {
        self.size.height
    }

    /// The distance between rows in samples.
    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Get the sample at `(x, y)`.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> T {
        self.data[y * self.stride + x]
    }

    /// Set the sample at `(x, y)`.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, val: T) {
        self.data[y * self.stride + x] = val;
    }

    /// The samples of row `y`, without padding.
    #[inline]
    pub fn row_mut(&mut self, y: usize) -> &mut [T] {
        let start = y * self.stride;
        &mut self.data[start..start + self.size.width]
    }

    /// A read-only view of the same samples.
    pub fn view(&self) -> PlaneRef<'_, T> {
        PlaneRef {
            data: &*self.data,
            size: self.size,
            stride: self.stride,
        }
    }

    /// A mutable view of the `size` region whose top left corner is `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::RegionOutOfBounds`] if the region does not fit.
    pub fn region_mut(
        &mut self,
        x: usize,
        y: usize,
        size: ImageSize,
    ) -> Result<PlaneMut<'_, T>, ImageError> {
        check_region(x, y, size, self.size)?;
        let start = y * self.stride + x;
        let end = start + required_len(size, self.stride);
        Ok(PlaneMut {
            data: &mut self.data[start..end],
            size,
            stride: self.stride,
        })
    }

    /// Split the view into the rows above `row` and the rows from `row` on.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::RegionOutOfBounds`] unless `0 < row < height`.
    ///
    /// # Examples
    ///
    /// ```
    /// use warpmc_image::{ImageSize, Plane};
    ///
    /// let mut plane = Plane::<u8>::from_size_val(ImageSize { width: 2, height: 3 }, 0).unwrap();
    /// let (mut top, mut bottom) = plane.view_mut().split_at_row(1).unwrap();
    /// top.set(0, 0, 1);
    /// bottom.set(1, 1, 2);
    ///
    /// assert_eq!(plane.as_slice(), &[1, 0, 0, 0, 0, 2]);
    /// ```
    pub fn split_at_row(self, row: usize) -> Result<(PlaneMut<'a, T>, PlaneMut<'a, T>), ImageError> {
        if row == 0 || row >= self.size.height {
            return Err(ImageError::RegionOutOfBounds {
                x: 0,
                y: row,
                width: self.size.width,
                height: self.size.height.saturating_sub(row),
                plane_width: self.size.width,
                plane_height: self.size.height,
            });
        }
        let (top, bottom) = self.data.split_at_mut(row * self.stride);
        let top = PlaneMut {
            data: top,
            size: ImageSize {
                width: self.size.width,
                height: row,
            },
            stride: self.stride,
        };
        let bottom = PlaneMut {
            data: bottom,
            size: ImageSize {
                width: self.size.width,
                height: self.size.height - row,
            },
            stride: self.stride,
        };
        Ok((top, bottom))
    }
}
