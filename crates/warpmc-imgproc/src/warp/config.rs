use serde::{Deserialize, Serialize};
use warpmc_image::{check_bit_depth, ImageError, Pixel, PlaneMut};
use warpmc_motion::Subsampling;

use crate::interpolation::BorderRule;

/// Scale of the reference plane relative to the predicted plane, in 1/16 units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReferenceScale {
    /// Horizontal scale.
    pub x: i32,
    /// Vertical scale.
    pub y: i32,
}

impl ReferenceScale {
    /// Same resolution as the predicted plane.
    pub const UNIT: Self = Self { x: 16, y: 16 };

    /// Whether the reference has the resolution of the predicted plane.
    pub fn is_unit(&self) -> bool {
        *self == Self::UNIT
    }
}

impl Default for ReferenceScale {
    fn default() -> Self {
        Self::UNIT
    }
}

/// Parameters shared by the warp operations.
///
/// # Example
///
/// ```
/// use warpmc_imgproc::warp::WarpConfig;
///
/// let config: WarpConfig = serde_json::from_str(r#"{ "bit_depth": 10, "compound": true }"#).unwrap();
/// assert_eq!(config.bit_depth, 10);
/// assert!(config.scale.is_unit());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WarpConfig {
    /// Bit depth of the samples.
    pub bit_depth: u32,
    /// Chroma subsampling of the predicted plane.
    pub subsampling: Subsampling,
    /// Scale of the reference plane.
    pub scale: ReferenceScale,
    /// Edge classification of the per-pixel path.
    pub border_rule: BorderRule,
    /// Average the prediction with the samples already in the destination.
    pub compound: bool,
}

impl Default for WarpConfig {
    fn default() -> Self {
        Self {
            bit_depth: 8,
            subsampling: Subsampling::NONE,
            scale: ReferenceScale::UNIT,
            border_rule: BorderRule::Inclusive,
            compound: false,
        }
    }
}

impl WarpConfig {
    /// A default configuration for samples of `bit_depth` bits.
    pub fn with_bit_depth(bit_depth: u32) -> Self {
        Self {
            bit_depth,
            ..Default::default()
        }
    }

    /// Validate the configuration and the destination placement for samples of
    /// type `T`.
    pub(crate) fn validate<T: Pixel>(
        &self,
        pred: &PlaneMut<'_, T>,
        position: (usize, usize),
    ) -> Result<(), ImageError> {
        check_bit_depth::<T>(self.bit_depth)?;
        for s in [self.scale.x, self.scale.y] {
            if s <= 0 {
                return Err(ImageError::InvalidScale(s));
            }
        }

        // frame coordinates are projected as 32-bit integers
        let (p_col, p_row) = position;
        let limit = i32::MAX as usize / 4;
        let fits = p_col
            .checked_add(pred.width())
            .is_some_and(|r| r <= limit)
            && p_row.checked_add(pred.height()).is_some_and(|b| b <= limit);
        if !fits {
            return Err(ImageError::RegionOutOfBounds {
                x: p_col,
                y: p_row,
                width: pred.width(),
                height: pred.height(),
                plane_width: limit,
                plane_height: limit,
            });
        }
        Ok(())
    }
}

/// Write `v` at `(x, y)`, averaging with the current sample for compound prediction.
#[inline]
pub(crate) fn store<T: Pixel>(pred: &mut PlaneMut<'_, T>, x: usize, y: usize, v: i32, compound: bool) {
    let v = if compound {
        (pred.pixel(x, y).to_i32() + v + 1) >> 1
    } else {
        v
    };
    pred.set(x, y, T::from_clipped(v));
}

#[cfg(test)]
mod tests {
    use super::*;
    use warpmc_image::Plane;

    #[test]
    fn test_default_config() {
        let config = WarpConfig::default();
        assert_eq!(config.bit_depth, 8);
        assert_eq!(config.subsampling, Subsampling::NONE);
        assert!(config.scale.is_unit());
        assert_eq!(config.border_rule, BorderRule::Inclusive);
        assert!(!config.compound);
    }

    #[test]
    fn test_validate() -> Result<(), ImageError> {
        let mut pred = Plane::<u8>::from_size_val([8, 8].into(), 0)?;
        let pred = pred.view_mut();
        assert!(WarpConfig::default().validate(&pred, (0, 0)).is_ok());
        assert_eq!(
            WarpConfig::with_bit_depth(10).validate(&pred, (0, 0)),
            Err(ImageError::UnsupportedBitDepth(10))
        );

        let config = WarpConfig {
            scale: ReferenceScale { x: 16, y: 0 },
            ..Default::default()
        };
        assert_eq!(config.validate(&pred, (0, 0)), Err(ImageError::InvalidScale(0)));

        let res = WarpConfig::default().validate(&pred, (usize::MAX, 0));
        assert!(matches!(res, Err(ImageError::RegionOutOfBounds { .. })));
        Ok(())
    }

    #[test]
    fn test_compound_store_rounds_up() -> Result<(), ImageError> {
        let mut plane = Plane::<u16>::from_size_val([1, 1].into(), 10)?;
        let mut view = plane.view_mut();
        store(&mut view, 0, 0, 13, true);
        assert_eq!(view.pixel(0, 0), 12);
        store(&mut view, 0, 0, 7, false);
        assert_eq!(view.pixel(0, 0), 7);
        Ok(())
    }
}
