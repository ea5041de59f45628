use crate::model::TransformationType;

/// An error type for the motion model module.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum MotionError {
    /// The input and output point buffers have different lengths.
    #[error("Point buffer length ({0}) does not match the projection buffer length ({1})")]
    LengthMismatch(usize, usize),

    /// A floating point parameter cannot be represented in fixed point.
    #[error("Parameter {index} ({value}) cannot be represented in fixed point")]
    ParameterOutOfRange {
        /// Slot of the parameter in the canonical layout.
        index: usize,
        /// The offending floating point value.
        value: f64,
    },

    /// The separable warp filter does not handle this model type.
    #[error("The separable warp filter does not support {0:?} models")]
    UnsupportedModel(TransformationType),

    /// The leading diagonal term of the model is zero.
    #[error("The model has a zero horizontal scale term")]
    ZeroScale,

    /// The shear parameters exceed the reach of the 8-tap filter.
    #[error(
        "Shear parameters out of range: alpha={alpha}, beta={beta}, gamma={gamma}, delta={delta}"
    )]
    ShearOutOfRange {
        /// Horizontal zoom offset.
        alpha: i64,
        /// Horizontal shear.
        beta: i64,
        /// Vertical shear.
        gamma: i64,
        /// Vertical zoom offset.
        delta: i64,
    },
}
