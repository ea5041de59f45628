use warpmc_linalg::LinalgError;
use warpmc_motion::{MotionError, TransformationType};

/// An error type for the fitting module.
#[derive(thiserror::Error, Debug)]
pub enum FitError {
    /// Fewer correspondences than the model type needs.
    #[error("{ty:?} models need at least {required} correspondences, got {actual}")]
    InsufficientCorrespondences {
        /// The model type being fitted.
        ty: TransformationType,
        /// Minimum number of correspondences for the model type.
        required: usize,
        /// Number of correspondences given.
        actual: usize,
    },

    /// The source and destination point sets have different lengths.
    #[error("Source points ({0}) and destination points ({1}) differ in length")]
    LengthMismatch(usize, usize),

    /// All points of a set coincide, so the set cannot be normalized.
    #[error("Degenerate point set: all points coincide")]
    Degenerate,

    /// The homography system has more than one solution.
    #[error("Degenerate homography system: null space has more than one dimension")]
    DegenerateHomography,

    /// The fitted model cannot be warped with the separable block filter.
    #[error("Fitted model is incompatible with the block warp filter: {0}")]
    IncompatibleFastPath(#[source] MotionError),

    /// Error from the linear algebra kernels.
    #[error(transparent)]
    Linalg(#[from] LinalgError),

    /// Error from the motion model.
    #[error(transparent)]
    Model(#[from] MotionError),
}
