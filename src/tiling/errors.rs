//! Custom error types for tiling and reconstruction

use std::fmt;
use std::io;

/// Errors raised by the tiling, persistence and stitching stages
#[derive(Debug)]
pub enum PatchError {
    /// Storage could not be allocated or written
    StorageUnavailable(io::Error),
    /// Patch encoding or decoding failure
    ImageError(image::ImageError),
    /// Patch size must be a positive number of pixels
    InvalidPatchSize(usize),
    /// Overlap fraction outside the half-open range [0, 1)
    InvalidOverlap(f64),
    /// Stride must be at least one pixel
    InvalidStride,
    /// A spatial dimension was zero
    EmptyDimension(&'static str),
    /// A result's spatial extent disagrees with its window
    ShapeMismatch {
        /// Expected (height, width) of the window
        expected: (usize, usize),
        /// Actual (height, width) of the supplied result
        actual: (usize, usize),
    },
    /// A result's channel count disagrees with the output buffer
    ChannelMismatch {
        /// Channel count of the output buffer
        expected: usize,
        /// Channel count of the supplied result
        actual: usize,
    },
    /// The result sequence length differs from the offset list length
    PatchCountMismatch {
        /// Number of offsets in the tiling plan
        expected: usize,
        /// Number of results actually observed
        actual: usize,
    },
    /// Session storage was already released
    SessionReleased,
    /// Generic error with message
    GenericError(String),
}

impl fmt::Display for PatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatchError::StorageUnavailable(e) => write!(f, "Storage unavailable: {}", e),
            PatchError::ImageError(e) => write!(f, "Image codec error: {}", e),
            PatchError::InvalidPatchSize(s) => write!(f, "Invalid patch size: {}", s),
            PatchError::InvalidOverlap(p) => write!(f, "Overlap fraction must be in [0, 1): {}", p),
            PatchError::InvalidStride => write!(f, "Stride must be at least 1"),
            PatchError::EmptyDimension(axis) => write!(f, "Dimension '{}' must be at least 1", axis),
            PatchError::ShapeMismatch { expected, actual } => write!(
                f,
                "Result shape {}x{} does not match window {}x{}",
                actual.0, actual.1, expected.0, expected.1
            ),
            PatchError::ChannelMismatch { expected, actual } => write!(
                f,
                "Result has {} channels, output buffer has {}",
                actual, expected
            ),
            PatchError::PatchCountMismatch { expected, actual } => write!(
                f,
                "Got {} patch results for {} offsets",
                actual, expected
            ),
            PatchError::SessionReleased => write!(f, "Patch session storage was already released"),
            PatchError::GenericError(msg) => write!(f, "Patch error: {}", msg),
        }
    }
}

impl std::error::Error for PatchError {}

impl From<io::Error> for PatchError {
    fn from(error: io::Error) -> Self {
        PatchError::StorageUnavailable(error)
    }
}

impl From<image::ImageError> for PatchError {
    fn from(error: image::ImageError) -> Self {
        PatchError::ImageError(error)
    }
}

impl From<String> for PatchError {
    fn from(msg: String) -> Self {
        PatchError::GenericError(msg)
    }
}

/// Result type for tiling operations
pub type PatchResult<T> = Result<T, PatchError>;
