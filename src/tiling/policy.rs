//! Tiling policies for deriving window step sizes
//!
//! A policy turns a clamped window size into the distance between
//! consecutive window start positions along one axis. Exactly one policy
//! is active per tiling call.

use crate::tiling::errors::{PatchError, PatchResult};

/// How consecutive windows are spaced along an axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TilingPolicy {
    /// Neighbouring windows share the given fraction of their extent.
    /// The fraction must lie in [0, 1); a fraction of 0 produces
    /// non-overlapping tiling with step = window size.
    Overlap(f64),

    /// Fixed distance in pixels between window start positions
    Stride(usize),

    /// Exhaustive sliding window with step 1. Every possible window
    /// position is visited, which is only practical for small inputs.
    Default,
}

impl TilingPolicy {
    /// Derive the step size for one axis from this policy
    ///
    /// # Arguments
    /// * `window` - Clamped window size along the axis
    ///
    /// # Returns
    /// The step size in pixels, always at least 1, or an error for an
    /// out-of-range overlap fraction or a zero stride
    pub fn step_for(&self, window: usize) -> PatchResult<usize> {
        match self {
            TilingPolicy::Overlap(fraction) => {
                // NaN falls outside the range check and is rejected too
                if !(0.0..1.0).contains(fraction) {
                    return Err(PatchError::InvalidOverlap(*fraction));
                }
                let overlap_pixels = (window as f64 * fraction).floor() as usize;
                Ok(window - overlap_pixels)
            }
            TilingPolicy::Stride(step) => {
                if *step == 0 {
                    return Err(PatchError::InvalidStride);
                }
                Ok(*step)
            }
            TilingPolicy::Default => Ok(1),
        }
    }

    /// Select a policy from optional stride and overlap parameters
    ///
    /// Stride wins when both are given, mirroring the precedence of the
    /// extraction entry point this crate grew out of. With neither
    /// present the exhaustive default applies.
    ///
    /// # Arguments
    /// * `overlap` - Optional overlap fraction
    /// * `stride` - Optional step size in pixels
    ///
    /// # Returns
    /// The selected tiling policy
    pub fn from_parameters(overlap: Option<f64>, stride: Option<usize>) -> Self {
        match (stride, overlap) {
            (Some(step), _) => TilingPolicy::Stride(step),
            (None, Some(fraction)) => TilingPolicy::Overlap(fraction),
            (None, None) => TilingPolicy::Default,
        }
    }
}
