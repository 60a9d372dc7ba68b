//! Channel adaptation between model output and output buffer
//!
//! A segmentation model often emits fewer channels than the image it was
//! fed, typically a single mask channel for a three-channel input. The
//! stitcher stays output-shape-agnostic, so widening happens here, on the
//! caller's side, before a result is handed over.

use ndarray::{s, Array3};

use crate::tiling::errors::{PatchError, PatchResult};

/// Widen a result to the output buffer's channel count
///
/// A result that already matches passes through untouched. A
/// single-channel result is replicated across all output channels. Any
/// other disagreement is an error; there is no sensible way to spread,
/// say, two channels over three.
pub fn broadcast_channels(result: Array3<u8>, depth: usize) -> PatchResult<Array3<u8>> {
    let (height, width, channels) = result.dim();

    if channels == depth {
        return Ok(result);
    }
    if channels != 1 {
        return Err(PatchError::ChannelMismatch {
            expected: depth,
            actual: channels,
        });
    }

    let mut widened = Array3::zeros((height, width, depth));
    for channel in 0..depth {
        widened
            .slice_mut(s![.., .., channel..channel + 1])
            .assign(&result);
    }
    Ok(widened)
}
