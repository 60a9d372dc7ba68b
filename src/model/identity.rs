//! Identity stand-in model

use ndarray::{Array3, ArrayView3};

use crate::tiling::errors::PatchResult;
use super::segmenter::Segmenter;

/// Model returning every patch unchanged
///
/// Useful for exercising the extraction and stitching stages end to end:
/// with non-overlapping tiling the reconstructed output must equal the
/// input pixel for pixel.
pub struct IdentityModel;

impl Segmenter for IdentityModel {
    fn infer(&self, patch: ArrayView3<u8>) -> PatchResult<Array3<u8>> {
        Ok(patch.to_owned())
    }

    fn name(&self) -> &'static str {
        "Identity"
    }
}
