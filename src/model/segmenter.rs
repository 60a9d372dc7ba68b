//! Segmenter capability trait definition

use ndarray::{Array3, ArrayView3};

use crate::tiling::errors::PatchResult;

/// Strategy trait for per-patch inference
///
/// The orchestration layer feeds every persisted patch through one
/// implementation of this trait, in index order. The tiling and
/// stitching stages never see a concrete model, which keeps them
/// testable with trivial stand-ins.
pub trait Segmenter: Send + Sync {
    /// Run inference on one patch
    ///
    /// # Arguments
    /// * `patch` - Input patch, (height, width, depth) layout
    ///
    /// # Returns
    /// The per-patch result; its spatial extent must match the input's,
    /// its channel count may differ
    fn infer(&self, patch: ArrayView3<u8>) -> PatchResult<Array3<u8>>;

    /// Get the name of this model
    fn name(&self) -> &'static str;
}
