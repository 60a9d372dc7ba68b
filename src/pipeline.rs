//! End-to-end tiled inference pipeline
//!
//! Wires the stages together: decode the input image, compute the tiling
//! plan, persist patches into session storage, feed each persisted patch
//! through the model, widen channels, stitch the results and encode the
//! output. Patches stream through one at a time; the full set of results
//! never sits in memory at once.

use std::path::Path;

use log::info;
use ndarray::Array3;

use crate::model::Segmenter;
use crate::stitch::{broadcast_channels, reconstruct};
use crate::store::{extract_patches, PatchSession, PatchSet, PngSink};
use crate::tiling::{compute_offsets, Dimensions, Offset, TilingPolicy};
use crate::tiling::errors::PatchResult;
use crate::utils::array_utils;
use crate::utils::ProgressTracker;

/// Run tiled inference over one image file
///
/// Session storage is always released before this function returns,
/// whether the run succeeds or fails partway.
///
/// # Arguments
/// * `input_path` - Image to tile
/// * `output_path` - Where the reconstructed output is written
/// * `patch_size` - Maximum window extent per axis
/// * `policy` - Window spacing policy
/// * `model` - Inference capability applied to every patch
/// * `base_temp_dir` - Optional parent for the session's temp storage
///
/// # Returns
/// Result indicating success or the first error encountered
pub fn run_pipeline(
    input_path: &str,
    output_path: &Path,
    patch_size: usize,
    policy: TilingPolicy,
    model: &dyn Segmenter,
    base_temp_dir: Option<&Path>,
) -> PatchResult<()> {
    info!("Running tiled inference on {} with model {}", input_path, model.name());

    let data = array_utils::load_image_array(input_path)?;
    let dims = Dimensions::of(&data.view())?;
    let offsets = compute_offsets(dims, patch_size, policy)?;
    info!("Tiling plan: {} patches over {}", offsets.len(), dims);

    let mut session = PatchSession::begin(base_temp_dir)?;
    let outcome = infer_session(&data, dims, &offsets, &session, model);

    // Storage goes away before any error propagates
    let released = session.release();
    let reconstructed = outcome?;
    released?;

    array_utils::save_array(output_path, reconstructed.view())?;
    info!("Reconstructed output saved to {}", output_path.display());
    Ok(())
}

/// Persist, infer and stitch within one active session
fn infer_session(
    data: &Array3<u8>,
    dims: Dimensions,
    offsets: &[Offset],
    session: &PatchSession,
    model: &dyn Segmenter,
) -> PatchResult<Array3<u8>> {
    let mut sink = PngSink::new(session.path()?);
    let count = extract_patches(data.view(), offsets, &mut sink)?;
    let patches = PatchSet::new(session.path()?, count);

    let progress = ProgressTracker::new(count as u64, "Running inference");

    // Lazy per-index pipeline: patch N streams through load, inference
    // and channel widening while patch N-1 is already stitched
    let results = (0..count).map(|index| {
        let patch = patches.load(index)?;
        let result = model.infer(patch.view())?;
        let widened = broadcast_channels(result, dims.depth)?;
        progress.increment(1);
        Ok(widened)
    });

    let reconstructed = reconstruct(dims, offsets, results)?;
    progress.finish();
    Ok(reconstructed)
}
