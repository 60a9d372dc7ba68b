//! Region slicing and streaming persistence
//!
//! Walks the offset list in order, slices each window out of the input
//! array and streams it to a sink one patch at a time. Nothing is
//! buffered in bulk; peak memory stays bounded by a single patch
//! regardless of how many windows the plan contains.

use log::info;
use ndarray::{s, ArrayView3};

use crate::store::sink::PatchSink;
use crate::tiling::errors::{PatchError, PatchResult};
use crate::tiling::offsets::Offset;

/// Slice every window out of `data` and persist it through `sink`
///
/// Patches are produced strictly in offset-list order and handed to the
/// sink with their zero-based sequential index, the index the stitcher
/// later uses to put results back.
///
/// # Arguments
/// * `data` - Input array in (height, width, depth) layout
/// * `offsets` - Window placements from the tiler
/// * `sink` - Destination for the sliced patches
///
/// # Returns
/// The number of patches persisted, or the first error encountered
pub fn extract_patches(
    data: ArrayView3<u8>,
    offsets: &[Offset],
    sink: &mut dyn PatchSink,
) -> PatchResult<usize> {
    let (height, width, _) = data.dim();

    for (index, offset) in offsets.iter().enumerate() {
        if offset.y_end > height || offset.x_end > width {
            return Err(PatchError::GenericError(format!(
                "Offset {} exceeds input bounds {}x{}",
                index, height, width
            )));
        }

        let patch = data.slice(s![
            offset.y_start..offset.y_end,
            offset.x_start..offset.x_end,
            ..
        ]);
        sink.store(index, patch)?;
    }

    info!("Extracted {} patches", offsets.len());
    Ok(offsets.len())
}
