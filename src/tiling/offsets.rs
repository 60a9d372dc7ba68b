//! Window placement computation
//!
//! This module implements the tiler: given the input's dimensions, a
//! patch size and a tiling policy it computes the ordered list of window
//! placements covering the whole input. The list's order is load-bearing,
//! it is the only key correlating a persisted patch with the region it
//! is stitched back into.

use log::debug;

use crate::tiling::dimensions::Dimensions;
use crate::tiling::errors::{PatchError, PatchResult};
use crate::tiling::policy::TilingPolicy;

/// One rectangular window in absolute input coordinates
///
/// Start coordinates are inclusive, end coordinates exclusive, so the
/// window covers `[y_start, y_end) x [x_start, x_end)`. The extent along
/// each axis always equals the clamped window size for the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Offset {
    /// First row of the window
    pub y_start: usize,

    /// Row immediately after the window
    pub y_end: usize,

    /// First column of the window
    pub x_start: usize,

    /// Column immediately after the window
    pub x_end: usize,
}

impl Offset {
    /// Window extent along the row axis
    pub fn height(&self) -> usize {
        self.y_end - self.y_start
    }

    /// Window extent along the column axis
    pub fn width(&self) -> usize {
        self.x_end - self.x_start
    }
}

/// Compute the ordered window placements for one tiling session
///
/// The window size is clamped per axis so no window exceeds the input,
/// then start positions are generated per axis at the policy's step size
/// and corrected so the final position always touches the trailing edge.
/// Positions are combined with X as the outer loop and Y as the inner
/// loop; that iteration order is fixed and deterministic.
///
/// Depth is validated as part of `dims` but not stepped along; tiling is
/// strictly two-dimensional.
///
/// # Arguments
/// * `dims` - Dimensions of the input array
/// * `patch_size` - Maximum window extent per axis, must be positive
/// * `policy` - How consecutive windows are spaced
///
/// # Returns
/// The offset list, covering every input pixel with at least one window,
/// or an error for invalid parameters
pub fn compute_offsets(
    dims: Dimensions,
    patch_size: usize,
    policy: TilingPolicy,
) -> PatchResult<Vec<Offset>> {
    if patch_size == 0 {
        return Err(PatchError::InvalidPatchSize(patch_size));
    }

    let window_x = patch_size.min(dims.width);
    let window_y = patch_size.min(dims.height);

    let step_x = policy.step_for(window_x)?;
    let step_y = policy.step_for(window_y)?;

    let x_starts = axis_starts(dims.width, window_x, step_x);
    let y_starts = axis_starts(dims.height, window_y, step_y);

    debug!(
        "Tiling {} with {}x{} windows: {} x-starts, {} y-starts",
        dims,
        window_y,
        window_x,
        x_starts.len(),
        y_starts.len()
    );

    let mut offsets = Vec::with_capacity(x_starts.len() * y_starts.len());
    for &x_start in &x_starts {
        for &y_start in &y_starts {
            offsets.push(Offset {
                y_start,
                y_end: y_start + window_y,
                x_start,
                x_end: x_start + window_x,
            });
        }
    }

    Ok(offsets)
}

/// Generate window start positions along one axis
///
/// Produces the arithmetic progression `0, step, 2*step, ...` up to the
/// last valid start position `span - window`. When the progression does
/// not land exactly on that last position it is appended explicitly, so
/// the trailing row or column of the input is always covered even when
/// the step does not evenly divide the span.
fn axis_starts(span: usize, window: usize, step: usize) -> Vec<usize> {
    let last = span - window;
    let mut starts: Vec<usize> = (0..=last).step_by(step).collect();
    if starts.last() != Some(&last) {
        starts.push(last);
    }
    starts
}
