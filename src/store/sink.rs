//! Patch persistence sinks
//!
//! Extraction hands every sliced patch to a sink together with its
//! sequential index. Sinks decide what persistence means: the PNG sink
//! writes one file per patch into a session directory, the memory sink
//! buffers patches for in-process pipelines and tests. New destinations
//! plug in by implementing the same trait.

use std::path::{Path, PathBuf};

use log::debug;
use ndarray::{Array3, ArrayView3};

use crate::tiling::errors::{PatchError, PatchResult};
use crate::utils::array_utils;

/// Destination for extracted patches
///
/// Implementations receive patches strictly in offset-list order with
/// zero-based sequential indices.
pub trait PatchSink {
    /// Persist one patch under its sequential index
    ///
    /// # Arguments
    /// * `index` - Zero-based position of the patch in the offset list
    /// * `patch` - View of the sliced region, (height, width, depth) layout
    fn store(&mut self, index: usize, patch: ArrayView3<u8>) -> PatchResult<()>;
}

/// File name for the patch at the given index
///
/// Indices are fixed-width and zero-padded so lexicographic and numeric
/// ordering of the directory agree, whatever the patch count.
pub fn patch_file_name(index: usize) -> String {
    format!("patch_{:06}.png", index)
}

/// Sink writing each patch as a PNG file
pub struct PngSink {
    /// Directory the patch files go into
    dir: PathBuf,
    /// Number of patches written so far
    written: usize,
}

impl PngSink {
    /// Create a sink over an existing directory
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        PngSink {
            dir: dir.into(),
            written: 0,
        }
    }

    /// Number of patches this sink has persisted
    pub fn written(&self) -> usize {
        self.written
    }
}

impl PatchSink for PngSink {
    fn store(&mut self, index: usize, patch: ArrayView3<u8>) -> PatchResult<()> {
        let path = self.dir.join(patch_file_name(index));
        let image = array_utils::array_to_image(patch)?;
        image.save(&path)?;
        self.written += 1;
        debug!("Persisted patch {} to {}", index, path.display());
        Ok(())
    }
}

/// Sink buffering patches in memory
pub struct MemorySink {
    patches: Vec<Array3<u8>>,
}

impl MemorySink {
    pub fn new() -> Self {
        MemorySink { patches: Vec::new() }
    }

    /// Hand the buffered patches over, in index order
    pub fn into_patches(self) -> Vec<Array3<u8>> {
        self.patches
    }

    pub fn len(&self) -> usize {
        self.patches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patches.is_empty()
    }
}

impl Default for MemorySink {
    fn default() -> Self {
        MemorySink::new()
    }
}

impl PatchSink for MemorySink {
    fn store(&mut self, index: usize, patch: ArrayView3<u8>) -> PatchResult<()> {
        // Indices arrive sequentially; a gap means the caller broke the
        // ordering contract
        if index != self.patches.len() {
            return Err(PatchError::GenericError(format!(
                "Patch index {} out of order, expected {}",
                index,
                self.patches.len()
            )));
        }
        self.patches.push(patch.to_owned());
        Ok(())
    }
}

/// Read-side handle over a directory of persisted patches
///
/// Order is recoverable from the sequential index alone; no manifest is
/// needed because file names embed the zero-padded index.
pub struct PatchSet {
    dir: PathBuf,
    len: usize,
}

impl PatchSet {
    /// Create a handle over `len` patches persisted under `dir`
    pub fn new(dir: impl Into<PathBuf>, len: usize) -> Self {
        PatchSet {
            dir: dir.into(),
            len,
        }
    }

    /// Number of patches in the set
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Path of the patch at the given index
    pub fn path_for(&self, index: usize) -> PathBuf {
        self.dir.join(patch_file_name(index))
    }

    /// Directory holding the patch files
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Load one persisted patch back into an array
    ///
    /// Grayscale files decode to a single channel, everything else to
    /// three, matching what the sink wrote.
    ///
    /// # Arguments
    /// * `index` - Zero-based patch index
    ///
    /// # Returns
    /// The decoded patch, or an error if the file is missing or corrupt
    pub fn load(&self, index: usize) -> PatchResult<Array3<u8>> {
        let path = self.path_for(index);
        let image = image::open(&path)?;
        Ok(array_utils::decode_patch(image))
    }
}
