use std::path::Path;
use log::info;
use crate::tiling::errors::PatchResult;
use crate::tiling::{compute_offsets, Dimensions, TilingPolicy};
use crate::store::{extract_patches, PatchSink, PngSink};
use crate::model::SegmenterFactory;
use crate::pipeline;
use crate::utils::array_utils;
use crate::utils::logger::Logger;
use crate::utils::ProgressTracker;

/// Main interface to the PatchKit library
pub struct PatchKit {
    logger: Logger,
}

impl PatchKit {
    /// Create a new PatchKit instance
    ///
    /// # Arguments
    /// * `log_file` - Optional path to log file, defaults to "patchkit.log"
    ///
    /// # Returns
    /// A PatchKit instance or an error if initialization fails
    pub fn new(log_file: Option<&str>) -> PatchResult<Self> {
        let log_path = log_file.unwrap_or("patchkit.log");
        let logger = Logger::new(log_path)?;
        Ok(PatchKit { logger })
    }

    /// Summarize the tiling plan for an image without extracting anything
    ///
    /// Only the image header is read; the pixel data stays on disk.
    ///
    /// # Arguments
    /// * `input_path` - Path to the image to plan for
    /// * `patch_size` - Maximum window extent per axis
    /// * `policy` - Window spacing policy
    ///
    /// # Returns
    /// String describing the plan or an error
    pub fn plan(&self, input_path: &str, patch_size: usize, policy: TilingPolicy) -> PatchResult<String> {
        let (width, height) = image::image_dimensions(input_path)?;
        // Decoded inputs are normalized to RGB, so plan against 3 channels
        let dims = Dimensions::new(height as usize, width as usize, 3)?;
        let offsets = compute_offsets(dims, patch_size, policy)?;

        let mut result = format!("Tiling Plan for {}:\n", input_path);
        result.push_str(&format!("  Dimensions: {}\n", dims));
        result.push_str(&format!(
            "  Window: {}x{}\n",
            patch_size.min(dims.height),
            patch_size.min(dims.width)
        ));
        result.push_str(&format!("  Patches: {}\n", offsets.len()));

        if let (Some(first), Some(last)) = (offsets.first(), offsets.last()) {
            result.push_str(&format!(
                "  First window: [{}..{}, {}..{}]\n",
                first.y_start, first.y_end, first.x_start, first.x_end
            ));
            result.push_str(&format!(
                "  Last window: [{}..{}, {}..{}]\n",
                last.y_start, last.y_end, last.x_start, last.x_end
            ));
        }

        self.logger.log(&result)?;
        Ok(result)
    }

    /// Extract an image's patches into a directory, keeping them on disk
    ///
    /// # Arguments
    /// * `input_path` - Path to the image to tile
    /// * `output_dir` - Directory the patch files are written into
    /// * `patch_size` - Maximum window extent per axis
    /// * `policy` - Window spacing policy
    ///
    /// # Returns
    /// Number of patches written or an error
    pub fn extract(
        &self,
        input_path: &str,
        output_dir: &Path,
        patch_size: usize,
        policy: TilingPolicy,
    ) -> PatchResult<usize> {
        info!("Extracting patches from {} into {}", input_path, output_dir.display());

        let data = array_utils::load_image_array(input_path)?;
        let dims = Dimensions::of(&data.view())?;
        let offsets = compute_offsets(dims, patch_size, policy)?;

        std::fs::create_dir_all(output_dir)?;

        let progress = ProgressTracker::new(offsets.len() as u64, "Extracting patches");
        let mut sink = ProgressSink {
            inner: PngSink::new(output_dir),
            progress: &progress,
        };
        let count = extract_patches(data.view(), &offsets, &mut sink)?;
        progress.finish();

        Ok(count)
    }

    /// Run the full tiled-inference pipeline over an image
    ///
    /// # Arguments
    /// * `input_path` - Path to the input image
    /// * `output_path` - Where the reconstructed output is written
    /// * `patch_size` - Maximum window extent per axis
    /// * `policy` - Window spacing policy
    /// * `model_name` - Name of the model stand-in to apply
    /// * `base_temp_dir` - Optional parent for session temp storage
    ///
    /// # Returns
    /// Result indicating success or an error
    pub fn infer(
        &self,
        input_path: &str,
        output_path: &Path,
        patch_size: usize,
        policy: TilingPolicy,
        model_name: &str,
        base_temp_dir: Option<&Path>,
    ) -> PatchResult<()> {
        let model = SegmenterFactory::get_by_name(model_name)?;
        pipeline::run_pipeline(input_path, output_path, patch_size, policy, &*model, base_temp_dir)
    }
}

/// Sink adapter ticking a progress bar as patches are persisted
struct ProgressSink<'a> {
    inner: PngSink,
    progress: &'a ProgressTracker,
}

impl PatchSink for ProgressSink<'_> {
    fn store(&mut self, index: usize, patch: ndarray::ArrayView3<u8>) -> PatchResult<()> {
        self.inner.store(index, patch)?;
        self.progress.increment(1);
        Ok(())
    }
}
