//! Patch extraction command
//!
//! This module implements the command for tiling an image and persisting
//! its patches into a directory that outlives the run, so the patch files
//! can be inspected or fed to an out-of-process model.

use clap::ArgMatches;
use log::info;
use std::path::PathBuf;

use crate::commands::command_traits::Command;
use crate::commands::parse_tiling_parameters;
use crate::store::{extract_patches, PatchSink, PngSink};
use crate::tiling::errors::PatchResult;
use crate::tiling::{compute_offsets, Dimensions, TilingPolicy};
use crate::utils::array_utils;
use crate::utils::logger::Logger;
use crate::utils::ProgressTracker;

/// Command for extracting patch files from an image
pub struct ExtractCommand<'a> {
    /// Path to the input file
    input_file: String,
    /// Directory the patch files are written into
    output_dir: PathBuf,
    /// Maximum window extent per axis
    patch_size: usize,
    /// Window spacing policy
    policy: TilingPolicy,
    /// Logger for recording operations
    logger: &'a Logger,
}

impl<'a> ExtractCommand<'a> {
    /// Create a new extract command
    ///
    /// # Arguments
    /// * `args` - CLI argument matches from clap
    /// * `logger` - Logger for recording operations
    ///
    /// # Returns
    /// A new ExtractCommand instance or an error
    pub fn new(args: &ArgMatches, logger: &'a Logger) -> PatchResult<Self> {
        info!("Creating new extract command from arguments");

        let input_file = args.get_one::<String>("input")
            .ok_or_else(|| "Missing input file".to_string())?
            .clone();
        info!("Input file: {}", input_file);

        let output_dir = args.get_one::<String>("output")
            .ok_or_else(|| "Missing output directory for extraction".to_string())?
            .into();
        info!("Output directory: {:?}", output_dir);

        let (patch_size, policy) = parse_tiling_parameters(args)?;
        info!("Patch size: {}, policy: {:?}", patch_size, policy);

        Ok(ExtractCommand {
            input_file,
            output_dir,
            patch_size,
            policy,
            logger,
        })
    }
}

impl Command for ExtractCommand<'_> {
    fn execute(&self) -> PatchResult<()> {
        let data = array_utils::load_image_array(&self.input_file)?;
        let dims = Dimensions::of(&data.view())?;
        let offsets = compute_offsets(dims, self.patch_size, self.policy)?;
        info!("Extracting {} patches from {}", offsets.len(), dims);

        std::fs::create_dir_all(&self.output_dir)?;

        let progress = ProgressTracker::new(offsets.len() as u64, "Extracting patches");
        let mut sink = ProgressSink {
            inner: PngSink::new(&self.output_dir),
            progress: &progress,
        };
        let count = extract_patches(data.view(), &offsets, &mut sink)?;
        progress.finish();

        let message = format!(
            "Wrote {} patches to {}",
            count,
            self.output_dir.display()
        );
        self.logger.log(&message)?;
        println!("{}", message);
        Ok(())
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
