//! Tiling plan command
//!
//! This module implements the default command: compute and print the
//! tiling plan for an image without extracting or inferring anything.
//! Only the image header is read, pixel data stays on disk.

use clap::ArgMatches;
use log::info;

use crate::commands::command_traits::Command;
use crate::commands::parse_tiling_parameters;
use crate::tiling::errors::PatchResult;
use crate::tiling::{compute_offsets, Dimensions, TilingPolicy};
use crate::utils::logger::Logger;

/// Command printing the tiling plan for an image
pub struct PlanCommand<'a> {
    /// Path to the input file
    input_file: String,
    /// Maximum window extent per axis
    patch_size: usize,
    /// Window spacing policy
    policy: TilingPolicy,
    /// Logger for recording operations
    logger: &'a Logger,
}

impl<'a> PlanCommand<'a> {
    /// Create a new plan command
    ///
    /// # Arguments
    /// * `args` - CLI argument matches from clap
    /// * `logger` - Logger for recording operations
    ///
    /// # Returns
    /// A new PlanCommand instance or an error
    pub fn new(args: &ArgMatches, logger: &'a Logger) -> PatchResult<Self> {
        info!("Creating new plan command from arguments");

        let input_file = args.get_one::<String>("input")
            .ok_or_else(|| "Missing input file".to_string())?
            .clone();
        info!("Input file: {}", input_file);

        let (patch_size, policy) = parse_tiling_parameters(args)?;
        info!("Patch size: {}, policy: {:?}", patch_size, policy);

        Ok(PlanCommand {
            input_file,
            patch_size,
            policy,
            logger,
        })
    }
}

impl Command for PlanCommand<'_> {
    fn execute(&self) -> PatchResult<()> {
        let (width, height) = image::image_dimensions(&self.input_file)?;
        // Decoded inputs are normalized to RGB, so plan against 3 channels
        let dims = Dimensions::new(height as usize, width as usize, 3)?;
        let offsets = compute_offsets(dims, self.patch_size, self.policy)?;

        let mut summary = format!("Tiling Plan for {}:\n", self.input_file);
        summary.push_str(&format!("  Dimensions: {}\n", dims));
        summary.push_str(&format!(
            "  Window: {}x{}\n",
            self.patch_size.min(dims.height),
            self.patch_size.min(dims.width)
        ));
        summary.push_str(&format!("  Patches: {}\n", offsets.len()));

        if let (Some(first), Some(last)) = (offsets.first(), offsets.last()) {
            summary.push_str(&format!(
                "  First window: [{}..{}, {}..{}]\n",
                first.y_start, first.y_end, first.x_start, first.x_end
            ));
            summary.push_str(&format!(
                "  Last window: [{}..{}, {}..{}]\n",
                last.y_start, last.y_end, last.x_start, last.x_end
            ));
        }

        self.logger.log(&summary)?;
        println!("{}", summary);
        Ok(())
    }
}
