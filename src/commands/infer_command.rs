//! Tiled inference command
//!
//! This module implements the command running the full pipeline: tile
//! the input, persist patches into scoped session storage, run every
//! patch through the selected model and stitch the results back into a
//! full-size output image.

use clap::ArgMatches;
use log::info;
use std::path::PathBuf;

use crate::commands::command_traits::Command;
use crate::commands::parse_tiling_parameters;
use crate::model::SegmenterFactory;
use crate::pipeline;
use crate::tiling::errors::PatchResult;
use crate::tiling::TilingPolicy;
use crate::utils::logger::Logger;

/// Command for running tiled inference over an image
pub struct InferCommand<'a> {
    /// Path to the input file
    input_file: String,
    /// Path the reconstructed output is written to
    output_file: PathBuf,
    /// Maximum window extent per axis
    patch_size: usize,
    /// Window spacing policy
    policy: TilingPolicy,
    /// Name of the model stand-in to apply
    model_name: String,
    /// Optional parent directory for session temp storage
    temp_dir: Option<PathBuf>,
    /// Logger for recording operations
    logger: &'a Logger,
}

impl<'a> InferCommand<'a> {
    /// Create a new infer command
    ///
    /// # Arguments
    /// * `args` - CLI argument matches from clap
    /// * `logger` - Logger for recording operations
    ///
    /// # Returns
    /// A new InferCommand instance or an error
    pub fn new(args: &ArgMatches, logger: &'a Logger) -> PatchResult<Self> {
        info!("Creating new infer command from arguments");

        let input_file = args.get_one::<String>("input")
            .ok_or_else(|| "Missing input file".to_string())?
            .clone();
        info!("Input file: {}", input_file);

        let output_file = args.get_one::<String>("output")
            .ok_or_else(|| "Missing output file path for inference".to_string())?
            .into();
        info!("Output file: {:?}", output_file);

        let (patch_size, policy) = parse_tiling_parameters(args)?;
        info!("Patch size: {}, policy: {:?}", patch_size, policy);

        let model_name = args.get_one::<String>("model")
            .cloned()
            .unwrap_or_else(|| "grayscale".to_string());
        info!("Model: {}", model_name);

        let temp_dir = args.get_one::<String>("temp-dir").map(PathBuf::from);
        info!("Temp dir: {:?}", temp_dir);

        Ok(InferCommand {
            input_file,
            output_file,
            patch_size,
            policy,
            model_name,
            temp_dir,
            logger,
        })
    }
}

impl Command for InferCommand<'_> {
    fn execute(&self) -> PatchResult<()> {
        let model = SegmenterFactory::get_by_name(&self.model_name)?;

        pipeline::run_pipeline(
            &self.input_file,
            &self.output_file,
            self.patch_size,
            self.policy,
            &*model,
            self.temp_dir.as_deref(),
        )?;

        let message = format!(
            "Reconstructed output written to {}",
            self.output_file.display()
        );
        self.logger.log(&message)?;
        println!("{}", message);
        Ok(())
    }
}
