//! CLI command implementations
//!
//! This module contains implementations of various commands
//! supported by the CLI application using the Command pattern.

pub mod command_traits;
pub mod plan_command;
pub mod extract_command;
pub mod infer_command;

pub use command_traits::{Command, CommandFactory};
pub use plan_command::PlanCommand;
pub use extract_command::ExtractCommand;
pub use infer_command::InferCommand;

use clap::ArgMatches;
use crate::utils::logger::Logger;
use crate::tiling::errors::{PatchError, PatchResult};
use crate::tiling::TilingPolicy;

/// Factory for creating command instances based on CLI arguments
///
/// This factory examines the command-line arguments and creates
/// the appropriate command instance for execution.
pub struct PatchkitCommandFactory;

impl PatchkitCommandFactory {
    /// Create a new factory instance
    pub fn new() -> Self {
        PatchkitCommandFactory
    }
}

impl<'a> CommandFactory<'a> for PatchkitCommandFactory {
    fn create_command(&self, args: &ArgMatches, logger: &'a Logger) -> PatchResult<Box<dyn Command + 'a>> {
        // Determine which command to run based on args
        if args.get_flag("extract") {
            Ok(Box::new(ExtractCommand::new(args, logger)?))
        } else if args.get_flag("infer") {
            Ok(Box::new(InferCommand::new(args, logger)?))
        } else {
            // Default to printing the tiling plan
            Ok(Box::new(PlanCommand::new(args, logger)?))
        }
    }
}

/// Parse the shared tiling parameters out of the CLI arguments
///
/// Patch size defaults to 224 pixels. Stride and overlap are optional
/// and mutually exclusive at the clap level; stride wins if both slip
/// through.
///
/// # Arguments
/// * `args` - CLI argument matches from clap
///
/// # Returns
/// The patch size and selected tiling policy, or a parse error
pub fn parse_tiling_parameters(args: &ArgMatches) -> PatchResult<(usize, TilingPolicy)> {
    let patch_size = match args.get_one::<String>("patch-size") {
        Some(raw) => raw
            .parse::<usize>()
            .map_err(|_| PatchError::GenericError(format!("Invalid patch size: {}", raw)))?,
        None => 224,
    };

    let overlap = match args.get_one::<String>("overlap") {
        Some(raw) => Some(
            raw.parse::<f64>()
                .map_err(|_| PatchError::GenericError(format!("Invalid overlap fraction: {}", raw)))?,
        ),
        None => None,
    };

    let stride = match args.get_one::<String>("stride") {
        Some(raw) => Some(
            raw.parse::<usize>()
                .map_err(|_| PatchError::GenericError(format!("Invalid stride: {}", raw)))?,
        ),
        None => None,
    };

    Ok((patch_size, TilingPolicy::from_parameters(overlap, stride)))
}
