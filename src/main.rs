use clap::{Arg, Command as ClapCommand, ArgAction};
use std::process;
use log::error;

// Import from your library
use patchkit::utils::logger::Logger;
use patchkit::commands::{CommandFactory, PatchkitCommandFactory};

fn main() {
    let matches = ClapCommand::new("PatchKit")
        .version("1.0")
        .author("Maurice Schilpp")
        .about("Tile large images into patches, run per-patch inference, stitch the results")
        .arg(
            Arg::new("input")
                .help("Input image file")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose output")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("extract")
                .short('e')
                .long("extract")
                .help("Extract patch files into a directory")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("infer")
                .short('i')
                .long("infer")
                .help("Run the full tiled-inference pipeline")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .help("Output file (with --infer) or directory (with --extract)")
                .value_name("PATH")
                .required(false),
        )
        .arg(
            Arg::new("patch-size")
                .short('p')
                .long("patch-size")
                .help("Maximum window extent per axis in pixels")
                .value_name("PIXELS")
                .default_value("224")
                .required(false),
        )
        .arg(
            Arg::new("overlap")
                .long("overlap")
                .help("Overlap fraction between neighbouring windows, in [0, 1)")
                .value_name("FRACTION")
                .conflicts_with("stride")
                .required(false),
        )
        .arg(
            Arg::new("stride")
                .long("stride")
                .help("Step in pixels between window start positions")
                .value_name("PIXELS")
                .required(false),
        )
        .arg(
            Arg::new("model")
                .short('m')
                .long("model")
                .help("Model stand-in to apply per patch (identity, grayscale)")
                .value_name("NAME")
                .default_value("grayscale")
                .required(false),
        )
        .arg(
            Arg::new("temp-dir")
                .long("temp-dir")
                .help("Parent directory for session temp storage")
                .value_name("DIR")
                .required(false),
        )
        .get_matches();

    let log_file = "patchkit.log";
    let logger = match Logger::new(log_file) {
        Ok(l) => l,
        Err(e) => {
            eprintln!("Error initializing logger: {}", e);
            process::exit(1);
        }
    };

    let verbose = matches.get_flag("verbose");
    if let Err(e) = Logger::init_global_logger("patchkit-global.log", verbose) {
        eprintln!("Error setting up global logger: {}", e);
        process::exit(1);
    }

    let factory = PatchkitCommandFactory::new();

    let command_result = factory.create_command(&matches, &logger);
    match command_result {
        Ok(command) => {
            if let Err(e) = command.execute() {
                error!("Command execution error: {}", e);
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        },
        Err(e) => {
            error!("Failed to create command: {}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
}
