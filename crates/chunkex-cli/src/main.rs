//! `chunkex`: export a rectangle of chunks to one binary file per chunk.
//!
//! Configuration is loaded from `config.ron` and can be overridden via CLI flags.
//! Run with `cargo run -p chunkex-cli -- world 0 0 1 1 yzx` to export four chunks
//! of the default world into `export/world/yzx/`.

mod worlds;

use std::process::ExitCode;

use chunkex_config::{CliArgs, Config, default_config_dir};
use chunkex_voxel::{FsSink, handle_export};
use clap::Parser;
use tracing::{error, info};

fn main() -> ExitCode {
    let args = CliArgs::parse();

    // Resolve config directory
    let config_dir = match args.config.clone().map_or_else(default_config_dir, Ok) {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::from(2);
        }
    };

    // Load or create config, then apply CLI overrides
    let mut config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args);

    chunkex_log::init_logging(Some(&config_dir.join("logs")), Some(&config));

    let registry = match worlds::build_registry(&config.worlds) {
        Ok(registry) => registry,
        Err(e) => {
            error!("Invalid world configuration: {}", e);
            return ExitCode::from(2);
        }
    };
    info!(worlds = ?registry.names(), "World registry ready");

    let response = handle_export(
        args.command.as_slice(),
        &registry,
        &config.export.output_dir,
        &mut FsSink,
    );
    println!("{response}");

    if response.is_failure() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
