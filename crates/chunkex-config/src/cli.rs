//! Command-line argument parsing for the chunk exporter.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Chunk exporter command-line arguments.
///
/// The positional arguments are handed to the `export` command unchanged, so
/// a wrong count produces the command's usage message rather than a clap
/// error. Flags override settings loaded from `config.ron`.
#[derive(Parser, Debug)]
#[command(
    name = "chunkex",
    about = "Export a rectangle of chunks to flat binary files",
    after_help = "Arguments: <world> <firstX> <firstZ> <lastX> <lastZ> <order>\n\
                  Orders: xyz, xzy, yxz, yzx, zxy, zyx"
)]
pub struct CliArgs {
    /// Export command arguments.
    #[arg(value_name = "ARGS", allow_negative_numbers = true)]
    pub command: Vec<String>,

    /// Root directory for exported files.
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(ref dir) = args.output_dir {
            self.export.output_dir = dir.clone();
        }
        if let Some(ref level) = args.log_level {
            self.log.log_level = level.clone();
        }
    }
}
