//! Configuration for the chunk exporter.
//!
//! Settings persist to disk as a RON file and can be overridden from the
//! command line. Missing sections fall back to defaults, so older config
//! files keep loading.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{Config, ExportConfig, LayerConfig, LogConfig, WorldConfig, default_config_dir};
pub use error::ConfigError;
