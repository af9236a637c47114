//! Configuration structs with defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// File name of the config inside the config directory.
const CONFIG_FILE: &str = "config.ron";

/// Top-level exporter configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Output settings.
    pub export: ExportConfig,
    /// Logging settings.
    pub log: LogConfig,
    /// Worlds available for export.
    pub worlds: Vec<WorldConfig>,
}

/// Output configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ExportConfig {
    /// Root directory; files go to `<output_dir>/<world>/<order>/`.
    pub output_dir: PathBuf,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LogConfig {
    /// Filter directive (e.g. "info", "chunkex_voxel=debug"). `RUST_LOG` wins.
    pub log_level: String,
    /// Also write JSON logs to `<config_dir>/logs/chunkex.log`.
    pub file_logging: bool,
}

/// A superflat world definition.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorldConfig {
    /// World name as typed on the command line.
    pub name: String,
    /// Layers from the bottom of the world upwards.
    #[serde(default)]
    pub layers: Vec<LayerConfig>,
}

/// One layer of a superflat world.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct LayerConfig {
    /// Block id.
    pub block_id: u16,
    /// Block metadata.
    #[serde(default)]
    pub meta: u8,
    /// Height of the layer in blocks.
    pub thickness: u16,
}

// --- Default implementations ---

impl Default for Config {
    fn default() -> Self {
        Self {
            export: ExportConfig::default(),
            log: LogConfig::default(),
            worlds: vec![WorldConfig::classic_flat("world")],
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("export"),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            file_logging: false,
        }
    }
}

impl WorldConfig {
    /// The classic superflat preset: bedrock, two dirt, one grass.
    pub fn classic_flat(name: &str) -> Self {
        Self {
            name: name.to_string(),
            layers: vec![
                LayerConfig {
                    block_id: 7,
                    meta: 0,
                    thickness: 1,
                },
                LayerConfig {
                    block_id: 3,
                    meta: 0,
                    thickness: 2,
                },
                LayerConfig {
                    block_id: 2,
                    meta: 0,
                    thickness: 1,
                },
            ],
        }
    }
}

/// Per-user config directory, `<platform config dir>/chunkex`.
pub fn default_config_dir() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|dir| dir.join("chunkex"))
        .ok_or(ConfigError::NoConfigDir)
}

// --- Load / Save ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);

        if config_path.exists() {
            let contents =
                std::fs::read_to_string(&config_path).map_err(|source| ConfigError::ReadError {
                    path: config_path.clone(),
                    source,
                })?;
            let config: Config =
                ron::from_str(&contents).map_err(|source| ConfigError::ParseError {
                    path: config_path.clone(),
                    source,
                })?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(|source| ConfigError::WriteError {
            path: config_dir.to_path_buf(),
            source,
        })?;

        let config_path = config_dir.join(CONFIG_FILE);
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(4)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(|source| ConfigError::WriteError {
            path: config_path,
            source,
        })?;
        Ok(())
    }

    /// Returns the world definition with the given name.
    pub fn world(&self, name: &str) -> Option<&WorldConfig> {
        self.worlds.iter().find(|w| w.name == name)
    }
}
