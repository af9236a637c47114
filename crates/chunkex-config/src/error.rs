//! Configuration error types.

use std::path::PathBuf;

/// Errors raised while locating, loading, or saving `config.ron`.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The platform has no per-user config directory and none was given.
    #[error("no config directory available; pass --config")]
    NoConfigDir,

    /// Failed to read the config file.
    #[error("failed to read {}: {source}", path.display())]
    ReadError {
        /// File being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to write the config file or create its directory.
    #[error("failed to write {}: {source}", path.display())]
    WriteError {
        /// File or directory being written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid RON for [`Config`](crate::Config).
    #[error("failed to parse {}: {source}", path.display())]
    ParseError {
        /// File being parsed.
        path: PathBuf,
        /// RON error with line and column.
        #[source]
        source: ron::error::SpannedError,
    },

    /// Failed to serialize config to RON.
    #[error("failed to serialize config: {0}")]
    SerializeError(#[source] ron::Error),
}
