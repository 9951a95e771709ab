//! Error handling for the configuration store.

use std::path::PathBuf;

use thiserror::Error;

/// Convenient result alias for store operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors that may occur while reading or writing persisted settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file exists but could not be read or written.
    #[error("i/o error on {}", path.display())]
    Io {
        /// File being accessed.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The file is not valid JSON for the expected shape.
    #[error("malformed settings in {}", path.display())]
    Json {
        /// File being parsed.
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
