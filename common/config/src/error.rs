//! Error types for configuration loading.

use std::path::PathBuf;

use thiserror::Error;

/// Configuration error type.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An explicitly requested configuration file does not exist.
    #[error("Config file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Invalid TOML in the configuration file.
    #[error("Invalid TOML in {file}: {error}")]
    InvalidToml {
        /// The file path.
        file: PathBuf,
        /// The parser message.
        error: String,
    },

    /// A value failed validation.
    #[error("Invalid config value for {field}: {message}")]
    InvalidValue {
        field: &'static str,
        message: String,
    },

    /// The mount list cannot build a resolver.
    #[error("Invalid mounts: {0}")]
    Mounts(#[from] vexec_virtual_path::VirtualPathError),

    /// Failure reading `.env`.
    #[error("Failed to load .env: {0}")]
    Dotenv(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
