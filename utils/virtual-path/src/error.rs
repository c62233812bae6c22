//! Error types for virtual path handling.

use thiserror::Error;

/// Virtual path error type.
#[derive(Debug, Error)]
pub enum VirtualPathError {
    /// The mount list has no entry for `/`.
    #[error("virtual path resolver requires a '/' mount for the workspace root")]
    MissingRootMount,

    /// The bash grammar could not be loaded into the parser.
    #[error("failed to load bash grammar: {0}")]
    Grammar(String),

    /// The command is not valid shell syntax.
    #[error("command could not be parsed as shell syntax")]
    Unparsable,
}

/// Result type alias for virtual path operations.
pub type Result<T> = std::result::Result<T, VirtualPathError>;
