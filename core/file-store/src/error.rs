//! File store errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FileStoreError {
    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Cannot write to {0} because it already exists. Read and then make an edit, or write to a new path.")]
    AlreadyExists(String),

    #[error("Invalid path '{path}': {reason}")]
    InvalidPath { path: String, reason: &'static str },

    #[error("String not found in file: '{0}'")]
    StringNotFound(String),

    #[error("String appears {count} times in file. Use replace_all=true to replace every instance, or provide a more specific string.")]
    AmbiguousEdit { count: usize },

    #[error("old_string must not be empty")]
    EmptyOldString,

    #[error("Invalid glob pattern '{pattern}': {error}")]
    InvalidGlob { pattern: String, error: String },

    #[error("IO error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, FileStoreError>;

impl FileStoreError {
    /// Maps an IO error on a virtual path, turning `NotFound` into [`FileStoreError::NotFound`].
    pub(crate) fn io(path: &str, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::NotFound(path.to_string())
        } else {
            Self::Io {
                path: path.to_string(),
                source,
            }
        }
    }
}
