//! Error types for skill parsing.

use std::path::PathBuf;

use thiserror::Error;

/// Reasons a skill directory is rejected.
#[derive(Debug, Error)]
pub enum SkillError {
    #[error("IO error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Frontmatter parse error in {}: {message}", file.display())]
    FrontmatterParse { file: PathBuf, message: String },

    #[error("YAML parse error in {}: {source}", file.display())]
    YamlParse {
        file: PathBuf,
        #[source]
        source: serde_yml::Error,
    },

    #[error("Missing required field '{field}' in {}", file.display())]
    MissingField { file: PathBuf, field: &'static str },
}

pub type Result<T> = std::result::Result<T, SkillError>;
