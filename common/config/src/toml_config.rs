//! TOML configuration types for `vexec.toml`.
//!
//! These types mirror the file layout. Every field is optional so a partial
//! file (or none at all) falls back to the defaults in [`crate::AppConfig`].

use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;
use vexec_utils_common::TimezoneConfig;

use crate::config::BackendKind;

/// Configuration file (`vexec.toml`).
///
/// # Example
///
/// ```toml
/// workspace_dir = "workspace"
///
/// [execution]
/// backend = "docker"
/// timeout_secs = 60
/// container_name = "code-execution-agent"
///
/// [[mounts]]
/// virtual = "/"
/// physical = "workspace"
///
/// [[mounts]]
/// virtual = "/data"
/// physical = "/mnt/datasets"
///
/// [logging]
/// level = "debug"
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigToml {
    /// Base for relative paths; defaults to the config file's directory.
    #[serde(default)]
    pub project_root: Option<PathBuf>,

    #[serde(default)]
    pub workspace_dir: Option<PathBuf>,

    #[serde(default)]
    pub skills_dir: Option<PathBuf>,

    #[serde(default)]
    pub execution: Option<ExecutionToml>,

    /// Replaces the default mount set when present.
    #[serde(default)]
    pub mounts: Option<Vec<MountToml>>,

    #[serde(default)]
    pub logging: Option<LoggingToml>,
}

impl ConfigToml {
    pub fn parse(source: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(source)
    }
}

/// `[execution]` section.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ExecutionToml {
    #[serde(default)]
    pub backend: Option<BackendKind>,

    #[serde(default)]
    pub timeout_secs: Option<i64>,

    #[serde(default)]
    pub max_output_chars: Option<i64>,

    #[serde(default)]
    pub container_name: Option<String>,

    #[serde(default)]
    pub container_workdir: Option<String>,
}

/// One `[[mounts]]` entry.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MountToml {
    /// Virtual prefix, e.g. `/data`.
    #[serde(rename = "virtual")]
    pub virtual_prefix: String,
    /// Physical directory; relative paths resolve against the project root.
    pub physical: PathBuf,
}

/// `[logging]` section.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct LoggingToml {
    #[serde(default)]
    pub level: Option<String>,

    #[serde(default)]
    pub location: Option<bool>,

    #[serde(default)]
    pub target: Option<bool>,

    #[serde(default)]
    pub timezone: Option<TimezoneConfig>,

    #[serde(default)]
    pub modules: Option<Vec<String>>,
}

impl LoggingToml {
    /// Convert to the runtime logging config used by `init_logging`.
    pub fn to_common_logging(&self) -> vexec_utils_common::LoggingConfig {
        let defaults = vexec_utils_common::LoggingConfig::default();
        vexec_utils_common::LoggingConfig {
            level: self.level.clone().unwrap_or(defaults.level),
            location: self.location.unwrap_or(defaults.location),
            target: self.target.unwrap_or(defaults.target),
            timezone: self.timezone.unwrap_or(defaults.timezone),
            modules: self.modules.clone().unwrap_or_default(),
        }
    }
}

#[cfg(test)]
#[path = "toml_config.test.rs"]
mod tests;
