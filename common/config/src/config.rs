//! Resolved runtime configuration.

use std::fmt;
use std::path::Path;
use std::path::PathBuf;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;
use vexec_exec::ContainerExecConfig;
use vexec_exec::DEFAULT_CONTAINER_NAME;
use vexec_exec::DEFAULT_CONTAINER_WORKDIR;
use vexec_exec::DEFAULT_MAX_OUTPUT_CHARS;
use vexec_exec::DEFAULT_TIMEOUT_SECS;
use vexec_exec::LocalExecConfig;
use vexec_utils_common::LoggingConfig;
use vexec_virtual_path::VirtualMount;
use vexec_virtual_path::VirtualPathResolver;

use crate::error::ConfigError;
use crate::error::Result;

/// Subdirectories of the workspace exposed as their own mounts.
pub const WORKSPACE_SUBDIRS: [&str; 3] = ["data", "scripts", "results"];

/// Virtual prefix of the skills mount.
pub const SKILLS_PREFIX: &str = "/skills";

/// Which execution backend to build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    #[default]
    Local,
    Docker,
}

impl BackendKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Docker => "docker",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BackendKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "docker" | "container" => Ok(Self::Docker),
            other => Err(ConfigError::InvalidValue {
                field: "execution.backend",
                message: format!("unknown backend '{other}' (expected 'local' or 'docker')"),
            }),
        }
    }
}

/// Fully resolved configuration with absolute paths and defaults applied.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub project_root: PathBuf,
    pub workspace_dir: PathBuf,
    pub skills_dir: PathBuf,
    pub backend: BackendKind,
    pub timeout_secs: u64,
    pub max_output_chars: usize,
    pub container_name: String,
    pub container_workdir: String,
    /// Ordered mount list; always contains `/`.
    pub mounts: Vec<VirtualMount>,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Defaults rooted at `project_root`.
    pub fn with_root(project_root: impl Into<PathBuf>) -> Self {
        let project_root = project_root.into();
        let workspace_dir = project_root.join("workspace");
        let skills_dir = project_root.join("skills");
        let mounts = default_mounts(&workspace_dir, &skills_dir);
        Self {
            project_root,
            workspace_dir,
            skills_dir,
            backend: BackendKind::Local,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_output_chars: DEFAULT_MAX_OUTPUT_CHARS,
            container_name: DEFAULT_CONTAINER_NAME.to_string(),
            container_workdir: DEFAULT_CONTAINER_WORKDIR.to_string(),
            mounts,
            logging: LoggingConfig::default(),
        }
    }

    /// Resolves `path` against the project root when relative.
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.project_root.join(path)
        }
    }

    /// Creates the workspace, its standard subdirectories and the skills dir.
    pub fn ensure_directories(&self) -> Result<()> {
        std::fs::create_dir_all(&self.workspace_dir)?;
        for sub in WORKSPACE_SUBDIRS {
            std::fs::create_dir_all(self.workspace_dir.join(sub))?;
        }
        std::fs::create_dir_all(&self.skills_dir)?;
        tracing::debug!(workspace = %self.workspace_dir.display(), "ensured workspace directories");
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "execution.timeout_secs",
                message: "must be positive".to_string(),
            });
        }
        if self.max_output_chars == 0 {
            return Err(ConfigError::InvalidValue {
                field: "execution.max_output_chars",
                message: "must be positive".to_string(),
            });
        }
        if self.container_name.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "execution.container_name",
                message: "must not be empty".to_string(),
            });
        }
        Ok(())
    }

    pub fn resolver(&self) -> Result<VirtualPathResolver> {
        Ok(VirtualPathResolver::new(self.mounts.iter().cloned())?)
    }

    pub fn local_exec_config(&self) -> LocalExecConfig {
        LocalExecConfig::new(&self.workspace_dir)
            .with_timeout_secs(self.timeout_secs)
            .with_max_output_chars(self.max_output_chars)
    }

    pub fn container_exec_config(&self) -> ContainerExecConfig {
        ContainerExecConfig::new(&self.container_name)
            .with_workdir(&self.container_workdir)
            .with_timeout_secs(self.timeout_secs)
            .with_max_output_chars(self.max_output_chars)
    }
}

/// `/` → workspace, `/data` `/scripts` `/results` → workspace subdirs,
/// `/skills` → skills dir.
pub fn default_mounts(workspace_dir: &Path, skills_dir: &Path) -> Vec<VirtualMount> {
    let mut mounts = vec![VirtualMount::new("/", workspace_dir)];
    mounts.extend(
        WORKSPACE_SUBDIRS
            .iter()
            .map(|sub| VirtualMount::new(format!("/{sub}"), workspace_dir.join(sub))),
    );
    mounts.push(VirtualMount::new(SKILLS_PREFIX, skills_dir));
    mounts
}

#[cfg(test)]
#[path = "config.test.rs"]
mod tests;
