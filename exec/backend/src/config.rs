//! Backend configuration.

use std::path::PathBuf;
use std::time::Duration;

/// Default command deadline in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Default output bound in characters.
pub const DEFAULT_MAX_OUTPUT_CHARS: usize = 50_000;

/// Working directory inside the container.
pub const DEFAULT_CONTAINER_WORKDIR: &str = "/workspace";

/// Container looked up when none is configured.
pub const DEFAULT_CONTAINER_NAME: &str = "code-execution-agent";

/// Configuration for [`LocalExecutionBackend`](crate::LocalExecutionBackend).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalExecConfig {
    /// Working directory of every spawned command.
    pub root_dir: PathBuf,
    pub timeout_secs: u64,
    pub max_output_chars: usize,
}

impl LocalExecConfig {
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_output_chars: DEFAULT_MAX_OUTPUT_CHARS,
        }
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    pub fn with_max_output_chars(mut self, max_output_chars: usize) -> Self {
        self.max_output_chars = max_output_chars;
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Configuration for [`ContainerExecutionBackend`](crate::ContainerExecutionBackend).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerExecConfig {
    pub container_name: String,
    /// Working directory of every exec inside the container.
    pub workdir: String,
    pub timeout_secs: u64,
    pub max_output_chars: usize,
}

impl Default for ContainerExecConfig {
    fn default() -> Self {
        Self {
            container_name: DEFAULT_CONTAINER_NAME.to_string(),
            workdir: DEFAULT_CONTAINER_WORKDIR.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_output_chars: DEFAULT_MAX_OUTPUT_CHARS,
        }
    }
}

impl ContainerExecConfig {
    pub fn new(container_name: impl Into<String>) -> Self {
        Self {
            container_name: container_name.into(),
            ..Self::default()
        }
    }

    pub fn with_workdir(mut self, workdir: impl Into<String>) -> Self {
        self.workdir = workdir.into();
        self
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    pub fn with_max_output_chars(mut self, max_output_chars: usize) -> Self {
        self.max_output_chars = max_output_chars;
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
