//! Execution inside an already running container.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::timeout;

use crate::config::ContainerExecConfig;
use crate::error::ExecError;
use crate::executor::Executor;
use crate::response::ExecuteResponse;

/// Environment variable carrying the per-exec tag used to find and kill the
/// processes of a timed out command.
pub const EXEC_TAG_ENV: &str = "VEXEC_EXEC_TAG";

/// Upper bound for the cleanup exec issued after a deadline.
const KILL_TIMEOUT: Duration = Duration::from_secs(10);

/// Observed state of the target container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContainerStatus {
    Running,
    /// Present but not running; carries the runtime's status text.
    NotRunning(String),
    Missing,
}

/// A command to run inside a container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecRequest {
    pub container: String,
    pub cmd: Vec<String>,
    pub workdir: String,
    /// `KEY=value` pairs added to the exec environment.
    pub env: Vec<String>,
}

/// Raw result of a finished exec.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecOutput {
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
    pub exit_code: i32,
}

/// The container engine operations the backend relies on.
#[async_trait]
pub trait ContainerRuntime: Send + Sync + fmt::Debug {
    async fn container_status(&self, name: &str) -> Result<ContainerStatus, ExecError>;

    /// Runs a command to completion and collects its output.
    async fn exec(&self, request: ExecRequest) -> Result<ExecOutput, ExecError>;

    /// Kills every process in `container` whose environment has
    /// `VEXEC_EXEC_TAG=<tag>`.
    async fn kill_tagged(&self, container: &str, tag: &str) -> Result<(), ExecError>;
}

/// Runs commands with `sh -c` inside a pre-existing container.
///
/// Commands are passed through unchanged: the container's own mounts
/// already expose the virtual paths.
#[derive(Debug, Clone)]
pub struct ContainerExecutionBackend {
    id: String,
    config: ContainerExecConfig,
    runtime: Arc<dyn ContainerRuntime>,
}

impl ContainerExecutionBackend {
    /// Verifies the container is running and builds the backend.
    pub async fn connect(
        config: ContainerExecConfig,
        runtime: Arc<dyn ContainerRuntime>,
    ) -> Result<Self, ExecError> {
        let name = config.container_name.clone();
        match runtime.container_status(&name).await? {
            ContainerStatus::Running => {}
            ContainerStatus::NotRunning(status) => {
                return Err(ExecError::ContainerNotRunning { name, status });
            }
            ContainerStatus::Missing => return Err(ExecError::ContainerNotFound { name }),
        }

        tracing::info!(container = %name, workdir = %config.workdir, "container backend ready");
        Ok(Self {
            id: format!("docker-exec-{name}"),
            config,
            runtime,
        })
    }

    /// Connects to the local Docker daemon and verifies the container.
    pub async fn connect_docker(config: ContainerExecConfig) -> Result<Self, ExecError> {
        let runtime = crate::docker::DockerRuntime::connect_local()?;
        Self::connect(config, Arc::new(runtime)).await
    }

    pub fn config(&self) -> &ContainerExecConfig {
        &self.config
    }

    async fn kill_tagged(&self, tag: &str) {
        let name = &self.config.container_name;
        match timeout(KILL_TIMEOUT, self.runtime.kill_tagged(name, tag)).await {
            Ok(Ok(())) => {}
            Ok(Err(err)) => {
                tracing::warn!(container = %name, error = %err, "failed to kill timed out command");
            }
            Err(_) => tracing::warn!(container = %name, "killing timed out command did not finish"),
        }
    }
}

#[async_trait]
impl Executor for ContainerExecutionBackend {
    fn id(&self) -> &str {
        &self.id
    }

    async fn execute(&self, command: &str) -> ExecuteResponse {
        let tag = uuid::Uuid::new_v4().to_string();
        let request = ExecRequest {
            container: self.config.container_name.clone(),
            cmd: vec!["sh".to_string(), "-c".to_string(), command.to_string()],
            workdir: self.config.workdir.clone(),
            env: exec_env(&tag),
        };
        tracing::debug!(backend = %self.id, command, tag = %tag, "executing command");

        match timeout(self.config.timeout(), self.runtime.exec(request)).await {
            Ok(Ok(output)) => ExecuteResponse::from_streams(
                &output.stdout,
                &output.stderr,
                output.exit_code,
                self.config.max_output_chars,
            ),
            Ok(Err(err)) => {
                tracing::warn!(backend = %self.id, error = %err, "container exec failed");
                ExecuteResponse::error(err)
            }
            Err(_) => {
                tracing::warn!(
                    backend = %self.id,
                    timeout_secs = self.config.timeout_secs,
                    "command timed out"
                );
                self.kill_tagged(&tag).await;
                ExecuteResponse::timed_out(self.config.timeout_secs)
            }
        }
    }
}

/// Fresh copy of the parent environment with the exec tag appended.
///
/// Variables that are not valid UTF-8 cannot cross the Engine API and are
/// skipped.
pub(crate) fn exec_env(tag: &str) -> Vec<String> {
    let mut env: Vec<String> = std::env::vars_os()
        .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
        .filter(|(key, _)| key != EXEC_TAG_ENV)
        .map(|(key, value)| format!("{key}={value}"))
        .collect();
    env.push(format!("{EXEC_TAG_ENV}={tag}"));
    env
}

/// Shell script that kills every process whose environment carries the tag.
///
/// The script's own process does not carry the tag, so it never kills itself.
pub(crate) fn kill_tagged_script(tag: &str) -> String {
    format!(
        "for p in /proc/[0-9]*; do \
         if tr '\\0' '\\n' < \"$p/environ\" 2>/dev/null | grep -qx '{EXEC_TAG_ENV}={tag}'; then \
         kill -9 \"${{p#/proc/}}\" 2>/dev/null; \
         fi; \
         done; true"
    )
}

#[cfg(test)]
#[path = "container.test.rs"]
mod tests;
