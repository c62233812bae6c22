//! [`ContainerRuntime`] backed by the Docker Engine API.

use async_trait::async_trait;
use bollard::Docker;
use bollard::container::InspectContainerOptions;
use bollard::container::LogOutput;
use bollard::errors::Error as BollardError;
use bollard::exec::CreateExecOptions;
use bollard::exec::StartExecResults;
use futures::StreamExt;

use crate::container::ContainerRuntime;
use crate::container::ContainerStatus;
use crate::container::ExecOutput;
use crate::container::ExecRequest;
use crate::container::kill_tagged_script;
use crate::error::ExecError;

/// Docker daemon reached through its local socket.
#[derive(Debug, Clone)]
pub struct DockerRuntime {
    docker: Docker,
}

impl DockerRuntime {
    /// Connects with the platform defaults (`DOCKER_HOST` or the local socket).
    pub fn connect_local() -> Result<Self, ExecError> {
        let docker = Docker::connect_with_local_defaults().map_err(runtime_error)?;
        Ok(Self { docker })
    }

    pub fn new(docker: Docker) -> Self {
        Self { docker }
    }
}

#[async_trait]
impl ContainerRuntime for DockerRuntime {
    async fn container_status(&self, name: &str) -> Result<ContainerStatus, ExecError> {
        let inspect = match self
            .docker
            .inspect_container(name, None::<InspectContainerOptions>)
            .await
        {
            Ok(inspect) => inspect,
            Err(err) if is_not_found(&err) => return Ok(ContainerStatus::Missing),
            Err(err) => return Err(runtime_error(err)),
        };

        let state = inspect.state.unwrap_or_default();
        if state.running.unwrap_or(false) {
            return Ok(ContainerStatus::Running);
        }
        let status = state
            .status
            .map_or_else(|| "unknown".to_string(), |status| status.to_string());
        Ok(ContainerStatus::NotRunning(status))
    }

    async fn exec(&self, request: ExecRequest) -> Result<ExecOutput, ExecError> {
        let exec = self
            .docker
            .create_exec(
                &request.container,
                CreateExecOptions {
                    attach_stdout: Some(true),
                    attach_stderr: Some(true),
                    cmd: Some(request.cmd),
                    env: Some(request.env),
                    working_dir: Some(request.workdir),
                    ..Default::default()
                },
            )
            .await
            .map_err(runtime_error)?;

        let mut output = ExecOutput::default();
        match self
            .docker
            .start_exec(&exec.id, None)
            .await
            .map_err(runtime_error)?
        {
            StartExecResults::Attached { output: mut stream, .. } => {
                while let Some(chunk) = stream.next().await {
                    match chunk.map_err(runtime_error)? {
                        LogOutput::StdOut { message } | LogOutput::Console { message } => {
                            output.stdout.extend_from_slice(&message);
                        }
                        LogOutput::StdErr { message } => output.stderr.extend_from_slice(&message),
                        LogOutput::StdIn { .. } => {}
                    }
                }
            }
            StartExecResults::Detached => {
                return Err(ExecError::Runtime("exec started detached".to_string()));
            }
        }

        let inspect = self
            .docker
            .inspect_exec(&exec.id)
            .await
            .map_err(runtime_error)?;
        output.exit_code = inspect
            .exit_code
            .and_then(|code| i32::try_from(code).ok())
            .unwrap_or(-1);
        Ok(output)
    }

    async fn kill_tagged(&self, container: &str, tag: &str) -> Result<(), ExecError> {
        let request = ExecRequest {
            container: container.to_string(),
            cmd: vec!["sh".to_string(), "-c".to_string(), kill_tagged_script(tag)],
            workdir: "/".to_string(),
            env: Vec::new(),
        };
        let output = self.exec(request).await?;
        tracing::debug!(container, tag, exit_code = output.exit_code, "killed tagged processes");
        Ok(())
    }
}

fn is_not_found(err: &BollardError) -> bool {
    matches!(
        err,
        BollardError::DockerResponseServerError {
            status_code: 404,
            ..
        }
    )
}

fn runtime_error(err: BollardError) -> ExecError {
    ExecError::Runtime(err.to_string())
}
