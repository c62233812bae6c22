//! Local host execution backend.

use std::borrow::Cow;
use std::process::ExitStatus;
use std::process::Stdio;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::process::Command;
use tokio::time::timeout;
use vexec_virtual_path::VirtualPathResolver;

use crate::config::LocalExecConfig;
use crate::executor::Executor;
use crate::response::ExecuteResponse;

/// Runs commands with `sh -c` in a workspace directory on the host.
///
/// Virtual paths in the command are rewritten to physical paths when a
/// resolver is attached. Every command runs in its own process group, and
/// the whole group is killed when the deadline passes.
#[derive(Debug, Clone)]
pub struct LocalExecutionBackend {
    id: String,
    config: LocalExecConfig,
    resolver: Option<Arc<VirtualPathResolver>>,
}

impl LocalExecutionBackend {
    pub fn new(config: LocalExecConfig) -> Self {
        let dir_name = config
            .root_dir
            .file_name()
            .map_or_else(|| "root".to_string(), |name| name.to_string_lossy().into_owned());
        Self {
            id: format!("local-exec-{dir_name}"),
            config,
            resolver: None,
        }
    }

    /// Attaches the resolver used to rewrite virtual paths before spawning.
    pub fn with_resolver(mut self, resolver: Arc<VirtualPathResolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    pub fn config(&self) -> &LocalExecConfig {
        &self.config
    }

    pub fn resolver(&self) -> Option<&Arc<VirtualPathResolver>> {
        self.resolver.as_ref()
    }

    fn prepare<'a>(&self, command: &'a str) -> Cow<'a, str> {
        match &self.resolver {
            Some(resolver) => resolver.rewrite_command(command),
            None => Cow::Borrowed(command),
        }
    }
}

#[async_trait]
impl Executor for LocalExecutionBackend {
    fn id(&self) -> &str {
        &self.id
    }

    async fn execute(&self, command: &str) -> ExecuteResponse {
        let command = self.prepare(command);
        tracing::debug!(backend = %self.id, command = %command, "executing command");

        let mut handler = Command::new("sh");
        handler
            .arg("-c")
            .arg(command.as_ref())
            .current_dir(&self.config.root_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        #[cfg(unix)]
        handler.process_group(0);

        let child = match handler.spawn() {
            Ok(child) => child,
            Err(err) => {
                tracing::warn!(backend = %self.id, error = %err, "failed to spawn command");
                return ExecuteResponse::error(err);
            }
        };
        let pid = child.id();

        match timeout(self.config.timeout(), child.wait_with_output()).await {
            Ok(Ok(output)) => ExecuteResponse::from_streams(
                &output.stdout,
                &output.stderr,
                exit_code(output.status),
                self.config.max_output_chars,
            ),
            Ok(Err(err)) => {
                tracing::warn!(backend = %self.id, error = %err, "failed to collect command output");
                ExecuteResponse::error(err)
            }
            Err(_) => {
                tracing::warn!(
                    backend = %self.id,
                    timeout_secs = self.config.timeout_secs,
                    "command timed out"
                );
                if let Some(pid) = pid {
                    kill_process_group(pid);
                }
                ExecuteResponse::timed_out(self.config.timeout_secs)
            }
        }
    }
}

/// Exit code of a finished process; `128 + signal` when killed by a signal.
fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }

    -1
}

#[cfg(unix)]
fn kill_process_group(pid: u32) {
    let Ok(pgid) = libc::pid_t::try_from(pid) else {
        return;
    };
    // The child was spawned as its own group leader, so pgid == pid.
    let rc = unsafe { libc::killpg(pgid, libc::SIGKILL) };
    if rc != 0 {
        tracing::debug!(pgid, error = %std::io::Error::last_os_error(), "killpg failed");
    }
}

#[cfg(not(unix))]
fn kill_process_group(_pid: u32) {}

#[cfg(test)]
#[path = "local.test.rs"]
mod tests;
