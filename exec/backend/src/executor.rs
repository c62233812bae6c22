use async_trait::async_trait;

use crate::response::ExecuteResponse;

/// A backend that runs shell command lines.
///
/// Implementations hold no per-call state, so one instance may serve any
/// number of concurrent `execute()` calls.
#[async_trait]
pub trait Executor: Send + Sync {
    /// Stable identity, e.g. `local-exec-workspace` or `docker-exec-sandbox`.
    fn id(&self) -> &str;

    /// Runs `command` to completion or until the configured deadline.
    ///
    /// Never fails: spawn errors, runtime errors and deadline overruns are
    /// reported through the response's exit code and output.
    async fn execute(&self, command: &str) -> ExecuteResponse;
}
