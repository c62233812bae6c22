//! Execution backends that run agent shell commands.
//!
//! Two backends implement the [`Executor`] contract:
//!
//! - [`LocalExecutionBackend`]: `sh -c` child process rooted at a workspace
//!   directory, with virtual paths rewritten through a
//!   [`VirtualPathResolver`](vexec_virtual_path::VirtualPathResolver)
//! - [`ContainerExecutionBackend`]: exec inside an already running container
//!   through a [`ContainerRuntime`] (Docker via bollard in production)
//!
//! Both merge stdout and stderr, bound the output with [`truncate_output`]
//! and enforce a hard deadline. `execute()` never fails; process problems are
//! reported inside the [`ExecuteResponse`].

mod config;
mod container;
mod docker;
mod error;
mod executor;
mod local;
mod response;

pub use config::ContainerExecConfig;
pub use config::DEFAULT_CONTAINER_NAME;
pub use config::DEFAULT_CONTAINER_WORKDIR;
pub use config::DEFAULT_MAX_OUTPUT_CHARS;
pub use config::DEFAULT_TIMEOUT_SECS;
pub use config::LocalExecConfig;
pub use container::ContainerExecutionBackend;
pub use container::ContainerRuntime;
pub use container::ContainerStatus;
pub use container::EXEC_TAG_ENV;
pub use container::ExecOutput;
pub use container::ExecRequest;
pub use docker::DockerRuntime;
pub use error::ExecError;
pub use executor::Executor;
pub use local::LocalExecutionBackend;
pub use response::ExecuteResponse;
pub use response::TIMEOUT_EXIT_CODE;
pub use response::TRUNCATION_MARKER;
pub use response::merge_output;
pub use response::truncate_output;
