//! Fatal backend errors.
//!
//! These only surface while constructing a backend. Failures of an individual
//! command are reported through [`ExecuteResponse`](crate::ExecuteResponse).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExecError {
    #[error(
        "container '{name}' not found. Build and start it first:\n  \
         docker build -t {name} .\n  \
         docker run -d --name {name} -v $(pwd)/workspace:/workspace {name}"
    )]
    ContainerNotFound { name: String },

    #[error("container '{name}' is not running (status: {status}). Start it with: docker start {name}")]
    ContainerNotRunning { name: String, status: String },

    #[error("container runtime error: {0}")]
    Runtime(String),
}
