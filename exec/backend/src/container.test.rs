use super::*;
use crate::response::TIMEOUT_EXIT_CODE;
use crate::response::TRUNCATION_MARKER;
use pretty_assertions::assert_eq;
use std::sync::Mutex;

/// In-memory runtime that answers execs from a canned handler.
#[derive(Debug)]
struct FakeRuntime {
    status: Result<ContainerStatus, String>,
    hang: bool,
    requests: Mutex<Vec<ExecRequest>>,
    killed: Mutex<Vec<(String, String)>>,
    handler: fn(&ExecRequest) -> Result<ExecOutput, ExecError>,
}

impl FakeRuntime {
    fn running(handler: fn(&ExecRequest) -> Result<ExecOutput, ExecError>) -> Self {
        Self {
            status: Ok(ContainerStatus::Running),
            hang: false,
            requests: Mutex::new(Vec::new()),
            killed: Mutex::new(Vec::new()),
            handler,
        }
    }

    fn with_status(status: ContainerStatus) -> Self {
        Self {
            status: Ok(status),
            ..Self::running(echo_handler)
        }
    }
}

#[async_trait]
impl ContainerRuntime for FakeRuntime {
    async fn container_status(&self, _name: &str) -> Result<ContainerStatus, ExecError> {
        self.status.clone().map_err(ExecError::Runtime)
    }

    async fn exec(&self, request: ExecRequest) -> Result<ExecOutput, ExecError> {
        self.requests.lock().unwrap().push(request.clone());
        if self.hang {
            std::future::pending::<()>().await;
        }
        (self.handler)(&request)
    }

    async fn kill_tagged(&self, container: &str, tag: &str) -> Result<(), ExecError> {
        self.killed
            .lock()
            .unwrap()
            .push((container.to_string(), tag.to_string()));
        Ok(())
    }
}

fn echo_handler(request: &ExecRequest) -> Result<ExecOutput, ExecError> {
    Ok(ExecOutput {
        stdout: request.cmd[2].clone().into_bytes(),
        stderr: Vec::new(),
        exit_code: 0,
    })
}

fn tag_of(request: &ExecRequest) -> Option<String> {
    request
        .env
        .iter()
        .find_map(|entry| entry.strip_prefix("VEXEC_EXEC_TAG="))
        .map(str::to_string)
}

fn config() -> ContainerExecConfig {
    ContainerExecConfig::new("sandbox").with_timeout_secs(1)
}

async fn connect(runtime: FakeRuntime) -> (ContainerExecutionBackend, Arc<FakeRuntime>) {
    let runtime = Arc::new(runtime);
    let backend = ContainerExecutionBackend::connect(config(), runtime.clone())
        .await
        .expect("connect");
    (backend, runtime)
}

#[tokio::test]
async fn test_connect_missing_container() {
    let runtime = Arc::new(FakeRuntime::with_status(ContainerStatus::Missing));
    let err = ContainerExecutionBackend::connect(config(), runtime)
        .await
        .unwrap_err();
    assert!(matches!(err, ExecError::ContainerNotFound { ref name } if name == "sandbox"));
    let message = err.to_string();
    assert!(message.contains("sandbox"));
    assert!(message.contains("docker run -d --name sandbox"));
}

#[tokio::test]
async fn test_connect_stopped_container() {
    let runtime = Arc::new(FakeRuntime::with_status(ContainerStatus::NotRunning(
        "exited".to_string(),
    )));
    let err = ContainerExecutionBackend::connect(config(), runtime.clone())
        .await
        .unwrap_err();
    let message = err.to_string();
    assert!(message.contains("exited"));
    assert!(message.contains("docker start sandbox"));
    assert!(runtime.requests.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_connect_runtime_unreachable() {
    let runtime = Arc::new(FakeRuntime {
        status: Err("daemon unreachable".to_string()),
        ..FakeRuntime::running(echo_handler)
    });
    let err = ContainerExecutionBackend::connect(config(), runtime)
        .await
        .unwrap_err();
    assert!(matches!(err, ExecError::Runtime(_)));
}

#[tokio::test]
async fn test_execute_passes_command_unchanged() {
    let (backend, runtime) = connect(FakeRuntime::running(echo_handler)).await;
    let response = backend.execute("cat '/data/x.csv'").await;
    assert_eq!(response.output, "cat '/data/x.csv'");
    assert_eq!(response.exit_code, 0);

    let requests = runtime.requests.lock().unwrap();
    let request = &requests[0];
    assert_eq!(request.container, "sandbox");
    assert_eq!(request.workdir, "/workspace");
    assert_eq!(request.cmd[0], "sh");
    assert_eq!(request.cmd[1], "-c");
    assert!(tag_of(request).is_some());
}

#[tokio::test]
async fn test_execute_forwards_parent_environment() {
    let (backend, runtime) = connect(FakeRuntime::running(echo_handler)).await;
    backend.execute("env").await;

    let requests = runtime.requests.lock().unwrap();
    let env = &requests[0].env;
    let path = std::env::var("PATH").unwrap();
    assert!(env.contains(&format!("PATH={path}")), "{env:?}");
    assert!(env.last().unwrap().starts_with("VEXEC_EXEC_TAG="));
    assert_eq!(
        env.iter()
            .filter(|entry| entry.starts_with("VEXEC_EXEC_TAG="))
            .count(),
        1
    );
}

#[tokio::test]
async fn test_each_exec_gets_unique_tag() {
    let (backend, runtime) = connect(FakeRuntime::running(echo_handler)).await;
    backend.execute("true").await;
    backend.execute("true").await;
    let requests = runtime.requests.lock().unwrap();
    assert_ne!(tag_of(&requests[0]), tag_of(&requests[1]));
}

#[tokio::test]
async fn test_execute_merges_and_reports_exit_code() {
    fn handler(_: &ExecRequest) -> Result<ExecOutput, ExecError> {
        Ok(ExecOutput {
            stdout: b"partial".to_vec(),
            stderr: b"boom".to_vec(),
            exit_code: 42,
        })
    }
    let (backend, _) = connect(FakeRuntime::running(handler)).await;
    let response = backend.execute("exit 42").await;
    assert_eq!(response.output, "partial\nboom");
    assert_eq!(response.exit_code, 42);
}

#[tokio::test]
async fn test_execute_truncates() {
    fn handler(_: &ExecRequest) -> Result<ExecOutput, ExecError> {
        Ok(ExecOutput {
            stdout: vec![b'x'; 2000],
            ..ExecOutput::default()
        })
    }
    let runtime = Arc::new(FakeRuntime::running(handler));
    let backend =
        ContainerExecutionBackend::connect(config().with_max_output_chars(1000), runtime)
            .await
            .expect("connect");
    let response = backend.execute("yes x").await;
    assert!(response.truncated);
    assert!(response.output.len() <= 1200);
    assert!(response.output.contains(TRUNCATION_MARKER));
}

#[tokio::test]
async fn test_execute_runtime_error() {
    fn handler(_: &ExecRequest) -> Result<ExecOutput, ExecError> {
        Err(ExecError::Runtime("connection reset".to_string()))
    }
    let (backend, _) = connect(FakeRuntime::running(handler)).await;
    let response = backend.execute("ls").await;
    assert_eq!(response.exit_code, 1);
    assert!(response.output.starts_with("Error executing command:"));
    assert!(response.output.contains("connection reset"));
}

#[tokio::test]
async fn test_timeout_kills_tagged_processes() {
    let (backend, runtime) = connect(FakeRuntime {
        hang: true,
        ..FakeRuntime::running(echo_handler)
    })
    .await;
    let response = backend.execute("sleep 10").await;
    assert_eq!(response.exit_code, TIMEOUT_EXIT_CODE);
    assert_eq!(response.output, "Command timed out after 1s");

    let tag = tag_of(&runtime.requests.lock().unwrap()[0]).unwrap();
    let killed = runtime.killed.lock().unwrap();
    assert_eq!(*killed, vec![("sandbox".to_string(), tag)]);
}

#[tokio::test]
async fn test_id() {
    let (backend, _) = connect(FakeRuntime::running(echo_handler)).await;
    assert_eq!(backend.id(), "docker-exec-sandbox");
    assert_eq!(backend.config().workdir, "/workspace");
}

#[test]
fn test_kill_script_targets_tag() {
    let script = kill_tagged_script("abc-123");
    assert!(script.contains("grep -qx 'VEXEC_EXEC_TAG=abc-123'"));
    assert!(script.contains("kill -9 \"${p#/proc/}\""));
}
