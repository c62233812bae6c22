use super::*;
use crate::response::TIMEOUT_EXIT_CODE;
use crate::response::TRUNCATION_MARKER;
use pretty_assertions::assert_eq;
use std::time::Duration;
use std::time::Instant;
use vexec_virtual_path::VirtualMount;

fn backend(dir: &std::path::Path) -> LocalExecutionBackend {
    LocalExecutionBackend::new(LocalExecConfig::new(dir).with_timeout_secs(10))
}

#[tokio::test]
async fn test_echo() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let response = backend(tmp.path()).execute("echo 'Hello, World!'").await;
    assert_eq!(response.exit_code, 0);
    assert!(response.output.contains("Hello, World!"));
    assert!(!response.truncated);
}

#[tokio::test]
async fn test_exit_code() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let response = backend(tmp.path()).execute("exit 42").await;
    assert_eq!(response.exit_code, 42);
}

#[tokio::test]
async fn test_merges_stdout_then_stderr() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let response = backend(tmp.path())
        .execute("printf out; printf err >&2")
        .await;
    assert_eq!(response.output, "out\nerr");

    let response = backend(tmp.path()).execute("printf err >&2").await;
    assert_eq!(response.output, "err");
}

#[tokio::test]
async fn test_runs_in_root_dir() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    std::fs::write(tmp.path().join("marker.txt"), "here").expect("write marker");
    let response = backend(tmp.path()).execute("cat marker.txt").await;
    assert_eq!(response.output, "here");
}

#[tokio::test]
async fn test_truncates_large_output() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let backend = LocalExecutionBackend::new(LocalExecConfig::new(tmp.path()).with_max_output_chars(1000));
    let response = backend
        .execute("head -c 2000 /dev/zero | tr '\\0' x")
        .await;
    assert_eq!(response.exit_code, 0);
    assert!(response.truncated);
    assert!(response.output.len() <= 1200);
    assert!(response.output.contains(TRUNCATION_MARKER));
}

#[tokio::test]
async fn test_timeout() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let backend = LocalExecutionBackend::new(LocalExecConfig::new(tmp.path()).with_timeout_secs(1));
    let start = Instant::now();
    let response = backend.execute("sleep 10").await;
    assert_eq!(response.exit_code, TIMEOUT_EXIT_CODE);
    assert!(response.output.contains("timed out"));
    assert!(!response.truncated);
    assert!(start.elapsed() < Duration::from_secs(5));
}

#[cfg(unix)]
#[tokio::test]
async fn test_timeout_kills_process_group() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let backend = LocalExecutionBackend::new(LocalExecConfig::new(tmp.path()).with_timeout_secs(1));
    let response = backend
        .execute("(sleep 2; touch late.txt) & sleep 10")
        .await;
    assert_eq!(response.exit_code, TIMEOUT_EXIT_CODE);

    tokio::time::sleep(Duration::from_secs(3)).await;
    assert!(!tmp.path().join("late.txt").exists());
}

#[cfg(unix)]
#[tokio::test]
async fn test_signal_exit_code() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let response = backend(tmp.path()).execute("kill -9 $$").await;
    assert_eq!(response.exit_code, 128 + 9);
}

#[tokio::test]
async fn test_spawn_failure_reports_error() {
    let backend = backend(std::path::Path::new("/nonexistent/vexec/root"));
    let response = backend.execute("echo hi").await;
    assert_eq!(response.exit_code, 1);
    assert!(response.output.starts_with("Error executing command:"));
}

#[tokio::test]
async fn test_rewrites_virtual_paths() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let data = tmp.path().join("data");
    std::fs::create_dir(&data).expect("create data dir");
    std::fs::write(data.join("x.csv"), "a,b\n1,2\n").expect("write csv");

    let resolver = VirtualPathResolver::new([
        VirtualMount::new("/", tmp.path()),
        VirtualMount::new("/data", &data),
    ])
    .expect("resolver");
    let backend = backend(tmp.path()).with_resolver(Arc::new(resolver));

    let response = backend.execute("wc -l < '/data/x.csv'").await;
    assert_eq!(response.exit_code, 0);
    assert_eq!(response.output.trim(), "2");
}

#[test]
fn test_id() {
    let backend = LocalExecutionBackend::new(LocalExecConfig::new("/srv/agent/workspace"));
    assert_eq!(backend.id(), "local-exec-workspace");
    assert_eq!(backend.id(), backend.clone().id());
    assert!(backend.resolver().is_none());
    assert_eq!(backend.config().timeout_secs, crate::DEFAULT_TIMEOUT_SECS);
}

#[tokio::test]
async fn test_concurrent_executions() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let backend = Arc::new(backend(tmp.path()));
    let tasks: Vec<_> = (0..4)
        .map(|i| {
            let backend = Arc::clone(&backend);
            tokio::spawn(async move { backend.execute(&format!("echo {i}")).await })
        })
        .collect();

    for (i, task) in tasks.into_iter().enumerate() {
        let response = task.await.expect("join");
        assert_eq!(response.output.trim(), i.to_string());
    }
}
