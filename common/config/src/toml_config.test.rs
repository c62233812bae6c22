use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_parse_empty() {
    let config = ConfigToml::parse("").unwrap();
    assert_eq!(config, ConfigToml::default());
}

#[test]
fn test_parse_full() {
    let config = ConfigToml::parse(
        r#"
workspace_dir = "ws"
skills_dir = "/opt/skills"

[execution]
backend = "docker"
timeout_secs = 30
max_output_chars = 1000
container_name = "sandbox"
container_workdir = "/work"

[[mounts]]
virtual = "/"
physical = "ws"

[[mounts]]
virtual = "/data"
physical = "/mnt/data"

[logging]
level = "debug"
timezone = "utc"
modules = ["vexec_exec=trace"]
"#,
    )
    .unwrap();

    assert_eq!(config.workspace_dir, Some(PathBuf::from("ws")));
    let execution = config.execution.unwrap();
    assert_eq!(execution.backend, Some(BackendKind::Docker));
    assert_eq!(execution.timeout_secs, Some(30));
    assert_eq!(execution.container_workdir.as_deref(), Some("/work"));

    let mounts = config.mounts.unwrap();
    assert_eq!(mounts.len(), 2);
    assert_eq!(mounts[1].virtual_prefix, "/data");
    assert_eq!(mounts[1].physical, PathBuf::from("/mnt/data"));

    let logging = config.logging.unwrap().to_common_logging();
    assert_eq!(logging.level, "debug");
    assert_eq!(logging.timezone, TimezoneConfig::Utc);
    assert_eq!(logging.modules, vec!["vexec_exec=trace".to_string()]);
}

#[test]
fn test_unknown_backend_rejected() {
    let err = ConfigToml::parse("[execution]\nbackend = \"podman\"\n").unwrap_err();
    assert!(err.to_string().contains("podman") || err.to_string().contains("unknown variant"));
}

#[test]
fn test_unknown_field_rejected() {
    assert!(ConfigToml::parse("timeout = 5\n").is_err());
}

#[test]
fn test_logging_defaults() {
    let logging = LoggingToml::default().to_common_logging();
    assert_eq!(logging, vexec_utils_common::LoggingConfig::default());
}
