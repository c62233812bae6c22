use super::*;
use crate::config::BackendKind;
use pretty_assertions::assert_eq;
use serial_test::serial;

#[test]
#[serial]
fn test_missing_default_file_uses_defaults() {
    let tmp = tempfile::tempdir().unwrap();
    let config = load_config_from(tmp.path(), None).unwrap();
    assert_eq!(config.project_root, tmp.path());
    assert_eq!(config.workspace_dir, tmp.path().join("workspace"));
    assert_eq!(config.mounts.len(), 5);
}

#[test]
#[serial]
fn test_missing_explicit_file_is_error() {
    let tmp = tempfile::tempdir().unwrap();
    let err = load_config_from(tmp.path(), Some(Path::new("nope.toml"))).unwrap_err();
    assert!(matches!(err, ConfigError::FileNotFound(_)));
}

#[test]
#[serial]
fn test_loads_default_file_relative_to_its_dir() {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::write(
        tmp.path().join(DEFAULT_CONFIG_FILE),
        r#"
workspace_dir = "ws"

[execution]
backend = "docker"
timeout_secs = 30

[logging]
level = "debug"
"#,
    )
    .unwrap();

    let config = load_config_from(tmp.path(), None).unwrap();
    assert_eq!(config.workspace_dir, tmp.path().join("ws"));
    assert_eq!(config.backend, BackendKind::Docker);
    assert_eq!(config.timeout_secs, 30);
    assert_eq!(config.logging.level, "debug");
    // Default mounts follow the configured workspace.
    assert_eq!(config.mounts[0].physical, tmp.path().join("ws"));
    assert_eq!(config.mounts[1].physical, tmp.path().join("ws/data"));
}

#[test]
#[serial]
fn test_explicit_mounts_replace_defaults() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("custom.toml");
    std::fs::write(
        &path,
        r#"
[[mounts]]
virtual = "/"
physical = "root"

[[mounts]]
virtual = "/data"
physical = "/mnt/data"
"#,
    )
    .unwrap();

    let config = load_config_from(Path::new("/"), Some(&path)).unwrap();
    assert_eq!(config.mounts.len(), 2);
    assert_eq!(config.mounts[0].physical, tmp.path().join("root"));
    assert_eq!(config.mounts[1].physical, PathBuf::from("/mnt/data"));
}

#[test]
#[serial]
fn test_invalid_toml_names_file() {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::write(tmp.path().join(DEFAULT_CONFIG_FILE), "execution = [").unwrap();
    let err = load_config_from(tmp.path(), None).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidToml { .. }));
    assert!(err.to_string().contains(DEFAULT_CONFIG_FILE));
}

#[test]
fn test_build_config_rejects_non_positive_values() {
    let toml = ConfigToml::parse("[execution]\ntimeout_secs = 0\n").unwrap();
    assert!(build_config(toml, Path::new("/srv")).is_err());

    let toml = ConfigToml::parse("[execution]\nmax_output_chars = -1\n").unwrap();
    assert!(build_config(toml, Path::new("/srv")).is_err());
}

#[test]
fn test_build_config_project_root() {
    let toml = ConfigToml::parse("project_root = \"agent\"\n").unwrap();
    let config = build_config(toml, Path::new("/srv")).unwrap();
    assert_eq!(config.project_root, PathBuf::from("/srv/agent"));
    assert_eq!(config.skills_dir, PathBuf::from("/srv/agent/skills"));
}
