use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_with_root_defaults() {
    let config = AppConfig::with_root("/srv/agent");
    assert_eq!(config.workspace_dir, PathBuf::from("/srv/agent/workspace"));
    assert_eq!(config.skills_dir, PathBuf::from("/srv/agent/skills"));
    assert_eq!(config.timeout_secs, 120);
    assert_eq!(config.max_output_chars, 50_000);
    assert_eq!(config.container_name, "code-execution-agent");
    assert_eq!(config.container_workdir, "/workspace");
    assert_eq!(config.backend, BackendKind::Local);

    let prefixes: Vec<_> = config
        .mounts
        .iter()
        .map(|m| m.virtual_prefix.as_str())
        .collect();
    assert_eq!(prefixes, vec!["/", "/data", "/scripts", "/results", "/skills"]);
    assert_eq!(
        config.mounts[1].physical,
        PathBuf::from("/srv/agent/workspace/data")
    );
}

#[test]
fn test_backend_kind_from_str() {
    assert_eq!("local".parse::<BackendKind>().unwrap(), BackendKind::Local);
    assert_eq!(" Docker ".parse::<BackendKind>().unwrap(), BackendKind::Docker);
    assert!("podman".parse::<BackendKind>().is_err());
    assert_eq!(BackendKind::Docker.to_string(), "docker");
}

#[test]
fn test_validate() {
    let mut config = AppConfig::with_root("/srv/agent");
    assert!(config.validate().is_ok());

    config.timeout_secs = 0;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidValue {
            field: "execution.timeout_secs",
            ..
        })
    ));

    config.timeout_secs = 5;
    config.max_output_chars = 0;
    assert!(config.validate().is_err());
}

#[test]
fn test_ensure_directories() {
    let tmp = tempfile::tempdir().unwrap();
    let config = AppConfig::with_root(tmp.path());
    config.ensure_directories().unwrap();
    for sub in ["workspace", "workspace/data", "workspace/scripts", "workspace/results", "skills"] {
        assert!(tmp.path().join(sub).is_dir(), "{sub} missing");
    }
    // Idempotent.
    config.ensure_directories().unwrap();
}

#[test]
fn test_backend_configs() {
    let mut config = AppConfig::with_root("/srv/agent");
    config.timeout_secs = 7;
    config.max_output_chars = 99;

    let local = config.local_exec_config();
    assert_eq!(local.root_dir, PathBuf::from("/srv/agent/workspace"));
    assert_eq!(local.timeout_secs, 7);
    assert_eq!(local.max_output_chars, 99);

    let container = config.container_exec_config();
    assert_eq!(container.container_name, "code-execution-agent");
    assert_eq!(container.workdir, "/workspace");
    assert_eq!(container.timeout_secs, 7);
}

#[test]
fn test_resolver_uses_mounts() {
    let config = AppConfig::with_root("/srv/agent");
    let resolver = config.resolver().unwrap();
    assert_eq!(
        resolver.resolve("/skills/csv/SKILL.md"),
        Some(PathBuf::from("/srv/agent/skills/csv/SKILL.md"))
    );
}

#[test]
fn test_resolver_requires_root_mount() {
    let mut config = AppConfig::with_root("/srv/agent");
    config.mounts.retain(|m| m.virtual_prefix != "/");
    assert!(matches!(config.resolver(), Err(ConfigError::Mounts(_))));
}

#[test]
fn test_resolve_path() {
    let config = AppConfig::with_root("/srv/agent");
    assert_eq!(
        config.resolve_path(Path::new("ws")),
        PathBuf::from("/srv/agent/ws")
    );
    assert_eq!(config.resolve_path(Path::new("/abs")), PathBuf::from("/abs"));
}
