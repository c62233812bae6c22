use super::*;
use clap::CommandFactory;
use pretty_assertions::assert_eq;

#[test]
fn test_cli_definition() {
    Cli::command().debug_assert();
}

#[test]
fn test_parse_exec_with_overrides() {
    let cli = Cli::try_parse_from([
        "vexec",
        "exec",
        "cat /data/a.csv",
        "--backend",
        "docker",
        "--timeout",
        "5",
        "--json",
        "-v",
    ])
    .unwrap();
    assert!(cli.verbose);
    match cli.command {
        Command::Exec {
            command,
            backend,
            timeout,
            json,
        } => {
            assert_eq!(command, "cat /data/a.csv");
            assert_eq!(backend, Some(BackendKind::Docker));
            assert_eq!(timeout, Some(5));
            assert!(json);
        }
        _ => panic!("expected exec"),
    }
}

#[test]
fn test_parse_rejects_unknown_backend() {
    assert!(Cli::try_parse_from(["vexec", "exec", "ls", "--backend", "podman"]).is_err());
}

#[test]
fn test_parse_read_defaults() {
    let cli = Cli::try_parse_from(["vexec", "--config", "x.toml", "read", "/data/a.csv"]).unwrap();
    assert_eq!(cli.config, Some(PathBuf::from("x.toml")));
    match cli.command {
        Command::Read {
            path,
            offset,
            limit,
        } => {
            assert_eq!(path, "/data/a.csv");
            assert_eq!(offset, 0);
            assert_eq!(limit, DEFAULT_READ_LIMIT);
        }
        _ => panic!("expected read"),
    }
}

#[test]
fn test_apply_exec_overrides() {
    let mut config = AppConfig::with_root("/srv/project");
    apply_exec_overrides(&mut config, Some(BackendKind::Docker), Some(7)).unwrap();
    assert_eq!(config.backend, BackendKind::Docker);
    assert_eq!(config.timeout_secs, 7);

    assert!(apply_exec_overrides(&mut config, None, Some(0)).is_err());
}

#[test]
fn test_exit_status() {
    assert_eq!(exit_status(0), 0);
    assert_eq!(exit_status(124), 124);
    assert_eq!(exit_status(-1), 1);
    assert_eq!(exit_status(300), 1);
}

#[test]
fn test_format_entry() {
    let dir = FileInfo {
        path: "/data".to_string(),
        is_dir: true,
        size: 0,
        modified_at: None,
    };
    let file = FileInfo {
        path: "/data/a.csv".to_string(),
        is_dir: false,
        size: 12,
        modified_at: None,
    };
    assert_eq!(format_entry(&dir), "/data/");
    assert_eq!(format_entry(&file), "/data/a.csv\t12");
}

#[test]
fn test_effective_logging_verbose_overrides_level() {
    let logging = LoggingConfig {
        level: "warn".to_string(),
        modules: vec!["vexec_exec=trace".to_string()],
        ..LoggingConfig::default()
    };

    let verbose = effective_logging(&logging, true);
    assert_eq!(verbose.level, "info,vexec=debug");
    assert_eq!(verbose.modules, logging.modules);

    assert_eq!(effective_logging(&logging, false), logging);
}
