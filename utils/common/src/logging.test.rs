use super::*;
use pretty_assertions::assert_eq;
use std::io;
use std::sync::Arc;
use std::sync::Mutex;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;

#[test]
fn test_configurable_timer_local() {
    let timer = ConfigurableTimer::new(TimezoneConfig::Local);
    let mut buf = String::new();
    let mut writer = Writer::new(&mut buf);
    timer.format_time(&mut writer).unwrap();
    assert!(!buf.is_empty());
    assert!(!buf.ends_with('Z'));
}

#[test]
fn test_configurable_timer_utc() {
    let timer = ConfigurableTimer::new(TimezoneConfig::Utc);
    let mut buf = String::new();
    let mut writer = Writer::new(&mut buf);
    timer.format_time(&mut writer).unwrap();
    assert!(buf.ends_with('Z'));
}

#[test]
fn test_build_env_filter_with_default() {
    let logging = LoggingConfig::default();
    let filter = build_env_filter(&logging, "error");
    let _ = format!("{filter:?}");
}

#[test]
fn test_build_env_filter_with_modules() {
    let logging = LoggingConfig {
        level: "warn".to_string(),
        modules: vec![
            "vexec_exec=debug".to_string(),
            "vexec_virtual_path=trace".to_string(),
        ],
        ..LoggingConfig::default()
    };
    let filter = build_env_filter(&logging, "error");
    let filter_str = format!("{filter}");
    assert!(filter_str.contains("vexec_exec=debug") || std::env::var("RUST_LOG").is_ok());
}

#[test]
fn test_build_env_filter_invalid_directive_falls_back() {
    let logging = LoggingConfig {
        level: "not a level ===".to_string(),
        ..LoggingConfig::default()
    };
    let filter = build_env_filter(&logging, "error");
    let _ = format!("{filter:?}");
}

#[test]
fn test_logging_config_deserialize_partial() {
    let logging: LoggingConfig =
        serde_json::from_str(r#"{"level": "debug", "timezone": "utc"}"#).unwrap();
    assert_eq!(logging.level, "debug");
    assert_eq!(logging.timezone, TimezoneConfig::Utc);
    assert!(!logging.location);
    assert!(logging.modules.is_empty());
}

#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Captured {
    fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

#[test]
fn test_scoped_writer_captures_startup_events() {
    if std::env::var("RUST_LOG").is_ok() {
        return;
    }
    let captured = Captured::default();
    let writer = captured.clone();
    let logging = LoggingConfig {
        level: "debug".to_string(),
        ..LoggingConfig::default()
    };

    let value = with_scoped_writer(&logging, move || writer.clone(), || {
        tracing::debug!(file = "vexec.toml", "loaded config file");
        42
    });

    assert_eq!(value, 42);
    let text = captured.text();
    assert!(text.contains("loaded config file"), "{text}");
    assert!(text.contains("vexec.toml"));

    // The subscriber is gone once the closure returns.
    tracing::debug!("after scope");
    assert!(!captured.text().contains("after scope"));
}

#[test]
fn test_scoped_writer_respects_level() {
    if std::env::var("RUST_LOG").is_ok() {
        return;
    }
    let captured = Captured::default();
    let writer = captured.clone();
    with_scoped_writer(&LoggingConfig::default(), move || writer.clone(), || {
        tracing::debug!("hidden at info");
        tracing::info!("shown at info");
    });
    let text = captured.text();
    assert!(!text.contains("hidden at info"));
    assert!(text.contains("shown at info"));
}
