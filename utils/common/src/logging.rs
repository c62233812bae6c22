//! Tracing subscriber setup shared by the binaries.

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::prelude::*;

/// Logging configuration for the tracing subscriber.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Show file name and line number in log output.
    pub location: bool,

    /// Show module path (target) in log output.
    pub target: bool,

    pub timezone: TimezoneConfig,

    /// Default log level (trace, debug, info, warn, error).
    pub level: String,

    /// Module-specific directives, e.g. `vexec_exec=debug`.
    pub modules: Vec<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            location: false,
            target: false,
            timezone: TimezoneConfig::Local,
            level: "info".to_string(),
            modules: vec![],
        }
    }
}

/// Timezone for log timestamps.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TimezoneConfig {
    #[default]
    Local,
    Utc,
}

/// A timer that formats timestamps in either the local timezone or UTC.
#[derive(Debug, Clone)]
pub struct ConfigurableTimer {
    timezone: TimezoneConfig,
}

impl ConfigurableTimer {
    pub fn new(timezone: TimezoneConfig) -> Self {
        Self { timezone }
    }
}

impl FormatTime for ConfigurableTimer {
    fn format_time(&self, w: &mut Writer<'_>) -> fmt::Result {
        match self.timezone {
            TimezoneConfig::Local => {
                let now = chrono::Local::now();
                write!(w, "{}", now.format("%Y-%m-%d %H:%M:%S%.3f"))
            }
            TimezoneConfig::Utc => {
                let now = chrono::Utc::now();
                write!(w, "{}", now.format("%Y-%m-%d %H:%M:%S%.3fZ"))
            }
        }
    }
}

/// Builds the filter from `RUST_LOG` if set, otherwise from the config.
///
/// Falls back to `default_level` when the directives do not parse.
pub fn build_env_filter(logging: &LoggingConfig, default_level: &str) -> EnvFilter {
    if let Some(directives) = std::env::var("RUST_LOG").ok().filter(|v| !v.trim().is_empty()) {
        if let Ok(filter) = EnvFilter::try_new(&directives) {
            return filter;
        }
    }

    let mut directives = vec![logging.level.clone()];
    directives.extend(logging.modules.iter().cloned());
    EnvFilter::try_new(directives.join(",")).unwrap_or_else(|_| EnvFilter::new(default_level))
}

/// Applies the config's timer, location, target and filter to a fmt layer.
#[macro_export]
macro_rules! configure_fmt_layer {
    ($layer:expr, $logging:expr, $default_level:expr) => {{
        use $crate::__tracing_subscriber::Layer as _;
        let logging: &$crate::LoggingConfig = $logging;
        $layer
            .with_timer($crate::ConfigurableTimer::new(logging.timezone))
            .with_file(logging.location)
            .with_line_number(logging.location)
            .with_target(logging.target)
            .with_filter($crate::build_env_filter(logging, $default_level))
    }};
}

/// Installs a stderr subscriber. Returns false if one was already installed.
pub fn init_logging(logging: &LoggingConfig) -> bool {
    let layer = crate::configure_fmt_layer!(
        tracing_subscriber::fmt::layer().with_writer(std::io::stderr),
        logging,
        "info"
    );
    tracing_subscriber::registry().with(layer).try_init().is_ok()
}

/// Runs `f` with a stderr subscriber scoped to the current thread.
///
/// Used for startup work, like loading configuration, that runs before the
/// global subscriber can be configured.
pub fn with_scoped_logging<T>(logging: &LoggingConfig, f: impl FnOnce() -> T) -> T {
    with_scoped_writer(logging, std::io::stderr, f)
}

/// Like [`with_scoped_logging`], writing events to `make_writer`.
pub fn with_scoped_writer<W, T>(logging: &LoggingConfig, make_writer: W, f: impl FnOnce() -> T) -> T
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let layer = crate::configure_fmt_layer!(
        tracing_subscriber::fmt::layer()
            .with_writer(make_writer)
            .with_ansi(false),
        logging,
        "info"
    );
    let subscriber = tracing_subscriber::registry().with(layer);
    tracing::subscriber::with_default(subscriber, f)
}

#[cfg(test)]
#[path = "logging.test.rs"]
mod tests;
