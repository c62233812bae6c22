//! Environment variable overrides.

use std::env;

use tracing::debug;

use crate::config::AppConfig;
use crate::config::BackendKind;
use crate::error::ConfigError;
use crate::error::Result;

pub const ENV_CONFIG: &str = "VEXEC_CONFIG";
pub const ENV_BACKEND: &str = "VEXEC_BACKEND";
pub const ENV_TIMEOUT_SECS: &str = "VEXEC_TIMEOUT_SECS";
pub const ENV_MAX_OUTPUT_CHARS: &str = "VEXEC_MAX_OUTPUT_CHARS";
pub const ENV_CONTAINER_NAME: &str = "VEXEC_CONTAINER_NAME";
pub const ENV_LOG: &str = "VEXEC_LOG";

/// Applies `VEXEC_*` overrides on top of file configuration.
#[derive(Debug, Default)]
pub struct EnvLoader;

impl EnvLoader {
    pub fn new() -> Self {
        Self
    }

    pub fn apply(&self, config: &mut AppConfig) -> Result<()> {
        if let Some(val) = self.get(ENV_BACKEND) {
            config.backend = val.parse::<BackendKind>()?;
            debug!(env = ENV_BACKEND, value = %config.backend, "loaded");
        }

        if let Some(val) = self.get(ENV_TIMEOUT_SECS) {
            config.timeout_secs = parse_positive(ENV_TIMEOUT_SECS, &val)?;
            debug!(env = ENV_TIMEOUT_SECS, value = config.timeout_secs, "loaded");
        }

        if let Some(val) = self.get(ENV_MAX_OUTPUT_CHARS) {
            config.max_output_chars = parse_positive(ENV_MAX_OUTPUT_CHARS, &val)?;
            debug!(env = ENV_MAX_OUTPUT_CHARS, value = config.max_output_chars, "loaded");
        }

        if let Some(val) = self.get(ENV_CONTAINER_NAME) {
            debug!(env = ENV_CONTAINER_NAME, value = %val, "loaded");
            config.container_name = val;
        }

        if let Some(val) = self.get(ENV_LOG) {
            debug!(env = ENV_LOG, value = %val, "loaded");
            config.logging.level = val;
        }

        Ok(())
    }

    /// Returns a trimmed, non-empty variable.
    fn get(&self, key: &str) -> Option<String> {
        env::var(key)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }
}

fn parse_positive<T>(field: &'static str, value: &str) -> Result<T>
where
    T: std::str::FromStr + PartialEq + Default,
{
    match value.parse::<T>() {
        Ok(parsed) if parsed != T::default() => Ok(parsed),
        _ => Err(ConfigError::InvalidValue {
            field,
            message: format!("expected a positive integer, got '{value}'"),
        }),
    }
}

#[cfg(test)]
#[path = "env_loader.test.rs"]
mod tests;
