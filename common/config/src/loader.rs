//! Loads `vexec.toml`, `.env` and environment overrides into an [`AppConfig`].

use std::env;
use std::path::Path;
use std::path::PathBuf;

use tracing::debug;
use vexec_virtual_path::VirtualMount;

use crate::config::AppConfig;
use crate::config::default_mounts;
use crate::env_loader::ENV_CONFIG;
use crate::env_loader::EnvLoader;
use crate::error::ConfigError;
use crate::error::Result;
use crate::toml_config::ConfigToml;

/// Config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "vexec.toml";

/// Loads `.env` from the working directory (or a parent), if any.
///
/// Variables already set in the process environment win.
pub fn load_dotenv() -> Result<Option<PathBuf>> {
    match dotenvy::dotenv() {
        Ok(path) => {
            debug!(path = %path.display(), "loaded .env");
            Ok(Some(path))
        }
        Err(err) if err.not_found() => Ok(None),
        Err(err) => Err(ConfigError::Dotenv(err.to_string())),
    }
}

/// Loads the full configuration for the current process.
///
/// Order: `.env`, then the config file (`explicit`, `VEXEC_CONFIG`, or
/// `./vexec.toml`), then `VEXEC_*` overrides. The result is validated.
pub fn load_config(explicit: Option<&Path>) -> Result<AppConfig> {
    load_dotenv()?;
    let cwd = env::current_dir()?;
    load_config_from(&cwd, explicit)
}

/// Like [`load_config`] without `.env` handling, rooted at `cwd`.
pub fn load_config_from(cwd: &Path, explicit: Option<&Path>) -> Result<AppConfig> {
    let from_env = env::var_os(ENV_CONFIG).map(PathBuf::from);
    let required = explicit.is_some() || from_env.is_some();
    let path = explicit
        .map(Path::to_path_buf)
        .or(from_env)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
    let path = if path.is_absolute() { path } else { cwd.join(path) };

    let (toml, base) = if path.is_file() {
        let source = std::fs::read_to_string(&path)?;
        let toml = ConfigToml::parse(&source).map_err(|err| ConfigError::InvalidToml {
            file: path.clone(),
            error: err.to_string(),
        })?;
        let base = path.parent().map_or_else(|| cwd.to_path_buf(), Path::to_path_buf);
        debug!(path = %path.display(), "loaded config file");
        (toml, base)
    } else if required {
        return Err(ConfigError::FileNotFound(path));
    } else {
        debug!(path = %path.display(), "no config file, using defaults");
        (ConfigToml::default(), cwd.to_path_buf())
    };

    let mut config = build_config(toml, &base)?;
    EnvLoader::new().apply(&mut config)?;
    config.validate()?;
    Ok(config)
}

/// Applies file values over the defaults rooted at `base`.
pub fn build_config(toml: ConfigToml, base: &Path) -> Result<AppConfig> {
    let project_root = match toml.project_root {
        Some(root) if root.is_absolute() => root,
        Some(root) => base.join(root),
        None => base.to_path_buf(),
    };
    let mut config = AppConfig::with_root(project_root);

    if let Some(dir) = &toml.workspace_dir {
        config.workspace_dir = config.resolve_path(dir);
    }
    if let Some(dir) = &toml.skills_dir {
        config.skills_dir = config.resolve_path(dir);
    }

    if let Some(execution) = toml.execution {
        if let Some(backend) = execution.backend {
            config.backend = backend;
        }
        if let Some(secs) = execution.timeout_secs {
            config.timeout_secs = positive("execution.timeout_secs", secs)?;
        }
        if let Some(chars) = execution.max_output_chars {
            config.max_output_chars = positive("execution.max_output_chars", chars)?;
        }
        if let Some(name) = execution.container_name {
            config.container_name = name;
        }
        if let Some(workdir) = execution.container_workdir {
            config.container_workdir = workdir;
        }
    }

    config.mounts = match toml.mounts {
        Some(mounts) => mounts
            .into_iter()
            .map(|m| VirtualMount::new(m.virtual_prefix, config.resolve_path(&m.physical)))
            .collect(),
        None => default_mounts(&config.workspace_dir, &config.skills_dir),
    };

    if let Some(logging) = toml.logging {
        config.logging = logging.to_common_logging();
    }

    Ok(config)
}

fn positive<T: TryFrom<i64>>(field: &'static str, value: i64) -> Result<T> {
    if value <= 0 {
        return Err(ConfigError::InvalidValue {
            field,
            message: format!("must be positive, got {value}"),
        });
    }
    T::try_from(value).map_err(|_| ConfigError::InvalidValue {
        field,
        message: format!("out of range: {value}"),
    })
}

#[cfg(test)]
#[path = "loader.test.rs"]
mod tests;
