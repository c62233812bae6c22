//! Configuration for vexec.
//!
//! Configuration is layered:
//!
//! 1. Built-in defaults rooted at the project directory
//! 2. `vexec.toml` (or `--config` / `VEXEC_CONFIG`)
//! 3. `VEXEC_*` environment variables, including ones from `.env`
//!
//! The result is an [`AppConfig`] with absolute paths, a complete mount list
//! and ready-made backend configurations.

mod config;
mod env_loader;
mod error;
mod loader;
mod toml_config;

pub use config::AppConfig;
pub use config::BackendKind;
pub use config::SKILLS_PREFIX;
pub use config::WORKSPACE_SUBDIRS;
pub use config::default_mounts;
pub use env_loader::ENV_BACKEND;
pub use env_loader::ENV_CONFIG;
pub use env_loader::ENV_CONTAINER_NAME;
pub use env_loader::ENV_LOG;
pub use env_loader::ENV_MAX_OUTPUT_CHARS;
pub use env_loader::ENV_TIMEOUT_SECS;
pub use env_loader::EnvLoader;
pub use error::ConfigError;
pub use error::Result;
pub use loader::DEFAULT_CONFIG_FILE;
pub use loader::build_config;
pub use loader::load_config;
pub use loader::load_config_from;
pub use loader::load_dotenv;
pub use toml_config::ConfigToml;
pub use toml_config::ExecutionToml;
pub use toml_config::LoggingToml;
pub use toml_config::MountToml;
