use super::*;
use pretty_assertions::assert_eq;
use serial_test::serial;

// Helper to set and cleanup env vars in tests
struct EnvGuard {
    keys: Vec<String>,
}

impl EnvGuard {
    fn new() -> Self {
        Self { keys: Vec::new() }
    }

    fn set(&mut self, key: &str, value: &str) {
        self.keys.push(key.to_string());
        // SAFETY: tests touching the environment are serialized
        unsafe { env::set_var(key, value) };
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for key in &self.keys {
            // SAFETY: tests touching the environment are serialized
            unsafe { env::remove_var(key) };
        }
    }
}

#[test]
#[serial]
fn test_no_overrides() {
    let mut config = AppConfig::with_root("/srv/agent");
    let expected = config.clone();
    EnvLoader::new().apply(&mut config).unwrap();
    assert_eq!(config, expected);
}

#[test]
#[serial]
fn test_overrides_applied() {
    let mut guard = EnvGuard::new();
    guard.set(ENV_BACKEND, "docker");
    guard.set(ENV_TIMEOUT_SECS, "15");
    guard.set(ENV_MAX_OUTPUT_CHARS, "2000");
    guard.set(ENV_CONTAINER_NAME, " sandbox ");
    guard.set(ENV_LOG, "debug");

    let mut config = AppConfig::with_root("/srv/agent");
    EnvLoader::new().apply(&mut config).unwrap();
    assert_eq!(config.backend, BackendKind::Docker);
    assert_eq!(config.timeout_secs, 15);
    assert_eq!(config.max_output_chars, 2000);
    assert_eq!(config.container_name, "sandbox");
    assert_eq!(config.logging.level, "debug");
}

#[test]
#[serial]
fn test_invalid_timeout_rejected() {
    let mut guard = EnvGuard::new();
    guard.set(ENV_TIMEOUT_SECS, "0");
    let mut config = AppConfig::with_root("/srv/agent");
    let err = EnvLoader::new().apply(&mut config).unwrap_err();
    assert!(err.to_string().contains(ENV_TIMEOUT_SECS));

    guard.set(ENV_TIMEOUT_SECS, "soon");
    assert!(EnvLoader::new().apply(&mut config).is_err());
}

#[test]
#[serial]
fn test_unknown_backend_rejected() {
    let mut guard = EnvGuard::new();
    guard.set(ENV_BACKEND, "vm");
    let mut config = AppConfig::with_root("/srv/agent");
    assert!(EnvLoader::new().apply(&mut config).is_err());
}
