//! Runtime configuration for the core.
//!
//! # Responsibility
//! - Collect store location, log settings and the storage timeout.
//! - Read overrides from `EMBER_*` environment variables.
//!
//! # Invariants
//! - Loading never fails; malformed values fall back to defaults.

use crate::logging::default_log_level;
use log::warn;
use std::path::PathBuf;
use std::time::Duration;

pub const ENV_DB_PATH: &str = "EMBER_DB_PATH";
pub const ENV_LOG_LEVEL: &str = "EMBER_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "EMBER_LOG_DIR";
pub const ENV_STORAGE_TIMEOUT_MS: &str = "EMBER_STORAGE_TIMEOUT_MS";

pub const DEFAULT_STORAGE_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    /// SQLite file; `None` keeps records in process memory.
    pub db_path: Option<PathBuf>,
    pub log_level: String,
    /// Rolling log directory; `None` leaves logging uninitialized.
    pub log_dir: Option<PathBuf>,
    /// Upper bound for every storage call.
    pub storage_timeout: Duration,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            db_path: None,
            log_level: default_log_level().to_string(),
            log_dir: None,
            storage_timeout: DEFAULT_STORAGE_TIMEOUT,
        }
    }
}

impl CoreConfig {
    /// Builds configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_blank = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let storage_timeout = match non_blank(ENV_STORAGE_TIMEOUT_MS) {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(millis) => Duration::from_millis(millis),
                Err(_) => {
                    warn!(
                        "event=config_load module=config status=fallback key={} reason=not_an_integer",
                        ENV_STORAGE_TIMEOUT_MS
                    );
                    defaults.storage_timeout
                }
            },
            None => defaults.storage_timeout,
        };

        Self {
            db_path: non_blank(ENV_DB_PATH).map(PathBuf::from),
            log_level: non_blank(ENV_LOG_LEVEL).unwrap_or(defaults.log_level),
            log_dir: non_blank(ENV_LOG_DIR).map(PathBuf::from),
            storage_timeout,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CoreConfig, DEFAULT_STORAGE_TIMEOUT};
    use std::collections::HashMap;
    use std::path::PathBuf;
    use std::time::Duration;

    fn config_from(pairs: &[(&str, &str)]) -> CoreConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        CoreConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn empty_environment_uses_defaults() {
        assert_eq!(config_from(&[]), CoreConfig::default());
    }

    #[test]
    fn overrides_are_applied() {
        let config = config_from(&[
            ("EMBER_DB_PATH", "/tmp/ember.db"),
            ("EMBER_LOG_LEVEL", "warn"),
            ("EMBER_STORAGE_TIMEOUT_MS", "250"),
        ]);
        assert_eq!(config.db_path, Some(PathBuf::from("/tmp/ember.db")));
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.storage_timeout, Duration::from_millis(250));
        assert!(config.log_dir.is_none());
    }

    #[test]
    fn malformed_timeout_falls_back() {
        let config = config_from(&[("EMBER_STORAGE_TIMEOUT_MS", "soon")]);
        assert_eq!(config.storage_timeout, DEFAULT_STORAGE_TIMEOUT);
    }
}
