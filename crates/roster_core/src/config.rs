//! Per-environment database and logging configuration.
//!
//! # Responsibility
//! - Read the JSON config file keyed by environment name.
//! - Layer environment variables and explicit overrides on top of it.
//!
//! # Invariants
//! - Precedence: defaults < config file < environment variables < overrides.
//! - A missing config file falls back to defaults; a malformed file or an
//!   unknown environment is an error.

use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const SQLITE_DIALECT: &str = "sqlite";
pub const MEMORY_STORAGE: &str = ":memory:";
pub const DEFAULT_ENVIRONMENT: &str = "development";
pub const DEFAULT_CONFIG_PATH: &str = "config/config.json";
pub const DEFAULT_STORAGE: &str = "roster.sqlite";

pub const ENV_ENVIRONMENT: &str = "ROSTER_ENV";
pub const ENV_CONFIG_PATH: &str = "ROSTER_CONFIG";
pub const ENV_DATABASE: &str = "ROSTER_DATABASE";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config `{path}`: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed config `{path}`: {source}")]
    Malformed {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("environment `{environment}` is not defined in `{path}`")]
    UnknownEnvironment { environment: String, path: PathBuf },
}

/// Where and how the database is stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub dialect: String,
    /// File path, or `:memory:` for a throwaway in-memory database.
    pub storage: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            dialect: SQLITE_DIALECT.to_string(),
            storage: DEFAULT_STORAGE.to_string(),
        }
    }
}

/// Fully resolved configuration for one process run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub environment: String,
    pub database: DatabaseConfig,
    pub log_level: Option<String>,
    pub log_dir: Option<PathBuf>,
}

/// Explicit values that win over every other source, typically CLI flags.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub environment: Option<String>,
    pub config_path: Option<PathBuf>,
    pub database: Option<String>,
    pub log_level: Option<String>,
    pub log_dir: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EnvironmentSection {
    dialect: Option<String>,
    storage: Option<String>,
    log_level: Option<String>,
    log_dir: Option<PathBuf>,
}

/// Loads the section for `environment` from the JSON file at `path`.
pub fn load_config(path: &Path, environment: &str) -> Result<AppConfig, ConfigError> {
    let mut config = AppConfig {
        environment: environment.to_string(),
        database: DatabaseConfig::default(),
        log_level: None,
        log_dir: None,
    };

    if !path.exists() {
        return Ok(config);
    }

    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut sections: HashMap<String, EnvironmentSection> =
        serde_json::from_str(&raw).map_err(|source| ConfigError::Malformed {
            path: path.to_path_buf(),
            source,
        })?;
    let section = sections
        .remove(environment)
        .ok_or_else(|| ConfigError::UnknownEnvironment {
            environment: environment.to_string(),
            path: path.to_path_buf(),
        })?;

    if let Some(dialect) = section.dialect {
        config.database.dialect = dialect;
    }
    if let Some(storage) = section.storage {
        config.database.storage = storage;
    }
    config.log_level = section.log_level;
    config.log_dir = section.log_dir;
    Ok(config)
}

/// Resolves the final configuration.
///
/// `lookup` reads environment variables; production passes
/// `|key| std::env::var(key).ok()`.
pub fn resolve_config(
    overrides: &ConfigOverrides,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<AppConfig, ConfigError> {
    let environment = overrides
        .environment
        .clone()
        .or_else(|| lookup(ENV_ENVIRONMENT))
        .unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string());
    let path = overrides
        .config_path
        .clone()
        .or_else(|| lookup(ENV_CONFIG_PATH).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));

    let mut config = load_config(&path, &environment)?;

    if let Some(storage) = overrides.database.clone().or_else(|| lookup(ENV_DATABASE)) {
        config.database.storage = storage;
    }
    if let Some(level) = &overrides.log_level {
        config.log_level = Some(level.clone());
    }
    if let Some(dir) = &overrides.log_dir {
        config.log_dir = Some(dir.clone());
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::{
        load_config, resolve_config, ConfigError, ConfigOverrides, DEFAULT_STORAGE,
        ENV_DATABASE, ENV_ENVIRONMENT, MEMORY_STORAGE,
    };
    use std::path::PathBuf;

    const SAMPLE: &str = r#"{
        "development": { "dialect": "sqlite", "storage": "dev.sqlite", "logLevel": "debug" },
        "test": { "dialect": "sqlite", "storage": ":memory:" }
    }"#;

    fn write_sample(dir: &tempfile::TempDir) -> PathBuf {
        let path = dir.path().join("config.json");
        std::fs::write(&path, SAMPLE).unwrap();
        path
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(&dir.path().join("absent.json"), "development").unwrap();
        assert_eq!(config.database.storage, DEFAULT_STORAGE);
        assert_eq!(config.database.dialect, "sqlite");
    }

    #[test]
    fn selects_requested_environment_section() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_sample(&dir);

        let dev = load_config(&path, "development").unwrap();
        assert_eq!(dev.database.storage, "dev.sqlite");
        assert_eq!(dev.log_level.as_deref(), Some("debug"));

        let test = load_config(&path, "test").unwrap();
        assert_eq!(test.database.storage, MEMORY_STORAGE);
    }

    #[test]
    fn unknown_environment_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_sample(&dir);
        let err = load_config(&path, "production").unwrap_err();
        assert!(matches!(err, ConfigError::UnknownEnvironment { .. }));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            load_config(&path, "development"),
            Err(ConfigError::Malformed { .. })
        ));
    }

    #[test]
    fn environment_variables_and_overrides_layer_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_sample(&dir);
        let overrides = ConfigOverrides {
            config_path: Some(path),
            ..ConfigOverrides::default()
        };

        let from_env = resolve_config(&overrides, |key| match key {
            ENV_ENVIRONMENT => Some("test".to_string()),
            ENV_DATABASE => Some("env.sqlite".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(from_env.environment, "test");
        assert_eq!(from_env.database.storage, "env.sqlite");

        let flagged = ConfigOverrides {
            database: Some("flag.sqlite".to_string()),
            ..overrides
        };
        let from_flag = resolve_config(&flagged, |key| match key {
            ENV_DATABASE => Some("env.sqlite".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(from_flag.environment, "development");
        assert_eq!(from_flag.database.storage, "flag.sqlite");
    }
}
