//! Configuration management for i2r.
//!
//! Provides TOML-based configuration with XDG-compliant paths and
//! environment variable overrides.

use crate::error::{ConfigError, ConfigResult};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main application configuration.
///
/// This is loaded from `~/.config/i2r/config.toml` (or platform equivalent).
/// If the file doesn't exist, default values are used.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP server settings
    pub server: ServerConfig,
    /// Record store settings
    pub database: DatabaseConfig,
    /// Pension lookup settings
    pub pension: PensionConfig,
}

impl AppConfig {
    /// Load configuration from disk, falling back to defaults if not found.
    ///
    /// # Errors
    /// Returns error if:
    /// - Config directory cannot be determined
    /// - File exists but cannot be read
    /// - File contents are not valid TOML
    pub fn load() -> ConfigResult<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::debug!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load configuration from an explicit file path.
    ///
    /// Unlike [`AppConfig::load`], a missing file is an error here.
    pub fn load_from(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.display().to_string(),
            });
        }

        tracing::debug!("Loading config from {}", path.display());
        let contents = fs::read_to_string(path)?;
        let config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration with environment variable overrides.
    ///
    /// Supports the following environment variables:
    /// - `I2R_BIND`: Override the server bind address
    /// - `I2R_DATABASE_PATH`: Override the database file path
    /// - `I2R_PENSION_URL`: Override the pension lookup base URL
    /// - `I2R_PENSION_TIMEOUT_SECS`: Override the per-lookup timeout
    /// - `I2R_REFRESH_STRATEGY`: `sequential` or `concurrent`
    pub fn load_with_env() -> ConfigResult<Self> {
        let mut config = Self::load()?;
        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Apply overrides from a variable source.
    ///
    /// Values that fail to parse are ignored and the configured value is kept.
    pub fn apply_env_overrides<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(bind) = var("I2R_BIND") {
            tracing::debug!("Override server.bind from env: {}", bind);
            self.server.bind = bind;
        }

        if let Some(path) = var("I2R_DATABASE_PATH") {
            tracing::debug!("Override database.path from env: {}", path);
            self.database.path = path;
        }

        if let Some(url) = var("I2R_PENSION_URL") {
            tracing::debug!("Override pension.base_url from env: {}", url);
            self.pension.base_url = url;
        }

        if let Some(val) = var("I2R_PENSION_TIMEOUT_SECS") {
            if let Ok(secs) = val.parse() {
                self.pension.timeout_secs = secs;
                tracing::debug!("Override pension.timeout_secs from env: {}", secs);
            }
        }

        if let Some(val) = var("I2R_REFRESH_STRATEGY") {
            match val.as_str() {
                "sequential" => self.pension.refresh_strategy = RefreshStrategy::Sequential,
                "concurrent" => self.pension.refresh_strategy = RefreshStrategy::Concurrent,
                other => tracing::warn!("Ignoring unknown I2R_REFRESH_STRATEGY '{}'", other),
            }
        }
    }

    /// Check that all values are usable.
    pub fn validate(&self) -> ConfigResult<()> {
        self.server.socket_addr()?;

        if self.database.max_connections == 0 {
            return Err(invalid("database.max_connections", "must be greater than zero"));
        }
        if self.pension.timeout_secs == 0 {
            return Err(invalid("pension.timeout_secs", "must be greater than zero"));
        }
        if self.pension.max_concurrent_lookups == 0 {
            return Err(invalid(
                "pension.max_concurrent_lookups",
                "must be greater than zero",
            ));
        }
        if self.pension.base_url.trim().is_empty() {
            return Err(invalid("pension.base_url", "must not be empty"));
        }

        Ok(())
    }

    /// Get the path to the configuration file.
    ///
    /// Uses XDG base directories: `~/.config/i2r/config.toml`
    pub fn config_path() -> ConfigResult<PathBuf> {
        Ok(project_dirs()?.config_dir().join("config.toml"))
    }

    /// Get the data directory path.
    ///
    /// Uses XDG base directories: `~/.local/share/i2r`
    pub fn data_dir() -> ConfigResult<PathBuf> {
        Ok(project_dirs()?.data_dir().to_path_buf())
    }

    /// Resolve the database location.
    ///
    /// An empty `database.path` resolves to `i2r.db` inside the data directory.
    pub fn database_path(&self) -> ConfigResult<PathBuf> {
        if self.database.path.is_empty() {
            Ok(Self::data_dir()?.join("i2r.db"))
        } else {
            Ok(PathBuf::from(&self.database.path))
        }
    }
}

fn project_dirs() -> ConfigResult<ProjectDirs> {
    ProjectDirs::from("com", "twoseat", "i2r").ok_or(ConfigError::NoConfigDir)
}

fn invalid(field: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the HTTP server binds to
    pub bind: String,
}

impl ServerConfig {
    /// Parse the bind address.
    pub fn socket_addr(&self) -> ConfigResult<SocketAddr> {
        self.bind
            .parse()
            .map_err(|e| invalid("server.bind", &format!("'{}' is not a socket address: {e}", self.bind)))
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8080".to_string(),
        }
    }
}

/// Record store settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Database file path; empty means the default location, `:memory:` is allowed
    pub path: String,
    /// Maximum pooled connections
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: String::new(),
            max_connections: 5,
        }
    }
}

/// How a refresh of every employee's pension identifier is scheduled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefreshStrategy {
    /// One lookup at a time, in store order
    Sequential,
    /// All lookups in flight together, bounded by `max_concurrent_lookups`
    #[default]
    Concurrent,
}

/// Pension lookup settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PensionConfig {
    /// Base address of the lookup service; the name is appended as a path segment
    pub base_url: String,
    /// Per-lookup timeout in seconds
    pub timeout_secs: u64,
    /// Upper bound on lookups in flight during a concurrent refresh
    pub max_concurrent_lookups: usize,
    /// Refresh scheduling strategy
    pub refresh_strategy: RefreshStrategy,
}

impl PensionConfig {
    /// Per-lookup timeout as a `Duration`.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for PensionConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8082".to_string(),
            timeout_secs: 5,
            max_concurrent_lookups: 8,
            refresh_strategy: RefreshStrategy::Concurrent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.bind, "127.0.0.1:8080");
        assert_eq!(config.database.max_connections, 5);
        assert_eq!(config.pension.base_url, "http://localhost:8082");
        assert_eq!(config.pension.timeout(), Duration::from_secs(5));
        assert_eq!(config.pension.refresh_strategy, RefreshStrategy::Concurrent);
        config.validate().expect("defaults are valid");
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize default config");
        assert!(toml_str.contains("[server]"));
        assert!(toml_str.contains("[database]"));
        assert!(toml_str.contains("[pension]"));
        assert!(toml_str.contains("refresh_strategy = \"concurrent\""));

        let parsed: AppConfig = toml::from_str(&toml_str).expect("parse serialized config");
        assert_eq!(parsed.pension.base_url, config.pension.base_url);
    }

    #[test]
    fn test_config_write_then_load() {
        let tmp = TempDir::new().expect("create temp dir");
        let config_path = tmp.path().join("config.toml");

        let mut config = AppConfig::default();
        config.pension.base_url = "http://pensions.internal".to_string();
        config.pension.refresh_strategy = RefreshStrategy::Sequential;

        let contents = toml::to_string_pretty(&config).expect("serialize config");
        std::fs::write(&config_path, contents).expect("write config");
        let loaded = AppConfig::load_from(&config_path).expect("load config");

        assert_eq!(loaded.pension.base_url, "http://pensions.internal");
        assert_eq!(loaded.pension.refresh_strategy, RefreshStrategy::Sequential);
    }

    #[test]
    fn test_load_from_missing_file() {
        let tmp = TempDir::new().expect("create temp dir");
        let result = AppConfig::load_from(tmp.path().join("absent.toml"));
        assert!(matches!(result, Err(ConfigError::NotFound { .. })));
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            ("I2R_BIND", "0.0.0.0:9000"),
            ("I2R_DATABASE_PATH", ":memory:"),
            ("I2R_PENSION_URL", "http://lookup:8082"),
            ("I2R_PENSION_TIMEOUT_SECS", "2"),
            ("I2R_REFRESH_STRATEGY", "sequential"),
        ]
        .into_iter()
        .collect();

        let mut config = AppConfig::default();
        config.apply_env_overrides(|key| vars.get(key).map(ToString::to_string));

        assert_eq!(config.server.bind, "0.0.0.0:9000");
        assert_eq!(config.database.path, ":memory:");
        assert_eq!(config.pension.base_url, "http://lookup:8082");
        assert_eq!(config.pension.timeout_secs, 2);
        assert_eq!(config.pension.refresh_strategy, RefreshStrategy::Sequential);
    }

    #[test]
    fn test_env_overrides_ignore_unparsable_values() {
        let mut config = AppConfig::default();
        config.apply_env_overrides(|key| match key {
            "I2R_PENSION_TIMEOUT_SECS" => Some("soon".to_string()),
            "I2R_REFRESH_STRATEGY" => Some("parallel".to_string()),
            _ => None,
        });

        assert_eq!(config.pension.timeout_secs, 5);
        assert_eq!(config.pension.refresh_strategy, RefreshStrategy::Concurrent);
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
[pension]
base_url = "http://other:1234"
"#;

        let config: AppConfig = toml::from_str(toml_str).expect("parse partial config");
        assert_eq!(config.pension.base_url, "http://other:1234");
        // These should be defaults
        assert_eq!(config.pension.timeout_secs, 5);
        assert_eq!(config.server.bind, "127.0.0.1:8080");
    }

    #[test]
    fn test_validate_rejects_zero_values() {
        let mut config = AppConfig::default();
        config.pension.timeout_secs = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field, .. }) if field == "pension.timeout_secs"
        ));

        let mut config = AppConfig::default();
        config.pension.max_concurrent_lookups = 0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.database.max_connections = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_bind_address() {
        let mut config = AppConfig::default();
        config.server.bind = "localhost".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field, .. }) if field == "server.bind"
        ));
    }

    #[test]
    fn test_database_path_explicit() {
        let mut config = AppConfig::default();
        config.database.path = "/var/lib/i2r/records.db".to_string();
        assert_eq!(
            config.database_path().expect("resolve path"),
            PathBuf::from("/var/lib/i2r/records.db")
        );
    }
}
