//! Configuration module
//!
//! Settings are read from a TOML file. Every section is optional:
//!
//! ```toml
//! [database]
//! url = "sqlite://./zing.db?mode=rwc"
//!
//! [logging]
//! level = "info"
//!
//! [admin]
//! email = "admin@example.com"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::infrastructure::DatabaseConfig;

/// Overrides the config file location.
pub const CONFIG_PATH_ENV: &str = "ZING_CONFIG";
/// Overrides `[admin] email`.
pub const ADMIN_EMAIL_ENV: &str = "ZING_ADMIN";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Root of the TOML configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub database: DatabaseSection,
    pub logging: LoggingSection,
    pub admin: AdminSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSection {
    pub url: String,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        Self {
            url: DatabaseConfig::default().url,
        }
    }
}

impl DatabaseSection {
    pub fn connection_url(&self) -> String {
        self.url.clone()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// trace, debug, info, warn or error
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminSection {
    /// Accounts registered with this address become administrators.
    pub email: Option<String>,
}

impl AppConfig {
    /// Load from `path` and apply environment overrides.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_toml(&raw)?;
        config.apply_env(std::env::var(ADMIN_EMAIL_ENV).ok());
        Ok(config)
    }

    pub fn from_toml(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    /// A non-empty admin address from the environment replaces the file's.
    pub fn apply_env(&mut self, admin_email: Option<String>) {
        if let Some(email) = admin_email.filter(|e| !e.trim().is_empty()) {
            self.admin.email = Some(email.trim().to_string());
        }
    }

    pub fn database_config(&self) -> DatabaseConfig {
        DatabaseConfig {
            url: self.database.connection_url(),
        }
    }

    pub fn admin_email(&self) -> Option<&str> {
        self.admin.email.as_deref()
    }
}

/// `$ZING_CONFIG`, or `<config dir>/zing/config.toml`.
pub fn default_config_path() -> PathBuf {
    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        return PathBuf::from(path);
    }
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("zing")
        .join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config.database.url, "sqlite://./zing.db?mode=rwc");
        assert_eq!(config.logging.level, "info");
        assert!(!config.logging.json);
        assert_eq!(config.admin_email(), None);
    }

    #[test]
    fn test_full_file() {
        let config = AppConfig::from_toml(
            r#"
            [database]
            url = "sqlite::memory:"

            [logging]
            level = "debug"
            json = true

            [admin]
            email = "admin@example.com"
            "#,
        )
        .unwrap();
        assert_eq!(config.database_config().url, "sqlite::memory:");
        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.json);
        assert_eq!(config.admin_email(), Some("admin@example.com"));
    }

    #[test]
    fn test_env_override() {
        let mut config = AppConfig::from_toml("[admin]\nemail = \"a@example.com\"").unwrap();
        config.apply_env(Some("  ".into()));
        assert_eq!(config.admin_email(), Some("a@example.com"));
        config.apply_env(None);
        assert_eq!(config.admin_email(), Some("a@example.com"));
        config.apply_env(Some("b@example.com".into()));
        assert_eq!(config.admin_email(), Some("b@example.com"));
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            AppConfig::from_toml("[logging]\nlevel = 3"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = AppConfig::load(Path::new("/nonexistent/zing/config.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
