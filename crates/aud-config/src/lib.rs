//! # aud-config
//!
//! Layered configuration loading for the audit service using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`AUD_*` prefix, `__` as separator)
//! 2. Project-level `./aud.toml`
//! 3. User-level `~/.config/aud/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `AUD_DATABASE__PATH` -> `database.path`,
//! `AUD_API__MAX_LIMIT` -> `api.max_limit`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use aud_config::AudConfig;
//!
//! let config = AudConfig::load_with_dotenv().expect("config");
//! println!("procedures served at {}", config.server.rpc_url());
//! ```

mod api;
mod database;
mod error;
mod server;

pub use api::ApiConfig;
pub use database::{DatabaseConfig, IN_MEMORY};
pub use error::ConfigError;
pub use server::ServerConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Project-local config file name.
pub const PROJECT_CONFIG_FILE: &str = "aud.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AudConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub api: ApiConfig,
}

impl AudConfig {
    /// Load and validate configuration from TOML files and environment
    /// variables.
    ///
    /// Does NOT read `.env`; use [`Self::load_with_dotenv`] for that.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Figment` if a source cannot be parsed, or
    /// `ConfigError::InvalidValue` if [`Self::validate`] rejects the result.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(&Self::figment())
    }

    /// Load `.env` from the current directory (if any), then [`Self::load`].
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Extract and validate from an arbitrary figment.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests and the CLI can layer additional providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(PROJECT_CONFIG_FILE);
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("AUD_").split("__"))
    }

    /// Check cross-field constraints that serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database.path.trim().is_empty() {
            return Err(ConfigError::invalid("database.path", "must not be empty"));
        }
        if !self.server.has_http_scheme() {
            return Err(ConfigError::invalid(
                "server.url",
                format!("'{}' must start with http:// or https://", self.server.url),
            ));
        }
        if self.api.default_limit == 0 {
            return Err(ConfigError::invalid("api.default_limit", "must be at least 1"));
        }
        if self.api.default_limit > self.api.max_limit {
            return Err(ConfigError::invalid(
                "api.default_limit",
                format!(
                    "{} exceeds api.max_limit ({})",
                    self.api.default_limit, self.api.max_limit
                ),
            ));
        }
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("aud").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = AudConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.database.path, "aud.db");
        assert_eq!(config.server.url, "http://localhost:3000");
        assert_eq!(config.api.default_limit, 50);
    }

    #[test]
    fn figment_builds_without_files() {
        figment::Jail::expect_with(|_jail| {
            let config: AudConfig = AudConfig::figment().extract()?;
            assert_eq!(config.api.max_limit, 500);
            Ok(())
        });
    }

    #[test]
    fn validate_rejects_zero_default_limit() {
        let mut config = AudConfig::default();
        config.api.default_limit = 0;
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "api.default_limit"));
    }

    #[test]
    fn validate_rejects_default_above_max() {
        let mut config = AudConfig::default();
        config.api.default_limit = 600;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_empty_database_path() {
        let mut config = AudConfig::default();
        config.database.path = "  ".into();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("database.path"));
    }

    #[test]
    fn validate_rejects_schemeless_url() {
        let mut config = AudConfig::default();
        config.server.url = "localhost:3000".into();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("server.url"));
    }
}
