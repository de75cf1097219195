//! Harness configuration sourced from environment variables.
//!
//! [`HarnessConfig`] bundles everything the harness needs to reach the live
//! system: the REST API base URL and credentials, the MySQL connection settings,
//! and logging options.
//!
//! # Variables
//!
//! | variable               | required | default  |
//! |------------------------|----------|----------|
//! | `WP_BASE_URL`          | yes      |          |
//! | `WP_API_USER`          | yes      |          |
//! | `WP_API_PASSWORD`      | yes      |          |
//! | `WP_TIMEOUT_SECS`      | no       | `10`     |
//! | `DB_HOST`              | yes      |          |
//! | `DB_PORT`              | no       | `3306`   |
//! | `DB_USER`              | yes      |          |
//! | `DB_PASSWORD`          | yes      |          |
//! | `DB_NAME`              | yes      |          |
//! | `DB_TABLE_PREFIX`      | no       | `wp_`    |
//! | `POSTCHECK_LOG_LEVEL`  | no       | `info`   |
//! | `POSTCHECK_LOG_FORMAT` | no       | `pretty` |
//!
//! Missing required variables are collected and reported together:
//!
//! ```no_run
//! use postcheck_core::config::HarnessConfig;
//!
//! let config = HarnessConfig::from_env()?;
//! println!("{}", config.database.posts_table());
//! # Ok::<(), postcheck_core::error::ConfigError>(())
//! ```

use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;

pub const ENV_BASE_URL: &str = "WP_BASE_URL";
pub const ENV_API_USER: &str = "WP_API_USER";
pub const ENV_API_PASSWORD: &str = "WP_API_PASSWORD";
pub const ENV_TIMEOUT_SECS: &str = "WP_TIMEOUT_SECS";
pub const ENV_DB_HOST: &str = "DB_HOST";
pub const ENV_DB_PORT: &str = "DB_PORT";
pub const ENV_DB_USER: &str = "DB_USER";
pub const ENV_DB_PASSWORD: &str = "DB_PASSWORD";
pub const ENV_DB_NAME: &str = "DB_NAME";
pub const ENV_DB_TABLE_PREFIX: &str = "DB_TABLE_PREFIX";
pub const ENV_LOG_LEVEL: &str = "POSTCHECK_LOG_LEVEL";
pub const ENV_LOG_FORMAT: &str = "POSTCHECK_LOG_FORMAT";

const REDACTED: &str = "***";

/// Full harness configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HarnessConfig {
    /// Logging settings
    #[serde(default)]
    pub general: GeneralConfig,
    /// Remote REST API settings
    pub api: ApiConfig,
    /// Backing MySQL store settings
    pub database: DatabaseConfig,
}

impl HarnessConfig {
    /// Loads the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads the configuration through an arbitrary key lookup.
    ///
    /// Required keys that are absent or empty are all collected into a single
    /// [`ConfigError::MissingVars`]. Optional keys fall back to defaults but must
    /// parse when present.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut missing = Vec::new();

        let base_url = require(&lookup, ENV_BASE_URL, &mut missing);
        let api_user = require(&lookup, ENV_API_USER, &mut missing);
        let api_password = require(&lookup, ENV_API_PASSWORD, &mut missing);
        let db_host = require(&lookup, ENV_DB_HOST, &mut missing);
        let db_user = require(&lookup, ENV_DB_USER, &mut missing);
        let db_password = require(&lookup, ENV_DB_PASSWORD, &mut missing);
        let db_name = require(&lookup, ENV_DB_NAME, &mut missing);

        if !missing.is_empty() {
            return Err(ConfigError::MissingVars { names: missing });
        }

        let general_defaults = GeneralConfig::default();
        let config = Self {
            general: GeneralConfig {
                log_level: optional(&lookup, ENV_LOG_LEVEL).unwrap_or(general_defaults.log_level),
                log_format: optional(&lookup, ENV_LOG_FORMAT)
                    .unwrap_or(general_defaults.log_format),
            },
            api: ApiConfig {
                base_url,
                user: api_user,
                password: api_password,
                timeout_secs: parse_optional(&lookup, ENV_TIMEOUT_SECS, DEFAULT_TIMEOUT_SECS)?,
            },
            database: DatabaseConfig {
                host: db_host,
                port: parse_optional(&lookup, ENV_DB_PORT, DEFAULT_DB_PORT)?,
                user: db_user,
                password: db_password,
                name: db_name,
                // An explicitly empty prefix is legal, so no emptiness filter here.
                table_prefix: lookup(ENV_DB_TABLE_PREFIX)
                    .unwrap_or_else(|| DEFAULT_TABLE_PREFIX.to_owned()),
            },
        };

        config.validate()?;
        debug!(
            base_url = %config.api.base_url,
            db_host = %config.database.host,
            db_name = %config.database.name,
            "harness configuration loaded"
        );
        Ok(config)
    }

    /// Checks values that parsed but are still unusable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.general.log_level.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: ENV_LOG_LEVEL.to_owned(),
                reason: format!("must be one of: {}", valid_levels.join(", ")),
            });
        }

        let valid_formats = ["json", "pretty"];
        if !valid_formats.contains(&self.general.log_format.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: ENV_LOG_FORMAT.to_owned(),
                reason: format!("must be one of: {}", valid_formats.join(", ")),
            });
        }

        if !(self.api.base_url.starts_with("http://") || self.api.base_url.starts_with("https://"))
        {
            return Err(ConfigError::InvalidValue {
                field: ENV_BASE_URL.to_owned(),
                reason: "must start with http:// or https://".to_owned(),
            });
        }

        if self.api.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: ENV_TIMEOUT_SECS.to_owned(),
                reason: "timeout must be at least one second".to_owned(),
            });
        }

        // The prefix is interpolated into SQL text, never bound.
        if !self
            .database
            .table_prefix
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err(ConfigError::InvalidValue {
                field: ENV_DB_TABLE_PREFIX.to_owned(),
                reason: "only ASCII letters, digits and '_' are allowed".to_owned(),
            });
        }

        Ok(())
    }

    /// Returns a copy with both passwords masked, for display.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        copy.api.password = REDACTED.to_owned();
        copy.database.password = REDACTED.to_owned();
        copy
    }
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Log format (json, pretty)
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_owned(),
            log_format: "pretty".to_owned(),
        }
    }
}

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_DB_PORT: u16 = 3306;
pub const DEFAULT_TABLE_PREFIX: &str = "wp_";

/// REST API settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// API root, e.g. `http://localhost:8080/wp-json/`
    pub base_url: String,
    /// Basic-auth user
    pub user: String,
    /// Basic-auth password (application password)
    pub password: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// MySQL settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    /// Database (schema) name
    pub name: String,
    /// Table prefix, `wp_` on a stock install
    pub table_prefix: String,
}

impl DatabaseConfig {
    /// Fully prefixed name of the posts table.
    pub fn posts_table(&self) -> String {
        format!("{}posts", self.table_prefix)
    }
}

// --- lookup helpers ---

fn require<F>(lookup: &F, key: &str, missing: &mut Vec<String>) -> String
where
    F: Fn(&str) -> Option<String>,
{
    match optional(lookup, key) {
        Some(value) => value,
        None => {
            missing.push(key.to_owned());
            String::new()
        }
    }
}

fn optional<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).filter(|value| !value.is_empty())
}

fn parse_optional<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match optional(lookup, key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidValue {
                field: key.to_owned(),
                reason: format!("'{raw}': {e}"),
            }),
    }
}
