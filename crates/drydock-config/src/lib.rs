//! # drydock-config
//!
//! Layered configuration loading for drydock using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`DRYDOCK_*` prefix, `__` as separator)
//! 2. Legacy bare variables `DATABASE_URL` and `API_KEY`
//! 3. Project-level `./drydock.toml`
//! 4. User-level `~/.config/drydock/config.toml`
//! 5. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `DRYDOCK_SERVER__API_KEY` -> `server.api_key`,
//! `DRYDOCK_DATABASE__PATH` -> `database.path`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use drydock_config::DrydockConfig;
//!
//! let config = DrydockConfig::load_with_dotenv().expect("config");
//! if config.server.requires_api_key() {
//!     println!("API key check enabled");
//! }
//! ```

mod checklist;
mod database;
mod error;
mod general;
mod server;

pub use checklist::ChecklistConfig;
pub use database::DatabaseConfig;
pub use error::ConfigError;
pub use general::GeneralConfig;
pub use server::ServerConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Project-local config file name, resolved against the working directory.
pub const LOCAL_CONFIG_FILE: &str = "drydock.toml";

/// Bare environment variables and the keys they set.
const LEGACY_VARS: [(&str, &str); 2] = [
    ("DATABASE_URL", "database.path"),
    ("API_KEY", "server.api_key"),
];

/// Keys whose environment values are taken verbatim.
///
/// figment's `Env` provider parses values, so a secret such as `0042` would
/// arrive as the integer 42 and an all-digit key would fail to extract.
const RAW_STRING_KEYS: [&str; 2] = ["server.api_key", "database.path"];

fn is_raw_string_key(key: &str) -> bool {
    RAW_STRING_KEYS.iter().any(|k| k.eq_ignore_ascii_case(key))
}

/// Merge `var`, if set, as an unparsed string at `key`.
fn merge_raw_var(figment: Figment, var: &str, key: &str) -> Figment {
    match std::env::var(var) {
        Ok(value) => figment.merge(Serialized::default(key, value)),
        Err(_) => figment,
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DrydockConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub checklist: ChecklistConfig,
}

impl DrydockConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need
    /// `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a source cannot be parsed or a value is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a source cannot be parsed or a value is invalid.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add providers on top.
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
        let local_path = PathBuf::from(LOCAL_CONFIG_FILE);
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Bare variables the service was historically deployed with
        for (var, key) in LEGACY_VARS {
            figment = merge_raw_var(figment, var, key);
        }

        // Layer 4: Environment variables (highest priority)
        figment = figment.merge(
            Env::prefixed("DRYDOCK_")
                .split("__")
                .filter(|key| !is_raw_string_key(key.as_str())),
        );
        for key in RAW_STRING_KEYS {
            let var = format!("DRYDOCK_{}", key.to_ascii_uppercase().replace('.', "__"));
            figment = merge_raw_var(figment, &var, key);
        }
        figment
    }

    /// Reject values that deserialize fine but cannot be used.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database.path.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "database.path".into(),
                reason: "must not be empty".into(),
            });
        }
        self.general.validate()?;
        self.checklist.validate()
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("drydock").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_loads() {
        let config = DrydockConfig::default();
        assert_eq!(config.database.path, "drydock.db");
        assert!(!config.server.requires_api_key());
        assert_eq!(config.general.default_limit, 50);
        assert!(config.checklist.items.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_database_path_is_invalid() {
        let mut config = DrydockConfig::default();
        config.database.path = "  ".into();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }
}
