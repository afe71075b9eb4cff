//! General application configuration.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Default result limit for `GET /repairs`.
const fn default_limit() -> u32 {
    50
}

/// Hard ceiling on any requested limit.
const fn default_max_limit() -> u32 {
    500
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Result limit used when a list request does not specify one.
    #[serde(default = "default_limit")]
    pub default_limit: u32,

    /// Upper bound applied to requested limits.
    #[serde(default = "default_max_limit")]
    pub max_limit: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            max_limit: default_max_limit(),
        }
    }
}

impl GeneralConfig {
    /// Resolve a requested limit against the configured default and ceiling.
    #[must_use]
    pub fn effective_limit(&self, requested: Option<u32>) -> u32 {
        requested
            .unwrap_or(self.default_limit)
            .clamp(1, self.max_limit.max(1))
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.max_limit == 0 {
            return Err(ConfigError::InvalidValue {
                field: "general.max_limit".into(),
                reason: "must be at least 1".into(),
            });
        }
        if self.default_limit > self.max_limit {
            return Err(ConfigError::InvalidValue {
                field: "general.default_limit".into(),
                reason: format!("exceeds max_limit ({})", self.max_limit),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = GeneralConfig::default();
        assert_eq!(config.default_limit, 50);
        assert_eq!(config.max_limit, 500);
    }

    #[test]
    fn effective_limit_defaults_and_clamps() {
        let config = GeneralConfig::default();
        assert_eq!(config.effective_limit(None), 50);
        assert_eq!(config.effective_limit(Some(10)), 10);
        assert_eq!(config.effective_limit(Some(0)), 1);
        assert_eq!(config.effective_limit(Some(10_000)), 500);
    }

    #[test]
    fn default_above_max_is_invalid() {
        let config = GeneralConfig {
            default_limit: 600,
            max_limit: 500,
        };
        assert!(config.validate().is_err());
    }
}
