//! Checklist catalog seeds.
//!
//! The catalog is reference data. It is declared here and applied to the
//! database at startup, never through repair-facing operations.

use std::collections::HashSet;

use drydock_core::entities::ChecklistItemSeed;
use serde::{Deserialize, Serialize};

use crate::ConfigError;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ChecklistConfig {
    /// Items to insert or update (matched by code) on startup.
    #[serde(default)]
    pub items: Vec<ChecklistItemSeed>,
}

impl ChecklistConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for item in &self.items {
            if item.code.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "checklist.items.code".into(),
                    reason: "must not be empty".into(),
                });
            }
            if !seen.insert(item.code.as_str()) {
                return Err(ConfigError::InvalidValue {
                    field: "checklist.items.code".into(),
                    reason: format!("duplicate code '{}'", item.code),
                });
            }
        }
        Ok(())
    }
}
