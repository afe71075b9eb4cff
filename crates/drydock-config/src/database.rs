//! Database location configuration.

use serde::{Deserialize, Serialize};

fn default_path() -> String {
    "drydock.db".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// libSQL database file, or `:memory:`.
    ///
    /// `sqlite://` and `file:` URL prefixes are accepted and stripped, so a
    /// `DATABASE_URL` in URL form still resolves to a local file.
    #[serde(default = "default_path")]
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
        }
    }
}

impl DatabaseConfig {
    /// The path to hand to libSQL, with any URL scheme removed.
    #[must_use]
    pub fn local_path(&self) -> &str {
        let path = self.path.trim();
        path.strip_prefix("sqlite://")
            .or_else(|| path.strip_prefix("file:"))
            .unwrap_or(path)
    }

    #[must_use]
    pub fn is_in_memory(&self) -> bool {
        self.local_path() == ":memory:"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_url_prefixes() {
        let cfg = DatabaseConfig {
            path: "sqlite:///var/lib/drydock.db".into(),
        };
        assert_eq!(cfg.local_path(), "/var/lib/drydock.db");

        let cfg = DatabaseConfig {
            path: "file:repairs.db".into(),
        };
        assert_eq!(cfg.local_path(), "repairs.db");
    }

    #[test]
    fn detects_in_memory() {
        let cfg = DatabaseConfig {
            path: ":memory:".into(),
        };
        assert!(cfg.is_in_memory());
        assert!(!DatabaseConfig::default().is_in_memory());
    }
}
