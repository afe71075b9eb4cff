//! HTTP server configuration.

use serde::{Deserialize, Serialize};

fn default_bind_addr() -> String {
    "0.0.0.0:8000".to_string()
}

fn default_cors_origins() -> Vec<String> {
    vec!["*".to_string()]
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Socket address the API listens on.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Shared secret expected in the `x-api-key` header. Empty disables the check.
    #[serde(default)]
    pub api_key: String,

    /// Allowed CORS origins. `"*"` allows any origin.
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            api_key: String::new(),
            cors_origins: default_cors_origins(),
        }
    }
}

impl ServerConfig {
    /// Whether requests must carry a matching `x-api-key` header.
    #[must_use]
    pub fn requires_api_key(&self) -> bool {
        !self.api_key.is_empty()
    }

    #[must_use]
    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.iter().any(|o| o == "*")
    }
}
