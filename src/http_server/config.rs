//! HTTP Server Configuration
//!
//! Host, port, API prefix, CORS and logging settings. Every field has a
//! default, so a config file only needs the keys it overrides.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration loading/validation failure
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// HTTP server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpServerConfig {
    /// Host to bind to (default: "0.0.0.0")
    pub host: String,

    /// Port to bind to (default: 3000)
    pub port: u16,

    /// Prefix the property routes are mounted under (default: "/api")
    pub api_prefix: String,

    /// CORS allowed origins (default: empty, which allows any origin)
    pub cors_origins: Vec<String>,

    /// Deployment label reported by /health (default: "development")
    pub environment: String,

    /// Default log filter when RUST_LOG is unset (default: "info")
    pub log_level: String,
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            api_prefix: "/api".to_string(),
            cors_origins: Vec::new(),
            environment: "development".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl HttpServerConfig {
    /// Create a new config with specified port
    pub fn with_port(port: u16) -> Self {
        Self {
            port,
            ..Default::default()
        }
    }

    /// Load configuration from a JSON file and validate it
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;

        let config: HttpServerConfig = serde_json::from_str(&content)?;
        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::Invalid("host must not be empty".to_string()));
        }

        if !self.api_prefix.is_empty() {
            if !self.api_prefix.starts_with('/') {
                return Err(ConfigError::Invalid(format!(
                    "api_prefix '{}' must start with '/'",
                    self.api_prefix
                )));
            }
            if self.api_prefix.len() > 1 && self.api_prefix.ends_with('/') {
                return Err(ConfigError::Invalid(format!(
                    "api_prefix '{}' must not end with '/'",
                    self.api_prefix
                )));
            }
        }

        Ok(())
    }

    /// Whether property routes live at the root rather than under a prefix
    pub fn mounts_at_root(&self) -> bool {
        self.api_prefix.is_empty() || self.api_prefix == "/"
    }

    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
