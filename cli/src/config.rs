//! CLI configuration: registry settings plus link and logging options.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use veridia_registry::RegistryConfig;
use veridia_utils::LogFormat;

/// Origin the verification page is served from when none is configured.
pub const DEFAULT_VERIFY_BASE_URL: &str = "http://localhost:5173";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Everything the `veridia` binary reads from `veridia.toml`.
///
/// Registry keys sit at the top level next to the CLI-only keys:
///
/// ```toml
/// network = "devnet"
/// registry_address = "0xa8d9…"
/// verify_base_url = "https://registry.example.org"
/// log_format = "json"
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VeridiaConfig {
    #[serde(flatten)]
    pub registry: RegistryConfig,

    /// Origin prepended to `/verify?data=` when building links.
    #[serde(default = "default_verify_base_url")]
    pub verify_base_url: String,

    #[serde(default)]
    pub log_format: LogFormat,

    /// Filter directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_verify_base_url() -> String {
    DEFAULT_VERIFY_BASE_URL.to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl VeridiaConfig {
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

impl Default for VeridiaConfig {
    fn default() -> Self {
        Self {
            registry: RegistryConfig::default(),
            verify_base_url: default_verify_base_url(),
            log_format: LogFormat::default(),
            log_level: default_log_level(),
        }
    }
}
