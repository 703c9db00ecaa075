//! Client configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use veridia_types::{AccountAddress, Network};

use crate::RegistryError;

/// Address the registry contract was published under on devnet.
pub const DEFAULT_REGISTRY_ADDRESS: &str =
    "0xa8d945729fbf3ba5863909c8470ac6db2621b3d27b20813378e2dc38a716460b";

/// Name of the Move module holding the view functions.
pub const DEFAULT_MODULE_NAME: &str = "land_registry";

/// Public IPFS gateway used for document bundles.
pub const DEFAULT_GATEWAY_URL: &str = "https://w3s.link";

/// Where and how to reach the registry and its document gateway.
///
/// Deserialized as the top-level keys of the CLI's `veridia.toml`, or built
/// programmatically (e.g. for tests).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Which Aptos network the registry lives on.
    #[serde(default)]
    pub network: Network,

    /// Fullnode REST endpoint. Falls back to the network's public fullnode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_url: Option<String>,

    /// Account the registry module was published under.
    #[serde(default = "default_registry_address")]
    pub registry_address: AccountAddress,

    /// Move module name.
    #[serde(default = "default_module_name")]
    pub module_name: String,

    /// IPFS HTTP gateway base URL.
    #[serde(default = "default_gateway_url")]
    pub gateway_url: String,

    /// Whole-request timeout in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Connection timeout in seconds.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_registry_address() -> AccountAddress {
    AccountAddress::parse(DEFAULT_REGISTRY_ADDRESS).expect("default registry address is valid hex")
}

fn default_module_name() -> String {
    DEFAULT_MODULE_NAME.to_string()
}

fn default_gateway_url() -> String {
    DEFAULT_GATEWAY_URL.to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_connect_timeout_secs() -> u64 {
    5
}

// ── Impl ───────────────────────────────────────────────────────────────

impl RegistryConfig {
    /// The fullnode base URL actually used, without a trailing slash.
    pub fn resolved_node_url(&self) -> String {
        self.node_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or(self.network.default_node_url())
            .trim_end_matches('/')
            .to_string()
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Build the shared HTTP client for this configuration.
    pub(crate) fn http_client(&self) -> Result<reqwest::Client, RegistryError> {
        reqwest::Client::builder()
            .timeout(self.request_timeout())
            .connect_timeout(self.connect_timeout())
            .build()
            .map_err(|e| RegistryError::Config(format!("failed to build HTTP client: {e}")))
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            network: Network::default(),
            node_url: None,
            registry_address: default_registry_address(),
            module_name: default_module_name(),
            gateway_url: default_gateway_url(),
            request_timeout_secs: default_request_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}
