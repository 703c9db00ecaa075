//! Network identifier.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::TypesError;

/// Identifies which Aptos network the registry contract lives on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    /// The production network.
    Mainnet,
    /// The public test network.
    Testnet,
    /// The public development network (reset periodically).
    #[default]
    Devnet,
    /// A local node started with `aptos node run-local-testnet`.
    Local,
}

impl Network {
    /// Prefix shared by every verification tag.
    const TAG_PREFIX: &'static str = "aptos-";

    /// Human-readable name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mainnet => "mainnet",
            Self::Testnet => "testnet",
            Self::Devnet => "devnet",
            Self::Local => "local",
        }
    }

    /// Default fullnode REST endpoint (without the `/v1` suffix).
    pub fn default_node_url(&self) -> &'static str {
        match self {
            Self::Mainnet => "https://fullnode.mainnet.aptoslabs.com",
            Self::Testnet => "https://fullnode.testnet.aptoslabs.com",
            Self::Devnet => "https://fullnode.devnet.aptoslabs.com",
            Self::Local => "http://127.0.0.1:8080",
        }
    }

    /// Tag carried inside verification tokens, e.g. `aptos-devnet`.
    pub fn tag(&self) -> String {
        format!("{}{}", Self::TAG_PREFIX, self.as_str())
    }

    /// Parse a verification tag produced by [`Network::tag`].
    pub fn from_tag(tag: &str) -> Result<Self, TypesError> {
        tag.strip_prefix(Self::TAG_PREFIX)
            .ok_or_else(|| TypesError::UnknownNetwork(tag.to_string()))?
            .parse()
            .map_err(|_| TypesError::UnknownNetwork(tag.to_string()))
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Network {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mainnet" => Ok(Self::Mainnet),
            "testnet" => Ok(Self::Testnet),
            "devnet" => Ok(Self::Devnet),
            "local" => Ok(Self::Local),
            other => Err(TypesError::UnknownNetwork(other.to_string())),
        }
    }
}
