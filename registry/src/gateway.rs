//! HTTP client for reading document bundles through an IPFS gateway.

use crate::config::RegistryConfig;
use crate::error::{GatewayError, RegistryError};
use crate::metadata::LandMetadata;

/// Client for a path-style IPFS gateway (`{gateway}/ipfs/{cid}`).
#[derive(Clone, Debug)]
pub struct GatewayClient {
    /// HTTP client (reusable connection pool).
    http_client: reqwest::Client,
    base_url: String,
}

impl GatewayClient {
    pub fn new(config: &RegistryConfig) -> Result<Self, RegistryError> {
        Ok(Self {
            http_client: config.http_client()?,
            base_url: config.gateway_url.trim_end_matches('/').to_string(),
        })
    }

    /// Public URL of the content behind `cid`.
    pub fn file_url(&self, cid: &str) -> String {
        format!("{}/ipfs/{}", self.base_url, cid.trim())
    }

    /// Whether the gateway can serve `cid` (`HEAD {gateway}/ipfs/{cid}`).
    pub async fn exists(&self, cid: &str) -> Result<bool, GatewayError> {
        let response = self
            .http_client
            .head(self.file_url(cid))
            .send()
            .await
            .map_err(GatewayError::from_transport)?;
        Ok(response.status().is_success())
    }

    /// Fetch and parse the metadata bundle stored under `cid`.
    pub async fn fetch_metadata(&self, cid: &str) -> Result<LandMetadata, GatewayError> {
        let url = self.file_url(cid);
        tracing::debug!(%url, "fetching land metadata");

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(GatewayError::from_transport)?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(GatewayError::NotFound(cid.to_string()));
        }
        if !status.is_success() {
            return Err(GatewayError::Http(status.as_u16()));
        }

        response
            .json::<LandMetadata>()
            .await
            .map_err(|e| GatewayError::InvalidMetadata(e.to_string()))
    }
}
