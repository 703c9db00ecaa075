use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("registry node unreachable: {0}")]
    Unreachable(String),

    #[error("registry request timed out: {0}")]
    Timeout(String),

    #[error("registry contract or module not found: {0}")]
    ContractNotFound(String),

    #[error("registry returned HTTP status {status}: {message}")]
    Http { status: u16, message: String },

    #[error("invalid response from registry: {0}")]
    InvalidResponse(String),

    #[error("HTTP request to registry failed: {0}")]
    RequestFailed(String),

    #[error("invalid registry configuration: {0}")]
    Config(String),
}

impl RegistryError {
    pub(crate) fn from_transport(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout(e.to_string())
        } else if e.is_connect() {
            Self::Unreachable(format!("connection failed: {e}"))
        } else {
            Self::RequestFailed(e.to_string())
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("gateway unreachable: {0}")]
    Unreachable(String),

    #[error("gateway request timed out: {0}")]
    Timeout(String),

    #[error("content {0} not found on gateway")]
    NotFound(String),

    #[error("gateway returned HTTP status {0}")]
    Http(u16),

    #[error("invalid metadata document: {0}")]
    InvalidMetadata(String),

    #[error("HTTP request to gateway failed: {0}")]
    RequestFailed(String),
}

impl GatewayError {
    pub(crate) fn from_transport(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout(e.to_string())
        } else if e.is_connect() {
            Self::Unreachable(format!("connection failed: {e}"))
        } else {
            Self::RequestFailed(e.to_string())
        }
    }
}
