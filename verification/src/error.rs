use thiserror::Error;
use veridia_registry::RegistryError;

/// The token could not be turned into a claim. Terminal; never retried.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("verification token is empty")]
    Empty,

    #[error("verification token is too long: {len} > {max} bytes")]
    TooLong { len: usize, max: usize },

    #[error("verification token is not valid base64: {0}")]
    Transport(String),

    #[error("verification token is not UTF-8 text")]
    Utf8,

    #[error("malformed claim: {0}")]
    Malformed(String),

    #[error("landId must be a positive integer, got {0}")]
    InvalidLandId(String),

    #[error("not a land registry verification token (type {0})")]
    WrongType(String),

    #[error("unknown network tag: {0}")]
    UnknownNetwork(String),

    #[error("verification link has no `data` parameter")]
    MissingData,

    #[error("invalid verification link: {0}")]
    InvalidLink(String),
}

/// The claim cannot be carried in a token.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EncodeError {
    #[error("claim encodes to {len} bytes, more than the {max}-byte token limit")]
    TooLong { len: usize, max: usize },
}

/// The registry could not be asked. Carried inside a verdict, distinct from
/// a mismatch: the claim was neither confirmed nor disproven.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("could not verify against the registry: {0}")]
pub struct QueryError(#[from] RegistryError);

impl QueryError {
    pub fn registry_error(&self) -> &RegistryError {
        &self.0
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LinkError {
    #[error("invalid base URL {url}: {reason}")]
    InvalidBase { url: String, reason: String },

    #[error(transparent)]
    Encode(#[from] EncodeError),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QrError {
    #[error("cannot encode QR code: {0}")]
    Encode(String),
}
