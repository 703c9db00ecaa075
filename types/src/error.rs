//! Top-level error type shared across crates.

use thiserror::Error;

/// Errors raised while constructing or parsing core types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypesError {
    #[error("land id must be a positive integer, got {0}")]
    InvalidLandId(String),

    #[error("invalid account address: {0}")]
    InvalidAddress(String),

    #[error("unknown network: {0}")]
    UnknownNetwork(String),

    #[error("unknown land status code: {0}")]
    UnknownStatus(u64),
}
