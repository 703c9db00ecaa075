//! Read-only access to the land registry.
//!
//! The registry itself is a Move contract on Aptos; this crate only reads it.
//! Design:
//! - [`RegistryReader`] is the seam every consumer depends on, so tests can
//!   inject an in-memory registry instead of a fullnode.
//! - [`ViewClient`] implements it over the fullnode REST API
//!   (`POST /v1/view`), one request per call, no retries.
//! - [`GatewayClient`] resolves a record's `metadata_hash` through a public
//!   IPFS HTTP gateway.

pub mod config;
pub mod error;
pub mod gateway;
pub mod metadata;
pub mod reader;
pub mod view;

pub use config::RegistryConfig;
pub use error::{GatewayError, RegistryError};
pub use gateway::GatewayClient;
pub use metadata::LandMetadata;
pub use reader::RegistryReader;
pub use view::ViewClient;
