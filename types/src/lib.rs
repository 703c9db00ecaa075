//! Fundamental types for the Veridia land registry.
//!
//! This crate defines the core types shared across every other crate in the workspace:
//! land identifiers, registry records, account addresses, networks and clocks.

pub mod address;
pub mod error;
pub mod land;
pub mod network;
pub mod time;

pub use address::AccountAddress;
pub use error::TypesError;
pub use land::{LandId, LandRecord, LandStatus};
pub use network::Network;
pub use time::{Clock, SystemClock};
