//! Nullable infrastructure for deterministic testing.
//!
//! External dependencies (the registry fullnode, the wall clock) are
//! abstracted behind traits. This crate provides test-friendly
//! implementations that:
//! - Return deterministic values
//! - Can be controlled programmatically
//! - Never touch the network
//!
//! Usage: swap real implementations for nullables in tests.

pub mod clock;
pub mod registry;

pub use clock::NullClock;
pub use registry::NullRegistry;
