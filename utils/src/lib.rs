//! Shared utilities for Veridia.

pub mod logging;

pub use logging::{init_logging, LogFormat};
