//! Logging setup shared by envdeck binaries.
//!
//! The library crates only emit `tracing` events; installing a subscriber is left to the binary through [`logger_init`].

mod logger;
pub use logger::*;
