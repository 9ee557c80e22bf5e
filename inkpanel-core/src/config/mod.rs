//! Display configuration
//!
//! [`DisplayConfig`] is built from a TOML `[display]` section at boot and
//! can be persisted to flash as postcard binary data.

pub mod toml;
pub mod types;

#[cfg(feature = "serde")]
pub mod store;

pub use types::*;
