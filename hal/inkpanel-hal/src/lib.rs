//! Inkpanel Hardware Abstraction Layer
//!
//! This crate defines the hardware contract the e-paper driver consumes.
//! Chip-specific code only has to provide pins and a millisecond clock;
//! everything above that is board-agnostic.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  inkpanel-drivers (state machine)       │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  inkpanel-hal (this crate - traits)     │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ embedded-hal  │       │ embassy-time  │
//! │  pin adapter  │       │     clock     │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::Pin`] - Digital I/O line with mode control
//! - [`time::Clock`] - Monotonic millisecond timestamp

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod time;

#[cfg(feature = "embedded-hal")]
pub mod eh;

// Re-export key traits at crate root for convenience
pub use gpio::{Pin, PinMode};
pub use time::Clock;
