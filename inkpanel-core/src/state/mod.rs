//! Display state machine vocabulary
//!
//! The states, the phase timer and the full/partial cadence rule. The
//! driver in `inkpanel-drivers` owns the pins and walks these states.

pub mod cadence;
pub mod phase;

pub use cadence::{UpdateMode, UpdatePolicy, DEFAULT_FULL_UPDATE_EVERY};
pub use phase::{EpdState, Phase};
