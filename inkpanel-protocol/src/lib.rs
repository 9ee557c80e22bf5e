//! SSD1683 Wire Protocol
//!
//! This crate covers everything between a byte the driver wants to send and
//! the toggling of GPIO lines:
//!
//! - [`ssd1683`]: controller opcodes, parameters and cascade target tags
//! - [`encoder`]: software-clocked 4-wire serial bus (CLK, MOSI, CS, D/C)
//! - [`sequence`]: the compact table format for command lists
//! - [`interpreter`]: replays a table through an encoder
//!
//! # Command sequence format
//! ```text
//! ┌─────────┬───────────────┬──────────────┬──────────────┐
//! │ COMMAND │ COUNT         │ [DELAY]      │ ARGS         │
//! │ 1B      │ 1B (bit7=dly) │ 1B if bit7   │ COUNT & 0x7F │
//! └─────────┴───────────────┴──────────────┴──────────────┘
//!                  ... repeated, closed by 0xFF 0xFF
//! ```
//!
//! Bringing up a different panel is a different table, not different code.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod encoder;
pub mod interpreter;
pub mod sequence;
pub mod ssd1683;

pub use encoder::{BitBangBus, CommandSink};
pub use interpreter::run_sequence;
pub use sequence::{SequenceBuilder, SequenceError, Step, Steps, END_MARKER};
pub use ssd1683::Target;
