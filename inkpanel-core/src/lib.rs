//! Board-agnostic core logic for the e-paper driver
//!
//! This crate contains all display logic that does not touch hardware:
//!
//! - Panel geometry, rotation and the packed framebuffer
//! - Display states, phase timing and the refresh cadence
//! - Chunked transfer cursors, including the cascade split
//! - Configuration types, TOML parsing and flash persistence
//! - The renderer trait drawing code implements

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod framebuffer;
pub mod state;
pub mod traits;
pub mod transfer;
