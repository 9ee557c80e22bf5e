//! Collaborator traits
//!
//! Seams between the display state machine and application code.

pub mod renderer;

pub use renderer::{NoRenderer, Renderer};
