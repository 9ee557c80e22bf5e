//! E-paper panel drivers
//!
//! This crate ties the pieces together for the supported SSD1683 panels:
//!
//! - [`panel`]: per-model command tables, timeouts and chunk sizes
//! - [`display`]: the tick-driven [`EpaperDisplay`] state machine
//!
//! # Example
//!
//! ```ignore
//! let config = inkpanel_core::config::toml::parse_config(CONFIG)?;
//! let bus = BitBangBus::new(clk, mosi, cs, dc);
//! let mut display = EpaperDisplay::new(bus, Some(rst), Some(busy), delay, &config)
//!     .with_renderer(|canvas: &mut Canvas<'_>| draw_dashboard(canvas));
//!
//! display.setup(clock.now_ms());
//! display.request_update();
//! loop {
//!     display.poll(&clock);
//!     // other cooperative work
//! }
//! ```

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod display;
pub mod panel;

pub use display::EpaperDisplay;
pub use panel::Panel;
