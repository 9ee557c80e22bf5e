//! 4.2" panel, 400 x 300, one SSD1683
//!
//! RAM X runs over 50 bytes (0x00..=0x31), Y over 300 lines (0..=0x12B).

use inkpanel_core::config::PanelModel;
use inkpanel_protocol::ssd1683::{cmd, param};
use inkpanel_protocol::END_MARKER;

use super::{Panel, BUSY_TIMEOUT_MS, INIT_TIMEOUT_MS};

#[rustfmt::skip]
pub(super) const INIT: &[u8] = &[
    cmd::SOFT_RESET, 0x80, 10,
    cmd::SET_MUX, 0x03, 0x2B, 0x01, 0x00,
    cmd::DISPLAY_UPDATE_CONTROL, 0x02, param::RAM_BYPASS_RED, param::SEL_SINGLE_CHIP,
    cmd::BORDER_WAVEFORM, 0x01, param::BORDER_FULL,
    cmd::DATA_ENTRY_MODE, 0x01, param::X_INC_Y_INC,
    cmd::SET_RAM_X_WINDOW, 0x02, 0x00, 0x31,
    cmd::SET_RAM_Y_WINDOW, 0x04, 0x00, 0x00, 0x2B, 0x01,
    cmd::SET_RAM_X_COUNTER, 0x01, 0x00,
    cmd::SET_RAM_Y_COUNTER, 0x02, 0x00, 0x00,
    END_MARKER, END_MARKER,
];

#[rustfmt::skip]
pub(super) const PREPARE_FULL: &[u8] = &[
    cmd::BORDER_WAVEFORM, 0x01, param::BORDER_FULL,
    cmd::DISPLAY_UPDATE_CONTROL, 0x02, param::RAM_BYPASS_RED, param::SEL_SINGLE_CHIP,
    cmd::SET_RAM_X_COUNTER, 0x01, 0x00,
    cmd::SET_RAM_Y_COUNTER, 0x02, 0x00, 0x00,
    cmd::WRITE_RAM_BW, 0x00,
    END_MARKER, END_MARKER,
];

#[rustfmt::skip]
pub(super) const PREPARE_PARTIAL: &[u8] = &[
    cmd::BORDER_WAVEFORM, 0x01, param::BORDER_PARTIAL,
    cmd::DISPLAY_UPDATE_CONTROL, 0x02, param::RAM_NORMAL, param::SEL_SINGLE_CHIP,
    cmd::SET_RAM_X_COUNTER, 0x01, 0x00,
    cmd::SET_RAM_Y_COUNTER, 0x02, 0x00, 0x00,
    cmd::WRITE_RAM_BW, 0x00,
    END_MARKER, END_MARKER,
];

pub(super) const PANEL: Panel = Panel {
    model: PanelModel::Epd4in2,
    init: INIT,
    prepare_full: PREPARE_FULL,
    prepare_partial: PREPARE_PARTIAL,
    switch_to_secondary: &[END_MARKER, END_MARKER],
    init_timeout_ms: INIT_TIMEOUT_MS,
    busy_timeout_ms: BUSY_TIMEOUT_MS,
    chunk_bytes: 32,
    chunk_rows: 0,
};
