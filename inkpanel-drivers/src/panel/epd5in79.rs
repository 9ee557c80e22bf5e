//! 5.79" panel, 792 x 272, two cascaded SSD1683
//!
//! The primary controller (closest to the connector) drives the left half
//! and fills its RAM left to right. The secondary drives the right half and
//! fills right to left, starting from X byte 0x31.
//!
//! Setting the MUX breaks this panel, so the init table leaves it alone.

use inkpanel_core::config::PanelModel;
use inkpanel_protocol::ssd1683::{cmd, param};
use inkpanel_protocol::{Target, END_MARKER};

use super::{Panel, BUSY_TIMEOUT_MS, INIT_TIMEOUT_MS};

const S: Target = Target::Secondary;

/// Start column byte of the secondary controller
const SECONDARY_X_START: u8 = 0x31;

#[rustfmt::skip]
pub(super) const INIT: &[u8] = &[
    cmd::SOFT_RESET, 0x80, 10,
    // Primary: X 0..=49, Y 0..=271
    cmd::DATA_ENTRY_MODE, 0x01, param::X_INC_Y_INC,
    cmd::SET_RAM_X_WINDOW, 0x02, 0x00, 0x31,
    cmd::SET_RAM_Y_WINDOW, 0x04, 0x00, 0x00, 0x0F, 0x01,
    // Secondary: X 49..=0, Y 0..=271
    S.tag(cmd::DATA_ENTRY_MODE), 0x01, param::X_DEC_Y_INC,
    S.tag(cmd::SET_RAM_X_WINDOW), 0x02, 0x31, 0x00,
    S.tag(cmd::SET_RAM_Y_WINDOW), 0x04, 0x00, 0x00, 0x0F, 0x01,
    END_MARKER, END_MARKER,
];

#[rustfmt::skip]
pub(super) const PREPARE_FULL: &[u8] = &[
    cmd::BORDER_WAVEFORM, 0x01, param::BORDER_FULL,
    cmd::DISPLAY_UPDATE_CONTROL, 0x02, param::RAM_BYPASS_RED, param::SEL_CASCADE,
    cmd::SET_RAM_X_COUNTER, 0x01, 0x00,
    cmd::SET_RAM_Y_COUNTER, 0x02, 0x00, 0x00,
    S.tag(cmd::SET_RAM_X_COUNTER), 0x01, SECONDARY_X_START,
    S.tag(cmd::SET_RAM_Y_COUNTER), 0x02, 0x00, 0x00,
    cmd::WRITE_RAM_BW, 0x00,
    END_MARKER, END_MARKER,
];

#[rustfmt::skip]
pub(super) const PREPARE_PARTIAL: &[u8] = &[
    cmd::BORDER_WAVEFORM, 0x01, param::BORDER_PARTIAL,
    cmd::DISPLAY_UPDATE_CONTROL, 0x02, param::RAM_NORMAL, param::SEL_CASCADE,
    cmd::SET_RAM_X_COUNTER, 0x01, 0x00,
    cmd::SET_RAM_Y_COUNTER, 0x02, 0x00, 0x00,
    S.tag(cmd::SET_RAM_X_COUNTER), 0x01, SECONDARY_X_START,
    S.tag(cmd::SET_RAM_Y_COUNTER), 0x02, 0x00, 0x00,
    cmd::WRITE_RAM_BW, 0x00,
    END_MARKER, END_MARKER,
];

/// Close the primary's RAM and point the secondary at its first byte
#[rustfmt::skip]
pub(super) const SWITCH_TO_SECONDARY: &[u8] = &[
    S.tag(cmd::SET_RAM_X_COUNTER), 0x01, SECONDARY_X_START,
    S.tag(cmd::SET_RAM_Y_COUNTER), 0x02, 0x00, 0x00,
    S.tag(cmd::WRITE_RAM_BW), 0x00,
    END_MARKER, END_MARKER,
];

pub(super) const PANEL: Panel = Panel {
    model: PanelModel::Epd5in79,
    init: INIT,
    prepare_full: PREPARE_FULL,
    prepare_partial: PREPARE_PARTIAL,
    switch_to_secondary: SWITCH_TO_SECONDARY,
    init_timeout_ms: INIT_TIMEOUT_MS,
    busy_timeout_ms: BUSY_TIMEOUT_MS,
    chunk_bytes: 0,
    chunk_rows: 2,
};
