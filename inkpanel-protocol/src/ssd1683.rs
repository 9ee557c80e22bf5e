//! SSD1683 command set
//!
//! Only the subset needed for monochrome bring-up, RAM writes and refresh.

/// SSD1683 commands
pub mod cmd {
    pub const SET_MUX: u8 = 0x01;
    pub const DEEP_SLEEP: u8 = 0x10;
    pub const DATA_ENTRY_MODE: u8 = 0x11;
    pub const SOFT_RESET: u8 = 0x12;
    pub const MASTER_ACTIVATION: u8 = 0x20;
    pub const DISPLAY_UPDATE_CONTROL: u8 = 0x21;
    pub const UPDATE_SEQUENCE: u8 = 0x22;
    pub const WRITE_RAM_BW: u8 = 0x24;
    pub const BORDER_WAVEFORM: u8 = 0x3C;
    pub const SET_RAM_X_WINDOW: u8 = 0x44;
    pub const SET_RAM_Y_WINDOW: u8 = 0x45;
    pub const SET_RAM_X_COUNTER: u8 = 0x4E;
    pub const SET_RAM_Y_COUNTER: u8 = 0x4F;
}

/// SSD1683 command parameters
pub mod param {
    pub const BORDER_FULL: u8 = 0x05;
    pub const BORDER_PARTIAL: u8 = 0x80;
    pub const UPDATE_FULL: u8 = 0xF7;
    pub const UPDATE_PARTIAL: u8 = 0xFF;
    pub const DEEP_SLEEP_MODE_1: u8 = 0x01;
    /// Left to right, top to bottom
    pub const X_INC_Y_INC: u8 = 0x03;
    /// Right to left, top to bottom
    pub const X_DEC_Y_INC: u8 = 0x02;
    /// Display update control 1, byte A: normal RAM content
    pub const RAM_NORMAL: u8 = 0x00;
    /// Display update control 1, byte A: bypass red RAM as zero
    pub const RAM_BYPASS_RED: u8 = 0x40;
    /// Display update control 1, byte B: single controller
    pub const SEL_SINGLE_CHIP: u8 = 0x00;
    /// Display update control 1, byte B: cascaded controllers
    pub const SEL_CASCADE: u8 = 0x10;
}

/// Controller addressed by a command in cascade mode
///
/// The secondary controller is selected by setting bit 7 of the opcode.
/// On a single-controller panel everything targets [`Target::Primary`],
/// which leaves opcodes unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Target {
    /// Controller driving the half closest to the connector
    Primary,
    /// Chained controller driving the far half
    Secondary,
}

impl Target {
    /// Opcode offset for this target
    pub const fn offset(self) -> u8 {
        match self {
            Target::Primary => 0x00,
            Target::Secondary => 0x80,
        }
    }

    /// Route `command` to this controller
    pub const fn tag(self, command: u8) -> u8 {
        command | self.offset()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_tag_is_identity() {
        assert_eq!(Target::Primary.tag(cmd::WRITE_RAM_BW), 0x24);
    }

    #[test]
    fn test_secondary_tag_sets_high_bit() {
        assert_eq!(Target::Secondary.tag(cmd::WRITE_RAM_BW), 0xA4);
        assert_eq!(Target::Secondary.tag(cmd::SET_RAM_X_COUNTER), 0xCE);
    }
}
