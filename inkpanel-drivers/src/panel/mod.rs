//! Panel descriptors
//!
//! Everything that differs between supported panels is data: command
//! tables, busy timeouts and the transfer chunk size. The state machine
//! picks a descriptor once at construction and never branches on the model.

mod epd4in2;
mod epd5in79;

use inkpanel_core::config::PanelModel;
use inkpanel_core::framebuffer::Geometry;
use inkpanel_core::state::UpdateMode;
use inkpanel_protocol::ssd1683::{cmd, param};
use inkpanel_protocol::END_MARKER;

/// Busy wait bound after the init table
pub const INIT_TIMEOUT_MS: u32 = 1_000;

/// Busy wait bound before and after a refresh
pub const BUSY_TIMEOUT_MS: u32 = 60_000;

/// Select the full waveform and trigger it
#[rustfmt::skip]
pub const REFRESH_FULL: &[u8] = &[
    cmd::UPDATE_SEQUENCE, 0x01, param::UPDATE_FULL,
    cmd::MASTER_ACTIVATION, 0x80, 10,
    END_MARKER, END_MARKER,
];

/// Select the partial waveform and trigger it
#[rustfmt::skip]
pub const REFRESH_PARTIAL: &[u8] = &[
    cmd::UPDATE_SEQUENCE, 0x01, param::UPDATE_PARTIAL,
    cmd::MASTER_ACTIVATION, 0x80, 10,
    END_MARKER, END_MARKER,
];

/// Enter deep sleep mode 1
#[rustfmt::skip]
pub const SLEEP: &[u8] = &[
    cmd::DEEP_SLEEP, 0x01, param::DEEP_SLEEP_MODE_1,
    END_MARKER, END_MARKER,
];

/// Static description of one panel model
#[derive(Debug)]
pub struct Panel {
    pub model: PanelModel,
    /// Controller bring-up after reset
    pub init: &'static [u8],
    /// Border, update control and RAM counters for a full refresh, ending
    /// with the write-RAM opcode
    pub prepare_full: &'static [u8],
    /// Same as `prepare_full` for a partial refresh
    pub prepare_partial: &'static [u8],
    /// Sent between the two halves of a cascaded transfer
    pub switch_to_secondary: &'static [u8],
    pub init_timeout_ms: u32,
    pub busy_timeout_ms: u32,
    /// Bytes per tick on a single-controller panel
    pub chunk_bytes: usize,
    /// Rows per tick and controller on a cascaded panel
    pub chunk_rows: usize,
}

impl Panel {
    /// Descriptor for `model`
    pub const fn for_model(model: PanelModel) -> &'static Panel {
        match model {
            PanelModel::Epd4in2 => &epd4in2::PANEL,
            PanelModel::Epd5in79 => &epd5in79::PANEL,
        }
    }

    pub const fn geometry(&self) -> Geometry {
        self.model.geometry()
    }

    /// RAM preparation table for `mode`
    pub const fn prepare(&self, mode: UpdateMode) -> &'static [u8] {
        match mode {
            UpdateMode::Full => self.prepare_full,
            UpdateMode::Partial => self.prepare_partial,
        }
    }

    /// Refresh trigger table for `mode`
    pub const fn refresh(&self, mode: UpdateMode) -> &'static [u8] {
        match mode {
            UpdateMode::Full => REFRESH_FULL,
            UpdateMode::Partial => REFRESH_PARTIAL,
        }
    }

    pub const fn sleep(&self) -> &'static [u8] {
        SLEEP
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inkpanel_protocol::sequence::{steps, validate};

    const MODELS: [PanelModel; 2] = [PanelModel::Epd4in2, PanelModel::Epd5in79];

    #[test]
    fn test_all_tables_are_well_formed() {
        for model in MODELS {
            let panel = Panel::for_model(model);
            for table in [
                panel.init,
                panel.prepare_full,
                panel.prepare_partial,
                panel.switch_to_secondary,
                panel.refresh(UpdateMode::Full),
                panel.refresh(UpdateMode::Partial),
                panel.sleep(),
            ] {
                assert!(validate(table).is_ok(), "{:?}", model);
            }
        }
    }

    #[test]
    fn test_prepare_ends_with_write_ram() {
        for model in MODELS {
            let panel = Panel::for_model(model);
            for mode in [UpdateMode::Full, UpdateMode::Partial] {
                let last = steps(panel.prepare(mode)).last().unwrap().unwrap();
                assert_eq!(last.command, cmd::WRITE_RAM_BW);
                assert!(last.args.is_empty());
            }
        }
    }

    #[test]
    fn test_prepare_border_and_update_control() {
        let panel = Panel::for_model(PanelModel::Epd5in79);
        let full: Vec<_> = steps(panel.prepare(UpdateMode::Full))
            .map(Result::unwrap)
            .collect();
        assert_eq!(full[0].args, &[param::BORDER_FULL]);
        assert_eq!(full[1].args, &[0x40, param::SEL_CASCADE]);

        let partial: Vec<_> = steps(panel.prepare(UpdateMode::Partial))
            .map(Result::unwrap)
            .collect();
        assert_eq!(partial[0].args, &[param::BORDER_PARTIAL]);
        assert_eq!(partial[1].args, &[0x00, param::SEL_CASCADE]);
    }

    #[test]
    fn test_single_panel_has_no_switch() {
        let panel = Panel::for_model(PanelModel::Epd4in2);
        assert_eq!(validate(panel.switch_to_secondary), Ok(0));
        assert!(panel.chunk_bytes > 0);
        assert!(!panel.geometry().is_cascade());
    }

    #[test]
    fn test_cascade_switch_targets_secondary() {
        let panel = Panel::for_model(PanelModel::Epd5in79);
        assert!(panel.chunk_rows > 0);
        for step in steps(panel.switch_to_secondary) {
            assert!(step.unwrap().command & 0x80 != 0);
        }
    }

    #[test]
    fn test_refresh_trigger_waits() {
        let panel = Panel::for_model(PanelModel::Epd4in2);
        let trigger = steps(panel.refresh(UpdateMode::Full)).nth(1).unwrap().unwrap();
        assert_eq!(trigger.command, cmd::MASTER_ACTIVATION);
        assert_eq!(trigger.delay_ms, Some(10));
        assert_eq!(panel.busy_timeout_ms, 60_000);
        assert_eq!(panel.init_timeout_ms, 1_000);
    }
}
