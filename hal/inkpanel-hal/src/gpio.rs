//! GPIO pin abstractions
//!
//! Provides the digital line contract used by the bit-banged serial bus,
//! the reset line and the busy-status input.

/// Electrical direction of a pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinMode {
    /// Pin reads an external level
    Input,
    /// Pin drives a level
    Output,
}

/// Digital I/O line
///
/// Implementations handle the register manipulation for the specific chip.
/// None of these operations can fail from the driver's point of view; a
/// backend that can report errors must absorb them.
pub trait Pin {
    /// One-time hardware preparation (clock gating, default direction)
    fn setup(&mut self);

    /// Switch the pin direction
    fn pin_mode(&mut self, mode: PinMode);

    /// Drive the pin high (`true`) or low (`false`)
    fn digital_write(&mut self, high: bool);

    /// Sample the pin level
    fn digital_read(&mut self) -> bool;

    /// Drive the pin high
    fn set_high(&mut self) {
        self.digital_write(true);
    }

    /// Drive the pin low
    fn set_low(&mut self) {
        self.digital_write(false);
    }
}

impl<P: Pin + ?Sized> Pin for &mut P {
    fn setup(&mut self) {
        (**self).setup();
    }

    fn pin_mode(&mut self, mode: PinMode) {
        (**self).pin_mode(mode);
    }

    fn digital_write(&mut self, high: bool) {
        (**self).digital_write(high);
    }

    fn digital_read(&mut self) -> bool {
        (**self).digital_read()
    }
}

/// Placeholder for an optional line that is not wired
///
/// Reads low and ignores writes. Useful as the type parameter when a board
/// has no reset or busy line.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPin;

impl Pin for NoPin {
    fn setup(&mut self) {}

    fn pin_mode(&mut self, _mode: PinMode) {}

    fn digital_write(&mut self, _high: bool) {}

    fn digital_read(&mut self) -> bool {
        false
    }
}
