//! Adapters from `embedded-hal` 1.0 digital pins
//!
//! `embedded-hal` splits input and output into separate traits with fallible
//! operations. The driver contract is infallible, so errors are dropped here.

use embedded_hal::digital::{InputPin, OutputPin};

use crate::gpio::{Pin, PinMode};

/// Output line wrapping an `embedded_hal::digital::OutputPin`
///
/// Reads return the last level written.
pub struct HalOutput<P> {
    pin: P,
    high: bool,
}

impl<P: OutputPin> HalOutput<P> {
    /// Wrap an output pin
    pub fn new(pin: P) -> Self {
        Self { pin, high: false }
    }

    /// Release the underlying pin
    pub fn into_inner(self) -> P {
        self.pin
    }
}

impl<P: OutputPin> Pin for HalOutput<P> {
    fn setup(&mut self) {}

    fn pin_mode(&mut self, _mode: PinMode) {}

    fn digital_write(&mut self, high: bool) {
        let result = if high {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
        if result.is_ok() {
            self.high = high;
        }
    }

    fn digital_read(&mut self) -> bool {
        self.high
    }
}

/// Input line wrapping an `embedded_hal::digital::InputPin`
///
/// Writes are ignored. A failed read reports low, which the busy-line logic
/// treats as idle.
pub struct HalInput<P> {
    pin: P,
}

impl<P: InputPin> HalInput<P> {
    /// Wrap an input pin
    pub fn new(pin: P) -> Self {
        Self { pin }
    }

    /// Release the underlying pin
    pub fn into_inner(self) -> P {
        self.pin
    }
}

impl<P: InputPin> Pin for HalInput<P> {
    fn setup(&mut self) {}

    fn pin_mode(&mut self, _mode: PinMode) {}

    fn digital_write(&mut self, _high: bool) {}

    fn digital_read(&mut self) -> bool {
        self.pin.is_high().unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use embedded_hal::digital::ErrorType;

    struct FakeOut {
        level: bool,
    }

    impl ErrorType for FakeOut {
        type Error = Infallible;
    }

    impl OutputPin for FakeOut {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.level = false;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            self.level = true;
            Ok(())
        }
    }

    struct FakeIn {
        level: bool,
    }

    impl ErrorType for FakeIn {
        type Error = Infallible;
    }

    impl InputPin for FakeIn {
        fn is_high(&mut self) -> Result<bool, Self::Error> {
            Ok(self.level)
        }

        fn is_low(&mut self) -> Result<bool, Self::Error> {
            Ok(!self.level)
        }
    }

    #[test]
    fn test_output_tracks_written_level() {
        let mut out = HalOutput::new(FakeOut { level: false });
        out.digital_write(true);
        assert!(out.digital_read());
        assert!(out.into_inner().level);
    }

    #[test]
    fn test_input_reads_level() {
        let mut input = HalInput::new(FakeIn { level: true });
        input.digital_write(false);
        assert!(input.digital_read());
    }
}
