//! Software-clocked serial bus
//!
//! Bytes go out MSB first. For each bit the clock is pulled low, the data
//! line is set, then the clock rises and the controller samples. A command
//! transaction holds D/C low, a data transaction holds it high; chip-select
//! is asserted (low) around every transaction.
//!
//! Bulk RAM writes keep one data transaction open across many bytes with
//! [`BitBangBus::begin_data`], [`BitBangBus::write_raw`] and
//! [`BitBangBus::end_data`], so the state machine can stream a frame over
//! many ticks without re-framing every byte.

use inkpanel_hal::{Pin, PinMode};

/// Destination for framed command and data bytes
///
/// The command sequence interpreter talks to this trait so it can be
/// exercised without any GPIO.
pub trait CommandSink {
    /// Send one byte as a command transaction
    fn command(&mut self, value: u8);

    /// Send one byte as a data transaction
    fn data(&mut self, value: u8);
}

/// Bit-banged 4-wire serial bus
pub struct BitBangBus<Clk, Mosi, Cs, Dc> {
    clk: Clk,
    mosi: Mosi,
    cs: Cs,
    dc: Dc,
    /// A data transaction is open (CS low, D/C high)
    streaming: bool,
}

impl<Clk, Mosi, Cs, Dc> BitBangBus<Clk, Mosi, Cs, Dc>
where
    Clk: Pin,
    Mosi: Pin,
    Cs: Pin,
    Dc: Pin,
{
    /// Create a new bus from its four lines.
    ///
    /// * `clk`: serial clock (output)
    /// * `mosi`: serial data (output)
    /// * `cs`: chip select, active low (output)
    /// * `dc`: data/command select, low = command (output)
    pub fn new(clk: Clk, mosi: Mosi, cs: Cs, dc: Dc) -> Self {
        Self {
            clk,
            mosi,
            cs,
            dc,
            streaming: false,
        }
    }

    /// Configure the lines and park them at their idle levels
    pub fn setup(&mut self) {
        self.dc.setup();
        self.dc.pin_mode(PinMode::Output);
        self.dc.set_high();
        self.cs.setup();
        self.cs.pin_mode(PinMode::Output);
        self.cs.set_high();
        self.clk.setup();
        self.clk.pin_mode(PinMode::Output);
        self.clk.set_low();
        self.mosi.setup();
        self.mosi.pin_mode(PinMode::Output);
        self.streaming = false;
    }

    /// Frame `value` as a command transaction
    pub fn send_command(&mut self, value: u8) {
        self.close_stream();
        self.dc.set_low();
        self.cs.set_low();
        self.write_byte(value);
        self.cs.set_high();
        // Park D/C high between transactions
        self.dc.set_high();
    }

    /// Frame `value` as a data transaction
    pub fn send_data(&mut self, value: u8) {
        self.close_stream();
        self.dc.set_high();
        self.cs.set_low();
        self.write_byte(value);
        self.cs.set_high();
    }

    /// Open a data transaction that spans several [`Self::write_raw`] calls
    pub fn begin_data(&mut self) {
        self.dc.set_high();
        self.cs.set_low();
        self.streaming = true;
    }

    /// Clock one byte inside the currently open data transaction
    ///
    /// Opens a transaction first if none is open.
    pub fn write_raw(&mut self, value: u8) {
        if !self.streaming {
            self.begin_data();
        }
        self.write_byte(value);
    }

    /// Close the data transaction opened by [`Self::begin_data`]
    pub fn end_data(&mut self) {
        self.cs.set_high();
        self.streaming = false;
    }

    /// Whether a data transaction is currently open
    pub fn is_streaming(&self) -> bool {
        self.streaming
    }

    /// Release the four lines
    pub fn release(self) -> (Clk, Mosi, Cs, Dc) {
        (self.clk, self.mosi, self.cs, self.dc)
    }

    fn close_stream(&mut self) {
        if self.streaming {
            self.end_data();
        }
    }

    fn write_byte(&mut self, mut byte: u8) {
        for _ in 0..8 {
            self.clk.set_low();
            self.mosi.digital_write(byte & 0x80 != 0);
            self.clk.set_high();
            byte <<= 1;
        }
    }
}

impl<Clk, Mosi, Cs, Dc> CommandSink for BitBangBus<Clk, Mosi, Cs, Dc>
where
    Clk: Pin,
    Mosi: Pin,
    Cs: Pin,
    Dc: Pin,
{
    fn command(&mut self, value: u8) {
        self.send_command(value);
    }

    fn data(&mut self, value: u8) {
        self.send_data(value);
    }
}
