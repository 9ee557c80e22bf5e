//! Command sequence table format
//!
//! A sequence is a flat byte table:
//! - COMMAND (1 byte): opcode, never `0xFF`
//! - COUNT (1 byte): argument count; bit 7 flags a delay
//! - DELAY (1 byte, only if bit 7 of COUNT is set): milliseconds to wait
//!   after the command, before its arguments
//! - ARGS (COUNT & 0x7F bytes)
//!
//! The table is closed by two consecutive `0xFF` bytes.

use heapless::Vec;

/// Value of both bytes of the end marker
pub const END_MARKER: u8 = 0xFF;

/// Bit in COUNT that announces a delay byte
pub const DELAY_FLAG: u8 = 0x80;

/// Bits in COUNT holding the argument count
pub const ARG_COUNT_MASK: u8 = 0x7F;

/// Maximum arguments a single step can carry
pub const MAX_ARGS: usize = ARG_COUNT_MASK as usize;

/// Errors that can occur reading or building a sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SequenceError {
    /// A step ends before its delay or arguments
    Truncated,
    /// The table ends without the `0xFF 0xFF` marker
    MissingEndMarker,
    /// A step starts with the reserved `0xFF` opcode
    ReservedCommand,
    /// More than 127 arguments in one step
    TooManyArgs,
    /// Builder capacity exhausted
    BufferFull,
}

/// One decoded step of a sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Step<'a> {
    /// Opcode, sent as a command transaction
    pub command: u8,
    /// Blocking wait after the opcode, in milliseconds
    pub delay_ms: Option<u8>,
    /// Argument bytes, each sent as a data transaction
    pub args: &'a [u8],
}

impl Step<'_> {
    /// Number of table bytes this step occupies
    pub fn encoded_len(&self) -> usize {
        2 + usize::from(self.delay_ms.is_some()) + self.args.len()
    }
}

/// Iterator over the steps of a sequence table
///
/// Yields `Err` once and then stops if the table is malformed.
#[derive(Debug, Clone)]
pub struct Steps<'a> {
    bytes: &'a [u8],
    pos: usize,
    done: bool,
}

impl<'a> Steps<'a> {
    /// Start reading `bytes` from the first step
    pub fn new(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            pos: 0,
            done: false,
        }
    }

    /// Bytes consumed so far, end marker included once reached
    pub fn position(&self) -> usize {
        self.pos
    }

    fn fail(&mut self, err: SequenceError) -> Option<Result<Step<'a>, SequenceError>> {
        self.done = true;
        Some(Err(err))
    }
}

impl<'a> Iterator for Steps<'a> {
    type Item = Result<Step<'a>, SequenceError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let rest = self.bytes.get(self.pos..).unwrap_or(&[]);
        let (command, count) = match rest {
            [] => return self.fail(SequenceError::MissingEndMarker),
            [_] => return self.fail(SequenceError::Truncated),
            [command, count, ..] => (*command, *count),
        };

        if command == END_MARKER && count == END_MARKER {
            self.pos += 2;
            self.done = true;
            return None;
        }
        if command == END_MARKER {
            return self.fail(SequenceError::ReservedCommand);
        }

        let mut cursor = 2;
        let delay_ms = if count & DELAY_FLAG != 0 {
            match rest.get(cursor) {
                Some(&ms) => {
                    cursor += 1;
                    Some(ms)
                }
                None => return self.fail(SequenceError::Truncated),
            }
        } else {
            None
        };

        let n_args = usize::from(count & ARG_COUNT_MASK);
        let Some(args) = rest.get(cursor..cursor + n_args) else {
            return self.fail(SequenceError::Truncated);
        };

        self.pos += cursor + n_args;
        Some(Ok(Step {
            command,
            delay_ms,
            args,
        }))
    }
}

/// Read the steps of `bytes`
pub fn steps(bytes: &[u8]) -> Steps<'_> {
    Steps::new(bytes)
}

/// Check a whole table, returning its step count
pub fn validate(bytes: &[u8]) -> Result<usize, SequenceError> {
    let mut count = 0;
    for step in steps(bytes) {
        step?;
        count += 1;
    }
    Ok(count)
}

/// Builds a sequence table at runtime
///
/// `N` is the table capacity in bytes, end marker included.
#[derive(Debug, Clone, Default)]
pub struct SequenceBuilder<const N: usize> {
    bytes: Vec<u8, N>,
}

impl<const N: usize> SequenceBuilder<N> {
    /// Create an empty builder
    pub fn new() -> Self {
        Self { bytes: Vec::new() }
    }

    /// Append a step without delay
    pub fn step(&mut self, command: u8, args: &[u8]) -> Result<&mut Self, SequenceError> {
        self.push_step(command, None, args)
    }

    /// Append a step that waits `delay_ms` after the opcode
    pub fn step_with_delay(
        &mut self,
        command: u8,
        delay_ms: u8,
        args: &[u8],
    ) -> Result<&mut Self, SequenceError> {
        self.push_step(command, Some(delay_ms), args)
    }

    /// Close the table with the end marker
    pub fn finish(mut self) -> Result<Vec<u8, N>, SequenceError> {
        self.bytes
            .extend_from_slice(&[END_MARKER, END_MARKER])
            .map_err(|_| SequenceError::BufferFull)?;
        Ok(self.bytes)
    }

    fn push_step(
        &mut self,
        command: u8,
        delay_ms: Option<u8>,
        args: &[u8],
    ) -> Result<&mut Self, SequenceError> {
        if command == END_MARKER {
            return Err(SequenceError::ReservedCommand);
        }
        if args.len() > MAX_ARGS {
            return Err(SequenceError::TooManyArgs);
        }

        // Both bounds checked above
        let mut count = args.len() as u8;
        if delay_ms.is_some() {
            count |= DELAY_FLAG;
        }

        let start = self.bytes.len();
        if self.extend_step(command, count, delay_ms, args).is_err() {
            // Leave the table as it was before this step
            self.bytes.truncate(start);
            return Err(SequenceError::BufferFull);
        }
        Ok(self)
    }

    fn extend_step(
        &mut self,
        command: u8,
        count: u8,
        delay_ms: Option<u8>,
        args: &[u8],
    ) -> Result<(), ()> {
        self.bytes.extend_from_slice(&[command, count])?;
        if let Some(ms) = delay_ms {
            self.bytes.push(ms).map_err(|_| ())?;
        }
        self.bytes.extend_from_slice(args)
    }
}
