//! Command sequence interpreter
//!
//! Replays a table through a [`CommandSink`]: the opcode as a command
//! transaction, then the optional blocking delay, then every argument as
//! its own data transaction.

use embedded_hal::delay::DelayNs;

use crate::encoder::CommandSink;
use crate::sequence::{steps, SequenceError};

/// Execute `sequence` until its end marker.
///
/// Returns the number of steps sent. A malformed table stops at the
/// offending step; the steps before it have already gone out.
pub fn run_sequence<S, D>(
    sink: &mut S,
    delay: &mut D,
    sequence: &[u8],
) -> Result<usize, SequenceError>
where
    S: CommandSink,
    D: DelayNs,
{
    let mut sent = 0;

    for step in steps(sequence) {
        let step = match step {
            Ok(step) => step,
            Err(e) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("sequence: malformed after {} steps: {}", sent, e);
                return Err(e);
            }
        };

        sink.command(step.command);
        if let Some(ms) = step.delay_ms {
            delay.delay_ms(u32::from(ms));
        }
        for &arg in step.args {
            sink.data(arg);
        }
        sent += 1;
    }

    Ok(sent)
}
