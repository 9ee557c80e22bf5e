//! Bulk RAM transfer cursors
//!
//! Sending a whole frame at once would stall the caller for tens of
//! milliseconds, so the frame goes out a bounded chunk per tick. The
//! cursors here only do the bookkeeping; the driver clocks the bytes.
//!
//! # Cascade split
//!
//! A cascaded panel has one logical buffer but two controllers, each
//! owning half of the columns. Each row is split into byte windows:
//!
//! ```text
//! row bytes: 0 ........................ wb-1
//! primary:   [0, ceil(wb/2))
//! secondary:            [floor(wb/2), wb)
//! ```
//!
//! With an odd byte width the middle byte goes to both controllers. Each
//! controller ignores the bits outside its own columns, so a byte is never
//! split across two transactions.

use core::ops::Range;

use inkpanel_protocol::Target;

/// Progress through a single-controller buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinearCursor {
    pos: usize,
    len: usize,
}

impl LinearCursor {
    pub const fn new(len: usize) -> Self {
        Self { pos: 0, len }
    }

    pub fn is_done(&self) -> bool {
        self.pos >= self.len
    }

    /// Next range of at most `budget` bytes, or `None` once complete
    ///
    /// A zero budget still moves one byte.
    pub fn next_chunk(&mut self, budget: usize) -> Option<Range<usize>> {
        if self.is_done() {
            return None;
        }
        let start = self.pos;
        let end = start.saturating_add(budget.max(1)).min(self.len);
        self.pos = end;
        Some(start..end)
    }
}

/// Column-byte windows of the two cascaded controllers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CascadeWindows {
    width_bytes: usize,
    primary: Range<usize>,
    secondary: Range<usize>,
}

impl CascadeWindows {
    /// Split rows of `width_bytes` bytes between the controllers
    pub fn new(width_bytes: usize) -> Self {
        Self {
            width_bytes,
            primary: 0..width_bytes.div_ceil(2),
            secondary: width_bytes / 2..width_bytes,
        }
    }

    /// Columns written to `target`
    pub fn window(&self, target: Target) -> Range<usize> {
        match target {
            Target::Primary => self.primary.clone(),
            Target::Secondary => self.secondary.clone(),
        }
    }

    /// Buffer indices of `row` sent to `target`
    pub fn span(&self, target: Target, row: usize) -> Range<usize> {
        let base = row * self.width_bytes;
        let window = self.window(target);
        base + window.start..base + window.end
    }
}

/// What the driver does after sending a cascade chunk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CascadeProgress {
    /// More rows remain for the current controller
    Sending,
    /// Primary RAM is full; close it and open the secondary
    SwitchTarget,
    /// Both controllers are filled
    Done,
}

/// Rows to send in one tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CascadeChunk {
    pub target: Target,
    pub rows: Range<usize>,
    pub progress: CascadeProgress,
}

/// Progress through a cascaded buffer, primary first, rows outer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CascadeCursor {
    windows: CascadeWindows,
    height: usize,
    target: Target,
    row: usize,
    done: bool,
}

impl CascadeCursor {
    pub fn new(width_bytes: usize, height: usize) -> Self {
        Self {
            windows: CascadeWindows::new(width_bytes),
            height,
            target: Target::Primary,
            row: 0,
            done: false,
        }
    }

    pub fn windows(&self) -> &CascadeWindows {
        &self.windows
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Take up to `row_budget` rows for the current controller.
    ///
    /// When the controller's last row is taken, the cursor moves on to the
    /// secondary (reporting [`CascadeProgress::SwitchTarget`]) or finishes.
    pub fn next_chunk(&mut self, row_budget: usize) -> CascadeChunk {
        let target = self.target;
        if self.done {
            return CascadeChunk {
                target,
                rows: self.height..self.height,
                progress: CascadeProgress::Done,
            };
        }

        let start = self.row;
        let end = start.saturating_add(row_budget.max(1)).min(self.height);
        self.row = end;

        let progress = if end < self.height {
            CascadeProgress::Sending
        } else if target == Target::Primary {
            self.target = Target::Secondary;
            self.row = 0;
            CascadeProgress::SwitchTarget
        } else {
            self.done = true;
            CascadeProgress::Done
        };

        CascadeChunk {
            target,
            rows: start..end,
            progress,
        }
    }
}
