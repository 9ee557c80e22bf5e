//! Full/partial refresh cadence
//!
//! Partial refreshes are fast but leave ghosting behind, so every so often
//! an update is promoted to a full refresh. The first update after init is
//! always full.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Updates between forced full refreshes
pub const DEFAULT_FULL_UPDATE_EVERY: u16 = 10;

/// Refresh waveform used for one update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum UpdateMode {
    /// Slow, flashing refresh that clears ghosting
    Full,
    /// Fast refresh of changed pixels only
    Partial,
}

/// Chooses the mode of each update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UpdatePolicy {
    full_update_every: u16,
    forced: Option<UpdateMode>,
}

impl Default for UpdatePolicy {
    fn default() -> Self {
        Self::new(DEFAULT_FULL_UPDATE_EVERY, None)
    }
}

impl UpdatePolicy {
    /// `full_update_every` is clamped to at least 1
    pub fn new(full_update_every: u16, forced: Option<UpdateMode>) -> Self {
        Self {
            full_update_every: full_update_every.max(1),
            forced,
        }
    }

    pub fn full_update_every(&self) -> u16 {
        self.full_update_every
    }

    pub fn forced(&self) -> Option<UpdateMode> {
        self.forced
    }

    /// Mode for the update with sequence number `counter` (first is 1)
    pub fn select(&self, counter: u32) -> UpdateMode {
        if let Some(mode) = self.forced {
            return mode;
        }
        if counter == 1 || counter % u32::from(self.full_update_every) == 0 {
            UpdateMode::Full
        } else {
            UpdateMode::Partial
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_cadence() {
        let policy = UpdatePolicy::default();
        for counter in 1..=30 {
            let expected = if matches!(counter, 1 | 10 | 20 | 30) {
                UpdateMode::Full
            } else {
                UpdateMode::Partial
            };
            assert_eq!(policy.select(counter), expected, "counter {}", counter);
        }
    }

    #[test]
    fn test_forced_mode_wins() {
        let full = UpdatePolicy::new(10, Some(UpdateMode::Full));
        let partial = UpdatePolicy::new(10, Some(UpdateMode::Partial));
        for counter in 1..=25 {
            assert_eq!(full.select(counter), UpdateMode::Full);
            assert_eq!(partial.select(counter), UpdateMode::Partial);
        }
    }

    #[test]
    fn test_every_update_full_when_one() {
        let policy = UpdatePolicy::new(1, None);
        assert!((1..10).all(|c| policy.select(c) == UpdateMode::Full));
    }

    #[test]
    fn test_zero_is_clamped() {
        let policy = UpdatePolicy::new(0, None);
        assert_eq!(policy.full_update_every(), 1);
        assert_eq!(policy.select(7), UpdateMode::Full);
    }
}
