//! States and phase timing

use inkpanel_hal::time::elapsed_ms;

/// Display states
///
/// Initialization runs `InitStart` through `InitDone`, then the machine
/// cycles between `Idle` and the `Update*` states. `DeepSleep` ends the
/// session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EpdState {
    InitStart,
    /// Drive reset high, or skip the pulse if there is no reset line
    InitReset,
    /// Reset held high for 100 ms
    InitWaitReset,
    /// Reset pulled low for 10 ms
    InitWaitResetLow,
    /// Reset released for 10 ms
    InitWaitResetHigh,
    InitSendCommands,
    InitWaitBusy,
    InitDone,
    Idle,
    /// Pick the update mode, clear the buffer and render
    UpdateStart,
    UpdateWaitBusy,
    /// Border, update control, RAM counters, open the RAM write
    UpdatePrepare,
    UpdateSendingData,
    UpdateRefresh,
    UpdateWaitRefresh,
    UpdateDone,
    DeepSleep,
}

impl EpdState {
    /// Still bringing the controller up
    pub fn is_initializing(&self) -> bool {
        matches!(
            self,
            EpdState::InitStart
                | EpdState::InitReset
                | EpdState::InitWaitReset
                | EpdState::InitWaitResetLow
                | EpdState::InitWaitResetHigh
                | EpdState::InitSendCommands
                | EpdState::InitWaitBusy
                | EpdState::InitDone
        )
    }

    /// Polls the busy line with a timeout
    pub fn waits_on_busy(&self) -> bool {
        matches!(
            self,
            EpdState::InitWaitBusy | EpdState::UpdateWaitBusy | EpdState::UpdateWaitRefresh
        )
    }
}

/// Current state plus the time it was entered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Phase {
    state: EpdState,
    entered_ms: u32,
}

impl Phase {
    pub const fn new(state: EpdState, now_ms: u32) -> Self {
        Self {
            state,
            entered_ms: now_ms,
        }
    }

    pub fn state(&self) -> EpdState {
        self.state
    }

    /// Move to `next`, restarting the phase timer
    pub fn enter(&mut self, next: EpdState, now_ms: u32) {
        #[cfg(feature = "defmt")]
        defmt::debug!("epd: {} -> {}", self.state, next);
        self.state = next;
        self.entered_ms = now_ms;
    }

    /// Milliseconds spent in the current state
    pub fn elapsed(&self, now_ms: u32) -> u32 {
        elapsed_ms(now_ms, self.entered_ms)
    }

    /// At least `ms` have passed since entry
    pub fn reached(&self, now_ms: u32, ms: u32) -> bool {
        self.elapsed(now_ms) >= ms
    }

    /// Strictly more than `ms` have passed since entry
    pub fn exceeded(&self, now_ms: u32, ms: u32) -> bool {
        self.elapsed(now_ms) > ms
    }
}
