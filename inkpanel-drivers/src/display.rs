//! Tick-driven e-paper display driver
//!
//! [`EpaperDisplay::tick`] advances the controller by at most one state, or
//! by one bounded chunk of RAM data, and returns. Waits on the busy line are
//! polled across ticks and bounded by a timeout; when a timeout expires the
//! driver assumes the controller is idle and carries on.
//!
//! The only blocking waits are the short delays inside command tables
//! (soft reset, refresh trigger).

use embedded_hal::delay::DelayNs;
use inkpanel_core::config::DisplayConfig;
use inkpanel_core::framebuffer::{Framebuffer, Rotation};
use inkpanel_core::state::{EpdState, Phase, UpdateMode, UpdatePolicy};
use inkpanel_core::traits::{NoRenderer, Renderer};
use inkpanel_core::transfer::{CascadeCursor, CascadeProgress, LinearCursor};
use inkpanel_hal::{Clock, Pin, PinMode};
use inkpanel_protocol::{run_sequence, BitBangBus};

use crate::panel::Panel;

/// Reset line held high before the pulse
pub const RESET_SETTLE_MS: u32 = 100;
/// Reset pulse width
pub const RESET_PULSE_MS: u32 = 10;
/// Wait after releasing reset
pub const RESET_RECOVERY_MS: u32 = 10;

/// Progress of the RAM transfer in flight
#[derive(Debug, Clone)]
enum Cursor {
    Linear(LinearCursor),
    Cascade(CascadeCursor),
}

/// E-paper display on a bit-banged SSD1683 bus
///
/// - `Clk`, `Mosi`, `Cs`, `Dc`: serial bus lines
/// - `Rst`: optional reset output
/// - `Busy`: optional busy input (high = busy)
/// - `D`: blocking delay for command table waits
/// - `R`: renderer called once per update
pub struct EpaperDisplay<Clk, Mosi, Cs, Dc, Rst, Busy, D, R = NoRenderer> {
    bus: BitBangBus<Clk, Mosi, Cs, Dc>,
    reset: Option<Rst>,
    busy: Option<Busy>,
    delay: D,
    panel: &'static Panel,
    framebuffer: Framebuffer,
    policy: UpdatePolicy,
    renderer: R,
    phase: Phase,
    /// `setup` has run
    armed: bool,
    update_requested: bool,
    update_count: u32,
    mode: UpdateMode,
    cursor: Cursor,
}

impl<Clk, Mosi, Cs, Dc, Rst, Busy, D> EpaperDisplay<Clk, Mosi, Cs, Dc, Rst, Busy, D>
where
    Clk: Pin,
    Mosi: Pin,
    Cs: Pin,
    Dc: Pin,
    Rst: Pin,
    Busy: Pin,
    D: DelayNs,
{
    /// Create a driver for the panel in `config`.
    ///
    /// Nothing touches the hardware until [`Self::setup`].
    pub fn new(
        bus: BitBangBus<Clk, Mosi, Cs, Dc>,
        reset: Option<Rst>,
        busy: Option<Busy>,
        delay: D,
        config: &DisplayConfig,
    ) -> Self {
        let panel = Panel::for_model(config.model);
        Self {
            bus,
            reset,
            busy,
            delay,
            panel,
            framebuffer: Framebuffer::new(panel.geometry(), config.rotation),
            policy: config.policy(),
            renderer: NoRenderer,
            phase: Phase::new(EpdState::InitStart, 0),
            armed: false,
            update_requested: false,
            update_count: 0,
            mode: UpdateMode::Full,
            cursor: Cursor::Linear(LinearCursor::new(0)),
        }
    }
}

impl<Clk, Mosi, Cs, Dc, Rst, Busy, D, R> EpaperDisplay<Clk, Mosi, Cs, Dc, Rst, Busy, D, R>
where
    Clk: Pin,
    Mosi: Pin,
    Cs: Pin,
    Dc: Pin,
    Rst: Pin,
    Busy: Pin,
    D: DelayNs,
    R: Renderer,
{
    /// Replace the renderer
    pub fn with_renderer<R2: Renderer>(
        self,
        renderer: R2,
    ) -> EpaperDisplay<Clk, Mosi, Cs, Dc, Rst, Busy, D, R2> {
        EpaperDisplay {
            bus: self.bus,
            reset: self.reset,
            busy: self.busy,
            delay: self.delay,
            panel: self.panel,
            framebuffer: self.framebuffer,
            policy: self.policy,
            renderer,
            phase: self.phase,
            armed: self.armed,
            update_requested: self.update_requested,
            update_count: self.update_count,
            mode: self.mode,
            cursor: self.cursor,
        }
    }

    /// Allocate the framebuffer, park the lines and start initialization
    pub fn setup(&mut self, now_ms: u32) {
        #[cfg(feature = "defmt")]
        defmt::debug!("epd: setup {}", self.panel.model);

        if !self.framebuffer.allocate() {
            #[cfg(feature = "defmt")]
            defmt::error!("epd: framebuffer allocation failed");
        }

        self.bus.setup();
        if let Some(reset) = self.reset.as_mut() {
            reset.setup();
            reset.pin_mode(PinMode::Output);
        }
        if let Some(busy) = self.busy.as_mut() {
            busy.setup();
            busy.pin_mode(PinMode::Input);
        }

        self.phase = Phase::new(EpdState::InitStart, now_ms);
        self.armed = true;
    }

    /// Advance the state machine by one step
    ///
    /// Ticks before [`Self::setup`] are ignored.
    pub fn tick(&mut self, now_ms: u32) {
        if !self.armed {
            return;
        }

        let state = self.phase.state();
        if state.waits_on_busy() {
            let timeout_ms = if state.is_initializing() {
                self.panel.init_timeout_ms
            } else {
                self.panel.busy_timeout_ms
            };
            if !self.busy_released(now_ms, timeout_ms) {
                return;
            }
        }

        match state {
            EpdState::InitStart => {
                #[cfg(feature = "defmt")]
                defmt::debug!("epd: initializing");
                self.phase.enter(EpdState::InitReset, now_ms);
            }
            EpdState::InitReset => match self.reset.as_mut() {
                Some(reset) => {
                    reset.set_high();
                    self.phase.enter(EpdState::InitWaitReset, now_ms);
                }
                None => self.phase.enter(EpdState::InitSendCommands, now_ms),
            },
            EpdState::InitWaitReset => {
                if self.phase.reached(now_ms, RESET_SETTLE_MS) {
                    self.drive_reset(false);
                    self.phase.enter(EpdState::InitWaitResetLow, now_ms);
                }
            }
            EpdState::InitWaitResetLow => {
                if self.phase.reached(now_ms, RESET_PULSE_MS) {
                    self.drive_reset(true);
                    self.phase.enter(EpdState::InitWaitResetHigh, now_ms);
                }
            }
            EpdState::InitWaitResetHigh => {
                if self.phase.reached(now_ms, RESET_RECOVERY_MS) {
                    self.phase.enter(EpdState::InitSendCommands, now_ms);
                }
            }
            EpdState::InitSendCommands => {
                self.run(self.panel.init);
                self.phase.enter(EpdState::InitWaitBusy, now_ms);
            }
            EpdState::InitWaitBusy => self.phase.enter(EpdState::InitDone, now_ms),
            EpdState::InitDone => {
                self.update_count = 0;
                #[cfg(feature = "defmt")]
                defmt::debug!("epd: initialization complete");
                self.phase.enter(EpdState::Idle, now_ms);
            }
            EpdState::Idle => {
                if self.update_requested {
                    self.update_requested = false;
                    self.update_count = self.update_count.wrapping_add(1);
                    self.phase.enter(EpdState::UpdateStart, now_ms);
                }
            }
            EpdState::UpdateStart => {
                self.mode = self.policy.select(self.update_count);
                #[cfg(feature = "defmt")]
                defmt::debug!("epd: {} update #{}", self.mode, self.update_count);

                self.framebuffer.fill(false);
                self.renderer.render(&mut self.framebuffer.canvas());
                self.phase.enter(EpdState::UpdateWaitBusy, now_ms);
            }
            EpdState::UpdateWaitBusy => self.phase.enter(EpdState::UpdatePrepare, now_ms),
            EpdState::UpdatePrepare => {
                self.run(self.panel.prepare(self.mode));
                self.bus.begin_data();
                self.cursor = self.new_cursor();
                self.phase.enter(EpdState::UpdateSendingData, now_ms);
            }
            EpdState::UpdateSendingData => {
                if self.send_chunk() {
                    self.phase.enter(EpdState::UpdateRefresh, now_ms);
                }
            }
            EpdState::UpdateRefresh => {
                self.run(self.panel.refresh(self.mode));
                self.phase.enter(EpdState::UpdateWaitRefresh, now_ms);
            }
            EpdState::UpdateWaitRefresh => {
                #[cfg(feature = "defmt")]
                defmt::debug!("epd: update complete");
                self.phase.enter(EpdState::UpdateDone, now_ms);
            }
            EpdState::UpdateDone => self.phase.enter(EpdState::Idle, now_ms),
            EpdState::DeepSleep => {}
        }
    }

    /// [`Self::tick`] with the time taken from `clock`
    pub fn poll<C: Clock>(&mut self, clock: &C) {
        self.tick(clock.now_ms());
    }

    /// Ask for a redraw on the next idle tick
    pub fn request_update(&mut self) {
        self.update_requested = true;
    }

    /// Put the controller into deep sleep; no further updates run
    ///
    /// Ignored before [`Self::setup`], since the lines are not configured.
    pub fn enter_deep_sleep(&mut self, now_ms: u32) {
        if !self.armed || self.phase.state() == EpdState::DeepSleep {
            return;
        }
        #[cfg(feature = "defmt")]
        defmt::info!("epd: entering deep sleep");

        if self.bus.is_streaming() {
            self.bus.end_data();
        }
        self.phase.enter(EpdState::DeepSleep, now_ms);
        self.run(self.panel.sleep());
    }

    pub fn state(&self) -> EpdState {
        self.phase.state()
    }

    /// Updates since initialization
    pub fn update_count(&self) -> u32 {
        self.update_count
    }

    /// Mode chosen for the current or last update
    pub fn update_mode(&self) -> UpdateMode {
        self.mode
    }

    pub fn is_update_pending(&self) -> bool {
        self.update_requested
    }

    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    /// Logical width, after rotation
    pub fn width(&self) -> u16 {
        self.framebuffer.width()
    }

    /// Logical height, after rotation
    pub fn height(&self) -> u16 {
        self.framebuffer.height()
    }

    pub fn rotation(&self) -> Rotation {
        self.framebuffer.rotation()
    }

    /// Log the panel and cadence settings
    pub fn log_config(&self) {
        #[cfg(feature = "defmt")]
        {
            let geometry = self.panel.geometry();
            defmt::info!("E-paper display:");
            defmt::info!("  Model: {}", self.panel.model.name());
            defmt::info!(
                "  Native size: {}x{} ({} controller(s))",
                geometry.width,
                geometry.height,
                geometry.controllers
            );
            defmt::info!("  Rotation: {} deg", self.rotation().degrees());
            defmt::info!("  Full update every: {}", self.policy.full_update_every());
            if let Some(mode) = self.policy.forced() {
                defmt::info!("  Forced update mode: {}", mode);
            }
            defmt::info!(
                "  Reset line: {}, busy line: {}",
                self.reset.is_some(),
                self.busy.is_some()
            );
        }
    }

    fn run(&mut self, sequence: &[u8]) {
        if let Err(_e) = run_sequence(&mut self.bus, &mut self.delay, sequence) {
            #[cfg(feature = "defmt")]
            defmt::warn!("epd: command table aborted: {}", _e);
        }
    }

    fn drive_reset(&mut self, high: bool) {
        if let Some(reset) = self.reset.as_mut() {
            reset.digital_write(high);
        }
    }

    /// Busy line low, or `timeout_ms` exceeded in this phase
    fn busy_released(&mut self, now_ms: u32, timeout_ms: u32) -> bool {
        let idle = match self.busy.as_mut() {
            Some(busy) => !busy.digital_read(),
            None => true,
        };
        if idle {
            return true;
        }
        if self.phase.exceeded(now_ms, timeout_ms) {
            #[cfg(feature = "defmt")]
            defmt::warn!(
                "epd: busy timeout in {} after {} ms, continuing",
                self.phase.state(),
                self.phase.elapsed(now_ms)
            );
            return true;
        }
        false
    }

    fn new_cursor(&self) -> Cursor {
        let geometry = self.panel.geometry();
        if geometry.is_cascade() {
            Cursor::Cascade(CascadeCursor::new(
                geometry.width_bytes(),
                usize::from(geometry.height),
            ))
        } else {
            Cursor::Linear(LinearCursor::new(self.framebuffer.as_bytes().len()))
        }
    }

    /// Clock out one chunk; `true` once the whole frame is sent
    fn send_chunk(&mut self) -> bool {
        let bytes = self.framebuffer.as_bytes();

        match &mut self.cursor {
            Cursor::Linear(cursor) => {
                if let Some(range) = cursor.next_chunk(self.panel.chunk_bytes) {
                    for &byte in bytes.get(range).unwrap_or_default() {
                        self.bus.write_raw(byte);
                    }
                }
                if !cursor.is_done() {
                    return false;
                }
                self.bus.end_data();
                true
            }
            Cursor::Cascade(cursor) => {
                let chunk = cursor.next_chunk(self.panel.chunk_rows);
                for row in chunk.rows.clone() {
                    let span = cursor.windows().span(chunk.target, row);
                    for &byte in bytes.get(span).unwrap_or_default() {
                        self.bus.write_raw(byte);
                    }
                }

                #[cfg(feature = "defmt")]
                defmt::trace!(
                    "epd: {} rows {}..{}",
                    chunk.target,
                    chunk.rows.start,
                    chunk.rows.end
                );

                match chunk.progress {
                    CascadeProgress::Sending => false,
                    CascadeProgress::SwitchTarget => {
                        self.bus.end_data();
                        if let Err(_e) = run_sequence(
                            &mut self.bus,
                            &mut self.delay,
                            self.panel.switch_to_secondary,
                        ) {
                            #[cfg(feature = "defmt")]
                            defmt::warn!("epd: secondary switch aborted: {}", _e);
                        }
                        self.bus.begin_data();
                        false
                    }
                    CascadeProgress::Done => {
                        self.bus.end_data();
                        true
                    }
                }
            }
        }
    }
}
