//! Display controller
//!
//! Owns the panel hardware (transport, control lines, delay) together with
//! the power state, and is the only place the state machine is advanced.
//! The device keeps one controller behind its serialisation lock.

use embedded_hal::delay::DelayNs;
use lpm027_core::{PowerEvent, PowerState, Timing};
use lpm027_hal::{ControlLine, ControlLines, SerialTransport};
use lpm027_protocol::{ALL_CLEAR, WIDTH};

use crate::error::Error;
use crate::transfer;

/// Panel hardware plus power state
pub struct Controller<T, L, D> {
    transport: T,
    lines: L,
    delay: D,
    state: PowerState,
}

impl<T, L, D> Controller<T, L, D>
where
    T: SerialTransport,
    L: ControlLines,
    D: DelayNs,
{
    /// Take ownership of the hardware; nothing is driven yet
    pub fn new(transport: T, lines: L, delay: D) -> Self {
        Self {
            transport,
            lines,
            delay,
            state: PowerState::Uninitialized,
        }
    }

    /// Current power state
    pub fn state(&self) -> PowerState {
        self.state
    }

    fn apply(&mut self, event: PowerEvent) {
        let next = self.state.transition(event);
        if next != self.state {
            trace!("power {} -> {}", self.state, next);
        }
        self.state = next;
    }

    /// Run the power-up sequence and clear the panel
    ///
    /// On failure the state falls back to `Uninitialized` and the error
    /// from the failing step is returned.
    pub fn init(&mut self, timing: &Timing) -> Result<(), Error<T::Error, L::Error>> {
        self.apply(PowerEvent::BeginInit);

        match self.power_up(timing) {
            Ok(()) => {
                self.apply(PowerEvent::InitComplete);
                Ok(())
            }
            Err(e) => {
                self.apply(PowerEvent::InitFailed);
                Err(e)
            }
        }
    }

    fn power_up(&mut self, timing: &Timing) -> Result<(), Error<T::Error, L::Error>> {
        for line in ControlLine::ALL {
            self.lines.set_low(line).map_err(Error::ControlLine)?;
        }

        self.lines
            .set_low(ControlLine::ComInversionModeSelect)
            .map_err(Error::ControlLine)?;
        self.lines
            .set_low(ControlLine::DisplayEnable)
            .map_err(Error::ControlLine)?;
        self.delay.delay_ms(timing.settle_ms);

        self.lines
            .set_high(ControlLine::DisplayEnable)
            .map_err(Error::ControlLine)?;
        debug!("display enabled, clearing");

        transfer::framed(&mut self.transport, &mut self.lines, &[&ALL_CLEAR])?;
        self.delay.delay_ms(timing.clear_ms);
        debug!("panel cleared");

        Ok(())
    }

    /// Turn the display off; panel memory is kept
    ///
    /// Rejected with `InvalidArgument` unless the panel is attached.
    pub fn blank(&mut self) -> Result<(), Error<T::Error, L::Error>> {
        self.request(PowerEvent::Blank)
    }

    /// Turn the display back on
    ///
    /// Rejected with `InvalidArgument` unless the panel is attached.
    pub fn unblank(&mut self) -> Result<(), Error<T::Error, L::Error>> {
        self.request(PowerEvent::Unblank)
    }

    fn request(&mut self, event: PowerEvent) -> Result<(), Error<T::Error, L::Error>> {
        if !self.state.is_attached() {
            warn!("{} rejected in state {}", event, self.state);
            return Err(Error::InvalidArgument);
        }

        let enabled = self.state.transition(event).is_display_enabled();
        self.lines
            .set(ControlLine::DisplayEnable, enabled)
            .map_err(Error::ControlLine)?;
        self.apply(event);
        Ok(())
    }

    /// Send one encoded scan line
    pub fn send_line(
        &mut self,
        line: usize,
        row: &[u32; WIDTH],
    ) -> Result<(), Error<T::Error, L::Error>> {
        transfer::send_line(&mut self.transport, &mut self.lines, line, row)
    }

    /// Block for `us` microseconds
    pub fn delay_us(&mut self, us: u32) {
        self.delay.delay_us(us);
    }

    /// Drive display-enable low and enter `Off`
    ///
    /// The state moves to `Off` even if the line could not be driven.
    pub fn shutdown(&mut self) -> Result<(), Error<T::Error, L::Error>> {
        let result = self
            .lines
            .set_low(ControlLine::DisplayEnable)
            .map_err(Error::ControlLine);
        self.apply(PowerEvent::Detach);
        result
    }

    /// Hand the hardware back
    pub fn release(self) -> (T, L, D) {
        (self.transport, self.lines, self.delay)
    }
}
