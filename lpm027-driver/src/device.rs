//! The framebuffer device
//!
//! [`Lpm027`] ties the frame buffer, the panel controller and the
//! configuration together. Every mutating graphics hook updates the buffer
//! and then redraws the whole panel under the serialisation lock.
//!
//! # Locking
//!
//! The controller (bus, lines, delay, power state) sits behind one
//! `embassy-sync` mutex, so at most one refresh or power change is on the
//! wire at a time. Blocking callers spin on `try_lock`; the raw mutex is
//! only held while the lock word is checked, never across a transfer.
//! The frame buffer is outside the lock: producers write pixels while a
//! refresh may be reading them.
//!
//! Hooks must not be called from an interrupt that can preempt a refresh
//! in progress; the spin would never end.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::mutex::{Mutex, MutexGuard};
use embedded_hal::delay::DelayNs;
use lpm027_core::{PanelConfig, PowerState};
use lpm027_fb::{
    check_var, ops, BlankMode, CopyArea, FillRect, FixScreenInfo, FrameBuffer, FramebufferOps,
    Image, VarScreenInfo,
};
use lpm027_hal::{ControlLines, SerialTransport};
use lpm027_protocol::{HEIGHT, WIDTH};
use portable_atomic::AtomicU32;

use crate::controller::Controller;
use crate::error::Error;
use crate::refresh::{refresh_frame, RefreshReport};

/// Driver error for a given transport and line set
pub type DeviceError<T, L> =
    Error<<T as SerialTransport>::Error, <L as ControlLines>::Error>;

/// One attached LPM027M128C panel
///
/// `M` guards the lock word: `CriticalSectionRawMutex` when the device is
/// shared between threads or cores, `NoopRawMutex` when it never leaves
/// one context.
pub struct Lpm027<M: RawMutex, T, L, D> {
    hw: Mutex<M, Controller<T, L, D>>,
    fb: FrameBuffer,
    config: PanelConfig,
}

impl<M, T, L, D> Lpm027<M, T, L, D>
where
    M: RawMutex,
    T: SerialTransport,
    L: ControlLines,
    D: DelayNs,
{
    /// Allocate the frame buffer and bring the panel up
    ///
    /// Validates `config`, drives all control lines low, runs the power-up
    /// sequence and clears the panel. On error nothing is kept; the
    /// hardware handles are dropped with the error.
    pub fn attach(
        transport: T,
        lines: L,
        delay: D,
        config: PanelConfig,
    ) -> Result<Self, DeviceError<T, L>> {
        config.validate()?;
        let fb = FrameBuffer::try_new()?;

        let mut ctl = Controller::new(transport, lines, delay);
        ctl.init(&config.timing)?;

        info!(
            "lpm027m128c attached: {}x{}, {} bytes",
            WIDTH,
            HEIGHT,
            fb.len_bytes()
        );

        Ok(Self {
            hw: Mutex::new(ctl),
            fb,
            config,
        })
    }

    /// Redraw the whole panel from the frame buffer
    ///
    /// Blocks while another refresh holds the lock.
    pub fn refresh(&self) -> Result<RefreshReport, DeviceError<T, L>> {
        refresh_frame(&mut *self.lock_hw(), &self.fb, &self.config)
    }

    /// Current power state
    pub fn power_state(&self) -> PowerState {
        self.lock_hw().state()
    }

    /// The pixel memory
    pub fn frame_buffer(&self) -> &FrameBuffer {
        &self.fb
    }

    /// Configuration the device was attached with
    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    /// Borrow `len` bytes of pixel memory at `offset` for direct mapping
    ///
    /// Writes through the view are not redrawn until [`refresh`](Self::refresh).
    pub fn map(&self, offset: usize, len: usize) -> Result<&[AtomicU32], DeviceError<T, L>> {
        Ok(self.fb.map(offset, len)?)
    }

    /// Apply a blank level in the graphics layer's numbering (0..=4)
    pub fn blank_level(&self, level: i32) -> Result<(), DeviceError<T, L>> {
        let mode = BlankMode::try_from(level)?;
        self.blank(mode)
    }

    /// Power the panel down and hand the hardware back
    ///
    /// Display-enable is driven low and the device enters `Off`. A failure
    /// to drive the line is logged; the hardware is returned either way.
    pub fn detach(self) -> (T, L, D) {
        let mut ctl = self.hw.into_inner();
        if ctl.shutdown().is_err() {
            warn!("display-enable not released on detach");
        }
        info!("lpm027m128c detached");
        ctl.release()
    }

    fn lock_hw(&self) -> MutexGuard<'_, M, Controller<T, L, D>> {
        loop {
            if let Ok(guard) = self.hw.try_lock() {
                return guard;
            }
            core::hint::spin_loop();
        }
    }

    fn redraw(&self) -> Result<(), DeviceError<T, L>> {
        self.refresh().map(drop)
    }
}

impl<M, T, L, D> FramebufferOps for Lpm027<M, T, L, D>
where
    M: RawMutex,
    T: SerialTransport,
    L: ControlLines,
    D: DelayNs,
{
    type Error = DeviceError<T, L>;

    fn fix(&self) -> FixScreenInfo {
        FixScreenInfo::default()
    }

    fn var(&self) -> VarScreenInfo {
        VarScreenInfo::native()
    }

    fn check_var(&self, var: &mut VarScreenInfo) -> Result<(), Self::Error> {
        check_var(var);
        Ok(())
    }

    fn set_par(&self, var: &VarScreenInfo) -> Result<FixScreenInfo, Self::Error> {
        let mut applied = *var;
        check_var(&mut applied);
        let fix = FixScreenInfo::for_var(&applied);

        self.redraw()?;
        Ok(fix)
    }

    fn write(&self, offset: usize, data: &[u8]) -> Result<usize, Self::Error> {
        let count = self.fb.write_bytes(offset, data)?;
        if count > 0 {
            self.redraw()?;
        }
        Ok(count)
    }

    fn read(&self, offset: usize, buf: &mut [u8]) -> Result<usize, Self::Error> {
        Ok(self.fb.read_bytes(offset, buf)?)
    }

    fn fill_rect(&self, rect: &FillRect) -> Result<(), Self::Error> {
        ops::fill_rect(&self.fb, rect);
        self.redraw()
    }

    fn copy_area(&self, area: &CopyArea) -> Result<(), Self::Error> {
        ops::copy_area(&self.fb, area);
        self.redraw()
    }

    fn image_blit(&self, image: &Image<'_>) -> Result<(), Self::Error> {
        ops::image_blit(&self.fb, image)?;
        self.redraw()
    }

    fn blank(&self, mode: BlankMode) -> Result<(), Self::Error> {
        debug!("blank {}", mode);
        let mut ctl = self.lock_hw();
        if mode.is_blanking() {
            ctl.blank()
        } else {
            ctl.unblank()
        }
    }
}
