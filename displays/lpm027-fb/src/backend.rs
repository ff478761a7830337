//! Graphics-layer hook surface
//!
//! Defines the operations a framebuffer device exposes. Every mutating hook
//! must end in a full-frame refresh.

use crate::ops::{CopyArea, FillRect, Image};
use crate::screeninfo::{FixScreenInfo, VarScreenInfo};

/// Surface operation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SurfaceError {
    /// Offset or range lies past the end of the buffer
    OutOfBounds,
    /// Offset or length not a multiple of the pixel size
    Misaligned,
    /// Image depth other than 1 or 32 bits
    UnsupportedDepth,
    /// Image data shorter than width x height at its depth
    ShortImageData,
    /// Blank level outside the known range
    InvalidBlankLevel,
    /// Frame buffer memory could not be allocated
    AllocFailed,
}

/// Blank levels, in the graphics layer's numbering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BlankMode {
    /// Screen on
    Unblank = 0,
    /// Screen blanked, sync running
    Normal = 1,
    /// Vertical sync suspended
    VsyncSuspend = 2,
    /// Horizontal sync suspended
    HsyncSuspend = 3,
    /// Screen powered down
    Powerdown = 4,
}

impl BlankMode {
    /// Check if this level turns the panel off
    ///
    /// The panel has no sync signals, so every level other than
    /// `Unblank` means display-enable low.
    pub fn is_blanking(&self) -> bool {
        !matches!(self, BlankMode::Unblank)
    }
}

impl TryFrom<i32> for BlankMode {
    type Error = SurfaceError;

    fn try_from(level: i32) -> Result<Self, Self::Error> {
        match level {
            0 => Ok(BlankMode::Unblank),
            1 => Ok(BlankMode::Normal),
            2 => Ok(BlankMode::VsyncSuspend),
            3 => Ok(BlankMode::HsyncSuspend),
            4 => Ok(BlankMode::Powerdown),
            _ => Err(SurfaceError::InvalidBlankLevel),
        }
    }
}

/// Framebuffer device hooks
///
/// Implementations perform the generic buffer mutation (see [`crate::ops`])
/// and then redraw the whole panel. All hooks take `&self` so one device
/// can serve several producer threads.
pub trait FramebufferOps {
    /// Error type for hook failures
    type Error;

    /// Fixed screen information
    fn fix(&self) -> FixScreenInfo;

    /// Current variable screen information
    fn var(&self) -> VarScreenInfo;

    /// Clamp a requested mode to what the hardware supports
    fn check_var(&self, var: &mut VarScreenInfo) -> Result<(), Self::Error>;

    /// Apply a mode and redraw
    ///
    /// Returns the fixed information derived from the applied mode.
    fn set_par(&self, var: &VarScreenInfo) -> Result<FixScreenInfo, Self::Error>;

    /// Copy `data` into the buffer at byte `offset` and redraw
    ///
    /// Writes past the end are truncated; returns the number of bytes
    /// accepted. Zero accepted bytes means no redraw.
    fn write(&self, offset: usize, data: &[u8]) -> Result<usize, Self::Error>;

    /// Copy buffer bytes starting at `offset` into `buf`
    fn read(&self, offset: usize, buf: &mut [u8]) -> Result<usize, Self::Error>;

    /// Fill a rectangle and redraw
    fn fill_rect(&self, rect: &FillRect) -> Result<(), Self::Error>;

    /// Copy a screen area and redraw
    fn copy_area(&self, area: &CopyArea) -> Result<(), Self::Error>;

    /// Draw an image and redraw
    fn image_blit(&self, image: &Image<'_>) -> Result<(), Self::Error>;

    /// Blank or unblank the panel
    fn blank(&self, mode: BlankMode) -> Result<(), Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_levels() {
        assert_eq!(BlankMode::try_from(0), Ok(BlankMode::Unblank));
        assert_eq!(BlankMode::try_from(4), Ok(BlankMode::Powerdown));
        assert_eq!(BlankMode::try_from(5), Err(SurfaceError::InvalidBlankLevel));
        assert_eq!(BlankMode::try_from(-1), Err(SurfaceError::InvalidBlankLevel));
    }

    #[test]
    fn test_only_unblank_enables() {
        assert!(!BlankMode::Unblank.is_blanking());
        for mode in [
            BlankMode::Normal,
            BlankMode::VsyncSuspend,
            BlankMode::HsyncSuspend,
            BlankMode::Powerdown,
        ] {
            assert!(mode.is_blanking());
        }
    }
}
