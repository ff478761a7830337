//! Screen geometry negotiation
//!
//! The panel has exactly one mode. Requests are never rejected; they are
//! clamped to 400x240 xRGB8888.

use lpm027_protocol::{BITS_PER_PIXEL, FRAME_BYTES, HEIGHT, WIDTH};

/// Identifier reported in [`FixScreenInfo::id`]
pub const FB_ID: &str = "lpm027m128c";

/// Position and width of one colour channel inside a pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Bitfield {
    /// Bit offset from the LSB of the pixel
    pub offset: u32,
    /// Channel width in bits
    pub length: u32,
}

impl Bitfield {
    pub const fn new(offset: u32, length: u32) -> Self {
        Self { offset, length }
    }
}

/// Variable (negotiable) screen information
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct VarScreenInfo {
    pub xres: u32,
    pub yres: u32,
    pub xres_virtual: u32,
    pub yres_virtual: u32,
    pub bits_per_pixel: u32,
    pub red: Bitfield,
    pub green: Bitfield,
    pub blue: Bitfield,
    pub transp: Bitfield,
}

impl VarScreenInfo {
    /// The panel's only mode
    pub const fn native() -> Self {
        Self {
            xres: WIDTH as u32,
            yres: HEIGHT as u32,
            xres_virtual: WIDTH as u32,
            yres_virtual: HEIGHT as u32,
            bits_per_pixel: BITS_PER_PIXEL,
            red: Bitfield::new(16, 8),
            green: Bitfield::new(8, 8),
            blue: Bitfield::new(0, 8),
            transp: Bitfield::new(24, 8),
        }
    }

    /// Bytes per scan line for this mode
    pub const fn line_length(&self) -> u32 {
        self.xres * (self.bits_per_pixel / 8)
    }
}

/// Memory layout of the pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Visual {
    /// Direct RGB values, no palette
    TrueColor,
}

/// Fixed screen information
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FixScreenInfo {
    /// Driver identifier
    pub id: &'static str,
    /// Buffer length in bytes
    pub smem_len: u32,
    /// Bytes per scan line
    pub line_length: u32,
    /// Pixel layout
    pub visual: Visual,
    /// Horizontal pan step (0 = no panning)
    pub xpanstep: u16,
    /// Vertical pan step (0 = no panning)
    pub ypanstep: u16,
    /// Vertical wrap step (0 = no wrapping)
    pub ywrapstep: u16,
}

impl FixScreenInfo {
    /// Fixed information for the applied mode `var`
    pub const fn for_var(var: &VarScreenInfo) -> Self {
        Self {
            id: FB_ID,
            smem_len: FRAME_BYTES as u32,
            line_length: var.line_length(),
            visual: Visual::TrueColor,
            xpanstep: 0,
            ypanstep: 0,
            ywrapstep: 0,
        }
    }
}

impl Default for FixScreenInfo {
    fn default() -> Self {
        Self::for_var(&VarScreenInfo::native())
    }
}

/// Clamp `var` to the hardware's capabilities
///
/// Resolution, depth and channel layout are forced to the native mode;
/// the virtual resolution always equals the visible one.
pub fn check_var(var: &mut VarScreenInfo) {
    let native = VarScreenInfo::native();

    var.xres = native.xres;
    var.yres = native.yres;
    var.xres_virtual = var.xres;
    var.yres_virtual = var.yres;
    var.bits_per_pixel = native.bits_per_pixel;
    var.red = native.red;
    var.green = native.green;
    var.blue = native.blue;
    var.transp = native.transp;
}
