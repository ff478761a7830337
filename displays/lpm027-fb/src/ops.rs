//! Generic drawing operations on the frame buffer
//!
//! These are the software fallbacks the hooks run before redrawing: fill,
//! area copy and image blit. All of them clip to the screen.

use lpm027_protocol::{HEIGHT, WIDTH};

use crate::backend::SurfaceError;
use crate::buffer::FrameBuffer;

/// Raster operation for [`FillRect`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Rop {
    /// Replace pixels with the fill colour
    #[default]
    Copy,
    /// XOR pixels with the fill colour
    Xor,
}

/// Solid rectangle fill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FillRect {
    pub dx: u32,
    pub dy: u32,
    pub width: u32,
    pub height: u32,
    /// xRGB8888 colour
    pub color: u32,
    pub rop: Rop,
}

/// Screen-to-screen copy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CopyArea {
    pub dx: u32,
    pub dy: u32,
    pub width: u32,
    pub height: u32,
    pub sx: u32,
    pub sy: u32,
}

/// Image to draw at (`dx`, `dy`)
///
/// `depth` 1: MSB-first bitmap, each row padded to a whole byte, set bits
/// drawn in `fg_color` and clear bits in `bg_color`.
/// `depth` 32: little-endian xRGB8888 pixels, colours unused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Image<'a> {
    pub dx: u32,
    pub dy: u32,
    pub width: u32,
    pub height: u32,
    pub fg_color: u32,
    pub bg_color: u32,
    pub depth: u8,
    pub data: &'a [u8],
}

/// On-screen span `[start, end)` of `len` units from `start`, if any
fn clip(start: u32, len: u32, limit: usize) -> Option<(usize, usize)> {
    let start = start as usize;
    if start >= limit || len == 0 {
        return None;
    }
    Some((start, start.saturating_add(len as usize).min(limit)))
}

/// Fill a rectangle
pub fn fill_rect(fb: &FrameBuffer, rect: &FillRect) {
    let Some((x0, x1)) = clip(rect.dx, rect.width, WIDTH) else {
        return;
    };
    let Some((y0, y1)) = clip(rect.dy, rect.height, HEIGHT) else {
        return;
    };

    for y in y0..y1 {
        for x in x0..x1 {
            match rect.rop {
                Rop::Copy => fb.set_pixel(x, y, rect.color),
                Rop::Xor => fb.xor_pixel(x, y, rect.color),
            }
        }
    }
}

/// Copy an area of the screen to another position
///
/// Source and destination may overlap.
pub fn copy_area(fb: &FrameBuffer, area: &CopyArea) {
    let (sx, sy) = (area.sx as usize, area.sy as usize);
    let (dx, dy) = (area.dx as usize, area.dy as usize);

    let width = (area.width as usize)
        .min(WIDTH.saturating_sub(sx))
        .min(WIDTH.saturating_sub(dx));
    let height = (area.height as usize)
        .min(HEIGHT.saturating_sub(sy))
        .min(HEIGHT.saturating_sub(dy));
    if width == 0 || height == 0 {
        return;
    }

    let mut row = [0u32; WIDTH];
    let mut copy_row = |r: usize| {
        fb.load_row(sy + r, &mut row);
        fb.store_row(dy + r, dx, &row[sx..sx + width]);
    };

    // Walk away from the destination so overlapping rows are read first
    if dy > sy {
        (0..height).rev().for_each(&mut copy_row);
    } else {
        (0..height).for_each(&mut copy_row);
    }
}

/// Draw an image
pub fn image_blit(fb: &FrameBuffer, image: &Image<'_>) -> Result<(), SurfaceError> {
    let width = image.width as usize;
    let height = image.height as usize;

    let stride = match image.depth {
        1 => Some(width.div_ceil(8)),
        32 => width.checked_mul(4),
        _ => return Err(SurfaceError::UnsupportedDepth),
    };
    let stride = match stride.and_then(|s| Some((s, s.checked_mul(height)?))) {
        Some((stride, needed)) if image.data.len() >= needed => stride,
        _ => return Err(SurfaceError::ShortImageData),
    };

    let Some((x0, x1)) = clip(image.dx, image.width, WIDTH) else {
        return Ok(());
    };
    let Some((y0, y1)) = clip(image.dy, image.height, HEIGHT) else {
        return Ok(());
    };

    for y in y0..y1 {
        let src = &image.data[(y - y0) * stride..][..stride];
        for x in x0..x1 {
            let c = x - x0;
            let pixel = match image.depth {
                1 => {
                    if src[c / 8] & (0x80 >> (c % 8)) != 0 {
                        image.fg_color
                    } else {
                        image.bg_color
                    }
                }
                _ => u32::from_le_bytes([
                    src[c * 4],
                    src[c * 4 + 1],
                    src[c * 4 + 2],
                    src[c * 4 + 3],
                ]),
            };
            fb.set_pixel(x, y, pixel);
        }
    }

    Ok(())
}
