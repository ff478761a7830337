//! `embedded-graphics` integration
//!
//! Each draw call updates the frame buffer and ends in one full redraw.
//! Colours are stored as xRGB8888; the panel shows the LSB of each
//! channel, so fully saturated colours map to the eight panel colours.

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_hal::delay::DelayNs;
use embassy_sync::blocking_mutex::raw::RawMutex;
use lpm027_fb::{FillRect, FramebufferOps, Rop};
use lpm027_hal::{ControlLines, SerialTransport};
use lpm027_protocol::{HEIGHT, WIDTH};

use crate::device::{DeviceError, Lpm027};

/// Convert an `embedded-graphics` colour to an xRGB8888 pixel
pub fn to_xrgb8888(color: Rgb888) -> u32 {
    (u32::from(color.r()) << 16) | (u32::from(color.g()) << 8) | u32::from(color.b())
}

impl<M, T, L, D> OriginDimensions for Lpm027<M, T, L, D>
where
    M: RawMutex,
    T: SerialTransport,
    L: ControlLines,
    D: DelayNs,
{
    fn size(&self) -> Size {
        Size::new(WIDTH as u32, HEIGHT as u32)
    }
}

impl<M, T, L, D> DrawTarget for Lpm027<M, T, L, D>
where
    M: RawMutex,
    T: SerialTransport,
    L: ControlLines,
    D: DelayNs,
{
    type Color = Rgb888;
    type Error = DeviceError<T, L>;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let fb = self.frame_buffer();
        for Pixel(point, color) in pixels {
            // Negative coordinates are off-screen
            if let (Ok(x), Ok(y)) = (usize::try_from(point.x), usize::try_from(point.y)) {
                fb.set_pixel(x, y, to_xrgb8888(color));
            }
        }
        self.refresh().map(drop)
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let area = area.intersection(&self.bounding_box());
        if area.is_zero_sized() {
            return Ok(());
        }

        <Self as FramebufferOps>::fill_rect(
            self,
            &FillRect {
                dx: area.top_left.x as u32,
                dy: area.top_left.y as u32,
                width: area.size.width,
                height: area.size.height,
                color: to_xrgb8888(color),
                rop: Rop::Copy,
            },
        )
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.frame_buffer().clear(to_xrgb8888(color));
        self.refresh().map(drop)
    }
}
