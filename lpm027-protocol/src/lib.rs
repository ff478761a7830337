//! LPM027M128C Serial Line Protocol
//!
//! The panel is updated one scan line at a time. Each line transfer is
//! framed by chip-select and looks like this on the wire:
//! ```text
//! ┌──────┬───────────────┬──────────┬──────────┬──────────────────┬───────┐
//! │ MODE │ RESERVED      │ ADDR HI  │ ADDR LO  │ PIXELS (3 bit/px)│ DUMMY │
//! │ 1B   │ 4B            │ 1B (2b)  │ 1B       │ 150B             │ 2B    │
//! └──────┴───────────────┴──────────┴──────────┴──────────────────┴───────┘
//! ```
//!
//! Pixels are packed R, G, B, MSB-first with no gaps between pixels, so a
//! pixel's bits may straddle a byte boundary.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod frame;
pub mod pixel;

pub use frame::{line_header, FrameError, LineHeader, ALL_CLEAR, HEADER_LEN, LINE_FRAME_LEN};
pub use pixel::{decode_row, encode_row, packed_len, payload_len, EncodeError, Rgb1};

/// Panel width in pixels
pub const WIDTH: usize = 400;

/// Panel height in pixels (number of scan lines)
pub const HEIGHT: usize = 240;

/// Bytes per pixel in the host-side frame buffer (xRGB8888)
pub const BYTES_PER_PIXEL: usize = 4;

/// Bits per pixel in the host-side frame buffer
pub const BITS_PER_PIXEL: u32 = (BYTES_PER_PIXEL * 8) as u32;

/// Frame buffer stride in bytes
pub const STRIDE: usize = WIDTH * BYTES_PER_PIXEL;

/// Total frame buffer size in bytes
pub const FRAME_BYTES: usize = STRIDE * HEIGHT;

/// Packed pixel bytes in one scan line
pub const LINE_DATA_LEN: usize = packed_len(WIDTH);

/// Dummy bytes clocked out after the pixel data
pub const DUMMY_LEN: usize = 2;

/// Pixel data plus dummy trailer for one scan line
pub const LINE_PAYLOAD_LEN: usize = LINE_DATA_LEN + DUMMY_LEN;
