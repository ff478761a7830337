//! Frame buffer memory
//!
//! Row-major xRGB8888, stride = width x 4 bytes. The byte view used by
//! raw reads and writes is little-endian: byte 0 of a pixel is blue,
//! byte 3 is transparency.

use alloc::boxed::Box;
use alloc::vec::Vec;

use lpm027_protocol::{BYTES_PER_PIXEL, FRAME_BYTES, HEIGHT, WIDTH};
use portable_atomic::{AtomicU32, Ordering};

use crate::backend::SurfaceError;

/// Number of pixels in the frame
pub const PIXELS: usize = WIDTH * HEIGHT;

/// Owned pixel memory for one panel
///
/// Producers write without locking; readers may observe a mix of old and
/// new pixels while a write is in progress.
pub struct FrameBuffer {
    words: Box<[AtomicU32]>,
}

impl FrameBuffer {
    /// Allocate a zeroed (black) frame
    ///
    /// Fails with [`SurfaceError::AllocFailed`] instead of aborting when the
    /// heap cannot hold the frame.
    pub fn try_new() -> Result<Self, SurfaceError> {
        let mut words = Vec::new();
        words
            .try_reserve_exact(PIXELS)
            .map_err(|_| SurfaceError::AllocFailed)?;
        words.resize_with(PIXELS, || AtomicU32::new(0));

        Ok(Self {
            words: words.into_boxed_slice(),
        })
    }

    /// Size of the buffer in bytes
    pub const fn len_bytes(&self) -> usize {
        FRAME_BYTES
    }

    /// Pixel at (`x`, `y`), or `None` off-screen
    pub fn pixel(&self, x: usize, y: usize) -> Option<u32> {
        if x >= WIDTH || y >= HEIGHT {
            return None;
        }
        Some(self.words[y * WIDTH + x].load(Ordering::Relaxed))
    }

    /// Set the pixel at (`x`, `y`); off-screen coordinates are ignored
    pub fn set_pixel(&self, x: usize, y: usize, value: u32) {
        if x < WIDTH && y < HEIGHT {
            self.words[y * WIDTH + x].store(value, Ordering::Relaxed);
        }
    }

    /// XOR the pixel at (`x`, `y`); off-screen coordinates are ignored
    pub fn xor_pixel(&self, x: usize, y: usize, value: u32) {
        if x < WIDTH && y < HEIGHT {
            self.words[y * WIDTH + x].fetch_xor(value, Ordering::Relaxed);
        }
    }

    /// Pixel words of scan line `y`
    ///
    /// # Panics
    /// Panics if `y >= HEIGHT`.
    pub fn row(&self, y: usize) -> &[AtomicU32] {
        &self.words[y * WIDTH..(y + 1) * WIDTH]
    }

    /// Copy scan line `y` into `out`
    ///
    /// Each pixel is read once; the copy is not a snapshot of the row.
    pub fn load_row(&self, y: usize, out: &mut [u32; WIDTH]) {
        for (dst, src) in out.iter_mut().zip(self.row(y)) {
            *dst = src.load(Ordering::Relaxed);
        }
    }

    /// Store `pixels` into scan line `y` starting at column `x`
    pub(crate) fn store_row(&self, y: usize, x: usize, pixels: &[u32]) {
        for (dst, &src) in self.row(y)[x..].iter().zip(pixels) {
            dst.store(src, Ordering::Relaxed);
        }
    }

    /// Set every pixel to `value`
    pub fn clear(&self, value: u32) {
        for word in self.words.iter() {
            word.store(value, Ordering::Relaxed);
        }
    }

    /// Copy `data` into the buffer at byte `offset`
    ///
    /// An offset past the end is rejected; a range running past the end is
    /// truncated. Returns the number of bytes copied.
    pub fn write_bytes(&self, offset: usize, data: &[u8]) -> Result<usize, SurfaceError> {
        if offset > FRAME_BYTES {
            return Err(SurfaceError::OutOfBounds);
        }
        let count = data.len().min(FRAME_BYTES - offset);

        for (i, &byte) in data[..count].iter().enumerate() {
            let at = offset + i;
            let shift = (at % BYTES_PER_PIXEL) * 8;
            let mask = !(0xFFu32 << shift);
            let value = (byte as u32) << shift;
            // Closure always returns Some, so this cannot fail
            let _ = self.words[at / BYTES_PER_PIXEL].fetch_update(
                Ordering::Relaxed,
                Ordering::Relaxed,
                |word| Some((word & mask) | value),
            );
        }

        Ok(count)
    }

    /// Copy buffer bytes starting at `offset` into `buf`
    ///
    /// Same bounds rules as [`write_bytes`](Self::write_bytes).
    pub fn read_bytes(&self, offset: usize, buf: &mut [u8]) -> Result<usize, SurfaceError> {
        if offset > FRAME_BYTES {
            return Err(SurfaceError::OutOfBounds);
        }
        let count = buf.len().min(FRAME_BYTES - offset);

        for (i, byte) in buf[..count].iter_mut().enumerate() {
            let at = offset + i;
            let word = self.words[at / BYTES_PER_PIXEL].load(Ordering::Relaxed);
            *byte = (word >> ((at % BYTES_PER_PIXEL) * 8)) as u8;
        }

        Ok(count)
    }

    /// Borrow `len` bytes of pixel memory starting at byte `offset`
    ///
    /// This is the view handed to the graphics layer for direct mapping.
    /// Writers through the view must request a refresh themselves.
    pub fn map(&self, offset: usize, len: usize) -> Result<&[AtomicU32], SurfaceError> {
        if offset >= FRAME_BYTES || len > FRAME_BYTES - offset {
            return Err(SurfaceError::OutOfBounds);
        }
        if offset % BYTES_PER_PIXEL != 0 || len % BYTES_PER_PIXEL != 0 {
            return Err(SurfaceError::Misaligned);
        }

        let start = offset / BYTES_PER_PIXEL;
        Ok(&self.words[start..start + len / BYTES_PER_PIXEL])
    }

    /// The whole frame as pixel words
    pub fn words(&self) -> &[AtomicU32] {
        &self.words
    }
}

impl core::fmt::Debug for FrameBuffer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FrameBuffer")
            .field("width", &WIDTH)
            .field("height", &HEIGHT)
            .finish()
    }
}
