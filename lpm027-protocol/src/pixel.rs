//! Pixel encoding for the panel's 3-bit data mode
//!
//! Each pixel becomes three serial bits (R, G, B). Bits are numbered from
//! the MSB of byte 0, so pixel `i` channel `k` lands at serial bit
//! `3i + k`: byte `(3i + k) / 8`, mask `0x80 >> ((3i + k) % 8)`.
//!
//! Every bit is placed on its own; a pixel starting at bit 6 or 7 of a
//! byte spills into the next byte.

/// One pixel reduced to the panel's 1-bit-per-channel colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rgb1 {
    pub r: bool,
    pub g: bool,
    pub b: bool,
}

impl Rgb1 {
    pub const BLACK: Rgb1 = Rgb1::new(false, false, false);
    pub const WHITE: Rgb1 = Rgb1::new(true, true, true);
    pub const RED: Rgb1 = Rgb1::new(true, false, false);
    pub const GREEN: Rgb1 = Rgb1::new(false, true, false);
    pub const BLUE: Rgb1 = Rgb1::new(false, false, true);

    pub const fn new(r: bool, g: bool, b: bool) -> Self {
        Self { r, g, b }
    }

    /// Reduce an xRGB8888 pixel (red at bit 16, green at 8, blue at 0)
    ///
    /// Only the least significant bit of each channel is kept.
    pub const fn from_xrgb8888(pixel: u32) -> Self {
        Self {
            r: (pixel >> 16) & 1 != 0,
            g: (pixel >> 8) & 1 != 0,
            b: pixel & 1 != 0,
        }
    }

    /// Expand to xRGB8888 with each set channel at full intensity
    pub const fn to_xrgb8888(self) -> u32 {
        let mut pixel = 0;
        if self.r {
            pixel |= 0x00FF_0000;
        }
        if self.g {
            pixel |= 0x0000_FF00;
        }
        if self.b {
            pixel |= 0x0000_00FF;
        }
        pixel
    }

    /// Channels in wire order
    const fn bits(self) -> [bool; 3] {
        [self.r, self.g, self.b]
    }
}

/// Errors from the line encoder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EncodeError {
    /// Output buffer shorter than [`payload_len`] for the row
    BufferTooSmall,
}

/// Packed pixel bytes for a row of `width` pixels: `ceil(width * 3 / 8)`
pub const fn packed_len(width: usize) -> usize {
    (width * 3 + 7) / 8
}

/// Packed pixel bytes plus the two dummy trailer bytes
pub const fn payload_len(width: usize) -> usize {
    packed_len(width) + crate::DUMMY_LEN
}

/// Encode one row of xRGB8888 pixels into the panel's line payload
///
/// Writes `payload_len(row.len())` bytes to the front of `out`: the packed
/// pixels followed by two zero bytes. Returns the number of bytes written.
pub fn encode_row(row: &[u32], out: &mut [u8]) -> Result<usize, EncodeError> {
    let len = payload_len(row.len());
    let out = out.get_mut(..len).ok_or(EncodeError::BufferTooSmall)?;
    out.fill(0);

    for (i, &pixel) in row.iter().enumerate() {
        for (k, set) in Rgb1::from_xrgb8888(pixel).bits().into_iter().enumerate() {
            if set {
                let bit = 3 * i + k;
                out[bit / 8] |= 0x80 >> (bit % 8);
            }
        }
    }

    Ok(len)
}

/// Decode `width` pixels from a packed line payload
///
/// Uses the same bit placement as [`encode_row`]. Bits past the end of
/// `payload` read as zero.
pub fn decode_row(payload: &[u8], width: usize) -> impl Iterator<Item = Rgb1> + '_ {
    let bit_at = move |bit: usize| {
        payload
            .get(bit / 8)
            .is_some_and(|byte| byte & (0x80 >> (bit % 8)) != 0)
    };

    (0..width).map(move |i| Rgb1::new(bit_at(3 * i), bit_at(3 * i + 1), bit_at(3 * i + 2)))
}
