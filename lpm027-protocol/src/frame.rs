//! Command framing for scan-line transfers
//!
//! Line transfer layout (one chip-select assertion):
//! - MODE (1 byte): 0x01, data update in 3-bit mode, COM low
//! - RESERVED (4 bytes): zero in this mode
//! - ADDRESS (2 bytes): 10-bit line address, big-endian
//! - PAYLOAD: packed pixels followed by two dummy bytes

use crate::{HEIGHT, LINE_PAYLOAD_LEN};

/// Mode byte values
pub mod mode {
    /// M0: data update (single line, 3-bit data)
    pub const UPDATE_3BIT: u8 = 0x01;
    /// M2: clear all pixel memory
    pub const ALL_CLEAR: u8 = 0x08;
}

/// Single-byte all-clear command sent during initialization
pub const ALL_CLEAR: [u8; 1] = [mode::ALL_CLEAR];

/// Length of the line command header
pub const HEADER_LEN: usize = 7;

/// Bytes framed by one chip-select assertion for a line update
pub const LINE_FRAME_LEN: usize = HEADER_LEN + LINE_PAYLOAD_LEN;

/// Largest address the 10-bit address field can carry
pub const MAX_ADDRESS: u16 = 0x03FF;

/// Framing errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Line index not on the panel
    LineOutOfRange,
}

/// Header of a single-line update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LineHeader {
    /// Zero-based scan line
    pub line: u16,
}

impl LineHeader {
    /// Header for `line`, rejecting lines past the bottom of the panel
    pub fn new(line: usize) -> Result<Self, FrameError> {
        if line >= HEIGHT {
            return Err(FrameError::LineOutOfRange);
        }
        Ok(Self { line: line as u16 })
    }

    /// Encode to the 7-byte wire form
    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut header = [0u8; HEADER_LEN];
        header[0] = mode::UPDATE_3BIT;
        header[5] = ((self.line >> 8) & 0x03) as u8;
        header[6] = (self.line & 0xFF) as u8;
        header
    }
}

/// Wire header for `line`
pub fn line_header(line: usize) -> Result<[u8; HEADER_LEN], FrameError> {
    LineHeader::new(line).map(|h| h.to_bytes())
}
