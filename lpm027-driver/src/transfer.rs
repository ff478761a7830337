//! Scan line transfer
//!
//! One line on the wire is chip-select high, the 7-byte header, the packed
//! payload with its dummy bytes, chip-select low.

use lpm027_hal::{ControlLine, ControlLines, SerialTransport};
use lpm027_protocol::{encode_row, line_header, HEIGHT, LINE_PAYLOAD_LEN, WIDTH};

use crate::error::Error;

/// Transmit `parts` back to back inside one chip-select assertion
///
/// Chip-select is released even when a transmit fails. A transmit error
/// takes precedence over a failure to release chip-select.
pub fn framed<T, L>(
    transport: &mut T,
    lines: &mut L,
    parts: &[&[u8]],
) -> Result<(), Error<T::Error, L::Error>>
where
    T: SerialTransport,
    L: ControlLines,
{
    lines
        .set_high(ControlLine::ChipSelect)
        .map_err(Error::ControlLine)?;

    let sent = parts.iter().try_for_each(|part| transport.transmit(part));
    let released = lines.set_low(ControlLine::ChipSelect);

    sent.map_err(Error::Transport)?;
    released.map_err(Error::ControlLine)
}

/// Encode `row` and send it as scan line `line`
///
/// A line outside the panel is rejected before anything touches the bus.
pub fn send_line<T, L>(
    transport: &mut T,
    lines: &mut L,
    line: usize,
    row: &[u32; WIDTH],
) -> Result<(), Error<T::Error, L::Error>>
where
    T: SerialTransport,
    L: ControlLines,
{
    if line >= HEIGHT {
        return Err(Error::InvalidArgument);
    }
    let header = line_header(line).map_err(|_| Error::InvalidArgument)?;

    let mut payload = [0u8; LINE_PAYLOAD_LEN];
    encode_row(row, &mut payload).map_err(|_| Error::InvalidArgument)?;

    framed(transport, lines, &[&header, &payload])
}
