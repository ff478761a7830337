//! Driver error type

use lpm027_core::ConfigError;
use lpm027_fb::SurfaceError;

/// Errors returned by the driver
///
/// Generic over the transport error `TE` and the control-line error `LE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<TE, LE> {
    /// Line out of range, bad offset, bad blank level or bad image
    InvalidArgument,
    /// Frame buffer allocation failed
    ResourceExhausted,
    /// Bus transmit failed
    Transport(TE),
    /// Setting a control line failed
    ControlLine(LE),
    /// Panel configuration rejected at attach
    Config(ConfigError),
}

impl<TE, LE> From<ConfigError> for Error<TE, LE> {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl<TE, LE> From<SurfaceError> for Error<TE, LE> {
    fn from(e: SurfaceError) -> Self {
        match e {
            SurfaceError::AllocFailed => Error::ResourceExhausted,
            _ => Error::InvalidArgument,
        }
    }
}
