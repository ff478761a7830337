//! LPM027M128C framebuffer driver
//!
//! Drives a JDI LPM027M128C 400x240 reflective colour LCD over a
//! transmit-only serial bus and four control lines. The panel keeps its
//! own image in memory-in-pixel cells; the driver keeps a 32-bit frame
//! buffer and rewrites every scan line after each mutation.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │ Lpm027 (device)                              │
//! │   FramebufferOps hooks / DrawTarget          │
//! │        │                                     │
//! │        ▼                                     │
//! │   FrameBuffer ──► refresh ──► transfer       │
//! │   (lock-free)     (locked)    (CS + bytes)   │
//! │                      │                       │
//! │                      ▼                       │
//! │   Controller: transport, lines, delay, state │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! let transport = SpiTransport::new(spi); // configured with BUS_CONFIG
//! let lines = PanelPins::new(scs, extcomin, disp, extmode);
//! let panel: Lpm027<CriticalSectionRawMutex, _, _, _> =
//!     Lpm027::attach(transport, lines, delay, PanelConfig::default())?;
//!
//! Rectangle::new(Point::new(10, 10), Size::new(100, 50))
//!     .into_styled(PrimitiveStyle::with_fill(Rgb888::RED))
//!     .draw(&mut panel)?;
//! ```

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

// Must stay first so the other modules see the logging macros
pub(crate) mod fmt;

pub mod controller;
pub mod device;
pub mod error;
pub mod graphics;
pub mod refresh;
pub mod transfer;

#[cfg(test)]
mod mock;

use lpm027_hal::SpiConfig;

pub use controller::Controller;
pub use device::{DeviceError, Lpm027};
pub use error::Error;
pub use refresh::{RefreshReport, MAX_REPORTED_FAILURES};

/// Device-tree compatible string
pub const COMPATIBLE: &str = "japan-display,lpm027m128c";

/// Device identifier
pub const DEVICE_ID: &str = lpm027_fb::FB_ID;

/// Driver name
pub const DRIVER_NAME: &str = "lpm027m128c_fb";

/// Bus settings the transport must be configured with
pub const BUS_CONFIG: SpiConfig = SpiConfig::PANEL;

/// Check if a device-tree compatible string names this panel
pub fn matches_compatible(compatible: &str) -> bool {
    compatible == COMPATIBLE
}

#[cfg(test)]
mod tests {
    use super::*;
    use lpm027_hal::spi::Mode;

    #[test]
    fn test_identity() {
        assert!(matches_compatible("japan-display,lpm027m128c"));
        assert!(!matches_compatible("sharp,ls027b7dh01"));
        assert_eq!(DEVICE_ID, "lpm027m128c");
        assert_eq!(DRIVER_NAME, "lpm027m128c_fb");
    }

    #[test]
    fn test_bus_config() {
        assert_eq!(BUS_CONFIG.frequency, 1_000_000);
        assert_eq!(BUS_CONFIG.bits_per_word, 8);
        assert_eq!(BUS_CONFIG.mode(), Mode::Mode0);
    }
}
