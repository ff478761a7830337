//! LPM027 Hardware Abstraction Layer
//!
//! This crate defines the two hardware primitives the panel driver needs:
//! "transmit N bytes over the serial bus" and "set a named control line".
//! Both are blocking and fallible. Adapters are provided for
//! `embedded-hal` 1.0 SPI buses and output pins so any chip HAL can be
//! plugged in without extra glue.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  lpm027-driver (refresh, init, blank)   │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  lpm027-hal (this crate - traits)       │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ embedded-hal  │       │  test mocks / │
//! │ SpiBus + pins │       │  other buses  │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::ControlLines`] - The panel's four discrete control lines
//! - [`spi::SerialTransport`] - Blocking transmit-only serial bus

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod spi;

// Re-export key traits at crate root for convenience
pub use gpio::{ControlLine, ControlLines, PanelPins};
pub use spi::{SerialTransport, SpiConfig, SpiTransport};
