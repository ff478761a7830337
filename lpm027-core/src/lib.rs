//! Board-agnostic core logic for the LPM027M128C panel driver
//!
//! This crate contains the parts of the driver that do not touch hardware:
//!
//! - Display power state machine
//! - Panel configuration (timing, refresh failure policy)

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod state;

pub use config::{ConfigError, FailurePolicy, PanelConfig, Timing};
pub use state::{PowerEvent, PowerState};
