//! Configuration types
//!
//! Panel timing and refresh behaviour. Everything has a working default;
//! integrators only override what their board needs.

pub mod types;

pub use types::*;
