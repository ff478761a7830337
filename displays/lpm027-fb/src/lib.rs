//! Frame buffer and surface operations for the LPM027M128C
//!
//! This crate provides:
//! - `FrameBuffer`: the owned 400x240 xRGB8888 pixel memory
//! - Generic buffer mutations (raw write, fill, copy, image blit)
//! - Screen-info negotiation (`check_var`, fixed/variable info)
//! - `FramebufferOps`: the hook surface a device exposes to its graphics layer
//!
//! # Architecture
//!
//! The buffer is shared between any number of producers and the single
//! refresh consumer without a lock. Pixels are stored as atomic words, so
//! a concurrent refresh may see a half-written frame but never an invalid
//! pixel. Devices implement [`FramebufferOps`] by running the generic
//! mutation from [`ops`] and then requesting a full-frame refresh.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

extern crate alloc;

pub mod backend;
pub mod buffer;
pub mod ops;
pub mod screeninfo;

// Re-export key types
pub use backend::{BlankMode, FramebufferOps, SurfaceError};
pub use buffer::FrameBuffer;
pub use ops::{CopyArea, FillRect, Image, Rop};
pub use screeninfo::{check_var, Bitfield, FixScreenInfo, VarScreenInfo, Visual, FB_ID};
