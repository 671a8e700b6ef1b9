//! # Packing Scheme
//!
//! ```text
//!         MSB      LSB
//!          │        │
//!          ▼        ▼
//!  byte 0  7654 3210   <- raster bits 0..8
//!  byte 1  .... 1098   <- raster bits 8..12, unused high bits are zero
//! ```
//!
//! Raster bit `i` lives in byte `i / 8` at position `i % 8`.
//! The packed buffer does not carry the raster shape, the unpacker
//! MUST be told `rows * cols` so the padding is never read.
//!
//! # Run Scheme
//!
//! ```text
//!   entry:   255   0    45    3    ...
//!   value:    1    0     1    0    ...
//!             └─ continues ─┘
//! ```
//!
//! Every entry is a one byte count of identical bits, the implied value
//! alternates and starts at [`INITIAL_RUN_VALUE`]. A raster starting with
//! a 0 bit therefore begins with a `0` entry.
//!
//! A run longer than [`MAX_RUN`] is split: `255` is emitted, then a `0`
//! entry flips the implied value back, and counting resumes. The decoder
//! emits nothing for a `0` entry, so `[255, 0, 45]` is a single run of 300.

#[macro_use]
extern crate log;

mod bits;
mod camera;
mod config;
mod derle;
mod error;
mod pack;
mod pipeline;
mod raster;
mod render;
mod rle;

pub use bits::{clear_bit, get_bit, set_bit};
pub use camera::{PhotoSource, ScriptedCamera, SyntheticCamera};
pub use config::Config;
pub use derle::{decode_runs, RunDecoder};
pub use error::{Error, Result};
pub use pack::{pack_bits, unpack_bits, PackedBits, Packer};
pub use pipeline::{Compressed, Pipeline, Summary};
pub use raster::Raster;
pub use render::Renderer;
pub use rle::{encode_runs, max_runs, RunEncoder};

/// bits held by one packed byte
pub const BYTE_BITS: usize = 8;
/// the largest count a single run entry can hold
pub const MAX_RUN: u8 = u8::MAX;
/// implied value of the first run entry, shared by encoder and decoder
pub const INITIAL_RUN_VALUE: u8 = 1;
/// default upper bound for raster, packed and run buffers
pub const DEFAULT_CAPACITY: usize = 5000;
