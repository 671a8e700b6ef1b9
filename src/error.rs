use std::io;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("bit at position {position} has value {value}, expected 0 or 1")]
    InvalidBitValue { position: usize, value: u8 },

    #[error("bit index {0} is outside 0..=7")]
    InvalidBitIndex(u8),

    #[error("{what} needs {len} elements but capacity is {capacity}")]
    CapacityExceeded {
        what: &'static str,
        len: usize,
        capacity: usize,
    },

    #[error("shape {rows}x{cols} does not describe the raster")]
    InvalidShape { rows: usize, cols: usize },

    #[error("expected {expected} bits, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("{0} did not reproduce the raw raster")]
    RoundTrip(&'static str),

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Fails with [`Error::CapacityExceeded`] when `len` does not fit.
pub(crate) fn check_capacity(what: &'static str, len: usize, capacity: usize) -> Result<()> {
    if len > capacity {
        return Err(Error::CapacityExceeded {
            what,
            len,
            capacity,
        });
    }
    Ok(())
}
