use crate::error::check_capacity;
use crate::{Error, PackedBits, Result, INITIAL_RUN_VALUE, MAX_RUN};
use std::io;

/// Turns a stream of 0/1 values into alternating run counts.
pub struct RunEncoder<W> {
    status: RunStatus,
    position: usize,
    written: usize,
    capacity: usize,
    writer: W,
}

#[derive(Copy, Clone, Debug)]
struct RunStatus {
    value: u8,
    counter: u8,
}

impl RunStatus {
    const INITIAL: RunStatus = RunStatus {
        value: INITIAL_RUN_VALUE,
        counter: 0,
    };
}

impl<W: io::Write> RunEncoder<W> {
    pub fn new(writer: W) -> Self {
        Self::with_capacity(writer, usize::MAX)
    }

    /// Like [`RunEncoder::new`], failing once more than `capacity` entries
    /// would be written.
    pub fn with_capacity(writer: W, capacity: usize) -> Self {
        RunEncoder {
            status: RunStatus::INITIAL,
            position: 0,
            written: 0,
            capacity,
            writer,
        }
    }

    #[inline(always)]
    pub fn update(&mut self, bit: u8) -> Result<()> {
        if bit > 1 {
            return Err(Error::InvalidBitValue {
                position: self.position,
                value: bit,
            });
        }
        self.position += 1;
        trace!("update bit {bit}, current status {:?}", self.status);
        if bit == self.status.value {
            if self.status.counter == MAX_RUN {
                self.split()?;
            }
            self.status.counter += 1;
        } else {
            self.emit(self.status.counter)?;
            self.status = RunStatus {
                value: bit,
                counter: 1,
            };
            trace!("transit to {:?}", self.status);
        }
        Ok(())
    }

    /// A full run is closed and a zero entry flips the implied value back,
    /// so the decoder keeps painting the same value.
    #[inline(always)]
    fn split(&mut self) -> Result<()> {
        trace!("cut! run of {} reached {MAX_RUN}", self.status.value);
        self.emit(MAX_RUN)?;
        self.emit(0)?;
        self.status.counter = 0;
        Ok(())
    }

    #[inline(always)]
    fn emit(&mut self, count: u8) -> Result<()> {
        check_capacity("run buffer", self.written + 1, self.capacity)?;
        trace!("encode run {count}");
        self.writer.write_all(&[count])?;
        self.written += 1;
        Ok(())
    }

    /// Closes the pending run, returns how many entries were produced.
    pub fn finalize(mut self) -> Result<usize> {
        trace!("last run: {:?}", self.status);
        if self.status.counter != 0 {
            self.emit(self.status.counter)?;
        }
        self.writer.flush()?;
        Ok(self.written)
    }
}

impl<W: io::Write> io::Write for RunEncoder<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        for bit in buf.iter() {
            self.update(*bit)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Most entries `bit_count` bits can produce: a leading 0 entry when the
/// first bit is 0, then one entry per bit. A split spends 2 entries on
/// 255 bits so it never reaches this bound.
pub fn max_runs(bit_count: usize) -> usize {
    bit_count.saturating_add(1)
}

/// Run-length encodes the first `bit_count` bits of a packed buffer.
///
/// `capacity` bounds the raster, the run buffer may hold one more entry.
pub fn encode_runs(packed: &[u8], bit_count: usize, capacity: usize) -> Result<Vec<u8>> {
    check_capacity("raw raster", bit_count, capacity)?;
    let bits = PackedBits::new(packed, bit_count)?;

    let mut out = Vec::with_capacity(max_runs(bit_count));
    let mut encoder = RunEncoder::with_capacity(&mut out, max_runs(capacity));
    for bit in bits {
        encoder.update(bit)?;
    }
    let written = encoder.finalize()?;
    debug!("encoded {bit_count} bits into {written} runs");
    Ok(out)
}
