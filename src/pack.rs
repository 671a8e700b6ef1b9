use crate::error::check_capacity;
use crate::{clear_bit, get_bit, set_bit, Error, Result, BYTE_BITS};
use std::io;

/// Packs a stream of 0/1 values into bytes, LSB-first.
pub struct Packer<W> {
    buf: u8,
    bit_len: u8,
    position: usize,
    written: usize,
    writer: W,
}

impl<W: io::Write> Packer<W> {
    pub fn new(writer: W) -> Packer<W> {
        Packer {
            buf: 0,
            bit_len: 0,
            position: 0,
            written: 0,
            writer,
        }
    }

    #[inline(always)]
    pub fn update(&mut self, bit: u8) -> Result<()> {
        self.buf = match bit {
            0 => clear_bit(self.buf, self.bit_len)?,
            1 => set_bit(self.buf, self.bit_len)?,
            value => {
                return Err(Error::InvalidBitValue {
                    position: self.position,
                    value,
                })
            }
        };
        self.position += 1;
        self.bit_len += 1;
        if self.bit_len as usize == BYTE_BITS {
            trace!("pack: 0x{:02X}", self.buf);
            self.writer.write_all(&[self.buf])?;
            self.written += 1;
            // the next byte starts from zero so padding never carries stale bits
            self.buf = 0;
            self.bit_len = 0;
        }
        Ok(())
    }

    /// Writes the partial tail byte, returns how many bytes were produced.
    pub fn finalize(mut self) -> Result<usize> {
        if self.bit_len != 0 {
            trace!("pack tail: {:08b}, bit_len: {}", self.buf, self.bit_len);
            self.writer.write_all(&[self.buf])?;
            self.written += 1;
        }
        self.writer.flush()?;
        Ok(self.written)
    }
}

impl<W: io::Write> io::Write for Packer<W> {
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

/// Packs `bits` into `ceil(bits.len() / 8)` bytes.
pub fn pack_bits(bits: &[u8], capacity: usize) -> Result<Vec<u8>> {
    let packed_len = bits.len().div_ceil(BYTE_BITS);
    check_capacity("raw raster", bits.len(), capacity)?;
    check_capacity("packed buffer", packed_len, capacity)?;

    let mut out = Vec::with_capacity(packed_len);
    let mut packer = Packer::new(&mut out);
    for bit in bits.iter() {
        packer.update(*bit)?;
    }
    let written = packer.finalize()?;
    debug_assert_eq!(written, packed_len);
    debug!("packed {} bits into {written} bytes", bits.len());
    Ok(out)
}

/// Expands a packed buffer back into exactly `rows * cols` bits.
pub fn unpack_bits(packed: &[u8], rows: usize, cols: usize, capacity: usize) -> Result<Vec<u8>> {
    let len = shape_len(rows, cols)?;
    check_capacity("unpacked raster", len, capacity)?;
    Ok(PackedBits::new(packed, len)?.collect())
}

pub(crate) fn shape_len(rows: usize, cols: usize) -> Result<usize> {
    if rows == 0 || cols == 0 {
        return Err(Error::InvalidShape { rows, cols });
    }
    rows.checked_mul(cols)
        .ok_or(Error::InvalidShape { rows, cols })
}

/// Iterates over the first `len` bits of a packed buffer.
///
/// Bits past `len` are padding and are never yielded.
#[derive(Clone, Debug)]
pub struct PackedBits<'a> {
    bytes: &'a [u8],
    position: usize,
    len: usize,
}

impl<'a> PackedBits<'a> {
    pub fn new(bytes: &'a [u8], len: usize) -> Result<Self> {
        let available = bytes.len() * BYTE_BITS;
        if len > available {
            return Err(Error::LengthMismatch {
                expected: len,
                actual: available,
            });
        }
        Ok(PackedBits {
            bytes,
            position: 0,
            len,
        })
    }
}

impl Iterator for PackedBits<'_> {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        if self.position >= self.len {
            return None;
        }
        let byte = self.bytes[self.position / BYTE_BITS];
        let bit = get_bit(byte, (self.position % BYTE_BITS) as u8).ok()?;
        self.position += 1;
        Some(bit)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let rem = self.len - self.position;
        (rem, Some(rem))
    }
}

impl ExactSizeIterator for PackedBits<'_> {}
