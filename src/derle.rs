use crate::error::check_capacity;
use crate::pack::shape_len;
use crate::{Error, Result, INITIAL_RUN_VALUE};
use std::io::{self, Read};

/// Expands run counts back into one byte (0 or 1) per bit.
pub struct RunDecoder<W> {
    value: u8,
    produced: usize,
    len: usize,
    writer: W,
}

impl<W: io::Write> RunDecoder<W> {
    /// `len` is the exact number of bits the runs must describe.
    pub fn new(writer: W, len: usize) -> RunDecoder<W> {
        RunDecoder {
            value: INITIAL_RUN_VALUE,
            produced: 0,
            len,
            writer,
        }
    }

    #[inline(always)]
    pub fn update(&mut self, count: u8) -> Result<()> {
        trace!("value: {}, produced: {}", self.value, self.produced);
        if count == 0 {
            // placeholder, only flips the implied value
            trace!("decode: flip");
            self.value ^= 1;
            return Ok(());
        }
        let produced = self.produced + count as usize;
        if produced > self.len {
            return Err(Error::LengthMismatch {
                expected: self.len,
                actual: produced,
            });
        }
        trace!("decode: {count} x {}", self.value);
        io::copy(
            &mut io::repeat(self.value).take(count as u64),
            &mut self.writer,
        )?;
        self.produced = produced;
        self.value ^= 1;
        Ok(())
    }

    /// Returns the number of bits written, which must match `len`.
    pub fn finalize(mut self) -> Result<usize> {
        if self.produced != self.len {
            return Err(Error::LengthMismatch {
                expected: self.len,
                actual: self.produced,
            });
        }
        self.writer.flush()?;
        Ok(self.produced)
    }
}

impl<W: io::Write> io::Write for RunDecoder<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        for count in buf.iter() {
            self.update(*count)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Decodes `runs` into exactly `rows * cols` bits.
pub fn decode_runs(runs: &[u8], rows: usize, cols: usize, capacity: usize) -> Result<Vec<u8>> {
    let len = shape_len(rows, cols)?;
    check_capacity("decoded raster", len, capacity)?;
    let mut out = Vec::with_capacity(len);
    let mut decoder = RunDecoder::new(&mut out, len);
    for count in runs.iter() {
        decoder.update(*count)?;
    }
    decoder.finalize()?;
    debug!("decoded {} runs into {len} bits", runs.len());
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::setup;
    use crate::{encode_runs, pack_bits, DEFAULT_CAPACITY};
    use std::io::Write;

    const TEST_VECTOR: [(&str, &str); 5] = [
        ("111000111000", "03030303"),
        ("0011", "000202"),
        ("0", "0001"),
        ("10101", "0101010101"),
        ("00000000111", "000803"),
    ];

    #[test]
    fn test_derle_decode() {
        setup();
        for (expected, input) in TEST_VECTOR.into_iter() {
            let input = hex::decode(input).unwrap();
            let expected: Vec<u8> = expected.bytes().map(|c| c - b'0').collect();
            let mut out = vec![];
            let mut decoder = RunDecoder::new(&mut out, expected.len());
            decoder.write_all(&input).unwrap();
            assert_eq!(decoder.finalize().unwrap(), expected.len());
            assert_eq!(expected, out);
        }
    }

    #[test]
    fn test_derle_placeholder() {
        setup();
        let ones = decode_runs(&[255, 0, 45], 1, 300, DEFAULT_CAPACITY).unwrap();
        assert_eq!(ones, vec![1; 300]);
        let zeros = decode_runs(&[0, 255, 0, 45], 15, 20, DEFAULT_CAPACITY).unwrap();
        assert_eq!(zeros, vec![0; 300]);

        let mut expected = vec![1; 300];
        expected.extend([0; 2]);
        let decoded = decode_runs(&[255, 0, 45, 2], 2, 151, DEFAULT_CAPACITY).unwrap();
        assert_eq!(decoded, expected);
    }

    #[test]
    fn test_derle_length_mismatch() {
        setup();
        assert!(matches!(
            decode_runs(&[3, 3], 2, 2, DEFAULT_CAPACITY),
            Err(Error::LengthMismatch {
                expected: 4,
                actual: 6
            })
        ));
        assert!(matches!(
            decode_runs(&[3], 2, 2, DEFAULT_CAPACITY),
            Err(Error::LengthMismatch {
                expected: 4,
                actual: 3
            })
        ));
        assert!(matches!(
            decode_runs(&[], 0, 2, DEFAULT_CAPACITY),
            Err(Error::InvalidShape { rows: 0, cols: 2 })
        ));
    }

    #[test]
    fn test_derle_capacity() {
        setup();
        // a huge shape is refused before anything is allocated
        assert!(matches!(
            decode_runs(&[], 1 << 20, 1 << 20, DEFAULT_CAPACITY),
            Err(Error::CapacityExceeded {
                what: "decoded raster",
                len: 1_099_511_627_776,
                capacity: DEFAULT_CAPACITY
            })
        ));
        assert!(matches!(
            decode_runs(&[255, 0, 45], 1, 300, 299),
            Err(Error::CapacityExceeded { len: 300, .. })
        ));
    }

    #[test]
    fn test_derle_inverts_encoder() {
        setup();
        let patterns: [fn(usize) -> u8; 4] = [
            |i| (i % 2) as u8,
            |i| (i / 300 % 2) as u8,
            |i| (i > 17 && i < 900) as u8,
            |i| ((i * 7 + 3) % 11 < 5) as u8,
        ];
        for (rows, cols) in [(1, 1), (3, 7), (40, 25), (40, 100)] {
            for pattern in patterns.iter() {
                let bits: Vec<u8> = (0..rows * cols).map(pattern).collect();
                let packed = pack_bits(&bits, DEFAULT_CAPACITY).unwrap();
                let runs = encode_runs(&packed, bits.len(), DEFAULT_CAPACITY).unwrap();
                assert_eq!(decode_runs(&runs, rows, cols, DEFAULT_CAPACITY).unwrap(), bits);
            }
        }
    }
}
