use crate::{
    decode_runs, encode_runs, pack_bits, unpack_bits, Config, Error, PhotoSource, Raster, Result,
};
use std::io;

/// Output of one compression cycle. Every buffer is owned by this cycle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Compressed {
    pub packed: Vec<u8>,
    pub runs: Vec<u8>,
    pub rows: usize,
    pub cols: usize,
}

impl Compressed {
    pub fn unpack(&self, capacity: usize) -> Result<Vec<u8>> {
        unpack_bits(&self.packed, self.rows, self.cols, capacity)
    }

    pub fn decode(&self, capacity: usize) -> Result<Vec<u8>> {
        decode_runs(&self.runs, self.rows, self.cols, capacity)
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Summary {
    /// cycles that were compressed and reported
    pub cycles: usize,
    /// photos or cycles dropped because of an error
    pub rejected: usize,
}

pub struct Pipeline {
    config: Config,
}

impl Pipeline {
    pub fn new(config: Config) -> Self {
        Pipeline { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Packs the raster, then run-length encodes the packed bytes.
    pub fn compress(&self, raster: &Raster) -> Result<Compressed> {
        let capacity = self.config.capacity;
        let packed = pack_bits(raster.bits(), capacity)?;
        debug!("packed: {}", hex::encode(&packed));
        let runs = encode_runs(&packed, raster.len(), capacity)?;
        debug!("runs: {}", hex::encode(&runs));
        Ok(Compressed {
            packed,
            runs,
            rows: raster.rows(),
            cols: raster.cols(),
        })
    }

    /// Compresses one raster and writes the three renderings and their sizes.
    ///
    /// Nothing is written when compression or verification fails.
    pub fn run_cycle<W: io::Write>(&self, raster: &Raster, mut out: W) -> Result<Compressed> {
        let compressed = self.compress(raster)?;
        let unpacked = compressed.unpack(self.config.capacity)?;
        let decoded = compressed.decode(self.config.capacity)?;
        if self.config.verify {
            if unpacked != raster.bits() {
                return Err(Error::RoundTrip("unpacking"));
            }
            if decoded != raster.bits() {
                return Err(Error::RoundTrip("run decoding"));
            }
        }

        let renderer = &self.config.renderer;
        let cols = raster.cols();
        writeln!(out, "Raw photo ({} bytes):", raster.len())?;
        renderer.write_to(raster.bits(), cols, &mut out)?;
        writeln!(out, "\nPacked photo ({} bytes):", compressed.packed.len())?;
        renderer.write_to(&unpacked, cols, &mut out)?;
        writeln!(out, "\nEncoded photo ({} bytes):", compressed.runs.len())?;
        renderer.write_to(&decoded, cols, &mut out)?;
        writeln!(
            out,
            "Sizes: raw = {} bytes, packed = {} bytes, encoded = {} bytes",
            raster.len(),
            compressed.packed.len(),
            compressed.runs.len()
        )?;

        info!(
            "{}x{} photo: raw {} -> packed {} -> encoded {}",
            raster.rows(),
            cols,
            raster.len(),
            compressed.packed.len(),
            compressed.runs.len()
        );
        Ok(compressed)
    }

    /// Takes photos until the source runs dry.
    ///
    /// A bad photo or a failed cycle is skipped, only a failing `out` stops
    /// the loop.
    pub fn run<S: PhotoSource, W: io::Write>(&self, source: &mut S, mut out: W) -> Result<Summary> {
        let mut summary = Summary::default();
        loop {
            let raster = match source.take_photo() {
                Ok(Some(raster)) => raster,
                Ok(None) => break,
                Err(e) => {
                    warn!("photo rejected: {e}");
                    summary.rejected += 1;
                    continue;
                }
            };
            match self.run_cycle(&raster, &mut out) {
                Ok(_) => summary.cycles += 1,
                Err(Error::Io(e)) => return Err(Error::Io(e)),
                Err(e) => {
                    warn!("cycle rejected: {e}");
                    summary.rejected += 1;
                }
            }
        }
        debug!("{summary:?}");
        Ok(summary)
    }
}
