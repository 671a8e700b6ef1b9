use crate::error::check_capacity;
use crate::pack::shape_len;
use crate::{Error, Result};
use image::GrayImage;

/// A black and white picture, one byte (0 or 1) per pixel in row-major order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Raster {
    bits: Vec<u8>,
    rows: usize,
    cols: usize,
}

impl Raster {
    pub fn new(bits: Vec<u8>, rows: usize, cols: usize, capacity: usize) -> Result<Raster> {
        let len = shape_len(rows, cols)?;
        if bits.len() != len {
            return Err(Error::InvalidShape { rows, cols });
        }
        check_capacity("raw raster", len, capacity)?;
        if let Some(position) = bits.iter().position(|b| *b > 1) {
            return Err(Error::InvalidBitValue {
                position,
                value: bits[position],
            });
        }
        Ok(Raster { bits, rows, cols })
    }

    /// Parses a photo written as `'1'` and `'0'` characters.
    pub fn from_ascii(text: &str, rows: usize, cols: usize, capacity: usize) -> Result<Raster> {
        let bits = text
            .bytes()
            .enumerate()
            .map(|(position, c)| match c {
                b'0' => Ok(0),
                b'1' => Ok(1),
                value => Err(Error::InvalidBitValue { position, value }),
            })
            .collect::<Result<Vec<u8>>>()?;
        Raster::new(bits, rows, cols, capacity)
    }

    /// Thresholds a grayscale image, pixels at or above `threshold` are set.
    pub fn from_luma(img: &GrayImage, threshold: u8, capacity: usize) -> Result<Raster> {
        let (width, height) = img.dimensions();
        let (rows, cols) = (height as usize, width as usize);
        check_capacity("raw raster", shape_len(rows, cols)?, capacity)?;
        let bits = img
            .pixels()
            .map(|p| (p.0[0] >= threshold) as u8)
            .collect();
        Raster::new(bits, rows, cols, capacity)
    }

    pub fn bits(&self) -> &[u8] {
        &self.bits
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Always false, a raster has at least one pixel.
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn into_bits(self) -> Vec<u8> {
        self.bits
    }
}
