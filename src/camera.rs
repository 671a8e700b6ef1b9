use crate::{Raster, Result};
use image::{GrayImage, Luma};
use std::collections::VecDeque;

/// Where photos come from.
///
/// `Ok(None)` means there are no more photos, a failed photo is reported
/// as `Err` and the caller may ask for the next one.
pub trait PhotoSource {
    fn take_photo(&mut self) -> Result<Option<Raster>>;
}

/// Replays photos written as `'1'`/`'0'` text.
pub struct ScriptedCamera {
    frames: VecDeque<(String, usize, usize)>,
    capacity: usize,
}

impl ScriptedCamera {
    pub fn new(capacity: usize) -> Self {
        ScriptedCamera {
            frames: VecDeque::new(),
            capacity,
        }
    }

    pub fn push(&mut self, text: impl Into<String>, rows: usize, cols: usize) -> &mut Self {
        self.frames.push_back((text.into(), rows, cols));
        self
    }
}

impl PhotoSource for ScriptedCamera {
    fn take_photo(&mut self) -> Result<Option<Raster>> {
        match self.frames.pop_front() {
            Some((text, rows, cols)) => {
                Raster::from_ascii(&text, rows, cols, self.capacity).map(Some)
            }
            None => Ok(None),
        }
    }
}

/// Draws a growing disc over a striped floor and thresholds it.
pub struct SyntheticCamera {
    rows: u32,
    cols: u32,
    frame: u32,
    frames: u32,
    capacity: usize,
}

const THRESHOLD: u8 = 128;

impl SyntheticCamera {
    pub fn new(rows: u32, cols: u32, frames: u32, capacity: usize) -> Self {
        SyntheticCamera {
            rows,
            cols,
            frame: 0,
            frames,
            capacity,
        }
    }

    fn draw(&self) -> GrayImage {
        let (cx, cy) = (self.cols as i64 / 2, self.rows as i64 / 2);
        let span = self.rows.min(self.cols) as i64;
        let radius = (self.frame as i64 + 1) * span / (2 * self.frames.max(1) as i64);
        GrayImage::from_fn(self.cols, self.rows, |x, y| {
            let (dx, dy) = (x as i64 - cx, y as i64 - cy);
            let inside = dx * dx + dy * dy <= radius * radius;
            let stripe = y + 1 == self.rows && x % 4 < 2;
            Luma([if inside || stripe { u8::MAX } else { 0 }])
        })
    }
}

impl PhotoSource for SyntheticCamera {
    fn take_photo(&mut self) -> Result<Option<Raster>> {
        if self.frame >= self.frames {
            return Ok(None);
        }
        let img = self.draw();
        self.frame += 1;
        trace!("synthetic frame {}/{}", self.frame, self.frames);
        Raster::from_luma(&img, THRESHOLD, self.capacity).map(Some)
    }
}
