use crate::{Error, Result};
use std::io;

/// Draws a bit sequence as a grid of two glyphs.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Renderer {
    pub set_glyph: char,
    pub clear_glyph: char,
}

impl Default for Renderer {
    fn default() -> Self {
        Renderer {
            set_glyph: '*',
            clear_glyph: '.',
        }
    }
}

impl Renderer {
    /// Breaks a line every `cols` bits, whatever byte the bits came from.
    pub fn render(&self, bits: &[u8], cols: usize) -> Result<String> {
        if cols == 0 {
            return Err(Error::InvalidShape {
                rows: bits.len(),
                cols,
            });
        }
        let mut out = String::with_capacity(bits.len() + bits.len() / cols + 1);
        for row in bits.chunks(cols) {
            out.extend(row.iter().map(|b| self.glyph(*b)));
            out.push('\n');
        }
        Ok(out)
    }

    pub fn write_to<W: io::Write>(&self, bits: &[u8], cols: usize, mut writer: W) -> Result<()> {
        writer.write_all(self.render(bits, cols)?.as_bytes())?;
        Ok(())
    }

    #[inline(always)]
    fn glyph(&self, bit: u8) -> char {
        if bit == 1 {
            self.set_glyph
        } else {
            self.clear_glyph
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_wraps_rows() {
        let bits = [1, 1, 1, 0, 0, 0, 1, 1, 1, 0, 0, 0];
        let renderer = Renderer::default();
        assert_eq!(renderer.render(&bits, 6).unwrap(), "***...\n***...\n");
        assert_eq!(renderer.render(&bits, 5).unwrap(), "***..\n.***.\n..\n");
        assert_eq!(renderer.render(&[], 5).unwrap(), "");
    }

    #[test]
    fn test_render_zero_cols() {
        assert!(matches!(
            Renderer::default().render(&[1, 0], 0),
            Err(Error::InvalidShape { rows: 2, cols: 0 })
        ));
        let mut out = vec![];
        assert!(Renderer::default().write_to(&[1], 0, &mut out).is_err());
        assert!(out.is_empty());
    }

    #[test]
    fn test_render_glyphs() {
        let renderer = Renderer {
            set_glyph: '#',
            clear_glyph: ' ',
        };
        let mut out = vec![];
        renderer.write_to(&[1, 0, 0, 1], 2, &mut out).unwrap();
        assert_eq!(out, b"# \n #\n");
    }
}
