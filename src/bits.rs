use crate::{Error, Result, BYTE_BITS};

#[inline(always)]
fn mask(index: u8) -> Result<u8> {
    if index as usize >= BYTE_BITS {
        return Err(Error::InvalidBitIndex(index));
    }
    Ok(1 << index)
}

/// Returns the bit at LSB-first `index`, as 0 or 1.
#[inline(always)]
pub fn get_bit(byte: u8, index: u8) -> Result<u8> {
    Ok(((byte & mask(index)?) != 0) as u8)
}

#[inline(always)]
pub fn set_bit(byte: u8, index: u8) -> Result<u8> {
    Ok(byte | mask(index)?)
}

#[inline(always)]
pub fn clear_bit(byte: u8, index: u8) -> Result<u8> {
    Ok(byte & !mask(index)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_bit_lsb_first() {
        let byte = 0b1100_0101;
        let bits: Vec<u8> = (0..8).map(|i| get_bit(byte, i).unwrap()).collect();
        assert_eq!(bits, [1, 0, 1, 0, 0, 0, 1, 1]);
    }

    #[test]
    fn test_set_clear() {
        assert_eq!(set_bit(0, 0).unwrap(), 0x01);
        assert_eq!(set_bit(0, 7).unwrap(), 0x80);
        assert_eq!(set_bit(0x80, 7).unwrap(), 0x80);
        assert_eq!(clear_bit(0xFF, 3).unwrap(), 0xF7);
        assert_eq!(clear_bit(0x00, 3).unwrap(), 0x00);
    }

    #[test]
    fn test_invalid_index() {
        assert!(matches!(get_bit(0, 8), Err(Error::InvalidBitIndex(8))));
        assert!(matches!(set_bit(0, 200), Err(Error::InvalidBitIndex(200))));
        assert!(matches!(clear_bit(0, 9), Err(Error::InvalidBitIndex(9))));
    }
}
