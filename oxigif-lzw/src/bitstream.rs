//! LSB-first bit packing for GIF LZW codes.
//!
//! GIF packs variable-width codes starting from the least significant bit
//! of each byte, and a code may straddle any number of byte boundaries.
//! TIFF does the opposite (MSB-first), so the two cannot share a writer.

use crate::error::{LzwError, Result};

/// LSB-first bit writer for LZW compression.
#[derive(Debug)]
pub struct LsbBitWriter {
    /// Output buffer.
    output: Vec<u8>,
    /// Pending bits, lowest bit first.
    buffer: u32,
    /// Number of pending bits.
    bits_in_buffer: u8,
}

impl LsbBitWriter {
    /// Create a new LSB bit writer.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create a writer with room for `capacity` output bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            output: Vec::with_capacity(capacity),
            buffer: 0,
            bits_in_buffer: 0,
        }
    }

    /// Append the low `count` bits of `value` to the stream.
    pub fn write_bits(&mut self, value: u16, count: u8) -> Result<()> {
        if count == 0 || count > 16 {
            return Err(LzwError::InvalidBitWidth(count));
        }

        let value = value as u32 & ((1u32 << count) - 1);
        self.buffer |= value << self.bits_in_buffer;
        self.bits_in_buffer += count;

        while self.bits_in_buffer >= 8 {
            self.output.push((self.buffer & 0xFF) as u8);
            self.buffer >>= 8;
            self.bits_in_buffer -= 8;
        }

        Ok(())
    }

    /// Flush remaining bits, padding the high end of the last byte with zeros.
    pub fn flush(&mut self) {
        if self.bits_in_buffer > 0 {
            self.output.push((self.buffer & 0xFF) as u8);
            self.buffer = 0;
            self.bits_in_buffer = 0;
        }
    }

    /// Number of complete bytes produced so far.
    pub fn len(&self) -> usize {
        self.output.len()
    }

    /// True if nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.output.is_empty() && self.bits_in_buffer == 0
    }

    /// Flush and return the output data.
    pub fn into_vec(mut self) -> Vec<u8> {
        self.flush();
        self.output
    }
}

impl Default for LsbBitWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lsb_packing() {
        let mut writer = LsbBitWriter::new();
        writer.write_bits(0b101, 3).unwrap();
        writer.write_bits(0b11001, 5).unwrap();
        // 3 bits 101 in the low end, 5 bits 11001 above them -> 11001_101
        assert_eq!(writer.into_vec(), vec![0xCD]);
    }

    #[test]
    fn test_codes_straddle_bytes() {
        let mut writer = LsbBitWriter::new();
        // Two 9-bit codes: clear (256) then end (257)
        writer.write_bits(256, 9).unwrap();
        writer.write_bits(257, 9).unwrap();
        // bits: 0_0000_0001 0000_0000 | 1_0000_0001 ...
        assert_eq!(writer.into_vec(), vec![0x00, 0x03, 0x02]);
    }

    #[test]
    fn test_value_is_masked() {
        let mut writer = LsbBitWriter::new();
        writer.write_bits(0xFFFF, 4).unwrap();
        writer.write_bits(0, 4).unwrap();
        assert_eq!(writer.into_vec(), vec![0x0F]);
    }

    #[test]
    fn test_invalid_width() {
        let mut writer = LsbBitWriter::new();
        assert_eq!(writer.write_bits(1, 0), Err(LzwError::InvalidBitWidth(0)));
        assert_eq!(writer.write_bits(1, 17), Err(LzwError::InvalidBitWidth(17)));
        assert!(writer.is_empty());
    }

    #[test]
    fn test_flush_pads_partial_byte() {
        let mut writer = LsbBitWriter::new();
        writer.write_bits(0x1FF, 9).unwrap();
        assert_eq!(writer.len(), 1);
        assert_eq!(writer.into_vec(), vec![0xFF, 0x01]);
    }
}
