//! LZW encoder (compression).

use crate::bitstream::LsbBitWriter;
use crate::config::LzwConfig;
use crate::dictionary::LzwDictionary;
use crate::error::{LzwError, Result};

/// LZW encoder for GIF image data.
#[derive(Debug)]
pub struct LzwEncoder {
    /// Dictionary for string lookup.
    dict: LzwDictionary,
}

impl LzwEncoder {
    /// Create a new LZW encoder with the given configuration.
    pub fn new(config: LzwConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            dict: LzwDictionary::new(config),
        })
    }

    /// Get the configuration.
    pub fn config(&self) -> &LzwConfig {
        self.dict.config()
    }

    /// Encode a stream of color-table indices.
    ///
    /// # Algorithm
    ///
    /// 1. Emit the clear code
    /// 2. Extend the current match while `match + symbol` is in the table
    /// 3. Otherwise emit the match, add `match + symbol`, restart at `symbol`
    /// 4. When the table is full, emit a clear code and start over
    /// 5. Emit the final match and the end code, then pad to a byte
    ///
    /// The result is the raw code stream. Splitting it into GIF sub-blocks
    /// is left to the container writer.
    ///
    /// Symbols must be smaller than the clear code; with the 8-bit
    /// configuration every byte qualifies. Otherwise the input is rejected
    /// with [`LzwError::InvalidSymbol`] before anything is encoded.
    pub fn encode(&mut self, input: &[u8]) -> Result<Vec<u8>> {
        self.dict.reset();
        let clear_code = self.dict.clear_code();
        let end_code = self.dict.end_code();

        if let Some(offset) = input.iter().position(|&s| s as u16 >= clear_code) {
            return Err(LzwError::InvalidSymbol {
                symbol: input[offset],
                offset,
                clear_code,
            });
        }

        // Roughly one code per few symbols for typical image rows
        let mut writer = LsbBitWriter::with_capacity(input.len() / 2 + 4);

        writer.write_bits(clear_code, self.dict.code_size())?;

        let Some((&first, rest)) = input.split_first() else {
            writer.write_bits(end_code, self.dict.code_size())?;
            return Ok(writer.into_vec());
        };

        let mut current = first as u16;

        for &symbol in rest {
            if let Some(code) = self.dict.find(current, symbol) {
                current = code;
                continue;
            }

            writer.write_bits(current, self.dict.code_size())?;
            self.dict.grow_code_size();

            if self.dict.insert(current, symbol).is_none() {
                log::trace!(
                    "LZW table full after {} bytes of output, emitting clear code",
                    writer.len()
                );
                writer.write_bits(clear_code, self.dict.code_size())?;
                self.dict.reset();
            }

            current = symbol as u16;
        }

        writer.write_bits(current, self.dict.code_size())?;
        self.dict.grow_code_size();
        writer.write_bits(end_code, self.dict.code_size())?;

        Ok(writer.into_vec())
    }

    /// Reset the encoder to initial state.
    pub fn reset(&mut self) {
        self.dict.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoder() -> LzwEncoder {
        LzwEncoder::new(LzwConfig::GIF).unwrap()
    }

    /// Unpack LSB-first codes of a fixed width.
    fn codes(data: &[u8], width: u8, count: usize) -> Vec<u16> {
        let mut out = Vec::new();
        let mut acc = 0u32;
        let mut bits = 0u8;
        let mut bytes = data.iter();
        while out.len() < count {
            while bits < width {
                acc |= (*bytes.next().unwrap() as u32) << bits;
                bits += 8;
            }
            out.push((acc & ((1 << width) - 1)) as u16);
            acc >>= width;
            bits -= width;
        }
        out
    }

    #[test]
    fn test_encode_empty() {
        let compressed = encoder().encode(&[]).unwrap();
        // clear (256) + end (257), 9 bits each, padded to 3 bytes
        assert_eq!(compressed, vec![0x00, 0x03, 0x02]);
    }

    #[test]
    fn test_encode_single_symbol() {
        let compressed = encoder().encode(&[7]).unwrap();
        assert_eq!(codes(&compressed, 9, 3), vec![256, 7, 257]);
    }

    #[test]
    fn test_encode_classic_sequence() {
        // "1" is emitted, "11" becomes 258 and matches on the next pass
        let compressed = encoder().encode(&[1, 1, 1, 1]).unwrap();
        assert_eq!(codes(&compressed, 9, 5), vec![256, 1, 258, 1, 257]);
    }

    #[test]
    fn test_encode_repeating_compresses() {
        let original = vec![42u8; 10_000];
        let compressed = encoder().encode(&original).unwrap();
        assert!(compressed.len() < original.len() / 20);
    }

    #[test]
    fn test_encoder_is_reusable() {
        let mut enc = encoder();
        let first = enc.encode(b"TOBEORNOTTOBEORTOBEORNOT").unwrap();
        let second = enc.encode(b"TOBEORNOTTOBEORTOBEORNOT").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_symbol_out_of_range_rejected() {
        let mut enc = LzwEncoder::new(LzwConfig::new(2)).unwrap();
        assert_eq!(
            enc.encode(&[0, 3, 4, 1]),
            Err(LzwError::InvalidSymbol {
                symbol: 4,
                offset: 2,
                clear_code: 4
            })
        );
        // The encoder stays usable after a rejected input
        assert!(enc.encode(&[0, 1, 2, 3]).is_ok());
    }

    #[test]
    fn test_invalid_config_rejected() {
        assert!(LzwEncoder::new(LzwConfig::new(12)).is_err());
    }
}
