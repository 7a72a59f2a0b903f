//! LZW configuration for GIF image data.

use crate::error::{LzwError, Result};

/// Largest code width GIF decoders accept.
pub const MAX_CODE_SIZE: u8 = 12;

/// LZW configuration parameters.
///
/// GIF calls the number of bits per pixel index the *minimum code size*.
/// Codes on the wire start one bit wider than that and grow up to
/// [`MAX_CODE_SIZE`] bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LzwConfig {
    /// Minimum code size in bits (the value written before the image data).
    pub min_code_size: u8,
    /// Maximum code width in bits (12 for GIF).
    pub max_code_size: u8,
}

impl LzwConfig {
    /// Standard configuration for a 256-entry color table.
    ///
    /// - Clear code 256, end code 257
    /// - Codes start at 9 bits and grow to 12
    pub const GIF: Self = Self {
        min_code_size: 8,
        max_code_size: MAX_CODE_SIZE,
    };

    /// Create a configuration for a palette of `2^min_code_size` entries.
    pub fn new(min_code_size: u8) -> Self {
        Self {
            min_code_size,
            max_code_size: MAX_CODE_SIZE,
        }
    }

    /// Check that the configuration describes a GIF-compatible code space.
    pub fn validate(&self) -> Result<()> {
        let min_ok = (2..=8).contains(&self.min_code_size);
        let max_ok = self.max_code_size > self.min_code_size && self.max_code_size <= MAX_CODE_SIZE;
        if min_ok && max_ok {
            Ok(())
        } else {
            Err(LzwError::InvalidCodeSize {
                min_code_size: self.min_code_size,
                max_code_size: self.max_code_size,
            })
        }
    }

    /// Get the clear code value (256 for an 8-bit minimum code size).
    pub fn clear_code(&self) -> u16 {
        1 << self.min_code_size
    }

    /// Get the end-of-information code value (clear_code + 1).
    pub fn end_code(&self) -> u16 {
        self.clear_code() + 1
    }

    /// Get the first available code for dictionary entries.
    pub fn first_code(&self) -> u16 {
        self.end_code() + 1
    }

    /// Get the highest code that fits in the maximum width.
    pub fn max_code(&self) -> u16 {
        (1 << self.max_code_size) - 1
    }

    /// Width of the first code written after a clear code.
    pub fn initial_code_size(&self) -> u8 {
        self.min_code_size + 1
    }
}

impl Default for LzwConfig {
    fn default() -> Self {
        Self::GIF
    }
}
