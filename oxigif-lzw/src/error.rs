//! LZW-specific error types.

use thiserror::Error;

/// LZW compression errors.
///
/// These errors surface when a caller builds an unusable configuration,
/// feeds symbols that do not fit the configured code size, or drives the bit
/// packer with an impossible code width.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum LzwError {
    /// Minimum or maximum code size outside what GIF allows.
    #[error("Invalid code size: min {min_code_size}, max {max_code_size} (min must be 2-8, max up to 12)")]
    InvalidCodeSize {
        /// Requested minimum code size (bits per pixel index).
        min_code_size: u8,
        /// Requested maximum code width.
        max_code_size: u8,
    },

    /// Input symbol that collides with the clear code or beyond.
    #[error("Invalid symbol {symbol} at offset {offset} (must be below clear code {clear_code})")]
    InvalidSymbol {
        /// The offending input byte.
        symbol: u8,
        /// Position of the byte in the input.
        offset: usize,
        /// Clear code of the configuration; symbols must be smaller.
        clear_code: u16,
    },

    /// Invalid bit width handed to the bit writer.
    #[error("Invalid bit width: {0} (must be 1-16)")]
    InvalidBitWidth(u8),
}

/// Result type for LZW operations.
pub type Result<T> = std::result::Result<T, LzwError>;
