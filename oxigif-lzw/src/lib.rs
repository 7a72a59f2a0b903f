//! # OxiGIF-LZW: Pure Rust GIF LZW Compression
//!
//! This crate turns a stream of color-table indices into the variable-width
//! LZW code stream stored in GIF image data.
//!
//! ## GIF LZW Specification
//!
//! - **LSB-first bit order**: codes are packed from the least significant bit
//! - **Clear and end codes**: `2^min_code_size` and `2^min_code_size + 1`
//! - **Variable width**: codes start at `min_code_size + 1` bits and grow to 12
//! - **Clear on full**: a full table is flushed with a clear code
//! - **Raw output**: sub-block framing belongs to the container, not here
//!
//! ## Example
//!
//! ```rust
//! use oxigif_lzw::compress_gif;
//!
//! let indices = vec![0u8; 64 * 64];
//! let compressed = compress_gif(&indices).unwrap();
//! assert!(compressed.len() < indices.len());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

mod bitstream;
mod config;
mod dictionary;
mod encoder;
mod error;

pub use bitstream::LsbBitWriter;
pub use config::{LzwConfig, MAX_CODE_SIZE};
pub use encoder::LzwEncoder;
pub use error::{LzwError, Result};

/// Compress data with LZW using the given configuration.
///
/// # Example
///
/// ```rust
/// use oxigif_lzw::{compress, LzwConfig};
///
/// let data = [0u8, 1, 2, 3, 0, 1, 2, 3];
/// let compressed = compress(&data, LzwConfig::new(2)).unwrap();
/// assert!(!compressed.is_empty());
/// ```
pub fn compress(data: &[u8], config: LzwConfig) -> Result<Vec<u8>> {
    let mut encoder = LzwEncoder::new(config)?;
    encoder.encode(data)
}

/// Compress 8-bit color-table indices (convenience function).
///
/// This is equivalent to `compress(data, LzwConfig::GIF)`.
pub fn compress_gif(data: &[u8]) -> Result<Vec<u8>> {
    compress(data, LzwConfig::GIF)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        let compressed = compress_gif(&[]).unwrap();
        assert_eq!(compressed.len(), 3);
    }

    #[test]
    fn test_invalid_config() {
        let config = LzwConfig {
            min_code_size: 8,
            max_code_size: 8,
        };
        assert!(matches!(
            compress(b"abc", config),
            Err(LzwError::InvalidCodeSize { .. })
        ));
    }
}
