//! # OxiGIF: Pure Rust Animated GIF Encoder
//!
//! This crate writes animated GIF89a files from a sequence of RGBA frames.
//!
//! ## Pipeline
//!
//! - **Palette**: a fixed 256-entry table (6x6x6 color cube plus a grey ramp)
//! - **Quantize**: each pixel maps to its cube entry, no dithering
//! - **LZW**: indices are compressed with [`oxigif_lzw`] (8-bit minimum code size)
//! - **Container**: header, screen descriptor, global table, looping extension,
//!   one graphic control + image descriptor + image data per frame, trailer
//!
//! Frames are written as they arrive; only one encoded frame is held in
//! memory at a time. The first frame fixes the canvas size, and later frames
//! of another size are rescaled with bilinear filtering.
//!
//! ## Example
//!
//! ```rust
//! use oxigif::{Frame, GifEncoder};
//!
//! let mut encoder: GifEncoder<Vec<u8>> = GifEncoder::new();
//! encoder.set_delay(100);
//! encoder.start(Vec::new()).unwrap();
//! for shade in [0u8, 128, 255] {
//!     encoder.add_frame(Frame::solid(16, 16, [shade, 0, 0, 255])).unwrap();
//! }
//! let gif = encoder.finish().unwrap();
//! assert_eq!(&gif[..6], b"GIF89a");
//! ```
//!
//! Writing to a file goes through [`AtomicFile`], so the target path only
//! ever holds a complete GIF:
//!
//! ```rust,no_run
//! use oxigif::{AtomicFile, Frame, GifEncoder};
//!
//! let mut encoder: GifEncoder<AtomicFile> = GifEncoder::new();
//! encoder.start_file("out.gif")?;
//! encoder.add_frame(Frame::solid(64, 64, [0, 0, 255, 255]))?;
//! encoder.finish()?;
//! # Ok::<(), oxigif::GifError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod blocks;
mod encoder;
mod error;
mod frame;
pub mod palette;
pub mod quantize;
pub mod sink;

pub use blocks::DisposalMethod;
pub use encoder::{
    DEFAULT_DELAY_CS, EncoderConfig, EncoderWarning, FrameStatus, GifEncoder, Repeat,
    SessionState, delay_cs_from_ms, encode_to_vec,
};
pub use error::{FrameError, GifError, Result};
pub use frame::{BYTES_PER_PIXEL, Frame};
pub use palette::{Palette, Rgb};
pub use quantize::{IndexedFrame, quantize_frame, quantize_rgb};
pub use sink::{AtomicFile, GifSink, StreamSink};
