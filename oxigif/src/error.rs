//! Error types for GIF encoding.
//!
//! Errors fall into three groups:
//!
//! - **I/O**: the sink cannot be created, written or published. Fatal; the
//!   session is aborted and the partial output discarded.
//! - **Usage**: an operation was called in the wrong session state, or the
//!   session was finished without any frames.
//! - **Frame**: a single frame is unusable. These are recoverable; the
//!   session skips the frame and records a [`FrameError`] as a warning.

use crate::encoder::SessionState;
use oxigif_lzw::LzwError;
use std::io;
use thiserror::Error;

/// The main error type for GIF encoding.
#[derive(Debug, Error)]
pub enum GifError {
    /// I/O error from the output sink.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// LZW configuration error.
    #[error("LZW error: {0}")]
    Lzw(#[from] LzwError),

    /// Operation not valid in the current session state.
    #[error("Cannot {operation} while encoder is {state}")]
    InvalidState {
        /// The rejected operation.
        operation: &'static str,
        /// State the session was in.
        state: SessionState,
    },

    /// The session was finished without a single frame.
    #[error("No frames were added; refusing to write an empty GIF")]
    NoFrames,

    /// Frame dimensions do not fit the 16-bit GIF size fields.
    #[error("Frame too large: {width}x{height} (GIF limit is 65535x65535)")]
    FrameTooLarge {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },
}

/// Result type alias for GIF encoding.
pub type Result<T> = std::result::Result<T, GifError>;

impl GifError {
    /// Create an invalid state error.
    pub fn invalid_state(operation: &'static str, state: SessionState) -> Self {
        Self::InvalidState { operation, state }
    }

    /// Create a frame too large error.
    pub fn frame_too_large(width: u32, height: u32) -> Self {
        Self::FrameTooLarge { width, height }
    }

    /// True for errors caused by calling the API out of order.
    pub fn is_usage_error(&self) -> bool {
        matches!(self, Self::InvalidState { .. } | Self::NoFrames)
    }
}

/// Reasons a single frame is rejected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FrameError {
    /// Width or height is zero.
    #[error("Frame has zero size ({width}x{height})")]
    ZeroSize {
        /// Frame width.
        width: u16,
        /// Frame height.
        height: u16,
    },

    /// Pixel buffer length does not match `width * height * 4`.
    #[error("Pixel buffer has {actual} bytes, expected {expected}")]
    BufferSize {
        /// Bytes required by the dimensions.
        expected: usize,
        /// Bytes actually present.
        actual: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GifError::invalid_state("add a frame", SessionState::Created);
        assert_eq!(err.to_string(), "Cannot add a frame while encoder is created");
        assert!(err.is_usage_error());

        let err = GifError::frame_too_large(70_000, 10);
        assert!(err.to_string().contains("70000x10"));
        assert!(!err.is_usage_error());

        let err = FrameError::BufferSize {
            expected: 400,
            actual: 12,
        };
        assert!(err.to_string().contains("expected 400"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "read-only");
        let err: GifError = io_err.into();
        assert!(matches!(err, GifError::Io(_)));
    }
}
