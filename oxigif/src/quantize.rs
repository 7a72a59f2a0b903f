//! Color quantization onto the fixed palette.
//!
//! Each channel is reduced to one of six cube levels by integer division,
//! so every input maps to the cube entry at or below it. No dithering is
//! applied and alpha is ignored.

use crate::frame::{BYTES_PER_PIXEL, Frame};
use crate::palette::{CUBE_LEVELS, CUBE_STEP};

/// Palette index for an RGB color.
#[inline]
pub fn quantize_rgb(r: u8, g: u8, b: u8) -> u8 {
    let level = |c: u8| (c / CUBE_STEP).min(CUBE_LEVELS as u8 - 1) as u16;
    let index = level(r) * 36 + level(g) * 6 + level(b);
    index.min(255) as u8
}

/// A frame reduced to palette indices, one byte per pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedFrame {
    /// Width in pixels.
    pub width: u16,
    /// Height in pixels.
    pub height: u16,
    /// Row-major palette indices.
    pub indices: Vec<u8>,
}

/// Quantize every pixel of a frame.
pub fn quantize_frame(frame: &Frame) -> IndexedFrame {
    let indices = frame
        .pixels()
        .chunks_exact(BYTES_PER_PIXEL)
        .map(|px| quantize_rgb(px[0], px[1], px[2]))
        .collect();

    IndexedFrame {
        width: frame.width(),
        height: frame.height(),
        indices,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::{Palette, Rgb};

    #[test]
    fn test_exact_cube_colors() {
        let palette = Palette::new();
        for index in 0..216u16 {
            let c = palette.get(index as u8);
            assert_eq!(quantize_rgb(c.r, c.g, c.b), index as u8);
        }
    }

    #[test]
    fn test_primary_colors() {
        assert_eq!(quantize_rgb(0, 0, 0), 0);
        assert_eq!(quantize_rgb(255, 0, 0), 180);
        assert_eq!(quantize_rgb(0, 255, 0), 30);
        assert_eq!(quantize_rgb(0, 0, 255), 5);
        assert_eq!(quantize_rgb(255, 255, 255), 215);
    }

    #[test]
    fn test_rounds_down_to_level() {
        // 50 is below the first step, 101 below the second
        assert_eq!(quantize_rgb(50, 101, 254), quantize_rgb(0, 51, 204));
    }

    #[test]
    fn test_quantize_frame_ignores_alpha() {
        let frame = Frame::from_rgba(2, 1, vec![255, 0, 0, 0, 255, 0, 0, 255]);
        let indexed = quantize_frame(&frame);
        assert_eq!(indexed.width, 2);
        assert_eq!(indexed.height, 1);
        assert_eq!(indexed.indices, vec![180, 180]);
        assert_eq!(Palette::new().get(180), Rgb::new(255, 0, 0));
    }
}
