//! Raster frames handed to the encoder.

use crate::error::{FrameError, GifError, Result};

/// Bytes per RGBA pixel.
pub const BYTES_PER_PIXEL: usize = 4;

/// An RGBA raster frame.
///
/// Construction does not validate the buffer; the encoder checks each frame
/// when it is added and skips the ones that are unusable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    width: u16,
    height: u16,
    pixels: Vec<u8>,
}

impl Frame {
    /// Create a frame from row-major RGBA bytes.
    pub fn from_rgba(width: u16, height: u16, pixels: Vec<u8>) -> Self {
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Create a frame from row-major RGB bytes, with full opacity.
    pub fn from_rgb(width: u16, height: u16, pixels: &[u8]) -> Self {
        let rgba = pixels
            .chunks_exact(3)
            .flat_map(|p| [p[0], p[1], p[2], 0xFF])
            .collect();
        Self::from_rgba(width, height, rgba)
    }

    /// Create a frame from RGBA bytes with 32-bit dimensions.
    ///
    /// Fails if either side exceeds what a GIF can describe.
    pub fn try_from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        let (Ok(w), Ok(h)) = (u16::try_from(width), u16::try_from(height)) else {
            return Err(GifError::frame_too_large(width, height));
        };
        Ok(Self::from_rgba(w, h, pixels))
    }

    /// Create a frame filled with one RGBA color.
    pub fn solid(width: u16, height: u16, rgba: [u8; 4]) -> Self {
        let count = width as usize * height as usize;
        Self::from_rgba(width, height, rgba.repeat(count))
    }

    /// Frame width in pixels.
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Frame height in pixels.
    pub fn height(&self) -> u16 {
        self.height
    }

    /// `(width, height)`.
    pub fn dimensions(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    /// Raw RGBA bytes.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Consume the frame, returning its RGBA bytes.
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// Number of pixels described by the dimensions.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Check that the frame can be encoded.
    pub fn validate(&self) -> std::result::Result<(), FrameError> {
        if self.width == 0 || self.height == 0 {
            return Err(FrameError::ZeroSize {
                width: self.width,
                height: self.height,
            });
        }

        let expected = self.pixel_count() * BYTES_PER_PIXEL;
        if self.pixels.len() != expected {
            return Err(FrameError::BufferSize {
                expected,
                actual: self.pixels.len(),
            });
        }

        Ok(())
    }

    /// Rescale to `width` x `height` with bilinear filtering.
    ///
    /// Pixel centers are aligned between source and target, and samples
    /// outside the source clamp to its edge. The frame must be valid and
    /// the target non-empty.
    pub fn resized(&self, width: u16, height: u16) -> Frame {
        if (width, height) == self.dimensions() {
            return self.clone();
        }

        let (src_w, src_h) = (self.width as usize, self.height as usize);
        let (dst_w, dst_h) = (width as usize, height as usize);
        let scale_x = src_w as f64 / dst_w as f64;
        let scale_y = src_h as f64 / dst_h as f64;

        let mut output = Vec::with_capacity(dst_w * dst_h * BYTES_PER_PIXEL);

        for y in 0..dst_h {
            let (y0, y1, fy) = sample_axis(y, scale_y, src_h);
            for x in 0..dst_w {
                let (x0, x1, fx) = sample_axis(x, scale_x, src_w);

                let p00 = self.pixel(x0, y0);
                let p10 = self.pixel(x1, y0);
                let p01 = self.pixel(x0, y1);
                let p11 = self.pixel(x1, y1);

                for c in 0..BYTES_PER_PIXEL {
                    let v = p00[c] as f64 * (1.0 - fx) * (1.0 - fy)
                        + p10[c] as f64 * fx * (1.0 - fy)
                        + p01[c] as f64 * (1.0 - fx) * fy
                        + p11[c] as f64 * fx * fy;
                    output.push(v.clamp(0.0, 255.0).round() as u8);
                }
            }
        }

        Frame::from_rgba(width, height, output)
    }

    #[inline]
    fn pixel(&self, x: usize, y: usize) -> &[u8] {
        let idx = (y * self.width as usize + x) * BYTES_PER_PIXEL;
        &self.pixels[idx..idx + BYTES_PER_PIXEL]
    }
}

/// Map a target coordinate to the two source coordinates around it and
/// the weight of the second one.
#[inline]
fn sample_axis(dst: usize, scale: f64, src_len: usize) -> (usize, usize, f64) {
    let max = (src_len - 1) as f64;
    let pos = ((dst as f64 + 0.5) * scale - 0.5).clamp(0.0, max);
    let lo = pos.floor() as usize;
    let hi = (lo + 1).min(src_len - 1);
    (lo, hi, pos - lo as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solid_frame() {
        let frame = Frame::solid(3, 2, [1, 2, 3, 4]);
        assert_eq!(frame.dimensions(), (3, 2));
        assert_eq!(frame.pixels().len(), 24);
        assert_eq!(&frame.pixels()[20..], &[1, 2, 3, 4]);
        assert!(frame.validate().is_ok());
    }

    #[test]
    fn test_from_rgb_adds_alpha() {
        let frame = Frame::from_rgb(2, 1, &[10, 20, 30, 40, 50, 60]);
        assert_eq!(frame.pixels(), &[10, 20, 30, 255, 40, 50, 60, 255]);
    }

    #[test]
    fn test_try_from_rgba_limits() {
        assert!(Frame::try_from_rgba(65_535, 1, Vec::new()).is_ok());
        assert!(matches!(
            Frame::try_from_rgba(65_536, 1, Vec::new()),
            Err(GifError::FrameTooLarge { width: 65_536, .. })
        ));
    }

    #[test]
    fn test_validate_zero_size() {
        let frame = Frame::from_rgba(0, 10, Vec::new());
        assert_eq!(
            frame.validate(),
            Err(FrameError::ZeroSize {
                width: 0,
                height: 10
            })
        );
    }

    #[test]
    fn test_validate_buffer_size() {
        let frame = Frame::from_rgba(2, 2, vec![0; 15]);
        assert_eq!(
            frame.validate(),
            Err(FrameError::BufferSize {
                expected: 16,
                actual: 15
            })
        );
    }

    #[test]
    fn test_resize_solid_stays_solid() {
        let frame = Frame::solid(7, 5, [200, 100, 50, 255]);
        let resized = frame.resized(16, 3);
        assert_eq!(resized.dimensions(), (16, 3));
        assert!(resized.validate().is_ok());
        for px in resized.pixels().chunks_exact(4) {
            assert_eq!(px, &[200, 100, 50, 255]);
        }
    }

    #[test]
    fn test_resize_downscale_averages() {
        // Left half black, right half white, 4x1 -> 2x1
        let frame = Frame::from_rgba(
            4,
            1,
            [[0, 0, 0, 255], [0, 0, 0, 255], [255, 255, 255, 255], [255, 255, 255, 255]].concat(),
        );
        let resized = frame.resized(2, 1);
        // Centers land at source x = 0.5 and 2.5
        assert_eq!(&resized.pixels()[..4], &[0, 0, 0, 255]);
        assert_eq!(&resized.pixels()[4..], &[255, 255, 255, 255]);
    }

    #[test]
    fn test_resize_upscale_interpolates() {
        let frame = Frame::from_rgba(2, 1, [[0, 0, 0, 255], [100, 100, 100, 255]].concat());
        let resized = frame.resized(4, 1);
        let reds: Vec<u8> = resized.pixels().chunks_exact(4).map(|p| p[0]).collect();
        assert_eq!(reds, vec![0, 25, 75, 100]);
    }

    #[test]
    fn test_resize_same_size_is_identity() {
        let frame = Frame::from_rgba(1, 2, vec![1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(frame.resized(1, 2), frame);
    }
}
