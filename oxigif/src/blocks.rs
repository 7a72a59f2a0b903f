//! GIF89a block layout.
//!
//! Every block knows how to serialize itself. All multi-byte integers are
//! little-endian. A file is laid out as:
//!
//! ```text
//! Header | Screen Descriptor | Global Color Table | [Loop Extension]
//! ( Graphic Control | Image Descriptor | Image Data )*
//! Trailer
//! ```

use crate::error::Result;
use crate::palette::Palette;
use std::io::Write;

/// GIF signature and version.
pub const GIF_MAGIC: &[u8; 6] = b"GIF89a";

/// Extension introducer.
pub const EXTENSION_INTRODUCER: u8 = 0x21;

/// Application extension label.
pub const APPLICATION_LABEL: u8 = 0xFF;

/// Graphic control extension label.
pub const GRAPHIC_CONTROL_LABEL: u8 = 0xF9;

/// Image descriptor separator.
pub const IMAGE_SEPARATOR: u8 = 0x2C;

/// End of file marker.
pub const TRAILER: u8 = 0x3B;

/// Zero-length sub-block that ends a block sequence.
pub const BLOCK_TERMINATOR: u8 = 0x00;

/// Largest payload of a single data sub-block.
pub const MAX_SUB_BLOCK: usize = 255;

/// Application identifier of the looping extension.
pub const NETSCAPE_ID: &[u8; 11] = b"NETSCAPE2.0";

/// Screen descriptor flags.
pub mod flags {
    /// Global color table present.
    pub const GLOBAL_TABLE: u8 = 0x80;
    /// Color resolution field (bits 4-6): 8 bits per primary.
    pub const COLOR_RESOLUTION_8: u8 = 0x70;
    /// Table size field (bits 0-2): 2^(7+1) = 256 entries.
    pub const TABLE_SIZE_256: u8 = 0x07;
    /// Transparent color flag in the graphic control extension.
    pub const TRANSPARENT: u8 = 0x01;
}

/// Write the file header.
pub fn write_header<W: Write>(writer: &mut W) -> Result<()> {
    writer.write_all(GIF_MAGIC)?;
    Ok(())
}

/// Write the file trailer.
pub fn write_trailer<W: Write>(writer: &mut W) -> Result<()> {
    writer.write_all(&[TRAILER])?;
    Ok(())
}

/// Write the global color table.
pub fn write_color_table<W: Write>(writer: &mut W, palette: &Palette) -> Result<()> {
    writer.write_all(&palette.as_bytes())?;
    Ok(())
}

/// Logical screen descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenDescriptor {
    /// Canvas width.
    pub width: u16,
    /// Canvas height.
    pub height: u16,
}

impl ScreenDescriptor {
    /// Packed flags: a 256-entry global table at 8 bits per primary.
    pub const FLAGS: u8 = flags::GLOBAL_TABLE | flags::COLOR_RESOLUTION_8 | flags::TABLE_SIZE_256;

    /// Write the descriptor.
    pub fn write<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(&self.width.to_le_bytes())?;
        writer.write_all(&self.height.to_le_bytes())?;
        // Flags, background index, pixel aspect ratio
        writer.write_all(&[Self::FLAGS, 0, 0])?;
        Ok(())
    }
}

/// NETSCAPE2.0 looping extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopExtension {
    /// Repeat count; 0 loops forever.
    pub count: u16,
}

impl LoopExtension {
    /// Write the extension.
    pub fn write<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(&[EXTENSION_INTRODUCER, APPLICATION_LABEL, NETSCAPE_ID.len() as u8])?;
        writer.write_all(NETSCAPE_ID)?;
        // One 3-byte sub-block: loop sub-block id 1, then the count
        writer.write_all(&[3, 1])?;
        writer.write_all(&self.count.to_le_bytes())?;
        writer.write_all(&[BLOCK_TERMINATOR])?;
        Ok(())
    }
}

/// What a decoder does with a frame before drawing the next one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum DisposalMethod {
    /// No disposal specified.
    Unspecified = 0,
    /// Leave the frame in place.
    #[default]
    Keep = 1,
    /// Restore the frame area to the background color.
    Background = 2,
    /// Restore the frame area to what was there before.
    Previous = 3,
}

/// Graphic control extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GraphicControl {
    /// Disposal method.
    pub disposal: DisposalMethod,
    /// Frame delay in hundredths of a second.
    pub delay_cs: u16,
    /// Transparent palette index, if any.
    pub transparent: Option<u8>,
}

impl GraphicControl {
    /// Packed field: disposal in bits 2-4, transparency flag in bit 0.
    pub fn packed(&self) -> u8 {
        let transparent = if self.transparent.is_some() {
            flags::TRANSPARENT
        } else {
            0
        };
        ((self.disposal as u8) << 2) | transparent
    }

    /// Write the extension.
    pub fn write<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(&[EXTENSION_INTRODUCER, GRAPHIC_CONTROL_LABEL, 4, self.packed()])?;
        writer.write_all(&self.delay_cs.to_le_bytes())?;
        writer.write_all(&[self.transparent.unwrap_or(0), BLOCK_TERMINATOR])?;
        Ok(())
    }
}

/// Image descriptor. No local color table, not interlaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageDescriptor {
    /// Left edge on the canvas.
    pub left: u16,
    /// Top edge on the canvas.
    pub top: u16,
    /// Image width.
    pub width: u16,
    /// Image height.
    pub height: u16,
}

impl ImageDescriptor {
    /// Descriptor for an image covering a `width` x `height` canvas.
    pub fn full_frame(width: u16, height: u16) -> Self {
        Self {
            left: 0,
            top: 0,
            width,
            height,
        }
    }

    /// Write the descriptor.
    pub fn write<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(&[IMAGE_SEPARATOR])?;
        for value in [self.left, self.top, self.width, self.height] {
            writer.write_all(&value.to_le_bytes())?;
        }
        writer.write_all(&[0])?;
        Ok(())
    }
}

/// LZW-compressed image data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData<'a> {
    /// Minimum code size the stream was compressed with.
    pub min_code_size: u8,
    /// Raw LZW code stream.
    pub data: &'a [u8],
}

impl ImageData<'_> {
    /// Number of bytes [`write`](Self::write) produces.
    pub fn encoded_len(&self) -> usize {
        1 + self.data.len() + self.data.len().div_ceil(MAX_SUB_BLOCK) + 1
    }

    /// Write the code size, the data as length-prefixed sub-blocks of at
    /// most 255 bytes, and the terminating empty sub-block.
    pub fn write<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(&[self.min_code_size])?;
        for chunk in self.data.chunks(MAX_SUB_BLOCK) {
            writer.write_all(&[chunk.len() as u8])?;
            writer.write_all(chunk)?;
        }
        writer.write_all(&[BLOCK_TERMINATOR])?;
        Ok(())
    }
}
