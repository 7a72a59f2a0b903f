//! Fixed 256-color palette.
//!
//! The first 216 entries form a 6x6x6 color cube over the levels
//! 0, 51, 102, 153, 204 and 255, enumerated red-major and blue-minor. The
//! remaining 40 entries are a grey ramp `i * 255 / 256` for `i` in 216..256.
//! The quantizer only ever selects cube entries; the ramp pads the table to
//! the 256 entries the screen descriptor announces.

/// Number of palette entries.
pub const PALETTE_SIZE: usize = 256;

/// Levels per channel in the color cube.
pub const CUBE_LEVELS: usize = 6;

/// Distance between adjacent cube levels.
pub const CUBE_STEP: u8 = 51;

/// Number of entries in the color cube.
pub const CUBE_SIZE: usize = CUBE_LEVELS * CUBE_LEVELS * CUBE_LEVELS;

/// An RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Create a color from its channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a grey with all channels set to `value`.
    pub const fn grey(value: u8) -> Self {
        Self::new(value, value, value)
    }
}

/// The encoder's global color table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: [Rgb; PALETTE_SIZE],
}

impl Palette {
    /// Build the palette.
    pub fn new() -> Self {
        let mut colors = [Rgb::default(); PALETTE_SIZE];

        let mut index = 0;
        for r in 0..CUBE_LEVELS as u8 {
            for g in 0..CUBE_LEVELS as u8 {
                for b in 0..CUBE_LEVELS as u8 {
                    colors[index] = Rgb::new(r * CUBE_STEP, g * CUBE_STEP, b * CUBE_STEP);
                    index += 1;
                }
            }
        }

        for (i, color) in colors.iter_mut().enumerate().skip(CUBE_SIZE) {
            *color = Rgb::grey((i * 255 / PALETTE_SIZE) as u8);
        }

        Self { colors }
    }

    /// Number of entries (always 256).
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always false; the palette is never empty.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Color at `index`.
    pub fn get(&self, index: u8) -> Rgb {
        self.colors[index as usize]
    }

    /// All entries in table order.
    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    /// Iterate over entries in table order.
    pub fn iter(&self) -> impl Iterator<Item = Rgb> + '_ {
        self.colors.iter().copied()
    }

    /// The table as packed RGB triples, as stored in the GIF file.
    pub fn as_bytes(&self) -> Vec<u8> {
        self.colors
            .iter()
            .flat_map(|c| [c.r, c.g, c.b])
            .collect()
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new()
    }
}
