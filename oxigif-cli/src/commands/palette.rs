//! Palette command implementation.

use oxigif::Palette;
use oxigif::palette::CUBE_SIZE;
use serde::{Deserialize, Serialize};

/// JSON serializable palette entry.
#[derive(Debug, Serialize, Deserialize)]
struct PaletteEntryJson {
    index: u8,
    r: u8,
    g: u8,
    b: u8,
    hex: String,
}

pub fn cmd_palette(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let palette = Palette::new();

    if json {
        let entries: Vec<PaletteEntryJson> = palette
            .iter()
            .enumerate()
            .map(|(i, c)| PaletteEntryJson {
                index: i as u8,
                r: c.r,
                g: c.g,
                b: c.b,
                hex: format!("#{:02x}{:02x}{:02x}", c.r, c.g, c.b),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    println!("{:>5}  {:>3} {:>3} {:>3}  {:7}  Kind", "Index", "R", "G", "B", "Hex");
    println!("{}", "-".repeat(36));
    for (i, c) in palette.iter().enumerate() {
        let kind = if i < CUBE_SIZE { "cube" } else { "grey" };
        println!(
            "{:>5}  {:>3} {:>3} {:>3}  #{:02x}{:02x}{:02x}  {}",
            i, c.r, c.g, c.b, c.r, c.g, c.b, kind
        );
    }
    println!("{}", "-".repeat(36));
    println!("{} entries ({} cube, {} grey)", palette.len(), CUBE_SIZE, palette.len() - CUBE_SIZE);

    Ok(())
}
