//! Create command implementation.

use crate::utils::{create_progress_bar, display_name, format_size};
use oxigif::{AtomicFile, EncoderConfig, Frame, FrameStatus, GifEncoder, Repeat};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Options for creating a GIF.
pub struct CreateOptions {
    pub delay_ms: u32,
    pub loop_count: i32,
    pub verbose: bool,
    pub progress: bool,
    pub json: bool,
}

/// JSON output for a created GIF.
#[derive(Debug, Serialize, Deserialize)]
struct CreateSummaryJson {
    output: String,
    width: u16,
    height: u16,
    frames: usize,
    skipped: usize,
    delay_cs: u16,
    /// Absent when looping is disabled; 0 loops forever.
    #[serde(skip_serializing_if = "Option::is_none")]
    loop_count: Option<u16>,
    size: u64,
    warnings: Vec<String>,
}

pub fn cmd_create(
    output: &Path,
    frames: &[PathBuf],
    options: &CreateOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    if frames.is_empty() {
        return Err("No input frames specified".into());
    }

    let config = EncoderConfig::new()
        .with_delay_ms(options.delay_ms)
        .with_loop_count(options.loop_count);

    if options.verbose && !options.json {
        println!("Creating: {}", output.display());
        println!(
            "  Delay: {} cs, Loop: {}",
            config.delay_cs,
            describe_repeat(config.repeat)
        );
    }

    let mut encoder: GifEncoder<AtomicFile> = GifEncoder::with_config(config);
    encoder.start_file(output)?;

    let pb = create_progress_bar(frames.len() as u64, options.progress && !options.json);

    // Dropping the encoder on an early return removes the partial file
    let mut skipped = 0;
    for path in frames {
        pb.set_message(display_name(path));
        let frame = load_frame(path).map_err(|e| format!("{}: {}", path.display(), e))?;
        let (width, height) = frame.dimensions();

        match encoder.add_frame(frame)? {
            FrameStatus::Written => {
                if options.verbose && !options.json {
                    pb.println(format!("  added: {} ({}x{})", path.display(), width, height));
                }
            }
            FrameStatus::Skipped => {
                skipped += 1;
                if options.verbose && !options.json {
                    pb.println(format!("  skipped: {}", path.display()));
                }
            }
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    for warning in encoder.warnings() {
        eprintln!("Warning: {}", warning);
    }

    encoder.finish()?;

    let (width, height) = encoder.dimensions().unwrap_or((0, 0));
    let size = encoder.bytes_written();

    if options.json {
        let summary = CreateSummaryJson {
            output: output.display().to_string(),
            width,
            height,
            frames: encoder.frames_written(),
            skipped,
            delay_cs: config.delay_cs,
            loop_count: config.repeat.loop_count(),
            size,
            warnings: encoder.warnings().iter().map(|w| w.to_string()).collect(),
        };
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!(
            "Created {} ({}x{}, {} frames, {})",
            output.display(),
            width,
            height,
            encoder.frames_written(),
            format_size(size)
        );
        if skipped > 0 {
            println!("  {} frame(s) skipped", skipped);
        }
    }

    Ok(())
}

/// Load an image file as an RGBA frame.
fn load_frame(path: &Path) -> Result<Frame, Box<dyn std::error::Error>> {
    let image = image::open(path)?.into_rgba8();
    let (width, height) = image.dimensions();
    Ok(Frame::try_from_rgba(width, height, image.into_raw())?)
}

fn describe_repeat(repeat: Repeat) -> String {
    match repeat {
        Repeat::Infinite => "forever".to_string(),
        Repeat::Finite(n) => format!("{} times", n),
        Repeat::Disabled => "off".to_string(),
    }
}
