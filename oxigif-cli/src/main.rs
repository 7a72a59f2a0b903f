//! OxiGIF CLI - Pure Rust animated GIF builder
//!
//! Turns a list of PNG/JPEG images into an animated GIF89a file.

mod commands;
mod utils;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use commands::{CreateOptions, cmd_create, cmd_palette};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "oxigif")]
#[command(author, version, about = "Pure Rust animated GIF encoder")]
#[command(long_about = "
OxiGIF builds animated GIF89a files from still images.
Frames are quantized to a fixed 256-color palette and LZW compressed.
Images of a different size than the first frame are rescaled to match.

Examples:
  oxigif create out.gif frame1.png frame2.png frame3.png
  oxigif create out.gif shots/*.png --delay 200 --loop 3
  oxigif create out.gif a.jpg b.jpg --json
  oxigif palette --json
  oxigif completions bash
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an animated GIF from image files
    #[command(alias = "c")]
    Create {
        /// Output GIF file
        output: PathBuf,

        /// Frame images, in display order
        #[arg(required = true)]
        frames: Vec<PathBuf>,

        /// Delay between frames in milliseconds
        #[arg(short, long, default_value_t = 100)]
        delay: u32,

        /// Loop count: 0 loops forever, negative plays once without looping
        #[arg(short, long = "loop", default_value_t = 0, allow_negative_numbers = true)]
        loop_count: i32,

        /// Show verbose output
        #[arg(short, long)]
        verbose: bool,

        /// Show progress bar
        #[arg(short = 'P', long)]
        progress: bool,

        /// Output summary as JSON (machine-readable)
        #[arg(short, long)]
        json: bool,
    },

    /// Print the fixed 256-color palette
    Palette {
        /// Output as JSON (machine-readable)
        #[arg(short, long)]
        json: bool,
    },

    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Create {
            output,
            frames,
            delay,
            loop_count,
            verbose,
            progress,
            json,
        } => cmd_create(
            &output,
            &frames,
            &CreateOptions {
                delay_ms: delay,
                loop_count,
                verbose,
                progress,
                json,
            },
        ),
        Commands::Palette { json } => cmd_palette(json),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "oxigif", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
