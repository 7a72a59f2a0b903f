//! Command implementations for OxiGIF CLI.

pub mod create;
pub mod palette;

pub use create::{CreateOptions, cmd_create};
pub use palette::cmd_palette;
