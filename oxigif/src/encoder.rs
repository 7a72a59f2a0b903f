//! Encoder session.
//!
//! A [`GifEncoder`] owns one output from start to finish and moves through
//! three states:
//!
//! ```text
//! Created --start()--> Started --finish()/abort()--> Finished
//! ```
//!
//! The first frame that is written fixes the canvas size and triggers the
//! file preamble (header, screen descriptor, color table, loop extension).
//! Later frames of a different size are rescaled to the canvas. Each frame
//! is assembled in memory and handed to the sink with a single write.

use crate::blocks::{
    DisposalMethod, GraphicControl, ImageData, ImageDescriptor, LoopExtension, ScreenDescriptor,
    write_color_table, write_header, write_trailer,
};
use crate::error::{FrameError, GifError, Result};
use crate::frame::Frame;
use crate::palette::{PALETTE_SIZE, Palette};
use crate::quantize::quantize_frame;
use crate::sink::{AtomicFile, GifSink};
use oxigif_lzw::{LzwConfig, LzwEncoder};
use std::fmt;
use std::path::Path;

/// Default frame delay in hundredths of a second.
pub const DEFAULT_DELAY_CS: u16 = 10;

/// Lifecycle state of an encoder session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Configured but no sink yet.
    Created,
    /// Accepting frames.
    Started,
    /// Trailer written or session aborted; no further frames.
    Finished,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Created => "created",
            Self::Started => "started",
            Self::Finished => "finished",
        };
        f.write_str(name)
    }
}

/// Animation looping behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Repeat {
    /// Loop forever.
    #[default]
    Infinite,
    /// Repeat the given number of times.
    Finite(u16),
    /// Write no looping extension at all.
    Disabled,
}

impl Repeat {
    /// Interpret a signed loop count: 0 loops forever, a positive value
    /// repeats that many times (saturating at 65535), negative disables
    /// looping.
    pub fn from_count(count: i32) -> Self {
        match count {
            0 => Self::Infinite,
            n if n > 0 => Self::Finite(n.min(u16::MAX as i32) as u16),
            _ => Self::Disabled,
        }
    }

    /// Value for the NETSCAPE2.0 extension, or `None` if none is written.
    pub fn loop_count(&self) -> Option<u16> {
        match self {
            Self::Infinite => Some(0),
            Self::Finite(n) => Some(*n),
            Self::Disabled => None,
        }
    }
}

/// Convert a delay in milliseconds to GIF centiseconds, at least 1.
pub fn delay_cs_from_ms(ms: u32) -> u16 {
    (ms / 10).clamp(1, u16::MAX as u32) as u16
}

/// Session-wide encoding options.
///
/// One delay applies to every frame of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncoderConfig {
    /// Frame delay in hundredths of a second.
    pub delay_cs: u16,
    /// Looping behaviour.
    pub repeat: Repeat,
    /// Disposal method written for every frame.
    pub disposal: DisposalMethod,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            delay_cs: DEFAULT_DELAY_CS,
            repeat: Repeat::Infinite,
            disposal: DisposalMethod::Keep,
        }
    }
}

impl EncoderConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the frame delay in milliseconds.
    pub fn with_delay_ms(mut self, ms: u32) -> Self {
        self.delay_cs = delay_cs_from_ms(ms);
        self
    }

    /// Set the looping behaviour.
    pub fn with_repeat(mut self, repeat: Repeat) -> Self {
        self.repeat = repeat;
        self
    }

    /// Set the looping behaviour from a signed count (see [`Repeat::from_count`]).
    pub fn with_loop_count(self, count: i32) -> Self {
        self.with_repeat(Repeat::from_count(count))
    }

    /// Set the disposal method.
    pub fn with_disposal(mut self, disposal: DisposalMethod) -> Self {
        self.disposal = disposal;
        self
    }
}

/// Outcome of [`GifEncoder::add_frame`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    /// The frame was encoded and written.
    Written,
    /// The frame was unusable and skipped; see [`GifEncoder::warnings`].
    Skipped,
}

/// Non-fatal problems recorded during a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncoderWarning {
    /// A frame was rejected and left out of the animation.
    FrameSkipped {
        /// Zero-based position among all frames passed to `add_frame`.
        index: usize,
        /// Why it was rejected.
        reason: FrameError,
    },
    /// A setting changed after the first frame and was not applied.
    ConfigIgnored {
        /// Name of the setting.
        setting: &'static str,
    },
    /// A setting changed after the session finished and was not applied.
    ConfigAfterFinish {
        /// Name of the setting.
        setting: &'static str,
    },
}

impl fmt::Display for EncoderWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FrameSkipped { index, reason } => {
                write!(f, "frame {} skipped: {}", index, reason)
            }
            Self::ConfigIgnored { setting } => {
                write!(f, "{} changed after the first frame; ignored", setting)
            }
            Self::ConfigAfterFinish { setting } => {
                write!(f, "{} changed after the session finished; ignored", setting)
            }
        }
    }
}

/// Per-session resources, present only while started.
#[derive(Debug)]
struct ActiveSession<S> {
    sink: S,
    palette: Palette,
    lzw: LzwEncoder,
    /// Canvas size, fixed by the first written frame.
    screen: Option<(u16, u16)>,
}

/// Animated GIF encoder session.
///
/// # Example
///
/// ```rust
/// use oxigif::{Frame, GifEncoder};
///
/// let mut encoder: GifEncoder<Vec<u8>> = GifEncoder::new();
/// encoder.set_delay(50);
/// encoder.set_loop(0);
/// encoder.start(Vec::new()).unwrap();
/// encoder.add_frame(Frame::solid(10, 10, [255, 0, 0, 255])).unwrap();
/// let gif = encoder.finish().unwrap();
/// assert!(gif.starts_with(b"GIF89a"));
/// assert_eq!(gif.last(), Some(&0x3B));
/// ```
#[derive(Debug)]
pub struct GifEncoder<S: GifSink> {
    config: EncoderConfig,
    state: SessionState,
    active: Option<ActiveSession<S>>,
    /// Frames passed to `add_frame`, written or not.
    frames_submitted: usize,
    frames_written: usize,
    bytes_written: u64,
    dimensions: Option<(u16, u16)>,
    warnings: Vec<EncoderWarning>,
}

impl<S: GifSink> GifEncoder<S> {
    /// Create an encoder with default settings.
    pub fn new() -> Self {
        Self::with_config(EncoderConfig::default())
    }

    /// Create an encoder with the given settings.
    pub fn with_config(config: EncoderConfig) -> Self {
        Self {
            config,
            state: SessionState::Created,
            active: None,
            frames_submitted: 0,
            frames_written: 0,
            bytes_written: 0,
            dimensions: None,
            warnings: Vec::new(),
        }
    }

    /// Current settings.
    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Number of frames written so far.
    pub fn frames_written(&self) -> usize {
        self.frames_written
    }

    /// Bytes handed to the sink so far.
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Canvas size, once the first frame has been written.
    pub fn dimensions(&self) -> Option<(u16, u16)> {
        self.dimensions
    }

    /// Warnings recorded in the current session.
    pub fn warnings(&self) -> &[EncoderWarning] {
        &self.warnings
    }

    /// Set the delay between frames in milliseconds.
    ///
    /// Only effective before the first frame is written.
    pub fn set_delay(&mut self, ms: u32) {
        if self.config_locked("delay") {
            return;
        }
        self.config.delay_cs = delay_cs_from_ms(ms);
    }

    /// Set the loop count: 0 loops forever, a positive value repeats that
    /// many times, a negative value disables looping.
    ///
    /// Only effective before the first frame is written.
    pub fn set_loop(&mut self, count: i32) {
        if self.config_locked("loop count") {
            return;
        }
        self.config.repeat = Repeat::from_count(count);
    }

    /// Set the disposal method written for every frame.
    ///
    /// Only effective before the first frame is written.
    pub fn set_disposal(&mut self, disposal: DisposalMethod) {
        if self.config_locked("disposal") {
            return;
        }
        self.config.disposal = disposal;
    }

    fn config_locked(&mut self, setting: &'static str) -> bool {
        let warning = if self.state == SessionState::Finished {
            EncoderWarning::ConfigAfterFinish { setting }
        } else if self.frames_written > 0 {
            EncoderWarning::ConfigIgnored { setting }
        } else {
            return false;
        };
        log::warn!("{}", warning);
        self.warnings.push(warning);
        true
    }

    /// Begin a session writing to `sink`.
    pub fn start(&mut self, sink: S) -> Result<()> {
        if self.state != SessionState::Created {
            sink.discard();
            return Err(GifError::invalid_state("start", self.state));
        }

        self.active = Some(ActiveSession {
            sink,
            palette: Palette::new(),
            lzw: LzwEncoder::new(LzwConfig::GIF)?,
            screen: None,
        });
        self.frames_submitted = 0;
        self.frames_written = 0;
        self.bytes_written = 0;
        self.dimensions = None;
        self.warnings.clear();
        self.state = SessionState::Started;
        Ok(())
    }

    /// Encode and write one frame.
    ///
    /// Returns [`FrameStatus::Skipped`] for an unusable frame (zero size or
    /// a pixel buffer that does not match its dimensions); the session
    /// carries on. An I/O error aborts the session.
    pub fn add_frame(&mut self, frame: Frame) -> Result<FrameStatus> {
        if self.state != SessionState::Started {
            return Err(GifError::invalid_state("add a frame", self.state));
        }

        let index = self.frames_submitted;
        self.frames_submitted += 1;

        if let Err(reason) = frame.validate() {
            log::warn!("Skipping frame {}: {}", index, reason);
            self.warnings.push(EncoderWarning::FrameSkipped { index, reason });
            return Ok(FrameStatus::Skipped);
        }

        match self.write_frame(index, frame) {
            Ok(written) => {
                self.frames_written += 1;
                self.bytes_written += written as u64;
                Ok(FrameStatus::Written)
            }
            Err(e) => {
                log::warn!("Aborting GIF session at frame {}: {}", index, e);
                self.abort();
                Err(e)
            }
        }
    }

    fn write_frame(&mut self, index: usize, frame: Frame) -> Result<usize> {
        let config = self.config;
        let Some(active) = self.active.as_mut() else {
            return Err(GifError::invalid_state("add a frame", self.state));
        };

        let mut out = Vec::new();

        let (width, height) = match active.screen {
            Some(screen) => screen,
            None => {
                let screen = frame.dimensions();
                write_preamble(&mut out, &config, &active.palette, screen)?;
                active.screen = Some(screen);
                self.dimensions = Some(screen);
                screen
            }
        };

        let frame = if frame.dimensions() != (width, height) {
            log::debug!(
                "Rescaling frame {} from {}x{} to {}x{}",
                index,
                frame.width(),
                frame.height(),
                width,
                height
            );
            frame.resized(width, height)
        } else {
            frame
        };

        let indexed = quantize_frame(&frame);
        drop(frame);
        let compressed = active.lzw.encode(&indexed.indices)?;

        GraphicControl {
            disposal: config.disposal,
            delay_cs: config.delay_cs,
            transparent: None,
        }
        .write(&mut out)?;
        ImageDescriptor::full_frame(width, height).write(&mut out)?;
        ImageData {
            min_code_size: active.lzw.config().min_code_size,
            data: &compressed,
        }
        .write(&mut out)?;

        log::debug!(
            "Frame {}: {} pixels -> {} LZW bytes",
            index,
            indexed.indices.len(),
            compressed.len()
        );

        active.sink.write_all(&out)?;
        Ok(out.len())
    }

    /// Write the trailer and publish the output.
    ///
    /// With no frames written the sink is discarded and
    /// [`GifError::NoFrames`] is returned; no file is published.
    pub fn finish(&mut self) -> Result<S::Output> {
        if self.state != SessionState::Started {
            return Err(GifError::invalid_state("finish", self.state));
        }

        self.state = SessionState::Finished;
        let Some(mut active) = self.active.take() else {
            return Err(GifError::invalid_state("finish", SessionState::Finished));
        };

        if self.frames_written == 0 {
            log::warn!("No frames were added; discarding output");
            active.sink.discard();
            return Err(GifError::NoFrames);
        }

        let mut trailer = Vec::with_capacity(1);
        write_trailer(&mut trailer)?;
        if let Err(e) = active.sink.write_all(&trailer) {
            active.sink.discard();
            return Err(e.into());
        }
        self.bytes_written += trailer.len() as u64;

        let output = active.sink.commit()?;
        log::debug!(
            "GIF finished: {} frames, {} bytes",
            self.frames_written,
            self.bytes_written
        );
        Ok(output)
    }

    /// Discard the output and end the session.
    ///
    /// Safe to call in any state.
    pub fn abort(&mut self) {
        if let Some(active) = self.active.take() {
            active.sink.discard();
        }
        self.state = SessionState::Finished;
    }
}

impl GifEncoder<AtomicFile> {
    /// Begin a session writing to the file at `path`.
    ///
    /// The GIF only appears at `path` once [`finish`](Self::finish)
    /// succeeds. If the temporary file cannot be created the encoder stays
    /// in the created state.
    pub fn start_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        if self.state != SessionState::Created {
            return Err(GifError::invalid_state("start", self.state));
        }
        let sink = AtomicFile::create(path)?;
        self.start(sink)
    }
}

impl<S: GifSink> Default for GifEncoder<S> {
    fn default() -> Self {
        Self::new()
    }
}

/// Header, screen descriptor, global color table and optional loop extension.
fn write_preamble(
    out: &mut Vec<u8>,
    config: &EncoderConfig,
    palette: &Palette,
    (width, height): (u16, u16),
) -> Result<()> {
    debug_assert_eq!(palette.len(), PALETTE_SIZE);

    write_header(out)?;
    ScreenDescriptor { width, height }.write(out)?;
    write_color_table(out, palette)?;
    if let Some(count) = config.repeat.loop_count() {
        LoopExtension { count }.write(out)?;
    }
    Ok(())
}

/// Encode a sequence of frames into an in-memory GIF.
///
/// Unusable frames are skipped as in [`GifEncoder::add_frame`].
pub fn encode_to_vec<I>(frames: I, config: EncoderConfig) -> Result<Vec<u8>>
where
    I: IntoIterator<Item = Frame>,
{
    let mut encoder: GifEncoder<Vec<u8>> = GifEncoder::with_config(config);
    encoder.start(Vec::new())?;
    for frame in frames {
        encoder.add_frame(frame)?;
    }
    encoder.finish()
}
