//! Output sinks.
//!
//! A sink is a [`Write`] destination that is either *committed* once the
//! trailer has been written, or *discarded* if the session fails. Only a
//! committed sink counts as a valid GIF.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

/// Attempts at finding an unused temporary name before giving up.
const TEMP_ATTEMPTS: u32 = 64;

/// Per-process sequence number for temporary file names.
static TEMP_SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Destination for an encoded GIF.
pub trait GifSink: Write {
    /// What the caller gets back after a successful finish.
    type Output;

    /// Flush and publish the completed stream.
    fn commit(self) -> io::Result<Self::Output>;

    /// Drop the stream without publishing it.
    fn discard(self);
}

/// In-memory sink; the output is the encoded bytes.
impl GifSink for Vec<u8> {
    type Output = Vec<u8>;

    fn commit(self) -> io::Result<Vec<u8>> {
        Ok(self)
    }

    fn discard(self) {}
}

/// Sink over an arbitrary writer.
///
/// The writer is flushed on commit. Bytes already written cannot be taken
/// back on discard, so prefer [`AtomicFile`] for files.
#[derive(Debug)]
pub struct StreamSink<W: Write> {
    writer: W,
}

impl<W: Write> StreamSink<W> {
    /// Wrap a writer.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Get a reference to the underlying writer.
    pub fn get_ref(&self) -> &W {
        &self.writer
    }
}

impl<W: Write> Write for StreamSink<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.writer.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

impl<W: Write> GifSink for StreamSink<W> {
    type Output = W;

    fn commit(mut self) -> io::Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }

    fn discard(self) {}
}

/// File sink that only appears at its target path once complete.
///
/// Data goes to a hidden temporary file next to the target, named
/// `.<name>.<pid>.<seq>.tmp` and created exclusively: an existing file or
/// symlink at that name is never opened, so every sink owns its own
/// temporary file. [`commit`] syncs it and renames it into place;
/// discarding or dropping an uncommitted sink deletes the temporary file,
/// so a truncated GIF is never visible under the target name. When several
/// sinks commit to one target, the last commit wins.
///
/// [`commit`]: GifSink::commit
#[derive(Debug)]
pub struct AtomicFile {
    target: PathBuf,
    temp: PathBuf,
    file: Option<BufWriter<File>>,
}

impl AtomicFile {
    /// Create the temporary file for `target`.
    pub fn create(target: impl AsRef<Path>) -> io::Result<Self> {
        let target = target.as_ref().to_path_buf();
        let name = target
            .file_name()
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("not a file path: {}", target.display()),
                )
            })?
            .to_string_lossy()
            .into_owned();

        for _ in 0..TEMP_ATTEMPTS {
            let seq = TEMP_SEQUENCE.fetch_add(1, Ordering::Relaxed);
            let temp = target.with_file_name(temp_file_name(&name, seq));
            match create_exclusive(&temp) {
                Ok(file) => {
                    return Ok(Self {
                        target,
                        temp,
                        file: Some(BufWriter::new(file)),
                    });
                }
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                    log::debug!("Temporary file {} already exists, retrying", temp.display());
                }
                Err(e) => return Err(e),
            }
        }

        Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("no free temporary name next to {}", target.display()),
        ))
    }

    /// Final path of the GIF.
    pub fn target(&self) -> &Path {
        &self.target
    }

    /// Path being written until commit.
    pub fn temp_path(&self) -> &Path {
        &self.temp
    }

    fn file_mut(&mut self) -> io::Result<&mut BufWriter<File>> {
        self.file
            .as_mut()
            .ok_or_else(|| io::Error::other("sink already closed"))
    }
}

/// Hidden sibling name for the `seq`-th temporary file of this process.
fn temp_file_name(name: &str, seq: u64) -> String {
    format!(".{}.{}.{}.tmp", name, std::process::id(), seq)
}

/// Open a new file for writing, failing if anything already exists at `path`.
///
/// `create_new` refuses dangling and live symlinks alike, so nothing outside
/// the temporary file can be truncated.
fn create_exclusive(path: &Path) -> io::Result<File> {
    OpenOptions::new().write(true).create_new(true).open(path)
}

impl Write for AtomicFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file_mut()?.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file_mut()?.flush()
    }
}

impl GifSink for AtomicFile {
    type Output = PathBuf;

    fn commit(mut self) -> io::Result<PathBuf> {
        let Some(writer) = self.file.take() else {
            return Err(io::Error::other("sink already closed"));
        };
        let file = writer.into_inner().map_err(|e| e.into_error())?;
        file.sync_all()?;
        drop(file);

        // On failure the temp file is still removed by Drop
        fs::rename(&self.temp, &self.target)?;
        Ok(self.target.clone())
    }

    fn discard(self) {}
}

impl Drop for AtomicFile {
    fn drop(&mut self) {
        // Still open means never committed: remove the partial output.
        // After a successful rename the temp path no longer exists.
        self.file.take();
        if self.temp.exists() {
            let _ = fs::remove_file(&self.temp);
        }
    }
}
