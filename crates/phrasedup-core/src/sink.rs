//! Report sinks.
//!
//! Writing a report is separated from producing it: a [`ReportSink`] hands
//! out a writer, the payload goes through it, and the writer is flushed and
//! released (RAII) before the byte count is reported. Failure is an ordinary
//! `io::Result`, never a partially-acknowledged write.

use std::io::{self, Write};

use camino::{Utf8Path, Utf8PathBuf};

/// Something that can provide a writable destination for a report.
pub trait ReportSink {
    /// The writer type this sink produces.
    type Writer: Write;

    /// Acquire the writable destination.
    ///
    /// # Errors
    ///
    /// Propagates the underlying I/O error when the destination cannot be
    /// opened.
    fn open(&self) -> io::Result<Self::Writer>;
}

/// Write `payload` through `sink`, flushing before release.
///
/// The writer is dropped whether or not the write succeeds, so the
/// destination is always released. Returns the number of bytes written.
///
/// # Errors
///
/// Propagates the first I/O error from opening, writing, or flushing.
pub fn write_report<S: ReportSink>(sink: &S, payload: &[u8]) -> io::Result<u64> {
    let mut writer = sink.open()?;
    writer.write_all(payload)?;
    writer.flush()?;
    Ok(payload.len() as u64)
}

/// Sink that creates (or truncates) a file at a fixed path.
#[derive(Debug, Clone)]
pub struct FileSink {
    path: Utf8PathBuf,
}

impl FileSink {
    /// Create a sink for `path`.
    pub fn new<P: AsRef<Utf8Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Destination path.
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }
}

impl ReportSink for FileSink {
    type Writer = std::fs::File;

    fn open(&self) -> io::Result<Self::Writer> {
        std::fs::File::create(self.path.as_std_path())
    }
}
