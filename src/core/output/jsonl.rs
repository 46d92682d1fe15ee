//! Line-delimited JSON output
//!
//! One [`FlatRecord`] per line, UTF-8, `\n` terminated. Files are opened in
//! append mode so repeated runs accumulate records.

use crate::domain::{CafetchError, FlatRecord, Result, ResultExt};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Destination for flattened records
pub trait RecordSink {
    /// Append one record
    fn write(&mut self, record: &FlatRecord) -> Result<()>;

    /// Flush and release the destination; further writes fail
    fn close(&mut self) -> Result<()>;
}

/// Append-only JSONL file writer
#[derive(Debug)]
pub struct JsonlWriter {
    path: PathBuf,
    writer: Option<BufWriter<File>>,
    written: u64,
}

impl JsonlWriter {
    /// Open `path` for appending, creating it and its parent directories
    ///
    /// # Errors
    ///
    /// Returns an `Io` error naming the path if a directory or the file
    /// cannot be created.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("Failed to open {}", path.display()))?;

        tracing::debug!(path = %path.display(), "Opened JSONL output");

        Ok(Self {
            path,
            writer: Some(BufWriter::new(file)),
            written: 0,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Records written through this writer
    pub fn written(&self) -> u64 {
        self.written
    }
}

impl RecordSink for JsonlWriter {
    fn write(&mut self, record: &FlatRecord) -> Result<()> {
        let writer = self.writer.as_mut().ok_or_else(|| {
            CafetchError::Io(format!("{} is already closed", self.path.display()))
        })?;

        serde_json::to_writer(&mut *writer, record)?;
        writer.write_all(b"\n")?;
        self.written += 1;
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        if let Some(mut writer) = self.writer.take() {
            writer
                .flush()
                .with_context(|| format!("Failed to flush {}", self.path.display()))?;
            tracing::debug!(path = %self.path.display(), records = self.written, "Closed JSONL output");
        }
        Ok(())
    }
}

impl Drop for JsonlWriter {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            tracing::warn!(error = %e, "Failed to close JSONL output");
        }
    }
}
