//! Rotating file sink
//!
//! Owns the active output file and its creation instant. Exactly one sink
//! is open at a time and only the writer task touches it: created on start
//! and on each rotation, closed on rotation and on stop.

use crate::constants::{FILE_EXTENSION, FILE_TIMESTAMP_FORMAT};
use crate::error::{LoggerError, Result};
use chrono::Local;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::fs::{self, File, OpenOptions};
use tokio::io::{AsyncWriteExt, BufWriter};

/// The currently open output file
pub(crate) struct FileSink {
    dir: PathBuf,
    path: PathBuf,
    writer: BufWriter<File>,
    created_at: Instant,
}

impl FileSink {
    /// Open a fresh timestamped file under `dir`, creating `dir` if needed
    pub(crate) async fn create(dir: &Path) -> Result<Self> {
        fs::create_dir_all(dir)
            .await
            .map_err(|e| io_error(dir, e))?;

        let name = format!(
            "{}.{}",
            Local::now().format(FILE_TIMESTAMP_FORMAT),
            FILE_EXTENSION
        );
        let path = dir.join(name);

        // Append mode: a rotation landing on the same instant reuses the
        // file instead of truncating it.
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await
            .map_err(|e| io_error(&path, e))?;

        Ok(Self {
            dir: dir.to_path_buf(),
            path,
            writer: BufWriter::new(file),
            created_at: Instant::now(),
        })
    }

    /// Elapsed lifetime of the active file
    pub(crate) fn age(&self) -> Duration {
        self.created_at.elapsed()
    }

    /// Path of the active file
    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record plus a line separator (no flush)
    pub(crate) async fn write_record(&mut self, record: &str) -> Result<()> {
        self.writer
            .write_all(record.as_bytes())
            .await
            .map_err(|e| io_error(&self.path, e))?;
        self.writer
            .write_all(b"\n")
            .await
            .map_err(|e| io_error(&self.path, e))
    }

    /// Push buffered records down to the file
    pub(crate) async fn flush(&mut self) -> Result<()> {
        self.writer
            .flush()
            .await
            .map_err(|e| io_error(&self.path, e))
    }

    /// Close the active file and open a fresh one in the same directory
    ///
    /// The writer task is the sole caller, so no write can land between
    /// the close and the create.
    pub(crate) async fn rotate(&mut self) -> Result<()> {
        self.writer
            .shutdown()
            .await
            .map_err(|e| io_error(&self.path, e))?;

        let dir = self.dir.clone();
        *self = Self::create(&dir).await?;
        Ok(())
    }

    /// Flush remaining records and close; consumes the sink
    pub(crate) async fn close(mut self) -> Result<()> {
        self.writer
            .shutdown()
            .await
            .map_err(|e| io_error(&self.path, e))
    }
}

fn io_error(path: &Path, source: io::Error) -> LoggerError {
    LoggerError::Io {
        path: path.to_path_buf(),
        source,
    }
}
