//! # panel-log
//!
//! Append-only flat log file store.
//!
//! One record per line, no rotation, no indexing, no size cap. Reads
//! return the entire file as one opaque string. No concurrent-write
//! protection is provided beyond OS-level append-mode atomicity; writes
//! are expected to come from the single request-dispatch path.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::warn;

/// Errors that can occur during log file operations.
///
/// A missing file on read is not an error; it yields empty contents.
#[derive(Debug, Error)]
pub enum LogError {
    /// Failed to open or append to the log file.
    #[error("failed to append to log file: {0}")]
    Write(#[source] io::Error),

    /// Failed to read the log file.
    #[error("failed to read log file: {0}")]
    Read(#[source] io::Error),
}

/// Append-only log store bound to a fixed file path.
#[derive(Debug, Clone)]
pub struct LogStore {
    path: PathBuf,
}

impl LogStore {
    /// Create a store for the given path. The file itself is created
    /// lazily on first append.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The log file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one newline-terminated record.
    ///
    /// Opens in append mode, creating the file if absent. The handle is
    /// released when this returns, on success and failure alike.
    pub fn append(&self, text: &str) -> Result<(), LogError> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(LogError::Write)?;
        writeln!(file, "{text}").map_err(LogError::Write)
    }

    /// Read the entire log file contents.
    ///
    /// A missing file is logged as a non-fatal condition and yields an
    /// empty string; any other I/O failure is an error.
    pub fn read_all(&self) -> Result<String, LogError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(contents),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                warn!(path = %self.path.display(), "log file does not exist");
                Ok(String::new())
            }
            Err(e) => Err(LogError::Read(e)),
        }
    }
}
