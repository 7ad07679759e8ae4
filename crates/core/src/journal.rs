//! Append-only run log.
//!
//! Every record is written by opening the file in append mode, writing one
//! line, flushing and closing it again. No handle is held between writes, so
//! readers tailing the log never see a partial record.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Local;
use thiserror::Error;

/// `asctime`-style timestamp, e.g. `Mon Apr  1 09:30:00 2013`.
const TIMESTAMP_FORMAT: &str = "%a %b %e %H:%M:%S %Y";

/// Errors raised while appending to the run log.
#[derive(Debug, Error)]
pub enum LogError {
    #[error("Failed to append to run log {path}: {source}")]
    Append {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read run log {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Handle to the append-only run log.
///
/// Cloning is cheap; clones append to the same file.
#[derive(Debug, Clone)]
pub struct RunLog {
    path: PathBuf,
}

impl RunLog {
    /// Creates a log that appends to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends `msg` as one record, optionally prefixed with the local time.
    ///
    /// The record is durably appended before this returns.
    pub fn write(&self, msg: &str, timestamp: bool) -> Result<(), LogError> {
        let record = if timestamp {
            format!("{}: {}", Local::now().format(TIMESTAMP_FORMAT), msg)
        } else {
            msg.to_string()
        };

        let append = |record: &str| -> std::io::Result<()> {
            let mut file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.path)?;
            writeln!(file, "{record}")?;
            file.flush()
        };

        append(&record).map_err(|source| LogError::Append {
            path: self.path.clone(),
            source,
        })?;

        tracing::info!(target: "printjob::journal", "{}", msg.trim_end());
        Ok(())
    }

    /// Writes the banner that opens a run.
    pub fn start_run(&self, dry_run: bool) -> Result<(), LogError> {
        self.write("", false)?;
        self.write(" ======= Starting PrintJob =========", true)?;
        if dry_run {
            self.write(" ========== Debug Mode =============", true)?;
        }
        Ok(())
    }

    /// Writes the banner that closes a successful run.
    pub fn end_run(&self, dry_run: bool) -> Result<(), LogError> {
        self.write("", false)?;
        if dry_run {
            self.write(" =========== Debug Mode ============", true)?;
        }
        self.write(" ======== Printing complete ========", true)
    }

    /// Reads the whole log back. Used by tests and previews.
    pub fn read_all(&self) -> Result<String, LogError> {
        std::fs::read_to_string(&self.path).map_err(|source| LogError::Read {
            path: self.path.clone(),
            source,
        })
    }
}
