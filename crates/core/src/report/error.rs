//! Error types for the report module.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while resolving the document list.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The report file is missing.
    #[error("Report file not found: {path}")]
    ReportNotFound { path: PathBuf },

    /// The report file exists but could not be read.
    #[error("Could not read report file {path}: {source}")]
    ReportUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A list item opens but never closes.
    #[error("Malformed list item at byte {offset}: {reason}")]
    MalformedItem { offset: usize, reason: &'static str },

    /// A list item resolved to an empty document name.
    #[error("List item {position} has no document name")]
    EmptyName { position: usize },

    /// No list items were found.
    #[error("Nothing to print in this print job")]
    Empty,
}

impl ResolveError {
    pub(crate) fn malformed(offset: usize, reason: &'static str) -> Self {
        Self::MalformedItem { offset, reason }
    }
}
