//! Error types for the job module.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building a job context.
#[derive(Debug, Error)]
pub enum JobError {
    /// Job id is not a number in range.
    #[error("jobid \"{value}\" should be a number 1..99999")]
    InvalidJobId { value: String },

    /// Job folder does not exist.
    #[error("Cannot find document folder \"{}\"", path.display())]
    FolderNotFound { path: PathBuf },

    /// No archive for the job in the folder.
    #[error("No file in folder with required name \"{}\"", path.display())]
    ArchiveNotFound { path: PathBuf },
}
