//! Per-run parameters handed to the orchestrator.

use std::path::PathBuf;

use super::error::JobError;
use super::types::{DocumentRange, JobId, JobLayout, RunMode};
use crate::journal::RunLog;
use crate::quoting::dequote;

/// Unvalidated run parameters, as resolved from flags and configuration.
#[derive(Debug, Clone)]
pub struct JobParams {
    pub job_id: JobId,
    pub folder: PathBuf,
    pub printer: String,
    pub range: DocumentRange,
    pub mode: RunMode,
    pub archive_extension: String,
}

/// Validated parameters for one run. Immutable once built.
#[derive(Debug, Clone)]
pub struct JobContext {
    job_id: JobId,
    layout: JobLayout,
    printer: String,
    range: DocumentRange,
    mode: RunMode,
}

impl JobContext {
    /// Validates `params` against the filesystem.
    ///
    /// The folder must be a directory and must hold the job's archive.
    pub fn new(params: JobParams) -> Result<Self, JobError> {
        let folder = PathBuf::from(dequote(&params.folder.to_string_lossy()));
        if !folder.is_dir() {
            return Err(JobError::FolderNotFound { path: folder });
        }

        let layout = JobLayout::new(&folder, params.job_id, &params.archive_extension);
        if !layout.archive_path.is_file() {
            return Err(JobError::ArchiveNotFound {
                path: layout.archive_path,
            });
        }

        Ok(Self {
            job_id: params.job_id,
            layout,
            printer: params.printer,
            range: params.range,
            mode: params.mode,
        })
    }

    pub fn job_id(&self) -> JobId {
        self.job_id
    }

    pub fn layout(&self) -> &JobLayout {
        &self.layout
    }

    pub fn printer(&self) -> &str {
        &self.printer
    }

    pub fn range(&self) -> DocumentRange {
        self.range
    }

    pub fn mode(&self) -> RunMode {
        self.mode
    }
}

/// Run-wide settings shared by every component that logs or spawns.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub log: RunLog,
    /// Log commands without spawning them.
    pub dry_run: bool,
}

impl RunContext {
    pub fn new(log: RunLog, dry_run: bool) -> Self {
        Self { log, dry_run }
    }
}
