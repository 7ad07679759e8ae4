//! Value types describing one print job.

use std::fmt;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::error::JobError;

/// Numeric print job identifier, always within `1..=99999`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct JobId(u32);

impl JobId {
    pub const MIN: u32 = 1;
    pub const MAX: u32 = 99_999;

    pub fn new(id: u32) -> Result<Self, JobError> {
        if (Self::MIN..=Self::MAX).contains(&id) {
            Ok(Self(id))
        } else {
            Err(JobError::InvalidJobId { value: id.to_string() })
        }
    }

    /// Parses a job id as typed by an operator, e.g. `29` or `00029`.
    pub fn parse(value: &str) -> Result<Self, JobError> {
        value
            .trim()
            .parse::<u32>()
            .map_err(|_| JobError::InvalidJobId {
                value: value.to_string(),
            })
            .and_then(|id| {
                Self::new(id).map_err(|_| JobError::InvalidJobId {
                    value: value.to_string(),
                })
            })
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// Five digit, zero padded form used in file names.
    pub fn padded(self) -> String {
        format!("{:05}", self.0)
    }
}

impl TryFrom<u32> for JobId {
    type Error = JobError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<JobId> for u32 {
    fn from(id: JobId) -> Self {
        id.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where a job's files live, derived from the folder and job id.
///
/// ```text
/// <folder>/PrintJob00029.tar
/// <folder>/PrintJobs/PrintJob00029/PrintJobReport00029.html
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobLayout {
    pub folder: PathBuf,
    pub archive_path: PathBuf,
    pub data_dir: PathBuf,
    pub report_path: PathBuf,
    pub file_list_path: PathBuf,
}

impl JobLayout {
    pub fn new(folder: &Path, job_id: JobId, archive_extension: &str) -> Self {
        let padded = job_id.padded();
        let extension = archive_extension.trim_start_matches('.');
        let data_dir = folder.join("PrintJobs").join(format!("PrintJob{padded}"));

        Self {
            folder: folder.to_path_buf(),
            archive_path: folder.join(format!("PrintJob{padded}.{extension}")),
            report_path: data_dir.join(format!("PrintJobReport{padded}.html")),
            file_list_path: data_dir.join("PrintJobFiles.txt"),
            data_dir,
        }
    }

    /// Absolute path of a document named in the job's list.
    pub fn document_path(&self, name: &str) -> PathBuf {
        self.data_dir.join(name)
    }
}

/// Whether a run prints documents or only shows the report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunMode {
    #[default]
    Print,
    ReportOnly,
}

/// Requested inclusive, 1-based document range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRange {
    pub start: i64,
    pub end: i64,
}

impl Default for DocumentRange {
    fn default() -> Self {
        Self {
            start: 1,
            end: 999_999,
        }
    }
}

impl DocumentRange {
    pub fn new(start: i64, end: i64) -> Self {
        Self { start, end }
    }

    /// Clamps both ends into `[1, len]`.
    ///
    /// Returns `None` when the list is empty or the clamped range is
    /// inverted, meaning nothing is printed.
    pub fn clamp(&self, len: usize) -> Option<RangeInclusive<usize>> {
        if len == 0 {
            return None;
        }
        let len = i64::try_from(len).unwrap_or(i64::MAX);
        let start = self.start.clamp(1, len);
        let end = self.end.clamp(1, len);
        if start > end {
            return None;
        }
        Some(start as usize..=end as usize)
    }
}

impl fmt::Display for DocumentRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.start, self.end)
    }
}
