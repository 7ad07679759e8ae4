//! Types for the print job orchestrator.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::command::CommandError;
use crate::config::ConfigError;
use crate::job::{DocumentRange, JobError};
use crate::journal::LogError;
use crate::report::ResolveError;
use crate::runner::RunnerError;

/// Stage of a print job run.
///
/// Runs move forward only:
/// `Init -> Extracted -> Validated -> (ReportOnly | Printing) -> Done`.
/// Any non-terminal state may move to `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobState {
    Init,
    Extracted,
    Validated,
    ReportOnly,
    Printing,
    Done,
    Failed,
}

impl JobState {
    pub fn can_transition_to(self, next: JobState) -> bool {
        use JobState::*;
        match (self, next) {
            (Done | Failed, _) => false,
            (_, Failed) => true,
            (Init, Extracted)
            | (Extracted, Validated)
            | (Validated, ReportOnly)
            | (Validated, Printing)
            | (ReportOnly, Done)
            | (Printing, Done) => true,
            _ => false,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, JobState::Done | JobState::Failed)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            JobState::Init => "init",
            JobState::Extracted => "extracted",
            JobState::Validated => "validated",
            JobState::ReportOnly => "report_only",
            JobState::Printing => "printing",
            JobState::Done => "done",
            JobState::Failed => "failed",
        }
    }
}

impl fmt::Display for JobState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a completed run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobSummary {
    pub state: JobState,
    /// Entries in the document list; 0 in report-only runs.
    pub documents_listed: usize,
    /// Print commands completed (or simulated in a dry run).
    pub documents_printed: usize,
    /// Effective range after clamping, if anything was in range.
    pub range: Option<DocumentRange>,
}

/// Operator-facing classification of a fatal error. None is retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Missing or invalid setting, job id, archive, report or tool.
    Configuration,
    /// Unparseable or empty document list.
    Resolution,
    /// Document with no print tool for its extension.
    Dispatch,
    /// Launch failure, timeout or other failure while running a command.
    Execution,
}

/// Errors that end a print job run.
#[derive(Debug, Error)]
pub enum OrchestratorError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Job(#[from] JobError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Command(#[from] CommandError),

    #[error(transparent)]
    Runner(#[from] RunnerError),

    #[error(transparent)]
    Log(#[from] LogError),

    /// Extraction finished but the report it should have produced is absent.
    #[error("Extraction succeeded but expected report \"{}\" is missing", path.display())]
    ReportMissing { path: PathBuf },

    /// A document could not be turned into a print command.
    #[error("{source}. Printing stopped on document number {position}")]
    Dispatch {
        position: usize,
        #[source]
        source: CommandError,
    },

    #[error("Command timed out after {secs} seconds: {command}")]
    Timeout { command: String, secs: u64 },

    #[error("Unable to start command \"{command}\": {reason}")]
    LaunchFailed { command: String, reason: String },

    #[error("Invalid job state transition from {from} to {to}")]
    InvalidTransition { from: JobState, to: JobState },
}

impl OrchestratorError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Config(_) | Self::Job(_) | Self::ReportMissing { .. } => {
                ErrorCategory::Configuration
            }
            Self::Resolve(ResolveError::ReportNotFound { .. }) => ErrorCategory::Configuration,
            Self::Resolve(_) => ErrorCategory::Resolution,
            Self::Command(e) | Self::Dispatch { source: e, .. } => match e {
                CommandError::UnsupportedDocument { .. } => ErrorCategory::Dispatch,
                CommandError::MissingTool { .. } => ErrorCategory::Configuration,
            },
            Self::Runner(_)
            | Self::Log(_)
            | Self::Timeout { .. }
            | Self::LaunchFailed { .. }
            | Self::InvalidTransition { .. } => ErrorCategory::Execution,
        }
    }
}
