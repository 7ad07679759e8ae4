//! Types for the runner module.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// One external command, ready to run.
///
/// `executable` and each argument are command line fragments: they are
/// joined with single spaces, so paths must already be quoted and a single
/// fragment may hold several configured words.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandSpec {
    pub executable: String,
    #[serde(default)]
    pub arguments: Vec<String>,
    /// Seconds to wait for the process; 0 waits forever.
    #[serde(default)]
    pub timeout_secs: u64,
    /// Shown in the run log above the command line.
    #[serde(default)]
    pub label: Option<String>,
    /// Directory the process starts in; the caller's when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub working_dir: Option<PathBuf>,
}

impl CommandSpec {
    pub fn new(executable: impl Into<String>) -> Self {
        Self {
            executable: executable.into(),
            arguments: Vec::new(),
            timeout_secs: 0,
            label: None,
            working_dir: None,
        }
    }

    /// Appends a fragment.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.arguments.push(arg.into());
        self
    }

    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Executable followed by arguments, skipping blank fragments.
    pub fn fragments(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.executable.as_str())
            .chain(self.arguments.iter().map(String::as_str))
            .map(str::trim)
            .filter(|f| !f.is_empty())
    }

    /// The full command line as logged and executed.
    pub fn command_line(&self) -> String {
        self.fragments().collect::<Vec<_>>().join(" ")
    }

    /// Wait limit, `None` when unbounded.
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}

/// Exit details of a finished process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExitInfo {
    /// Exit code, if the process exited normally.
    pub code: Option<i32>,
    /// True when nothing was spawned (dry run).
    pub simulated: bool,
}

impl ExitInfo {
    pub fn exited(code: Option<i32>) -> Self {
        Self {
            code,
            simulated: false,
        }
    }

    pub fn simulated() -> Self {
        Self {
            code: None,
            simulated: true,
        }
    }
}

/// Terminal state of one command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "detail", rename_all = "snake_case")]
pub enum ExecutionOutcome {
    /// The process ended, whatever its exit code.
    Completed(ExitInfo),
    /// The process outlived its timeout and was killed.
    TimedOut,
    /// The process could not be started.
    LaunchFailed(String),
}

impl ExecutionOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed(_))
    }
}
