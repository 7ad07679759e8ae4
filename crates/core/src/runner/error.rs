//! Error types for the runner module.

use thiserror::Error;

use crate::journal::LogError;

/// Errors that stop a command before an outcome is known.
#[derive(Debug, Error)]
pub enum RunnerError {
    /// A command line fragment exceeds the configured limit.
    #[error("Command exceeds maximum size: fragment of {len} bytes, limit {limit}")]
    CommandTooLarge { len: usize, limit: usize },

    /// The command could not be written to the run log.
    #[error(transparent)]
    Log(#[from] LogError),

    /// Waiting on the child process failed.
    #[error("Failed to wait for process: {0}")]
    Wait(#[source] std::io::Error),
}
