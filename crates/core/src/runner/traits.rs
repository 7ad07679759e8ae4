//! Trait definitions for the runner module.

use async_trait::async_trait;

use super::error::RunnerError;
use super::types::{CommandSpec, ExecutionOutcome};

/// Executes external commands one at a time.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Returns the name of this runner implementation.
    fn name(&self) -> &str;

    /// Runs `spec` to completion, timeout or launch failure.
    ///
    /// Outcomes that end the run (`TimedOut`, `LaunchFailed`) are returned
    /// as values; the caller decides what they mean.
    async fn run(&self, spec: &CommandSpec) -> Result<ExecutionOutcome, RunnerError>;
}
