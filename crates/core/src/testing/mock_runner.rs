//! Mock command runner for testing.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::journal::RunLog;
use crate::runner::{CommandRunner, CommandSpec, ExecutionOutcome, ExitInfo, RunnerError};

/// Mock implementation of the CommandRunner trait.
///
/// Provides controllable behavior for testing:
/// - Records every command it is asked to run
/// - Returns scripted outcomes in order, then `Completed` with exit code 0
/// - Fails the next call with a configured error
///
/// Clones share state, so a clone kept by the test sees the calls made
/// through the orchestrator's copy.
///
/// # Example
///
/// ```rust,ignore
/// use printjob_core::testing::MockRunner;
///
/// let runner = MockRunner::new();
/// runner.push_outcome(ExecutionOutcome::TimedOut).await;
///
/// let mut orchestrator = PrintJobOrchestrator::new(runner.clone(), builder, job, ctx);
/// assert!(orchestrator.run().await.is_err());
/// assert_eq!(runner.call_count().await, 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockRunner {
    /// Commands received, in order.
    recorded: Arc<RwLock<Vec<CommandSpec>>>,
    /// Outcomes to return before falling back to success.
    outcomes: Arc<RwLock<VecDeque<ExecutionOutcome>>>,
    /// If set, the next call will fail with this error.
    next_error: Arc<RwLock<Option<RunnerError>>>,
    /// If set, commands are written here like the real runner does.
    log: Option<RunLog>,
}

impl MockRunner {
    /// Create a new mock runner.
    pub fn new() -> Self {
        Self::default()
    }

    /// Also append each command line to `log`.
    pub fn with_log(mut self, log: RunLog) -> Self {
        self.log = Some(log);
        self
    }

    /// Get all recorded commands.
    pub async fn recorded(&self) -> Vec<CommandSpec> {
        self.recorded.read().await.clone()
    }

    /// Get the recorded command lines.
    pub async fn command_lines(&self) -> Vec<String> {
        self.recorded
            .read()
            .await
            .iter()
            .map(CommandSpec::command_line)
            .collect()
    }

    pub async fn call_count(&self) -> usize {
        self.recorded.read().await.len()
    }

    /// Queue an outcome for a future call.
    pub async fn push_outcome(&self, outcome: ExecutionOutcome) {
        self.outcomes.write().await.push_back(outcome);
    }

    /// Make the next call fail with the given error.
    pub async fn set_next_error(&self, error: RunnerError) {
        *self.next_error.write().await = Some(error);
    }
}

#[async_trait]
impl CommandRunner for MockRunner {
    fn name(&self) -> &str {
        "mock"
    }

    async fn run(&self, spec: &CommandSpec) -> Result<ExecutionOutcome, RunnerError> {
        self.recorded.write().await.push(spec.clone());

        if let Some(log) = &self.log {
            let line = spec.command_line();
            let record = match &spec.label {
                Some(label) => format!("\n{label}:\n    {line}"),
                None => line,
            };
            log.write(&record, false)?;
        }

        if let Some(error) = self.next_error.write().await.take() {
            return Err(error);
        }

        Ok(self
            .outcomes
            .write()
            .await
            .pop_front()
            .unwrap_or(ExecutionOutcome::Completed(ExitInfo::exited(Some(0)))))
    }
}
