//! Print job orchestrator.
//!
//! Owns the run's state machine and fails fast: the first fatal error moves
//! the job to [`JobState::Failed`] and is returned to the caller.

mod runner;
mod types;

pub use runner::PrintJobOrchestrator;
pub use types::{ErrorCategory, JobState, JobSummary, OrchestratorError};
