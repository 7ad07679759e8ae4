//! External command execution.
//!
//! [`CommandRunner`] is the seam between the orchestrator and the operating
//! system. [`ProcessRunner`] spawns real processes (or only logs them in
//! dry-run mode); tests substitute a mock.

mod error;
mod process;
mod traits;
mod types;

pub use error::RunnerError;
pub use process::ProcessRunner;
pub use traits::CommandRunner;
pub use types::{CommandSpec, ExecutionOutcome, ExitInfo};
