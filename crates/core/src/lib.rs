pub mod command;
pub mod config;
pub mod job;
pub mod journal;
pub mod orchestrator;
pub mod quoting;
pub mod report;
pub mod runner;
pub mod testing;

pub use command::{CommandBuilder, CommandError, DocumentKind};
pub use config::{
    load_config, load_config_file, load_config_from_str, store_config, validate_config, Config,
    ConfigError, ConfigUpdate,
};
pub use job::{DocumentRange, JobContext, JobError, JobId, JobParams, RunContext, RunMode};
pub use journal::{LogError, RunLog};
pub use orchestrator::{ErrorCategory, JobState, JobSummary, OrchestratorError, PrintJobOrchestrator};
pub use report::{DocumentEntry, DocumentList, ListSource, ResolveError};
pub use runner::{CommandRunner, CommandSpec, ExecutionOutcome, ProcessRunner, RunnerError};
