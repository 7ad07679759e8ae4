//! Print job orchestrator implementation.
//!
//! Drives one job through its states, strictly in order:
//! - Extract the archive (waits for the extractor to exit)
//! - Check the extracted report is present
//! - Either display the report, or print each document in range, one at a time

use tracing::{info, warn};

use crate::command::CommandBuilder;
use crate::job::{DocumentRange, JobContext, JobError, RunContext, RunMode};
use crate::report::{load_document_list, ListSource};
use crate::runner::{CommandRunner, CommandSpec, ExecutionOutcome};

use super::types::{JobState, JobSummary, OrchestratorError};

/// Runs a single print job to completion or to its first fatal error.
pub struct PrintJobOrchestrator<R: CommandRunner> {
    runner: R,
    builder: CommandBuilder,
    job: JobContext,
    ctx: RunContext,
    list_source: ListSource,
    state: JobState,
}

impl<R: CommandRunner> PrintJobOrchestrator<R> {
    pub fn new(runner: R, builder: CommandBuilder, job: JobContext, ctx: RunContext) -> Self {
        Self {
            runner,
            builder,
            job,
            ctx,
            list_source: ListSource::default(),
            state: JobState::Init,
        }
    }

    /// Reads documents from `source` instead of the HTML report.
    pub fn with_list_source(mut self, source: ListSource) -> Self {
        self.list_source = source;
        self
    }

    pub fn state(&self) -> JobState {
        self.state
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Runs the job. On error the state is `Failed` and nothing further runs.
    ///
    /// An orchestrator runs once; calling this again is an invalid transition.
    pub async fn run(&mut self) -> Result<JobSummary, OrchestratorError> {
        match self.drive().await {
            Ok(summary) => Ok(summary),
            Err(e) => {
                if !self.state.is_terminal() {
                    self.state = JobState::Failed;
                }
                Err(e)
            }
        }
    }

    async fn drive(&mut self) -> Result<JobSummary, OrchestratorError> {
        if self.state != JobState::Init {
            return Err(OrchestratorError::InvalidTransition {
                from: self.state,
                to: JobState::Extracted,
            });
        }

        self.ctx.log.start_run(self.ctx.dry_run)?;
        info!(job_id = %self.job.job_id(), dry_run = self.ctx.dry_run, "Starting print job");

        self.extract().await?;
        self.transition(JobState::Extracted)?;

        self.validate()?;
        self.transition(JobState::Validated)?;

        let summary = match self.job.mode() {
            RunMode::ReportOnly => {
                self.transition(JobState::ReportOnly)?;
                self.show_report().await?
            }
            RunMode::Print => {
                self.transition(JobState::Printing)?;
                self.print_documents().await?
            }
        };

        self.transition(JobState::Done)?;
        self.ctx.log.end_run(self.ctx.dry_run)?;
        info!(
            job_id = %self.job.job_id(),
            printed = summary.documents_printed,
            "Print job complete"
        );

        Ok(JobSummary {
            state: self.state,
            ..summary
        })
    }

    fn transition(&mut self, next: JobState) -> Result<(), OrchestratorError> {
        if !self.state.can_transition_to(next) {
            return Err(OrchestratorError::InvalidTransition {
                from: self.state,
                to: next,
            });
        }
        self.state = next;
        Ok(())
    }

    async fn extract(&self) -> Result<(), OrchestratorError> {
        let archive = &self.job.layout().archive_path;
        if !archive.is_file() {
            return Err(JobError::ArchiveNotFound {
                path: archive.clone(),
            }
            .into());
        }

        let spec = self
            .builder
            .extract_command(&self.job)?
            .with_label("Extracting files");
        self.execute(&spec).await
    }

    fn validate(&self) -> Result<(), OrchestratorError> {
        let report = &self.job.layout().report_path;
        if !report.is_file() {
            return Err(OrchestratorError::ReportMissing {
                path: report.clone(),
            });
        }
        Ok(())
    }

    async fn show_report(&self) -> Result<JobSummary, OrchestratorError> {
        let spec = self.builder.report_command(&self.job)?;
        self.execute(&spec).await?;

        Ok(JobSummary {
            state: self.state,
            documents_listed: 0,
            documents_printed: 0,
            range: None,
        })
    }

    async fn print_documents(&self) -> Result<JobSummary, OrchestratorError> {
        let layout = self.job.layout();
        let list_path = match self.list_source {
            ListSource::Report => &layout.report_path,
            ListSource::FileList => &layout.file_list_path,
        };
        let documents = load_document_list(list_path, self.list_source)?;

        let requested = self.job.range();
        let Some(positions) = requested.clamp(documents.len()) else {
            warn!(
                listed = documents.len(),
                requested = %requested,
                "Requested range selects no documents"
            );
            self.ctx.log.write(
                &format!(
                    "Got {} documents: Nothing in requested range {}",
                    documents.len(),
                    requested
                ),
                true,
            )?;
            return Ok(JobSummary {
                state: self.state,
                documents_listed: documents.len(),
                documents_printed: 0,
                range: None,
            });
        };

        let range = DocumentRange::new(*positions.start() as i64, *positions.end() as i64);
        self.ctx.log.write(
            &format!("Got {} documents: Printing docs {}", documents.len(), range),
            true,
        )?;

        let mut printed = 0;
        for position in positions {
            let Some(entry) = documents.get(position) else {
                break;
            };
            let spec = self
                .builder
                .print_command(entry, &self.job)
                .map_err(|source| OrchestratorError::Dispatch { position, source })?
                .with_label(format!("{position:>3}: {}", entry.description));
            self.execute(&spec).await?;
            printed += 1;
        }

        Ok(JobSummary {
            state: self.state,
            documents_listed: documents.len(),
            documents_printed: printed,
            range: Some(range),
        })
    }

    async fn execute(&self, spec: &CommandSpec) -> Result<(), OrchestratorError> {
        match self.runner.run(spec).await? {
            ExecutionOutcome::Completed(_) => Ok(()),
            ExecutionOutcome::TimedOut => Err(OrchestratorError::Timeout {
                command: spec.command_line(),
                secs: spec.timeout_secs,
            }),
            ExecutionOutcome::LaunchFailed(reason) => Err(OrchestratorError::LaunchFailed {
                command: spec.command_line(),
                reason,
            }),
        }
    }
}
