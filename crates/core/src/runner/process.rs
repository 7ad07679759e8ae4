//! Runner that spawns real processes.

use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, warn};

use super::error::RunnerError;
use super::traits::CommandRunner;
use super::types::{CommandSpec, ExecutionOutcome, ExitInfo};
use crate::job::RunContext;
use crate::quoting::split_command_line;

/// Runs commands as child processes and logs each one before it starts.
///
/// In dry-run mode nothing is spawned: the command is logged and reported
/// as a simulated completion.
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    ctx: RunContext,
    max_argument_len: usize,
}

impl ProcessRunner {
    pub fn new(ctx: RunContext, max_argument_len: usize) -> Self {
        Self {
            ctx,
            max_argument_len,
        }
    }

    fn log_command(&self, spec: &CommandSpec, line: &str) -> Result<(), RunnerError> {
        let record = match &spec.label {
            Some(label) => format!("\n{label}:\n    {line}"),
            None => line.to_string(),
        };
        self.ctx.log.write(&record, false)?;
        Ok(())
    }

    fn check_size(&self, spec: &CommandSpec) -> Result<(), RunnerError> {
        if let Some(len) = spec
            .fragments()
            .map(str::len)
            .find(|len| *len > self.max_argument_len)
        {
            return Err(RunnerError::CommandTooLarge {
                len,
                limit: self.max_argument_len,
            });
        }
        Ok(())
    }
}

#[async_trait]
impl CommandRunner for ProcessRunner {
    fn name(&self) -> &str {
        "process"
    }

    async fn run(&self, spec: &CommandSpec) -> Result<ExecutionOutcome, RunnerError> {
        let line = spec.command_line();
        self.log_command(spec, &line)?;

        if self.ctx.dry_run {
            debug!(command = %line, "Dry run, not spawning");
            return Ok(ExecutionOutcome::Completed(ExitInfo::simulated()));
        }

        self.check_size(spec)?;

        let argv = split_command_line(&line);
        let Some((program, args)) = argv.split_first() else {
            return Ok(ExecutionOutcome::LaunchFailed("empty command".to_string()));
        };

        let mut command = Command::new(program);
        command.args(args).stdin(Stdio::null()).kill_on_drop(true);
        if let Some(dir) = &spec.working_dir {
            command.current_dir(dir);
        }

        let mut child = match command.spawn() {
            Ok(child) => child,
            Err(e) => {
                warn!(program = %program, error = %e, "Failed to start process");
                return Ok(ExecutionOutcome::LaunchFailed(e.to_string()));
            }
        };

        let status = match spec.timeout() {
            Some(limit) => match timeout(limit, child.wait()).await {
                Ok(status) => status,
                Err(_) => {
                    let _ = child.kill().await;
                    warn!(command = %line, timeout_secs = spec.timeout_secs, "Process timed out");
                    return Ok(ExecutionOutcome::TimedOut);
                }
            },
            None => child.wait().await,
        }
        .map_err(RunnerError::Wait)?;

        if !status.success() {
            warn!(command = %line, code = ?status.code(), "Process exited with non-zero status");
        }

        Ok(ExecutionOutcome::Completed(ExitInfo::exited(status.code())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::journal::RunLog;
    use tempfile::TempDir;

    fn runner(dir: &TempDir, dry_run: bool) -> (ProcessRunner, RunLog) {
        let log = RunLog::new(dir.path().join("run.log"));
        let ctx = RunContext::new(log.clone(), dry_run);
        (ProcessRunner::new(ctx, 1024), log)
    }

    #[tokio::test]
    async fn test_dry_run_logs_without_spawning() {
        let dir = TempDir::new().unwrap();
        let (runner, log) = runner(&dir, true);
        let spec = CommandSpec::new("\"/does/not/exist\"")
            .arg("\"a b.pdf\"")
            .with_label("  1: Androgen receptors");

        let outcome = runner.run(&spec).await.unwrap();

        assert_eq!(outcome, ExecutionOutcome::Completed(ExitInfo::simulated()));
        assert_eq!(
            log.read_all().unwrap(),
            "\n  1: Androgen receptors:\n    \"/does/not/exist\" \"a b.pdf\"\n"
        );
    }

    #[tokio::test]
    async fn test_oversized_fragment_is_rejected_after_logging() {
        let dir = TempDir::new().unwrap();
        let (runner, log) = runner(&dir, false);
        let spec = CommandSpec::new("tool").arg("x".repeat(2000));

        let err = runner.run(&spec).await.unwrap_err();

        assert!(matches!(
            err,
            RunnerError::CommandTooLarge {
                len: 2000,
                limit: 1024
            }
        ));
        assert!(log.read_all().unwrap().starts_with("tool xxx"));
    }

    #[tokio::test]
    async fn test_dry_run_ignores_fragment_limit() {
        let dir = TempDir::new().unwrap();
        let (runner, log) = runner(&dir, true);
        let document = format!("\"/{}/a.pdf\"", "d".repeat(1100));
        let spec = CommandSpec::new("pdfprint").arg(document.clone());

        let outcome = runner.run(&spec).await.unwrap();

        assert_eq!(outcome, ExecutionOutcome::Completed(ExitInfo::simulated()));
        assert!(log.read_all().unwrap().contains(&document));
    }

    #[tokio::test]
    async fn test_missing_program_is_launch_failure() {
        let dir = TempDir::new().unwrap();
        let (runner, _log) = runner(&dir, false);
        let spec = CommandSpec::new("\"/nonexistent/printjob-tool\"");

        let outcome = runner.run(&spec).await.unwrap();
        assert!(matches!(outcome, ExecutionOutcome::LaunchFailed(_)));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_non_zero_exit_still_completes() {
        let dir = TempDir::new().unwrap();
        let (runner, _log) = runner(&dir, false);
        let spec = CommandSpec::new("sh").arg("-c").arg("\"exit 3\"");

        let outcome = runner.run(&spec).await.unwrap();
        assert_eq!(outcome, ExecutionOutcome::Completed(ExitInfo::exited(Some(3))));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_runs_in_working_dir() {
        let dir = TempDir::new().unwrap();
        let work = TempDir::new().unwrap();
        let (runner, _log) = runner(&dir, false);
        let spec = CommandSpec::new("sh")
            .arg("-c")
            .arg("\"touch extracted.marker\"")
            .with_working_dir(work.path());

        let outcome = runner.run(&spec).await.unwrap();

        assert!(outcome.is_completed());
        assert!(work.path().join("extracted.marker").is_file());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_timeout_kills_process() {
        let dir = TempDir::new().unwrap();
        let (runner, _log) = runner(&dir, false);
        let spec = CommandSpec::new("sh")
            .arg("-c")
            .arg("\"sleep 5\"")
            .with_timeout(1);

        let started = std::time::Instant::now();
        let outcome = runner.run(&spec).await.unwrap();

        assert_eq!(outcome, ExecutionOutcome::TimedOut);
        assert!(started.elapsed() < std::time::Duration::from_secs(4));
    }
}
