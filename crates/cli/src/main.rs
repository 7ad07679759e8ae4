use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use printjob_core::{
    load_config, load_config_file, store_config, validate_config, CommandBuilder, Config,
    ConfigUpdate, DocumentRange, JobContext, JobId, JobParams, OrchestratorError,
    PrintJobOrchestrator, ProcessRunner, RunContext, RunLog, RunMode,
};

const CONFIG_FILE: &str = "printjob.toml";
const LOG_FILE: &str = "printjob.log";

/// Extract a downloaded print job and print its documents in order.
#[derive(Parser, Debug)]
#[command(name = "run-print-job", version)]
struct Cli {
    /// Print job number, 1..99999
    #[arg(value_name = "JOB_ID")]
    job_id: Option<String>,

    /// Folder holding PrintJobNNNNN archives (overrides the stored default)
    #[arg(long, value_name = "DIR")]
    folder: Option<PathBuf>,

    /// Printer name (overrides the stored default)
    #[arg(long, value_name = "NAME")]
    printer: Option<String>,

    /// First document to print, 1-based
    #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
    start: i64,

    /// Last document to print
    #[arg(long, default_value_t = 999_999, allow_negative_numbers = true)]
    end: i64,

    /// Only display the job report; print nothing
    #[arg(long)]
    report: bool,

    /// Log commands without running them
    #[arg(long, visible_alias = "dry-run")]
    debug: bool,

    /// Configuration file
    #[arg(long, value_name = "FILE", env = "PRINTJOB_CONFIG")]
    config: Option<PathBuf>,

    /// Run log file
    #[arg(long, value_name = "FILE", env = "PRINTJOB_LOG")]
    log_file: Option<PathBuf>,

    #[command(flatten)]
    defaults: DefaultArgs,
}

/// Flags that change stored defaults instead of running a job.
#[derive(Args, Debug)]
struct DefaultArgs {
    /// Store the default job folder
    #[arg(id = "def_folder", long = "def-folder", value_name = "DIR")]
    folder: Option<PathBuf>,

    /// Store the default printer
    #[arg(id = "def_printer", long = "def-printer", value_name = "NAME")]
    printer: Option<String>,

    /// Store the PDF print program
    #[arg(long = "def-pdfprinter", value_name = "PATH")]
    pdf_printer: Option<String>,

    /// Store the PDF print program arguments
    #[arg(long = "def-pdfprintargs", value_name = "ARGS", allow_hyphen_values = true)]
    pdf_printer_args: Option<String>,

    /// Store the word processor print program
    #[arg(long = "def-docprinter", value_name = "PATH")]
    doc_printer: Option<String>,

    /// Store the word processor print program arguments
    #[arg(long = "def-docprintargs", value_name = "ARGS", allow_hyphen_values = true)]
    doc_printer_args: Option<String>,

    /// Store the archive extractor program
    #[arg(long = "def-untar", value_name = "PATH")]
    extractor: Option<String>,

    /// Store extra archive extractor arguments
    #[arg(long = "def-untarargs", value_name = "ARGS", allow_hyphen_values = true)]
    extractor_args: Option<String>,

    /// Store the report viewer program
    #[arg(long = "def-browser", value_name = "PATH")]
    browser: Option<String>,
}

impl From<DefaultArgs> for ConfigUpdate {
    fn from(args: DefaultArgs) -> Self {
        ConfigUpdate {
            folder: args.folder,
            printer: args.printer,
            pdf_printer: args.pdf_printer,
            pdf_printer_args: args.pdf_printer_args,
            doc_printer: args.doc_printer,
            doc_printer_args: args.doc_printer_args,
            extractor: args.extractor,
            extractor_args: args.extractor_args,
            browser: args.browser,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let log = RunLog::new(
        cli.log_file
            .clone()
            .unwrap_or_else(|| beside_executable(LOG_FILE)),
    );

    if let Err(e) = run(cli, &log).await {
        let message = format!("{e:#}");
        if let Some(err) = e.downcast_ref::<OrchestratorError>() {
            error!(category = ?err.category(), "Fatal error: {}", message);
        } else {
            error!("Fatal error: {}", message);
        }
        if let Err(log_err) = log.write(&format!("{message} - Exiting"), true) {
            error!("Failed to write run log: {}", log_err);
        }
        eprintln!("{message}\nExiting run-print-job");
        std::process::exit(1);
    }
}

async fn run(cli: Cli, log: &RunLog) -> Result<()> {
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| beside_executable(CONFIG_FILE));

    let update = ConfigUpdate::from(cli.defaults);
    if !update.is_empty() {
        return update_defaults(&config_path, &update, log);
    }

    info!("Loading configuration from {:?}", config_path);
    let config = load_config(&config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;

    let job_id = JobId::parse(cli.job_id.as_deref().context("Missing required job id")?)?;
    let mode = if cli.report {
        RunMode::ReportOnly
    } else {
        RunMode::Print
    };

    validate_config(&config, mode)?;
    if !cli.debug {
        config.locate_tools(mode)?;
    }

    let folder = config.resolve_folder(cli.folder)?;
    let printer = match mode {
        RunMode::Print => config.resolve_printer(cli.printer)?,
        RunMode::ReportOnly => cli
            .printer
            .or_else(|| config.defaults.printer.clone())
            .unwrap_or_default(),
    };

    let job = JobContext::new(JobParams {
        job_id,
        folder,
        printer,
        range: DocumentRange::new(cli.start, cli.end),
        mode,
        archive_extension: config.archive.extension.clone(),
    })?;

    let ctx = RunContext::new(log.clone(), cli.debug);
    let runner = ProcessRunner::new(ctx.clone(), config.runner.max_argument_len);
    let mut orchestrator =
        PrintJobOrchestrator::new(runner, CommandBuilder::from_config(&config), job, ctx)
            .with_list_source(config.archive.list_source);

    let summary = orchestrator.run().await?;
    info!(
        job_id = %job_id,
        listed = summary.documents_listed,
        printed = summary.documents_printed,
        "Run finished"
    );
    Ok(())
}

/// Store new defaults and stop without running a job.
fn update_defaults(config_path: &Path, update: &ConfigUpdate, log: &RunLog) -> Result<()> {
    let mut config = if config_path.exists() {
        load_config_file(config_path)
            .with_context(|| format!("Failed to load config from {:?}", config_path))?
    } else {
        Config::default()
    };

    update.apply(&mut config)?;
    let backup = store_config(config_path, &config)?;

    let mut message = format!("Configuration updated in {}", config_path.display());
    if let Some(backup) = backup {
        message.push_str(&format!(", previous saved as {}", backup.display()));
    }
    log.write(&message, true)?;
    Ok(())
}

fn beside_executable(name: &str) -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(name)))
        .unwrap_or_else(|| PathBuf::from(name))
}
