//! Builds the command lines a print job runs.

use std::path::Path;

use super::error::CommandError;
use super::types::DocumentKind;
use crate::config::{ArchiveConfig, Config, TimeoutConfig, ToolConfig, ToolsConfig};
use crate::job::JobContext;
use crate::quoting::{dequote, quote};
use crate::report::DocumentEntry;
use crate::runner::CommandSpec;

/// Turns configured tools plus a job into [`CommandSpec`]s.
///
/// Every path placed on a command line goes through [`quote`].
#[derive(Debug, Clone)]
pub struct CommandBuilder {
    tools: ToolsConfig,
    archive: ArchiveConfig,
    timeouts: TimeoutConfig,
}

impl CommandBuilder {
    pub fn new(tools: ToolsConfig, archive: ArchiveConfig, timeouts: TimeoutConfig) -> Self {
        Self {
            tools,
            archive,
            timeouts,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.tools.clone(),
            config.archive.clone(),
            config.timeouts.clone(),
        )
    }

    /// Print command for one document:
    /// `<tool> <tool args> <printer> <data dir + name>`.
    pub fn print_command(
        &self,
        entry: &DocumentEntry,
        job: &JobContext,
    ) -> Result<CommandSpec, CommandError> {
        let kind = DocumentKind::from_name(&entry.name)
            .ok_or_else(|| CommandError::unsupported(&entry.name))?;
        let tool = match kind {
            DocumentKind::Pdf => &self.tools.pdf_printer,
            DocumentKind::WordProcessor => &self.tools.doc_printer,
        };

        let document = job.layout().document_path(&entry.name);
        Ok(tool_command(tool, kind.tool_key())?
            .arg(tool.args.clone())
            .arg(quote(job.printer()))
            .arg(quote_path(&document))
            .with_timeout(self.timeouts.print_secs))
    }

    /// Command that opens the job report for viewing.
    pub fn report_command(&self, job: &JobContext) -> Result<CommandSpec, CommandError> {
        let browser = &self.tools.browser;
        Ok(tool_command(browser, "tools.browser.path")?
            .arg(browser.args.clone())
            .arg(quote_path(&job.layout().report_path))
            .with_timeout(self.timeouts.report_secs))
    }

    /// Command that unpacks the job archive:
    /// `<extractor> <extract flag> <archive> <extractor args>`.
    ///
    /// Runs in the job folder, so relative output lands under `PrintJobs/`.
    pub fn extract_command(&self, job: &JobContext) -> Result<CommandSpec, CommandError> {
        let extractor = &self.tools.extractor;
        Ok(tool_command(extractor, "tools.extractor.path")?
            .arg(self.archive.extract_flag.clone())
            .arg(quote_path(&job.layout().archive_path))
            .arg(extractor.args.clone())
            .with_timeout(self.timeouts.extract_secs)
            .with_working_dir(&job.layout().folder))
    }
}

fn tool_command(tool: &ToolConfig, key: &'static str) -> Result<CommandSpec, CommandError> {
    let path = tool
        .configured_path()
        .ok_or(CommandError::MissingTool { key })?;
    Ok(CommandSpec::new(quote(&dequote(path.trim()))))
}

fn quote_path(path: &Path) -> String {
    quote(&path.to_string_lossy())
}
