//! Testing utilities: a mock command runner and job fixtures.
//!
//! # Example
//!
//! ```rust,ignore
//! use printjob_core::testing::{fixtures, MockRunner};
//!
//! let dir = tempfile::TempDir::new()?;
//! let layout = fixtures::write_job(dir.path(), 29, &fixtures::report_html(&[
//!     ("267885.pdf", "Androgen receptors"),
//! ]))?;
//! let runner = MockRunner::new();
//! ```

mod mock_runner;

pub use mock_runner::MockRunner;

/// Test fixtures and helper functions.
pub mod fixtures {
    use std::io;
    use std::path::Path;

    use crate::config::{Config, ToolConfig, ToolsConfig};
    use crate::job::{JobId, JobLayout};

    /// Build a job report listing `entries` as `(name, description)` pairs.
    pub fn report_html(entries: &[(&str, &str)]) -> String {
        let items: String = entries
            .iter()
            .map(|(name, description)| format!("  <li>{name}:<br/>{description}</li>\n"))
            .collect();
        format!(
            "<html>\n<head><title>Print Job</title></head>\n<body>\n<ol>\n{items}</ol>\n</body>\n</html>\n"
        )
    }

    /// Lay out a job under `folder` as if it had been downloaded and
    /// extracted: an empty archive plus the report in the data directory.
    pub fn write_job(folder: &Path, job_id: u32, report: &str) -> io::Result<JobLayout> {
        let job_id =
            JobId::new(job_id).map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
        let layout = JobLayout::new(folder, job_id, "tar");

        std::fs::write(&layout.archive_path, b"")?;
        std::fs::create_dir_all(&layout.data_dir)?;
        std::fs::write(&layout.report_path, report)?;
        Ok(layout)
    }

    /// A configuration with every tool set to a placeholder program.
    pub fn config() -> Config {
        Config {
            tools: ToolsConfig {
                extractor: ToolConfig::new("/usr/bin/tar", ""),
                pdf_printer: ToolConfig::new("/opt/print/pdfprint", "-printer"),
                doc_printer: ToolConfig::new("/opt/print/docprint", "-p"),
                browser: ToolConfig::new("/usr/bin/firefox", ""),
            },
            ..Config::default()
        }
    }
}
