use std::path::PathBuf;

use super::{types::Config, validate::locate_tool, ConfigError};

/// Changes to stored defaults requested on the command line
///
/// Applying an update never runs a job; the caller stores the result.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigUpdate {
    pub folder: Option<PathBuf>,
    pub printer: Option<String>,
    pub pdf_printer: Option<String>,
    pub pdf_printer_args: Option<String>,
    pub doc_printer: Option<String>,
    pub doc_printer_args: Option<String>,
    pub extractor: Option<String>,
    pub extractor_args: Option<String>,
    pub browser: Option<String>,
}

impl ConfigUpdate {
    /// Whether any default would change.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Validate the new values and write them into `config`
    pub fn apply(&self, config: &mut Config) -> Result<(), ConfigError> {
        if let Some(folder) = &self.folder {
            if !folder.is_dir() {
                return Err(ConfigError::FolderNotFound {
                    path: folder.clone(),
                });
            }
            config.defaults.folder = Some(folder.clone());
        }

        if let Some(printer) = &self.printer {
            config.defaults.printer = Some(printer.clone());
        }

        let tools = &mut config.tools;
        let paths = [
            ("tools.pdf_printer.path", &self.pdf_printer, &mut tools.pdf_printer),
            ("tools.doc_printer.path", &self.doc_printer, &mut tools.doc_printer),
            ("tools.extractor.path", &self.extractor, &mut tools.extractor),
            ("tools.browser.path", &self.browser, &mut tools.browser),
        ];
        for (key, value, tool) in paths {
            if let Some(path) = value {
                locate_tool(key, path)?;
                tool.path = Some(path.clone());
            }
        }

        if let Some(args) = &self.pdf_printer_args {
            tools.pdf_printer.args = args.clone();
        }
        if let Some(args) = &self.doc_printer_args {
            tools.doc_printer.args = args.clone();
        }
        if let Some(args) = &self.extractor_args {
            tools.extractor.args = args.clone();
        }

        Ok(())
    }
}
