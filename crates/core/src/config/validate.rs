use std::path::{Path, PathBuf};

use super::{
    types::{Config, ToolConfig},
    ConfigError,
};
use crate::job::RunMode;
use crate::quoting::dequote;

/// Validate configuration for a run in `mode`
/// Currently validates:
/// - Every tool the mode invokes has a path
/// - Archive extension and extract flag are set
/// - Runner argument limit is not 0
pub fn validate_config(config: &Config, mode: RunMode) -> Result<(), ConfigError> {
    for (key, tool) in config.required_tools(mode) {
        if tool.configured_path().is_none() {
            return Err(ConfigError::MissingValue { key });
        }
    }

    if config.archive.extension.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "archive.extension cannot be empty".to_string(),
        ));
    }

    if config.archive.extract_flag.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "archive.extract_flag cannot be empty".to_string(),
        ));
    }

    if config.runner.max_argument_len == 0 {
        return Err(ConfigError::ValidationError(
            "runner.max_argument_len cannot be 0".to_string(),
        ));
    }

    Ok(())
}

/// Resolve a tool path to an executable file
///
/// A path with a directory part must exist as given; a bare program name is
/// looked up on `PATH`.
pub fn locate_tool(key: &'static str, path: &str) -> Result<PathBuf, ConfigError> {
    let bare = dequote(path.trim());
    let candidate = Path::new(&bare);
    let not_found = || ConfigError::ToolNotFound {
        key,
        path: bare.clone(),
    };

    if candidate.is_absolute() || candidate.components().count() > 1 {
        if candidate.is_file() {
            Ok(candidate.to_path_buf())
        } else {
            Err(not_found())
        }
    } else {
        which::which(candidate).map_err(|_| not_found())
    }
}

impl Config {
    /// Tools invoked by a run in `mode`, keyed by their config name.
    pub fn required_tools(&self, mode: RunMode) -> Vec<(&'static str, &ToolConfig)> {
        let mut tools = vec![("tools.extractor.path", &self.tools.extractor)];
        match mode {
            RunMode::ReportOnly => tools.push(("tools.browser.path", &self.tools.browser)),
            RunMode::Print => {
                tools.push(("tools.pdf_printer.path", &self.tools.pdf_printer));
                tools.push(("tools.doc_printer.path", &self.tools.doc_printer));
            }
        }
        tools
    }

    /// Check that every tool required by `mode` can be found.
    pub fn locate_tools(&self, mode: RunMode) -> Result<(), ConfigError> {
        for (key, tool) in self.required_tools(mode) {
            let path = tool
                .configured_path()
                .ok_or(ConfigError::MissingValue { key })?;
            let found = locate_tool(key, path)?;
            tracing::debug!("{} resolved to {}", key, found.display());
        }
        Ok(())
    }

    /// Job folder for this run: the override if given, else the default.
    pub fn resolve_folder(&self, folder: Option<PathBuf>) -> Result<PathBuf, ConfigError> {
        folder
            .or_else(|| self.defaults.folder.clone())
            .map(|f| PathBuf::from(dequote(&f.to_string_lossy())))
            .filter(|f| !f.as_os_str().is_empty())
            .ok_or(ConfigError::MissingValue {
                key: "defaults.folder",
            })
    }

    /// Printer for this run: the override if given, else the default.
    pub fn resolve_printer(&self, printer: Option<String>) -> Result<String, ConfigError> {
        printer
            .or_else(|| self.defaults.printer.clone())
            .filter(|p| !p.trim().is_empty())
            .ok_or(ConfigError::MissingValue {
                key: "defaults.printer",
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ToolsConfig;
    use tempfile::TempDir;

    fn print_ready_config() -> Config {
        Config {
            tools: ToolsConfig {
                extractor: ToolConfig::new("tar", ""),
                pdf_printer: ToolConfig::new("pdfprint", "-printer"),
                doc_printer: ToolConfig::new("docprint", ""),
                browser: ToolConfig::default(),
            },
            ..Config::default()
        }
    }

    #[test]
    fn test_validate_valid_print_config() {
        assert!(validate_config(&print_ready_config(), RunMode::Print).is_ok());
    }

    #[test]
    fn test_validate_report_mode_requires_browser() {
        let err = validate_config(&print_ready_config(), RunMode::ReportOnly).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MissingValue {
                key: "tools.browser.path"
            }
        ));
    }

    #[test]
    fn test_validate_print_mode_requires_doc_printer() {
        let mut config = print_ready_config();
        config.tools.doc_printer.path = Some(String::new());
        let err = validate_config(&config, RunMode::Print).unwrap_err();
        assert_eq!(err.to_string(), "No configuration set for tools.doc_printer.path");
    }

    #[test]
    fn test_validate_empty_extension_fails() {
        let mut config = print_ready_config();
        config.archive.extension = " ".to_string();
        let err = validate_config(&config, RunMode::Print).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_locate_tool_with_directory_must_exist() {
        let dir = TempDir::new().unwrap();
        let tool = dir.path().join("pdfprint");

        let err = locate_tool("tools.pdf_printer.path", tool.to_str().unwrap()).unwrap_err();
        assert!(matches!(err, ConfigError::ToolNotFound { .. }));

        std::fs::write(&tool, b"").unwrap();
        let quoted = format!("\"{}\"", tool.display());
        assert_eq!(locate_tool("tools.pdf_printer.path", &quoted).unwrap(), tool);
    }

    #[test]
    fn test_locate_tool_bare_name_not_on_path() {
        let err = locate_tool("tools.browser.path", "no-such-viewer-4f1c2").unwrap_err();
        assert!(matches!(err, ConfigError::ToolNotFound { .. }));
    }

    #[test]
    fn test_resolve_folder_prefers_override() {
        let mut config = Config::default();
        config.defaults.folder = Some(PathBuf::from("/srv/default"));

        assert_eq!(
            config.resolve_folder(Some(PathBuf::from("/srv/other"))).unwrap(),
            PathBuf::from("/srv/other")
        );
        assert_eq!(config.resolve_folder(None).unwrap(), PathBuf::from("/srv/default"));
    }

    #[test]
    fn test_resolve_folder_missing() {
        let err = Config::default().resolve_folder(None).unwrap_err();
        assert!(matches!(err, ConfigError::MissingValue { key: "defaults.folder" }));
    }

    #[test]
    fn test_resolve_printer_blank_is_missing() {
        let err = Config::default()
            .resolve_printer(Some("  ".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::MissingValue { key: "defaults.printer" }));
    }
}
