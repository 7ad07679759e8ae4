use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::report::ListSource;

/// Root configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub defaults: DefaultsConfig,
    #[serde(default)]
    pub tools: ToolsConfig,
    #[serde(default)]
    pub archive: ArchiveConfig,
    #[serde(default)]
    pub timeouts: TimeoutConfig,
    #[serde(default)]
    pub runner: RunnerConfig,
}

/// Defaults used when a run does not override them
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct DefaultsConfig {
    /// Folder holding downloaded `PrintJobNNNNN.tar` archives
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder: Option<PathBuf>,
    /// Printer passed to the print tools
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub printer: Option<String>,
}

/// External programs driven by a run
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ToolsConfig {
    /// Archive extractor, invoked as `<path> <extract_flag> <archive> <args>`
    /// from inside the job folder
    #[serde(default)]
    pub extractor: ToolConfig,
    /// Prints `.pdf` documents
    #[serde(default)]
    pub pdf_printer: ToolConfig,
    /// Prints `.doc`, `.docx`, `.rtf` and `.odt` documents
    #[serde(default)]
    pub doc_printer: ToolConfig,
    /// Displays the job report
    #[serde(default)]
    pub browser: ToolConfig,
}

/// One external program and its fixed arguments
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ToolConfig {
    /// Program path, or a bare name looked up on `PATH`. Never quoted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Arguments inserted verbatim after the program
    #[serde(default)]
    pub args: String,
}

impl ToolConfig {
    pub fn new(path: impl Into<String>, args: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
            args: args.into(),
        }
    }

    /// Configured path, treating an empty string as unset.
    pub fn configured_path(&self) -> Option<&str> {
        self.path.as_deref().filter(|p| !p.trim().is_empty())
    }
}

/// Archive naming and extraction
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ArchiveConfig {
    /// Archive file extension, without the dot
    #[serde(default = "default_extension")]
    pub extension: String,
    /// Flag telling the extractor to extract
    #[serde(default = "default_extract_flag")]
    pub extract_flag: String,
    /// Which extracted file lists the documents
    #[serde(default)]
    pub list_source: ListSource,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            extension: default_extension(),
            extract_flag: default_extract_flag(),
            list_source: ListSource::default(),
        }
    }
}

fn default_extension() -> String {
    "tar".to_string()
}

fn default_extract_flag() -> String {
    "xf".to_string()
}

/// Per-step process timeouts in seconds (0 = wait forever)
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TimeoutConfig {
    #[serde(default = "default_extract_timeout")]
    pub extract_secs: u64,
    #[serde(default = "default_print_timeout")]
    pub print_secs: u64,
    #[serde(default)]
    pub report_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            extract_secs: default_extract_timeout(),
            print_secs: default_print_timeout(),
            report_secs: 0,
        }
    }
}

fn default_extract_timeout() -> u64 {
    45
}

fn default_print_timeout() -> u64 {
    180
}

/// Process runner limits
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RunnerConfig {
    /// Longest single command line fragment accepted, in bytes
    #[serde(default = "default_max_argument_len")]
    pub max_argument_len: usize,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            max_argument_len: default_max_argument_len(),
        }
    }
}

fn default_max_argument_len() -> usize {
    1024
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_config() {
        let toml = r#"
[defaults]
folder = "/srv/printjobs"
printer = "lab-2"

[tools.extractor]
path = "/usr/bin/tar"

[tools.pdf_printer]
path = "/opt/pdfprint/pdfprint"
args = "-silent -printer"

[tools.doc_printer]
path = "lowriter"
args = "--pt"

[tools.browser]
path = "firefox"

[timeouts]
print_secs = 300
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.defaults.folder, Some(PathBuf::from("/srv/printjobs")));
        assert_eq!(config.defaults.printer.as_deref(), Some("lab-2"));
        assert_eq!(config.tools.pdf_printer.args, "-silent -printer");
        assert_eq!(config.tools.extractor.args, "");
        assert_eq!(config.timeouts.print_secs, 300);
        assert_eq!(config.timeouts.extract_secs, 45);
        assert_eq!(config.timeouts.report_secs, 0);
    }

    #[test]
    fn test_deserialize_empty_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.defaults.folder.is_none());
        assert_eq!(config.archive.extension, "tar");
        assert_eq!(config.archive.extract_flag, "xf");
        assert_eq!(config.archive.list_source, ListSource::Report);
        assert_eq!(config.runner.max_argument_len, 1024);
    }

    #[test]
    fn test_configured_path_treats_blank_as_unset() {
        assert!(ToolConfig::new("  ", "").configured_path().is_none());
        assert_eq!(ToolConfig::new("tar", "").configured_path(), Some("tar"));
        assert!(ToolConfig::default().configured_path().is_none());
    }

    #[test]
    fn test_serialize_roundtrip_skips_unset() {
        let mut config = Config::default();
        config.defaults.printer = Some("lab-2".to_string());

        let text = toml::to_string_pretty(&config).unwrap();
        assert!(!text.contains("folder"));

        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }
}
