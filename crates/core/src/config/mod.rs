mod loader;
mod types;
mod update;
mod validate;

pub use loader::{load_config, load_config_file, load_config_from_str, store_config};
pub use types::*;
pub use update::ConfigUpdate;
pub use validate::{locate_tool, validate_config};

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),

    #[error("No configuration set for {key}")]
    MissingValue { key: &'static str },

    #[error("Program for {key} not found at \"{path}\"")]
    ToolNotFound { key: &'static str, path: String },

    #[error("Folder \"{}\" not found", path.display())]
    FolderNotFound { path: PathBuf },

    #[error("Failed to store configuration to {}: {source}", path.display())]
    StoreFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
