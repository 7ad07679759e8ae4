//! Error types for the command module.

use thiserror::Error;

/// Errors raised while building a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The document's extension has no print tool.
    #[error("File \"{name}\" has unknown extension")]
    UnsupportedDocument { name: String },

    /// The tool needed for this command is not configured.
    #[error("No configuration set for {key}")]
    MissingTool { key: &'static str },
}

impl CommandError {
    pub fn unsupported(name: impl Into<String>) -> Self {
        Self::UnsupportedDocument { name: name.into() }
    }
}
