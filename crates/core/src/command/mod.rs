//! Command builder.
//!
//! Maps document entries to print commands by extension, and builds the
//! extract and report-display commands for a job.

mod builder;
mod error;
mod types;

pub use builder::CommandBuilder;
pub use error::CommandError;
pub use types::DocumentKind;
