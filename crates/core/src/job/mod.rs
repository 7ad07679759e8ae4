//! Job identity, file layout and run parameters.

mod context;
mod error;
mod types;

pub use context::{JobContext, JobParams, RunContext};
pub use error::JobError;
pub use types::{DocumentRange, JobId, JobLayout, RunMode};
