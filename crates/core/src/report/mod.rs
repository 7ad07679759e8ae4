//! Document list resolver.
//!
//! Turns the report shipped inside a print job archive into the ordered list
//! of documents to print. The report is scanned as a token stream with two
//! recognised marker families (list items and line breaks), matched without
//! regard to case.
//!
//! # Example
//!
//! ```
//! use printjob_core::report::resolve_report;
//!
//! let list = resolve_report("<ul><li>267885.pdf:<br>Androgen receptors</li></ul>").unwrap();
//! assert_eq!(list.get(1).unwrap().name, "267885.pdf");
//! ```

mod error;
mod resolver;
mod scanner;
mod types;

pub use error::ResolveError;
pub use resolver::{load_document_list, resolve_file_list, resolve_report};
pub use scanner::{Scanner, Span};
pub use types::{DocumentEntry, DocumentList, ListSource};
