//! Types for the report module.

use serde::{Deserialize, Serialize};

/// One document to print, as listed in the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentEntry {
    /// File name relative to the job's data directory. Never empty.
    pub name: String,
    /// Human readable description. May be empty.
    pub description: String,
}

impl DocumentEntry {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// Ordered, read-only list of documents in print order.
///
/// Repeated names are kept as separate entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentList {
    entries: Vec<DocumentEntry>,
}

impl DocumentList {
    pub(crate) fn new(entries: Vec<DocumentEntry>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the entry at 1-based `position`.
    pub fn get(&self, position: usize) -> Option<&DocumentEntry> {
        position
            .checked_sub(1)
            .and_then(|index| self.entries.get(index))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DocumentEntry> {
        self.entries.iter()
    }

    pub fn entries(&self) -> &[DocumentEntry] {
        &self.entries
    }
}

impl<'a> IntoIterator for &'a DocumentList {
    type Item = &'a DocumentEntry;
    type IntoIter = std::slice::Iter<'a, DocumentEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Which file in the extracted job lists the documents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListSource {
    /// `PrintJobReport<id>.html` list items.
    #[default]
    Report,
    /// `PrintJobFiles.txt`, one `name|description` per line.
    FileList,
}
