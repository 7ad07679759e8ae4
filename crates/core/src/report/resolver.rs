//! Document list extraction from report text.

use std::path::Path;

use super::error::ResolveError;
use super::scanner::Scanner;
use super::types::{DocumentEntry, DocumentList, ListSource};

const ITEM_OPEN: &str = "<li";
const ITEM_CLOSE: &str = "</li>";
const BREAK: &str = "<br";
const BREAK_CLOSE: &str = "</br";

/// Resolves the ordered document list from a print job report.
///
/// Each `<li>` item yields one entry. Text before the first `<br>` is the
/// document name (one trailing `:` removed); text after the break up to the
/// next tag is the description. Any other markup inside an item is kept as
/// part of the text.
pub fn resolve_report(text: &str) -> Result<DocumentList, ResolveError> {
    let mut scanner = Scanner::new(text);
    let mut entries = Vec::new();

    while let Some(open) = scanner.find_tag_ci(ITEM_OPEN) {
        let body_start = scanner
            .find_byte_from(open.end, b'>')
            .ok_or_else(|| ResolveError::malformed(open.start, "list item tag is never closed"))?
            + 1;

        scanner.seek(body_start);
        let close = scanner
            .find_ci(ITEM_CLOSE)
            .ok_or_else(|| ResolveError::malformed(open.start, "list item has no closing </li>"))?;

        let body = &text[body_start..close.start];
        entries.push(split_item(body, entries.len() + 1)?);

        scanner.seek(close.end);
    }

    if entries.is_empty() {
        return Err(ResolveError::Empty);
    }

    tracing::debug!(count = entries.len(), "Resolved report list items");
    Ok(DocumentList::new(entries))
}

/// Splits one item body into name and description.
fn split_item(body: &str, position: usize) -> Result<DocumentEntry, ResolveError> {
    let item = Scanner::new(body);

    let line_break = match (item.find_tag_ci(BREAK), item.find_tag_ci(BREAK_CLOSE)) {
        (Some(a), Some(b)) => Some(if a.start <= b.start { a } else { b }),
        (a, b) => a.or(b),
    };

    let (name, description) = match line_break {
        Some(br) => {
            let description = item
                .find_byte_from(br.end, b'>')
                .map(|gt| {
                    let from = gt + 1;
                    let to = item.find_byte_from(from, b'<').unwrap_or(body.len());
                    &body[from..to]
                })
                .unwrap_or("");
            (&body[..br.start], description)
        }
        None => (body, ""),
    };

    let name = name.trim_end();
    let name = name.strip_suffix(':').unwrap_or(name).trim();
    if name.is_empty() {
        return Err(ResolveError::EmptyName { position });
    }

    Ok(DocumentEntry::new(name, description.trim()))
}

/// Resolves the document list from a `name|description` file list.
///
/// Blank lines are skipped and the description is optional.
pub fn resolve_file_list(text: &str) -> Result<DocumentList, ResolveError> {
    let mut entries = Vec::new();

    for line in text.lines() {
        if line.trim().is_empty() {
            continue;
        }

        let (name, description) = match line.split_once('|') {
            Some((name, rest)) => (name, rest.split('|').next().unwrap_or("")),
            None => (line, ""),
        };

        let name = name.trim();
        if name.is_empty() {
            return Err(ResolveError::EmptyName {
                position: entries.len() + 1,
            });
        }
        entries.push(DocumentEntry::new(name, description.trim()));
    }

    if entries.is_empty() {
        return Err(ResolveError::Empty);
    }

    Ok(DocumentList::new(entries))
}

/// Reads `path` and resolves its document list according to `source`.
pub fn load_document_list(path: &Path, source: ListSource) -> Result<DocumentList, ResolveError> {
    if !path.is_file() {
        return Err(ResolveError::ReportNotFound {
            path: path.to_path_buf(),
        });
    }

    let bytes = std::fs::read(path).map_err(|source| ResolveError::ReportUnreadable {
        path: path.to_path_buf(),
        source,
    })?;
    let text = String::from_utf8_lossy(&bytes);

    match source {
        ListSource::Report => resolve_report(&text),
        ListSource::FileList => resolve_file_list(&text),
    }
}
