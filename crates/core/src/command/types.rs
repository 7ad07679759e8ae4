//! Types for the command module.

use serde::{Deserialize, Serialize};

/// Document families with a dedicated print tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    /// `.pdf`
    Pdf,
    /// `.doc`, `.docx`, `.rtf`, `.odt`
    WordProcessor,
}

impl DocumentKind {
    /// Classifies a document by the extension of its final path component.
    ///
    /// Matching is case-sensitive: `REPORT.PDF` is not a PDF.
    pub fn from_name(name: &str) -> Option<Self> {
        let file_name = name.rsplit(['/', '\\']).next().unwrap_or(name);
        let (_, extension) = file_name.rsplit_once('.')?;
        match extension {
            "pdf" => Some(Self::Pdf),
            "doc" | "docx" | "rtf" | "odt" => Some(Self::WordProcessor),
            _ => None,
        }
    }

    /// Configuration key of the tool that prints this kind.
    pub fn tool_key(self) -> &'static str {
        match self {
            Self::Pdf => "tools.pdf_printer.path",
            Self::WordProcessor => "tools.doc_printer.path",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supported_extensions() {
        assert_eq!(DocumentKind::from_name("267885.pdf"), Some(DocumentKind::Pdf));
        for name in ["a.doc", "a.docx", "a.rtf", "a.odt"] {
            assert_eq!(DocumentKind::from_name(name), Some(DocumentKind::WordProcessor));
        }
    }

    #[test]
    fn test_extension_is_case_sensitive() {
        assert_eq!(DocumentKind::from_name("minutes.PDF"), None);
        assert_eq!(DocumentKind::from_name("minutes.Doc"), None);
    }

    #[test]
    fn test_only_final_component_counts() {
        assert_eq!(DocumentKind::from_name("v1.pdf/notes"), None);
        assert_eq!(DocumentKind::from_name("agenda.pdf.txt"), None);
        assert_eq!(DocumentKind::from_name("sub/agenda.v2.pdf"), Some(DocumentKind::Pdf));
        assert_eq!(DocumentKind::from_name("README"), None);
    }
}
