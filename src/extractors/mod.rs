//! Plain text extraction from uploaded documents.
//!
//! Supports Word documents (DOCX) and PDF. Paragraphs (DOCX) and pages (PDF)
//! are joined with [`PARAGRAPH_SEPARATOR`](crate::text::PARAGRAPH_SEPARATOR)
//! so the renderers can split them again.

pub mod docx;
pub mod pdf;

use crate::error::{Error, Result};
use std::fmt;
use std::path::Path;

/// MIME type of Word documents.
pub const DOCX_MIME: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// MIME type of PDF documents.
pub const PDF_MIME: &str = "application/pdf";

/// Supported input document kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    /// Office Open XML word processing document
    Docx,
    /// Portable Document Format
    Pdf,
}

impl DocumentKind {
    /// Kind for a declared MIME type. Parameters such as `; charset=` are ignored.
    pub fn from_mime(mime: &str) -> Option<Self> {
        let essence = mime.split(';').next().unwrap_or("").trim();
        if essence.eq_ignore_ascii_case(DOCX_MIME) {
            Some(DocumentKind::Docx)
        } else if essence.eq_ignore_ascii_case(PDF_MIME) {
            Some(DocumentKind::Pdf)
        } else {
            None
        }
    }

    /// Kind for a file name, by extension.
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        let ext = path.as_ref().extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "docx" => Some(DocumentKind::Docx),
            "pdf" => Some(DocumentKind::Pdf),
            _ => None,
        }
    }

    /// MIME type of this kind.
    pub fn mime(self) -> &'static str {
        match self {
            DocumentKind::Docx => DOCX_MIME,
            DocumentKind::Pdf => PDF_MIME,
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentKind::Docx => f.write_str("DOCX"),
            DocumentKind::Pdf => f.write_str("PDF"),
        }
    }
}

/// An uploaded file: raw bytes plus the declared MIME type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    /// File contents
    pub bytes: Vec<u8>,
    /// Declared MIME type
    pub mime: String,
}

impl Upload {
    /// Create an upload.
    pub fn new(bytes: impl Into<Vec<u8>>, mime: impl Into<String>) -> Self {
        Self {
            bytes: bytes.into(),
            mime: mime.into(),
        }
    }

    /// Read a file from disk, declaring its type from the extension.
    ///
    /// Files with an unknown extension get `application/octet-stream` and
    /// are rejected later by [`extract`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let mime = DocumentKind::from_path(path)
            .map(DocumentKind::mime)
            .unwrap_or("application/octet-stream");
        Ok(Self::new(bytes, mime))
    }

    /// Kind of the upload, if supported.
    pub fn kind(&self) -> Option<DocumentKind> {
        DocumentKind::from_mime(&self.mime)
    }
}

/// Extract plain text from an upload.
///
/// # Errors
///
/// [`Error::UnsupportedFileType`] for anything but DOCX or PDF, and
/// [`Error::Extract`] when the file cannot be read.
pub fn extract(upload: &Upload) -> Result<String> {
    let kind = upload
        .kind()
        .ok_or_else(|| Error::UnsupportedFileType(upload.mime.clone()))?;

    log::debug!("Extracting text from {} bytes of {}", upload.bytes.len(), kind);
    let text = match kind {
        DocumentKind::Docx => docx::extract_text(&upload.bytes),
        DocumentKind::Pdf => pdf::extract_text(&upload.bytes),
    }
    .map_err(|reason| Error::Extract { kind, reason })?;

    log::debug!("Extracted {} characters", text.chars().count());
    Ok(text)
}

/// Reject text that is empty or whitespace only.
pub fn ensure_text(text: &str) -> Result<()> {
    if text.trim().is_empty() {
        Err(Error::EmptyText)
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_mime() {
        assert_eq!(DocumentKind::from_mime(PDF_MIME), Some(DocumentKind::Pdf));
        assert_eq!(DocumentKind::from_mime(DOCX_MIME), Some(DocumentKind::Docx));
        assert_eq!(
            DocumentKind::from_mime("Application/PDF; charset=binary"),
            Some(DocumentKind::Pdf)
        );
        assert_eq!(DocumentKind::from_mime("text/plain"), None);
        assert_eq!(DocumentKind::from_mime(""), None);
    }

    #[test]
    fn test_kind_from_path() {
        assert_eq!(DocumentKind::from_path("notes.DOCX"), Some(DocumentKind::Docx));
        assert_eq!(DocumentKind::from_path("dir/paper.pdf"), Some(DocumentKind::Pdf));
        assert_eq!(DocumentKind::from_path("notes.txt"), None);
        assert_eq!(DocumentKind::from_path("README"), None);
    }

    #[test]
    fn test_kind_display_and_mime() {
        assert_eq!(DocumentKind::Docx.to_string(), "DOCX");
        assert_eq!(DocumentKind::Pdf.to_string(), "PDF");
        assert_eq!(DocumentKind::Pdf.mime(), "application/pdf");
    }

    #[test]
    fn test_unsupported_type() {
        let upload = Upload::new(b"plain text".to_vec(), "text/plain");
        let err = extract(&upload).unwrap_err();
        assert!(matches!(err, Error::UnsupportedFileType(ref mime) if mime == "text/plain"));
        assert!(err.to_string().contains("unsupported file type"));
    }

    #[test]
    fn test_corrupt_input_is_extract_error() {
        let upload = Upload::new(b"garbage".to_vec(), DOCX_MIME);
        match extract(&upload) {
            Err(Error::Extract { kind, reason }) => {
                assert_eq!(kind, DocumentKind::Docx);
                assert!(!reason.is_empty());
            },
            other => panic!("expected extract error, got {:?}", other),
        }

        let upload = Upload::new(b"garbage".to_vec(), PDF_MIME);
        assert!(matches!(
            extract(&upload),
            Err(Error::Extract {
                kind: DocumentKind::Pdf,
                ..
            })
        ));
    }

    #[test]
    fn test_ensure_text() {
        assert!(ensure_text("a").is_ok());
        assert!(matches!(ensure_text(""), Err(Error::EmptyText)));
        assert!(matches!(ensure_text(" \n\n\t "), Err(Error::EmptyText)));
    }

    #[test]
    fn test_upload_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("input.txt");
        std::fs::write(&path, b"hello").unwrap();

        let upload = Upload::from_file(&path).unwrap();
        assert_eq!(upload.bytes, b"hello");
        assert_eq!(upload.mime, "application/octet-stream");
        assert_eq!(upload.kind(), None);
    }
}
