//! Error types for the conversion pipeline.
//!
//! Extraction and empty-text errors abort a conversion before anything is
//! rendered. Render errors only affect the PDF half of a conversion; the
//! preview is still produced.

use crate::extractors::DocumentKind;

/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while converting a document.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The declared file type is neither DOCX nor PDF.
    #[error("unsupported file type: {0}")]
    UnsupportedFileType(String),

    /// The file was of a supported kind but could not be read
    #[error("Error reading {kind} file: {reason}")]
    Extract {
        /// Kind of document that failed
        kind: DocumentKind,
        /// Underlying library error text
        reason: String,
    },

    /// Extracted text is empty or whitespace only
    #[error("The document contains no text.")]
    EmptyText,

    /// The PDF could not be laid out or written
    #[error("Failed to generate PDF: {0}")]
    Render(String),

    /// Settings outside the supported ranges
    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    /// Malformed `#RRGGBB` color
    #[error("Invalid color '{0}': expected #RRGGBB")]
    InvalidColor(String),

    /// Font file could not be read or parsed
    #[error("Font error: {0}")]
    Font(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Settings file could not be parsed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Whether this error came from reading the uploaded file.
    pub fn is_extract_error(&self) -> bool {
        matches!(self, Error::UnsupportedFileType(_) | Error::Extract { .. })
    }
}
