use super::converter::Converter;
use crate::config::Settings;
use crate::error::Result;
use crate::extractors::Upload;

/// File name offered for the generated PDF.
pub const DOWNLOAD_FILE_NAME: &str = "document.pdf";

/// MIME type of the generated PDF.
pub const DOWNLOAD_MIME: &str = "application/pdf";

/// A downloadable PDF.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Download<'a> {
    /// Suggested file name
    pub file_name: &'static str,
    /// MIME type
    pub mime: &'static str,
    /// PDF bytes
    pub data: &'a [u8],
}

/// Per-user state of the reader: settings, the current document and the
/// outputs rendered from it.
///
/// Holds at most one document. Every settings change re-renders it.
#[derive(Debug, Clone, Default)]
pub struct ReaderSession {
    settings: Settings,
    text: Option<String>,
    preview: Option<String>,
    pdf: Option<Vec<u8>>,
    error: Option<String>,
}

impl ReaderSession {
    /// Empty session with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty session with the given settings.
    pub fn with_settings(settings: Settings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    /// Read an uploaded file and render it with the current settings.
    ///
    /// Extraction and empty-text failures discard any previously held
    /// document and outputs; the error message is kept for display. A PDF
    /// failure keeps the preview and records the message, returning `Ok`.
    pub fn upload(&mut self, converter: &Converter, upload: &Upload) -> Result<()> {
        self.error = None;
        match converter.convert(upload, &self.settings) {
            Ok(conversion) => {
                self.text = Some(conversion.text);
                self.preview = Some(conversion.preview);
                self.store_pdf(conversion.pdf);
                Ok(())
            },
            Err(e) => {
                self.fail(e.to_string());
                Err(e)
            },
        }
    }

    /// Replace the settings and re-render the current document, if any.
    pub fn update_settings(&mut self, converter: &Converter, settings: Settings) {
        self.settings = settings;
        self.refresh(converter);
    }

    /// Re-render the current document with the current settings.
    pub fn refresh(&mut self, converter: &Converter) {
        let Some(text) = self.text.take() else {
            return;
        };
        self.error = None;

        match converter.convert_text(text, &self.settings) {
            Ok(conversion) => {
                self.text = Some(conversion.text);
                self.preview = Some(conversion.preview);
                self.store_pdf(conversion.pdf);
            },
            Err(e) => self.fail(e.to_string()),
        }
    }

    /// Drop the current document and its outputs. Settings are kept.
    pub fn clear(&mut self) {
        self.text = None;
        self.preview = None;
        self.pdf = None;
        self.error = None;
    }

    fn store_pdf(&mut self, pdf: Result<Vec<u8>>) {
        match pdf {
            Ok(bytes) => self.pdf = Some(bytes),
            Err(e) => {
                self.pdf = None;
                self.error = Some(e.to_string());
            },
        }
    }

    fn fail(&mut self, message: String) {
        log::warn!("{}", message);
        self.text = None;
        self.preview = None;
        self.pdf = None;
        self.error = Some(message);
    }

    /// Current settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Text of the current document.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Preview markup of the current document.
    pub fn preview(&self) -> Option<&str> {
        self.preview.as_deref()
    }

    /// Bytes of the last generated PDF.
    pub fn pdf(&self) -> Option<&[u8]> {
        self.pdf.as_deref()
    }

    /// Message of the last failure.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The PDF as a download, available only after a successful conversion.
    pub fn download(&self) -> Option<Download<'_>> {
        self.pdf.as_deref().map(|data| Download {
            file_name: DOWNLOAD_FILE_NAME,
            mime: DOWNLOAD_MIME,
            data,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::fonts::FontSet;

    fn converter() -> Converter {
        Converter::with_fonts(FontSet::standard())
    }

    fn pdf_upload(text: &str) -> Upload {
        let pdf = converter().render_pdf(text, &Settings::default()).unwrap();
        Upload::new(pdf, "application/pdf")
    }

    #[test]
    fn test_new_session_has_nothing_to_download() {
        let session = ReaderSession::new();
        assert!(session.download().is_none());
        assert!(session.preview().is_none());
        assert!(session.error().is_none());
    }

    #[test]
    fn test_unsupported_upload() {
        let mut session = ReaderSession::new();
        let err = session
            .upload(&converter(), &Upload::new(b"x".to_vec(), "text/plain"))
            .unwrap_err();
        assert!(matches!(err, Error::UnsupportedFileType(_)));
        assert!(session.error().unwrap().contains("unsupported file type"));
        assert!(session.download().is_none());
    }

    #[test]
    fn test_settings_change_rerenders() {
        let converter = converter();
        let mut session = ReaderSession::new();
        session.text = Some("some words".to_string());
        session.refresh(&converter);
        let first = session.pdf().unwrap().to_vec();

        session.update_settings(&converter, Settings::default().with_text_size(20.0));
        assert_ne!(session.pdf().unwrap(), first.as_slice());
        assert!(session.preview().unwrap().contains("font-size: 20pt"));
    }

    #[test]
    fn test_render_failure_keeps_preview() {
        let converter = converter();
        let mut session = ReaderSession::new();
        session.text = Some("some words".to_string());
        session.refresh(&converter);
        assert!(session.download().is_some());

        session.update_settings(&converter, Settings::default().with_line_spacing(9.0));
        assert!(session.preview().is_some());
        assert!(session.download().is_none());
        assert!(session.error().unwrap().starts_with("Failed to generate PDF"));
    }

    #[test]
    fn test_failed_upload_clears_previous_document() {
        let converter = converter();
        let mut session = ReaderSession::new();
        session.text = Some("kept until replaced".to_string());
        session.refresh(&converter);
        assert!(session.pdf().is_some());

        let corrupt = Upload::new(b"%PDF-broken".to_vec(), "application/pdf");
        assert!(session.upload(&converter, &corrupt).is_err());
        assert!(session.text().is_none());
        assert!(session.pdf().is_none());
        assert!(session.error().unwrap().starts_with("Error reading PDF file"));
    }

    #[test]
    fn test_pdf_round_trip_upload() {
        let converter = converter();
        let mut session = ReaderSession::new();
        session.upload(&converter, &pdf_upload("plain")).unwrap();
        assert!(session.error().is_none());

        let download = session.download().unwrap();
        assert_eq!(download.file_name, "document.pdf");
        assert_eq!(download.mime, "application/pdf");
        assert!(download.data.starts_with(b"%PDF-"));
    }

    #[test]
    fn test_clear_keeps_settings() {
        let converter = converter();
        let settings = Settings::default().with_text_size(16.0);
        let mut session = ReaderSession::with_settings(settings.clone());
        session.text = Some("text".to_string());
        session.refresh(&converter);

        session.clear();
        assert!(session.text().is_none());
        assert!(session.download().is_none());
        assert_eq!(session.settings(), &settings);
    }
}
