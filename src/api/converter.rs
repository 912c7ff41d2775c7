use crate::config::{FontChoice, Settings};
use crate::converters::{preview_text, render_pdf_with_config};
use crate::converters::pdf::DOCUMENT_TITLE;
use crate::error::Result;
use crate::extractors::{ensure_text, extract, Upload};
use crate::fonts::{FontSet, FontSetup, FontWarning};
use crate::writer::PdfWriterConfig;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Result of converting one document under one settings snapshot.
#[derive(Debug)]
pub struct Conversion {
    /// Extracted document text
    pub text: String,
    /// Preview markup
    pub preview: String,
    /// PDF bytes; a render failure leaves the preview usable
    pub pdf: Result<Vec<u8>>,
}

/// Runs the extract, preview and PDF pipeline.
///
/// Fonts for every [`FontChoice`] are configured once, when the converter
/// is built. A family whose files cannot be loaded renders with the
/// standard Helvetica pair and is reported by [`Converter::warnings`].
///
/// # Examples
///
/// ```no_run
/// use bionic_oxide::api::Converter;
/// use bionic_oxide::config::Settings;
/// use bionic_oxide::extractors::Upload;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let converter = Converter::new();
/// let upload = Upload::from_file("notes.docx")?;
/// let conversion = converter.convert(&upload, &Settings::default())?;
/// std::fs::write("document.pdf", conversion.pdf?)?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Converter {
    fonts: HashMap<FontChoice, FontSetup>,
    compress: bool,
}

impl Converter {
    /// Converter with font files looked up in the working directory.
    pub fn new() -> Self {
        Self::configure(None)
    }

    /// Converter with font files looked up in `dir`.
    pub fn with_font_dir(dir: impl AsRef<Path>) -> Self {
        let dir: PathBuf = dir.as_ref().to_path_buf();
        Self::configure(Some(&dir))
    }

    /// Converter that renders every family with the given fonts.
    pub fn with_fonts(fonts: FontSet) -> Self {
        let fonts = FontChoice::ALL
            .into_iter()
            .map(|choice| {
                let setup = FontSetup {
                    fonts: fonts.clone(),
                    warning: None,
                };
                (choice, setup)
            })
            .collect();
        Self {
            fonts,
            compress: false,
        }
    }

    fn configure(dir: Option<&Path>) -> Self {
        let fonts = FontChoice::ALL
            .into_iter()
            .map(|choice| (choice, FontSetup::configure(choice, dir)))
            .collect();
        Self {
            fonts,
            compress: false,
        }
    }

    /// Compress PDF streams.
    pub fn with_compress(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    /// Fonts used for a family.
    pub fn fonts(&self, choice: FontChoice) -> FontSet {
        self.fonts
            .get(&choice)
            .map(|setup| setup.fonts.clone())
            .unwrap_or_default()
    }

    /// Font configuration warnings, one per family that fell back.
    pub fn warnings(&self) -> Vec<&FontWarning> {
        let mut warnings: Vec<&FontWarning> = FontChoice::ALL
            .iter()
            .filter_map(|choice| self.fonts.get(choice))
            .filter_map(|setup| setup.warning.as_ref())
            .collect();
        warnings.dedup();
        warnings
    }

    /// Preview markup for `text`.
    pub fn preview(&self, text: &str, settings: &Settings) -> String {
        preview_text(text, settings)
    }

    /// PDF bytes for `text`.
    pub fn render_pdf(&self, text: &str, settings: &Settings) -> Result<Vec<u8>> {
        let config = PdfWriterConfig::default()
            .with_title(DOCUMENT_TITLE)
            .with_compress(self.compress);
        render_pdf_with_config(text, settings, &self.fonts(settings.current_font), config)
    }

    /// Render already extracted text.
    ///
    /// Fails with [`Error::EmptyText`](crate::Error::EmptyText) when the
    /// text is blank; a PDF failure is carried in [`Conversion::pdf`].
    pub fn convert_text(&self, text: impl Into<String>, settings: &Settings) -> Result<Conversion> {
        let text = text.into();
        ensure_text(&text)?;

        let preview = self.preview(&text, settings);
        let pdf = self.render_pdf(&text, settings);
        match &pdf {
            Ok(bytes) => log::info!(
                "Converted {} characters into {} PDF bytes",
                text.chars().count(),
                bytes.len()
            ),
            Err(e) => log::warn!("PDF generation failed: {}", e),
        }

        Ok(Conversion { text, preview, pdf })
    }

    /// Extract an upload and render it.
    pub fn convert(&self, upload: &Upload, settings: &Settings) -> Result<Conversion> {
        let text = extract(upload)?;
        self.convert_text(text, settings)
    }
}

impl Default for Converter {
    fn default() -> Self {
        Self::new()
    }
}
