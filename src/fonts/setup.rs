use crate::config::FontChoice;
use crate::error::{Error, Result};
use crate::writer::{EmbeddedFont, FontInfo, PdfFont, Style, TextMeasure};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// The regular and bold faces of one family.
#[derive(Debug, Clone)]
pub struct FontSet {
    /// Regular face, used for the plain half of words and for spaces
    pub regular: PdfFont,
    /// Bold face, used for the bolded prefix
    pub bold: PdfFont,
}

impl FontSet {
    /// Helvetica / Helvetica-Bold.
    pub fn standard() -> Self {
        Self {
            regular: PdfFont::Standard(FontInfo::helvetica()),
            bold: PdfFont::Standard(FontInfo::helvetica_bold()),
        }
    }

    /// Face for a style.
    pub fn font(&self, style: Style) -> &PdfFont {
        match style {
            Style::Regular => &self.regular,
            Style::Bold => &self.bold,
        }
    }

    /// Whether both faces are embedded TrueType fonts.
    pub fn is_embedded(&self) -> bool {
        self.regular.is_embedded() && self.bold.is_embedded()
    }
}

impl Default for FontSet {
    fn default() -> Self {
        Self::standard()
    }
}

impl TextMeasure for FontSet {
    fn char_width(&self, ch: char, style: Style) -> f32 {
        self.font(style).char_width(ch)
    }
}

/// Non-fatal notice that the configured family could not be loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontWarning {
    /// Family that was requested
    pub choice: FontChoice,
    /// What went wrong
    pub reason: String,
}

impl fmt::Display for FontWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Font configuration issue: {}. Using default fonts.",
            self.reason
        )
    }
}

/// Outcome of configuring a font family.
#[derive(Debug, Clone)]
pub struct FontSetup {
    /// Fonts to render with
    pub fonts: FontSet,
    /// Set when the standard fallback is in use
    pub warning: Option<FontWarning>,
}

impl FontSetup {
    /// Load the regular and bold files of `choice`.
    ///
    /// Files are looked up in `font_dir` when given, otherwise relative to
    /// the working directory. Any failure falls back to [`FontSet::standard`]
    /// and is reported through `warning`; configuration itself never fails.
    pub fn configure(choice: FontChoice, font_dir: Option<&Path>) -> Self {
        let (regular_file, bold_file) = choice.font_files();
        let path_for = |file: &str| -> PathBuf {
            match font_dir {
                Some(dir) => dir.join(file),
                None => PathBuf::from(file),
            }
        };

        let loaded = load_font(&path_for(regular_file))
            .and_then(|regular| load_font(&path_for(bold_file)).map(|bold| (regular, bold)));

        match loaded {
            Ok((regular, bold)) => {
                log::info!("Loaded {} font family ({}, {})", choice, regular.name, bold.name);
                Self {
                    fonts: FontSet {
                        regular: PdfFont::Embedded(regular),
                        bold: PdfFont::Embedded(bold),
                    },
                    warning: None,
                }
            },
            Err(e) => {
                let warning = FontWarning {
                    choice,
                    reason: e.to_string(),
                };
                log::warn!("{}", warning);
                Self {
                    fonts: FontSet::standard(),
                    warning: Some(warning),
                }
            },
        }
    }
}

fn load_font(path: &Path) -> Result<Arc<EmbeddedFont>> {
    EmbeddedFont::from_file(path)
        .map(Arc::new)
        .map_err(|e| Error::Font(format!("{}: {}", path.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_files_fall_back_with_warning() {
        let dir = tempfile::tempdir().unwrap();
        let setup = FontSetup::configure(FontChoice::Arial, Some(dir.path()));

        assert!(!setup.fonts.is_embedded());
        assert_eq!(setup.fonts.regular.name(), "Helvetica");
        assert_eq!(setup.fonts.bold.name(), "Helvetica-Bold");

        let warning = setup.warning.expect("fallback should warn");
        assert_eq!(warning.choice, FontChoice::Arial);
        assert!(warning.reason.contains("arial.ttf"));
        let message = warning.to_string();
        assert!(message.starts_with("Font configuration issue: "));
        assert!(message.ends_with(". Using default fonts."));
    }

    #[test]
    fn test_unparseable_font_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("arial.ttf"), b"not a font").unwrap();
        std::fs::write(dir.path().join("arialbd.ttf"), b"not a font").unwrap();

        let setup = FontSetup::configure(FontChoice::Arial, Some(dir.path()));
        assert!(!setup.fonts.is_embedded());
        assert!(setup
            .warning
            .is_some_and(|w| w.reason.contains("Failed to parse font")));
    }

    #[test]
    fn test_standard_set_measures_by_style() {
        let fonts = FontSet::standard();
        assert_eq!(fonts.char_width('i', Style::Regular), 222.0);
        assert_eq!(fonts.char_width('i', Style::Bold), 278.0);
    }
}
