//! Reformatted PDF output.
//!
//! Text is split into paragraphs on blank lines, every word is split into a
//! bold prefix and a regular suffix, and the result is flowed onto US Letter
//! pages over a full-page background in the configured colors.

use crate::config::Settings;
use crate::error::{Error, Result};
use crate::fonts::FontSet;
use crate::text::{segment, split_word, Token, Tokens};
use crate::writer::{
    LayoutEngine, LayoutParams, PageGeometry, PdfWriter, PdfWriterConfig, Style, Word,
};

/// Gap after every paragraph, in points.
pub const PARAGRAPH_SPACE_AFTER: f32 = 6.0;

/// Space before a paragraph as a fraction of the text size.
pub const PARAGRAPH_SPACE_BEFORE_RATIO: f32 = 0.5;

/// Title stored in the document information dictionary.
pub const DOCUMENT_TITLE: &str = "document";

/// Render `text` as a bionic-formatted PDF.
///
/// Fails with [`Error::Render`] if the settings are out of range or the
/// writer fails; no partial output is returned.
pub fn render_pdf(text: &str, settings: &Settings, fonts: &FontSet) -> Result<Vec<u8>> {
    render_pdf_with_config(
        text,
        settings,
        fonts,
        PdfWriterConfig::default().with_title(DOCUMENT_TITLE),
    )
}

/// Render with an explicit writer configuration (e.g. compression).
pub fn render_pdf_with_config(
    text: &str,
    settings: &Settings,
    fonts: &FontSet,
    config: PdfWriterConfig,
) -> Result<Vec<u8>> {
    settings
        .validate()
        .map_err(|e| Error::Render(e.to_string()))?;

    let paragraphs: Vec<Vec<Word<'_>>> = segment(text).into_iter().map(paragraph_words).collect();

    let geometry = PageGeometry::LETTER;
    let params = layout_params(settings);
    let pages = LayoutEngine::new(fonts, geometry, params).layout(&paragraphs);
    log::debug!(
        "Rendering {} paragraphs on {} pages",
        paragraphs.len(),
        pages.len()
    );

    let mut writer = PdfWriter::with_config(config);
    let regular = writer.add_font(fonts.regular.clone());
    let bold = writer.add_font(fonts.bold.clone());

    let background = settings.bg_color.to_unit();
    let text_color = settings.text_color.to_unit();

    for page_layout in &pages {
        let mut page = writer.add_page(geometry.width, geometry.height);
        page.fill_rect(0.0, 0.0, geometry.width, geometry.height, background);

        if !page_layout.lines.is_empty() {
            page.set_text_color(text_color);
            if settings.char_spacing != 0.0 {
                page.set_char_spacing(settings.char_spacing);
            }
        }
        for line in &page_layout.lines {
            page.move_to(line.x, line.baseline);
            for run in &line.runs {
                let font = match run.style {
                    Style::Regular => regular,
                    Style::Bold => bold,
                };
                page.show_text(font, settings.text_size, &run.text);
            }
        }
        page.finish();
    }

    writer
        .finish()
        .map_err(|e| Error::Render(e.to_string()))
}

/// Layout parameters derived from the settings.
pub fn layout_params(settings: &Settings) -> LayoutParams {
    LayoutParams {
        font_size: settings.text_size,
        leading: settings.leading(),
        char_spacing: settings.char_spacing,
        space_before: settings.text_size * PARAGRAPH_SPACE_BEFORE_RATIO,
        space_after: PARAGRAPH_SPACE_AFTER,
    }
}

/// Words of one paragraph; whitespace runs only separate words.
fn paragraph_words(paragraph: &str) -> Vec<Word<'_>> {
    Tokens::new(paragraph)
        .filter_map(|token| match token {
            Token::Word(word) => {
                let split = split_word(word);
                Some(Word::bionic(split.bold, split.normal))
            },
            Token::Whitespace(_) => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Theme;

    fn render(text: &str) -> String {
        let bytes = render_pdf(text, &Settings::default(), &FontSet::standard()).unwrap();
        String::from_utf8_lossy(&bytes).into_owned()
    }

    #[test]
    fn test_paragraph_words_split() {
        let words = paragraph_words("  héllo,   world! ");
        assert_eq!(words.len(), 2);
        assert_eq!(
            words[0].pieces,
            vec![(Style::Bold, "hél"), (Style::Regular, "lo,")]
        );
        assert_eq!(
            words[1].pieces,
            vec![(Style::Bold, "wor"), (Style::Regular, "ld!")]
        );
    }

    #[test]
    fn test_layout_params_from_settings() {
        let params = layout_params(&Settings::default());
        assert_eq!(params.font_size, 12.0);
        assert_eq!(params.leading, 24.0);
        assert_eq!(params.char_spacing, 1.0);
        assert_eq!(params.space_before, 6.0);
        assert_eq!(params.space_after, 6.0);
    }

    #[test]
    fn test_single_word_page() {
        let pdf = render("hello");
        assert!(pdf.starts_with("%PDF-1.7"));
        assert!(pdf.contains("q\n1 1 1 rg\n0 0 612 792 re\nf\nQ\n"));
        assert!(pdf.contains("0 0 0 rg\n"));
        assert!(pdf.contains("1 Tc\n"));
        assert!(pdf.contains("1 0 0 1 78 702 Tm\n"));
        assert!(pdf.contains("/F2 12 Tf\n(hel) Tj\n/F1 12 Tf\n(lo) Tj\n"));
        assert!(pdf.contains("/Title (document)"));
        assert!(pdf.trim_end().ends_with("%%EOF"));
    }

    #[test]
    fn test_theme_background() {
        let settings = Settings::default().with_theme(Theme::SoftBlue);
        let bytes = render_pdf("hi", &settings, &FontSet::standard()).unwrap();
        let pdf = String::from_utf8_lossy(&bytes);
        assert!(pdf.contains("0.902 0.941 1 rg\n0 0 612 792 re\nf\n"));
        assert!(pdf.contains("0 0.2 0.4 rg\n"));
    }

    #[test]
    fn test_invalid_settings_are_render_errors() {
        let settings = Settings::default().with_text_size(100.0);
        let err = render_pdf("hi", &settings, &FontSet::standard()).unwrap_err();
        assert!(matches!(err, Error::Render(_)));
        assert!(err.to_string().starts_with("Failed to generate PDF: "));
    }

    #[test]
    fn test_empty_text_still_renders_a_page() {
        let pdf = render("");
        assert!(pdf.contains("/Count 1"));
        assert!(pdf.contains("0 0 612 792 re"));
    }
}
