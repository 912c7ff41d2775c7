//! Integration tests for rendering with embedded TrueType fonts.
//!
//! The fixture family covers printable ASCII, U+00B4 and a composite `é`.
//! Glyph IDs are `.notdef`, space, then U+0021.. in code point order.

use bionic_oxide::api::{Converter, ReaderSession};
use bionic_oxide::config::Settings;
use bionic_oxide::extractors::{extract, Upload, PDF_MIME};
use tempfile::TempDir;

const REGULAR: &[u8] = include_bytes!("fixtures/bionic-test-regular.ttf");
const BOLD: &[u8] = include_bytes!("fixtures/bionic-test-bold.ttf");

fn font_dir() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("arial.ttf"), REGULAR).unwrap();
    std::fs::write(dir.path().join("arialbd.ttf"), BOLD).unwrap();
    dir
}

fn render(converter: &Converter, text: &str) -> Vec<u8> {
    converter.render_pdf(text, &Settings::default()).unwrap()
}

#[test]
fn test_fonts_load_without_warning() {
    let dir = font_dir();
    let converter = Converter::with_font_dir(dir.path());
    assert!(converter.warnings().is_empty());
    assert!(converter.fonts(Settings::default().current_font).is_embedded());
}

#[test]
fn test_composite_font_objects() {
    let dir = font_dir();
    let pdf = render(&Converter::with_font_dir(dir.path()), "Bionic reading");
    let content = String::from_utf8_lossy(&pdf);

    assert_eq!(content.matches("/Subtype /Type0").count(), 2);
    assert_eq!(content.matches("/Subtype /CIDFontType2").count(), 2);
    assert!(content.contains("/Encoding /Identity-H"));
    assert!(content.contains("/CIDToGIDMap /Identity"));
    assert!(content.contains("/W ["));
    assert!(content.contains("/ToUnicode "));
    assert!(content.contains("/FontFile2 "));
    assert!(content.contains("+BionicTest-Regular"));
    assert!(content.contains("+BionicTest-Bold"));
    assert!(!content.contains("/BaseFont /Helvetica"));
}

#[test]
fn test_text_is_written_as_glyph_ids() {
    let dir = font_dir();
    let pdf = render(&Converter::with_font_dir(dir.path()), "Bionic");
    let content = String::from_utf8_lossy(&pdf);

    // B i o -> 35 74 80 in the bold face
    assert!(content.contains("/F2 12 Tf\n<0023004A0050> Tj\n"));
    // n i c -> 79 74 68 in the regular face
    assert!(content.contains("/F1 12 Tf\n<004F004A0044> Tj\n"));
}

#[test]
fn test_embedded_output_reads_back() {
    let dir = font_dir();
    let pdf = render(&Converter::with_font_dir(dir.path()), "Bionic reading");

    let text = extract(&Upload::new(pdf, PDF_MIME)).unwrap();
    assert!(text.contains("Bionic reading"), "extracted {:?}", text);
}

#[test]
fn test_session_download_with_embedded_fonts() {
    let dir = font_dir();
    let converter = Converter::with_font_dir(dir.path());
    let mut session = ReaderSession::new();

    let source = render(&converter, "Plain source text");
    session
        .upload(&converter, &Upload::new(source, PDF_MIME))
        .unwrap();

    let download = session.download().expect("pdf available");
    assert!(download.data.starts_with(b"%PDF-"));
    assert!(String::from_utf8_lossy(download.data).contains("+BionicTest-Bold"));
}
