//! Integration tests for the converter and reader session.

use bionic_oxide::api::{Converter, ReaderSession};
use bionic_oxide::config::{FontChoice, Settings, Theme};
use bionic_oxide::extractors::{Upload, DOCX_MIME};
use bionic_oxide::fonts::FontSet;
use bionic_oxide::Error;
use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

fn docx(paragraphs: &[&str]) -> Upload {
    let body: String = paragraphs
        .iter()
        .map(|p| {
            if p.is_empty() {
                "<w:p/>".to_string()
            } else {
                format!("<w:p><w:r><w:t>{}</w:t></w:r></w:p>", p)
            }
        })
        .collect();
    let document = format!(
        r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{}</w:body></w:document>"#,
        body
    );

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    zip.start_file("word/document.xml", SimpleFileOptions::default())
        .unwrap();
    zip.write_all(document.as_bytes()).unwrap();
    Upload::new(zip.finish().unwrap().into_inner(), DOCX_MIME)
}

fn converter() -> Converter {
    Converter::with_fonts(FontSet::standard())
}

#[test]
fn test_docx_upload_produces_preview_and_download() {
    let converter = converter();
    let mut session = ReaderSession::new();
    session
        .upload(&converter, &docx(&["Bionic reading", "helps focus."]))
        .unwrap();

    assert_eq!(session.text(), Some("Bionic reading\n\nhelps focus."));
    assert!(session.preview().unwrap().contains("<b>Bio</b>nic</span>"));
    assert!(session.error().is_none());

    let download = session.download().expect("pdf available");
    assert_eq!(download.file_name, "document.pdf");
    assert_eq!(download.mime, "application/pdf");
    assert!(download.data.starts_with(b"%PDF-1.7"));
}

#[test]
fn test_all_empty_docx_clears_held_pdf() {
    let converter = converter();
    let mut session = ReaderSession::new();
    session.upload(&converter, &docx(&["Some text"])).unwrap();
    assert!(session.download().is_some());

    let err = session.upload(&converter, &docx(&["", "", ""])).unwrap_err();
    assert!(matches!(err, Error::EmptyText));
    assert_eq!(session.error(), Some("The document contains no text."));
    assert!(session.download().is_none());
    assert!(session.preview().is_none());
}

#[test]
fn test_unsupported_upload_reports_error() {
    let converter = converter();
    let mut session = ReaderSession::new();
    let err = session
        .upload(&converter, &Upload::new(b"text".to_vec(), "text/plain"))
        .unwrap_err();

    assert!(err.is_extract_error());
    assert!(session.error().unwrap().contains("unsupported file type"));
    assert!(session.download().is_none());
}

#[test]
fn test_theme_change_rerenders_both_outputs() {
    let converter = converter();
    let mut session = ReaderSession::new();
    session.upload(&converter, &docx(&["Colors"])).unwrap();
    let before = session.download().unwrap().data.to_vec();

    session.update_settings(&converter, Settings::default().with_theme(Theme::DarkMode));
    assert!(session.preview().unwrap().contains("background:#1A1A1A;"));
    let after = session.download().unwrap().data.to_vec();
    assert_ne!(before, after);
    assert!(String::from_utf8_lossy(&after).contains("0.102 0.102 0.102 rg"));
}

#[test]
fn test_settings_without_document_do_nothing() {
    let converter = converter();
    let mut session = ReaderSession::new();
    session.update_settings(&converter, Settings::default().with_text_size(20.0));

    assert_eq!(session.settings().text_size, 20.0);
    assert!(session.preview().is_none());
    assert!(session.error().is_none());
}

#[test]
fn test_conversion_keeps_preview_when_pdf_fails() {
    let conversion = converter()
        .convert(
            &docx(&["still previewed"]),
            &Settings::default().with_text_size(30.0),
        )
        .unwrap();
    assert!(conversion.preview.contains("<b>sti</b>ll</span>"));
    assert!(matches!(conversion.pdf, Err(Error::Render(_))));
}

#[test]
fn test_missing_font_files_fall_back() {
    let dir = tempfile::tempdir().unwrap();
    let converter = Converter::with_font_dir(dir.path());

    let warnings = converter.warnings();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].choice, FontChoice::Arial);
    assert!(warnings[0].to_string().ends_with("Using default fonts."));

    let conversion = converter
        .convert(&docx(&["fallback"]), &Settings::default())
        .unwrap();
    let pdf = conversion.pdf.unwrap();
    assert!(String::from_utf8_lossy(&pdf).contains("/BaseFont /Helvetica-Bold"));
}
