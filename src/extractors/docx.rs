//! DOCX text extraction.
//!
//! DOCX files are ZIP archives; the body lives in `word/document.xml`.
//! Only paragraphs that are direct children of `w:body` are read. Table
//! cells and text boxes hold their own nested paragraphs and are skipped.

use crate::text::PARAGRAPH_SEPARATOR;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::{Cursor, Read};
use zip::ZipArchive;

const DOCUMENT_PART: &str = "word/document.xml";

/// Extract body paragraphs from DOCX bytes, joined by blank lines.
///
/// Empty paragraphs are kept as empty strings so the paragraph count of the
/// document survives. Errors are returned as the underlying library message.
pub fn extract_text(bytes: &[u8]) -> Result<String, String> {
    let paragraphs = extract_paragraphs(bytes)?;
    Ok(paragraphs.join(PARAGRAPH_SEPARATOR))
}

/// Extract body paragraphs from DOCX bytes.
pub fn extract_paragraphs(bytes: &[u8]) -> Result<Vec<String>, String> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| format!("Failed to open DOCX archive: {}", e))?;

    let mut xml = String::new();
    archive
        .by_name(DOCUMENT_PART)
        .map_err(|e| format!("Missing {}: {}", DOCUMENT_PART, e))?
        .read_to_string(&mut xml)
        .map_err(|e| format!("Failed to read {}: {}", DOCUMENT_PART, e))?;

    parse_document_xml(&xml)
}

/// Parse the body paragraphs out of `word/document.xml`.
pub fn parse_document_xml(xml: &str) -> Result<Vec<String>, String> {
    // Whitespace inside w:t is significant, so text is not trimmed.
    let mut reader = Reader::from_str(xml);

    let mut buf = Vec::new();
    let mut stack: Vec<Vec<u8>> = Vec::new();
    let mut paragraphs = Vec::new();
    let mut current = String::new();
    let mut in_text = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let name = e.local_name().as_ref().to_vec();
                if name == b"p" && parent_is(&stack, b"body") {
                    current.clear();
                } else if name == b"t" && parent_is(&stack, b"r") && in_body_paragraph(&stack) {
                    in_text = true;
                }
                stack.push(name);
            },
            Ok(Event::Empty(ref e)) => match e.local_name().as_ref() {
                b"p" if parent_is(&stack, b"body") => paragraphs.push(String::new()),
                b"tab" if parent_is(&stack, b"r") && in_body_paragraph(&stack) => {
                    current.push('\t')
                },
                b"br" | b"cr" if parent_is(&stack, b"r") && in_body_paragraph(&stack) => {
                    current.push('\n')
                },
                _ => {},
            },
            Ok(Event::Text(ref e)) if in_text => {
                let text = e
                    .unescape()
                    .map_err(|e| format!("Invalid text in {}: {}", DOCUMENT_PART, e))?;
                current.push_str(&text);
            },
            Ok(Event::End(_)) => {
                let name = stack.pop().unwrap_or_default();
                if name == b"t" {
                    in_text = false;
                } else if name == b"p" && parent_is(&stack, b"body") {
                    paragraphs.push(std::mem::take(&mut current));
                }
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(format!(
                    "Malformed {} at position {}: {}",
                    DOCUMENT_PART,
                    reader.buffer_position(),
                    e
                ))
            },
            _ => {},
        }
        buf.clear();
    }

    log::debug!("Read {} body paragraphs from DOCX", paragraphs.len());
    Ok(paragraphs)
}

fn parent_is(stack: &[Vec<u8>], name: &[u8]) -> bool {
    stack.last().is_some_and(|top| top.as_slice() == name)
}

/// Inside a body paragraph and not inside a paragraph nested within it.
fn in_body_paragraph(stack: &[Vec<u8>]) -> bool {
    match stack.iter().position(|name| name.as_slice() == b"body") {
        Some(body) => {
            stack.get(body + 1).is_some_and(|name| name.as_slice() == b"p")
                && !stack[body + 2..].iter().any(|name| name.as_slice() == b"p")
        },
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document(body: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{}<w:sectPr/></w:body></w:document>"#,
            body
        )
    }

    #[test]
    fn test_runs_are_concatenated() {
        let xml = document(
            r#"<w:p><w:r><w:rPr><w:b/></w:rPr><w:t>Hello</w:t></w:r><w:r><w:t xml:space="preserve"> world</w:t></w:r></w:p>"#,
        );
        assert_eq!(parse_document_xml(&xml).unwrap(), vec!["Hello world"]);
    }

    #[test]
    fn test_empty_paragraphs_are_kept() {
        let xml = document(r#"<w:p><w:r><w:t>A</w:t></w:r></w:p><w:p/><w:p><w:pPr/></w:p><w:p><w:r><w:t>B</w:t></w:r></w:p>"#);
        assert_eq!(parse_document_xml(&xml).unwrap(), vec!["A", "", "", "B"]);
    }

    #[test]
    fn test_tabs_and_breaks() {
        let xml = document(
            r#"<w:p><w:pPr><w:tabs><w:tab w:val="left" w:pos="720"/></w:tabs></w:pPr><w:r><w:t>a</w:t><w:tab/><w:t>b</w:t><w:br/><w:t>c</w:t></w:r></w:p>"#,
        );
        assert_eq!(parse_document_xml(&xml).unwrap(), vec!["a\tb\nc"]);
    }

    #[test]
    fn test_entities_are_unescaped() {
        let xml = document(r#"<w:p><w:r><w:t>Tom &amp; Jerry &lt;3</w:t></w:r></w:p>"#);
        assert_eq!(parse_document_xml(&xml).unwrap(), vec!["Tom & Jerry <3"]);
    }

    #[test]
    fn test_hyperlink_runs_are_included() {
        let xml = document(
            r#"<w:p><w:r><w:t xml:space="preserve">see </w:t></w:r><w:hyperlink><w:r><w:t>here</w:t></w:r></w:hyperlink></w:p>"#,
        );
        assert_eq!(parse_document_xml(&xml).unwrap(), vec!["see here"]);
    }

    #[test]
    fn test_tables_are_skipped() {
        let xml = document(
            r#"<w:p><w:r><w:t>before</w:t></w:r></w:p><w:tbl><w:tr><w:tc><w:p><w:r><w:t>cell</w:t></w:r></w:p></w:tc></w:tr></w:tbl><w:p><w:r><w:t>after</w:t></w:r></w:p>"#,
        );
        assert_eq!(parse_document_xml(&xml).unwrap(), vec!["before", "after"]);
    }

    #[test]
    fn test_text_box_paragraphs_are_skipped() {
        let xml = document(
            r#"<w:p><w:r><w:t>outer</w:t></w:r><w:r><w:pict><w:txbxContent><w:p><w:r><w:t>boxed</w:t></w:r></w:p></w:txbxContent></w:pict></w:r></w:p>"#,
        );
        assert_eq!(parse_document_xml(&xml).unwrap(), vec!["outer"]);
    }

    #[test]
    fn test_malformed_xml() {
        let err = parse_document_xml("<w:document><w:body><w:p></w:body>").unwrap_err();
        assert!(err.contains("Malformed"));
    }

    #[test]
    fn test_not_a_zip() {
        let err = extract_text(b"definitely not a zip").unwrap_err();
        assert!(err.starts_with("Failed to open DOCX archive"));
    }
}
