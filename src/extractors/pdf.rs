//! PDF text extraction.

use crate::text::PARAGRAPH_SEPARATOR;
use lopdf::Document as LoDocument;

/// Extract the text of every page, pages joined by blank lines.
///
/// Errors are returned as the underlying library message.
pub fn extract_text(bytes: &[u8]) -> Result<String, String> {
    Ok(extract_pages(bytes)?.join(PARAGRAPH_SEPARATOR))
}

/// Extract the text of each page in page order.
///
/// Encrypted files are opened with the empty user password, which covers
/// files restricted only by an owner password.
pub fn extract_pages(bytes: &[u8]) -> Result<Vec<String>, String> {
    let mut doc = LoDocument::load_mem(bytes).map_err(|e| e.to_string())?;
    if doc.is_encrypted() {
        doc.decrypt("")
            .map_err(|e| format!("password-protected PDF files are not supported: {}", e))?;
        log::debug!("Opened encrypted PDF with the empty user password");
    }

    let pages = doc.get_pages();
    let mut texts = Vec::with_capacity(pages.len());
    for &page_number in pages.keys() {
        let text = doc
            .extract_text(&[page_number])
            .map_err(|e| format!("page {}: {}", page_number, e))?;
        texts.push(text);
    }

    log::debug!("Read text from {} PDF pages", texts.len());
    Ok(texts)
}
