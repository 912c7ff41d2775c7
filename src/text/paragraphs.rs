//! Paragraph segmentation on blank-line boundaries.

/// Separator between paragraphs in extracted document text.
pub const PARAGRAPH_SEPARATOR: &str = "\n\n";

/// Split text into paragraphs on the literal `"\n\n"` separator.
///
/// Empty paragraphs (consecutive separators) are kept as empty strings; the
/// PDF renderer draws them as visible gaps.
pub fn segment(text: &str) -> Vec<&str> {
    text.split(PARAGRAPH_SEPARATOR).collect()
}

/// Join paragraphs back together with the separator.
pub fn join<S: AsRef<str>>(paragraphs: &[S]) -> String {
    paragraphs
        .iter()
        .map(|p| p.as_ref())
        .collect::<Vec<_>>()
        .join(PARAGRAPH_SEPARATOR)
}
