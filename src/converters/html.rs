//! HTML preview of bionic-formatted text.
//!
//! Each word becomes an inline styled `<span>` with its bold prefix in `<b>`;
//! whitespace passes through untouched so the browser's normal white-space
//! handling matches the PDF's single-space joins.

use crate::config::Settings;
use crate::text::{split_word, tokenize, Token};

/// Render tokens as preview markup.
///
/// Pure: the same tokens and settings always give byte-identical output.
///
/// # Examples
///
/// ```
/// use bionic_oxide::config::Settings;
/// use bionic_oxide::converters::html::render_preview;
/// use bionic_oxide::text::tokenize;
///
/// let html = render_preview(&tokenize("hello"), &Settings::default());
/// assert!(html.contains("<b>hel</b>lo</span>"));
/// ```
pub fn render_preview(tokens: &[Token<'_>], settings: &Settings) -> String {
    let style = span_style(settings);

    let mut out = String::new();
    out.push_str(&format!(
        "<div style=\"background:{};padding:20px;border-radius:10px;\">",
        settings.bg_color
    ));

    for token in tokens {
        match token {
            Token::Whitespace(ws) => out.push_str(ws),
            Token::Word(word) => {
                let split = split_word(word);
                out.push_str(&format!(
                    "<span style=\"{}\"><b>{}</b>{}</span>",
                    style,
                    escape_html(split.bold),
                    escape_html(split.normal)
                ));
            },
        }
    }

    out.push_str("</div>");
    out
}

/// Tokenize `text` and render it as preview markup.
pub fn preview_text(text: &str, settings: &Settings) -> String {
    let tokens = tokenize(text);
    log::debug!("Rendering preview of {} tokens", tokens.len());
    render_preview(&tokens, settings)
}

fn span_style(settings: &Settings) -> String {
    format!(
        "font-family: {}; font-size: {}pt; line-height: {}; letter-spacing: {}pt;color: {};",
        settings.current_font.family_name(),
        format_number(settings.text_size),
        format_number(settings.line_spacing),
        format_number(settings.char_spacing),
        settings.text_color
    )
}

/// Format a number without trailing zeros (`12`, `1.5`).
pub(crate) fn format_number(value: f32) -> String {
    let s = format!("{:.3}", value);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

/// Escape HTML special characters.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}
