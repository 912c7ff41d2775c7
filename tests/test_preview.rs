//! Integration tests for the HTML preview renderer.

use bionic_oxide::config::{Settings, Theme};
use bionic_oxide::converters::{preview_text, render_preview};
use bionic_oxide::text::tokenize;

#[test]
fn test_preview_wraps_words_in_styled_spans() {
    let html = preview_text("Read faster", &Settings::default());

    assert!(html.starts_with("<div style=\"background:#FFFFFF;padding:20px;border-radius:10px;\">"));
    assert!(html.ends_with("</div>"));
    assert_eq!(html.matches("<span style=").count(), 2);
    assert!(html.contains("<b>Re</b>ad</span> <span"));
    assert!(html.contains("<b>fas</b>ter</span>"));
}

#[test]
fn test_preview_style_reflects_settings() {
    let settings = Settings::default()
        .with_text_size(18.0)
        .with_line_spacing(1.5)
        .with_char_spacing(2.0)
        .with_theme(Theme::Cream);
    let html = preview_text("x", &settings);

    assert!(html.contains("background:#FFFFEA;"));
    assert!(html.contains(
        "style=\"font-family: Arial; font-size: 18pt; line-height: 1.5; letter-spacing: 2pt;color: #000000;\""
    ));
}

#[test]
fn test_preview_is_idempotent() {
    let settings = Settings::default().with_theme(Theme::SoftBlue);
    let text = "First paragraph, with punctuation!\n\nSecond — one.";
    let tokens = tokenize(text);

    let first = render_preview(&tokens, &settings);
    let second = render_preview(&tokens, &settings);
    assert_eq!(first, second);
    assert_eq!(first, preview_text(text, &settings));
}

#[test]
fn test_paragraph_breaks_pass_through() {
    let html = preview_text("A\n\nB", &Settings::default());
    assert!(html.contains("</span>\n\n<span"));
}

#[test]
fn test_all_themes_render() {
    for theme in Theme::ALL {
        let (text, background) = theme.colors();
        let html = preview_text("word", &Settings::default().with_theme(theme));
        assert!(html.contains(&format!("background:{};", background)));
        assert!(html.contains(&format!("color: {};", text)));
    }
}
