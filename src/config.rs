//! Typography and theme configuration.
//!
//! [`Settings`] is a plain value owned by the caller (the UI layer). Renderers
//! only ever borrow it, so the same snapshot drives both the HTML preview and
//! the PDF.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Smallest selectable text size in points.
pub const MIN_TEXT_SIZE: f32 = 8.0;
/// Largest selectable text size in points.
pub const MAX_TEXT_SIZE: f32 = 24.0;
/// Smallest line spacing multiplier.
pub const MIN_LINE_SPACING: f32 = 1.0;
/// Largest line spacing multiplier.
pub const MAX_LINE_SPACING: f32 = 3.0;
/// Line spacing slider increment.
pub const LINE_SPACING_STEP: f32 = 0.25;
/// Largest character spacing in points.
pub const MAX_CHAR_SPACING: f32 = 5.0;

/// A 24-bit RGB color, written as `#RRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Rgb {
    /// Create a color from its channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channels scaled to the 0.0..=1.0 range used by PDF color operators.
    pub fn to_unit(self) -> (f32, f32, f32) {
        (self.r as f32 / 255.0, self.g as f32 / 255.0, self.b as f32 / 255.0)
    }
}

impl FromStr for Rgb {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let hex = s.trim().strip_prefix('#').unwrap_or(s.trim());
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(Error::InvalidColor(s.to_string()));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| Error::InvalidColor(s.to_string()))
        };
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl TryFrom<String> for Rgb {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Rgb> for String {
    fn from(value: Rgb) -> Self {
        value.to_string()
    }
}

/// Fixed color palette offered to the reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Theme {
    /// Black on white
    #[default]
    Default,
    /// Black on cream
    Cream,
    /// Navy on light blue
    #[serde(rename = "Soft Blue")]
    SoftBlue,
    /// White on near-black
    #[serde(rename = "Dark Mode")]
    DarkMode,
}

/// `(theme, label, text color, background color)`
const THEME_TABLE: [(Theme, &str, Rgb, Rgb); 4] = [
    (Theme::Default, "Default", Rgb::new(0x00, 0x00, 0x00), Rgb::new(0xFF, 0xFF, 0xFF)),
    (Theme::Cream, "Cream", Rgb::new(0x00, 0x00, 0x00), Rgb::new(0xFF, 0xFF, 0xEA)),
    (Theme::SoftBlue, "Soft Blue", Rgb::new(0x00, 0x33, 0x66), Rgb::new(0xE6, 0xF0, 0xFF)),
    (Theme::DarkMode, "Dark Mode", Rgb::new(0xFF, 0xFF, 0xFF), Rgb::new(0x1A, 0x1A, 0x1A)),
];

impl Theme {
    /// All themes in display order.
    pub const ALL: [Theme; 4] = [Theme::Default, Theme::Cream, Theme::SoftBlue, Theme::DarkMode];

    fn entry(self) -> &'static (Theme, &'static str, Rgb, Rgb) {
        // Every variant has a row; checked by `test_theme_table_complete`.
        THEME_TABLE
            .iter()
            .find(|(theme, ..)| *theme == self)
            .unwrap_or(&THEME_TABLE[0])
    }

    /// Human readable label.
    pub fn label(self) -> &'static str {
        self.entry().1
    }

    /// `(text_color, bg_color)` pair for this theme.
    pub fn colors(self) -> (Rgb, Rgb) {
        let (_, _, text, bg) = *self.entry();
        (text, bg)
    }

    /// Look up a theme by label, case-insensitively (`"dark mode"`, `"cream"`, ...).
    pub fn from_label(label: &str) -> Option<Theme> {
        let wanted = label.trim().replace(['-', '_'], " ");
        THEME_TABLE
            .iter()
            .find(|(_, name, ..)| name.eq_ignore_ascii_case(&wanted))
            .map(|(theme, ..)| *theme)
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Font families the reader can choose from.
///
/// Each family maps to a regular and a bold font file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FontChoice {
    /// Arial (`arial.ttf` / `arialbd.ttf`)
    #[default]
    Arial,
}

/// `(family, css family name, regular file, bold file)`
const FONT_TABLE: [(FontChoice, &str, &str, &str); 1] =
    [(FontChoice::Arial, "Arial", "arial.ttf", "arialbd.ttf")];

impl FontChoice {
    /// All selectable families.
    pub const ALL: [FontChoice; 1] = [FontChoice::Arial];

    fn entry(self) -> &'static (FontChoice, &'static str, &'static str, &'static str) {
        FONT_TABLE
            .iter()
            .find(|(font, ..)| *font == self)
            .unwrap_or(&FONT_TABLE[0])
    }

    /// Family name used in CSS and as the PDF font label.
    pub fn family_name(self) -> &'static str {
        self.entry().1
    }

    /// `(regular, bold)` font file names.
    pub fn font_files(self) -> (&'static str, &'static str) {
        let (_, _, regular, bold) = *self.entry();
        (regular, bold)
    }
}

impl fmt::Display for FontChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.family_name())
    }
}

/// Typography and color settings shared by both renderers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Text size in points
    pub text_size: f32,
    /// Line height as a multiple of the text size
    pub line_spacing: f32,
    /// Extra space after every character, in points
    pub char_spacing: f32,
    /// Page background color
    pub bg_color: Rgb,
    /// Text color
    pub text_color: Rgb,
    /// Active font family
    pub current_font: FontChoice,
}

impl Default for Settings {
    fn default() -> Self {
        let (text_color, bg_color) = Theme::Default.colors();
        Self {
            text_size: 12.0,
            line_spacing: 2.0,
            char_spacing: 1.0,
            bg_color,
            text_color,
            current_font: FontChoice::Arial,
        }
    }
}

impl Settings {
    /// Create settings with the default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the text size in points.
    pub fn with_text_size(mut self, size: f32) -> Self {
        self.text_size = size;
        self
    }

    /// Set the line spacing multiplier.
    pub fn with_line_spacing(mut self, spacing: f32) -> Self {
        self.line_spacing = spacing;
        self
    }

    /// Set the character spacing in points.
    pub fn with_char_spacing(mut self, spacing: f32) -> Self {
        self.char_spacing = spacing;
        self
    }

    /// Use the colors of a theme.
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.apply_theme(theme);
        self
    }

    /// Set the font family.
    pub fn with_font(mut self, font: FontChoice) -> Self {
        self.current_font = font;
        self
    }

    /// Replace the text and background colors with those of `theme`.
    pub fn apply_theme(&mut self, theme: Theme) {
        let (text_color, bg_color) = theme.colors();
        self.text_color = text_color;
        self.bg_color = bg_color;
    }

    /// The theme whose colors match the current ones, if any.
    pub fn theme(&self) -> Option<Theme> {
        Theme::ALL
            .into_iter()
            .find(|theme| theme.colors() == (self.text_color, self.bg_color))
    }

    /// Distance between successive baselines, in points.
    pub fn leading(&self) -> f32 {
        self.text_size * self.line_spacing
    }

    /// Check every value against the ranges offered by the controls.
    pub fn validate(&self) -> Result<()> {
        if !self.text_size.is_finite()
            || !(MIN_TEXT_SIZE..=MAX_TEXT_SIZE).contains(&self.text_size)
        {
            return Err(Error::InvalidSettings(format!(
                "text size {} pt is outside {}..={} pt",
                self.text_size, MIN_TEXT_SIZE, MAX_TEXT_SIZE
            )));
        }

        if !self.line_spacing.is_finite()
            || !(MIN_LINE_SPACING..=MAX_LINE_SPACING).contains(&self.line_spacing)
        {
            return Err(Error::InvalidSettings(format!(
                "line spacing {} is outside {}..={}",
                self.line_spacing, MIN_LINE_SPACING, MAX_LINE_SPACING
            )));
        }

        let steps = (self.line_spacing - MIN_LINE_SPACING) / LINE_SPACING_STEP;
        if (steps - steps.round()).abs() > 1e-4 {
            return Err(Error::InvalidSettings(format!(
                "line spacing {} is not a multiple of {}",
                self.line_spacing, LINE_SPACING_STEP
            )));
        }

        if !self.char_spacing.is_finite() || !(0.0..=MAX_CHAR_SPACING).contains(&self.char_spacing)
        {
            return Err(Error::InvalidSettings(format!(
                "character spacing {} pt is outside 0..={} pt",
                self.char_spacing, MAX_CHAR_SPACING
            )));
        }

        Ok(())
    }

    /// Parse settings from JSON. Missing fields take their default values.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.text_size, 12.0);
        assert_eq!(settings.line_spacing, 2.0);
        assert_eq!(settings.char_spacing, 1.0);
        assert_eq!(settings.bg_color.to_string(), "#FFFFFF");
        assert_eq!(settings.text_color.to_string(), "#000000");
        assert_eq!(settings.current_font, FontChoice::Arial);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_theme_table_complete() {
        for theme in Theme::ALL {
            let row = THEME_TABLE.iter().find(|(t, ..)| *t == theme);
            assert!(row.is_some(), "missing row for {:?}", theme);
        }
    }

    #[test]
    fn test_theme_colors() {
        let (text, bg) = Theme::Cream.colors();
        assert_eq!(text.to_string(), "#000000");
        assert_eq!(bg.to_string(), "#FFFFEA");

        let (text, bg) = Theme::SoftBlue.colors();
        assert_eq!(text.to_string(), "#003366");
        assert_eq!(bg.to_string(), "#E6F0FF");

        let (text, bg) = Theme::DarkMode.colors();
        assert_eq!(text.to_string(), "#FFFFFF");
        assert_eq!(bg.to_string(), "#1A1A1A");
    }

    #[test]
    fn test_theme_from_label() {
        assert_eq!(Theme::from_label("Dark Mode"), Some(Theme::DarkMode));
        assert_eq!(Theme::from_label("soft-blue"), Some(Theme::SoftBlue));
        assert_eq!(Theme::from_label("cream"), Some(Theme::Cream));
        assert_eq!(Theme::from_label("neon"), None);
    }

    #[test]
    fn test_apply_theme() {
        let mut settings = Settings::default();
        settings.apply_theme(Theme::DarkMode);
        assert_eq!(settings.theme(), Some(Theme::DarkMode));
        assert_eq!(settings.bg_color, Rgb::new(0x1A, 0x1A, 0x1A));
    }

    #[test]
    fn test_rgb_parse() {
        assert_eq!("#E6F0FF".parse::<Rgb>().unwrap(), Rgb::new(0xE6, 0xF0, 0xFF));
        assert_eq!("ffffea".parse::<Rgb>().unwrap(), Rgb::new(0xFF, 0xFF, 0xEA));
        assert!("#FFF".parse::<Rgb>().is_err());
        assert!("#GGGGGG".parse::<Rgb>().is_err());
        assert!("red".parse::<Rgb>().is_err());
    }

    #[test]
    fn test_rgb_to_unit() {
        let (r, g, b) = Rgb::new(255, 0, 51).to_unit();
        assert_eq!(r, 1.0);
        assert_eq!(g, 0.0);
        assert!((b - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_validate_ranges() {
        assert!(Settings::default().with_text_size(8.0).validate().is_ok());
        assert!(Settings::default().with_text_size(24.0).validate().is_ok());
        assert!(Settings::default().with_text_size(7.5).validate().is_err());
        assert!(Settings::default().with_text_size(f32::NAN).validate().is_err());
        assert!(Settings::default().with_line_spacing(1.25).validate().is_ok());
        assert!(Settings::default().with_line_spacing(1.3).validate().is_err());
        assert!(Settings::default().with_line_spacing(3.25).validate().is_err());
        assert!(Settings::default().with_char_spacing(0.0).validate().is_ok());
        assert!(Settings::default().with_char_spacing(-1.0).validate().is_err());
        assert!(Settings::default().with_char_spacing(5.5).validate().is_err());
    }

    #[test]
    fn test_leading() {
        let settings = Settings::default().with_text_size(14.0).with_line_spacing(1.5);
        assert_eq!(settings.leading(), 21.0);
    }

    #[test]
    fn test_settings_json() {
        let settings =
            Settings::from_json_str(r##"{"text_size": 16, "bg_color": "#FFFFEA"}"##).unwrap();
        assert_eq!(settings.text_size, 16.0);
        assert_eq!(settings.bg_color, Rgb::new(0xFF, 0xFF, 0xEA));
        assert_eq!(settings.line_spacing, 2.0);

        let json = serde_json::to_string(&settings).unwrap();
        assert!(json.contains("\"#FFFFEA\""));
        assert!(json.contains("\"Arial\""));
    }

    #[test]
    fn test_settings_json_rejects_bad_values() {
        assert!(Settings::from_json_str(r#"{"bg_color": "blue"}"#).is_err());
        assert!(Settings::from_json_str(r#"{"text_size": 40}"#).is_err());
    }

    #[test]
    fn test_font_choice_files() {
        assert_eq!(FontChoice::Arial.font_files(), ("arial.ttf", "arialbd.ttf"));
        assert_eq!(FontChoice::Arial.family_name(), "Arial");
    }
}
