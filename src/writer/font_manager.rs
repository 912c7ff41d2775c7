//! Font metrics and encodings for PDF generation.
//!
//! Two kinds of font can back a text run:
//! - the standard Helvetica pair, which needs no font program and is
//!   written with WinAnsiEncoding;
//! - an embedded TrueType font, written as a Type0/CIDFontType2 composite
//!   with Identity-H encoding so any character the font covers can be shown.

use std::collections::HashMap;
use std::sync::Arc;
use ttf_parser::{name_id, Face, GlyphId};

/// Width used for characters a font has no metrics for.
pub const DEFAULT_GLYPH_WIDTH: f32 = 500.0;

/// Font weight classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontWeight {
    /// Normal weight
    #[default]
    Normal,
    /// Bold weight
    Bold,
}

/// Information about a standard (non-embedded) PDF font.
#[derive(Debug, Clone)]
pub struct FontInfo {
    /// PostScript name (e.g., "Helvetica-Bold")
    pub name: &'static str,
    /// Font weight
    pub weight: FontWeight,
    /// Widths for U+0020..=U+007E in 1/1000 em
    widths: &'static [u16; 95],
}

impl FontInfo {
    /// Helvetica.
    pub fn helvetica() -> Self {
        Self {
            name: "Helvetica",
            weight: FontWeight::Normal,
            widths: &HELVETICA_WIDTHS,
        }
    }

    /// Helvetica-Bold.
    pub fn helvetica_bold() -> Self {
        Self {
            name: "Helvetica-Bold",
            weight: FontWeight::Bold,
            widths: &HELVETICA_BOLD_WIDTHS,
        }
    }

    /// Get the width of a single character in font units (1/1000 of em).
    ///
    /// Characters that WinAnsi cannot encode are drawn as `?` and measured
    /// as such.
    pub fn char_width(&self, ch: char) -> f32 {
        if let Some(w) = self.ascii_width(ch) {
            return w;
        }
        if let Some(base) = latin1_base_letter(ch) {
            return self.ascii_width(base).unwrap_or(DEFAULT_GLYPH_WIDTH);
        }
        if let Some(w) = self.punctuation_width(ch) {
            return w;
        }
        if win_ansi_code(ch).is_some() {
            return DEFAULT_GLYPH_WIDTH;
        }
        self.ascii_width('?').unwrap_or(DEFAULT_GLYPH_WIDTH)
    }

    fn ascii_width(&self, ch: char) -> Option<f32> {
        let code = ch as u32;
        (0x20..=0x7E)
            .contains(&code)
            .then(|| self.widths[(code - 0x20) as usize] as f32)
    }

    fn punctuation_width(&self, ch: char) -> Option<f32> {
        let bold = self.weight == FontWeight::Bold;
        let w = match ch {
            '\u{2018}' | '\u{2019}' | '\u{201A}' => {
                if bold {
                    278.0
                } else {
                    222.0
                }
            },
            '\u{201C}' | '\u{201D}' | '\u{201E}' => {
                if bold {
                    500.0
                } else {
                    333.0
                }
            },
            '\u{2013}' | '\u{20AC}' => 556.0,
            '\u{2014}' | '\u{2026}' | '\u{2030}' => 1000.0,
            '\u{2022}' => 350.0,
            _ => return None,
        };
        Some(w)
    }
}

/// Map a Latin-1 accented letter to the ASCII letter it is drawn from.
fn latin1_base_letter(ch: char) -> Option<char> {
    const BASES: &[u8; 64] = b"AAAAAAACEEEEIIIIDNOOOOO+OUUUUYPsaaaaaaaceeeeiiiidnooooo+ouuuuypy";
    let code = ch as u32;
    (0xC0..=0xFF)
        .contains(&code)
        .then(|| BASES[(code - 0xC0) as usize] as char)
}

/// Encode a character in WinAnsiEncoding.
pub fn win_ansi_code(ch: char) -> Option<u8> {
    let code = ch as u32;
    match code {
        0x20..=0x7E | 0xA0..=0xFF => Some(code as u8),
        _ => {
            let byte = match ch {
                '\u{20AC}' => 0x80,
                '\u{201A}' => 0x82,
                '\u{0192}' => 0x83,
                '\u{201E}' => 0x84,
                '\u{2026}' => 0x85,
                '\u{2020}' => 0x86,
                '\u{2021}' => 0x87,
                '\u{02C6}' => 0x88,
                '\u{2030}' => 0x89,
                '\u{0160}' => 0x8A,
                '\u{2039}' => 0x8B,
                '\u{0152}' => 0x8C,
                '\u{017D}' => 0x8E,
                '\u{2018}' => 0x91,
                '\u{2019}' => 0x92,
                '\u{201C}' => 0x93,
                '\u{201D}' => 0x94,
                '\u{2022}' => 0x95,
                '\u{2013}' => 0x96,
                '\u{2014}' => 0x97,
                '\u{02DC}' => 0x98,
                '\u{2122}' => 0x99,
                '\u{0161}' => 0x9A,
                '\u{203A}' => 0x9B,
                '\u{0153}' => 0x9C,
                '\u{017E}' => 0x9E,
                '\u{0178}' => 0x9F,
                _ => return None,
            };
            Some(byte)
        },
    }
}

/// Encode text in WinAnsiEncoding, replacing unmappable characters with `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|ch| win_ansi_code(ch).unwrap_or(b'?'))
        .collect()
}

#[rustfmt::skip]
static HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
static HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

// =============================================================================
// Embedded Font Support
// =============================================================================

/// Embedded TrueType font for PDF generation.
///
/// Holds the font program and the lookups needed to encode text as glyph
/// IDs. Immutable once loaded, so one instance can back any number of
/// documents; glyph usage is tracked per document by the writer.
#[derive(Debug)]
pub struct EmbeddedFont {
    /// PostScript name used as BaseFont
    pub name: String,
    /// Raw font data (for embedding)
    font_data: Vec<u8>,
    /// Unicode -> GID
    glyph_lookup: HashMap<char, u16>,
    /// GID -> width in 1/1000 em
    glyph_widths: Vec<u16>,
    /// Ascender in 1/1000 em
    pub ascender: i32,
    /// Descender in 1/1000 em (negative)
    pub descender: i32,
    /// Cap height in 1/1000 em
    pub cap_height: i32,
    /// Font bounding box (llx, lly, urx, ury) in 1/1000 em
    pub bbox: (i32, i32, i32, i32),
    /// FontDescriptor flags
    pub flags: u32,
    /// Stem vertical width
    pub stem_v: i16,
}

impl EmbeddedFont {
    /// Create an embedded font from raw TTF data.
    pub fn from_data(data: Vec<u8>) -> Result<Self, String> {
        let face = Face::parse(&data, 0).map_err(|e| format!("Failed to parse font: {}", e))?;
        let units_per_em = face.units_per_em() as i32;
        let to_pdf = |value: i16| value as i32 * 1000 / units_per_em;

        let mut glyph_lookup = HashMap::new();
        if let Some(cmap) = face.tables().cmap {
            for subtable in cmap.subtables {
                if !subtable.is_unicode() {
                    continue;
                }
                subtable.codepoints(|cp| {
                    if let (Some(ch), Some(gid)) = (char::from_u32(cp), subtable.glyph_index(cp)) {
                        glyph_lookup.entry(ch).or_insert(gid.0);
                    }
                });
            }
        }
        if glyph_lookup.is_empty() {
            return Err("Failed to parse font: no Unicode character map".to_string());
        }

        let glyph_widths = (0..face.number_of_glyphs())
            .map(|gid| {
                let advance = face.glyph_hor_advance(GlyphId(gid)).unwrap_or(0);
                (advance as i32 * 1000 / units_per_em) as u16
            })
            .collect();

        // BaseFont must be a valid name; keep only characters a PDF name holds cleanly.
        let name: String = face
            .names()
            .into_iter()
            .find(|n| n.name_id == name_id::POST_SCRIPT_NAME)
            .and_then(|n| n.to_string())
            .unwrap_or_default()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
            .collect();

        let ascender = face.ascender();
        let bbox = face.global_bounding_box();

        // FixedPitch, Nonsymbolic, Italic (ISO 32000-1 Table 123)
        let mut flags = 1 << 5;
        if face.is_monospaced() {
            flags |= 1;
        }
        if face.is_italic() {
            flags |= 1 << 6;
        }

        Ok(Self {
            name: if name.is_empty() { "Embedded".to_string() } else { name },
            glyph_lookup,
            glyph_widths,
            ascender: to_pdf(ascender),
            descender: to_pdf(face.descender()),
            cap_height: to_pdf(face.capital_height().unwrap_or(ascender)),
            bbox: (
                to_pdf(bbox.x_min),
                to_pdf(bbox.y_min),
                to_pdf(bbox.x_max),
                to_pdf(bbox.y_max),
            ),
            flags,
            // TrueType has no stem width; the usual estimate by weight
            stem_v: if face.is_bold() { 140 } else { 80 },
            font_data: data,
        })
    }

    /// Load an embedded font from a file.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, String> {
        let data =
            std::fs::read(path.as_ref()).map_err(|e| format!("Failed to read font file: {}", e))?;
        Self::from_data(data)
    }

    /// Get the glyph ID for a character, or 0 (.notdef).
    pub fn glyph_id(&self, ch: char) -> u16 {
        self.glyph_lookup.get(&ch).copied().unwrap_or(0)
    }

    /// Get the width of a glyph in 1/1000 em units.
    pub fn glyph_width(&self, gid: u16) -> u16 {
        self.glyph_widths
            .get(gid as usize)
            .copied()
            .unwrap_or(DEFAULT_GLYPH_WIDTH as u16)
    }

    /// Get the width of a character in 1/1000 em units.
    pub fn char_width(&self, ch: char) -> f32 {
        self.glyph_width(self.glyph_id(ch)) as f32
    }

    /// Get the raw font data for embedding.
    pub fn font_data(&self) -> &[u8] {
        &self.font_data
    }
}

/// A font as seen by layout and the writer.
#[derive(Debug, Clone)]
pub enum PdfFont {
    /// Standard font, not embedded
    Standard(FontInfo),
    /// Embedded TrueType font
    Embedded(Arc<EmbeddedFont>),
}

impl PdfFont {
    /// PostScript name written as BaseFont.
    pub fn name(&self) -> &str {
        match self {
            PdfFont::Standard(info) => info.name,
            PdfFont::Embedded(font) => &font.name,
        }
    }

    /// Advance width of a character in 1/1000 em.
    pub fn char_width(&self, ch: char) -> f32 {
        match self {
            PdfFont::Standard(info) => info.char_width(ch),
            PdfFont::Embedded(font) => font.char_width(ch),
        }
    }

    /// Whether the font program is embedded in the output.
    pub fn is_embedded(&self) -> bool {
        matches!(self, PdfFont::Embedded(_))
    }
}
