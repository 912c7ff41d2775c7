//! PDF document writer.
//!
//! Assembles complete PDF documents with proper structure:
//! header, body, xref table, and trailer.

use super::content_stream::ContentStreamBuilder;
use super::font_manager::{encode_win_ansi, EmbeddedFont, PdfFont};
use super::object_serializer::ObjectSerializer;
use crate::error::Result;
use crate::fonts::{subset_font, subset_tag};
use crate::object::{Object, ObjectRef};
use std::collections::{BTreeMap, BTreeSet};
use std::io::Write;

/// Configuration for PDF generation.
#[derive(Debug, Clone)]
pub struct PdfWriterConfig {
    /// PDF version (e.g., "1.7")
    pub version: String,
    /// Document title
    pub title: Option<String>,
    /// Creator application
    pub creator: Option<String>,
    /// Whether to compress streams
    pub compress: bool,
}

impl Default for PdfWriterConfig {
    fn default() -> Self {
        Self {
            version: "1.7".to_string(),
            title: None,
            creator: Some(crate::NAME.to_string()),
            compress: false,
        }
    }
}

impl PdfWriterConfig {
    /// Set document title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Enable or disable stream compression.
    ///
    /// When enabled, content streams and CMaps are compressed using
    /// FlateDecode (zlib/deflate). Embedded font programs are always
    /// compressed.
    pub fn with_compress(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }
}

/// Compress data using Flate/Deflate compression.
fn compress_data(data: &[u8]) -> std::io::Result<Vec<u8>> {
    use flate2::write::ZlibEncoder;
    use flate2::Compression;

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}

/// Handle to a font registered with a [`PdfWriter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FontId(usize);

/// A registered font plus the glyphs this document used from it.
struct FontSlot {
    font: PdfFont,
    resource: String,
    /// GID -> character, for the W array and ToUnicode CMap
    used_glyphs: BTreeMap<u16, char>,
}

/// A page being built.
pub struct PageBuilder<'a> {
    writer: &'a mut PdfWriter,
    page_index: usize,
}

impl<'a> PageBuilder<'a> {
    fn content(&mut self) -> &mut ContentStreamBuilder {
        &mut self.writer.pages[self.page_index].content_builder
    }

    /// Paint a filled rectangle.
    pub fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: (f32, f32, f32)) -> &mut Self {
        self.content().fill_rect(x, y, width, height, color);
        self
    }

    /// Set the text fill color.
    pub fn set_text_color(&mut self, color: (f32, f32, f32)) -> &mut Self {
        self.content().begin_text().set_fill_color(color.0, color.1, color.2);
        self
    }

    /// Set character spacing for subsequent text.
    pub fn set_char_spacing(&mut self, spacing: f32) -> &mut Self {
        self.content().begin_text().set_char_spacing(spacing);
        self
    }

    /// Move the text position to `(x, y)`.
    pub fn move_to(&mut self, x: f32, y: f32) -> &mut Self {
        self.content().begin_text().text_position(x, y);
        self
    }

    /// Show text in `font` at `size`, continuing from the current position.
    pub fn show_text(&mut self, font: FontId, size: f32, text: &str) -> &mut Self {
        let writer = &mut *self.writer;
        let slot = &mut writer.fonts[font.0];
        let content = &mut writer.pages[self.page_index].content_builder;

        content.begin_text().set_font(&slot.resource, size);
        match &slot.font {
            PdfFont::Standard(_) => {
                content.show_bytes(encode_win_ansi(text));
            },
            PdfFont::Embedded(embedded) => {
                let glyphs: Vec<u16> = text
                    .chars()
                    .map(|ch| {
                        let gid = embedded.glyph_id(ch);
                        slot.used_glyphs.entry(gid).or_insert(ch);
                        gid
                    })
                    .collect();
                content.show_glyphs(glyphs);
            },
        }
        self
    }

    /// Finish building this page and return to the writer.
    pub fn finish(mut self) -> &'a mut PdfWriter {
        self.content().end_text();
        self.writer
    }
}

/// Internal page data.
struct PageData {
    width: f32,
    height: f32,
    content_builder: ContentStreamBuilder,
}

/// PDF document writer.
///
/// Builds a complete PDF document with pages, fonts, and content. Objects
/// are numbered and written in a fixed order, so identical input always
/// produces identical bytes.
pub struct PdfWriter {
    config: PdfWriterConfig,
    pages: Vec<PageData>,
    fonts: Vec<FontSlot>,
}

impl PdfWriter {
    /// Create a new PDF writer with default config.
    pub fn new() -> Self {
        Self::with_config(PdfWriterConfig::default())
    }

    /// Create a PDF writer with custom config.
    pub fn with_config(config: PdfWriterConfig) -> Self {
        Self {
            config,
            pages: Vec::new(),
            fonts: Vec::new(),
        }
    }

    /// Register a font; it becomes resource `F1`, `F2`, ... in order.
    pub fn add_font(&mut self, font: PdfFont) -> FontId {
        let id = FontId(self.fonts.len());
        self.fonts.push(FontSlot {
            font,
            resource: format!("F{}", self.fonts.len() + 1),
            used_glyphs: BTreeMap::new(),
        });
        id
    }

    /// Add a page with the given dimensions.
    pub fn add_page(&mut self, width: f32, height: f32) -> PageBuilder<'_> {
        let page_index = self.pages.len();
        self.pages.push(PageData {
            width,
            height,
            content_builder: ContentStreamBuilder::new(),
        });
        PageBuilder {
            writer: self,
            page_index,
        }
    }

    /// Wrap stream data, compressing it when configured.
    fn stream(&self, dict: BTreeMap<String, Object>, data: Vec<u8>) -> Object {
        encode_stream(dict, data, self.config.compress)
    }

    /// Build the complete PDF document.
    pub fn finish(self) -> Result<Vec<u8>> {
        let mut objects: Vec<Object> = Vec::new();
        let mut next_id = 1u32;
        let mut alloc = || {
            let r = ObjectRef::new(next_id, 0);
            next_id += 1;
            r
        };

        let catalog_ref = alloc();
        let pages_ref = alloc();

        // Fonts: one object for standard fonts, five for embedded ones.
        let mut font_plan: Vec<(ObjectRef, Vec<ObjectRef>)> = Vec::new();
        for slot in &self.fonts {
            let head = alloc();
            let extra = match slot.font {
                PdfFont::Standard(_) => Vec::new(),
                PdfFont::Embedded(_) => (0..4).map(|_| alloc()).collect(),
            };
            font_plan.push((head, extra));
        }

        let page_refs: Vec<(ObjectRef, ObjectRef)> =
            self.pages.iter().map(|_| (alloc(), alloc())).collect();
        let info_ref = alloc();
        let size = next_id;

        // Catalog and page tree
        objects.push(ObjectSerializer::dict(vec![
            ("Type", ObjectSerializer::name("Catalog")),
            ("Pages", ObjectSerializer::reference(pages_ref)),
        ]));
        objects.push(ObjectSerializer::dict(vec![
            ("Type", ObjectSerializer::name("Pages")),
            (
                "Kids",
                Object::Array(page_refs.iter().map(|(p, _)| Object::Reference(*p)).collect()),
            ),
            ("Count", ObjectSerializer::integer(self.pages.len() as i64)),
        ]));

        // Font objects and the shared resource dictionary
        let mut font_resources = BTreeMap::new();
        for (slot, (head, extra)) in self.fonts.iter().zip(&font_plan) {
            font_resources.insert(slot.resource.clone(), Object::Reference(*head));
            match &slot.font {
                PdfFont::Standard(info) => {
                    objects.push(ObjectSerializer::dict(vec![
                        ("Type", ObjectSerializer::name("Font")),
                        ("Subtype", ObjectSerializer::name("Type1")),
                        ("BaseFont", ObjectSerializer::name(info.name)),
                        ("Encoding", ObjectSerializer::name("WinAnsiEncoding")),
                    ]));
                },
                PdfFont::Embedded(font) => {
                    objects.extend(self.embedded_font_objects(font, &slot.used_glyphs, extra));
                },
            }
        }

        // Pages and content streams
        for (page, (_, content_ref)) in self.pages.iter().zip(&page_refs) {
            objects.push(ObjectSerializer::dict(vec![
                ("Type", ObjectSerializer::name("Page")),
                ("Parent", ObjectSerializer::reference(pages_ref)),
                (
                    "MediaBox",
                    ObjectSerializer::rect(0.0, 0.0, page.width as f64, page.height as f64),
                ),
                ("Contents", ObjectSerializer::reference(*content_ref)),
                (
                    "Resources",
                    ObjectSerializer::dict(vec![("Font", Object::Dictionary(font_resources.clone()))]),
                ),
            ]));
            objects.push(self.stream(BTreeMap::new(), page.content_builder.build()));
        }

        // Info object
        let mut info_entries = Vec::new();
        if let Some(title) = &self.config.title {
            info_entries.push(("Title", ObjectSerializer::string(title)));
        }
        if let Some(creator) = &self.config.creator {
            info_entries.push(("Creator", ObjectSerializer::string(creator)));
        }
        objects.push(ObjectSerializer::dict(info_entries));

        debug_assert_eq!(objects.len() as u32, size - 1);

        // Serialize in object-number order
        let serializer = ObjectSerializer::compact();
        let mut output = Vec::new();
        writeln!(output, "%PDF-{}", self.config.version)?;
        output.extend_from_slice(b"%\xE2\xE3\xCF\xD3\n");

        let mut offsets = Vec::with_capacity(objects.len());
        for (i, obj) in objects.iter().enumerate() {
            offsets.push(output.len());
            output.extend_from_slice(&serializer.serialize_indirect(i as u32 + 1, 0, obj));
        }

        let xref_start = output.len();
        writeln!(output, "xref")?;
        writeln!(output, "0 {}", size)?;
        writeln!(output, "0000000000 65535 f ")?;
        for offset in &offsets {
            writeln!(output, "{:010} 00000 n ", offset)?;
        }

        let trailer = ObjectSerializer::dict(vec![
            ("Size", ObjectSerializer::integer(size as i64)),
            ("Root", ObjectSerializer::reference(catalog_ref)),
            ("Info", ObjectSerializer::reference(info_ref)),
        ]);
        writeln!(output, "trailer")?;
        output.extend_from_slice(&serializer.serialize(&trailer));
        writeln!(output)?;
        writeln!(output, "startxref")?;
        writeln!(output, "{}", xref_start)?;
        write!(output, "%%EOF")?;

        log::debug!(
            "Wrote PDF: {} pages, {} objects, {} bytes",
            self.pages.len(),
            size - 1,
            output.len()
        );
        Ok(output)
    }

    /// Type0 font, CIDFont, descriptor, font program and ToUnicode CMap.
    ///
    /// `refs` holds the four object numbers following the Type0 font. The
    /// program is subset to the used glyphs; if the font cannot be subset
    /// it is embedded whole.
    fn embedded_font_objects(
        &self,
        font: &EmbeddedFont,
        used_glyphs: &BTreeMap<u16, char>,
        refs: &[ObjectRef],
    ) -> Vec<Object> {
        let (cid_ref, descriptor_ref, file_ref, cmap_ref) = (refs[0], refs[1], refs[2], refs[3]);

        let glyphs: BTreeSet<u16> = used_glyphs.keys().copied().collect();
        let (program, base_font) = match subset_font(font.font_data(), &glyphs) {
            Ok(program) => (program, format!("{}+{}", subset_tag(&glyphs), font.name)),
            Err(e) => {
                log::warn!("Embedding full font {}: {}", font.name, e);
                (font.font_data().to_vec(), font.name.clone())
            },
        };

        let type0 = ObjectSerializer::dict(vec![
            ("Type", ObjectSerializer::name("Font")),
            ("Subtype", ObjectSerializer::name("Type0")),
            ("BaseFont", ObjectSerializer::name(&base_font)),
            ("Encoding", ObjectSerializer::name("Identity-H")),
            ("DescendantFonts", Object::Array(vec![Object::Reference(cid_ref)])),
            ("ToUnicode", ObjectSerializer::reference(cmap_ref)),
        ]);

        let cid_font = ObjectSerializer::dict(vec![
            ("Type", ObjectSerializer::name("Font")),
            ("Subtype", ObjectSerializer::name("CIDFontType2")),
            ("BaseFont", ObjectSerializer::name(&base_font)),
            (
                "CIDSystemInfo",
                ObjectSerializer::dict(vec![
                    ("Registry", ObjectSerializer::string("Adobe")),
                    ("Ordering", ObjectSerializer::string("Identity")),
                    ("Supplement", ObjectSerializer::integer(0)),
                ]),
            ),
            ("FontDescriptor", ObjectSerializer::reference(descriptor_ref)),
            ("CIDToGIDMap", ObjectSerializer::name("Identity")),
            ("W", widths_array(font, used_glyphs)),
        ]);

        let (llx, lly, urx, ury) = font.bbox;
        let descriptor = ObjectSerializer::dict(vec![
            ("Type", ObjectSerializer::name("FontDescriptor")),
            ("FontName", ObjectSerializer::name(&base_font)),
            ("Flags", ObjectSerializer::integer(font.flags as i64)),
            (
                "FontBBox",
                ObjectSerializer::array(
                    [llx, lly, urx, ury]
                        .iter()
                        .map(|v| ObjectSerializer::integer(*v as i64))
                        .collect(),
                ),
            ),
            ("ItalicAngle", ObjectSerializer::integer(0)),
            ("Ascent", ObjectSerializer::integer(font.ascender as i64)),
            ("Descent", ObjectSerializer::integer(font.descender as i64)),
            ("CapHeight", ObjectSerializer::integer(font.cap_height as i64)),
            ("StemV", ObjectSerializer::integer(font.stem_v as i64)),
            ("FontFile2", ObjectSerializer::reference(file_ref)),
        ]);

        let font_file = encode_stream(
            ObjectSerializer::dict_map(vec![(
                "Length1",
                ObjectSerializer::integer(program.len() as i64),
            )]),
            program,
            true,
        );

        let cmap = self.stream(BTreeMap::new(), tounicode_cmap(used_glyphs).into_bytes());

        vec![type0, cid_font, descriptor, font_file, cmap]
    }
}

impl Default for PdfWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Stream object, Flate-compressed when `compress` is set.
fn encode_stream(mut dict: BTreeMap<String, Object>, data: Vec<u8>, compress: bool) -> Object {
    let data = if compress {
        match compress_data(&data) {
            Ok(compressed) => {
                dict.insert("Filter".to_string(), ObjectSerializer::name("FlateDecode"));
                compressed
            },
            Err(e) => {
                log::warn!("Stream compression failed, writing uncompressed: {}", e);
                data
            },
        }
    } else {
        data
    };
    Object::Stream {
        dict,
        data: bytes::Bytes::from(data),
    }
}

/// CIDFont W array: `[start [w1 w2 ...] start2 [...] ...]` over runs of
/// consecutive glyph IDs.
fn widths_array(font: &EmbeddedFont, used_glyphs: &BTreeMap<u16, char>) -> Object {
    let glyphs: Vec<u16> = used_glyphs.keys().copied().collect();
    let mut items = Vec::new();

    let mut i = 0;
    while i < glyphs.len() {
        let start = glyphs[i];
        let mut widths = vec![ObjectSerializer::integer(font.glyph_width(start) as i64)];
        while i + 1 < glyphs.len() && glyphs[i + 1] == glyphs[i] + 1 {
            i += 1;
            widths.push(ObjectSerializer::integer(font.glyph_width(glyphs[i]) as i64));
        }
        items.push(ObjectSerializer::integer(start as i64));
        items.push(Object::Array(widths));
        i += 1;
    }
    Object::Array(items)
}

/// ToUnicode CMap mapping glyph IDs back to the characters they were drawn for.
fn tounicode_cmap(used_glyphs: &BTreeMap<u16, char>) -> String {
    let mut cmap = String::new();
    cmap.push_str("/CIDInit /ProcSet findresource begin\n");
    cmap.push_str("12 dict begin\n");
    cmap.push_str("begincmap\n");
    cmap.push_str("/CIDSystemInfo << /Registry (Adobe) /Ordering (UCS) /Supplement 0 >> def\n");
    cmap.push_str("/CMapName /Adobe-Identity-UCS def\n");
    cmap.push_str("/CMapType 2 def\n");
    cmap.push_str("1 begincodespacerange\n<0000> <FFFF>\nendcodespacerange\n");

    let mappings: Vec<(u16, char)> = used_glyphs.iter().map(|(g, c)| (*g, *c)).collect();
    // max 100 entries per bfchar section
    for chunk in mappings.chunks(100) {
        cmap.push_str(&format!("{} beginbfchar\n", chunk.len()));
        for &(gid, ch) in chunk {
            let mut units = [0u16; 2];
            let hex: String = ch
                .encode_utf16(&mut units)
                .iter()
                .map(|u| format!("{:04X}", u))
                .collect();
            cmap.push_str(&format!("<{:04X}> <{}>\n", gid, hex));
        }
        cmap.push_str("endbfchar\n");
    }

    cmap.push_str("endcmap\n");
    cmap.push_str("CMapName currentdict /CMap defineresource pop\n");
    cmap.push_str("end\nend\n");
    cmap
}
