//! PDF writing module.
//!
//! ## Architecture
//!
//! ```text
//! paragraphs of styled words
//!     ↓
//! [LayoutEngine] (line breaking, pagination)
//!     ↓
//! [PdfWriter] / [PageBuilder] (pages, fonts, text runs)
//!     ↓
//! [ContentStreamBuilder] (operators → content stream bytes)
//!     ↓
//! [ObjectSerializer] (serializes PDF objects)
//!     ↓
//! PDF bytes
//! ```
//!
//! ## Example
//!
//! ```ignore
//! use bionic_oxide::writer::{FontInfo, PdfFont, PdfWriter};
//!
//! let mut writer = PdfWriter::new();
//! let font = writer.add_font(PdfFont::Standard(FontInfo::helvetica()));
//! let mut page = writer.add_page(612.0, 792.0);
//! page.move_to(72.0, 720.0).show_text(font, 12.0, "Hello, World!");
//! page.finish();
//! let bytes = writer.finish()?;
//! ```

mod content_stream;
mod font_manager;
mod layout;
mod object_serializer;
mod pdf_writer;

pub use content_stream::{ContentStreamBuilder, ContentStreamOp};
pub use font_manager::{
    encode_win_ansi, win_ansi_code, EmbeddedFont, FontInfo, FontWeight, PdfFont,
    DEFAULT_GLYPH_WIDTH,
};
pub use layout::{
    LayoutEngine, LayoutParams, PageGeometry, PageLayout, PlacedLine, Run, Style, TextMeasure,
    Word,
};
pub use object_serializer::ObjectSerializer;
pub use pdf_writer::{FontId, PageBuilder, PdfWriter, PdfWriterConfig};
