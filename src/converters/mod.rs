//! Renderers for bionic-formatted text.
//!
//! Both renderers take the same [`Settings`](crate::config::Settings)
//! snapshot, so the preview and the PDF agree on fonts, sizes and colors:
//! - **HTML**: inline-styled preview markup
//! - **PDF**: paginated US Letter document
//!
//! # Examples
//!
//! ```no_run
//! use bionic_oxide::config::Settings;
//! use bionic_oxide::converters::{preview_text, render_pdf};
//! use bionic_oxide::fonts::FontSet;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let settings = Settings::default();
//! let html = preview_text("Reading made easier.", &settings);
//! let pdf = render_pdf("Reading made easier.", &settings, &FontSet::standard())?;
//! # Ok(())
//! # }
//! ```

pub mod html;
pub mod pdf;

pub use html::{escape_html, preview_text, render_preview};
pub use pdf::{layout_params, render_pdf, render_pdf_with_config};
