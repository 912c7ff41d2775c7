// Allow some clippy lints that are too pedantic for this project
#![allow(clippy::too_many_arguments)]
#![allow(clippy::should_implement_trait)]
// Allow unused for tests
#![cfg_attr(test, allow(dead_code))]

//! # Bionic Oxide
//!
//! Reformats documents for dyslexic readers using "bionic reading": the
//! first half of every word is set in bold so the eye can anchor on it.
//!
//! ## Pipeline
//!
//! ```text
//! DOCX / PDF bytes
//!     ↓
//! [extractors] plain text, paragraphs separated by blank lines
//!     ↓
//! [text] tokens → words split into bold prefix and regular suffix
//!     ↓                                    ↓
//! [converters::html] preview markup    [converters::pdf] paginated PDF
//! ```
//!
//! Both outputs are driven by one [`Settings`](config::Settings) value:
//! font family, text size, line spacing, character spacing and a color
//! theme.
//!
//! ## Quick Start
//!
//! ```no_run
//! use bionic_oxide::api::Converter;
//! use bionic_oxide::config::{Settings, Theme};
//! use bionic_oxide::extractors::Upload;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let converter = Converter::new();
//! let settings = Settings::default().with_theme(Theme::Cream).with_text_size(14.0);
//!
//! let conversion = converter.convert(&Upload::from_file("chapter.pdf")?, &settings)?;
//! std::fs::write("preview.html", &conversion.preview)?;
//! std::fs::write("document.pdf", conversion.pdf?)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## License
//!
//! Licensed under either of:
//!
//! * Apache License, Version 2.0 ([LICENSE-APACHE](LICENSE-APACHE) or <http://www.apache.org/licenses/LICENSE-2.0>)
//! * MIT license ([LICENSE-MIT](LICENSE-MIT) or <http://opensource.org/licenses/MIT>)
//!
//! at your option.

#![warn(missing_docs)]

// Error handling
pub mod error;

// Settings
pub mod config;

// Text transform
pub mod text;

// Input
pub mod extractors;

// Output
pub mod converters;
pub mod object;
pub mod writer;

// Fonts
pub mod fonts;

// High-level API
pub mod api;

// Re-exports
pub use api::{Conversion, Converter, ReaderSession};
pub use config::{FontChoice, Rgb, Settings, Theme};
pub use error::{Error, Result};
pub use extractors::{DocumentKind, Upload};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
