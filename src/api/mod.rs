//! High-level API for hosts of the reader.
//!
//! [`Converter`] runs the whole pipeline for one document and one settings
//! snapshot. [`ReaderSession`] keeps the per-user state a UI needs between
//! interactions: settings, the current document, its preview, the PDF to
//! download and the last error.
//!
//! ## Quick Start
//!
//! ```no_run
//! use bionic_oxide::api::{Converter, ReaderSession};
//! use bionic_oxide::config::{Settings, Theme};
//! use bionic_oxide::extractors::Upload;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let converter = Converter::new();
//! let mut session = ReaderSession::new();
//!
//! session.upload(&converter, &Upload::from_file("chapter.docx")?)?;
//! session.update_settings(&converter, Settings::default().with_theme(Theme::Cream));
//!
//! if let Some(download) = session.download() {
//!     std::fs::write(download.file_name, download.data)?;
//! }
//! # Ok(())
//! # }
//! ```

mod converter;
mod session;

pub use converter::{Conversion, Converter};
pub use session::{Download, ReaderSession, DOWNLOAD_FILE_NAME, DOWNLOAD_MIME};
