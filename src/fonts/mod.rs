//! Font loading and configuration.
//!
//! Resolves the regular and bold font files of the configured family and
//! falls back to the standard Helvetica pair when they cannot be used.
//! Embedded fonts are subset to the glyphs a document uses.

mod setup;
pub mod subset;

pub use setup::{FontSet, FontSetup, FontWarning};
pub use subset::{subset_font, subset_tag, SubsetError, SubsetResult};
