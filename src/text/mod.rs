//! Text shaping for the bionic reading transform.
//!
//! Both renderers work from the same three primitives:
//!
//! ```text
//! document text ──segment──▶ paragraphs ──tokenize──▶ tokens ──split_word──▶ (bold, normal)
//! ```
//!
//! Everything here borrows from the input; nothing allocates per word.

pub mod paragraphs;
pub mod tokenizer;
pub mod word_split;

pub use paragraphs::{join, segment, PARAGRAPH_SEPARATOR};
pub use tokenizer::{tokenize, Token, Tokens};
pub use word_split::{is_word_char, split_word, SplitWord};
