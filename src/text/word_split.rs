//! Bionic word splitting.
//!
//! A word is reduced to its *core* by stripping leading and trailing
//! non-word characters. The first half of the core (rounded up) is bolded.
//!
//! Two asymmetries are kept on purpose:
//! - leading punctuation is dropped from the output (`"(word"` → `wo` + `rd`),
//!   while trailing punctuation stays on the normal side;
//! - a token with no word characters at all (`"---"`) is returned whole as the
//!   bold part with an empty normal part.

/// A word split into its bolded prefix and plain remainder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitWord<'a> {
    /// Leading half of the core, rendered bold
    pub bold: &'a str,
    /// Rest of the core plus trailing punctuation, rendered normally
    pub normal: &'a str,
}

/// Word characters are alphanumeric (any script) or underscore.
#[inline]
pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Split a non-whitespace token into `(bold, normal)`.
pub fn split_word(word: &str) -> SplitWord<'_> {
    let Some(start) = word.find(is_word_char) else {
        return SplitWord {
            bold: word,
            normal: "",
        };
    };
    let end = word
        .char_indices()
        .rev()
        .find(|(_, c)| is_word_char(*c))
        .map(|(i, c)| i + c.len_utf8())
        .unwrap_or(word.len());

    let core = &word[start..end];
    let half = core.chars().count().div_ceil(2);
    let split = core
        .char_indices()
        .nth(half)
        .map(|(i, _)| i)
        .unwrap_or(core.len());

    // core[split..] followed by the trailing strip is one contiguous slice.
    SplitWord {
        bold: &core[..split],
        normal: &word[start + split..],
    }
}
