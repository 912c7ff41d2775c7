//! Whitespace / word tokenizer.
//!
//! Text is cut into maximal runs of whitespace and maximal runs of
//! non-whitespace. The runs tile the input exactly, so concatenating the
//! tokens in order gives back the original string byte for byte.

/// A maximal run of either whitespace or non-whitespace characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// Whitespace run, including newlines. Emitted verbatim by renderers.
    Whitespace(&'a str),
    /// Non-whitespace run; the unit the word splitter operates on.
    Word(&'a str),
}

impl<'a> Token<'a> {
    /// The source text of this token.
    pub fn as_str(&self) -> &'a str {
        match self {
            Token::Whitespace(s) | Token::Word(s) => s,
        }
    }

    /// Whether this token is a whitespace run.
    pub fn is_whitespace(&self) -> bool {
        matches!(self, Token::Whitespace(_))
    }
}

/// Iterator over the tokens of a string.
///
/// Cheap to recreate: calling [`Tokens::new`] again on the same text yields
/// the same sequence.
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    rest: &'a str,
}

impl<'a> Tokens<'a> {
    /// Start tokenizing `text`.
    pub fn new(text: &'a str) -> Self {
        Self { rest: text }
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        let first = self.rest.chars().next()?;
        let whitespace = first.is_whitespace();
        let end = self
            .rest
            .char_indices()
            .find(|(_, c)| c.is_whitespace() != whitespace)
            .map(|(i, _)| i)
            .unwrap_or(self.rest.len());

        let (run, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some(if whitespace {
            Token::Whitespace(run)
        } else {
            Token::Word(run)
        })
    }
}

/// Split `text` into whitespace and word tokens, in order.
pub fn tokenize(text: &str) -> Vec<Token<'_>> {
    Tokens::new(text).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_simple() {
        let tokens = tokenize("héllo, world!");
        assert_eq!(
            tokens,
            vec![Token::Word("héllo,"), Token::Whitespace(" "), Token::Word("world!")]
        );
    }

    #[test]
    fn test_tokenize_keeps_whitespace_runs() {
        let tokens = tokenize("  a\n\n\tb ");
        assert_eq!(
            tokens,
            vec![
                Token::Whitespace("  "),
                Token::Word("a"),
                Token::Whitespace("\n\n\t"),
                Token::Word("b"),
                Token::Whitespace(" "),
            ]
        );
    }

    #[test]
    fn test_tokenize_empty() {
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn test_tokenize_unicode_whitespace() {
        // U+00A0 no-break space and U+3000 ideographic space are whitespace
        let tokens = tokenize("a\u{00A0}b\u{3000}c");
        assert_eq!(tokens.len(), 5);
        assert!(tokens[1].is_whitespace());
        assert!(tokens[3].is_whitespace());
    }

    #[test]
    fn test_tokens_restartable() {
        let text = "one two  three";
        let first: Vec<_> = Tokens::new(text).collect();
        let second: Vec<_> = Tokens::new(text).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_concatenation_reconstructs_input() {
        let text = "\tMixed  \r\n spacing—and punctuation… ok?\n";
        let rebuilt: String = tokenize(text).iter().map(|t| t.as_str()).collect();
        assert_eq!(rebuilt, text);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(200))]

            #[test]
            fn prop_tokens_tile_input(text in "\\PC{0,80}") {
                let tokens = tokenize(&text);
                let rebuilt: String = tokens.iter().map(|t| t.as_str()).collect();
                prop_assert_eq!(rebuilt, text);
            }

            #[test]
            fn prop_tokens_alternate(text in "[a-z ,.\\n\\t]{0,60}") {
                let tokens = tokenize(&text);
                for pair in tokens.windows(2) {
                    prop_assert_ne!(pair[0].is_whitespace(), pair[1].is_whitespace());
                }
                for token in &tokens {
                    prop_assert!(!token.as_str().is_empty());
                }
            }
        }
    }
}
