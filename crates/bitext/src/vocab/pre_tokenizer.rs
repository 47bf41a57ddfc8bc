//! # Whitespace Pre-Tokenizer

use std::sync::LazyLock;

use regex::Regex;

/// Word split pattern: runs of word characters, or runs of punctuation.
pub const WHITESPACE_PATTERN: &str = r"\w+|[^\w\s]+";

static WHITESPACE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(WHITESPACE_PATTERN).expect("regex pattern compilation failed"));

/// Splits text on whitespace, keeping punctuation runs as separate words.
///
/// `"Hello, world!"` splits to `["Hello", ",", "world", "!"]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WhitespacePreTokenizer;

impl WhitespacePreTokenizer {
    /// Iterate over the words of `text`.
    pub fn split<'a>(
        &self,
        text: &'a str,
    ) -> impl Iterator<Item = &'a str> + use<'a> {
        WHITESPACE_REGEX.find_iter(text).map(|m| m.as_str())
    }

    /// Count the words of `text`.
    pub fn count(
        &self,
        text: &str,
    ) -> usize {
        self.split(text).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split() {
        let pt = WhitespacePreTokenizer;
        assert_eq!(
            pt.split("Hello, world!").collect::<Vec<_>>(),
            vec!["Hello", ",", "world", "!"]
        );
        assert_eq!(
            pt.split("  tôi   yêu...  Rust ").collect::<Vec<_>>(),
            vec!["tôi", "yêu", "...", "Rust"]
        );
        assert_eq!(pt.count(""), 0);
        assert_eq!(pt.count("a a a a a a"), 6);
    }
}
