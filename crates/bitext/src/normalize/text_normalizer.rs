//! # Text Normalizer

use serde::{Deserialize, Serialize};
use unicode_general_category::{GeneralCategory, get_general_category};

/// Cleanup rules for the sentences of one language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NormalizerOptions {
    /// Lowercase all text.
    pub lowercase: bool,

    /// Drop unicode control (`Cc`) and format (`Cf`) characters.
    pub strip_control: bool,

    /// Trim, and collapse whitespace runs to a single space.
    pub collapse_whitespace: bool,
}

impl Default for NormalizerOptions {
    fn default() -> Self {
        Self {
            lowercase: false,
            strip_control: true,
            collapse_whitespace: true,
        }
    }
}

impl NormalizerOptions {
    /// Sets the lowercase rule.
    pub fn with_lowercase(
        self,
        lowercase: bool,
    ) -> Self {
        Self { lowercase, ..self }
    }

    /// Sets the control character rule.
    pub fn with_strip_control(
        self,
        strip_control: bool,
    ) -> Self {
        Self {
            strip_control,
            ..self
        }
    }

    /// Sets the whitespace rule.
    pub fn with_collapse_whitespace(
        self,
        collapse_whitespace: bool,
    ) -> Self {
        Self {
            collapse_whitespace,
            ..self
        }
    }

    /// Build a [`TextNormalizer`] from these options.
    pub fn build(self) -> TextNormalizer {
        TextNormalizer::new(self)
    }
}

/// Applies [`NormalizerOptions`] to text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextNormalizer {
    options: NormalizerOptions,
}

impl TextNormalizer {
    /// Create a new normalizer.
    pub fn new(options: NormalizerOptions) -> Self {
        Self { options }
    }

    /// Get the options.
    pub fn options(&self) -> &NormalizerOptions {
        &self.options
    }

    /// Normalize one sentence.
    pub fn normalize(
        &self,
        text: &str,
    ) -> String {
        let opts = &self.options;

        let mut out = String::with_capacity(text.len());
        let mut pending_space = false;
        for c in text.chars() {
            if opts.collapse_whitespace && c.is_whitespace() {
                pending_space = !out.is_empty();
                continue;
            }
            if opts.strip_control && !c.is_whitespace() && is_control(c) {
                continue;
            }
            if pending_space {
                out.push(' ');
                pending_space = false;
            }
            if opts.lowercase {
                out.extend(c.to_lowercase());
            } else {
                out.push(c);
            }
        }
        out
    }
}

fn is_control(c: char) -> bool {
    matches!(
        get_general_category(c),
        GeneralCategory::Control | GeneralCategory::Format
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rules() {
        let norm = TextNormalizer::default();
        assert_eq!(norm.normalize("  Hello \t\n  World  "), "Hello World");
        assert_eq!(norm.normalize("zero\u{200b}width"), "zerowidth");
        assert_eq!(norm.normalize(""), "");
        assert_eq!(norm.normalize(" \t "), "");
    }

    #[test]
    fn test_lowercase() {
        let norm = NormalizerOptions::default().with_lowercase(true).build();
        assert_eq!(norm.normalize("Xin Chào THẾ GIỚI"), "xin chào thế giới");
    }

    #[test]
    fn test_all_rules_off() {
        let norm = NormalizerOptions::default()
            .with_strip_control(false)
            .with_collapse_whitespace(false)
            .build();
        assert_eq!(norm.normalize(" a\u{200b}  b "), " a\u{200b}  b ");
    }
}
