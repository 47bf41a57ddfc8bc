//! # Sentence Pair

use serde::{Deserialize, Serialize};

/// Which language of a pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum Side {
    /// The source language.
    Source,

    /// The target language.
    Target,
}

/// A bilingual sentence pair.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SentencePair {
    /// The source language sentence.
    pub source_text: String,

    /// The target language sentence.
    pub target_text: String,
}

impl SentencePair {
    /// Create a new pair.
    pub fn new<S, T>(
        source_text: S,
        target_text: T,
    ) -> Self
    where
        S: Into<String>,
        T: Into<String>,
    {
        Self {
            source_text: source_text.into(),
            target_text: target_text.into(),
        }
    }

    /// Get the text for one side of the pair.
    pub fn text(
        &self,
        side: Side,
    ) -> &str {
        match side {
            Side::Source => &self.source_text,
            Side::Target => &self.target_text,
        }
    }
}

impl<S, T> From<(S, T)> for SentencePair
where
    S: Into<String>,
    T: Into<String>,
{
    fn from((source_text, target_text): (S, T)) -> Self {
        Self::new(source_text, target_text)
    }
}
