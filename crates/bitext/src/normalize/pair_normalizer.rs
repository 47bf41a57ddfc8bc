//! # Pair Normalizer

#[cfg(feature = "rayon")]
use rayon::prelude::*;

use crate::{
    corpus::SentencePair,
    normalize::{NormalizerOptions, TextNormalizer},
};

/// Normalizes both sides of [`SentencePair`]s.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PairNormalizer {
    /// Source-side normalizer.
    pub source: TextNormalizer,

    /// Target-side normalizer.
    pub target: TextNormalizer,
}

impl PairNormalizer {
    /// Create a normalizer from per-language options.
    pub fn new(
        source: NormalizerOptions,
        target: NormalizerOptions,
    ) -> Self {
        Self {
            source: source.build(),
            target: target.build(),
        }
    }

    /// Normalize one pair.
    pub fn normalize_pair(
        &self,
        pair: &SentencePair,
    ) -> SentencePair {
        SentencePair::new(
            self.source.normalize(&pair.source_text),
            self.target.normalize(&pair.target_text),
        )
    }

    /// Normalize a whole split, preserving order.
    pub fn normalize_split(
        &self,
        pairs: &[SentencePair],
    ) -> Vec<SentencePair> {
        cfg_if::cfg_if! {
            if #[cfg(feature = "rayon")] {
                pairs.par_iter().map(|p| self.normalize_pair(p)).collect()
            } else {
                pairs.iter().map(|p| self.normalize_pair(p)).collect()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_per_language_rules() {
        let norm = PairNormalizer::new(
            NormalizerOptions::default().with_lowercase(true),
            NormalizerOptions::default(),
        );

        let pairs = vec![
            SentencePair::new("Hello  World", "Xin  Chào"),
            SentencePair::new("A", "B"),
        ];
        let out = norm.normalize_split(&pairs);
        assert_eq!(
            out,
            vec![
                SentencePair::new("hello world", "Xin Chào"),
                SentencePair::new("a", "B"),
            ]
        );
    }
}
