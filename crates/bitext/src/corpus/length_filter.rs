//! # Length Filter
//!
//! Drops sentence pairs whose tokenized length, on either side, does not
//! fit the sequence budget once the sentinel slots are reserved.

#[cfg(feature = "rayon")]
use rayon::prelude::*;

use crate::{
    corpus::{CorpusSplits, SentencePair, SplitName},
    errors::{BitextError, Result},
    vocab::Vocabulary,
};

/// Slots reserved for the `[SOS]` and `[EOS]` sentinels.
pub const RESERVED_SENTINEL_SLOTS: usize = 2;

/// Row counts of one split before and after filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitDelta {
    /// The split.
    pub split: SplitName,

    /// Rows before filtering.
    pub before: usize,

    /// Rows after filtering.
    pub after: usize,
}

impl SplitDelta {
    /// The number of rows removed.
    pub fn removed(&self) -> usize {
        self.before - self.after
    }
}

/// Filters pairs by tokenized length, using trained vocabularies read-only.
#[derive(Debug, Clone, Copy)]
pub struct LengthFilter<'a> {
    src_vocab: &'a Vocabulary,
    tgt_vocab: &'a Vocabulary,
    max_content_len: usize,
}

impl<'a> LengthFilter<'a> {
    /// Create a filter for a fixed sequence length.
    ///
    /// ## Arguments
    /// * `seq_length` - the total sequence length; the content budget is
    ///   `seq_length - RESERVED_SENTINEL_SLOTS`.
    pub fn for_seq_length(
        src_vocab: &'a Vocabulary,
        tgt_vocab: &'a Vocabulary,
        seq_length: usize,
    ) -> Result<Self> {
        let max_content_len = seq_length
            .checked_sub(RESERVED_SENTINEL_SLOTS)
            .filter(|&n| n > 0)
            .ok_or_else(|| {
                BitextError::config(
                    "seq_length",
                    format!("must be > {RESERVED_SENTINEL_SLOTS}"),
                )
            })?;
        Ok(Self::new(src_vocab, tgt_vocab, max_content_len))
    }

    /// Create a filter with an explicit content budget.
    pub fn new(
        src_vocab: &'a Vocabulary,
        tgt_vocab: &'a Vocabulary,
        max_content_len: usize,
    ) -> Self {
        Self {
            src_vocab,
            tgt_vocab,
            max_content_len,
        }
    }

    /// The content budget.
    pub fn max_content_len(&self) -> usize {
        self.max_content_len
    }

    /// Does the pair fit the budget on both sides?
    pub fn accepts(
        &self,
        pair: &SentencePair,
    ) -> bool {
        self.src_vocab.count_tokens(&pair.source_text) <= self.max_content_len
            && self.tgt_vocab.count_tokens(&pair.target_text) <= self.max_content_len
    }

    /// Filter one split, preserving order.
    pub fn filter_split(
        &self,
        pairs: Vec<SentencePair>,
    ) -> Vec<SentencePair> {
        cfg_if::cfg_if! {
            if #[cfg(feature = "rayon")] {
                pairs.into_par_iter().filter(|p| self.accepts(p)).collect()
            } else {
                pairs.into_iter().filter(|p| self.accepts(p)).collect()
            }
        }
    }

    /// Filter every split.
    ///
    /// ## Returns
    /// The filtered splits, and the per-split row deltas.
    pub fn filter_splits(
        &self,
        splits: CorpusSplits,
    ) -> (CorpusSplits, Vec<SplitDelta>) {
        let mut deltas = Vec::new();
        let filtered = splits.map_splits(|split, pairs| {
            let before = pairs.len();
            let kept = self.filter_split(pairs);
            deltas.push(SplitDelta {
                split,
                before,
                after: kept.len(),
            });
            kept
        });
        (filtered, deltas)
    }
}
