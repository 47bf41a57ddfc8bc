//! # Pair Dataset

#[cfg(feature = "rayon")]
use rayon::prelude::*;

use crate::{
    corpus::SentencePair,
    encoding::{EncodedExample, SequenceEncoder},
    errors::Result,
};

/// A split of sentence pairs, bound to an encoder.
#[derive(Debug, Clone)]
pub struct PairDataset {
    pairs: Vec<SentencePair>,
    encoder: SequenceEncoder,
    src_lang: String,
    tgt_lang: String,
}

impl PairDataset {
    /// Create a new dataset.
    ///
    /// ## Arguments
    /// * `pairs` - the filtered split.
    /// * `encoder` - the shared encoder; holds both vocabularies and `L`.
    /// * `src_lang` - the source language code.
    /// * `tgt_lang` - the target language code.
    pub fn new<S, T>(
        pairs: Vec<SentencePair>,
        encoder: SequenceEncoder,
        src_lang: S,
        tgt_lang: T,
    ) -> Self
    where
        S: Into<String>,
        T: Into<String>,
    {
        Self {
            pairs,
            encoder,
            src_lang: src_lang.into(),
            tgt_lang: tgt_lang.into(),
        }
    }

    /// The number of pairs.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Is the dataset empty?
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// The source language code.
    pub fn src_lang(&self) -> &str {
        &self.src_lang
    }

    /// The target language code.
    pub fn tgt_lang(&self) -> &str {
        &self.tgt_lang
    }

    /// The encoder.
    pub fn encoder(&self) -> &SequenceEncoder {
        &self.encoder
    }

    /// The raw pairs.
    pub fn pairs(&self) -> &[SentencePair] {
        &self.pairs
    }

    /// Encode the pair at `index`; `None` if out of range.
    pub fn get(
        &self,
        index: usize,
    ) -> Option<Result<EncodedExample>> {
        self.pairs
            .get(index)
            .map(|pair| self.encoder.encode_pair(pair))
    }

    /// Encode every pair, in order.
    ///
    /// ## Errors
    /// * the first encoding error.
    pub fn encode_all(&self) -> Result<Vec<EncodedExample>> {
        cfg_if::cfg_if! {
            if #[cfg(feature = "rayon")] {
                self.pairs.par_iter().map(|p| self.encoder.encode_pair(p)).collect()
            } else {
                self.pairs.iter().map(|p| self.encoder.encode_pair(p)).collect()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{
        errors::BitextError,
        vocab::{VocabTrainerOptions, build_vocabulary},
    };

    fn dataset(seq_len: usize) -> PairDataset {
        let options = VocabTrainerOptions::new(1);
        let src = build_vocabulary(["a b"], options).unwrap();
        let tgt = build_vocabulary(["c d"], options).unwrap();
        let encoder = SequenceEncoder::new(Arc::new(src), Arc::new(tgt), seq_len).unwrap();
        PairDataset::new(
            vec![("a b", "c d").into(), ("b", "d c d").into()],
            encoder,
            "en",
            "vi",
        )
    }

    #[test]
    fn test_get_and_encode_all() {
        let ds = dataset(5);
        assert_eq!(ds.len(), 2);
        assert_eq!((ds.src_lang(), ds.tgt_lang()), ("en", "vi"));
        assert!(ds.get(2).is_none());

        let all = ds.encode_all().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(ds.get(1).unwrap().unwrap(), all[1]);
        assert!(all.iter().all(|ex| ex.labels.len() == 5));
    }

    #[test]
    fn test_encode_all_fails_on_overflow() {
        // "d c d" needs 4 label slots.
        let ds = dataset(3);
        assert!(matches!(
            ds.encode_all(),
            Err(BitextError::SequenceOverflow { .. })
        ));
    }
}
