//! # Word Counter

use compact_str::CompactString;

use crate::{
    types::{BTHashMap, hash_map_with_capacity},
    vocab::WhitespacePreTokenizer,
};

/// Counts pre-tokenized words over a stream of sentences.
#[derive(Debug, Clone)]
pub struct WordCounter {
    pre_tokenizer: WhitespacePreTokenizer,

    /// The word counts.
    pub word_counts: BTHashMap<CompactString, u64>,
}

impl Default for WordCounter {
    fn default() -> Self {
        Self::new(WhitespacePreTokenizer)
    }
}

impl WordCounter {
    /// Create a new word counter.
    pub fn new(pre_tokenizer: WhitespacePreTokenizer) -> Self {
        Self {
            pre_tokenizer,
            word_counts: hash_map_with_capacity(10_000),
        }
    }

    /// Release the word counts and return them.
    pub fn release(self) -> BTHashMap<CompactString, u64> {
        self.word_counts
    }

    /// Update word counts inplace from text.
    pub fn update_from_text<S: AsRef<str>>(
        &mut self,
        text: S,
    ) {
        let word_counts = &mut self.word_counts;
        for word in self.pre_tokenizer.split(text.as_ref()) {
            *word_counts.entry(CompactString::from(word)).or_default() += 1;
        }
    }

    /// Update word counts inplace from a sample iterator.
    pub fn update_from_samples<I>(
        &mut self,
        samples: I,
    ) where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        for sample in samples {
            self.update_from_text(sample);
        }
    }

    /// The number of distinct words seen.
    pub fn len(&self) -> usize {
        self.word_counts.len()
    }

    /// True if no words have been seen.
    pub fn is_empty(&self) -> bool {
        self.word_counts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_counter() {
        let mut wc = WordCounter::default();
        assert!(wc.is_empty());

        wc.update_from_samples(["Hello world", "Foo world, bar world"]);
        assert_eq!(wc.len(), 5);

        let mut counts: Vec<(String, u64)> = wc
            .release()
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();
        counts.sort();
        assert_eq!(
            counts,
            vec![
                (",".to_string(), 1),
                ("Foo".to_string(), 1),
                ("Hello".to_string(), 1),
                ("bar".to_string(), 1),
                ("world".to_string(), 3),
            ]
        );
    }
}
