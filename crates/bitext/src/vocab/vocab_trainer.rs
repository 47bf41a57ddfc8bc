//! # Vocab Trainer

use std::cmp::Reverse;

use crate::{
    errors::{BitextError, Result},
    vocab::{Sentinel, Vocabulary, WordCounter},
};

/// Options for [`VocabTrainer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VocabTrainerOptions {
    /// Words seen fewer times than this are left out of the vocabulary.
    pub min_freq: u64,

    /// Optional cap on the vocabulary size, sentinels included.
    pub max_vocab_size: Option<usize>,
}

impl VocabTrainerOptions {
    /// Create new options.
    ///
    /// ## Arguments
    /// * `min_freq` - The minimum word frequency.
    pub fn new(min_freq: u64) -> Self {
        Self {
            min_freq,
            max_vocab_size: None,
        }
    }

    /// Sets the vocab size cap.
    ///
    /// ## Arguments
    /// * `max_vocab_size` - The cap; must leave room for the sentinels.
    pub fn with_max_vocab_size(
        self,
        max_vocab_size: Option<usize>,
    ) -> Self {
        Self {
            max_vocab_size,
            ..self
        }
    }

    /// Initializes a [`VocabTrainer`] from these options.
    pub fn init(self) -> VocabTrainer {
        VocabTrainer::new(self)
    }
}

/// Trainer for word-level vocabularies.
///
/// Words are ranked by count, descending, with ties broken by the word,
/// ascending; so training is independent of sample order within equal counts.
#[derive(Debug, Clone)]
pub struct VocabTrainer {
    /// Trainer options.
    pub options: VocabTrainerOptions,

    /// The word counter.
    pub word_counter: WordCounter,
}

impl VocabTrainer {
    /// Initializes a [`VocabTrainer`].
    pub fn new(options: VocabTrainerOptions) -> Self {
        Self {
            options,
            word_counter: WordCounter::default(),
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
        self.word_counter.update_from_samples(samples);
    }

    /// Train a [`Vocabulary`] from the accumulated counts.
    ///
    /// ## Errors
    /// * [`BitextError::Config`] if `max_vocab_size` cannot fit the sentinels.
    pub fn train(self) -> Result<Vocabulary> {
        let VocabTrainerOptions {
            min_freq,
            max_vocab_size,
        } = self.options;

        let num_sentinels = Sentinel::ALL.len();
        let max_words = match max_vocab_size {
            Some(max) if max < num_sentinels => {
                return Err(BitextError::config(
                    "max_vocab_size",
                    format!("must be >= {num_sentinels}"),
                ));
            }
            Some(max) => max - num_sentinels,
            None => usize::MAX,
        };

        let mut ranked: Vec<_> = self
            .word_counter
            .release()
            .into_iter()
            .filter(|(word, count)| *count >= min_freq && !Sentinel::is_sentinel(word))
            .collect();
        ranked.sort_by(|(a_word, a_count), (b_word, b_count)| {
            (Reverse(a_count), a_word).cmp(&(Reverse(b_count), b_word))
        });
        ranked.truncate(max_words);

        log::debug!(
            "vocab: {} words kept at min_freq={}",
            ranked.len(),
            min_freq
        );

        let tokens = Sentinel::ALL
            .iter()
            .map(|s| s.token().to_string())
            .chain(ranked.into_iter().map(|(word, _)| word.to_string()));

        Vocabulary::from_tokens(tokens)
    }
}

/// Build a [`Vocabulary`] from a single pass over `sentences`.
///
/// ## Arguments
/// * `sentences` - the train split sentences of one language.
/// * `options` - the trainer options.
pub fn build_vocabulary<I>(
    sentences: I,
    options: VocabTrainerOptions,
) -> Result<Vocabulary>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut trainer = options.init();
    trainer.update_from_samples(sentences);
    trainer.train()
}
