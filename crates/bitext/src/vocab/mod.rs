//! # Vocabulary
//!
//! Word-level vocabularies, induced per language from the train split.
//!
//! * [`Sentinel`] - the four reserved tokens, always ids `0..4`.
//! * [`WhitespacePreTokenizer`] - splits text into words and punctuation runs.
//! * [`WordCounter`] - counts pre-tokenized words over a sentence stream.
//! * [`VocabTrainer`] - ranks counted words into a [`Vocabulary`].
//! * [`Vocabulary`] - the read-only ``token <-> id`` lookup, with json io.
//!
//! ## Training Example
//!
//! ```rust
//! use bitext::vocab::{Sentinel, VocabTrainerOptions};
//!
//! let mut trainer = VocabTrainerOptions::new(1).init();
//! trainer.update_from_samples(["a b", "a c"]);
//! let vocab = trainer.train().unwrap();
//!
//! assert_eq!(vocab.sentinel_id(Sentinel::Pad), 0);
//! assert_eq!(vocab.token_to_id("a"), Some(4));
//! assert_eq!(vocab.encode("a z"), vec![4, vocab.sentinel_id(Sentinel::Unk)]);
//! ```

pub mod io;

mod pre_tokenizer;
mod specials;
mod vocab_trainer;
mod vocabulary;
mod word_counter;

#[doc(inline)]
pub use pre_tokenizer::{WHITESPACE_PATTERN, WhitespacePreTokenizer};
#[doc(inline)]
pub use specials::Sentinel;
#[doc(inline)]
pub use vocab_trainer::{VocabTrainer, VocabTrainerOptions, build_vocabulary};
#[doc(inline)]
pub use vocabulary::Vocabulary;
#[doc(inline)]
pub use word_counter::WordCounter;
