//! # Corpus
//!
//! Raw bilingual corpora and their train/validation/test partitions.
//!
//! * [`SentencePair`] - one source/target sentence pair.
//! * [`CorpusSplits`] - named splits of sentence pairs.
//! * [`CorpusLoader`] - reads raw splits from ``jsonl``/``parquet`` files.
//! * [`CorpusSplitter`] - seeded, reproducible train/validation/test splitting.
//! * [`LengthFilter`] - drops pairs which do not fit a sequence budget.

pub mod corpus_location;

mod corpus_splits;
mod length_filter;
mod loader;
mod sentence_pair;
mod splitter;

#[doc(inline)]
pub use corpus_splits::{CorpusSplits, SplitName};
#[doc(inline)]
pub use length_filter::{LengthFilter, RESERVED_SENTINEL_SLOTS, SplitDelta};
#[doc(inline)]
pub use loader::CorpusLoader;
#[doc(inline)]
pub use sentence_pair::{SentencePair, Side};
#[doc(inline)]
pub use splitter::{CorpusSplitter, SplitterOptions, carve_split, seeded_permutation};
