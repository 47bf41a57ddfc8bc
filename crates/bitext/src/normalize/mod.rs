//! # Sentence Normalization
//!
//! Language-specific text cleanup applied to raw sentence pairs before
//! any tokenization.
//!
//! * [`NormalizerOptions`] - the cleanup rules for one language.
//! * [`TextNormalizer`] - applies one language's rules to text.
//! * [`PairNormalizer`] - applies the source/target rules to whole splits.

mod pair_normalizer;
mod text_normalizer;

#[doc(inline)]
pub use pair_normalizer::PairNormalizer;
#[doc(inline)]
pub use text_normalizer::{NormalizerOptions, TextNormalizer};
