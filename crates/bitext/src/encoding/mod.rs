//! # Sequence Encoding and Collation
//!
//! * [`SequenceEncoder`] - encodes a sentence pair into three fixed-width
//!   id sequences ([`EncodedExample`]).
//! * [`PaddingCollator`] - stacks encoded examples into a padded [`Batch`].
//!
//! For a sequence length `L`:
//! ```text
//! encoder_input = src_ids ++ [EOS] ++ [PAD] * (L - |src| - 1)
//! decoder_input = [SOS] ++ tgt_ids ++ [PAD] * (L - |tgt| - 1)
//! labels        = tgt_ids ++ [EOS] ++ [PAD] * (L - |tgt| - 1)
//! ```

mod batch;
mod collator;
mod encoded_example;
mod sequence_encoder;

#[doc(inline)]
pub use batch::Batch;
#[doc(inline)]
pub use collator::PaddingCollator;
#[doc(inline)]
pub use encoded_example::{EncodedExample, Field};
#[doc(inline)]
pub use sequence_encoder::{SequenceEncoder, check_pad_ids};
