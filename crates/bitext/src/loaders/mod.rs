//! # Datasets and Batch Sources
//!
//! * [`PairDataset`] - a split bound to its vocabularies; encodes on demand.
//! * [`BatchSource`] - encoded examples which yield padded [`Batch`](crate::encoding::Batch)es.
//! * [`BatchSourceBundle`] - the train, validation and test sources, persisted together.

mod batch_source;
mod bundle;
mod pair_dataset;

#[doc(inline)]
pub use batch_source::BatchSource;
#[doc(inline)]
pub use bundle::BatchSourceBundle;
#[doc(inline)]
pub use pair_dataset::PairDataset;
