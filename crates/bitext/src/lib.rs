//! # `bitext` Parallel Corpus Preparation
//!
//! Prepares a bilingual sentence corpus for sequence-to-sequence training.
//!
//! See:
//! * [`corpus`] to load raw splits, split them, and filter by length.
//! * [`normalize`] to clean up sentence text.
//! * [`vocab`] to train, save, and load word-level vocabularies.
//! * [`encoding`] to encode pairs into fixed-width ids, and collate batches.
//! * [`loaders`] for per-split batch sources, and their on-disk bundle.
//! * [`metrics`] to aggregate evaluation metrics over batches.
//! * [`pipeline`] to run the whole preparation from a yaml config.
//!
//! ## Pipeline
//!
//! ```text
//! raw corpus -> split -> normalize -> vocabularies (train only)
//!            -> length filter (all splits) -> encode -> batch sources
//! ```
//!
//! Every run is deterministic for a given seed, corpus, and config.
//!
//! ## Crate Features
#![doc = document_features::document_features!()]
#![warn(missing_docs, unused)]

pub mod corpus;
pub mod encoding;
pub mod errors;
pub mod loaders;
pub mod metrics;
pub mod normalize;
pub mod pipeline;
pub mod types;
pub mod utility;
pub mod vocab;
