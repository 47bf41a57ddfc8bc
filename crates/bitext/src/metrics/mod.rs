//! # Streaming Metrics
//!
//! Accumulates per-batch loss and token predictions over an evaluation
//! pass, then reports loss, accuracy and support-weighted
//! precision, recall and F-beta.
//!
//! Only per-class counts are kept, so memory is bounded by the label set.

mod streaming_stats;

#[doc(inline)]
pub use streaming_stats::{StatsOptions, StatsReport, StreamingStats};
