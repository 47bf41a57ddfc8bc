//! # Preprocessing Pipeline
//!
//! [`Preprocessor`] runs the stages in order:
//! 1. load the raw corpus and split it into train, validation and test;
//! 2. normalize every split;
//! 3. train one vocabulary per language, from train only;
//! 4. drop pairs that do not fit `seq_length - 2` tokens;
//! 5. encode each split into a [`BatchSource`](crate::loaders::BatchSource).
//!
//! Artifacts are written only once every in-memory stage has succeeded.
//!
//! ## Example
//! ```rust,no_run
//! use bitext::pipeline::{PreprocessConfig, Preprocessor};
//!
//! # fn main() -> bitext::errors::Result<()> {
//! let config = PreprocessConfig::load("config/config.yaml")?;
//! let report = Preprocessor::new(config)?.run()?;
//! print!("{report}");
//! # Ok(())
//! # }
//! ```

mod config;
mod preprocessor;
mod report;

#[doc(inline)]
pub use config::PreprocessConfig;
#[doc(inline)]
pub use preprocessor::{PreparedCorpus, Preprocessor};
#[doc(inline)]
pub use report::PreprocessReport;
