//! # Error Types

use std::path::PathBuf;

/// Errors from bitext operations.
#[derive(Debug, thiserror::Error)]
pub enum BitextError {
    /// A configuration option is missing or invalid.
    #[error("invalid config option `{key}`: {reason}")]
    Config {
        /// The offending option name.
        key: String,

        /// Why the value was rejected.
        reason: String,
    },

    /// The configuration file could not be parsed.
    #[error("failed to parse config {path:?}: {source}")]
    ConfigParse {
        /// The config file path.
        path: PathBuf,

        /// The underlying parse error; names unknown or missing keys.
        source: serde_yaml::Error,
    },

    /// The source and target vocabularies disagree on the pad token id.
    #[error("pad token id mismatch: source={src}, target={tgt}")]
    PadMismatch {
        /// The source vocabulary pad id.
        src: u32,

        /// The target vocabulary pad id.
        tgt: u32,
    },

    /// An encoded sequence does not fit the fixed sequence length.
    #[error("{field} needs {len} tokens, but the sequence length is {max}")]
    SequenceOverflow {
        /// The field being encoded.
        field: String,

        /// The required length, including sentinels.
        len: usize,

        /// The configured sequence length.
        max: usize,
    },

    /// A split has no rows left.
    #[error("split `{split}` is empty")]
    EmptySplit {
        /// The split name.
        split: String,
    },

    /// A required split is neither present nor derivable.
    #[error("split `{split}` is missing and cannot be derived")]
    MissingSplit {
        /// The split name.
        split: String,
    },

    /// Arrays passed together disagree in shape.
    #[error("shape mismatch: expected {expected:?}, found {actual:?}")]
    ShapeMismatch {
        /// The expected shape.
        expected: Vec<usize>,

        /// The shape found.
        actual: Vec<usize>,
    },

    /// A raw corpus record or file is malformed.
    #[error("corpus error: {0}")]
    Corpus(String),

    /// A vocabulary file is malformed.
    #[error("vocab error: {0}")]
    Vocab(String),

    /// I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON error.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// YAML error.
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    /// Parquet error.
    #[cfg(feature = "parquet")]
    #[error(transparent)]
    Parquet(#[from] parquet::errors::ParquetError),

    /// Arrow error.
    #[cfg(feature = "parquet")]
    #[error(transparent)]
    Arrow(#[from] arrow::error::ArrowError),
}

impl BitextError {
    /// Build a [`BitextError::Config`] error.
    pub fn config<K, R>(
        key: K,
        reason: R,
    ) -> Self
    where
        K: Into<String>,
        R: Into<String>,
    {
        Self::Config {
            key: key.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for bitext operations.
pub type Result<T> = core::result::Result<T, BitextError>;
