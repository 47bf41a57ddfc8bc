//! # Vocabulary IO
//!
//! Vocabularies are stored as pretty json:
//! ```json
//! {
//!   "unk_token": "[UNK]",
//!   "special_tokens": ["[PAD]", "[SOS]", "[EOS]", "[UNK]"],
//!   "tokens": ["[PAD]", "[SOS]", "[EOS]", "[UNK]", "the", "..."]
//! }
//! ```
//! The position of a token in `tokens` is its id.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{
    errors::{BitextError, Result},
    utility::{read_json_path, write_json_path},
    vocab::{Sentinel, Vocabulary},
};

/// The on-disk form of a [`Vocabulary`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VocabularyFile {
    /// The out-of-vocabulary token.
    pub unk_token: String,

    /// The sentinel tokens.
    pub special_tokens: Vec<String>,

    /// All tokens, in id order.
    pub tokens: Vec<String>,
}

impl From<&Vocabulary> for VocabularyFile {
    fn from(vocab: &Vocabulary) -> Self {
        Self {
            unk_token: Sentinel::Unk.token().to_string(),
            special_tokens: Sentinel::ALL.iter().map(|s| s.token().to_string()).collect(),
            tokens: vocab.tokens().to_vec(),
        }
    }
}

impl TryFrom<VocabularyFile> for Vocabulary {
    type Error = BitextError;

    fn try_from(file: VocabularyFile) -> Result<Self> {
        if file.unk_token != Sentinel::Unk.token() {
            return Err(BitextError::Vocab(format!(
                "unsupported unk token: {:?}",
                file.unk_token
            )));
        }
        for special in &file.special_tokens {
            if !Sentinel::is_sentinel(special) {
                return Err(BitextError::Vocab(format!(
                    "unsupported special token: {special:?}"
                )));
            }
        }
        Vocabulary::from_tokens(file.tokens)
    }
}

impl VocabularyFile {
    /// Save as json.
    pub fn save<P: AsRef<Path>>(
        &self,
        path: P,
    ) -> Result<()> {
        write_json_path(path, self)
    }

    /// Load from json.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        read_json_path(path)
    }
}
