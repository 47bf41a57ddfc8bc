//! # Word-Level Vocabulary

use std::path::Path;

use crate::{
    errors::{BitextError, Result},
    types::{BTHashMap, TokenId, hash_map_with_capacity},
    vocab::{Sentinel, WhitespacePreTokenizer, io::VocabularyFile},
};

/// A word-level ``token <-> id`` vocabulary.
///
/// Ids are dense: `0..len()`. Every vocabulary contains all four
/// [`Sentinel`] tokens; words missing from the vocabulary encode to
/// [`Sentinel::Unk`].
///
/// A vocabulary is immutable once built; share it with `Arc`.
#[derive(Debug, Clone, PartialEq)]
pub struct Vocabulary {
    pre_tokenizer: WhitespacePreTokenizer,
    tokens: Vec<String>,
    token_ids: BTHashMap<String, TokenId>,
    sentinel_ids: [TokenId; 4],
}

impl Vocabulary {
    /// Build a vocabulary from tokens in id order.
    ///
    /// ## Errors
    /// * [`BitextError::Vocab`] if a token is duplicated, a sentinel
    ///   is missing, or there are more tokens than [`TokenId`] can index.
    pub fn from_tokens<I, S>(tokens: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tokens: Vec<String> = tokens.into_iter().map(Into::into).collect();
        if tokens.len() > TokenId::MAX as usize {
            return Err(BitextError::Vocab(format!(
                "{} tokens exceed the token id range",
                tokens.len()
            )));
        }

        let mut token_ids = hash_map_with_capacity(tokens.len());
        for (id, token) in tokens.iter().enumerate() {
            if token_ids.insert(token.clone(), id as TokenId).is_some() {
                return Err(BitextError::Vocab(format!("duplicate token: {token:?}")));
            }
        }

        let mut sentinel_ids = [0; 4];
        for (slot, sentinel) in sentinel_ids.iter_mut().zip(Sentinel::ALL) {
            *slot = *token_ids.get(sentinel.token()).ok_or_else(|| {
                BitextError::Vocab(format!("missing sentinel token: {sentinel}"))
            })?;
        }

        Ok(Self {
            pre_tokenizer: WhitespacePreTokenizer,
            tokens,
            token_ids,
            sentinel_ids,
        })
    }

    /// The number of tokens, sentinels included.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// True if the vocabulary has no tokens; never true for a valid vocabulary.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// The tokens, in id order.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// The pre-tokenizer.
    pub fn pre_tokenizer(&self) -> &WhitespacePreTokenizer {
        &self.pre_tokenizer
    }

    /// Look up the id of a token.
    pub fn token_to_id(
        &self,
        token: &str,
    ) -> Option<TokenId> {
        self.token_ids.get(token).copied()
    }

    /// Look up the token for an id.
    pub fn id_to_token(
        &self,
        id: TokenId,
    ) -> Option<&str> {
        self.tokens.get(id as usize).map(String::as_str)
    }

    /// The id of a sentinel token.
    pub fn sentinel_id(
        &self,
        sentinel: Sentinel,
    ) -> TokenId {
        self.sentinel_ids[sentinel as usize]
    }

    /// The pad id.
    pub fn pad_id(&self) -> TokenId {
        self.sentinel_id(Sentinel::Pad)
    }

    /// Pre-tokenize `text` into words.
    pub fn tokenize<'a>(
        &self,
        text: &'a str,
    ) -> Vec<&'a str> {
        self.pre_tokenizer.split(text).collect()
    }

    /// The number of tokens `text` encodes to; sentinels excluded.
    pub fn count_tokens(
        &self,
        text: &str,
    ) -> usize {
        self.pre_tokenizer.count(text)
    }

    /// Encode `text` to ids; unknown words map to [`Sentinel::Unk`].
    pub fn encode(
        &self,
        text: &str,
    ) -> Vec<TokenId> {
        let unk = self.sentinel_id(Sentinel::Unk);
        self.pre_tokenizer
            .split(text)
            .map(|w| self.token_to_id(w).unwrap_or(unk))
            .collect()
    }

    /// Decode ids to tokens; out of range ids decode to the unk token.
    pub fn decode(
        &self,
        ids: &[TokenId],
    ) -> Vec<&str> {
        ids.iter()
            .map(|&id| self.id_to_token(id).unwrap_or(Sentinel::Unk.token()))
            .collect()
    }

    /// Save the vocabulary as json.
    pub fn save<P: AsRef<Path>>(
        &self,
        path: P,
    ) -> Result<()> {
        VocabularyFile::from(self).save(path)
    }

    /// Load a vocabulary saved by [`Vocabulary::save`].
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        VocabularyFile::load(path)?.try_into()
    }
}

#[cfg(test)]
mod tests {
    use tempdir::TempDir;

    use super::*;

    fn sample_vocab() -> Vocabulary {
        Vocabulary::from_tokens(["[PAD]", "[SOS]", "[EOS]", "[UNK]", "hello", "world"]).unwrap()
    }

    #[test]
    fn test_lookups() {
        let vocab = sample_vocab();
        assert_eq!(vocab.len(), 6);
        assert_eq!(vocab.pad_id(), 0);
        assert_eq!(vocab.sentinel_id(Sentinel::Eos), 2);
        assert_eq!(vocab.token_to_id("world"), Some(5));
        assert_eq!(vocab.id_to_token(4), Some("hello"));
        assert_eq!(vocab.id_to_token(99), None);

        assert_eq!(vocab.tokenize("hello, world"), vec!["hello", ",", "world"]);
        assert_eq!(vocab.count_tokens("hello, world"), 3);
        assert_eq!(vocab.encode("hello, world"), vec![4, 3, 5]);
        assert_eq!(vocab.decode(&[4, 3, 77]), vec!["hello", "[UNK]", "[UNK]"]);
    }

    #[test]
    fn test_invalid_tokens() {
        assert!(matches!(
            Vocabulary::from_tokens(["[PAD]", "[SOS]", "[EOS]"]),
            Err(BitextError::Vocab(_))
        ));
        assert!(matches!(
            Vocabulary::from_tokens(["[PAD]", "[SOS]", "[EOS]", "[UNK]", "a", "a"]),
            Err(BitextError::Vocab(_))
        ));
    }

    #[test]
    fn test_save_load() -> Result<()> {
        let tmpdir = TempDir::new("bitext-vocab-test")?;
        let path = tmpdir.path().join("nested").join("tokenizer_en.json");

        let vocab = sample_vocab();
        vocab.save(&path)?;

        let loaded = Vocabulary::load(&path)?;
        assert_eq!(loaded, vocab);
        Ok(())
    }
}
