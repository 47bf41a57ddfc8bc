//! # Sequence Encoder

use std::sync::Arc;

use crate::{
    corpus::SentencePair,
    encoding::{EncodedExample, Field},
    errors::{BitextError, Result},
    types::TokenId,
    vocab::{Sentinel, Vocabulary},
};

/// Check that both vocabularies share a pad id, and return it.
///
/// ## Errors
/// * [`BitextError::PadMismatch`] if they differ.
pub fn check_pad_ids(
    src_vocab: &Vocabulary,
    tgt_vocab: &Vocabulary,
) -> Result<TokenId> {
    let (src, tgt) = (src_vocab.pad_id(), tgt_vocab.pad_id());
    if src != tgt {
        return Err(BitextError::PadMismatch { src, tgt });
    }
    Ok(src)
}

/// Encodes sentence pairs into fixed-width [`EncodedExample`]s.
#[derive(Debug, Clone)]
pub struct SequenceEncoder {
    src_vocab: Arc<Vocabulary>,
    tgt_vocab: Arc<Vocabulary>,
    seq_len: usize,
    pad_id: TokenId,
}

impl SequenceEncoder {
    /// Create a new encoder.
    ///
    /// ## Errors
    /// * [`BitextError::PadMismatch`] if the vocabularies disagree on the pad id.
    pub fn new(
        src_vocab: Arc<Vocabulary>,
        tgt_vocab: Arc<Vocabulary>,
        seq_len: usize,
    ) -> Result<Self> {
        let pad_id = check_pad_ids(&src_vocab, &tgt_vocab)?;
        Ok(Self {
            src_vocab,
            tgt_vocab,
            seq_len,
            pad_id,
        })
    }

    /// The fixed sequence length.
    pub fn seq_len(&self) -> usize {
        self.seq_len
    }

    /// The shared pad id.
    pub fn pad_id(&self) -> TokenId {
        self.pad_id
    }

    /// The source vocabulary.
    pub fn src_vocab(&self) -> &Arc<Vocabulary> {
        &self.src_vocab
    }

    /// The target vocabulary.
    pub fn tgt_vocab(&self) -> &Arc<Vocabulary> {
        &self.tgt_vocab
    }

    /// Encode a pair.
    ///
    /// ## Errors
    /// * [`BitextError::SequenceOverflow`] if the content and sentinels
    ///   exceed the sequence length; sequences are never truncated.
    pub fn encode(
        &self,
        source_text: &str,
        target_text: &str,
    ) -> Result<EncodedExample> {
        let src_ids = self.src_vocab.encode(source_text);
        let tgt_ids = self.tgt_vocab.encode(target_text);

        let src_eos = self.src_vocab.sentinel_id(Sentinel::Eos);
        let tgt_sos = self.tgt_vocab.sentinel_id(Sentinel::Sos);
        let tgt_eos = self.tgt_vocab.sentinel_id(Sentinel::Eos);

        let mut encoder_input = src_ids;
        encoder_input.push(src_eos);

        let mut decoder_input = Vec::with_capacity(self.seq_len);
        decoder_input.push(tgt_sos);
        decoder_input.extend_from_slice(&tgt_ids);

        let mut labels = tgt_ids;
        labels.push(tgt_eos);

        Ok(EncodedExample {
            encoder_input: self.pad_field(Field::EncoderInput, encoder_input)?,
            decoder_input: self.pad_field(Field::DecoderInput, decoder_input)?,
            labels: self.pad_field(Field::Labels, labels)?,
        })
    }

    /// Encode a [`SentencePair`].
    pub fn encode_pair(
        &self,
        pair: &SentencePair,
    ) -> Result<EncodedExample> {
        self.encode(&pair.source_text, &pair.target_text)
    }

    fn pad_field(
        &self,
        field: Field,
        mut ids: Vec<TokenId>,
    ) -> Result<Vec<TokenId>> {
        if ids.len() > self.seq_len {
            return Err(BitextError::SequenceOverflow {
                field: field.to_string(),
                len: ids.len(),
                max: self.seq_len,
            });
        }
        ids.resize(self.seq_len, self.pad_id);
        Ok(ids)
    }
}
