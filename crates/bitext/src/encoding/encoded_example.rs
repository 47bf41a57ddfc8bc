//! # Encoded Example

use serde::{Deserialize, Serialize};

use crate::types::TokenId;

/// The named id sequences of an [`EncodedExample`].
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Field {
    /// Source ids, then `[EOS]`.
    EncoderInput,

    /// `[SOS]`, then target ids.
    DecoderInput,

    /// Target ids, then `[EOS]`.
    Labels,
}

/// One sentence pair, encoded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedExample {
    /// See [`Field::EncoderInput`].
    pub encoder_input: Vec<TokenId>,

    /// See [`Field::DecoderInput`].
    pub decoder_input: Vec<TokenId>,

    /// See [`Field::Labels`].
    pub labels: Vec<TokenId>,
}

impl EncodedExample {
    /// Get a field.
    pub fn field(
        &self,
        field: Field,
    ) -> &[TokenId] {
        match field {
            Field::EncoderInput => &self.encoder_input,
            Field::DecoderInput => &self.decoder_input,
            Field::Labels => &self.labels,
        }
    }

    /// Get a field, mutably.
    pub fn field_mut(
        &mut self,
        field: Field,
    ) -> &mut Vec<TokenId> {
        match field {
            Field::EncoderInput => &mut self.encoder_input,
            Field::DecoderInput => &mut self.decoder_input,
            Field::Labels => &mut self.labels,
        }
    }
}
