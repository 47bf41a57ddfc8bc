//! # Sentinel Tokens

use crate::types::TokenId;

/// The reserved tokens present in every [`Vocabulary`](crate::vocab::Vocabulary).
///
/// Trained vocabularies assign them ids in declaration order,
/// so every trained vocabulary agrees on them.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumIter,
    strum::EnumCount,
    strum::IntoStaticStr,
)]
pub enum Sentinel {
    /// Padding.
    #[strum(to_string = "[PAD]")]
    Pad,

    /// Start of sequence.
    #[strum(to_string = "[SOS]")]
    Sos,

    /// End of sequence.
    #[strum(to_string = "[EOS]")]
    Eos,

    /// Out of vocabulary.
    #[strum(to_string = "[UNK]")]
    Unk,
}

impl Sentinel {
    /// All sentinels, in id order.
    pub const ALL: [Sentinel; 4] = [Self::Pad, Self::Sos, Self::Eos, Self::Unk];

    /// The token string.
    pub fn token(&self) -> &'static str {
        self.into()
    }

    /// The id a freshly trained vocabulary assigns.
    pub fn default_id(&self) -> TokenId {
        *self as TokenId
    }

    /// Is `token` one of the sentinel strings?
    pub fn is_sentinel(token: &str) -> bool {
        Self::ALL.iter().any(|s| s.token() == token)
    }
}

#[cfg(test)]
mod tests {
    use strum::{EnumCount, IntoEnumIterator};

    use super::*;

    #[test]
    fn test_sentinel_order() {
        assert_eq!(Sentinel::COUNT, 4);
        assert_eq!(Sentinel::iter().collect::<Vec<_>>(), Sentinel::ALL.to_vec());

        for (idx, s) in Sentinel::ALL.iter().enumerate() {
            assert_eq!(s.default_id() as usize, idx);
            assert_eq!(s.to_string(), s.token());
        }

        assert_eq!(Sentinel::Sos.token(), "[SOS]");
        assert!(Sentinel::is_sentinel("[EOS]"));
        assert!(!Sentinel::is_sentinel("EOS"));
    }
}
