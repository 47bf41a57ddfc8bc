//! # Corpus Splits

use std::collections::BTreeMap;

use crate::corpus::{SentencePair, Side};

/// The name of a corpus split.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SplitName {
    /// The training split; the only split vocabularies are induced from.
    Train,

    /// The validation split.
    Validation,

    /// The test split.
    Test,
}

/// Named splits of sentence pairs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CorpusSplits {
    splits: BTreeMap<SplitName, Vec<SentencePair>>,
}

impl<const N: usize> From<[(SplitName, Vec<SentencePair>); N]> for CorpusSplits {
    fn from(splits: [(SplitName, Vec<SentencePair>); N]) -> Self {
        splits.into_iter().collect()
    }
}

impl FromIterator<(SplitName, Vec<SentencePair>)> for CorpusSplits {
    fn from_iter<I: IntoIterator<Item = (SplitName, Vec<SentencePair>)>>(iter: I) -> Self {
        Self {
            splits: iter.into_iter().collect(),
        }
    }
}

impl CorpusSplits {
    /// Create an empty set of splits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the pairs for a split, returning any previous pairs.
    pub fn insert(
        &mut self,
        name: SplitName,
        pairs: Vec<SentencePair>,
    ) -> Option<Vec<SentencePair>> {
        self.splits.insert(name, pairs)
    }

    /// Take a split out.
    pub fn remove(
        &mut self,
        name: SplitName,
    ) -> Option<Vec<SentencePair>> {
        self.splits.remove(&name)
    }

    /// Get a split.
    pub fn get(
        &self,
        name: SplitName,
    ) -> Option<&[SentencePair]> {
        self.splits.get(&name).map(Vec::as_slice)
    }

    /// Does the split exist?
    pub fn contains(
        &self,
        name: SplitName,
    ) -> bool {
        self.splits.contains_key(&name)
    }

    /// The split names present, in order.
    pub fn names(&self) -> impl Iterator<Item = SplitName> + '_ {
        self.splits.keys().copied()
    }

    /// Iterate over the splits, in name order.
    pub fn iter(&self) -> impl Iterator<Item = (SplitName, &[SentencePair])> {
        self.splits.iter().map(|(k, v)| (*k, v.as_slice()))
    }

    /// The row counts of every split.
    pub fn num_rows(&self) -> BTreeMap<SplitName, usize> {
        self.splits.iter().map(|(k, v)| (*k, v.len())).collect()
    }

    /// Apply `f` to every split.
    pub fn map_splits<F>(
        self,
        mut f: F,
    ) -> Self
    where
        F: FnMut(SplitName, Vec<SentencePair>) -> Vec<SentencePair>,
    {
        Self {
            splits: self
                .splits
                .into_iter()
                .map(|(name, pairs)| (name, f(name, pairs)))
                .collect(),
        }
    }

    /// A lazy, restartable iterator over one language of one split.
    pub fn sentences(
        &self,
        name: SplitName,
        side: Side,
    ) -> impl Iterator<Item = &str> + Clone {
        self.get(name)
            .unwrap_or_default()
            .iter()
            .map(move |p| p.text(side))
    }
}

impl IntoIterator for CorpusSplits {
    type Item = (SplitName, Vec<SentencePair>);
    type IntoIter = std::collections::btree_map::IntoIter<SplitName, Vec<SentencePair>>;

    fn into_iter(self) -> Self::IntoIter {
        self.splits.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn test_split_names() {
        let names: Vec<String> = SplitName::iter().map(|s| s.to_string()).collect();
        assert_eq!(names, vec!["train", "validation", "test"]);
        assert_eq!(SplitName::from_str("validation").unwrap(), SplitName::Validation);
        assert!(SplitName::from_str("dev").is_err());
    }

    #[test]
    fn test_sentences_view() {
        let splits: CorpusSplits = [(
            SplitName::Train,
            vec![SentencePair::new("a b", "c d"), SentencePair::new("e", "f")],
        )]
        .into();

        let src: Vec<&str> = splits.sentences(SplitName::Train, Side::Source).collect();
        assert_eq!(src, vec!["a b", "e"]);

        // restartable.
        let tgt = splits.sentences(SplitName::Train, Side::Target);
        assert_eq!(tgt.clone().count(), 2);
        assert_eq!(tgt.collect::<Vec<_>>(), vec!["c d", "f"]);

        assert_eq!(splits.sentences(SplitName::Test, Side::Source).count(), 0);
        assert_eq!(splits.num_rows().get(&SplitName::Train), Some(&2));
    }

    #[test]
    fn test_collect_splits() {
        let splits: CorpusSplits = [
            (SplitName::Test, vec![SentencePair::new("x", "y")]),
            (SplitName::Train, vec![SentencePair::new("a", "b")]),
        ]
        .into();

        // Round-trips through its own iterator; names come back ordered.
        let rebuilt: CorpusSplits = splits.clone().into_iter().collect();
        assert_eq!(rebuilt, splits);
        assert_eq!(
            rebuilt.names().collect::<Vec<_>>(),
            vec![SplitName::Train, SplitName::Test]
        );
    }
}
