//! # Corpus Splitter
//!
//! Seeded partitioning of a raw corpus into disjoint
//! train/validation/test splits.
//!
//! The same seed and the same input always produce the same split
//! membership and order.

use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};

use crate::{
    corpus::{CorpusSplits, SentencePair, SplitName},
    errors::{BitextError, Result},
};

/// Options for [`CorpusSplitter`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitterOptions {
    /// Shuffle and truncate the train split to at most this many rows.
    pub max_train_set_size: Option<usize>,

    /// Carve this fraction of train out as the validation split.
    pub val_size_rate: Option<f64>,

    /// Carve this fraction of train out as the test split;
    /// only used when the raw corpus has no test split.
    pub test_size_rate: Option<f64>,

    /// The shuffle seed.
    pub seed: u64,
}

impl SplitterOptions {
    /// Create new options with the given seed, and no resizing.
    pub fn new(seed: u64) -> Self {
        Self {
            max_train_set_size: None,
            val_size_rate: None,
            test_size_rate: None,
            seed,
        }
    }

    /// Sets the max train set size.
    pub fn with_max_train_set_size(
        self,
        max_train_set_size: Option<usize>,
    ) -> Self {
        Self {
            max_train_set_size,
            ..self
        }
    }

    /// Sets the validation fraction.
    pub fn with_val_size_rate(
        self,
        val_size_rate: Option<f64>,
    ) -> Self {
        Self {
            val_size_rate,
            ..self
        }
    }

    /// Sets the test fraction.
    pub fn with_test_size_rate(
        self,
        test_size_rate: Option<f64>,
    ) -> Self {
        Self {
            test_size_rate,
            ..self
        }
    }

    /// Build a [`CorpusSplitter`].
    pub fn init(self) -> CorpusSplitter {
        CorpusSplitter::new(self)
    }
}

/// Splits a raw corpus into train/validation/test.
#[derive(Debug, Clone)]
pub struct CorpusSplitter {
    options: SplitterOptions,
}

impl CorpusSplitter {
    /// Create a new splitter.
    pub fn new(options: SplitterOptions) -> Self {
        Self { options }
    }

    /// Get the options.
    pub fn options(&self) -> &SplitterOptions {
        &self.options
    }

    /// Split the raw corpus.
    ///
    /// ## Arguments
    /// * `raw` - the raw splits; `train` is required.
    ///
    /// ## Returns
    /// Splits containing exactly `train`, `validation`, and `test`.
    ///
    /// ## Errors
    /// * [`BitextError::MissingSplit`] when `train` is absent,
    ///   or when `validation`/`test` is neither present nor configured
    ///   to be carved from train.
    pub fn split(
        &self,
        mut raw: CorpusSplits,
    ) -> Result<CorpusSplits> {
        let opts = &self.options;

        let mut train = raw
            .remove(SplitName::Train)
            .ok_or_else(|| BitextError::MissingSplit {
                split: SplitName::Train.to_string(),
            })?;

        if let Some(max) = opts.max_train_set_size
            && max < train.len()
        {
            log::info!("Truncating train split: {} -> {}", train.len(), max);
            let mut perm = seeded_permutation(train.len(), opts.seed);
            perm.truncate(max);
            train = take_in_order(train, &perm);
        }

        let test = match (raw.remove(SplitName::Test), opts.test_size_rate) {
            (Some(test), _) => test,
            (None, Some(rate)) => {
                let (kept, held) = carve_split(train, rate, opts.seed);
                log::info!("Carved {} test rows from train", held.len());
                train = kept;
                held
            }
            (None, None) => {
                return Err(BitextError::MissingSplit {
                    split: SplitName::Test.to_string(),
                });
            }
        };

        let validation = match (raw.remove(SplitName::Validation), opts.val_size_rate) {
            (raw_validation, Some(rate)) => {
                if let Some(discarded) = raw_validation {
                    log::warn!(
                        "Discarding {} raw validation rows; validation is carved from train",
                        discarded.len()
                    );
                }
                let (kept, held) = carve_split(train, rate, opts.seed);
                train = kept;
                held
            }
            (Some(validation), None) => validation,
            (None, None) => {
                return Err(BitextError::MissingSplit {
                    split: SplitName::Validation.to_string(),
                });
            }
        };

        for name in raw.names() {
            log::warn!("Ignoring unexpected raw split: {name}");
        }

        log::info!(
            "Split sizes: train={}, validation={}, test={}",
            train.len(),
            validation.len(),
            test.len()
        );

        Ok([
            (SplitName::Train, train),
            (SplitName::Validation, validation),
            (SplitName::Test, test),
        ]
        .into())
    }
}

/// A seeded permutation of `0..n`.
pub fn seeded_permutation(
    n: usize,
    seed: u64,
) -> Vec<usize> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut perm: Vec<usize> = (0..n).collect();
    perm.shuffle(&mut rng);
    perm
}

/// Seeded random split of `items` into `(kept, held)`.
///
/// `held` receives `ceil(rate * n)` items, clamped so that both sides are
/// non-empty when `n >= 2`. Both sides are in permutation order.
pub fn carve_split<T>(
    items: Vec<T>,
    rate: f64,
    seed: u64,
) -> (Vec<T>, Vec<T>) {
    let n = items.len();
    let mut n_held = (rate * n as f64).ceil() as usize;
    if n >= 2 {
        n_held = n_held.clamp(1, n - 1);
    } else {
        n_held = 0;
    }

    let perm = seeded_permutation(n, seed);
    let (held_idx, kept_idx) = perm.split_at(n_held);

    let mut slots: Vec<Option<T>> = items.into_iter().map(Some).collect();
    let held = held_idx.iter().filter_map(|&i| slots[i].take()).collect();
    let kept = kept_idx.iter().filter_map(|&i| slots[i].take()).collect();
    (kept, held)
}

fn take_in_order(
    pairs: Vec<SentencePair>,
    order: &[usize],
) -> Vec<SentencePair> {
    let mut slots: Vec<Option<SentencePair>> = pairs.into_iter().map(Some).collect();
    order.iter().filter_map(|&i| slots[i].take()).collect()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use proptest::prelude::*;

    use super::*;

    fn pairs(n: usize) -> Vec<SentencePair> {
        (0..n)
            .map(|i| SentencePair::new(format!("src {i}"), format!("tgt {i}")))
            .collect()
    }

    fn raw(
        train: usize,
        test: Option<usize>,
    ) -> CorpusSplits {
        let mut splits = CorpusSplits::new();
        splits.insert(SplitName::Train, pairs(train));
        if let Some(test) = test {
            splits.insert(
                SplitName::Test,
                (0..test)
                    .map(|i| SentencePair::new(format!("test {i}"), "x"))
                    .collect(),
            );
        }
        splits
    }

    #[test]
    fn test_seeded_permutation_is_deterministic() {
        let a = seeded_permutation(50, 7);
        let b = seeded_permutation(50, 7);
        assert_eq!(a, b);

        let mut sorted = a.clone();
        sorted.sort();
        assert_eq!(sorted, (0..50).collect::<Vec<_>>());

        assert_ne!(seeded_permutation(50, 8), a);
    }

    #[test]
    fn test_carve_sizes() {
        let (kept, held) = carve_split((0..100).collect::<Vec<_>>(), 0.25, 1);
        assert_eq!(held.len(), 25);
        assert_eq!(kept.len(), 75);

        // ceil.
        let (kept, held) = carve_split((0..10).collect::<Vec<_>>(), 0.25, 1);
        assert_eq!(held.len(), 3);
        assert_eq!(kept.len(), 7);

        // clamped.
        let (kept, held) = carve_split((0..2).collect::<Vec<_>>(), 0.001, 1);
        assert_eq!((kept.len(), held.len()), (1, 1));

        let (kept, held) = carve_split(vec![1], 0.5, 1);
        assert_eq!((kept, held), (vec![1], vec![]));
    }

    #[test]
    fn test_split_with_validation_rate() {
        let splitter = SplitterOptions::new(42).with_val_size_rate(Some(0.25)).init();
        let splits = splitter.split(raw(40, Some(5))).unwrap();

        assert_eq!(splits.get(SplitName::Train).unwrap().len(), 30);
        assert_eq!(splits.get(SplitName::Validation).unwrap().len(), 10);
        assert_eq!(splits.get(SplitName::Test).unwrap().len(), 5);
    }

    #[test]
    fn test_split_truncates_train() {
        let splitter = SplitterOptions::new(3)
            .with_max_train_set_size(Some(20))
            .with_val_size_rate(Some(0.5))
            .init();
        let splits = splitter.split(raw(100, Some(5))).unwrap();

        assert_eq!(splits.get(SplitName::Train).unwrap().len(), 10);
        assert_eq!(splits.get(SplitName::Validation).unwrap().len(), 10);

        // A larger max is a no-op.
        let splitter = SplitterOptions::new(3)
            .with_max_train_set_size(Some(1000))
            .with_val_size_rate(Some(0.5))
            .init();
        let splits = splitter.split(raw(100, Some(5))).unwrap();
        assert_eq!(splits.get(SplitName::Train).unwrap().len(), 50);
    }

    #[test]
    fn test_missing_validation_is_an_error() {
        let splitter = SplitterOptions::new(42).init();
        let err = splitter.split(raw(10, Some(2))).unwrap_err();
        assert!(matches!(err, BitextError::MissingSplit { split } if split == "validation"));
    }

    #[test]
    fn test_raw_validation_is_carried() {
        let mut corpus = raw(10, Some(2));
        corpus.insert(SplitName::Validation, pairs(3));

        let splits = SplitterOptions::new(42).init().split(corpus).unwrap();
        assert_eq!(splits.get(SplitName::Train).unwrap(), pairs(10).as_slice());
        assert_eq!(splits.get(SplitName::Validation).unwrap().len(), 3);
    }

    #[test]
    fn test_missing_test_split() {
        let splitter = SplitterOptions::new(42).with_val_size_rate(Some(0.25)).init();
        let err = splitter.split(raw(10, None)).unwrap_err();
        assert!(matches!(err, BitextError::MissingSplit { split } if split == "test"));

        let splitter = SplitterOptions::new(42)
            .with_val_size_rate(Some(0.25))
            .with_test_size_rate(Some(0.25))
            .init();
        let splits = splitter.split(raw(16, None)).unwrap();
        assert_eq!(splits.get(SplitName::Test).unwrap().len(), 4);
        assert_eq!(splits.get(SplitName::Validation).unwrap().len(), 3);
        assert_eq!(splits.get(SplitName::Train).unwrap().len(), 9);
    }

    #[test]
    fn test_missing_train() {
        let err = SplitterOptions::new(1)
            .init()
            .split(CorpusSplits::new())
            .unwrap_err();
        assert!(matches!(err, BitextError::MissingSplit { split } if split == "train"));
    }

    proptest! {
        #[test]
        fn prop_splits_are_disjoint_and_deterministic(
            n in 2usize..200,
            seed in any::<u64>(),
            rate in 0.05f64..0.95,
        ) {
            let splitter = SplitterOptions::new(seed).with_val_size_rate(Some(rate)).init();

            let a = splitter.split(raw(n, Some(3))).unwrap();
            let b = splitter.split(raw(n, Some(3))).unwrap();
            prop_assert_eq!(&a, &b);

            let train: BTreeSet<_> = a.get(SplitName::Train).unwrap().iter().cloned().collect();
            let val: BTreeSet<_> = a.get(SplitName::Validation).unwrap().iter().cloned().collect();
            let test: BTreeSet<_> = a.get(SplitName::Test).unwrap().iter().cloned().collect();

            prop_assert!(train.is_disjoint(&val));
            prop_assert!(train.is_disjoint(&test));
            prop_assert!(val.is_disjoint(&test));
            prop_assert_eq!(train.len() + val.len(), n);
        }
    }
}
