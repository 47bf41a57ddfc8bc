//! # Batch Source

use serde::{Deserialize, Serialize};

use crate::{
    corpus::{SplitName, seeded_permutation},
    encoding::{Batch, EncodedExample, PaddingCollator},
    errors::{BitextError, Result},
    types::TokenId,
};

/// Encoded examples of one split, served as padded batches.
///
/// When `shuffle` is set, epoch `e` visits examples in the seeded
/// permutation of `seed + e`; otherwise in stored order.
/// The last batch of an epoch may be short.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BatchSourceFile")]
pub struct BatchSource {
    name: SplitName,
    batch_size: usize,
    shuffle: bool,
    seed: u64,
    pad_id: TokenId,
    examples: Vec<EncodedExample>,
}

/// The unchecked json form of a [`BatchSource`].
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct BatchSourceFile {
    name: SplitName,
    batch_size: usize,
    shuffle: bool,
    seed: u64,
    pad_id: TokenId,
    examples: Vec<EncodedExample>,
}

impl TryFrom<BatchSourceFile> for BatchSource {
    type Error = BitextError;

    fn try_from(file: BatchSourceFile) -> Result<Self> {
        let source = Self {
            name: file.name,
            batch_size: file.batch_size,
            shuffle: file.shuffle,
            seed: file.seed,
            pad_id: file.pad_id,
            examples: file.examples,
        };
        source.validate()?;
        Ok(source)
    }
}

impl BatchSource {
    /// Create an unshuffled batch source.
    ///
    /// ## Errors
    /// * [`BitextError::Config`] if `batch_size` is zero.
    pub fn new(
        name: SplitName,
        examples: Vec<EncodedExample>,
        batch_size: usize,
        pad_id: TokenId,
    ) -> Result<Self> {
        let source = Self {
            name,
            batch_size,
            shuffle: false,
            seed: 0,
            pad_id,
            examples,
        };
        source.validate()?;
        Ok(source)
    }

    /// Shuffle each epoch, seeded from `seed`.
    pub fn with_shuffle(
        self,
        seed: u64,
    ) -> Self {
        Self {
            shuffle: true,
            seed,
            ..self
        }
    }

    /// Check the batch size.
    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            let key = match self.name {
                SplitName::Train => "train_batch_size",
                SplitName::Validation | SplitName::Test => "eval_batch_size",
            };
            return Err(BitextError::config(key, "must be > 0"));
        }
        Ok(())
    }

    /// The split name.
    pub fn name(&self) -> SplitName {
        self.name
    }

    /// The batch size.
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Is the order shuffled per epoch?
    pub fn is_shuffled(&self) -> bool {
        self.shuffle
    }

    /// The pad id.
    pub fn pad_id(&self) -> TokenId {
        self.pad_id
    }

    /// The number of examples.
    pub fn len(&self) -> usize {
        self.examples.len()
    }

    /// Is the source empty?
    pub fn is_empty(&self) -> bool {
        self.examples.is_empty()
    }

    /// The stored examples.
    pub fn examples(&self) -> &[EncodedExample] {
        &self.examples
    }

    /// The number of batches per epoch.
    pub fn num_batches(&self) -> usize {
        self.examples.len().div_ceil(self.batch_size)
    }

    /// The collator used for batches.
    pub fn collator(&self) -> PaddingCollator {
        PaddingCollator::new(self.pad_id)
    }

    /// The example order for `epoch`.
    pub fn epoch_order(
        &self,
        epoch: u64,
    ) -> Vec<usize> {
        if self.shuffle {
            seeded_permutation(self.examples.len(), self.seed.wrapping_add(epoch))
        } else {
            (0..self.examples.len()).collect()
        }
    }

    /// Iterate the batches of `epoch`.
    pub fn batches(
        &self,
        epoch: u64,
    ) -> impl Iterator<Item = Batch> + '_ {
        let collator = self.collator();
        let order = self.epoch_order(epoch);
        let batch_size = self.batch_size;
        (0..self.num_batches()).map(move |b| {
            let start = b * batch_size;
            let end = (start + batch_size).min(order.len());
            let rows: Vec<EncodedExample> = order[start..end]
                .iter()
                .map(|&i| self.examples[i].clone())
                .collect();
            collator.collate(&rows)
        })
    }
}
