//! # Padding Collator

use std::collections::BTreeMap;

use ndarray::Array2;
use strum::IntoEnumIterator;

use crate::{
    encoding::{Batch, EncodedExample, Field},
    types::TokenId,
};

/// Stacks [`EncodedExample`]s into a [`Batch`].
///
/// Each field is padded to the longest row of that field in the batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaddingCollator {
    pad_id: TokenId,
    fields: Vec<Field>,
}

impl PaddingCollator {
    /// Create a collator over every [`Field`].
    pub fn new(pad_id: TokenId) -> Self {
        Self {
            pad_id,
            fields: Field::iter().collect(),
        }
    }

    /// Restrict the collated fields.
    pub fn with_fields<I>(
        self,
        fields: I,
    ) -> Self
    where
        I: IntoIterator<Item = Field>,
    {
        Self {
            fields: fields.into_iter().collect(),
            ..self
        }
    }

    /// The pad id.
    pub fn pad_id(&self) -> TokenId {
        self.pad_id
    }

    /// The collated fields.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Collate `examples` into a batch.
    ///
    /// An empty slice yields `[0, 0]` tensors.
    pub fn collate(
        &self,
        examples: &[EncodedExample],
    ) -> Batch {
        let tensors: BTreeMap<Field, Array2<TokenId>> = self
            .fields
            .iter()
            .map(|&field| (field, self.collate_field(field, examples)))
            .collect();
        Batch::new(tensors)
    }

    fn collate_field(
        &self,
        field: Field,
        examples: &[EncodedExample],
    ) -> Array2<TokenId> {
        let width = examples
            .iter()
            .map(|ex| ex.field(field).len())
            .max()
            .unwrap_or_default();

        let mut tensor = Array2::from_elem((examples.len(), width), self.pad_id);
        for (mut row, ex) in tensor.rows_mut().into_iter().zip(examples) {
            for (slot, &id) in row.iter_mut().zip(ex.field(field)) {
                *slot = id;
            }
        }
        tensor
    }
}

#[cfg(test)]
mod tests {
    use ndarray::array;
    use proptest::prelude::*;

    use super::*;

    fn example(
        enc: &[TokenId],
        dec: &[TokenId],
        labels: &[TokenId],
    ) -> EncodedExample {
        EncodedExample {
            encoder_input: enc.to_vec(),
            decoder_input: dec.to_vec(),
            labels: labels.to_vec(),
        }
    }

    #[test]
    fn test_pads_to_batch_max() {
        let collator = PaddingCollator::new(0);
        let batch = collator.collate(&[
            example(&[5, 2], &[1, 7], &[7, 2]),
            example(&[5, 6, 2], &[1], &[2]),
        ]);

        assert_eq!(batch.batch_size(), 2);
        assert_eq!(
            batch.get(Field::EncoderInput).unwrap(),
            array![[5u32, 2, 0], [5, 6, 2]]
        );
        assert_eq!(batch.get(Field::DecoderInput).unwrap(), array![[1u32, 7], [1, 0]]);
        assert_eq!(batch.get(Field::Labels).unwrap(), array![[7u32, 2], [2, 0]]);
    }

    #[test]
    fn test_field_subset() {
        let collator = PaddingCollator::new(0).with_fields([Field::Labels]);
        let batch = collator.collate(&[example(&[5], &[1], &[2])]);
        assert_eq!(batch.fields().collect::<Vec<_>>(), vec![Field::Labels]);
        assert!(batch.get(Field::EncoderInput).is_none());
    }

    #[test]
    fn test_empty() {
        let batch = PaddingCollator::new(0).collate(&[]);
        assert_eq!(batch.batch_size(), 0);
        assert_eq!(batch.get(Field::Labels).unwrap().dim(), (0, 0));
    }

    proptest! {
        #[test]
        fn prop_fixed_width_rows_survive_collation(
            rows in proptest::collection::vec(proptest::collection::vec(1u32..50, 6), 1..8),
        ) {
            let examples: Vec<_> = rows
                .iter()
                .map(|r| example(r, &r[..4], &r[2..]))
                .collect();
            let batch = PaddingCollator::new(0).collate(&examples);

            let enc = batch.get(Field::EncoderInput).unwrap();
            prop_assert_eq!(enc.dim(), (rows.len(), 6));

            // Uniform widths within a field need no padding.
            for (ex, back) in examples.iter().zip(batch.to_examples()) {
                prop_assert_eq!(&ex.encoder_input, &back.encoder_input);
                prop_assert_eq!(&ex.decoder_input, &back.decoder_input);
                prop_assert_eq!(&ex.labels, &back.labels);
            }
        }
    }
}
