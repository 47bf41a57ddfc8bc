//! # Batch

use std::collections::BTreeMap;

use ndarray::{Array2, ArrayView2};

use crate::encoding::{EncodedExample, Field};
use crate::types::TokenId;

/// A collated batch; one `[batch_size, width]` id matrix per field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Batch {
    tensors: BTreeMap<Field, Array2<TokenId>>,
}

impl Batch {
    /// Create a batch from field tensors.
    pub fn new(tensors: BTreeMap<Field, Array2<TokenId>>) -> Self {
        Self { tensors }
    }

    /// Get a field tensor.
    pub fn get(
        &self,
        field: Field,
    ) -> Option<ArrayView2<'_, TokenId>> {
        self.tensors.get(&field).map(Array2::view)
    }

    /// The fields present.
    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.tensors.keys().copied()
    }

    /// The number of rows.
    pub fn batch_size(&self) -> usize {
        self.tensors
            .values()
            .next()
            .map(|t| t.nrows())
            .unwrap_or_default()
    }

    /// Consume the batch, returning the tensors.
    pub fn into_tensors(self) -> BTreeMap<Field, Array2<TokenId>> {
        self.tensors
    }

    /// Split the batch back into rows.
    ///
    /// Rows keep the batch-local padding; absent fields are left empty.
    pub fn to_examples(&self) -> Vec<EncodedExample> {
        let mut examples = vec![EncodedExample::default(); self.batch_size()];
        for (field, tensor) in &self.tensors {
            for (example, row) in examples.iter_mut().zip(tensor.rows()) {
                *example.field_mut(*field) = row.to_vec();
            }
        }
        examples
    }
}
