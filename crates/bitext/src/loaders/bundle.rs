//! # Batch Source Bundle

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{
    corpus::SplitName,
    errors::Result,
    loaders::BatchSource,
    utility::{read_json_path, write_json_path},
};

/// The three batch sources of a prepared corpus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BatchSourceBundle {
    /// The shuffled train source.
    pub train: BatchSource,

    /// The validation source.
    pub validation: BatchSource,

    /// The test source.
    pub test: BatchSource,
}

impl BatchSourceBundle {
    /// Get a source by split name.
    pub fn get(
        &self,
        name: SplitName,
    ) -> &BatchSource {
        match name {
            SplitName::Train => &self.train,
            SplitName::Validation => &self.validation,
            SplitName::Test => &self.test,
        }
    }

    /// Save the bundle as json, atomically.
    pub fn save<P: AsRef<Path>>(
        &self,
        path: P,
    ) -> Result<()> {
        write_json_path(path, self)
    }

    /// Load a bundle saved by [`BatchSourceBundle::save`].
    ///
    /// Each source is validated as it is deserialized.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        read_json_path(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::EncodedExample;

    #[test]
    fn test_save_load() {
        let dir = tempdir::TempDir::new("bundle").unwrap();
        let path = dir.path().join("data_loaders.json");

        let ex = EncodedExample {
            encoder_input: vec![4, 2],
            decoder_input: vec![1, 5],
            labels: vec![5, 2],
        };
        let bundle = BatchSourceBundle {
            train: BatchSource::new(SplitName::Train, vec![ex.clone(); 3], 2, 0)
                .unwrap()
                .with_shuffle(7),
            validation: BatchSource::new(SplitName::Validation, vec![ex.clone()], 4, 0).unwrap(),
            test: BatchSource::new(SplitName::Test, vec![ex], 4, 0).unwrap(),
        };

        bundle.save(&path).unwrap();
        let loaded = BatchSourceBundle::load(&path).unwrap();
        assert_eq!(loaded, bundle);
        assert!(loaded.get(SplitName::Train).is_shuffled());
        assert_eq!(loaded.get(SplitName::Test).len(), 1);
    }

    #[test]
    fn test_load_rejects_zero_batch_size() {
        let dir = tempdir::TempDir::new("bundle").unwrap();
        let path = dir.path().join("data_loaders.json");

        let source = |name: &str| {
            serde_json::json!({
                "name": name, "batch_size": 0, "shuffle": false,
                "seed": 0, "pad_id": 0, "examples": [],
            })
        };
        let json = serde_json::json!({
            "train": source("train"),
            "validation": source("validation"),
            "test": source("test"),
        });
        std::fs::write(&path, json.to_string()).unwrap();

        assert!(BatchSourceBundle::load(&path).is_err());
    }
}
