//! # Preprocess Config

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{
    corpus::SplitterOptions,
    errors::{BitextError, Result},
    normalize::NormalizerOptions,
    utility::expand_path,
    vocab::{Sentinel, VocabTrainerOptions},
};

fn default_seed() -> u64 {
    42
}

fn default_min_freq() -> u64 {
    2
}

fn default_batch_size() -> usize {
    32
}

fn default_tokenizer_basename() -> String {
    "tokenizer_{}.json".to_string()
}

fn default_data_loaders_basename() -> String {
    "data_loaders.json".to_string()
}

/// Placeholders replaced by the language code in `tokenizer_basename`.
const LANG_PLACEHOLDERS: [&str; 2] = ["{lang}", "{}"];

/// The options of a preprocessing run, read from yaml.
///
/// Unknown keys are rejected; defaults are resolved at load time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PreprocessConfig {
    /// The raw corpus path, or a name under the cache dir.
    pub dataset_path: String,

    /// A subdirectory of `dataset_path`.
    pub dataset_subset: Option<String>,

    /// Overrides the dataset cache dir.
    pub dataset_cache_dir: Option<String>,

    /// Subsample the train split to at most this many rows.
    pub max_train_set_size: Option<usize>,

    /// Carve validation from train at this rate.
    pub val_size_rate: Option<f64>,

    /// Carve test from train at this rate, when the raw corpus has no test split.
    pub test_size_rate: Option<f64>,

    /// The shuffle seed.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// The source language code.
    pub src_lang: String,

    /// The target language code.
    pub target_lang: String,

    /// The fixed sequence length `L`, sentinels included.
    pub seq_length: usize,

    /// Words seen fewer times in train are left out of the vocabulary.
    #[serde(default = "default_min_freq")]
    pub min_freq: u64,

    /// Caps the vocabulary size, sentinels included.
    pub max_vocab_size: Option<usize>,

    /// The train batch size.
    #[serde(default = "default_batch_size")]
    pub train_batch_size: usize,

    /// The validation and test batch size.
    #[serde(default = "default_batch_size")]
    pub eval_batch_size: usize,

    /// The artifact directory.
    pub checkpoints_dir: String,

    /// The vocabulary file name; `{}` or `{lang}` is replaced by the language code.
    #[serde(default = "default_tokenizer_basename")]
    pub tokenizer_basename: String,

    /// The batch source bundle file name.
    #[serde(default = "default_data_loaders_basename")]
    pub data_loaders_basename: String,

    /// Normalization for every language.
    #[serde(default)]
    pub normalization: NormalizerOptions,

    /// Per-language normalization, replacing `normalization`.
    #[serde(default)]
    pub normalization_overrides: BTreeMap<String, NormalizerOptions>,
}

impl PreprocessConfig {
    /// Create a config with the required options; the rest take defaults.
    pub fn new<D, S, T, C>(
        dataset_path: D,
        src_lang: S,
        target_lang: T,
        seq_length: usize,
        checkpoints_dir: C,
    ) -> Self
    where
        D: Into<String>,
        S: Into<String>,
        T: Into<String>,
        C: Into<String>,
    {
        Self {
            dataset_path: dataset_path.into(),
            dataset_subset: None,
            dataset_cache_dir: None,
            max_train_set_size: None,
            val_size_rate: None,
            test_size_rate: None,
            seed: default_seed(),
            src_lang: src_lang.into(),
            target_lang: target_lang.into(),
            seq_length,
            min_freq: default_min_freq(),
            max_vocab_size: None,
            train_batch_size: default_batch_size(),
            eval_batch_size: default_batch_size(),
            checkpoints_dir: checkpoints_dir.into(),
            tokenizer_basename: default_tokenizer_basename(),
            data_loaders_basename: default_data_loaders_basename(),
            normalization: NormalizerOptions::default(),
            normalization_overrides: BTreeMap::new(),
        }
    }

    /// Load and validate a yaml config file.
    ///
    /// ## Errors
    /// * [`BitextError::Io`] if the file cannot be read.
    /// * [`BitextError::ConfigParse`] on bad yaml, unknown keys, or missing keys.
    /// * [`BitextError::Config`] if a value is invalid.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        Self::parse(&text, path)
    }

    /// Parse and validate yaml text.
    ///
    /// ## Arguments
    /// * `text` - the yaml.
    /// * `origin` - named in parse errors.
    pub fn parse(
        text: &str,
        origin: &Path,
    ) -> Result<Self> {
        let config: Self = serde_yaml::from_str(text).map_err(|source| BitextError::ConfigParse {
            path: origin.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check option values.
    pub fn validate(&self) -> Result<()> {
        if self.seq_length <= 2 {
            return Err(BitextError::config("seq_length", "must be > 2"));
        }
        for (key, rate) in [
            ("val_size_rate", self.val_size_rate),
            ("test_size_rate", self.test_size_rate),
        ] {
            if let Some(rate) = rate
                && !(rate > 0.0 && rate < 1.0)
            {
                return Err(BitextError::config(
                    key,
                    format!("must be in (0, 1), got {rate}"),
                ));
            }
        }
        for (key, size) in [
            ("train_batch_size", self.train_batch_size),
            ("eval_batch_size", self.eval_batch_size),
        ] {
            if size == 0 {
                return Err(BitextError::config(key, "must be > 0"));
            }
        }
        if self.max_train_set_size == Some(0) {
            return Err(BitextError::config("max_train_set_size", "must be > 0"));
        }
        if self.min_freq == 0 {
            return Err(BitextError::config("min_freq", "must be > 0"));
        }
        if let Some(max) = self.max_vocab_size
            && max < Sentinel::ALL.len()
        {
            return Err(BitextError::config(
                "max_vocab_size",
                format!("must be >= {}", Sentinel::ALL.len()),
            ));
        }
        for (key, lang) in [
            ("src_lang", &self.src_lang),
            ("target_lang", &self.target_lang),
        ] {
            if lang.trim().is_empty() {
                return Err(BitextError::config(key, "must not be empty"));
            }
        }
        if self.src_lang == self.target_lang {
            return Err(BitextError::config(
                "target_lang",
                format!("must differ from src_lang {:?}", self.src_lang),
            ));
        }
        if !LANG_PLACEHOLDERS
            .iter()
            .any(|p| self.tokenizer_basename.contains(p))
        {
            return Err(BitextError::config(
                "tokenizer_basename",
                "must contain a `{}` or `{lang}` placeholder",
            ));
        }
        if self.data_loaders_basename.is_empty() {
            return Err(BitextError::config(
                "data_loaders_basename",
                "must not be empty",
            ));
        }
        Ok(())
    }

    /// The expanded artifact directory.
    pub fn checkpoints_dir(&self) -> Result<PathBuf> {
        expand_path("checkpoints_dir", &self.checkpoints_dir)
    }

    /// The expanded dataset path.
    pub fn dataset_path(&self) -> Result<PathBuf> {
        expand_path("dataset_path", &self.dataset_path)
    }

    /// The expanded dataset cache dir, if configured.
    pub fn dataset_cache_dir(&self) -> Result<Option<PathBuf>> {
        self.dataset_cache_dir
            .as_deref()
            .map(|dir| expand_path("dataset_cache_dir", dir))
            .transpose()
    }

    /// The vocabulary path for `lang`.
    pub fn tokenizer_path(
        &self,
        lang: &str,
    ) -> Result<PathBuf> {
        let name = LANG_PLACEHOLDERS
            .iter()
            .fold(self.tokenizer_basename.clone(), |name, p| {
                name.replace(p, lang)
            });
        Ok(self.checkpoints_dir()?.join(name))
    }

    /// The batch source bundle path.
    pub fn data_loaders_path(&self) -> Result<PathBuf> {
        Ok(self.checkpoints_dir()?.join(&self.data_loaders_basename))
    }

    /// The normalization for `lang`.
    pub fn normalizer_options(
        &self,
        lang: &str,
    ) -> NormalizerOptions {
        self.normalization_overrides
            .get(lang)
            .copied()
            .unwrap_or(self.normalization)
    }

    /// The splitter options.
    pub fn splitter_options(&self) -> SplitterOptions {
        SplitterOptions::new(self.seed)
            .with_max_train_set_size(self.max_train_set_size)
            .with_val_size_rate(self.val_size_rate)
            .with_test_size_rate(self.test_size_rate)
    }

    /// The vocabulary trainer options.
    pub fn vocab_options(&self) -> VocabTrainerOptions {
        VocabTrainerOptions::new(self.min_freq).with_max_vocab_size(self.max_vocab_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = "
dataset_path: data/en-vi
src_lang: en
target_lang: vi
seq_length: 64
checkpoints_dir: checkpoints
";

    fn parse(text: &str) -> Result<PreprocessConfig> {
        PreprocessConfig::parse(text, Path::new("config.yaml"))
    }

    #[test]
    fn test_defaults() {
        let config = parse(MINIMAL).unwrap();
        assert_eq!(
            config,
            PreprocessConfig::new("data/en-vi", "en", "vi", 64, "checkpoints")
        );
        assert_eq!(config.seed, 42);
        assert_eq!(config.min_freq, 2);
        assert_eq!(
            config.tokenizer_path("vi").unwrap(),
            PathBuf::from("checkpoints/tokenizer_vi.json")
        );
        assert_eq!(
            config.data_loaders_path().unwrap(),
            PathBuf::from("checkpoints/data_loaders.json")
        );
    }

    #[test]
    fn test_full() {
        let text = format!(
            "{MINIMAL}
dataset_subset: iwslt
max_train_set_size: 1000
val_size_rate: 0.1
seed: 7
tokenizer_basename: vocab-{{lang}}.json
normalization:
  lowercase: true
normalization_overrides:
  vi:
    lowercase: false
"
        );
        let config = parse(&text).unwrap();
        assert_eq!(config.dataset_subset.as_deref(), Some("iwslt"));
        assert_eq!(config.val_size_rate, Some(0.1));
        assert_eq!(
            config.tokenizer_path("en").unwrap(),
            PathBuf::from("checkpoints/vocab-en.json")
        );
        assert!(config.normalizer_options("en").lowercase);
        assert!(!config.normalizer_options("vi").lowercase);
        assert!(config.normalizer_options("vi").strip_control);
    }

    #[test]
    fn test_missing_and_unknown_keys() {
        let missing = parse("dataset_path: x\nsrc_lang: en\ntarget_lang: vi\ncheckpoints_dir: c\n")
            .unwrap_err();
        assert!(matches!(missing, BitextError::ConfigParse { .. }));
        assert!(missing.to_string().contains("seq_length"));

        let unknown = parse(&format!("{MINIMAL}batch_size: 3\n")).unwrap_err();
        assert!(matches!(unknown, BitextError::ConfigParse { .. }));
        assert!(unknown.to_string().contains("batch_size"));
    }

    #[test]
    fn test_invalid_values() {
        let key_of = |text: String| match parse(&text) {
            Err(BitextError::Config { key, .. }) => key,
            other => panic!("expected a config error, got {other:?}"),
        };

        let base = MINIMAL.replace("seq_length: 64", "seq_length: 2");
        assert_eq!(key_of(base), "seq_length");
        assert_eq!(key_of(format!("{MINIMAL}val_size_rate: 1.0\n")), "val_size_rate");
        assert_eq!(key_of(format!("{MINIMAL}eval_batch_size: 0\n")), "eval_batch_size");
        assert_eq!(key_of(format!("{MINIMAL}min_freq: 0\n")), "min_freq");
        assert_eq!(
            key_of(format!("{MINIMAL}tokenizer_basename: tok.json\n")),
            "tokenizer_basename"
        );
        assert_eq!(
            key_of(MINIMAL.replace("target_lang: vi", "target_lang: en")),
            "target_lang"
        );
    }
}
