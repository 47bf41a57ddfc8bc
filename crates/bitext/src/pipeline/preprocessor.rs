//! # Preprocessor

use std::sync::Arc;

use crate::{
    corpus::{
        CorpusLoader,
        CorpusSplits,
        CorpusSplitter,
        LengthFilter,
        Side,
        SplitName,
        corpus_location::resolve_corpus_dir,
    },
    encoding::{SequenceEncoder, check_pad_ids},
    errors::{BitextError, Result},
    loaders::{BatchSource, BatchSourceBundle, PairDataset},
    normalize::PairNormalizer,
    pipeline::{PreprocessConfig, PreprocessReport},
    utility::{to_json_bytes, write_all_atomic},
    vocab::{Vocabulary, build_vocabulary, io::VocabularyFile},
};

/// Rows of the normalized train split logged at debug level.
const SAMPLE_ROWS: usize = 5;

/// The in-memory result of [`Preprocessor::prepare`].
#[derive(Debug, Clone)]
pub struct PreparedCorpus {
    /// The source vocabulary.
    pub src_vocab: Arc<Vocabulary>,

    /// The target vocabulary.
    pub tgt_vocab: Arc<Vocabulary>,

    /// The batch sources.
    pub bundle: BatchSourceBundle,

    /// The row counts.
    pub report: PreprocessReport,
}

/// Runs the preprocessing pipeline for one [`PreprocessConfig`].
#[derive(Debug, Clone)]
pub struct Preprocessor {
    config: PreprocessConfig,
}

impl Preprocessor {
    /// Create a preprocessor.
    ///
    /// ## Errors
    /// * [`BitextError::Config`] if the config is invalid.
    pub fn new(config: PreprocessConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The config.
    pub fn config(&self) -> &PreprocessConfig {
        &self.config
    }

    /// Load, prepare, and persist.
    pub fn run(&self) -> Result<PreprocessReport> {
        let raw = self.load_raw()?;
        let prepared = self.prepare(raw)?;
        self.persist(&prepared)?;
        Ok(prepared.report)
    }

    /// Load the raw corpus splits.
    pub fn load_raw(&self) -> Result<CorpusSplits> {
        let config = &self.config;
        let dir = resolve_corpus_dir(
            &config.dataset_path()?,
            config.dataset_subset.as_deref(),
            config.dataset_cache_dir()?.as_deref(),
        )?;
        log::info!("Loading corpus from {}", dir.display());

        CorpusLoader::new(&config.src_lang, &config.target_lang).load_dir(dir)
    }

    /// Run every in-memory stage on `raw`.
    ///
    /// ## Errors
    /// * [`BitextError::MissingSplit`] if a split can be neither found nor carved.
    /// * [`BitextError::PadMismatch`] if the vocabularies disagree on the pad id.
    /// * [`BitextError::EmptySplit`] if filtering leaves a split empty.
    pub fn prepare(
        &self,
        raw: CorpusSplits,
    ) -> Result<PreparedCorpus> {
        let config = &self.config;

        let splits = CorpusSplitter::new(config.splitter_options()).split(raw)?;
        let num_rows = splits.num_rows();

        let normalizer = PairNormalizer::new(
            config.normalizer_options(&config.src_lang),
            config.normalizer_options(&config.target_lang),
        );
        let splits = splits.map_splits(|_, pairs| normalizer.normalize_split(&pairs));
        for pair in splits
            .get(SplitName::Train)
            .unwrap_or_default()
            .iter()
            .take(SAMPLE_ROWS)
        {
            log::debug!("{pair:?}");
        }

        log::info!("Building vocabularies from the train split");
        let src_vocab = build_vocabulary(
            splits.sentences(SplitName::Train, Side::Source),
            config.vocab_options(),
        )?;
        let tgt_vocab = build_vocabulary(
            splits.sentences(SplitName::Train, Side::Target),
            config.vocab_options(),
        )?;
        log::info!(
            "Vocabulary sizes: {}={}, {}={}",
            config.src_lang,
            src_vocab.len(),
            config.target_lang,
            tgt_vocab.len()
        );
        let pad_id = check_pad_ids(&src_vocab, &tgt_vocab)?;

        log::info!("Removing sentences longer than the sequence length");
        let (mut splits, deltas) =
            LengthFilter::for_seq_length(&src_vocab, &tgt_vocab, config.seq_length)?
                .filter_splits(splits);
        for delta in &deltas {
            log::info!("Removed {} sentences from {}", delta.removed(), delta.split);
        }

        let encoder = SequenceEncoder::new(
            Arc::new(src_vocab),
            Arc::new(tgt_vocab),
            config.seq_length,
        )?;

        let mut source_for = |name: SplitName, batch_size: usize| -> Result<BatchSource> {
            let pairs = splits.remove(name).unwrap_or_default();
            if pairs.is_empty() {
                return Err(BitextError::EmptySplit {
                    split: name.to_string(),
                });
            }
            let dataset = PairDataset::new(
                pairs,
                encoder.clone(),
                &config.src_lang,
                &config.target_lang,
            );
            BatchSource::new(name, dataset.encode_all()?, batch_size, pad_id)
        };

        let bundle = BatchSourceBundle {
            train: source_for(SplitName::Train, config.train_batch_size)?.with_shuffle(config.seed),
            validation: source_for(SplitName::Validation, config.eval_batch_size)?,
            test: source_for(SplitName::Test, config.eval_batch_size)?,
        };

        let report = PreprocessReport {
            num_rows,
            deltas,
            src_vocab_size: encoder.src_vocab().len(),
            tgt_vocab_size: encoder.tgt_vocab().len(),
        };

        Ok(PreparedCorpus {
            src_vocab: encoder.src_vocab().clone(),
            tgt_vocab: encoder.tgt_vocab().clone(),
            bundle,
            report,
        })
    }

    /// Write the vocabularies and the batch source bundle.
    ///
    /// All three artifacts are staged before any is renamed into place.
    pub fn persist(
        &self,
        prepared: &PreparedCorpus,
    ) -> Result<()> {
        let config = &self.config;
        let mut files = Vec::with_capacity(3);
        for (lang, vocab) in [
            (&config.src_lang, &prepared.src_vocab),
            (&config.target_lang, &prepared.tgt_vocab),
        ] {
            let path = config.tokenizer_path(lang)?;
            log::info!("Saving {lang} vocabulary to {}", path.display());
            files.push((path, to_json_bytes(&VocabularyFile::from(vocab.as_ref()))?));
        }

        let path = config.data_loaders_path()?;
        log::info!("Saving batch sources to {}", path.display());
        files.push((path, to_json_bytes(&prepared.bundle)?));

        write_all_atomic(&files)
    }
}
