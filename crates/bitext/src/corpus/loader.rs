//! # Raw Corpus Loader
//!
//! Reads raw splits in the ``translation`` record layout:
//! each record holds a map from language code to sentence.
//!
//! For each split name, the loader collects (sorted by name) the files:
//! * `<split>.jsonl`, `<split>.json`, `<split>-*.jsonl`
//! * `<split>.parquet`, `<split>-*.parquet` (with the "parquet" feature)

use std::{
    collections::BTreeMap,
    fs::{self, File},
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
};

use serde::Deserialize;
use strum::IntoEnumIterator;

use crate::{
    corpus::{CorpusSplits, SentencePair, SplitName},
    errors::{BitextError, Result},
};

#[derive(Debug, Deserialize)]
struct TranslationRecord {
    translation: BTreeMap<String, String>,
}

/// The on-disk formats of a raw split file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileFormat {
    JsonLines,
    #[cfg(feature = "parquet")]
    Parquet,
}

impl FileFormat {
    fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "jsonl" | "json" => Some(Self::JsonLines),
            #[cfg(feature = "parquet")]
            "parquet" => Some(Self::Parquet),
            _ => None,
        }
    }
}

/// Loads raw bilingual splits for one language pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusLoader {
    src_lang: String,
    tgt_lang: String,
}

impl CorpusLoader {
    /// Create a loader for a language pair.
    pub fn new<S, T>(
        src_lang: S,
        tgt_lang: T,
    ) -> Self
    where
        S: Into<String>,
        T: Into<String>,
    {
        Self {
            src_lang: src_lang.into(),
            tgt_lang: tgt_lang.into(),
        }
    }

    /// Load every split found in `dir`.
    ///
    /// Splits without files are absent from the result.
    pub fn load_dir<P: AsRef<Path>>(
        &self,
        dir: P,
    ) -> Result<CorpusSplits> {
        let dir = dir.as_ref();
        let mut splits = CorpusSplits::new();
        for split in SplitName::iter() {
            let files = split_files(dir, split)?;
            if files.is_empty() {
                continue;
            }

            let mut pairs = Vec::new();
            for path in &files {
                log::info!("{split}: {}", path.display());
                pairs.extend(self.read_file(path)?);
            }
            splits.insert(split, pairs);
        }

        if splits.names().next().is_none() {
            return Err(BitextError::Corpus(format!(
                "no split files found in {}",
                dir.display()
            )));
        }
        Ok(splits)
    }

    /// Read the pairs of one file.
    pub fn read_file(
        &self,
        path: &Path,
    ) -> Result<Vec<SentencePair>> {
        match FileFormat::from_path(path) {
            Some(FileFormat::JsonLines) => {
                self.read_json_lines(BufReader::new(File::open(path)?), path)
            }
            #[cfg(feature = "parquet")]
            Some(FileFormat::Parquet) => self.read_parquet(path),
            None => Err(BitextError::Corpus(format!(
                "unsupported file format: {}",
                path.display()
            ))),
        }
    }

    /// Read ``jsonl`` records; blank lines are skipped.
    ///
    /// ## Arguments
    /// * `reader` - the line source.
    /// * `origin` - named in errors.
    pub fn read_json_lines<R: BufRead>(
        &self,
        reader: R,
        origin: &Path,
    ) -> Result<Vec<SentencePair>> {
        let mut pairs = Vec::new();
        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let record: TranslationRecord = serde_json::from_str(&line).map_err(|e| {
                BitextError::Corpus(format!("{}:{}: {e}", origin.display(), idx + 1))
            })?;
            pairs.push(self.pair_from_record(record, origin, idx + 1)?);
        }
        Ok(pairs)
    }

    fn pair_from_record(
        &self,
        mut record: TranslationRecord,
        origin: &Path,
        line: usize,
    ) -> Result<SentencePair> {
        let mut take = |lang: &str| {
            record.translation.remove(lang).ok_or_else(|| {
                BitextError::Corpus(format!(
                    "{}:{line}: missing language {lang:?}",
                    origin.display()
                ))
            })
        };
        let source_text = take(self.src_lang.as_str())?;
        let target_text = take(self.tgt_lang.as_str())?;
        Ok(SentencePair {
            source_text,
            target_text,
        })
    }

    #[cfg(feature = "parquet")]
    fn read_parquet(
        &self,
        path: &Path,
    ) -> Result<Vec<SentencePair>> {
        use arrow::array::{Array, AsArray};
        use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

        let corpus_err = |msg: String| BitextError::Corpus(format!("{}: {msg}", path.display()));

        let reader = ParquetRecordBatchReaderBuilder::try_new(File::open(path)?)?.build()?;

        let mut pairs = Vec::new();
        for batch in reader {
            let batch = batch?;

            let translation = batch
                .column_by_name("translation")
                .ok_or_else(|| corpus_err("missing 'translation' column".to_string()))?
                .as_struct_opt()
                .ok_or_else(|| corpus_err("'translation' is not a struct column".to_string()))?;

            let column = |lang: &str| {
                let col = translation
                    .column_by_name(lang)
                    .ok_or_else(|| corpus_err(format!("missing language {lang:?}")))?;
                string_values(col.as_ref())
                    .ok_or_else(|| corpus_err(format!("language {lang:?} is not a string column")))
            };
            let src = column(self.src_lang.as_str())?;
            let tgt = column(self.tgt_lang.as_str())?;

            for (row, (s, t)) in src.into_iter().zip(tgt).enumerate() {
                match (s, t) {
                    (Some(s), Some(t)) if translation.is_valid(row) => {
                        pairs.push(SentencePair::new(s, t))
                    }
                    _ => return Err(corpus_err(format!("null sentence at row {row}"))),
                }
            }
        }
        Ok(pairs)
    }
}

#[cfg(feature = "parquet")]
fn string_values(array: &dyn arrow::array::Array) -> Option<Vec<Option<String>>> {
    use arrow::array::AsArray;

    if let Some(strings) = array.as_string_opt::<i32>() {
        return Some(strings.iter().map(|s| s.map(str::to_string)).collect());
    }
    if let Some(strings) = array.as_string_opt::<i64>() {
        return Some(strings.iter().map(|s| s.map(str::to_string)).collect());
    }
    None
}

/// List the files of one split in `dir`, sorted by name.
fn split_files(
    dir: &Path,
    split: SplitName,
) -> Result<Vec<PathBuf>> {
    let stem = split.as_ref();
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if !entry.file_type()?.is_file() || FileFormat::from_path(&path).is_none() {
            continue;
        }
        let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        if name == stem || name.strip_prefix(stem).is_some_and(|r| r.starts_with('-')) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
