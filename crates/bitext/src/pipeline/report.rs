//! # Preprocess Report

use std::{collections::BTreeMap, fmt};

use crate::corpus::{SplitDelta, SplitName};

/// Row counts observed during a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreprocessReport {
    /// Rows per split after splitting, before filtering.
    pub num_rows: BTreeMap<SplitName, usize>,

    /// The length filter deltas.
    pub deltas: Vec<SplitDelta>,

    /// The source vocabulary size.
    pub src_vocab_size: usize,

    /// The target vocabulary size.
    pub tgt_vocab_size: usize,
}

impl PreprocessReport {
    /// The delta for `split`.
    pub fn delta(
        &self,
        split: SplitName,
    ) -> Option<&SplitDelta> {
        self.deltas.iter().find(|d| d.split == split)
    }

    /// Total rows removed by the length filter.
    pub fn total_removed(&self) -> usize {
        self.deltas.iter().map(SplitDelta::removed).sum()
    }
}

impl fmt::Display for PreprocessReport {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        for delta in &self.deltas {
            writeln!(f, "Removed {} sentences from {}", delta.removed(), delta.split)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let report = PreprocessReport {
            deltas: vec![
                SplitDelta {
                    split: SplitName::Train,
                    before: 10,
                    after: 7,
                },
                SplitDelta {
                    split: SplitName::Test,
                    before: 4,
                    after: 4,
                },
            ],
            ..Default::default()
        };
        assert_eq!(
            report.to_string(),
            "Removed 3 sentences from train\nRemoved 0 sentences from test\n"
        );
        assert_eq!(report.total_removed(), 3);
        assert_eq!(report.delta(SplitName::Test).unwrap().after, 4);
    }
}
