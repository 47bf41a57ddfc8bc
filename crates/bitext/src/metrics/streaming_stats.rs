//! # Streaming Stats

use std::{collections::BTreeMap, fmt};

use ndarray::ArrayView2;
use serde::{Deserialize, Serialize};

use crate::{
    errors::{BitextError, Result},
    types::TokenId,
};

/// Options for [`StreamingStats`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatsOptions {
    /// The F-beta weight.
    pub f_beta: f64,

    /// The pad id; positions with this label are excluded from token accuracy.
    pub pad_id: Option<TokenId>,

    /// Drop pad-labelled positions from every metric.
    pub ignore_padding: bool,
}

impl Default for StatsOptions {
    fn default() -> Self {
        Self {
            f_beta: 0.5,
            pad_id: None,
            ignore_padding: false,
        }
    }
}

impl StatsOptions {
    /// Sets the F-beta weight.
    pub fn with_f_beta(
        self,
        f_beta: f64,
    ) -> Self {
        Self { f_beta, ..self }
    }

    /// Sets the pad id.
    pub fn with_pad_id(
        self,
        pad_id: Option<TokenId>,
    ) -> Self {
        Self { pad_id, ..self }
    }

    /// Sets whether pad-labelled positions are dropped.
    pub fn with_ignore_padding(
        self,
        ignore_padding: bool,
    ) -> Self {
        Self {
            ignore_padding,
            ..self
        }
    }

    /// Build the stats accumulator.
    ///
    /// ## Errors
    /// * [`BitextError::Config`] if `ignore_padding` is set without a pad id,
    ///   or `f_beta` is not a positive finite number.
    pub fn init(self) -> Result<StreamingStats> {
        if self.ignore_padding && self.pad_id.is_none() {
            return Err(BitextError::config(
                "pad_id",
                "required when ignore_padding is set",
            ));
        }
        if !(self.f_beta.is_finite() && self.f_beta > 0.0) {
            return Err(BitextError::config(
                "f_beta",
                format!("must be a positive number, got {}", self.f_beta),
            ));
        }
        Ok(StreamingStats::new(self))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct ClassCounts {
    true_positives: u64,
    predicted: u64,
    support: u64,
}

/// The metrics of an evaluation pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatsReport {
    /// Mean loss per batch.
    pub loss: f64,

    /// Fraction of compared positions predicted correctly.
    pub accuracy: f64,

    /// Correct non-pad predictions over non-pad labels; `None` with no such labels.
    pub token_accuracy: Option<f64>,

    /// Support-weighted precision.
    pub precision: f64,

    /// Support-weighted recall.
    pub recall: f64,

    /// Support-weighted F-beta.
    pub f_beta: f64,
}

impl fmt::Display for StatsReport {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(
            f,
            "loss={:.4} acc={:.4} precision={:.4} recall={:.4} f_beta={:.4}",
            self.loss, self.accuracy, self.precision, self.recall, self.f_beta
        )?;
        if let Some(token_accuracy) = self.token_accuracy {
            write!(f, " token_acc={token_accuracy:.4}")?;
        }
        Ok(())
    }
}

/// Accumulates loss and label predictions across batches.
#[derive(Debug, Clone, PartialEq)]
pub struct StreamingStats {
    options: StatsOptions,
    num_batches: u64,
    loss_sum: f64,
    num_matches: u64,
    num_totals: u64,
    num_correct: u64,
    num_compared: u64,
    classes: BTreeMap<TokenId, ClassCounts>,
}

impl StreamingStats {
    /// Create a new accumulator; see [`StatsOptions::init`].
    fn new(options: StatsOptions) -> Self {
        Self {
            options,
            num_batches: 0,
            loss_sum: 0.0,
            num_matches: 0,
            num_totals: 0,
            num_correct: 0,
            num_compared: 0,
            classes: BTreeMap::new(),
        }
    }

    /// The options.
    pub fn options(&self) -> &StatsOptions {
        &self.options
    }

    /// The number of batches seen.
    pub fn num_batches(&self) -> u64 {
        self.num_batches
    }

    /// Correct predictions at non-pad positions.
    pub fn num_matches(&self) -> u64 {
        self.num_matches
    }

    /// Non-pad label positions.
    pub fn num_totals(&self) -> u64 {
        self.num_totals
    }

    /// Clear all accumulated state.
    pub fn reset(&mut self) {
        *self = Self::new(self.options);
    }

    /// Add one batch.
    ///
    /// ## Arguments
    /// * `loss` - the batch loss.
    /// * `y_pred` - predicted ids, `[batch_size, L]`.
    /// * `y_true` - label ids, `[batch_size, L]`.
    ///
    /// ## Errors
    /// * [`BitextError::ShapeMismatch`] if the shapes differ; nothing is recorded.
    pub fn update_step(
        &mut self,
        loss: f64,
        y_pred: ArrayView2<'_, TokenId>,
        y_true: ArrayView2<'_, TokenId>,
    ) -> Result<()> {
        if y_pred.shape() != y_true.shape() {
            return Err(BitextError::ShapeMismatch {
                expected: y_true.shape().to_vec(),
                actual: y_pred.shape().to_vec(),
            });
        }

        self.loss_sum += loss;
        self.num_batches += 1;

        let pad_id = self.options.pad_id;
        let is_pad = |id: TokenId| Some(id) == pad_id;

        for (&pred, &label) in y_pred.iter().zip(y_true.iter()) {
            if !is_pad(label) {
                self.num_totals += 1;
            }
            if pred == label && !is_pad(pred) {
                self.num_matches += 1;
            }

            if self.options.ignore_padding && is_pad(label) {
                continue;
            }

            self.num_compared += 1;
            self.classes.entry(label).or_default().support += 1;
            self.classes.entry(pred).or_default().predicted += 1;
            if pred == label {
                self.num_correct += 1;
                self.classes.entry(label).or_default().true_positives += 1;
            }
        }
        Ok(())
    }

    /// Compute the report; `None` before the first batch.
    pub fn compute(&self) -> Option<StatsReport> {
        if self.num_batches == 0 {
            return None;
        }

        let beta2 = self.options.f_beta * self.options.f_beta;
        let mut precision = 0.0;
        let mut recall = 0.0;
        let mut f_beta = 0.0;
        let mut total_support = 0u64;

        for counts in self.classes.values() {
            if counts.support == 0 {
                continue;
            }
            let tp = counts.true_positives as f64;
            let p = ratio(tp, counts.predicted as f64);
            let r = ratio(tp, counts.support as f64);
            let f = ratio((1.0 + beta2) * p * r, beta2 * p + r);

            let weight = counts.support as f64;
            precision += weight * p;
            recall += weight * r;
            f_beta += weight * f;
            total_support += counts.support;
        }

        let total = total_support as f64;
        let report = StatsReport {
            loss: self.loss_sum / self.num_batches as f64,
            accuracy: ratio(self.num_correct as f64, self.num_compared as f64),
            token_accuracy: (self.num_totals > 0)
                .then(|| self.num_matches as f64 / self.num_totals as f64),
            precision: ratio(precision, total),
            recall: ratio(recall, total),
            f_beta: ratio(f_beta, total),
        };

        log::debug!(
            "stats: matches={} totals={} over {} batches",
            self.num_matches,
            self.num_totals,
            self.num_batches
        );
        Some(report)
    }
}

/// `num / den`, or zero when `den` is zero.
fn ratio(
    num: f64,
    den: f64,
) -> f64 {
    if den == 0.0 { 0.0 } else { num / den }
}
