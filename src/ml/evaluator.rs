// ============================================================
// Layer 5 — Evaluator
// ============================================================
// Runs the trained regressor over the held-out split in
// evaluation mode and collects what the test pass produces:
//
//   predictions  - one score per test window, no gradients
//   label_drift  - |Σ (labels[i+1] - labels[i])| / N
//
// There is no agreed test metric yet. Both the ranking score
// used after training and an error measure against label_drift
// have been proposed, so accuracy() reports
// IncompleteEvaluation instead of picking one.

use burn::prelude::*;

use crate::domain::error::RegressorError;
use crate::ml::model::Regressor;

/// Output of a held-out pass.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationReport {
    pub examples:    usize,
    pub predictions: Vec<f32>,
    pub label_drift: f64,
}

impl EvaluationReport {
    /// The final test metric. Not defined yet.
    pub fn accuracy(&self) -> Result<f64, RegressorError> {
        Err(RegressorError::IncompleteEvaluation)
    }

    pub fn mean_prediction(&self) -> f64 {
        if self.predictions.is_empty() {
            return f64::NAN;
        }
        self.predictions.iter().map(|&p| p as f64).sum::<f64>() / self.predictions.len() as f64
    }
}

/// Wraps an evaluation-mode model (already on the inner backend).
pub struct Evaluator<B: Backend> {
    model: Regressor<B>,
}

impl<B: Backend> Evaluator<B> {
    pub fn new(model: Regressor<B>) -> Self {
        Self { model }
    }

    /// tests: [N, word_size], labels: [N]
    pub fn test(&self, tests: Tensor<B, 2>, labels: Tensor<B, 1>) -> Result<EvaluationReport, RegressorError> {
        let [examples, _] = tests.dims();
        if examples == 0 {
            return Err(RegressorError::EmptyDataset { examples, required: 1 });
        }
        if labels.dims()[0] != examples {
            return Err(RegressorError::shape(
                format!("{examples} labels"),
                format!("{} labels", labels.dims()[0]),
            ));
        }

        // a single label has no steps
        let steps: f64 = if examples == 1 {
            0.0
        } else {
            (labels.clone().slice([1..examples]) - labels.slice([0..examples - 1]))
                .sum()
                .into_scalar()
                .elem::<f64>()
        };
        let label_drift = (steps / examples as f64).abs();

        let predictions = self
            .model
            .predict(tests)?
            .flatten::<1>(0, 1)
            .into_data()
            .to_vec::<f32>()
            .map_err(|e| RegressorError::shape("f32 predictions", format!("{e:?}")))?;

        tracing::debug!(
            "Evaluated {} held-out windows, label_drift={:.6}",
            examples, label_drift
        );

        Ok(EvaluationReport { examples, predictions, label_drift })
    }
}
