// ============================================================
// Layer 5 — Loss Functions
// ============================================================
// Regression losses for the training step and the margin
// ranking loss behind the "accuracy" score.
//
//   L1   = mean |ŷ - y|
//   MSE  = mean (ŷ - y)²
//   MRL  = mean max(0, -t · (x1 - x2) + margin)
//
// The accuracy score reported after training is
//   1 - MRL(x1 = predictions, x2 = labels, t = +1, margin = 0)
// which is a diagnostic, not a bounded accuracy.

use burn::{
    nn::loss::{MseLoss, Reduction},
    prelude::*,
};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Loss used for the per-batch gradient step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegressionLoss {
    /// Mean absolute error
    #[default]
    L1,
    /// Mean squared error
    Mse,
}

impl RegressionLoss {
    /// predictions, targets: [N, 1] → scalar tensor [1]
    ///
    /// Row i of the predictions is compared with row i of the targets
    /// only. This is not the N×N mean that broadcasting a [N, 1]
    /// prediction against a [N] label vector would give.
    pub fn forward<B: Backend>(&self, predictions: Tensor<B, 2>, targets: Tensor<B, 2>) -> Tensor<B, 1> {
        match self {
            RegressionLoss::L1  => (predictions - targets).abs().mean(),
            RegressionLoss::Mse => MseLoss::new().forward(predictions, targets, Reduction::Mean),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MarginRankingLoss {
    pub margin: f32,
}

impl MarginRankingLoss {
    pub fn new(margin: f32) -> Self {
        Self { margin }
    }

    /// x1, x2, y: [N] → scalar tensor [1]
    pub fn forward<B: Backend>(&self, x1: Tensor<B, 1>, x2: Tensor<B, 1>, y: Tensor<B, 1>) -> Tensor<B, 1> {
        (y.neg() * (x1 - x2))
            .add_scalar(self.margin)
            .clamp_min(0.0)
            .mean()
    }
}

/// `1 - MRL(predictions, labels, +1)` as an f64.
pub fn ranking_accuracy<B: Backend>(predictions: Tensor<B, 1>, labels: Tensor<B, 1>) -> f64 {
    let ones = labels.ones_like();
    let loss = MarginRankingLoss::default().forward(predictions, labels, ones);
    1.0 - loss.into_scalar().elem::<f64>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;

    type TB = NdArray;

    fn col(values: &[f32]) -> Tensor<TB, 2> {
        Tensor::<TB, 1>::from_floats(values, &Default::default()).reshape([values.len(), 1])
    }

    fn row(values: &[f32]) -> Tensor<TB, 1> {
        Tensor::<TB, 1>::from_floats(values, &Default::default())
    }

    #[test]
    fn test_l1_is_mean_absolute_error() {
        let loss = RegressionLoss::L1.forward(col(&[1.0, 2.0, 4.0]), col(&[2.0, 2.0, 1.0]));
        let v: f32 = loss.into_scalar();
        assert!((v - 4.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_mse() {
        let loss = RegressionLoss::Mse.forward(col(&[1.0, 3.0]), col(&[0.0, 1.0]));
        let v: f32 = loss.into_scalar();
        assert!((v - 2.5).abs() < 1e-6);
    }

    #[test]
    fn test_margin_ranking_counts_only_violations() {
        let mrl = MarginRankingLoss::default();
        // x1 ranked above x2 everywhere → no loss
        let zero: f32 = mrl.forward(row(&[2.0, 3.0]), row(&[1.0, 1.0]), row(&[1.0, 1.0])).into_scalar();
        assert_eq!(zero, 0.0);
        // one violation of size 2, averaged over 2
        let one: f32 = mrl.forward(row(&[2.0, 1.0]), row(&[1.0, 3.0]), row(&[1.0, 1.0])).into_scalar();
        assert!((one - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_margin_shifts_threshold() {
        let mrl = MarginRankingLoss::new(0.5);
        let v: f32 = mrl.forward(row(&[1.0]), row(&[1.0]), row(&[1.0])).into_scalar();
        assert!((v - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_ranking_accuracy_unbounded_below() {
        let acc = ranking_accuracy(row(&[0.0, 0.0]), row(&[3.0, 5.0]));
        assert!((acc - (1.0 - 4.0)).abs() < 1e-6);
        assert_eq!(ranking_accuracy(row(&[5.0]), row(&[1.0])), 1.0);
    }
}
