// ============================================================
// Layer 5 — Training Loop
// ============================================================
// One ordered pass over the training split in full batches,
// then a single evaluation-mode pass over the whole split for
// the ranking-accuracy score.
//
// Burn notes:
//   - Training runs on an AutodiffBackend; BatchNorm uses batch
//     statistics there.
//   - model.valid() returns the model on B::InnerBackend, which
//     freezes BatchNorm to its running statistics and tracks no
//     gradients. That is "evaluation mode".
//   - loss.backward() returns a fresh gradient set every step,
//     so there is nothing to zero between batches.
//
// Construction is two-phase. A TrainerBuilder starts without an
// optimizer and only gains a build() method once with_optimizer()
// has been called, so an unconfigured trainer cannot exist.
//
// Reference: Burn Book §5, Kingma & Ba (2015) Adam

use burn::{
    module::AutodiffModule,
    optim::{AdamConfig, GradientsParams, Optimizer},
    prelude::*,
    tensor::backend::AutodiffBackend,
};
use crate::config::{ADAM_BETA_1, ADAM_BETA_2, ADAM_EPSILON, BATCH_SIZE, LEARNING_RATE};
use crate::domain::error::RegressorError;
use crate::ml::loss::{ranking_accuracy, RegressionLoss};
use crate::ml::model::Regressor;

/// Adam with the usual defaults (β1=0.9, β2=0.999, ε=1e-8).
pub fn default_adam() -> AdamConfig {
    AdamConfig::new()
        .with_beta_1(ADAM_BETA_1)
        .with_beta_2(ADAM_BETA_2)
        .with_epsilon(ADAM_EPSILON)
}

/// Result of one training pass.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainOutcome {
    /// Arithmetic mean of the per-batch losses.
    pub mean_loss:    f64,
    /// 1 - margin ranking loss over the whole training split.
    pub accuracy:     f64,
    pub batch_losses: Vec<f64>,
    /// Examples ignored because they did not fill a batch.
    pub remainder:    usize,
}

impl TrainOutcome {
    pub fn batches(&self) -> usize {
        self.batch_losses.len()
    }
}

// ─── Builder ──────────────────────────────────────────────────────────────────
/// Marker for a builder that has no optimizer yet.
pub struct NoOptimizer;

pub struct TrainerBuilder<B: AutodiffBackend, O> {
    model:         Regressor<B>,
    optimizer:     O,
    loss:          RegressionLoss,
    batch_size:    usize,
    learning_rate: f64,
}

impl<B: AutodiffBackend> TrainerBuilder<B, NoOptimizer> {
    pub fn new(model: Regressor<B>) -> Self {
        Self {
            model,
            optimizer:     NoOptimizer,
            loss:          RegressionLoss::default(),
            batch_size:    BATCH_SIZE,
            learning_rate: LEARNING_RATE,
        }
    }

    /// Bind an optimizer built over this model's parameters.
    pub fn with_optimizer<O>(self, optimizer: O) -> TrainerBuilder<B, O>
    where
        O: Optimizer<Regressor<B>, B>,
    {
        TrainerBuilder {
            model:         self.model,
            optimizer,
            loss:          self.loss,
            batch_size:    self.batch_size,
            learning_rate: self.learning_rate,
        }
    }
}

impl<B: AutodiffBackend, O> TrainerBuilder<B, O> {
    pub fn with_loss(mut self, loss: RegressionLoss) -> Self {
        self.loss = loss;
        self
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }
}

impl<B: AutodiffBackend, O: Optimizer<Regressor<B>, B>> TrainerBuilder<B, O> {
    pub fn build(self) -> Result<Trainer<B, O>, RegressorError> {
        if self.batch_size == 0 {
            return Err(RegressorError::NotConfigured("batch size must be positive".into()));
        }
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(RegressorError::NotConfigured(format!(
                "learning rate must be positive and finite, got {}",
                self.learning_rate
            )));
        }
        Ok(Trainer {
            model:         self.model,
            optimizer:     self.optimizer,
            loss:          self.loss,
            batch_size:    self.batch_size,
            learning_rate: self.learning_rate,
        })
    }
}

// ─── Trainer ──────────────────────────────────────────────────────────────────
/// Bundles the model with its optimizer and loss function.
pub struct Trainer<B: AutodiffBackend, O> {
    model:         Regressor<B>,
    optimizer:     O,
    loss:          RegressionLoss,
    batch_size:    usize,
    learning_rate: f64,
}

impl<B: AutodiffBackend, O: Optimizer<Regressor<B>, B>> Trainer<B, O> {
    pub fn model(&self) -> &Regressor<B> {
        &self.model
    }

    /// Evaluation-mode copy of the current parameters.
    pub fn eval_model(&self) -> Regressor<B::InnerBackend> {
        self.model.valid()
    }

    /// Train on `trains` ([N, word_size]) against `labels` ([N]).
    ///
    /// Consumes floor(N / batch_size) batches in order and drops the
    /// rest. Fails with EmptyDataset when N < batch_size.
    pub fn batch_train(
        &mut self,
        trains: Tensor<B, 2>,
        labels: Tensor<B, 1>,
    ) -> Result<TrainOutcome, RegressorError> {
        let [examples, width] = trains.dims();
        let word_size = self.model.word_size();
        let batches = examples / self.batch_size;
        if batches == 0 {
            return Err(RegressorError::EmptyDataset { examples, required: self.batch_size });
        }
        if width != word_size {
            return Err(RegressorError::shape(
                format!("[{examples}, {word_size}]"),
                format!("[{examples}, {width}]"),
            ));
        }
        if labels.dims()[0] != examples {
            return Err(RegressorError::shape(
                format!("{examples} labels"),
                format!("{} labels", labels.dims()[0]),
            ));
        }


        let trains = trains.reshape([examples, 1, word_size]);
        let mut batch_losses = Vec::with_capacity(batches);

        for i in 0..batches {
            let range = i * self.batch_size..(i + 1) * self.batch_size;
            let batch_train = trains.clone().slice([range.clone()]);
            let batch_label = labels
                .clone()
                .slice([range])
                .reshape([self.batch_size, 1]);

            let predict = self.model.forward(batch_train);
            let loss    = self.loss.forward(predict, batch_label);
            let loss_val: f64 = loss.clone().into_scalar().elem::<f64>();

            // Backward pass + optimizer update
            let grads = loss.backward();
            let grads = GradientsParams::from_grads(grads, &self.model);
            self.model = self.optimizer.step(self.learning_rate, self.model.clone(), grads);

            tracing::debug!("batch {:>4}/{} loss={:.6}", i + 1, batches, loss_val);
            batch_losses.push(loss_val);
        }

        let mean_loss = batch_losses.iter().sum::<f64>() / batches as f64;

        // Whole training split, one pass, frozen statistics
        let model_valid = self.model.valid();
        let predictions = model_valid
            .forward(trains.inner())
            .reshape([examples]);
        let accuracy = ranking_accuracy(predictions, labels.inner());

        tracing::info!(
            "Trained {} batches of {} | mean_loss={:.6} | accuracy={:.6}",
            batches, self.batch_size, mean_loss, accuracy
        );

        Ok(TrainOutcome {
            mean_loss,
            accuracy,
            batch_losses,
            remainder: examples - batches * self.batch_size,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ml::model::RegressorConfig;
    use burn::{
        backend::{Autodiff, NdArray},
        tensor::Distribution,
    };

    type TB = Autodiff<NdArray>;

    fn data(n: usize, w: usize) -> (Tensor<TB, 2>, Tensor<TB, 1>) {
        let device = Default::default();
        let x = Tensor::<TB, 2>::random([n, w], Distribution::Uniform(0.0, 1.0), &device);
        let y = Tensor::<TB, 1>::random([n], Distribution::Uniform(0.0, 2.0), &device);
        (x, y)
    }

    fn trainer(batch_size: usize) -> Trainer<TB, impl Optimizer<Regressor<TB>, TB>> {
        let device = Default::default();
        let model: Regressor<TB> = RegressorConfig::new(30).init(&device).unwrap();
        TrainerBuilder::new(model)
            .with_batch_size(batch_size)
            .with_optimizer(default_adam().init())
            .build()
            .unwrap()
    }

    #[test]
    fn test_one_batch_end_to_end() {
        let mut t = trainer(50);
        let (x, y) = data(50, 30);
        let out = t.batch_train(x, y).unwrap();
        assert_eq!(out.batches(), 1);
        assert!(out.mean_loss.is_finite() && out.mean_loss >= 0.0);
        assert!(out.accuracy.is_finite());
    }

    #[test]
    fn test_remainder_is_ignored_and_mean_is_unweighted() {
        let mut t = trainer(50);
        let (x, y) = data(120, 30);
        let out = t.batch_train(x, y).unwrap();
        assert_eq!(out.batches(), 2);
        assert_eq!(out.remainder, 20);
        let mean = out.batch_losses.iter().sum::<f64>() / 2.0;
        assert!((out.mean_loss - mean).abs() < 1e-12);
    }

    #[test]
    fn test_accuracy_scores_whole_split_in_eval_mode() {
        // 70 rows, batch 50: one batch trained, 20 left over but still scored
        let mut t = trainer(50);
        let (x, y) = data(70, 30);
        let out = t.batch_train(x.clone(), y.clone()).unwrap();
        assert_eq!(out.remainder, 20);

        let predictions = t
            .eval_model()
            .forward(x.inner().reshape([70, 1, 30]))
            .reshape([70]);
        let expected = ranking_accuracy(predictions, y.inner());
        assert_eq!(out.accuracy, expected);
    }

    #[test]
    fn test_fewer_examples_than_a_batch() {
        let mut t = trainer(50);
        let (x, y) = data(49, 30);
        let err = t.batch_train(x, y).unwrap_err();
        assert_eq!(err, RegressorError::EmptyDataset { examples: 49, required: 50 });
    }

    #[test]
    fn test_rejects_wrong_width() {
        let mut t = trainer(10);
        let (x, y) = data(20, 31);
        assert!(matches!(t.batch_train(x, y), Err(RegressorError::ShapeMismatch { .. })));
    }

    #[test]
    fn test_rejects_label_count_mismatch() {
        let mut t = trainer(10);
        let (x, _) = data(20, 30);
        let (_, y) = data(19, 30);
        assert!(matches!(t.batch_train(x, y), Err(RegressorError::ShapeMismatch { .. })));
    }

    #[test]
    fn test_parameters_change() {
        let mut t = trainer(10);
        let before = t.model().dense1.weight.val().into_data().to_vec::<f32>().unwrap();
        let (x, y) = data(20, 30);
        t.batch_train(x, y).unwrap();
        let after = t.model().dense1.weight.val().into_data().to_vec::<f32>().unwrap();
        assert_ne!(before, after);
    }

    #[test]
    fn test_build_rejects_bad_settings() {
        let device = Default::default();
        let model: Regressor<TB> = RegressorConfig::new(30).init(&device).unwrap();
        let zero_batch = TrainerBuilder::new(model.clone())
            .with_batch_size(0)
            .with_optimizer(default_adam().init())
            .build();
        assert!(matches!(zero_batch, Err(RegressorError::NotConfigured(_))));

        let bad_lr = TrainerBuilder::new(model)
            .with_learning_rate(f64::NAN)
            .with_optimizer(default_adam().init())
            .build();
        assert!(matches!(bad_lr, Err(RegressorError::NotConfigured(_))));
    }
}
