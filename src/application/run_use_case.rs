// ============================================================
// Layer 2 — RunUseCase
// ============================================================
// Runs the whole pipeline once, in order:
//
//   Step 1: Load samples              (Layer 4 - data)
//   Step 2: Normalise features        (Layer 4 - data)
//   Step 3: Validate window widths    (Layer 4 - data)
//   Step 4: Train / test split        (Layer 4 - data)
//   Step 5: Build regressor + trainer (Layer 5 - ml)
//   Step 6: Train one pass            (Layer 5 - ml)
//   Step 7: Evaluate held-out split   (Layer 5 - ml)
//   Step 8: Report / log metrics      (Layer 6 - infra)
//
// Exactly one pass over the training data; nothing is saved
// except the optional metrics files.

use anyhow::{Context, Result};
use burn::tensor::backend::AutodiffBackend;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::config::{
    BATCH_SIZE, DEFAULT_DATA_PATH, LEARNING_RATE, SYNTHETIC_SEED, SYNTHETIC_WORD_SIZE,
    TOTAL_WORDS, TRAIN_FRACTION,
};
use crate::data::{
    batcher::WordBatcher,
    dataset::WordDataset,
    loader::NpyLoader,
    preprocessor::Normalizer,
    splitter::split_train_test,
    synthetic::SyntheticSource,
};
use crate::domain::error::RegressorError;
use crate::domain::traits::SampleSource;
use crate::infra::{
    device::ExecutionContext,
    metrics::{MetricsLogger, RunReport},
};
use crate::ml::{
    evaluator::Evaluator,
    loss::RegressionLoss,
    model::RegressorConfig,
    trainer::{default_adam, TrainerBuilder},
};

// ─── Run Configuration ────────────────────────────────────────────────────────
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    pub data_path:      PathBuf,
    /// Use generated words instead of data_path.
    pub synthetic:      bool,
    pub synthetic_word_size: usize,
    pub seed:           u64,
    pub total_words:    usize,
    pub train_fraction: f64,
    pub batch_size:     usize,
    pub lr:             f64,
    pub loss:           RegressionLoss,
    pub metrics_dir:    Option<PathBuf>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            data_path:      PathBuf::from(DEFAULT_DATA_PATH),
            synthetic:      false,
            synthetic_word_size: SYNTHETIC_WORD_SIZE,
            seed:           SYNTHETIC_SEED,
            total_words:    TOTAL_WORDS,
            train_fraction: TRAIN_FRACTION,
            batch_size:     BATCH_SIZE,
            lr:             LEARNING_RATE,
            loss:           RegressionLoss::L1,
            metrics_dir:    None,
        }
    }
}

// ─── RunUseCase ───────────────────────────────────────────────────────────────
pub struct RunUseCase {
    config: RunConfig,
}

impl RunUseCase {
    pub fn new(config: RunConfig) -> Self {
        Self { config }
    }

    fn source(&self) -> Box<dyn SampleSource> {
        let cfg = &self.config;
        if cfg.synthetic {
            Box::new(SyntheticSource::new(cfg.total_words, cfg.synthetic_word_size, cfg.seed))
        } else {
            Box::new(NpyLoader::new(&cfg.data_path, cfg.total_words))
        }
    }

    /// Execute the full run on backend `B`.
    pub fn execute<B: AutodiffBackend>(&self, ctx: &ExecutionContext<B>) -> Result<RunReport> {
        let cfg = &self.config;

        // ── Step 1: Load ──────────────────────────────────────────────────────
        let source  = self.source();
        tracing::info!("Loading samples from {}", source.describe());
        let samples = source.load_all()?;

        // ── Step 2: Normalise (features only, exactly once) ───────────────────
        let samples = Normalizer::new().normalize_all(samples);

        // ── Step 3: Validate widths ───────────────────────────────────────────
        let dataset   = WordDataset::new(samples).context("invalid sample set")?;
        let word_size = dataset.word_size();

        // ── Step 4: Split ─────────────────────────────────────────────────────
        let (train, test, split) =
            split_train_test(dataset.into_samples(), cfg.train_fraction, cfg.batch_size);
        tracing::info!(
            "Split: {} train ({} batches of {}), {} test",
            split.train, split.batches, cfg.batch_size, split.test
        );

        if split.batches == 0 {
            return Err(RegressorError::EmptyDataset {
                examples: split.train + split.truncated,
                required: cfg.batch_size,
            }
            .into());
        }

        // ── Step 5: Build model and trainer ───────────────────────────────────
        let model = RegressorConfig::new(word_size)
            .init::<B>(ctx.device())
            .with_context(|| format!("cannot build regressor for word_size={word_size}"))?;
        tracing::info!("Regressor ready: word_size={}, loss={:?}", word_size, cfg.loss);

        let mut trainer = TrainerBuilder::new(model)
            .with_loss(cfg.loss)
            .with_batch_size(cfg.batch_size)
            .with_learning_rate(cfg.lr)
            .with_optimizer(default_adam().init())
            .build()?;

        // ── Step 6: Train ─────────────────────────────────────────────────────
        let train_batch = WordBatcher::<B>::new(ctx).batch_slice(&train);
        let outcome = trainer.batch_train(train_batch.windows, train_batch.targets)?;

        // ── Step 7: Evaluate ──────────────────────────────────────────────────
        let (test_result, label_drift) = if test.is_empty() {
            tracing::warn!("Skipping evaluation: no held-out examples");
            (None, None)
        } else {
            let evaluator  = Evaluator::new(trainer.eval_model());
            let test_batch = WordBatcher::<B::InnerBackend>::new(&ctx.inner()).batch_slice(&test);
            let evaluation = evaluator.test(test_batch.windows, test_batch.targets)?;
            tracing::info!(
                "Held-out pass: {} predictions, mean={:.6}, label_drift={:.6}",
                evaluation.examples,
                evaluation.mean_prediction(),
                evaluation.label_drift
            );
            match evaluation.accuracy() {
                Ok(acc) => (Some(acc), Some(evaluation.label_drift)),
                Err(e @ RegressorError::IncompleteEvaluation) => {
                    tracing::warn!("{e}");
                    (None, Some(evaluation.label_drift))
                }
                Err(e) => return Err(e.into()),
            }
        };

        // ── Step 8: Report ────────────────────────────────────────────────────
        let report = RunReport {
            source:         source.describe(),
            word_size,
            train_examples: split.train,
            test_examples:  split.test,
            batches:        outcome.batches(),
            train_loss:     outcome.mean_loss,
            train_accuracy: outcome.accuracy,
            test_result,
            label_drift,
        };

        if let Some(dir) = &cfg.metrics_dir {
            let logger = MetricsLogger::new(dir)?;
            logger.log_batches(&outcome.batch_losses)?;
            logger.write_report(&report)?;
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::{Autodiff, NdArray};

    type TB = Autodiff<NdArray>;

    fn synthetic(total_words: usize) -> RunConfig {
        RunConfig {
            synthetic: true,
            total_words,
            ..RunConfig::default()
        }
    }

    #[test]
    fn test_hundred_words_trains_one_batch() {
        let ctx = ExecutionContext::<TB>::cpu();
        let report = RunUseCase::new(synthetic(100)).execute(&ctx).unwrap();

        assert_eq!(report.word_size, 30);
        assert_eq!(report.train_examples, 50);
        assert_eq!(report.test_examples, 50);
        assert_eq!(report.batches, 1);
        assert!(report.train_loss.is_finite() && report.train_loss >= 0.0);
        assert!(report.train_accuracy.is_finite());
        assert_eq!(report.test_result, None);
        assert!(report.label_drift.is_some());
    }

    #[test]
    fn test_too_few_words_is_empty_dataset() {
        let ctx = ExecutionContext::<TB>::cpu();
        let err = RunUseCase::new(synthetic(60)).execute(&ctx).unwrap_err();
        let inner = err.downcast_ref::<RegressorError>();
        assert!(matches!(inner, Some(RegressorError::EmptyDataset { .. })));
    }

    #[test]
    fn test_writes_metrics_when_asked() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = RunConfig {
            metrics_dir: Some(dir.path().to_path_buf()),
            ..synthetic(100)
        };
        let ctx = ExecutionContext::<TB>::cpu();
        RunUseCase::new(cfg).execute(&ctx).unwrap();

        assert!(dir.path().join("report.json").exists());
        let csv = std::fs::read_to_string(dir.path().join("batch_metrics.csv")).unwrap();
        assert_eq!(csv.lines().count(), 2);
    }

    #[test]
    fn test_missing_array_file() {
        let cfg = RunConfig {
            data_path: PathBuf::from("no/such/frequencies.npy"),
            ..RunConfig::default()
        };
        let ctx = ExecutionContext::<TB>::cpu();
        assert!(RunUseCase::new(cfg).execute(&ctx).is_err());
    }
}
