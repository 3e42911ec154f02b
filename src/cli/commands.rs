// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Two subcommands:
//   run      - load, train one pass, evaluate, report
//   geometry - print the stage table for a window length
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::application::run_use_case::RunConfig;
use crate::config::{
    BATCH_SIZE, DEFAULT_DATA_PATH, LEARNING_RATE, SYNTHETIC_SEED, SYNTHETIC_WORD_SIZE,
    TOTAL_WORDS, TRAIN_FRACTION,
};
use crate::infra::device::BackendChoice;
use crate::ml::loss::RegressionLoss;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Train the regressor on the feature array and report
    Run(RunArgs),

    /// Show the convolution/pool widths derived from a window length
    Geometry(GeometryArgs),
}

/// All arguments for the `run` command.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// .npy array: word_size feature columns + one label column
    #[arg(long, default_value = DEFAULT_DATA_PATH)]
    pub data: PathBuf,

    /// Generate random CJK words instead of reading --data
    #[arg(long)]
    pub synthetic: bool,

    /// Window length of generated words (with --synthetic)
    #[arg(long, default_value_t = SYNTHETIC_WORD_SIZE)]
    pub word_size: usize,

    /// Seed for the synthetic generator
    #[arg(long, default_value_t = SYNTHETIC_SEED)]
    pub seed: u64,

    /// Number of rows to read
    #[arg(long, default_value_t = TOTAL_WORDS)]
    pub total_words: usize,

    /// Fraction of rows used for training (rounded down to whole batches)
    #[arg(long, default_value_t = TRAIN_FRACTION)]
    pub train_fraction: f64,

    /// Number of windows per gradient step; the remainder is dropped
    #[arg(long, default_value_t = BATCH_SIZE)]
    pub batch_size: usize,

    /// Adam learning rate
    #[arg(long, default_value_t = LEARNING_RATE)]
    pub lr: f64,

    /// Per-batch training loss
    #[arg(long, value_enum, default_value_t = RegressionLoss::L1)]
    pub loss: RegressionLoss,

    /// Compute backend: wgpu (accelerator) or ndarray (CPU)
    #[arg(long, value_enum, default_value_t = BackendChoice::Wgpu)]
    pub backend: BackendChoice,

    /// Write batch_metrics.csv and report.json here
    #[arg(long)]
    pub metrics_dir: Option<PathBuf>,
}

impl From<&RunArgs> for RunConfig {
    fn from(a: &RunArgs) -> Self {
        RunConfig {
            data_path:      a.data.clone(),
            synthetic:      a.synthetic,
            synthetic_word_size: a.word_size,
            seed:           a.seed,
            total_words:    a.total_words,
            train_fraction: a.train_fraction,
            batch_size:     a.batch_size,
            lr:             a.lr,
            loss:           a.loss,
            metrics_dir:    a.metrics_dir.clone(),
        }
    }
}

/// Arguments for the `geometry` command
#[derive(Args, Debug)]
pub struct GeometryArgs {
    /// Input window length
    #[arg(long)]
    pub word_size: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use clap::Parser;

    #[test]
    fn test_run_defaults_match_constants() {
        let cli = Cli::parse_from(["word-freq-regressor", "run"]);
        let Commands::Run(args) = cli.command else { panic!("expected run") };
        let cfg = RunConfig::from(&args);
        assert_eq!(cfg.total_words, 30000);
        assert_eq!(cfg.batch_size, 50);
        assert_eq!(cfg.train_fraction, 0.7);
        assert_eq!(cfg.loss, RegressionLoss::L1);
        assert_eq!(args.backend, BackendChoice::Wgpu);
    }

    #[test]
    fn test_run_flags() {
        let cli = Cli::parse_from([
            "word-freq-regressor", "run",
            "--synthetic", "--total-words", "100",
            "--loss", "mse", "--backend", "ndarray",
        ]);
        let Commands::Run(args) = cli.command else { panic!("expected run") };
        assert!(args.synthetic);
        assert_eq!(args.total_words, 100);
        assert_eq!(args.loss, RegressionLoss::Mse);
        assert_eq!(args.backend, BackendChoice::Ndarray);
    }
}
