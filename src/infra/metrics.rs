// ============================================================
// Layer 6 — Metrics and Run Report
// ============================================================
// Two optional artefacts written into --metrics-dir:
//
//   batch_metrics.csv - one row per training batch
//     batch,loss
//     1,0.734512
//     2,0.701233
//     ...
//
//   report.json - the RunReport for the whole run
//
// Nothing here touches model weights; trained parameters are
// not persisted.
//
// Reference: Rust Book §12 (I/O and File Handling)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::PathBuf,
};

/// Loss for one training batch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BatchMetrics {
    /// Batch number (starts at 1)
    pub batch: usize,
    pub loss:  f64,
}

/// Everything a run hands back to its caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub source:         String,
    pub word_size:      usize,
    pub train_examples: usize,
    pub test_examples:  usize,
    pub batches:        usize,
    pub train_loss:     f64,
    pub train_accuracy: f64,
    /// Absent until a held-out metric is defined.
    pub test_result:    Option<f64>,
    pub label_drift:    Option<f64>,
}

impl RunReport {
    pub fn render(&self) -> String {
        let test = match self.test_result {
            Some(v) => format!("{v}"),
            None    => "n/a (evaluation incomplete)".to_string(),
        };
        format!(
            "\nTrain Loss: {},\nTrain Accuracy: {},\n\nTest Accuracy: {}\n",
            self.train_loss, self.train_accuracy, test
        )
    }
}

/// Writes batch_metrics.csv and report.json.
pub struct MetricsLogger {
    dir:      PathBuf,
    csv_path: PathBuf,
}

impl MetricsLogger {
    /// Creates the directory and a fresh CSV with its header row.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .with_context(|| format!("cannot create metrics dir '{}'", dir.display()))?;

        let csv_path = dir.join("batch_metrics.csv");
        let mut f = fs::File::create(&csv_path)
            .with_context(|| format!("cannot create '{}'", csv_path.display()))?;
        writeln!(f, "batch,loss")?;
        tracing::debug!("Created metrics CSV: '{}'", csv_path.display());

        Ok(Self { dir, csv_path })
    }

    /// Append every batch loss to the CSV.
    pub fn log_batches(&self, losses: &[f64]) -> Result<()> {
        let mut f = OpenOptions::new().append(true).open(&self.csv_path)?;
        for m in losses
            .iter()
            .enumerate()
            .map(|(i, &loss)| BatchMetrics { batch: i + 1, loss })
        {
            writeln!(f, "{},{:.6}", m.batch, m.loss)?;
        }
        tracing::debug!("Logged {} batch losses", losses.len());
        Ok(())
    }

    pub fn write_report(&self, report: &RunReport) -> Result<PathBuf> {
        let path = self.dir.join("report.json");
        let json = serde_json::to_string_pretty(report)?;
        fs::write(&path, json)
            .with_context(|| format!("cannot write '{}'", path.display()))?;
        tracing::info!("Run report written to '{}'", path.display());
        Ok(path)
    }

    pub fn csv_path(&self) -> &PathBuf {
        &self.csv_path
    }
}
