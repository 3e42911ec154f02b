// ============================================================
// Layer 4 — Train/Test Splitter
// ============================================================
// Deterministic split by index, no shuffling:
//
//   raw_train   = floor(total * train_fraction)
//   train_count = floor(raw_train / batch_size) * batch_size
//   train       = samples[..train_count]
//   test        = samples[train_count..]
//
// Truncating the training prefix to whole batches means the
// trainer never sees a partial batch. The rows cut off by that
// truncation go to the TEST split, not to the bin.
//
//   total=30000, fraction=0.7, batch=50 → 21000 train / 9000 test
//   total=100,   fraction=0.7, batch=50 → 50 train / 50 test

use serde::Serialize;

/// Sizes produced by a split, for logging and reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SplitSummary {
    pub total:     usize,
    pub train:     usize,
    pub test:      usize,
    pub batches:   usize,
    /// Rows moved from the nominal train prefix to the test split.
    pub truncated: usize,
}

/// Number of training rows once the fraction is applied and the
/// result is rounded down to a whole number of batches.
pub fn train_count(total: usize, train_fraction: f64, batch_size: usize) -> usize {
    let raw = ((total as f64) * train_fraction).floor() as usize;
    let raw = raw.min(total);
    if batch_size == 0 {
        return 0;
    }
    (raw / batch_size) * batch_size
}

/// Split `samples` into an ordered (train, test) pair.
pub fn split_train_test<T>(
    mut samples:    Vec<T>,
    train_fraction: f64,
    batch_size:     usize,
) -> (Vec<T>, Vec<T>, SplitSummary) {
    let total    = samples.len();
    let raw      = (((total as f64) * train_fraction).floor() as usize).min(total);
    let split_at = train_count(total, train_fraction, batch_size);

    // split_off(n) leaves [0..n) in `samples` and returns [n..total)
    let test = samples.split_off(split_at);

    let summary = SplitSummary {
        total,
        train:     samples.len(),
        test:      test.len(),
        batches:   if batch_size == 0 { 0 } else { split_at / batch_size },
        truncated: raw - split_at,
    };

    tracing::debug!(
        "Dataset split: {} training ({} batches), {} test, {} truncated into test",
        summary.train,
        summary.batches,
        summary.test,
        summary.truncated,
    );

    (samples, test, summary)
}
