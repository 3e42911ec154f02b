// ============================================================
// Layer 4 — Word Batcher
// ============================================================
// Implements Burn's Batcher trait to stack WordSamples into
// tensors on the execution device.
//
//   Input:  Vec of N WordSamples, each window of length W
//   Output: WordBatch { windows: [N, W], targets: [N] }
//
// Windows are flattened row-major then reshaped:
//   [s1_c1, ..., s1_cW, s2_c1, ..., sN_cW] → [N, W]
//
// The trainer adds the channel axis ([N, 1, W]) itself, so a
// batch here is just features and labels.
//
// Reference: Burn Book §4 (Batcher)

use burn::{
    data::dataloader::batcher::Batcher,
    prelude::*,
    tensor::TensorData,
};

use crate::domain::sample::WordSample;
use crate::infra::device::ExecutionContext;

// ─── WordBatch ────────────────────────────────────────────────────────────────
#[derive(Debug, Clone)]
pub struct WordBatch<B: Backend> {
    /// Normalised character codes - shape: [batch_size, word_size]
    pub windows: Tensor<B, 2>,

    /// Frequency scores - shape: [batch_size]
    pub targets: Tensor<B, 1>,
}

// ─── WordBatcher ──────────────────────────────────────────────────────────────
#[derive(Clone, Debug)]
pub struct WordBatcher<B: Backend> {
    pub device: B::Device,
}

impl<B: Backend> WordBatcher<B> {
    pub fn new(ctx: &ExecutionContext<B>) -> Self {
        Self { device: ctx.device().clone() }
    }

    /// Stack a borrowed slice without handing ownership to the trait.
    pub fn batch_slice(&self, items: &[WordSample]) -> WordBatch<B> {
        let batch_size = items.len();
        let word_size  = items.first().map(|s| s.window.len()).unwrap_or(0);

        let windows_flat: Vec<f32> = items
            .iter()
            .flat_map(|s| s.window.iter().copied())
            .collect();
        let targets: Vec<f32> = items.iter().map(|s| s.target).collect();

        let windows = Tensor::<B, 2>::from_data(
            TensorData::new(windows_flat, [batch_size, word_size]),
            &self.device,
        );
        let targets = Tensor::<B, 1>::from_data(
            TensorData::new(targets, [batch_size]),
            &self.device,
        );

        WordBatch { windows, targets }
    }
}

impl<B: Backend> Batcher<WordSample, WordBatch<B>> for WordBatcher<B> {
    fn batch(&self, items: Vec<WordSample>) -> WordBatch<B> {
        self.batch_slice(&items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;

    #[test]
    fn test_stacks_rows_in_order() {
        let ctx = ExecutionContext::<NdArray>::cpu();
        let batcher = WordBatcher::new(&ctx);
        let batch = batcher.batch(vec![
            WordSample::new(vec![0.1, 0.2, 0.3], 1.0),
            WordSample::new(vec![0.4, 0.5, 0.6], 2.0),
        ]);

        assert_eq!(batch.windows.dims(), [2, 3]);
        assert_eq!(batch.targets.dims(), [2]);

        let windows = batch.windows.into_data().to_vec::<f32>().unwrap();
        assert_eq!(windows, vec![0.1, 0.2, 0.3, 0.4, 0.5, 0.6]);
        let targets = batch.targets.into_data().to_vec::<f32>().unwrap();
        assert_eq!(targets, vec![1.0, 2.0]);
    }
}
