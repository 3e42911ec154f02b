// ============================================================
// Layer 4 — Synthetic Sample Source
// ============================================================
// Generates random CJK words with a frequency score so the full
// pipeline can run without the precomputed feature array.
//
// Shorter words get higher scores, which gives the regressor a
// signal it can actually pick up from the zero padding.
//
// Seeded with StdRng so two runs with the same seed see the
// same data.

use anyhow::Result;
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::config::{CJK_FIRST, CJK_LAST};
use crate::data::encoder::encode_sample;
use crate::domain::sample::WordSample;
use crate::domain::traits::SampleSource;

const MAX_WORD_CHARS: usize = 4;

pub struct SyntheticSource {
    count:     usize,
    word_size: usize,
    seed:      u64,
}

impl SyntheticSource {
    pub fn new(count: usize, word_size: usize, seed: u64) -> Self {
        Self { count, word_size, seed }
    }
}

impl SampleSource for SyntheticSource {
    fn load_all(&self) -> Result<Vec<WordSample>> {
        let mut rng     = StdRng::seed_from_u64(self.seed);
        let max_chars   = MAX_WORD_CHARS.min(self.word_size).max(1);
        let mut samples = Vec::with_capacity(self.count);

        for _ in 0..self.count {
            let len: usize = rng.gen_range(1..=max_chars);
            let word: String = (0..len)
                .filter_map(|_| char::from_u32(rng.gen_range(CJK_FIRST..=CJK_LAST)))
                .collect();
            let frequency = 1.0 / len as f32 + rng.gen_range(0.0..0.05);
            samples.push(encode_sample(&word, frequency, self.word_size)?);
        }

        tracing::info!(
            "Generated {} synthetic samples (word_size={}, seed={})",
            samples.len(),
            self.word_size,
            self.seed
        );
        Ok(samples)
    }

    fn describe(&self) -> String {
        format!("synthetic:{}x{}", self.count, self.word_size)
    }
}
