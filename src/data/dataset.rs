use burn::data::dataset::Dataset;

use crate::domain::error::RegressorError;
use crate::domain::sample::{common_word_size, WordSample};

/// An ordered, fixed-width collection of word samples.
pub struct WordDataset {
    samples:   Vec<WordSample>,
    word_size: usize,
}

impl WordDataset {
    /// Fails with ShapeMismatch when the windows are ragged.
    pub fn new(samples: Vec<WordSample>) -> Result<Self, RegressorError> {
        if samples.is_empty() {
            return Err(RegressorError::EmptyDataset { examples: 0, required: 1 });
        }
        let word_size = common_word_size(&samples).ok_or_else(|| {
            RegressorError::shape(
                format!("every window of length {}", samples[0].word_size()),
                "windows of differing lengths",
            )
        })?;
        Ok(Self { samples, word_size })
    }

    pub fn word_size(&self) -> usize { self.word_size }

    pub fn into_samples(self) -> Vec<WordSample> { self.samples }
}

impl Dataset<WordSample> for WordDataset {
    fn get(&self, index: usize) -> Option<WordSample> {
        self.samples.get(index).cloned()
    }

    fn len(&self) -> usize {
        self.samples.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reports_word_size() {
        let ds = WordDataset::new(vec![
            WordSample::new(vec![0.1, 0.2], 1.0),
            WordSample::new(vec![0.3, 0.4], 2.0),
        ])
        .unwrap();
        assert_eq!(ds.word_size(), 2);
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.get(1).map(|s| s.target), Some(2.0));
        assert!(ds.get(2).is_none());
    }

    #[test]
    fn test_rejects_ragged_windows() {
        let err = WordDataset::new(vec![
            WordSample::new(vec![0.1, 0.2], 1.0),
            WordSample::new(vec![0.3], 2.0),
        ])
        .err()
        .unwrap();
        assert!(matches!(err, RegressorError::ShapeMismatch { .. }));
    }

    #[test]
    fn test_rejects_empty() {
        assert!(WordDataset::new(Vec::new()).is_err());
    }
}
