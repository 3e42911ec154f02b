use serde::{Deserialize, Serialize};

/// One example: a fixed-length character-code window and its
/// frequency score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordSample {
    pub window:     Vec<f32>,
    pub target:     f32,
    /// Set once the window has been divided by the feature scale.
    pub normalized: bool,
}

impl WordSample {
    pub fn new(window: Vec<f32>, target: f32) -> Self {
        Self { window, target, normalized: false }
    }

    pub fn word_size(&self) -> usize {
        self.window.len()
    }
}

/// Length shared by every window in `samples`, or `None` when the
/// set is empty or ragged.
pub fn common_word_size(samples: &[WordSample]) -> Option<usize> {
    let first = samples.first()?.word_size();
    samples
        .iter()
        .all(|s| s.word_size() == first)
        .then_some(first)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_word_size() {
        let a = WordSample::new(vec![1.0, 2.0, 3.0], 0.5);
        let b = WordSample::new(vec![4.0, 5.0, 6.0], 0.1);
        assert_eq!(common_word_size(&[a.clone(), b]), Some(3));

        let ragged = WordSample::new(vec![1.0], 0.0);
        assert_eq!(common_word_size(&[a, ragged]), None);
        assert_eq!(common_word_size(&[]), None);
    }
}
