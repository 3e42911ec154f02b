// ============================================================
// Layer 4 — Feature Normaliser
// ============================================================
// Divides every character code by the feature scale (0x9fa6)
// so windows land in [0, 1). Labels are left untouched.
//
// Each sample records whether it has been scaled; running the
// normaliser a second time leaves it unchanged.

use crate::config::FEATURE_SCALE;
use crate::domain::sample::WordSample;

pub struct Normalizer {
    scale: f32,
}

impl Normalizer {
    pub fn new() -> Self {
        Self { scale: FEATURE_SCALE }
    }

    /// Scale one sample in place. No-op on an already scaled sample.
    pub fn normalize(&self, sample: &mut WordSample) {
        if sample.normalized {
            return;
        }
        for v in sample.window.iter_mut() {
            *v /= self.scale;
        }
        sample.normalized = true;
    }

    /// Scale every sample, returning the same Vec.
    pub fn normalize_all(&self, mut samples: Vec<WordSample>) -> Vec<WordSample> {
        samples.iter_mut().for_each(|s| self.normalize(s));
        tracing::debug!("Normalised {} samples (scale={})", samples.len(), self.scale);
        samples
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_divides_by_scale() {
        let n = Normalizer::new();
        let mut s = WordSample::new(vec![40870.0, 20435.0, 0.0], 3.0);
        n.normalize(&mut s);
        assert_eq!(s.window, vec![1.0, 0.5, 0.0]);
        // labels are not features
        assert_eq!(s.target, 3.0);
    }

    #[test]
    fn test_second_pass_is_noop() {
        let n = Normalizer::new();
        let once  = n.normalize_all(vec![WordSample::new(vec![20013.0, 19968.0], 1.0)]);
        let twice = n.normalize_all(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_preserves_ordering() {
        let n = Normalizer::new();
        let raw = vec![19968.0f32, 20013.0, 25991.0, 40869.0];
        let mut s = WordSample::new(raw.clone(), 0.0);
        n.normalize(&mut s);
        for i in 0..raw.len() - 1 {
            assert!(raw[i] < raw[i + 1]);
            assert!(s.window[i] < s.window[i + 1]);
        }
        assert!(s.window.iter().all(|&v| (0.0..1.0).contains(&v)));
    }
}
