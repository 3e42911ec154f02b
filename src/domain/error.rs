// ============================================================
// Layer 3 — Error Taxonomy
// ============================================================
// Every failure the core can report. All of them are fatal for
// the current run: nothing in the crate retries or recovers.
//
// The application layer wraps these in anyhow::Error so they
// can carry file/stage context up to main().

use thiserror::Error;

/// Failures raised by geometry, model construction, training
/// and evaluation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RegressorError {
    /// A derived kernel or pool width came out as zero.
    #[error("invalid geometry for window length {window}: {stage} width would be {width}")]
    InvalidGeometry {
        window: usize,
        stage:  &'static str,
        width:  usize,
    },

    /// Trainer settings that cannot drive a training pass.
    #[error("trainer not configured: {0}")]
    NotConfigured(String),

    /// Not enough examples for a single full batch.
    #[error("dataset too small: {examples} examples, at least {required} required")]
    EmptyDataset { examples: usize, required: usize },

    /// The held-out metric has no agreed definition yet; the
    /// evaluator produces predictions only.
    #[error("evaluation incomplete: no test accuracy is defined for the held-out split")]
    IncompleteEvaluation,

    /// Input tensors whose shape disagrees with the model.
    #[error("shape mismatch: expected {expected}, found {found}")]
    ShapeMismatch { expected: String, found: String },
}

impl RegressorError {
    pub fn shape(expected: impl Into<String>, found: impl Into<String>) -> Self {
        RegressorError::ShapeMismatch {
            expected: expected.into(),
            found:    found.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_problem() {
        let e = RegressorError::EmptyDataset { examples: 10, required: 50 };
        assert_eq!(e.to_string(), "dataset too small: 10 examples, at least 50 required");

        let e = RegressorError::InvalidGeometry { window: 2, stage: "conv1 kernel", width: 0 };
        assert!(e.to_string().contains("conv1 kernel"));
    }

    #[test]
    fn test_shape_helper() {
        let e = RegressorError::shape("[50, 1, 30]", "[50, 1, 29]");
        assert!(matches!(e, RegressorError::ShapeMismatch { .. }));
    }
}
