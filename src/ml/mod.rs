// ============================================================
// Layer 5 — ML / Model Layer (Burn)
// ============================================================
// All model, loss and training code lives here.
//
//   geometry.rs  - kernel/pool widths derived from the window
//                  length, as an ordered stage table
//
//   model.rs     - the 1-D convolutional regressor:
//                  • 3 × (conv → pool → batch-norm → ReLU)
//                  • dense 32→64 → ReLU → dense 64→1
//                  • sigmoid, then a 1→1 affine rescale
//
//   loss.rs      - L1 / MSE batch losses, margin ranking loss
//
//   trainer.rs   - the ordered mini-batch training pass and
//                  the post-training ranking-accuracy score
//
//   evaluator.rs - evaluation-mode pass over the test split
//
// Reference: Burn Book §3 (Building Blocks)
//            Burn Book §5 (Training)

/// Stage widths derived from the window length
pub mod geometry;

/// Convolutional regressor architecture
pub mod model;

/// Regression and ranking losses
pub mod loss;

/// Mini-batch training loop
pub mod trainer;

/// Held-out evaluation pass
pub mod evaluator;
