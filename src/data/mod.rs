// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// From the feature array on disk to tensors on the device:
//
//   frequencies.npy / synthetic words
//       │
//       ▼
//   NpyLoader | SyntheticSource → Vec<WordSample> (raw codes)
//       │
//       ▼
//   Normalizer        → divide features by 0x9fa6, once
//       │
//       ▼
//   WordDataset       → checks every window has the same width
//       │
//       ▼
//   split_train_test  → ordered prefix/suffix, whole batches
//       │
//       ▼
//   WordBatcher       → [N, W] windows + [N] targets
//
// Reference: Burn Book §4 (Datasets and Dataloaders)

/// Reads rows of a .npy feature array
pub mod loader;

/// Divides character codes by the feature scale
pub mod preprocessor;

/// Encodes CJK words as character-code windows
pub mod encoder;

/// Seeded random word generator
pub mod synthetic;

/// Implements Burn's Dataset trait for word samples
pub mod dataset;

/// Implements Burn's Batcher trait to create tensors
pub mod batcher;

/// Deterministic train/test split with batch truncation
pub mod splitter;
