// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The application layer asks a SampleSource for examples and
// never learns whether they came from a .npy file or from the
// synthetic generator.

use anyhow::Result;
use crate::domain::sample::WordSample;

// ─── SampleSource ─────────────────────────────────────────────────────────────
/// Any component that can produce word samples.
///
/// Implementations:
///   - NpyLoader       → rows of an on-disk numeric array
///   - SyntheticSource → random CJK words with a frequency score
pub trait SampleSource {
    /// Load up to the source's configured number of samples.
    fn load_all(&self) -> Result<Vec<WordSample>>;

    /// Short human-readable description for log lines.
    fn describe(&self) -> String;
}
