// ============================================================
// Layer 4 — Feature Array Loader
// ============================================================
// Reads the precomputed feature array from a .npy file.
//
// Row layout (word_size + 1 columns):
//   [c_0, c_1, ..., c_{W-1}, frequency]
//
// The character codes are RAW here; dividing by the feature
// scale is the Normalizer's job.
//
// The upstream array has been written with different dtypes
// over time, so the loader accepts f64, f32, i64 and i32 and
// widens everything to f64 before splitting columns.
//
// Reference: ndarray-npy crate documentation
//            Rust Book §9 (Error Handling)

use anyhow::{bail, Context, Result};
use ndarray::Array2;
use ndarray_npy::read_npy;
use std::path::{Path, PathBuf};

use crate::domain::sample::WordSample;
use crate::domain::traits::SampleSource;

/// Loads at most `limit` rows of a 2-D .npy feature array.
pub struct NpyLoader {
    path:  PathBuf,
    limit: usize,
}

impl NpyLoader {
    pub fn new(path: impl Into<PathBuf>, limit: usize) -> Self {
        Self { path: path.into(), limit }
    }
}

impl SampleSource for NpyLoader {
    fn load_all(&self) -> Result<Vec<WordSample>> {
        if !self.path.exists() {
            bail!("feature array '{}' does not exist", self.path.display());
        }

        let matrix = read_matrix(&self.path)?;
        let (rows, cols) = matrix.dim();
        if cols < 2 {
            bail!(
                "feature array '{}' has {} column(s); need at least one feature and a label",
                self.path.display(),
                cols
            );
        }

        let samples: Vec<WordSample> = matrix
            .outer_iter()
            .take(self.limit)
            .map(|row| {
                let window = row
                    .iter()
                    .take(cols - 1)
                    .map(|&v| v as f32)
                    .collect();
                WordSample::new(window, row[cols - 1] as f32)
            })
            .collect();

        tracing::info!(
            "Loaded {} of {} rows from '{}' (word_size={})",
            samples.len(),
            rows,
            self.path.display(),
            cols - 1
        );
        Ok(samples)
    }

    fn describe(&self) -> String {
        format!("npy:{}", self.path.display())
    }
}

/// Read a 2-D array of any supported dtype, widened to f64.
fn read_matrix(path: &Path) -> Result<Array2<f64>> {
    if let Ok(m) = read_npy::<_, Array2<f64>>(path) {
        return Ok(m);
    }
    if let Ok(m) = read_npy::<_, Array2<f32>>(path) {
        return Ok(m.mapv(f64::from));
    }
    if let Ok(m) = read_npy::<_, Array2<i64>>(path) {
        return Ok(m.mapv(|v| v as f64));
    }
    let m = read_npy::<_, Array2<i32>>(path)
        .with_context(|| format!("cannot read '{}' as a 2-D f64/f32/i64/i32 array", path.display()))?;
    Ok(m.mapv(f64::from))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use ndarray_npy::write_npy;

    #[test]
    fn test_splits_features_and_label() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("frequencies.npy");
        let data: Array2<f64> = array![
            [20013.0, 25991.0, 0.0, 7.5],
            [19968.0, 0.0,     0.0, 1.25],
            [20154.0, 20040.0, 0.0, 3.0],
        ];
        write_npy(&path, &data).unwrap();

        let samples = NpyLoader::new(&path, 2).load_all().unwrap();
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].window, vec![20013.0, 25991.0, 0.0]);
        assert_eq!(samples[0].target, 7.5);
        assert_eq!(samples[1].target, 1.25);
        assert!(!samples[0].normalized);
    }

    #[test]
    fn test_accepts_integer_arrays() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("ints.npy");
        let data: Array2<i64> = array![[19968, 19969, 4], [19970, 0, 9]];
        write_npy(&path, &data).unwrap();

        let samples = NpyLoader::new(&path, 100).load_all().unwrap();
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[1].window, vec![19970.0, 0.0]);
        assert_eq!(samples[1].target, 9.0);
    }

    #[test]
    fn test_rejects_single_column() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("labels_only.npy");
        let data: Array2<f64> = array![[1.0], [2.0]];
        write_npy(&path, &data).unwrap();

        assert!(NpyLoader::new(&path, 10).load_all().is_err());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = NpyLoader::new("does/not/exist.npy", 10).load_all().unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }
}
