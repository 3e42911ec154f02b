// ============================================================
// Layer 4 — Word Encoder
// ============================================================
// Turns a word into the raw feature window the regressor reads:
// one Unicode code point per character, right-padded with zeros.
//
//   "中文", word_size = 4  →  [20013, 25991, 0, 0]
//
// Only CJK unified ideographs (U+4E00..=U+9FA5) are accepted,
// the same filter the corpus annotation applies.

use anyhow::{bail, Result};

use crate::config::{CJK_FIRST, CJK_LAST};
use crate::domain::sample::WordSample;

pub fn is_cjk(c: char) -> bool {
    (CJK_FIRST..=CJK_LAST).contains(&(c as u32))
}

/// Encode `word` as a zero-padded window of raw code points.
pub fn encode_word(word: &str, word_size: usize) -> Result<Vec<f32>> {
    let len = word.chars().count();
    if len == 0 {
        bail!("cannot encode an empty word");
    }
    if len > word_size {
        bail!("word '{}' has {} characters, window holds {}", word, len, word_size);
    }
    if let Some(c) = word.chars().find(|&c| !is_cjk(c)) {
        bail!("word '{}' contains non-CJK character {:?}", word, c);
    }

    let mut window: Vec<f32> = word.chars().map(|c| c as u32 as f32).collect();
    window.resize(word_size, 0.0);
    Ok(window)
}

/// Encode a word together with its frequency score.
pub fn encode_sample(word: &str, frequency: f32, word_size: usize) -> Result<WordSample> {
    Ok(WordSample::new(encode_word(word, word_size)?, frequency))
}
