//! Vocabulary diversity: TTR, MSTTR and sophistication

use crate::lexicon::Lexicon;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Type/token statistics for one document
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct VocabularyStats {
    pub total_words: usize,
    pub unique_words: usize,
    /// Plain type-token ratio, 0..=1
    pub ttr: f64,
    /// Mean-segmental TTR, 0..=1
    pub msttr: f64,
    /// Percent of words with 6+ letters outside the high-frequency list
    pub sophistication_ratio: f64,
}

pub fn vocabulary_stats(words: &[String], lexicon: &Lexicon, segment: usize) -> VocabularyStats {
    if words.is_empty() {
        return VocabularyStats::default();
    }

    let unique = words.iter().collect::<HashSet<_>>().len();
    let sophisticated = words
        .iter()
        .filter(|w| w.chars().count() >= 6 && !lexicon.is_high_frequency(w))
        .count();

    VocabularyStats {
        total_words: words.len(),
        unique_words: unique,
        ttr: unique as f64 / words.len() as f64,
        msttr: msttr(words, segment),
        sophistication_ratio: sophisticated as f64 / words.len() as f64 * 100.0,
    }
}

/// Mean-segmental type-token ratio over non-overlapping windows.
///
/// Trailing words that do not fill a window are ignored. Texts shorter
/// than one window (or a zero window) fall back to the plain TTR.
pub fn msttr(words: &[String], segment: usize) -> f64 {
    if words.is_empty() {
        return 0.0;
    }
    if segment == 0 || words.len() < segment {
        let unique = words.iter().collect::<HashSet<_>>().len();
        return unique as f64 / words.len() as f64;
    }

    let ratios: Vec<f64> = words
        .chunks_exact(segment)
        .map(|chunk| chunk.iter().collect::<HashSet<_>>().len() as f64 / segment as f64)
        .collect();
    ratios.iter().sum::<f64>() / ratios.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::tokenize::words;

    #[test]
    fn test_short_text_falls_back_to_ttr() {
        let w = words("The cat sat. The cat sat. The cat sat.");
        // 3 unique of 9
        let value = msttr(&w, 50);
        assert!((value - 3.0 / 9.0).abs() < 1e-9);
        let stats = vocabulary_stats(&w, &Lexicon::standard(), 50);
        assert_eq!(stats.msttr, stats.ttr);
    }

    #[test]
    fn test_msttr_averages_full_windows() {
        // window 1: 4 distinct of 4, window 2: 1 distinct of 4, trailing word ignored
        let w: Vec<String> = "a b c d e e e e z"
            .split(' ')
            .map(String::from)
            .collect();
        assert!((msttr(&w, 4) - (1.0 + 0.25) / 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_msttr_is_bounded() {
        let text = "alpha beta gamma ".repeat(60);
        let w = words(&text);
        let value = msttr(&w, 50);
        assert!((0.0..=1.0).contains(&value));
        assert_eq!(msttr(&[], 50), 0.0);
    }

    #[test]
    fn test_sophistication_ratio() {
        let w = words("Thoughtful people rarely consider because elaborate");
        // thoughtful, rarely, consider, elaborate; "people" and "because" are high-frequency
        let stats = vocabulary_stats(&w, &Lexicon::standard(), 50);
        assert!((stats.sophistication_ratio - 4.0 / 6.0 * 100.0).abs() < 1e-9);
    }
}
