//! Flesch readability, sentence-length statistics and variation

use super::tokenize::SentenceDetail;
use serde::{Deserialize, Serialize};

/// Flesch reading ease and Flesch-Kincaid grade
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Readability {
    /// Reading ease, clamped to 0..=100
    pub flesch_score: f64,
    /// Grade level, clamped to >= 0
    pub grade: f64,
    pub avg_sentence_length: f64,
    pub avg_syllables_per_word: f64,
}

pub fn readability(sentences: &[SentenceDetail]) -> Readability {
    let total_words: usize = sentences.iter().map(|s| s.word_count).sum();
    if sentences.is_empty() || total_words == 0 {
        return Readability::default();
    }

    let total_syllables: usize = sentences.iter().map(|s| s.syllable_count).sum();
    let asl = total_words as f64 / sentences.len() as f64;
    let asw = total_syllables as f64 / total_words as f64;

    Readability {
        flesch_score: (206.835 - 1.015 * asl - 84.6 * asw).clamp(0.0, 100.0),
        grade: (0.39 * asl + 11.8 * asw - 15.59).max(0.0),
        avg_sentence_length: asl,
        avg_syllables_per_word: asw,
    }
}

/// Sentence-length summary in words
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SentenceStats {
    pub mean: f64,
    pub min: usize,
    pub max: usize,
    /// Population standard deviation
    pub std_dev: f64,
    pub total: usize,
}

pub fn sentence_stats(sentences: &[SentenceDetail]) -> SentenceStats {
    if sentences.is_empty() {
        return SentenceStats::default();
    }
    let (mean, std_dev) = mean_and_std(sentences);
    SentenceStats {
        mean,
        min: sentences.iter().map(|s| s.word_count).min().unwrap_or(0),
        max: sentences.iter().map(|s| s.word_count).max().unwrap_or(0),
        std_dev,
        total: sentences.len(),
    }
}

/// Coefficient of variation of sentence length, in percent.
/// Zero for fewer than two sentences.
pub fn sentence_variation(sentences: &[SentenceDetail]) -> f64 {
    if sentences.len() < 2 {
        return 0.0;
    }
    let (mean, std_dev) = mean_and_std(sentences);
    if mean > 0.0 {
        std_dev / mean * 100.0
    } else {
        0.0
    }
}

fn mean_and_std(sentences: &[SentenceDetail]) -> (f64, f64) {
    let n = sentences.len() as f64;
    let mean = sentences.iter().map(|s| s.word_count as f64).sum::<f64>() / n;
    let variance = sentences
        .iter()
        .map(|s| (s.word_count as f64 - mean).powi(2))
        .sum::<f64>()
        / n;
    (mean, variance.sqrt())
}
