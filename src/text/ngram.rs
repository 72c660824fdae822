//! Template n-gram predictability
//!
//! Counts catalog bigrams and trigrams and compares their rate against
//! what unassisted human writing typically shows. Only the excess over
//! that baseline contributes to the score.

use crate::config::NgramConfig;
use crate::lexicon::Lexicon;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Trigram excess counts 2.5x a bigram excess
const BIGRAM_FACTOR: f64 = 2.0;
const TRIGRAM_FACTOR: f64 = 5.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NgramCount {
    pub phrase: String,
    pub count: usize,
}

/// Catalog hits for one n-gram order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NgramOrderStats {
    /// Sorted by count, highest first
    pub found: Vec<NgramCount>,
    pub count: usize,
    /// Hits per 100 words
    pub rate: f64,
    /// Rate above the human baseline, >= 0
    pub excess: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NgramAnalysis {
    pub bigrams: NgramOrderStats,
    pub trigrams: NgramOrderStats,
    /// 0..=100
    pub predictability: f64,
}

/// Count each n-gram of the given order
fn frequency_map(words: &[String], order: usize) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for window in words.windows(order) {
        *counts.entry(window.join(" ")).or_insert(0) += 1;
    }
    counts
}

fn order_stats(
    counts: &HashMap<String, usize>,
    catalog: &[String],
    total_words: usize,
    human_rate: f64,
) -> NgramOrderStats {
    let mut found: Vec<NgramCount> = catalog
        .iter()
        .filter_map(|phrase| {
            counts
                .get(phrase)
                .filter(|&&c| c > 0)
                .map(|&count| NgramCount {
                    phrase: phrase.clone(),
                    count,
                })
        })
        .collect();
    found.sort_by(|a, b| b.count.cmp(&a.count));

    let count: usize = found.iter().map(|f| f.count).sum();
    let rate = count as f64 / total_words as f64 * 100.0;
    NgramOrderStats {
        found,
        count,
        rate,
        excess: (rate - human_rate).max(0.0),
    }
}

pub fn analyze_ngrams(words: &[String], lexicon: &Lexicon, config: &NgramConfig) -> NgramAnalysis {
    if words.len() < config.min_words || words.is_empty() {
        return NgramAnalysis::default();
    }

    let bigrams = order_stats(
        &frequency_map(words, 2),
        lexicon.bigrams(),
        words.len(),
        config.bigram_rate,
    );
    let trigrams = order_stats(
        &frequency_map(words, 3),
        lexicon.trigrams(),
        words.len(),
        config.trigram_rate,
    );
    let predictability =
        (bigrams.excess * BIGRAM_FACTOR + trigrams.excess * TRIGRAM_FACTOR).min(100.0);

    NgramAnalysis {
        bigrams,
        trigrams,
        predictability,
    }
}
