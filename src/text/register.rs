//! Formulaic register and connective usage

use crate::lexicon::{ConnectiveCategory, Lexicon};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A catalog phrase found in the text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhraseMatch {
    pub phrase: String,
    pub category: String,
    pub weight: u8,
    pub count: usize,
    pub weighted_score: f64,
    pub suggestion: String,
}

/// Occurrence counts per severity tier
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SeverityCounts {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegisterAnalysis {
    /// Sorted by weighted score, highest first
    pub phrases: Vec<PhraseMatch>,
    /// Sum of `count × weight`
    pub total_weight: f64,
    pub total_count: usize,
    pub severity: SeverityCounts,
}

/// Scan for catalog phrases. Overlapping entries ("delve" and
/// "delve into") are counted independently.
pub fn analyze_register(text: &str, lexicon: &Lexicon) -> RegisterAnalysis {
    let mut phrases: Vec<PhraseMatch> = lexicon
        .phrases()
        .iter()
        .filter_map(|p| {
            let count = p.count_in(text);
            (count > 0).then(|| PhraseMatch {
                phrase: p.entry.phrase.clone(),
                category: p.entry.category.clone(),
                weight: p.entry.weight,
                count,
                weighted_score: (count * p.entry.weight as usize) as f64,
                suggestion: p.entry.suggestion.clone(),
            })
        })
        .collect();

    let mut severity = SeverityCounts::default();
    for p in &phrases {
        match p.weight {
            3 => severity.high += p.count,
            2 => severity.medium += p.count,
            1 => severity.low += p.count,
            _ => {}
        }
    }

    let total_weight = phrases.iter().map(|p| p.weighted_score).sum();
    let total_count = phrases.iter().map(|p| p.count).sum();

    // Stable sort keeps catalog order among ties
    phrases.sort_by(|a, b| {
        b.weighted_score
            .partial_cmp(&a.weighted_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    RegisterAnalysis {
        phrases,
        total_weight,
        total_count,
        severity,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectiveCount {
    pub word: String,
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConnectiveAnalysis {
    pub by_category: BTreeMap<ConnectiveCategory, Vec<ConnectiveCount>>,
    pub total: usize,
}

impl ConnectiveAnalysis {
    pub fn category_total(&self, category: ConnectiveCategory) -> usize {
        self.by_category
            .get(&category)
            .map(|found| found.iter().map(|c| c.count).sum())
            .unwrap_or(0)
    }
}

pub fn analyze_connectives(text: &str, lexicon: &Lexicon) -> ConnectiveAnalysis {
    let mut by_category: BTreeMap<ConnectiveCategory, Vec<ConnectiveCount>> = ConnectiveCategory::all()
        .iter()
        .map(|c| (*c, Vec::new()))
        .collect();
    let mut total = 0;

    for connective in lexicon.connectives() {
        let count = connective.count_in(text);
        if count > 0 {
            total += count;
            by_category
                .entry(connective.category)
                .or_default()
                .push(ConnectiveCount {
                    word: connective.word.clone(),
                    count,
                });
        }
    }

    ConnectiveAnalysis { by_category, total }
}
