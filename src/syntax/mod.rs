//! Syntactic profiling
//!
//! Measures how sentences open, how many clauses they carry, how complex
//! they are and how varied their openings are, then compares a document
//! against the spread of those values across the baseline.

pub mod patterns;

pub use patterns::{OpeningCategory, PunctuationMark};

use crate::profile::stats::{z_score, MetricStatistics};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::OnceLock;

static TOKEN_RE: OnceLock<Regex> = OnceLock::new();

/// Opening categories that can appear in a balanced text
const VARIETY_CATEGORIES: f64 = 8.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PunctuationDensity {
    pub count: usize,
    pub per_thousand_words: f64,
    pub weight: f64,
}

/// Sentence structure of one document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SentenceStructure {
    pub sentence_count: usize,
    /// Percent of sentences per opening category; every category present
    pub opening_patterns: BTreeMap<OpeningCategory, f64>,
    pub avg_clauses_per_sentence: f64,
    /// Mean per-sentence complexity, 0..=10
    pub complexity_score: f64,
    /// Normalised opening entropy, 0..=100
    pub structural_variety: f64,
    pub punctuation_density: BTreeMap<PunctuationMark, PunctuationDensity>,
}

pub fn analyze_sentence_structure(text: &str) -> SentenceStructure {
    let sentences: Vec<&str> = crate::text::tokenize::sentence_spans(text)
        .into_iter()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();
    if sentences.is_empty() {
        return SentenceStructure::default();
    }

    let mut opening_counts: BTreeMap<OpeningCategory, usize> =
        OpeningCategory::all().iter().map(|c| (*c, 0)).collect();
    let mut total_clauses = 0usize;
    let mut complexity_sum = 0.0;

    for sentence in &sentences {
        *opening_counts
            .entry(patterns::classify_opening(sentence))
            .or_insert(0) += 1;
        let (clauses, has_subordinating) = patterns::count_clauses(sentence);
        total_clauses += clauses;
        complexity_sum += patterns::sentence_complexity(sentence, clauses, has_subordinating);
    }

    let n = sentences.len() as f64;
    let opening_patterns: BTreeMap<OpeningCategory, f64> = opening_counts
        .into_iter()
        .map(|(category, count)| (category, count as f64 / n * 100.0))
        .collect();

    SentenceStructure {
        sentence_count: sentences.len(),
        structural_variety: structural_variety(opening_patterns.values().copied()),
        opening_patterns,
        avg_clauses_per_sentence: total_clauses as f64 / n,
        complexity_score: complexity_sum / n,
        punctuation_density: punctuation_density(text),
    }
}

/// Entropy of the non-zero opening shares over `log2(8)`, capped at 100
fn structural_variety(percentages: impl Iterator<Item = f64>) -> f64 {
    let entropy: f64 = percentages
        .filter(|p| *p > 0.0)
        .map(|p| {
            let prob = p / 100.0;
            -prob * prob.log2()
        })
        .sum();
    (entropy / VARIETY_CATEGORIES.log2() * 100.0).min(100.0)
}

fn punctuation_density(text: &str) -> BTreeMap<PunctuationMark, PunctuationDensity> {
    let token_re = TOKEN_RE.get_or_init(|| Regex::new(r"\b\w+\b").expect("valid regex"));
    let word_count = token_re.find_iter(text).count();

    PunctuationMark::all()
        .iter()
        .map(|mark| {
            let count = mark.count_in(text);
            let per_thousand_words = if word_count > 0 {
                count as f64 / word_count as f64 * 1000.0
            } else {
                0.0
            };
            (
                *mark,
                PunctuationDensity {
                    count,
                    per_thousand_words,
                    weight: mark.weight(),
                },
            )
        })
        .collect()
}

/// Distribution of each syntactic scalar across the baseline
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SyntacticProfile {
    pub opening_patterns: BTreeMap<OpeningCategory, MetricStatistics>,
    pub avg_clauses_per_sentence: MetricStatistics,
    pub complexity_score: MetricStatistics,
    pub structural_variety: MetricStatistics,
    /// Mean density per thousand words
    pub punctuation_density: BTreeMap<PunctuationMark, f64>,
}

/// Aggregate per-document structures. `None` when there are none.
pub fn build_syntactic_profile(analyses: &[SentenceStructure]) -> Option<SyntacticProfile> {
    if analyses.is_empty() {
        return None;
    }

    let series = |f: &dyn Fn(&SentenceStructure) -> f64| -> MetricStatistics {
        let values: Vec<f64> = analyses.iter().map(f).collect();
        MetricStatistics::from_values(&values)
    };

    let opening_patterns = OpeningCategory::all()
        .iter()
        .map(|category| {
            let stats = series(&|a: &SentenceStructure| {
                a.opening_patterns.get(category).copied().unwrap_or(0.0)
            });
            (*category, stats)
        })
        .collect();

    let punctuation_density = PunctuationMark::all()
        .iter()
        .map(|mark| {
            let stats = series(&|a: &SentenceStructure| {
                a.punctuation_density
                    .get(mark)
                    .map(|d| d.per_thousand_words)
                    .unwrap_or(0.0)
            });
            (*mark, stats.mean)
        })
        .collect();

    Some(SyntacticProfile {
        opening_patterns,
        avg_clauses_per_sentence: series(&|a: &SentenceStructure| a.avg_clauses_per_sentence),
        complexity_score: series(&|a: &SentenceStructure| a.complexity_score),
        structural_variety: series(&|a: &SentenceStructure| a.structural_variety),
        punctuation_density,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OpeningDeviation {
    pub baseline: f64,
    pub current: f64,
    /// Absolute z-score
    pub z_score: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SyntacticComparison {
    pub opening_deviations: BTreeMap<OpeningCategory, OpeningDeviation>,
    pub avg_opening_deviation: f64,
    pub clause_deviation: f64,
    pub complexity_deviation: f64,
    pub variety_deviation: f64,
    /// Mean of the four deviations above
    pub overall_deviation: f64,
}

fn abs_z(value: f64, stats: &MetricStatistics) -> f64 {
    z_score(value, stats.mean, stats.std_dev).abs()
}

pub fn compare_syntactic_profiles(baseline: &SyntacticProfile, current: &SentenceStructure) -> SyntacticComparison {
    let opening_deviations: BTreeMap<OpeningCategory, OpeningDeviation> = baseline
        .opening_patterns
        .iter()
        .map(|(category, stats)| {
            let value = current.opening_patterns.get(category).copied().unwrap_or(0.0);
            (
                *category,
                OpeningDeviation {
                    baseline: stats.mean,
                    current: value,
                    z_score: abs_z(value, stats),
                },
            )
        })
        .collect();

    let avg_opening_deviation = if opening_deviations.is_empty() {
        0.0
    } else {
        opening_deviations.values().map(|d| d.z_score).sum::<f64>() / opening_deviations.len() as f64
    };
    let clause_deviation = abs_z(current.avg_clauses_per_sentence, &baseline.avg_clauses_per_sentence);
    let complexity_deviation = abs_z(current.complexity_score, &baseline.complexity_score);
    let variety_deviation = abs_z(current.structural_variety, &baseline.structural_variety);

    SyntacticComparison {
        opening_deviations,
        avg_opening_deviation,
        clause_deviation,
        complexity_deviation,
        variety_deviation,
        overall_deviation: (avg_opening_deviation + clause_deviation + complexity_deviation + variety_deviation)
            / 4.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text() {
        assert_eq!(analyze_sentence_structure(""), SentenceStructure::default());
        assert_eq!(analyze_sentence_structure("   "), SentenceStructure::default());
    }

    #[test]
    fn test_opening_distribution_sums_to_100() {
        let s = analyze_sentence_structure("The sun rose. However, clouds came. Dogs barked. But we stayed.");
        let total: f64 = s.opening_patterns.values().sum();
        assert!((total - 100.0).abs() < 1e-9);
        assert_eq!(s.opening_patterns[&OpeningCategory::Subject], 25.0);
        assert_eq!(s.opening_patterns[&OpeningCategory::Other], 25.0);
        assert_eq!(s.opening_patterns.len(), OpeningCategory::all().len());
        // four equally likely openings: log2(4) / log2(8)
        assert!((s.structural_variety - 200.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_uniform_openings_have_no_variety() {
        let s = analyze_sentence_structure("The cat sat. The cat sat. The cat sat.");
        assert_eq!(s.structural_variety, 0.0);
        assert_eq!(s.avg_clauses_per_sentence, 1.0);
        assert_eq!(s.complexity_score, 2.0);
    }

    #[test]
    fn test_punctuation_density_per_thousand() {
        let s = analyze_sentence_structure("One, two; three.");
        let comma = s.punctuation_density[&PunctuationMark::Comma];
        assert_eq!(comma.count, 1);
        assert!((comma.per_thousand_words - 1000.0 / 3.0).abs() < 1e-9);
        assert_eq!(s.punctuation_density[&PunctuationMark::Semicolon].weight, 2.0);
    }

    #[test]
    fn test_identical_baseline_has_zero_deviation() {
        let text = "The rain fell. However, we walked because it was warm. Dogs followed us.";
        let analyses = vec![analyze_sentence_structure(text); 3];
        let profile = build_syntactic_profile(&analyses).expect("profile");
        let comparison = compare_syntactic_profiles(&profile, &analyze_sentence_structure(text));
        assert_eq!(comparison.overall_deviation, 0.0);
        assert!(build_syntactic_profile(&[]).is_none());
    }

    #[test]
    fn test_deviation_against_spread() {
        let analyses = vec![
            analyze_sentence_structure("The rain fell. The wind blew."),
            analyze_sentence_structure("The rain fell. However, the wind blew."),
        ];
        let profile = build_syntactic_profile(&analyses).expect("profile");
        // subject share is 100 and 50: mean 75, std 25
        let subject = &profile.opening_patterns[&OpeningCategory::Subject];
        assert_eq!(subject.mean, 75.0);
        assert_eq!(subject.std_dev, 25.0);

        let current = analyze_sentence_structure("However, rain fell. However, wind blew.");
        let comparison = compare_syntactic_profiles(&profile, &current);
        assert_eq!(comparison.opening_deviations[&OpeningCategory::Subject].z_score, 3.0);
        assert!(comparison.overall_deviation > 0.0);
    }
}
