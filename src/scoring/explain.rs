//! Step-by-step calculation traces
//!
//! Each trace is built from the values stored on the scored result, never
//! recomputed, so the narration always matches the numbers.

use super::deviations::Deviation;
use crate::config::{NgramConfig, SignificanceLevels};
use crate::lexicon::Lexicon;
use crate::profile::stats::{normalize_score, percentile_rank};
use crate::profile::MetricKey;
use crate::text::TextMetrics;
use serde::{Deserialize, Serialize};

/// One auditable step of a calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub title: String,
    pub formula: Option<String>,
    /// Formula with the numbers filled in
    pub substitution: Option<String>,
    pub result: String,
    pub interpretation: Option<String>,
}

impl Step {
    pub fn new(title: impl Into<String>, result: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            formula: None,
            substitution: None,
            result: result.into(),
            interpretation: None,
        }
    }

    pub fn formula(mut self, formula: impl Into<String>) -> Self {
        self.formula = Some(formula.into());
        self
    }

    pub fn substitution(mut self, substitution: impl Into<String>) -> Self {
        self.substitution = Some(substitution.into());
        self
    }

    pub fn interpretation(mut self, interpretation: impl Into<String>) -> Self {
        self.interpretation = Some(interpretation.into());
        self
    }
}

/// Trace of one metric's z-score
pub fn explain_deviation(deviation: &Deviation, baseline_values: &[f64], levels: &SignificanceLevels) -> Vec<Step> {
    let suffix = deviation.suffix.as_str();
    let label = deviation.label.to_lowercase();
    let n = baseline_values.len();

    let sum_expr = if n <= 5 {
        let terms: Vec<String> = baseline_values.iter().map(|v| format!("{:.1}", v)).collect();
        format!("({}) / {}", terms.join(" + "), n)
    } else {
        format!("sum of {} values / {}", n, n)
    };

    let z_expr = if deviation.baseline_std_dev > 0.0 {
        format!(
            "({:.2} - {:.2}) / {:.2} = {:.2}",
            deviation.current_value, deviation.baseline_mean, deviation.baseline_std_dev, deviation.z_score
        )
    } else {
        "σ is 0, so z is defined as 0".to_string()
    };

    vec![
        Step::new(
            "Collect baseline values",
            format!(
                "Range: {:.1}{suffix} to {:.1}{suffix}",
                deviation.baseline_min, deviation.baseline_max
            ),
        )
        .substitution(format!(
            "{} baseline samples; current {:.1}{suffix} is above {:.0}% of them",
            n,
            deviation.current_value,
            percentile_rank(deviation.current_value, baseline_values)
        ))
        .interpretation(format!(
            "Values measured on {} earlier samples by the same author. The current value sits at {:.0}% of the baseline range.",
            n,
            normalize_score(deviation.current_value, deviation.baseline_min, deviation.baseline_max)
        )),
        Step::new("Baseline mean", format!("{:.2}{suffix}", deviation.baseline_mean))
            .formula("μ = Σx / n")
            .substitution(sum_expr)
            .interpretation(format!("The author's typical {} is {:.1}{suffix}.", label, deviation.baseline_mean)),
        Step::new("Standard deviation", format!("σ = {:.2}{suffix}", deviation.baseline_std_dev))
            .formula("σ = √(Σ(x - μ)² / n)")
            .substitution("Population spread of the baseline values")
            .interpretation(interpret_spread(deviation.baseline_std_dev, deviation.baseline_mean, &label)),
        Step::new("Z-score", format!("z = {:.2}", deviation.z_score))
            .formula("z = (x - μ) / σ")
            .substitution(z_expr)
            .interpretation(interpret_z(deviation, &label, levels)),
        Step::new(
            "Significance",
            format!("{} ({:?})", deviation.significance.label(), deviation.significance).to_lowercase(),
        )
        .formula(format!(
            "|z| ≥ {:.1} high, ≥ {:.1} medium, ≥ {:.1} low",
            levels.high, levels.medium, levels.low
        ))
        .substitution(format!("|z| = {:.2}", deviation.z_score.abs()))
        .interpretation(if deviation.is_significant {
            "Counted as a significant deviation."
        } else {
            "Not counted as significant."
        }),
    ]
}

fn interpret_spread(std_dev: f64, mean: f64, label: &str) -> String {
    if std_dev == 0.0 {
        return format!("Every baseline sample has the same {}; any difference is reported with z = 0.", label);
    }
    let cv = if mean != 0.0 { std_dev / mean.abs() * 100.0 } else { 100.0 };
    if cv < 10.0 {
        format!("Very consistent baseline: {} varies by about {:.1}.", label, std_dev)
    } else if cv < 20.0 {
        format!("Moderately consistent baseline: typical variation of {:.1} in {}.", std_dev, label)
    } else {
        format!("Variable baseline: {} naturally moves around (σ = {:.1}).", label, std_dev)
    }
}

fn interpret_z(deviation: &Deviation, label: &str, levels: &SignificanceLevels) -> String {
    let abs = deviation.z_score.abs();
    let direction = if deviation.current_value > deviation.baseline_mean {
        "higher"
    } else {
        "lower"
    };
    if abs < levels.low {
        format!("This {} is within normal variation for the author.", label)
    } else if abs < levels.medium {
        format!(
            "This {} is slightly {} than usual ({:.1} standard deviations) but within the expected range.",
            label, direction, abs
        )
    } else if abs < levels.high {
        format!(
            "This {} is notably {} than the baseline ({:.1} standard deviations).",
            label, direction, abs
        )
    } else {
        format!(
            "This {} is far {} than the baseline ({:.1} standard deviations), a strong sign of a style change.",
            label, direction, abs
        )
    }
}

/// Plain-language band for a composite score
pub fn interpret_score(score: f64) -> &'static str {
    if score >= 90.0 {
        "Highly consistent: the document aligns closely with the baseline on every measure."
    } else if score >= 70.0 {
        "Generally consistent: minor variations that could easily be natural."
    } else if score >= 50.0 {
        "Noticeable deviation: clear differences from the baseline patterns."
    } else if score >= 30.0 {
        "Significant deviation: substantial stylistic differences from the baseline."
    } else {
        "Dramatic change: large differences across several dimensions of the writing."
    }
}

pub fn interpret_rms(rms: f64) -> &'static str {
    if rms < 1.0 {
        "Metrics are statistically consistent with the baseline."
    } else if rms < 1.5 {
        "Some metrics show minor deviations; natural variation or a topic change could explain them."
    } else if rms < 2.0 {
        "Several metrics deviate notably from established patterns."
    } else {
        "Many metrics deviate significantly from the baseline."
    }
}

/// Trace of a single-document metric. `None` for metrics without one.
pub fn explain_document_metric(
    key: MetricKey,
    metrics: &TextMetrics,
    ngrams: &NgramConfig,
    lexicon: &Lexicon,
) -> Option<Vec<Step>> {
    match key {
        MetricKey::Grade => Some(explain_grade(metrics)),
        MetricKey::SentenceVariation => Some(explain_sentence_variation(metrics)),
        MetricKey::VocabularyVariety => Some(explain_vocabulary_variety(metrics, ngrams)),
        MetricKey::FormulaicWeight => Some(explain_formulaic(metrics, lexicon)),
        MetricKey::Predictability => Some(explain_predictability(metrics, ngrams)),
        _ => None,
    }
}

fn explain_grade(metrics: &TextMetrics) -> Vec<Step> {
    let words: usize = metrics.sentences.iter().map(|s| s.word_count).sum();
    let syllables: usize = metrics.sentences.iter().map(|s| s.syllable_count).sum();
    let sentences = metrics.sentences.len();
    let r = &metrics.readability;

    vec![
        Step::new("Average sentence length", format!("{:.1} words/sentence", r.avg_sentence_length))
            .formula("ASL = total words / total sentences")
            .substitution(format!("{} words / {} sentences", words, sentences))
            .interpretation(if r.avg_sentence_length < 15.0 {
                "Short sentences."
            } else if r.avg_sentence_length > 25.0 {
                "Long sentences."
            } else {
                "Moderate sentence length."
            }),
        Step::new("Average syllables per word", format!("{:.2} syllables/word", r.avg_syllables_per_word))
            .formula("ASW = total syllables / total words")
            .substitution(format!("{} syllables / {} words", syllables, words))
            .interpretation(if r.avg_syllables_per_word < 1.5 {
                "Simple vocabulary."
            } else if r.avg_syllables_per_word > 2.0 {
                "Complex vocabulary."
            } else {
                "Moderate vocabulary complexity."
            }),
        Step::new("Flesch-Kincaid grade", format!("Grade {:.1}", r.grade))
            .formula("Grade = 0.39×ASL + 11.8×ASW - 15.59")
            .substitution(format!(
                "0.39×{:.1} + 11.8×{:.2} - 15.59",
                r.avg_sentence_length, r.avg_syllables_per_word
            ))
            .interpretation(format!("Roughly a grade {:.0} reading level.", r.grade)),
    ]
}

fn explain_sentence_variation(metrics: &TextMetrics) -> Vec<Step> {
    let stats = &metrics.sentence_stats;
    vec![
        Step::new("Mean sentence length", format!("μ = {:.1} words", stats.mean))
            .formula("μ = Σx / n")
            .substitution(format!("sum of sentence lengths / {} sentences", stats.total)),
        Step::new("Standard deviation", format!("σ = {:.1} words", stats.std_dev))
            .formula("σ = √(Σ(x - μ)² / n)")
            .interpretation(if stats.std_dev < 5.0 {
                "Sentences are similar in length."
            } else if stats.std_dev > 10.0 {
                "Sentence lengths vary widely."
            } else {
                "Moderate variation in sentence length."
            }),
        Step::new("Coefficient of variation", format!("CV = {:.1}%", metrics.sentence_variation))
            .formula("CV = (σ / μ) × 100")
            .substitution(format!("({:.1} / {:.1}) × 100", stats.std_dev, stats.mean))
            .interpretation(if metrics.sentence_variation < 25.0 {
                "Uniform sentence lengths, typical of templated writing."
            } else {
                "Natural variation in sentence length."
            }),
    ]
}

fn explain_vocabulary_variety(metrics: &TextMetrics, ngrams: &NgramConfig) -> Vec<Step> {
    let v = &metrics.vocabulary;
    let segment = ngrams.msttr_segment;
    let segments = if segment > 0 { v.total_words / segment } else { 0 };

    if segments == 0 {
        return vec![
            Step::new("Type-token ratio", format!("TTR = {:.1}%", v.ttr * 100.0))
                .formula("TTR = unique words / total words")
                .substitution(format!("{} / {}", v.unique_words, v.total_words))
                .interpretation(format!("Fewer than {} words, so plain TTR is used.", segment)),
        ];
    }

    vec![
        Step::new("Split into segments", format!("{} segments", segments))
            .substitution(format!("{} words in non-overlapping {}-word segments", v.total_words, segment))
            .interpretation("Fixed-size segments remove the length bias of plain TTR."),
        Step::new("Segment TTR", "One ratio per segment")
            .formula(format!("TTR = unique words / {}", segment)),
        Step::new("Mean-segmental TTR", format!("MSTTR = {:.1}%", v.msttr * 100.0))
            .formula("MSTTR = Σ segment TTR / segments")
            .interpretation(if v.msttr < 0.6 {
                "Repetitive vocabulary."
            } else if v.msttr > 0.75 {
                "Highly varied vocabulary."
            } else {
                "Moderate vocabulary variety."
            }),
    ]
}

fn explain_formulaic(metrics: &TextMetrics, lexicon: &Lexicon) -> Vec<Step> {
    let r = &metrics.register;
    vec![
        Step::new("Detect formulaic phrases", format!("Found {} phrase occurrences", r.total_count))
            .substitution(format!("Scanned against {} catalog phrases", lexicon.phrases().len())),
        Step::new("Apply severity weights", format!("Total weight = {:.1}", r.total_weight))
            .formula("weight = Σ(count × severity)")
            .substitution(format!(
                "High (×3): {}, Medium (×2): {}, Low (×1): {}",
                r.severity.high, r.severity.medium, r.severity.low
            ))
            .interpretation(if r.total_weight < 5.0 {
                "Little use of stock phrases."
            } else if r.total_weight > 10.0 {
                "Heavy reliance on stock phrases."
            } else {
                "Moderate use of stock phrases."
            }),
    ]
}

fn explain_predictability(metrics: &TextMetrics, ngrams: &NgramConfig) -> Vec<Step> {
    let n = &metrics.ngrams;
    vec![
        Step::new(
            "N-gram rates",
            format!(
                "Human baselines: {:.0}% bigrams, {:.0}% trigrams",
                ngrams.bigram_rate, ngrams.trigram_rate
            ),
        )
        .formula("rate = template n-grams / total words × 100")
        .substitution(format!("Bigrams: {:.1}%, trigrams: {:.1}%", n.bigrams.rate, n.trigrams.rate)),
        Step::new(
            "Excess over baseline",
            format!("Bigram: {:.1}%, trigram: {:.1}%", n.bigrams.excess, n.trigrams.excess),
        )
        .formula("excess = max(0, rate - baseline)"),
        Step::new("Predictability", format!("{:.1}%", n.predictability))
            .formula("score = min(100, bigram excess×2 + trigram excess×5)")
            .substitution(format!(
                "min(100, {:.1}×2 + {:.1}×5)",
                n.bigrams.excess, n.trigrams.excess
            ))
            .interpretation(if n.predictability < 20.0 {
                "Natural, varied phrasing."
            } else if n.predictability > 30.0 {
                "Highly predictable, template-like phrasing."
            } else {
                "Moderate predictability."
            }),
    ]
}
