//! Baseline profiles
//!
//! A profile summarises an author's baseline samples: a distribution for
//! each tracked metric, pooled vocabulary, syntactic and error profiles,
//! and a reliability block describing how much the baseline can be
//! trusted.

pub mod builder;
pub mod stats;

pub use builder::build_profile;
pub use stats::{MetricStatistics, Significance};

use crate::fingerprint::VocabularyProfile;
use crate::mistakes::ErrorProfile;
use crate::syntax::SyntacticProfile;
use crate::text::TextMetrics;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Scalar metrics tracked across baseline samples
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKey {
    /// Flesch-Kincaid grade level
    Grade,
    /// Sentence-length coefficient of variation
    SentenceVariation,
    /// MSTTR, as a percentage
    VocabularyVariety,
    Sophistication,
    FormulaicWeight,
    Predictability,
    Coherence,
    PassiveRatio,
    AvgSentenceLength,
    TotalWords,
}

impl MetricKey {
    pub fn all() -> &'static [MetricKey] {
        &[
            MetricKey::Grade,
            MetricKey::SentenceVariation,
            MetricKey::VocabularyVariety,
            MetricKey::Sophistication,
            MetricKey::FormulaicWeight,
            MetricKey::Predictability,
            MetricKey::Coherence,
            MetricKey::PassiveRatio,
            MetricKey::AvgSentenceLength,
            MetricKey::TotalWords,
        ]
    }

    /// Metrics scored for deviation. Total words only feeds outlier detection.
    pub fn deviation_keys() -> &'static [MetricKey] {
        &Self::all()[..9]
    }

    pub fn name(&self) -> &'static str {
        match self {
            MetricKey::Grade => "grade",
            MetricKey::SentenceVariation => "cv",
            MetricKey::VocabularyVariety => "sttr",
            MetricKey::Sophistication => "sophistication",
            MetricKey::FormulaicWeight => "formulaic_weight",
            MetricKey::Predictability => "predictability",
            MetricKey::Coherence => "coherence",
            MetricKey::PassiveRatio => "passive_ratio",
            MetricKey::AvgSentenceLength => "avg_sentence_length",
            MetricKey::TotalWords => "total_words",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MetricKey::Grade => "Grade Level",
            MetricKey::SentenceVariation => "Sentence Variation",
            MetricKey::VocabularyVariety => "Vocabulary Variety",
            MetricKey::Sophistication => "Sophistication",
            MetricKey::FormulaicWeight => "Formulaic Weight",
            MetricKey::Predictability => "Predictability",
            MetricKey::Coherence => "Coherence",
            MetricKey::PassiveRatio => "Passive Voice",
            MetricKey::AvgSentenceLength => "Avg Sentence Length",
            MetricKey::TotalWords => "Total Words",
        }
    }

    /// Unit suffix for display
    pub fn suffix(&self) -> &'static str {
        match self {
            MetricKey::SentenceVariation
            | MetricKey::VocabularyVariety
            | MetricKey::Sophistication
            | MetricKey::Predictability
            | MetricKey::Coherence
            | MetricKey::PassiveRatio => "%",
            _ => "",
        }
    }

    pub fn value(&self, metrics: &TextMetrics) -> f64 {
        match self {
            MetricKey::Grade => metrics.readability.grade,
            MetricKey::SentenceVariation => metrics.sentence_variation,
            MetricKey::VocabularyVariety => metrics.vocabulary.msttr * 100.0,
            MetricKey::Sophistication => metrics.vocabulary.sophistication_ratio,
            MetricKey::FormulaicWeight => metrics.register.total_weight,
            MetricKey::Predictability => metrics.ngrams.predictability,
            MetricKey::Coherence => metrics.paragraphs.coherence,
            MetricKey::PassiveRatio => metrics.passive.ratio,
            MetricKey::AvgSentenceLength => metrics.readability.avg_sentence_length,
            MetricKey::TotalWords => metrics.vocabulary.total_words as f64,
        }
    }
}

impl fmt::Display for MetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MetricKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        MetricKey::all()
            .iter()
            .find(|k| {
                k.name() == normalized
                    || k.label().to_lowercase().replace(' ', "_") == normalized
                    || serde_json::to_value(k).ok().and_then(|v| v.as_str().map(str::to_owned)).as_deref()
                        == Some(normalized.as_str())
            })
            .copied()
            .ok_or_else(|| {
                let names: Vec<&str> = MetricKey::all().iter().map(MetricKey::name).collect();
                format!("Unknown metric '{}'. Valid: {}", s, names.join(", "))
            })
    }
}

/// How far the sample count goes toward a trustworthy baseline
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BaselineStrength {
    Insufficient,
    Minimum,
    Recommended,
    Strong,
}

impl BaselineStrength {
    pub fn label(&self) -> &'static str {
        match self {
            BaselineStrength::Insufficient => "insufficient",
            BaselineStrength::Minimum => "minimum",
            BaselineStrength::Recommended => "recommended",
            BaselineStrength::Strong => "strong",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reliability {
    pub sample_count: usize,
    /// Mean relative spread across all tracked metrics
    pub overall_variance: f64,
    /// 0..=100
    pub confidence_score: f64,
    pub outlier_count: usize,
    /// Sample indices whose word count is an outlier
    pub outlier_indices: Vec<usize>,
    /// Sample indices below the configured minimum word count
    pub short_samples: Vec<usize>,
    /// Enough samples for meaningful z-scores
    pub meets_minimum: bool,
    pub strength: BaselineStrength,
}

/// Aggregated baseline for one author
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaselineProfile {
    pub metrics: BTreeMap<MetricKey, MetricStatistics>,
    pub vocabulary: VocabularyProfile,
    pub syntactic: SyntacticProfile,
    pub errors: ErrorProfile,
    pub reliability: Reliability,
}

impl BaselineProfile {
    pub fn metric(&self, key: MetricKey) -> Option<&MetricStatistics> {
        self.metrics.get(&key)
    }

    pub fn sample_count(&self) -> usize {
        self.reliability.sample_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deviation_keys_exclude_total_words() {
        assert_eq!(MetricKey::all().len(), 10);
        assert_eq!(MetricKey::deviation_keys().len(), 9);
        assert!(!MetricKey::deviation_keys().contains(&MetricKey::TotalWords));
    }

    #[test]
    fn test_parse_metric_key() {
        assert_eq!("cv".parse::<MetricKey>(), Ok(MetricKey::SentenceVariation));
        assert_eq!("grade".parse::<MetricKey>(), Ok(MetricKey::Grade));
        assert_eq!("Passive-Voice".parse::<MetricKey>(), Ok(MetricKey::PassiveRatio));
        assert_eq!("vocabulary_variety".parse::<MetricKey>(), Ok(MetricKey::VocabularyVariety));
        assert!("bogus".parse::<MetricKey>().is_err());
    }

    #[test]
    fn test_metric_values() {
        let metrics = crate::text::extract_metrics("The cat sat. The cat sat. The cat sat.");
        assert_eq!(MetricKey::TotalWords.value(&metrics), 9.0);
        assert_eq!(MetricKey::SentenceVariation.value(&metrics), 0.0);
        assert!((MetricKey::VocabularyVariety.value(&metrics) - 100.0 / 3.0).abs() < 1e-9);
    }
}
