//! Categorical style-change flags
//!
//! Each rule is evaluated independently; a comparison may raise any subset.

use super::deviations::{find, significant_count, Deviation};
use crate::config::FlagThresholds;
use crate::fingerprint::VocabularyComparison;
use crate::mistakes::ErrorComparison;
use crate::profile::MetricKey;
use crate::syntax::SyntacticComparison;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FlagKind {
    SuspiciouslyClean,
    VocabularyShift,
    MultipleDeviations,
    SyntacticShift,
    SophisticationJump,
    FormulaicIncrease,
}

impl FlagKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlagKind::SuspiciouslyClean => "SUSPICIOUSLY_CLEAN",
            FlagKind::VocabularyShift => "VOCABULARY_SHIFT",
            FlagKind::MultipleDeviations => "MULTIPLE_DEVIATIONS",
            FlagKind::SyntacticShift => "SYNTACTIC_SHIFT",
            FlagKind::SophisticationJump => "SOPHISTICATION_JUMP",
            FlagKind::FormulaicIncrease => "FORMULAIC_INCREASE",
        }
    }
}

impl fmt::Display for FlagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlagSeverity {
    Low,
    Medium,
    High,
}

impl fmt::Display for FlagSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlagSeverity::Low => write!(f, "low"),
            FlagSeverity::Medium => write!(f, "medium"),
            FlagSeverity::High => write!(f, "high"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleChangeFlag {
    #[serde(rename = "type")]
    pub kind: FlagKind,
    pub severity: FlagSeverity,
    pub message: String,
    pub detail: String,
}

impl StyleChangeFlag {
    fn new(kind: FlagKind, severity: FlagSeverity, message: &str, detail: String) -> Self {
        Self {
            kind,
            severity,
            message: message.to_string(),
            detail,
        }
    }
}

pub fn generate_style_change_flags(
    deviations: &[Deviation],
    vocabulary: &VocabularyComparison,
    syntax: &SyntacticComparison,
    errors: &ErrorComparison,
    thresholds: &FlagThresholds,
) -> Vec<StyleChangeFlag> {
    let mut flags = Vec::new();

    if errors.suspiciously_clean {
        flags.push(StyleChangeFlag::new(
            FlagKind::SuspiciouslyClean,
            FlagSeverity::High,
            "Error rate suspiciously low compared to baseline",
            errors.confidence_note.clone().unwrap_or_default(),
        ));
    }

    if let Some(overlap) = vocabulary.overlap_score {
        if overlap < thresholds.vocabulary_overlap {
            flags.push(StyleChangeFlag::new(
                FlagKind::VocabularyShift,
                FlagSeverity::Medium,
                "Vocabulary overlap significantly lower than expected",
                format!("Vocabulary overlap: {:.0}%", overlap),
            ));
        }
    }

    let significant = significant_count(deviations);
    if significant >= thresholds.multiple_deviations {
        flags.push(StyleChangeFlag::new(
            FlagKind::MultipleDeviations,
            FlagSeverity::High,
            "Multiple metrics showing simultaneous significant deviations",
            format!("{} metrics showing significant deviations", significant),
        ));
    }

    if syntax.overall_deviation >= thresholds.syntactic_deviation {
        flags.push(StyleChangeFlag::new(
            FlagKind::SyntacticShift,
            FlagSeverity::Medium,
            "Sentence structure patterns differ significantly from baseline",
            format!("Syntactic deviation score: {:.2}", syntax.overall_deviation),
        ));
    }

    if let Some(d) = find(deviations, MetricKey::Sophistication) {
        if d.z_score >= thresholds.sophistication_z {
            flags.push(StyleChangeFlag::new(
                FlagKind::SophisticationJump,
                FlagSeverity::Medium,
                "Vocabulary sophistication increased significantly",
                format!("Z-score: {:.2}", d.z_score),
            ));
        }
    }

    if let Some(d) = find(deviations, MetricKey::FormulaicWeight) {
        if d.z_score >= thresholds.formulaic_z {
            flags.push(StyleChangeFlag::new(
                FlagKind::FormulaicIncrease,
                FlagSeverity::Low,
                "Increase in formulaic language usage",
                format!("Formulaic weight increased by {:.1}", d.diff),
            ));
        }
    }

    flags
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::Significance;

    fn deviation(key: MetricKey, z: f64) -> Deviation {
        let significance = Significance::from_z(z, &Default::default());
        Deviation {
            key,
            label: key.label().to_string(),
            baseline_mean: 10.0,
            baseline_std_dev: 1.0,
            baseline_min: 9.0,
            baseline_max: 11.0,
            current_value: 10.0 + z,
            diff: z,
            z_score: z,
            significance,
            is_significant: significance.is_significant(),
            suffix: String::new(),
        }
    }

    fn quiet_errors() -> ErrorComparison {
        ErrorComparison {
            error_reduction: 0.0,
            suspiciously_clean: false,
            missing_consistent_errors: Vec::new(),
            new_errors: Vec::new(),
            cleanliness_change: 0.0,
            current_cleanliness: 100.0,
            baseline_cleanliness: 100.0,
            confidence_note: None,
        }
    }

    #[test]
    fn test_no_flags_for_consistent_document() {
        let deviations = vec![deviation(MetricKey::Grade, 0.5), deviation(MetricKey::Sophistication, -0.3)];
        let vocab = VocabularyComparison {
            overlap_score: Some(85.0),
            ..Default::default()
        };
        let flags = generate_style_change_flags(
            &deviations,
            &vocab,
            &SyntacticComparison::default(),
            &quiet_errors(),
            &FlagThresholds::default(),
        );
        assert!(flags.is_empty());
    }

    #[test]
    fn test_every_flag_can_fire_together() {
        let deviations = vec![
            deviation(MetricKey::Grade, 2.5),
            deviation(MetricKey::Sophistication, 1.9),
            deviation(MetricKey::FormulaicWeight, 1.6),
        ];
        let vocab = VocabularyComparison {
            overlap_score: Some(20.0),
            ..Default::default()
        };
        let syntax = SyntacticComparison {
            overall_deviation: 2.4,
            ..Default::default()
        };
        let errors = ErrorComparison {
            suspiciously_clean: true,
            confidence_note: Some("note".to_string()),
            ..quiet_errors()
        };
        let flags = generate_style_change_flags(&deviations, &vocab, &syntax, &errors, &FlagThresholds::default());
        let kinds: Vec<FlagKind> = flags.iter().map(|f| f.kind).collect();
        assert_eq!(
            kinds,
            vec![
                FlagKind::SuspiciouslyClean,
                FlagKind::VocabularyShift,
                FlagKind::MultipleDeviations,
                FlagKind::SyntacticShift,
                FlagKind::SophisticationJump,
                FlagKind::FormulaicIncrease,
            ]
        );
        assert_eq!(flags[1].detail, "Vocabulary overlap: 20%");
        assert_eq!(flags[2].detail, "3 metrics showing significant deviations");
        assert_eq!(flags[5].severity, FlagSeverity::Low);
        assert_eq!(flags[5].detail, "Formulaic weight increased by 1.6");
    }

    #[test]
    fn test_missing_overlap_raises_no_vocabulary_flag() {
        let flags = generate_style_change_flags(
            &[],
            &VocabularyComparison::default(),
            &SyntacticComparison::default(),
            &quiet_errors(),
            &FlagThresholds::default(),
        );
        assert!(flags.is_empty());
    }

    #[test]
    fn test_sophistication_drop_is_not_a_jump() {
        let flags = generate_style_change_flags(
            &[deviation(MetricKey::Sophistication, -2.5)],
            &VocabularyComparison::default(),
            &SyntacticComparison::default(),
            &quiet_errors(),
            &FlagThresholds::default(),
        );
        assert!(flags.is_empty());
    }

    #[test]
    fn test_flag_kind_serializes_upper_snake() {
        let json = serde_json::to_string(&FlagKind::SuspiciouslyClean).expect("serialize");
        assert_eq!(json, "\"SUSPICIOUSLY_CLEAN\"");
        assert_eq!(FlagKind::FormulaicIncrease.to_string(), "FORMULAIC_INCREASE");
    }
}
