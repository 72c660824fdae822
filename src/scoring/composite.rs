//! Composite consistency score
//!
//! Four sub-scores on a 0..=100 scale are combined with the configured
//! weights, then fixed penalties are subtracted. Every intermediate value
//! is kept on [`CompositeBreakdown`] so the trace in [`CompositeBreakdown::steps`]
//! narrates exactly what was computed.

use super::deviations::{significant_count, Deviation};
use super::explain::{interpret_rms, interpret_score, Step};
use crate::config::{CompositeWeights, EngineConfig};
use crate::fingerprint::VocabularyComparison;
use crate::mistakes::ErrorComparison;
use crate::syntax::SyntacticComparison;
use serde::{Deserialize, Serialize};

/// Vocabulary sub-score when no overlap could be measured
const VOCAB_FALLBACK: f64 = 50.0;
const SUSPICIOUS_ERROR_FLOOR: f64 = 40.0;
const SUSPICIOUS_ERROR_FACTOR: f64 = 1.5;
const ERROR_FACTOR: f64 = 0.8;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeBreakdown {
    pub z_scores: Vec<f64>,
    pub rms_z_score: f64,
    pub metric_score: f64,
    pub vocab_score: f64,
    /// Overlap was unavailable and the fallback was used
    pub vocab_fallback: bool,
    pub syntax_deviation: f64,
    pub syntax_score: f64,
    pub cleanliness_change: f64,
    pub suspiciously_clean: bool,
    pub error_score: f64,
    pub weights: CompositeWeights,
    pub weighted_sum: f64,
    pub significant_deviations: usize,
    pub clean_penalty: f64,
    pub deviation_penalty: f64,
    /// 0..=100
    pub final_score: f64,
}

/// Smooth decay: 0 maps to 100, 2 to 50, 3 to about 31
pub fn decay_score(deviation: f64) -> f64 {
    100.0 / (1.0 + (deviation / 2.0).powi(2))
}

pub fn rms(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    (values.iter().map(|v| v * v).sum::<f64>() / values.len() as f64).sqrt()
}

pub fn error_score(cleanliness_change: f64, suspiciously_clean: bool) -> f64 {
    if suspiciously_clean {
        (100.0 - cleanliness_change.abs() * SUSPICIOUS_ERROR_FACTOR).max(SUSPICIOUS_ERROR_FLOOR)
    } else {
        (100.0 - cleanliness_change.abs() * ERROR_FACTOR).max(0.0)
    }
}

pub fn calculate_composite_score(
    deviations: &[Deviation],
    vocabulary: &VocabularyComparison,
    syntax: &SyntacticComparison,
    errors: &ErrorComparison,
    config: &EngineConfig,
) -> CompositeBreakdown {
    let weights = config.composite.clone();

    let z_scores: Vec<f64> = deviations.iter().map(|d| d.z_score).collect();
    let rms_z_score = rms(&z_scores);
    let metric_score = decay_score(rms_z_score);

    let vocab_score = vocabulary.overlap_score.unwrap_or(VOCAB_FALLBACK);
    let syntax_score = decay_score(syntax.overall_deviation);
    let error_score = error_score(errors.cleanliness_change, errors.suspiciously_clean);

    let weighted_sum = metric_score * weights.metric_deviations
        + vocab_score * weights.vocabulary_overlap
        + syntax_score * weights.syntactic_patterns
        + error_score * weights.error_consistency;

    let significant_deviations = significant_count(deviations);
    let clean_penalty = if errors.suspiciously_clean {
        weights.suspiciously_clean_penalty
    } else {
        0.0
    };
    let deviation_penalty = if significant_deviations >= config.flags.multiple_deviations {
        (significant_deviations as f64 * weights.deviation_penalty_per_metric).min(weights.deviation_penalty_cap)
    } else {
        0.0
    };

    let final_score = (weighted_sum - clean_penalty - deviation_penalty).clamp(0.0, 100.0);

    CompositeBreakdown {
        z_scores,
        rms_z_score,
        metric_score,
        vocab_score,
        vocab_fallback: vocabulary.overlap_score.is_none(),
        syntax_deviation: syntax.overall_deviation,
        syntax_score,
        cleanliness_change: errors.cleanliness_change,
        suspiciously_clean: errors.suspiciously_clean,
        error_score,
        weights,
        weighted_sum,
        significant_deviations,
        clean_penalty,
        deviation_penalty,
        final_score,
    }
}

impl CompositeBreakdown {
    pub fn total_penalty(&self) -> f64 {
        self.clean_penalty + self.deviation_penalty
    }

    pub fn interpretation(&self) -> &'static str {
        interpret_score(self.final_score)
    }

    /// Ordered calculation trace
    pub fn steps(&self) -> Vec<Step> {
        let w = &self.weights;
        let mut steps = Vec::with_capacity(8);

        let squares: Vec<String> = self.z_scores.iter().map(|z| format!("{:.1}²", z)).collect();
        steps.push(
            Step::new("RMS z-score", format!("RMS = {:.2}", self.rms_z_score))
                .formula("RMS = √(Σz² / n)")
                .substitution(format!("√(({}) / {})", squares.join(" + "), self.z_scores.len()))
                .interpretation(interpret_rms(self.rms_z_score)),
        );

        steps.push(
            Step::new(
                "Metric deviation component",
                weighted_points(self.metric_score, w.metric_deviations),
            )
            .formula("metricScore = 100 / (1 + (RMS/2)²)")
            .substitution(format!(
                "100 / (1 + ({:.2}/2)²) = {:.1}",
                self.rms_z_score, self.metric_score
            ))
            .interpretation("Smooth decay: RMS 0 gives 100, 2 gives 50, 3 gives about 31."),
        );

        let vocab_step = Step::new(
            "Vocabulary overlap component",
            weighted_points(self.vocab_score, w.vocabulary_overlap),
        )
        .formula("overlap = 0.7 × function-word similarity + 0.3 × signature overlap");
        steps.push(if self.vocab_fallback {
            vocab_step
                .substitution(format!("No overlap available, using {:.0}", VOCAB_FALLBACK))
                .interpretation("One side has no words to compare.")
        } else {
            vocab_step
                .substitution(format!("{:.1}% overlap", self.vocab_score))
                .interpretation(if self.vocab_score >= 70.0 {
                    "Strong vocabulary consistency with the baseline."
                } else if self.vocab_score >= 50.0 {
                    "Moderate vocabulary overlap."
                } else {
                    "Low overlap; word choices differ from the baseline."
                })
        });

        steps.push(
            Step::new(
                "Syntactic pattern component",
                weighted_points(self.syntax_score, w.syntactic_patterns),
            )
            .formula("syntaxScore = 100 / (1 + (deviation/2)²)")
            .substitution(format!(
                "100 / (1 + ({:.2}/2)²) = {:.1}",
                self.syntax_deviation, self.syntax_score
            ))
            .interpretation("Mean z-score of sentence openings, clauses, complexity and variety."),
        );

        let error_step = Step::new(
            "Error consistency component",
            weighted_points(self.error_score, w.error_consistency),
        );
        steps.push(if self.suspiciously_clean {
            error_step
                .formula("max(40, 100 - |cleanlinessChange| × 1.5)")
                .substitution(format!(
                    "max(40, 100 - {:.1} × 1.5) = {:.1}",
                    self.cleanliness_change.abs(),
                    self.error_score
                ))
                .interpretation("Much cleaner than the baseline, with habitual errors missing.")
        } else {
            error_step
                .formula("max(0, 100 - |cleanlinessChange| × 0.8)")
                .substitution(format!(
                    "100 - {:.1} × 0.8 = {:.1}",
                    self.cleanliness_change.abs(),
                    self.error_score
                ))
                .interpretation("Error patterns compared with the baseline average.")
        });

        steps.push(
            Step::new("Weighted sum", format!("{:.1} points", self.weighted_sum))
                .formula("Σ score × weight")
                .substitution(format!(
                    "{:.1} + {:.1} + {:.1} + {:.1}",
                    self.metric_score * w.metric_deviations,
                    self.vocab_score * w.vocabulary_overlap,
                    self.syntax_score * w.syntactic_patterns,
                    self.error_score * w.error_consistency
                )),
        );

        if self.total_penalty() > 0.0 {
            let mut reasons = Vec::new();
            if self.clean_penalty > 0.0 {
                reasons.push(format!("Suspiciously clean: -{:.0}", self.clean_penalty));
            }
            if self.deviation_penalty > 0.0 {
                reasons.push(format!(
                    "{} significant deviations: -{:.0} ({}×{:.0}, capped at {:.0})",
                    self.significant_deviations,
                    self.deviation_penalty,
                    self.significant_deviations,
                    w.deviation_penalty_per_metric,
                    w.deviation_penalty_cap
                ));
            }
            steps.push(
                Step::new("Special penalties", format!("-{:.0} points", self.total_penalty()))
                    .substitution(reasons.join("; ")),
            );
        }

        let final_expr = if self.total_penalty() > 0.0 {
            format!(
                "{:.1} - {:.0} = {:.1}",
                self.weighted_sum,
                self.total_penalty(),
                self.final_score
            )
        } else {
            format!("{:.1}", self.weighted_sum)
        };
        steps.push(
            Step::new("Final consistency score", format!("{:.0} / 100", self.final_score))
                .formula("clamp(weightedSum - penalties, 0, 100)")
                .substitution(final_expr)
                .interpretation(self.interpretation()),
        );

        steps
    }
}

fn weighted_points(score: f64, weight: f64) -> String {
    format!(
        "{:.1} × {:.0}% weight = {:.1} points",
        score,
        weight * 100.0,
        score * weight
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn errors(change: f64, suspicious: bool) -> ErrorComparison {
        ErrorComparison {
            error_reduction: 0.0,
            suspiciously_clean: suspicious,
            missing_consistent_errors: Vec::new(),
            new_errors: Vec::new(),
            cleanliness_change: change,
            current_cleanliness: 100.0,
            baseline_cleanliness: 100.0 - change,
            confidence_note: None,
        }
    }

    fn vocab(overlap: Option<f64>) -> VocabularyComparison {
        VocabularyComparison {
            overlap_score: overlap,
            ..VocabularyComparison::default()
        }
    }

    #[test]
    fn test_decay_score() {
        assert_eq!(decay_score(0.0), 100.0);
        assert_eq!(decay_score(2.0), 50.0);
        assert!((decay_score(3.0) - 100.0 / 3.25).abs() < 1e-9);
        let mut last = f64::MAX;
        for i in 0..50 {
            let score = decay_score(i as f64 * 0.2);
            assert!(score <= last);
            last = score;
        }
    }

    #[test]
    fn test_error_score() {
        assert_eq!(error_score(10.0, false), 92.0);
        assert_eq!(error_score(-10.0, false), 92.0);
        assert_eq!(error_score(10.0, true), 85.0);
        assert_eq!(error_score(60.0, true), 40.0);
        assert_eq!(error_score(200.0, false), 0.0);
    }

    #[test]
    fn test_perfect_match_scores_95() {
        let breakdown = calculate_composite_score(
            &[],
            &vocab(Some(100.0)),
            &SyntacticComparison::default(),
            &errors(0.0, false),
            &EngineConfig::default(),
        );
        assert_eq!(breakdown.rms_z_score, 0.0);
        assert!((breakdown.final_score - 95.0).abs() < 1e-9);
        assert_eq!(breakdown.total_penalty(), 0.0);
    }

    #[test]
    fn test_suspicious_penalty_and_fallback() {
        let breakdown = calculate_composite_score(
            &[],
            &vocab(None),
            &SyntacticComparison::default(),
            &errors(40.0, true),
            &EngineConfig::default(),
        );
        assert!(breakdown.vocab_fallback);
        assert_eq!(breakdown.vocab_score, 50.0);
        assert_eq!(breakdown.error_score, 40.0);
        assert_eq!(breakdown.clean_penalty, 10.0);
        // 40 + 5 + 30 + 6 - 10
        assert!((breakdown.final_score - 71.0).abs() < 1e-9);

        let steps = breakdown.steps();
        assert_eq!(steps.len(), 8);
        assert_eq!(steps[6].title, "Special penalties");
        assert_eq!(steps[7].result, "71 / 100");
    }

    #[test]
    fn test_steps_without_penalties() {
        let breakdown = calculate_composite_score(
            &[],
            &vocab(Some(80.0)),
            &SyntacticComparison::default(),
            &errors(0.0, false),
            &EngineConfig::default(),
        );
        let steps = breakdown.steps();
        assert_eq!(steps.len(), 7);
        assert_eq!(steps[0].title, "RMS z-score");
        assert_eq!(steps[6].substitution.as_deref(), Some("93.0"));
    }
}
