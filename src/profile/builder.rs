//! Baseline profile construction

use super::stats::{detect_outliers, MetricStatistics};
use super::{BaselineProfile, BaselineStrength, MetricKey, Reliability};
use crate::config::EngineConfig;
use crate::document::{analyze_document, DocumentAnalysis};
use crate::fingerprint::build_vocabulary_profile;
use crate::lexicon::Lexicon;
use crate::mistakes::{build_error_profile, ErrorReport};
use crate::syntax::{build_syntactic_profile, SentenceStructure};
use crate::text::exclude_quoted_text;
use rayon::prelude::*;
use std::collections::BTreeMap;
use tracing::{info, warn};

/// Build a profile from raw samples. Returns `None` when there are none.
///
/// Samples are analysed in parallel; aggregation then runs in sample
/// order.
pub fn build_profile<S: AsRef<str> + Sync>(
    samples: &[S],
    config: &EngineConfig,
    lexicon: &Lexicon,
) -> Option<BaselineProfile> {
    if samples.is_empty() {
        return None;
    }

    let analyses: Vec<DocumentAnalysis> = samples
        .par_iter()
        .map(|s| analyze_document(s.as_ref(), config, lexicon))
        .collect();

    let cleaned: Vec<String> = samples.iter().map(|s| exclude_quoted_text(s.as_ref())).collect();
    profile_from_analyses(&analyses, &cleaned, config, lexicon)
}

/// Aggregate analyses already computed for each sample
pub fn profile_from_analyses<S: AsRef<str>>(
    analyses: &[DocumentAnalysis],
    cleaned_texts: &[S],
    config: &EngineConfig,
    lexicon: &Lexicon,
) -> Option<BaselineProfile> {
    if analyses.is_empty() {
        return None;
    }

    let metrics: BTreeMap<MetricKey, MetricStatistics> = MetricKey::all()
        .iter()
        .map(|key| {
            let values: Vec<f64> = analyses.iter().map(|a| key.value(&a.metrics)).collect();
            (*key, MetricStatistics::from_values(&values))
        })
        .collect();

    let structures: Vec<SentenceStructure> = analyses.iter().map(|a| a.structure.clone()).collect();
    let reports: Vec<ErrorReport> = analyses.iter().map(|a| a.errors.clone()).collect();

    let vocabulary = build_vocabulary_profile(cleaned_texts, lexicon)?;
    let syntactic = build_syntactic_profile(&structures)?;
    let errors = build_error_profile(&reports, &config.errors)?;

    let reliability = reliability(analyses, &metrics, config);

    if !reliability.meets_minimum {
        warn!(
            "Baseline has {} sample(s); at least {} are needed for meaningful z-scores",
            reliability.sample_count, config.baseline.min_samples
        );
    }
    if !reliability.short_samples.is_empty() {
        warn!(
            "{} baseline sample(s) are shorter than {} words",
            reliability.short_samples.len(),
            config.baseline.min_words
        );
    }
    info!(
        "Built baseline profile from {} samples (confidence {:.0}, {} outliers)",
        reliability.sample_count, reliability.confidence_score, reliability.outlier_count
    );

    Some(BaselineProfile {
        metrics,
        vocabulary,
        syntactic,
        errors,
        reliability,
    })
}

fn reliability(
    analyses: &[DocumentAnalysis],
    metrics: &BTreeMap<MetricKey, MetricStatistics>,
    config: &EngineConfig,
) -> Reliability {
    let sample_count = analyses.len();
    let baseline = &config.baseline;

    let overall_variance = if metrics.is_empty() {
        0.0
    } else {
        metrics.values().map(MetricStatistics::relative_spread).sum::<f64>() / metrics.len() as f64
    };

    let word_counts = metrics
        .get(&MetricKey::TotalWords)
        .map(|s| s.values.clone())
        .unwrap_or_default();
    let outlier_indices = detect_outliers(
        &word_counts,
        baseline.outlier_method,
        baseline.outlier_min_samples,
        baseline.outlier_zscore,
    );
    let outlier_count = outlier_indices.len();

    let confidence_score =
        (100.0 - overall_variance * 10.0 - outlier_count as f64 * 5.0).clamp(0.0, 100.0);

    let short_samples = analyses
        .iter()
        .enumerate()
        .filter(|(_, a)| a.word_count() < baseline.min_words)
        .map(|(i, _)| i)
        .collect();

    let strength = if sample_count >= baseline.strong_samples {
        BaselineStrength::Strong
    } else if sample_count >= baseline.recommended_samples {
        BaselineStrength::Recommended
    } else if sample_count >= baseline.min_samples {
        BaselineStrength::Minimum
    } else {
        BaselineStrength::Insufficient
    };

    Reliability {
        sample_count,
        overall_variance,
        confidence_score,
        outlier_count,
        outlier_indices,
        short_samples,
        meets_minimum: sample_count >= baseline.min_samples,
        strength,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "The river runs past the old mill every spring. \
        Children gather on the bank to watch the water rise. \
        Some years it floods the lower field, and the farmers complain.";

    fn build(samples: &[&str]) -> Option<BaselineProfile> {
        build_profile(samples, &EngineConfig::default(), &Lexicon::standard())
    }

    #[test]
    fn test_no_samples() {
        assert!(build(&[]).is_none());
    }

    #[test]
    fn test_identical_samples_have_no_spread() {
        let profile = build(&[SAMPLE, SAMPLE, SAMPLE]).expect("profile");
        assert_eq!(profile.metrics.len(), MetricKey::all().len());
        for stats in profile.metrics.values() {
            assert_eq!(stats.std_dev, 0.0);
            assert_eq!(stats.count(), 3);
        }
        assert_eq!(profile.reliability.overall_variance, 0.0);
        assert_eq!(profile.reliability.confidence_score, 100.0);
        assert!(profile.reliability.meets_minimum);
        assert_eq!(profile.reliability.strength, BaselineStrength::Minimum);
        // every sample is under 100 words
        assert_eq!(profile.reliability.short_samples, vec![0, 1, 2]);
    }

    #[test]
    fn test_single_sample_is_insufficient() {
        let profile = build(&[SAMPLE]).expect("profile");
        assert!(!profile.reliability.meets_minimum);
        assert_eq!(profile.reliability.strength, BaselineStrength::Insufficient);
        assert!(profile.reliability.outlier_indices.is_empty());
    }

    #[test]
    fn test_word_count_outlier_lowers_confidence() {
        let long = SAMPLE.repeat(12);
        let samples = vec![SAMPLE.to_string(), SAMPLE.to_string(), SAMPLE.to_string(), SAMPLE.to_string(), long];
        let profile = build_profile(&samples, &EngineConfig::default(), &Lexicon::standard()).expect("profile");
        assert_eq!(profile.reliability.outlier_indices, vec![4]);
        assert!(profile.reliability.confidence_score < 100.0);
    }

    #[test]
    fn test_sample_order_is_preserved() {
        let short = "One two three.";
        let profile = build(&[short, SAMPLE]).expect("profile");
        let words = &profile.metrics[&MetricKey::TotalWords].values;
        assert_eq!(words[0], 3.0);
        assert!(words[1] > 3.0);
    }
}
