//! Library scenarios for the analysis engine
//!
//! Exercises the public API end to end: extraction, profiling, scoring
//! and flagging on small hand-written corpora.

use styleprint::config::{EngineConfig, OutlierMethod};
use styleprint::fingerprint::{compare_vocabulary_profiles, extract_vocabulary_profile};
use styleprint::lexicon::Lexicon;
use styleprint::profile::stats::{detect_outliers, z_score};
use styleprint::scoring::{decay_score, FlagKind};
use styleprint::{extract_metrics, AnalysisError, MetricKey, StyleEngine};

const PASSAGE: &str = "The harbour was quiet when we arrived on Tuesday. \
    Fishing boats rocked against the stone wall while gulls circled overhead. \
    My sister wanted to walk straight to the lighthouse, but I insisted on breakfast first. \
    We found a small cafe near the market. \
    The owner served thick toast with local honey and strong black coffee. \
    Afterwards we climbed the hill path and watched the tide come in.";

const SLOPPY_SAMPLES: [&str; 3] = [
    "I could of finished the report sooner. We should of asked for help before the deadline arrived. \
     Next time I would of planned the week better.",
    "The trip could of gone smoother. We should of booked the train earlier in the month. \
     The hotel was fine but the food could of been warmer.",
    "Our team could of won the match. The coach should of changed the lineup at half time. \
     Everyone agreed we would of played better with more rest.",
];

const CLEAN_TEXT: &str = "The committee reviewed the proposal carefully. \
    Members asked several questions about the budget. \
    The chair thanked everyone and closed the meeting.";

#[test]
fn test_extraction_is_deterministic() {
    let first = extract_metrics(PASSAGE);
    let second = extract_metrics(PASSAGE);
    assert_eq!(first, second);

    let engine = StyleEngine::default();
    assert_eq!(engine.analyze(PASSAGE), engine.analyze(PASSAGE));
}

#[test]
fn test_msttr_is_bounded() {
    let long_text = PASSAGE.repeat(4);
    for text in [PASSAGE, long_text.as_str(), "One.", ""] {
        let vocabulary = extract_metrics(text).vocabulary;
        assert!((0.0..=1.0).contains(&vocabulary.msttr), "msttr {}", vocabulary.msttr);
    }
}

#[test]
fn test_uniform_sentences_have_zero_variation() {
    let metrics = extract_metrics("The cat sat. The cat sat. The cat sat.");
    assert_eq!(metrics.sentences.len(), 3);
    assert_eq!(metrics.sentence_variation, 0.0);
    assert_eq!(metrics.vocabulary.total_words, 9);
    assert_eq!(metrics.vocabulary.unique_words, 3);
    // Under one segment, MSTTR falls back to the plain ratio
    assert_eq!(metrics.vocabulary.msttr, metrics.vocabulary.ttr);
    assert!((metrics.vocabulary.ttr - 1.0 / 3.0).abs() < 1e-9);
}

#[test]
fn test_z_score_symmetry() {
    for (mean, sd) in [(10.0, 2.0), (-3.5, 0.25), (100.0, 17.0)] {
        for k in [-2.5, -1.0, 0.0, 0.5, 3.0] {
            let z = z_score(mean + k * sd, mean, sd);
            assert!((z - k).abs() < 1e-9, "z={} k={}", z, k);
        }
    }
    assert_eq!(z_score(42.0, 10.0, 0.0), 0.0);
}

#[test]
fn test_metric_score_never_rises_with_deviation() {
    let mut previous = decay_score(0.0);
    assert_eq!(previous, 100.0);
    for step in 1..=50 {
        let score = decay_score(step as f64 * 0.1);
        assert!(score <= previous);
        previous = score;
    }
}

#[test]
fn test_self_overlap_is_perfect() {
    let lexicon = Lexicon::standard();
    let profile = extract_vocabulary_profile(PASSAGE, &lexicon);
    let comparison = compare_vocabulary_profiles(&profile, &profile, &lexicon);
    let overlap = comparison.overlap_score.expect("overlap");
    assert!((overlap - 100.0).abs() < 1e-9);
}

#[test]
fn test_outliers_need_four_samples() {
    let config = EngineConfig::default();
    let values = [1.0, 1.0, 500.0];
    for method in [OutlierMethod::Iqr, OutlierMethod::Zscore] {
        assert!(detect_outliers(&values, method, config.baseline.outlier_min_samples, 2.5).is_empty());
    }
    let values = [10.0, 11.0, 10.5, 9.8, 10.2, 400.0];
    assert_eq!(
        detect_outliers(&values, OutlierMethod::Iqr, config.baseline.outlier_min_samples, 2.5),
        vec![5]
    );
}

#[test]
fn test_consistent_document_scores_high() {
    let engine = StyleEngine::default();
    let samples = [PASSAGE, PASSAGE, PASSAGE];
    let result = engine.compare(&samples, PASSAGE).expect("comparison");

    assert!(result.deviations.iter().all(|d| d.z_score.abs() < 1.0));
    assert!(result.flags.is_empty(), "flags: {:?}", result.flags);
    assert!(result.consistency_score() >= 90.0);
    assert!(result.composite.interpretation().starts_with("Highly consistent"));
}

#[test]
fn test_identical_baseline_has_no_deviation() {
    let text = "Quantitative assessments frequently misrepresent nuanced outcomes. \
        We reviewed eleven districts carefully; teachers reported mixed, uneven results.";
    let engine = StyleEngine::default();
    let result = engine.compare(&[text, text, text], text).expect("comparison");

    for d in &result.deviations {
        assert_eq!(d.baseline_std_dev, 0.0, "{}", d.key);
        assert_eq!(d.baseline_mean, d.current_value, "{}", d.key);
        assert_eq!(d.z_score, 0.0, "{}", d.key);
    }
    assert!(result.flags.is_empty(), "flags: {:?}", result.flags);
    // Every component at 100 leaves only the unweighted remainder
    assert!((result.consistency_score() - 95.0).abs() < 1e-6, "score {}", result.consistency_score());
}

#[test]
fn test_similar_samples_score_high() {
    // Same author, different days: one word swapped per sample
    let thursday = PASSAGE.replace("Tuesday", "Thursday");
    let mossy = PASSAGE.replace("stone wall", "mossy wall");
    let monday = PASSAGE.replace("Tuesday", "Monday");
    let samples = [PASSAGE, thursday.as_str(), mossy.as_str()];

    let engine = StyleEngine::default();
    let result = engine.compare(&samples, &monday).expect("comparison");

    // "mossy" adds a syllable, so the grade has a real spread
    let grade = result
        .deviations
        .iter()
        .find(|d| d.key == MetricKey::Grade)
        .expect("grade deviation");
    assert!(grade.baseline_std_dev > 0.0);
    assert!(grade.z_score != 0.0);

    for d in &result.deviations {
        assert!(d.z_score.abs() < 1.0, "{} z={}", d.key, d.z_score);
    }
    assert!(result.flags.is_empty(), "flags: {:?}", result.flags);
    assert!(result.consistency_score() >= 90.0, "score {}", result.consistency_score());
}

#[test]
fn test_missing_habitual_error_is_suspicious() {
    let engine = StyleEngine::default();
    let result = engine.compare(&SLOPPY_SAMPLES, CLEAN_TEXT).expect("comparison");

    assert!(result.profile.errors.consistent_errors.contains(&"could-of".to_string()));
    assert!(result.profile.errors.avg_cleanliness < 75.0);
    assert!(result.errors.suspiciously_clean);
    assert_eq!(result.errors.missing_consistent_errors, vec!["could-of".to_string()]);
    assert!(result.flags.iter().any(|f| f.kind == FlagKind::SuspiciouslyClean));
    assert!(result.composite.error_score <= 85.0);
    assert!(result.composite.clean_penalty > 0.0);
}

#[test]
fn test_different_document_scores_lower() {
    let engine = StyleEngine::default();
    let consistent = engine.compare(&SLOPPY_SAMPLES, SLOPPY_SAMPLES[0]).expect("comparison");
    let shifted = engine.compare(&SLOPPY_SAMPLES, PASSAGE).expect("comparison");
    assert!(shifted.consistency_score() < consistent.consistency_score());
    assert!(shifted.vocabulary_coverage < consistent.vocabulary_coverage);
}

#[test]
fn test_comparison_covers_scored_metrics_in_order() {
    let engine = StyleEngine::default();
    let result = engine.compare(&SLOPPY_SAMPLES, CLEAN_TEXT).expect("comparison");
    let keys: Vec<MetricKey> = result.deviations.iter().map(|d| d.key).collect();
    assert_eq!(keys, MetricKey::deviation_keys().to_vec());
    for key in MetricKey::deviation_keys() {
        let steps = result.explain_metric(*key).expect("trace");
        assert_eq!(steps.len(), 5);
    }
}

#[test]
fn test_empty_inputs() {
    let engine = StyleEngine::default();
    let none: [&str; 0] = [];
    assert!(matches!(engine.compare(&none, PASSAGE), Err(AnalysisError::NoBaselineSamples)));
    assert!(matches!(engine.compare(&[PASSAGE], "\n\t "), Err(AnalysisError::EmptyComparisonText)));

    let empty = engine.analyze("");
    assert_eq!(empty.word_count(), 0);
    assert_eq!(empty.errors.cleanliness, 100.0);
}

#[test]
fn test_custom_thresholds_change_flags() {
    let mut config = EngineConfig::default();
    config.flags.vocabulary_overlap = 101.0;
    let engine = StyleEngine::new(config);
    let result = engine.compare(&[PASSAGE, PASSAGE], PASSAGE).expect("comparison");
    assert!(result.flags.iter().any(|f| f.kind == FlagKind::VocabularyShift));
}
