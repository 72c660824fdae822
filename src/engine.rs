//! Analysis orchestrator
//!
//! [`StyleEngine`] owns the configuration and lexicon and runs the full
//! pipeline: per-document extraction, baseline profiling, comparison,
//! scoring and flagging. A comparison either returns a complete
//! [`ComparisonResult`] or an error; nothing partial escapes.

use crate::config::{EngineConfig, SignificanceLevels};
use crate::document::{analyze_document, DocumentAnalysis};
use crate::error::{AnalysisError, AnalysisResult};
use crate::fingerprint::{compare_vocabulary_profiles, vocabulary_overlap, VocabularyComparison};
use crate::lexicon::Lexicon;
use crate::mistakes::{compare_error_profiles, ErrorComparison};
use crate::profile::{build_profile, BaselineProfile, MetricKey};
use crate::scoring::{
    calculate_composite_score, calculate_metric_deviations, explain_deviation, explain_document_metric,
    generate_style_change_flags, CompositeBreakdown, Deviation, Step, StyleChangeFlag,
};
use crate::syntax::{compare_syntactic_profiles, SyntacticComparison};
use serde::{Deserialize, Serialize};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use tracing::{error, info};

/// Full output of one comparison run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub profile: BaselineProfile,
    pub current: DocumentAnalysis,
    pub vocabulary: VocabularyComparison,
    /// Percent of the document's content words seen anywhere in the baseline
    pub vocabulary_coverage: f64,
    pub syntax: SyntacticComparison,
    pub errors: ErrorComparison,
    pub deviations: Vec<Deviation>,
    pub composite: CompositeBreakdown,
    pub flags: Vec<StyleChangeFlag>,
    pub significance: SignificanceLevels,
}

impl ComparisonResult {
    /// 0..=100
    pub fn consistency_score(&self) -> f64 {
        self.composite.final_score
    }

    pub fn deviation(&self, key: MetricKey) -> Option<&Deviation> {
        self.deviations.iter().find(|d| d.key == key)
    }

    /// Z-score trace for one metric. `None` for metrics not scored.
    pub fn explain_metric(&self, key: MetricKey) -> Option<Vec<Step>> {
        let deviation = self.deviation(key)?;
        let values = self
            .profile
            .metric(key)
            .map(|s| s.values.as_slice())
            .unwrap_or_default();
        Some(explain_deviation(deviation, values, &self.significance))
    }

    pub fn explain_composite(&self) -> Vec<Step> {
        self.composite.steps()
    }
}

pub struct StyleEngine {
    config: EngineConfig,
    lexicon: Arc<Lexicon>,
}

impl Default for StyleEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl StyleEngine {
    /// Engine with the built-in lexicon
    pub fn new(config: EngineConfig) -> Self {
        Self::with_lexicon(config, Lexicon::standard())
    }

    pub fn with_lexicon(config: EngineConfig, lexicon: Arc<Lexicon>) -> Self {
        Self { config, lexicon }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Analyse a single document
    pub fn analyze(&self, text: &str) -> DocumentAnalysis {
        analyze_document(text, &self.config, &self.lexicon)
    }

    /// Trace of a single-document metric
    pub fn explain_document_metric(&self, key: MetricKey, analysis: &DocumentAnalysis) -> Option<Vec<Step>> {
        explain_document_metric(key, &analysis.metrics, &self.config.ngrams, &self.lexicon)
    }

    /// Baseline profile, or `None` for an empty sample set
    pub fn build_profile<S: AsRef<str> + Sync>(&self, samples: &[S]) -> Option<BaselineProfile> {
        build_profile(samples, &self.config, &self.lexicon)
    }

    /// Build a profile from `samples` and score `text` against it
    pub fn compare<S: AsRef<str> + Sync>(&self, samples: &[S], text: &str) -> AnalysisResult<ComparisonResult> {
        if samples.is_empty() {
            return Err(AnalysisError::NoBaselineSamples);
        }
        if text.trim().is_empty() {
            return Err(AnalysisError::EmptyComparisonText);
        }

        guarded(|| {
            let profile = self.build_profile(samples).ok_or(AnalysisError::AnalysisFailed)?;
            let coverage = vocabulary_overlap(samples, text, &self.lexicon);
            Ok(self.score(profile, text, coverage))
        })
    }

    /// Score `text` against a profile built earlier
    pub fn compare_with_profile(&self, profile: BaselineProfile, text: &str) -> AnalysisResult<ComparisonResult> {
        if text.trim().is_empty() {
            return Err(AnalysisError::EmptyComparisonText);
        }
        guarded(|| Ok(self.score(profile, text, 0.0)))
    }

    fn score(&self, profile: BaselineProfile, text: &str, vocabulary_coverage: f64) -> ComparisonResult {
        let config = &self.config;
        let current = self.analyze(text);

        let vocabulary = compare_vocabulary_profiles(&profile.vocabulary, &current.vocabulary, &self.lexicon);
        let syntax = compare_syntactic_profiles(&profile.syntactic, &current.structure);
        let errors = compare_error_profiles(&profile.errors, &current.errors, &config.errors);
        let deviations = calculate_metric_deviations(&profile, &current.metrics, &config.significance);
        let composite = calculate_composite_score(&deviations, &vocabulary, &syntax, &errors, config);
        let flags = generate_style_change_flags(&deviations, &vocabulary, &syntax, &errors, &config.flags);

        info!(
            "Consistency score {:.1} against {} samples ({} flags)",
            composite.final_score,
            profile.sample_count(),
            flags.len()
        );

        ComparisonResult {
            profile,
            current,
            vocabulary,
            vocabulary_coverage,
            syntax,
            errors,
            deviations,
            composite,
            flags,
            significance: config.significance.clone(),
        }
    }
}

/// Run `f`, turning a panic into [`AnalysisError::AnalysisFailed`]
fn guarded<T>(f: impl FnOnce() -> AnalysisResult<T>) -> AnalysisResult<T> {
    match catch_unwind(AssertUnwindSafe(f)) {
        Ok(result) => result,
        Err(payload) => {
            let detail = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            error!("Analysis failed: {}", detail);
            Err(AnalysisError::AnalysisFailed)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_inputs_are_rejected() {
        let engine = StyleEngine::default();
        let none: [&str; 0] = [];
        assert!(matches!(
            engine.compare(&none, "Some text."),
            Err(AnalysisError::NoBaselineSamples)
        ));
        assert!(matches!(
            engine.compare(&["A sample."], "  "),
            Err(AnalysisError::EmptyComparisonText)
        ));
        assert!(engine.build_profile(&none).is_none());
    }

    #[test]
    fn test_guarded_maps_panics() {
        let result: AnalysisResult<()> = guarded(|| panic!("boom"));
        assert!(matches!(result, Err(AnalysisError::AnalysisFailed)));
        assert_eq!(guarded(|| Ok(3)).ok(), Some(3));
    }

    #[test]
    fn test_explain_metric_only_for_scored_keys() {
        let engine = StyleEngine::default();
        let sample = "The river runs past the mill. Children watch the water rise.";
        let result = engine.compare(&[sample, sample, sample], sample).expect("comparison");
        assert!(result.explain_metric(MetricKey::Grade).is_some());
        assert!(result.explain_metric(MetricKey::TotalWords).is_none());
        assert_eq!(result.explain_composite().last().map(|s| s.title.as_str()), Some("Final consistency score"));
    }
}
