//! Everything measured on one document

use crate::config::EngineConfig;
use crate::fingerprint::{extract_vocabulary_profile, VocabularyProfile};
use crate::lexicon::Lexicon;
use crate::mistakes::{analyze_style_patterns, detect_error_patterns, ErrorReport, StyleMarkers};
use crate::syntax::{analyze_sentence_structure, SentenceStructure};
use crate::text::{exclude_quoted_text, extract_metrics_with, TextMetrics};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Per-document analysis. Computed once and never mutated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentAnalysis {
    pub metrics: TextMetrics,
    /// Fingerprint of the text with quotations removed
    pub vocabulary: VocabularyProfile,
    pub structure: SentenceStructure,
    pub errors: ErrorReport,
    pub style: StyleMarkers,
}

impl DocumentAnalysis {
    pub fn word_count(&self) -> usize {
        self.metrics.vocabulary.total_words
    }
}

/// Run every extractor on `text`
pub fn analyze_document(text: &str, config: &EngineConfig, lexicon: &Lexicon) -> DocumentAnalysis {
    let analysis = DocumentAnalysis {
        metrics: extract_metrics_with(text, lexicon, &config.ngrams),
        vocabulary: extract_vocabulary_profile(&exclude_quoted_text(text), lexicon),
        structure: analyze_sentence_structure(text),
        errors: detect_error_patterns(text),
        style: analyze_style_patterns(text),
    };
    debug!(
        "Analysed document: {} words, {} sentences, cleanliness {:.0}",
        analysis.word_count(),
        analysis.metrics.sentences.len(),
        analysis.errors.cleanliness
    );
    analysis
}
