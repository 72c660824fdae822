//! Text metrics extraction
//!
//! Every function here is total: empty or malformed input yields zeroed
//! structures, never an error. Vocabulary, register, passive voice,
//! connectives and n-grams are measured on the text with quotations
//! removed. Sentence structure, readability, variation and paragraphs use
//! the original text, since a quotation still occupies a sentence slot.

pub mod ngram;
pub mod paragraphs;
pub mod readability;
pub mod register;
pub mod tokenize;
pub mod vocabulary;

pub use ngram::{NgramAnalysis, NgramCount, NgramOrderStats};
pub use paragraphs::{ParagraphAnalysis, ParagraphDetail, PassiveVoice};
pub use readability::{Readability, SentenceStats};
pub use register::{ConnectiveAnalysis, ConnectiveCount, PhraseMatch, RegisterAnalysis, SeverityCounts};
pub use tokenize::{count_syllables, exclude_quoted_text, words, SentenceDetail};
pub use vocabulary::VocabularyStats;

use crate::config::NgramConfig;
use crate::lexicon::Lexicon;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Everything measured on a single document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextMetrics {
    pub sentences: Vec<SentenceDetail>,
    pub sentence_stats: SentenceStats,
    pub vocabulary: VocabularyStats,
    pub readability: Readability,
    pub connectives: ConnectiveAnalysis,
    pub register: RegisterAnalysis,
    /// Sentence-length coefficient of variation, percent
    pub sentence_variation: f64,
    pub passive: PassiveVoice,
    pub ngrams: NgramAnalysis,
    pub paragraphs: ParagraphAnalysis,
}

/// Extract metrics with the built-in lexicon and default n-gram settings
pub fn extract_metrics(text: &str) -> TextMetrics {
    extract_metrics_with(text, &Lexicon::standard(), &NgramConfig::default())
}

pub fn extract_metrics_with(text: &str, lexicon: &Lexicon, ngrams: &NgramConfig) -> TextMetrics {
    let clean = tokenize::exclude_quoted_text(text);
    let clean_words = tokenize::words(&clean);

    let vocabulary = vocabulary::vocabulary_stats(&clean_words, lexicon, ngrams.msttr_segment);
    let register = register::analyze_register(&clean, lexicon);
    let passive = paragraphs::analyze_passive(&clean);
    let connectives = register::analyze_connectives(&clean, lexicon);
    let ngram_analysis = ngram::analyze_ngrams(&clean_words, lexicon, ngrams);

    let sentences = tokenize::analyze_sentences(text);
    let sentence_stats = readability::sentence_stats(&sentences);
    let readability = readability::readability(&sentences);
    let sentence_variation = readability::sentence_variation(&sentences);
    let paragraphs = paragraphs::analyze_paragraphs(text, lexicon);

    debug!(
        words = vocabulary.total_words,
        sentences = sentences.len(),
        grade = readability.grade,
        "Extracted text metrics"
    );

    TextMetrics {
        sentences,
        sentence_stats,
        vocabulary,
        readability,
        connectives,
        register,
        sentence_variation,
        passive,
        ngrams: ngram_analysis,
        paragraphs,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_is_zeroed() {
        let metrics = extract_metrics("");
        assert_eq!(metrics.vocabulary.total_words, 0);
        assert_eq!(metrics.readability.grade, 0.0);
        assert_eq!(metrics.sentence_variation, 0.0);
        assert!(metrics.sentences.is_empty());
        assert_eq!(metrics.paragraphs.count, 0);

        let whitespace = extract_metrics("   \n\t  ");
        assert_eq!(whitespace.vocabulary.total_words, 0);
        assert_eq!(whitespace.ngrams.predictability, 0.0);
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let text = "Moreover, the results were given to the board. It is important to note \
                    that one of the members disagreed.\n\nHowever, the board voted anyway.";
        assert_eq!(extract_metrics(text), extract_metrics(text));
    }

    #[test]
    fn test_repeated_short_sentences() {
        let metrics = extract_metrics("The cat sat. The cat sat. The cat sat.");
        assert_eq!(metrics.sentence_variation, 0.0);
        assert_eq!(metrics.vocabulary.total_words, 9);
        assert_eq!(metrics.vocabulary.unique_words, 3);
        assert!((metrics.vocabulary.msttr - metrics.vocabulary.ttr).abs() < 1e-12);
    }

    #[test]
    fn test_quoted_text_excluded_from_register_only() {
        let metrics = extract_metrics("She said \"we must delve into this\" and left.");
        assert!(metrics.register.phrases.is_empty());
        // Sentence analysis still sees the quoted words
        assert_eq!(metrics.sentences[0].word_count, 9);
        assert_eq!(metrics.vocabulary.total_words, 4);
    }
}
