//! Paragraph coherence and passive voice

use super::tokenize::{sentence_spans, words};
use crate::lexicon::Lexicon;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::OnceLock;

static PARAGRAPH_BREAK_RE: OnceLock<Regex> = OnceLock::new();
static PASSIVE_RE: OnceLock<Regex> = OnceLock::new();

/// Content words kept per paragraph for overlap checks
const CONTENT_WORDS_PER_PARAGRAPH: usize = 10;
const SHARED_WORD_WEIGHT: f64 = 20.0;
const TRANSITION_WEIGHT: f64 = 0.5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParagraphDetail {
    pub index: usize,
    pub sentence_count: usize,
    pub word_count: usize,
    /// First content words, in order of appearance
    pub content_words: Vec<String>,
    pub opening_words: String,
    /// First sentence begins with a connective
    pub has_transition: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParagraphAnalysis {
    pub count: usize,
    pub avg_sentences_per_paragraph: f64,
    pub avg_words_per_paragraph: f64,
    /// 0..=100
    pub coherence: f64,
    /// `100 - coherence` when there is more than one paragraph
    pub topic_shift: f64,
    /// Percent of paragraphs after the first that open with a transition
    pub transition_rate: f64,
    pub details: Vec<ParagraphDetail>,
}

pub fn analyze_paragraphs(text: &str, lexicon: &Lexicon) -> ParagraphAnalysis {
    let break_re = PARAGRAPH_BREAK_RE.get_or_init(|| Regex::new(r"\n\s*\n").expect("valid regex"));
    let paragraphs: Vec<&str> = break_re
        .split(text)
        .filter(|p| !p.trim().is_empty())
        .collect();
    if paragraphs.is_empty() {
        return ParagraphAnalysis::default();
    }

    let details: Vec<ParagraphDetail> = paragraphs
        .iter()
        .enumerate()
        .map(|(i, para)| paragraph_detail(i + 1, para, lexicon))
        .collect();

    let mut shared_total = 0usize;
    let mut transitions = 0usize;
    for pair in details.windows(2) {
        let previous: HashSet<&String> = pair[0].content_words.iter().collect();
        shared_total += pair[1]
            .content_words
            .iter()
            .filter(|w| previous.contains(w))
            .count();
        if pair[1].has_transition {
            transitions += 1;
        }
    }

    let gaps = details.len() - 1;
    let (avg_shared, transition_rate) = if gaps > 0 {
        (
            shared_total as f64 / gaps as f64,
            transitions as f64 / gaps as f64 * 100.0,
        )
    } else {
        (0.0, 0.0)
    };
    let coherence = (avg_shared * SHARED_WORD_WEIGHT + transition_rate * TRANSITION_WEIGHT).min(100.0);
    let topic_shift = if gaps > 0 { (100.0 - coherence).max(0.0) } else { 0.0 };

    let count = details.len();
    let total_sentences: usize = details.iter().map(|d| d.sentence_count).sum();
    let total_words: usize = details.iter().map(|d| d.word_count).sum();

    ParagraphAnalysis {
        count,
        avg_sentences_per_paragraph: total_sentences as f64 / count as f64,
        avg_words_per_paragraph: total_words as f64 / count as f64,
        coherence,
        topic_shift,
        transition_rate,
        details,
    }
}

fn paragraph_detail(index: usize, para: &str, lexicon: &Lexicon) -> ParagraphDetail {
    let spans = sentence_spans(para);
    let words = words(para);
    let content_words = words
        .iter()
        .filter(|w| w.chars().count() > 3 && !lexicon.is_high_frequency(w))
        .take(CONTENT_WORDS_PER_PARAGRAPH)
        .cloned()
        .collect();

    let first = spans.first().map(|s| s.trim()).unwrap_or("");
    let opening_words = first.split_whitespace().take(3).collect::<Vec<_>>().join(" ");
    let has_transition = lexicon.starts_with_connective(&first.to_lowercase());

    ParagraphDetail {
        index,
        sentence_count: spans.iter().filter(|s| !s.trim().is_empty()).count(),
        word_count: words.len(),
        content_words,
        opening_words,
        has_transition,
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PassiveVoice {
    pub count: usize,
    /// Passive constructions per 100 sentence spans
    pub ratio: f64,
}

/// Auxiliary followed by a past-participle-like word
pub fn analyze_passive(text: &str) -> PassiveVoice {
    let re = PASSIVE_RE.get_or_init(|| {
        Regex::new(
            r"(?i)\b(is|are|was|were|been|being|be)\s+(\w+ed|written|spoken|taken|given|made|done|seen|known|found|thought|begun|broken|chosen|driven|eaten|fallen|forgotten|frozen|gotten|grown|hidden|ridden|risen|shaken|stolen|thrown|worn)\b",
        )
        .expect("valid regex")
    });
    let count = re.find_iter(text).count();
    let sentences = sentence_spans(text).len();
    PassiveVoice {
        count,
        ratio: if sentences > 0 {
            count as f64 / sentences as f64 * 100.0
        } else {
            0.0
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_paragraph_has_no_shift() {
        let analysis = analyze_paragraphs("Gardens need water. Flowers need light.", &Lexicon::standard());
        assert_eq!(analysis.count, 1);
        assert_eq!(analysis.coherence, 0.0);
        assert_eq!(analysis.topic_shift, 0.0);
        assert_eq!(analysis.avg_sentences_per_paragraph, 2.0);
    }

    #[test]
    fn test_shared_words_and_transitions() {
        let text = "Gardens need water every morning.\n\n\
                    However, gardens also need sunlight and water.\n  \n\
                    Cooking dinner takes patience.";
        let analysis = analyze_paragraphs(text, &Lexicon::standard());
        assert_eq!(analysis.count, 3);
        // pair 1 shares gardens, need, water; pair 2 shares nothing
        // avg shared = 1.5, transitions = 1 of 2 → 50%
        assert!((analysis.transition_rate - 50.0).abs() < 1e-9);
        assert!((analysis.coherence - (1.5 * 20.0 + 50.0 * 0.5)).abs() < 1e-9);
        assert!((analysis.topic_shift - (100.0 - analysis.coherence)).abs() < 1e-9);
        assert!(analysis.details[1].has_transition);
        assert_eq!(analysis.details[1].opening_words, "However, gardens also");
    }

    #[test]
    fn test_empty_text() {
        assert_eq!(analyze_paragraphs("  \n\n ", &Lexicon::standard()), ParagraphAnalysis::default());
    }

    #[test]
    fn test_passive_ratio() {
        let passive = analyze_passive("The cake was eaten. The letter was written by her. We ran.");
        assert_eq!(passive.count, 2);
        assert!((passive.ratio - 200.0 / 3.0).abs() < 1e-9);
        assert_eq!(analyze_passive("").ratio, 0.0);
    }
}
