//! Informality markers and formality score

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

const CONTRACTIONS: &[&str] = &[
    "i'm", "you're", "he's", "she's", "it's", "we're", "they're", "i've", "you've", "we've",
    "they've", "i'd", "you'd", "he'd", "she'd", "we'd", "they'd", "i'll", "you'll", "he'll",
    "she'll", "we'll", "they'll", "isn't", "aren't", "wasn't", "weren't", "hasn't", "haven't",
    "hadn't", "won't", "wouldn't", "don't", "doesn't", "didn't", "can't", "couldn't",
    "shouldn't", "mustn't", "let's", "that's", "who's", "what's", "here's", "there's", "where's",
];

struct StylePatterns {
    word: Regex,
    contraction: Regex,
    first_person: Regex,
    second_person: Regex,
    colloquial: Regex,
}

static STYLE_PATTERNS: OnceLock<StylePatterns> = OnceLock::new();

fn style_patterns() -> &'static StylePatterns {
    STYLE_PATTERNS.get_or_init(|| {
        let alternatives = CONTRACTIONS
            .iter()
            .map(|c| regex::escape(c).replace('\'', "['’]"))
            .collect::<Vec<_>>()
            .join("|");
        StylePatterns {
            word: Regex::new(r"\b\w+\b").expect("valid regex"),
            contraction: Regex::new(&format!(r"(?i)\b(?:{alternatives})\b")).expect("valid regex"),
            first_person: Regex::new(r"(?i)\b(i|me|my|mine|we|us|our|ours)\b").expect("valid regex"),
            second_person: Regex::new(r"(?i)\b(you|your|yours)\b").expect("valid regex"),
            colloquial: Regex::new(r"(?i)\b(gonna|wanna|gotta|kinda|sorta|yeah|yep|nope|ok|okay)\b")
                .expect("valid regex"),
        }
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StyleMarkers {
    pub contractions: usize,
    pub first_person: usize,
    pub second_person: usize,
    pub colloquial: usize,
    /// 0..=100, higher is more formal
    pub formality: f64,
}

impl Default for StyleMarkers {
    fn default() -> Self {
        Self {
            contractions: 0,
            first_person: 0,
            second_person: 0,
            colloquial: 0,
            formality: 100.0,
        }
    }
}

pub fn analyze_style_patterns(text: &str) -> StyleMarkers {
    let patterns = style_patterns();
    let word_count = patterns.word.find_iter(text).count();
    if word_count == 0 {
        return StyleMarkers::default();
    }

    let contractions = patterns.contraction.find_iter(text).count();
    let first_person = patterns.first_person.find_iter(text).count();
    let second_person = patterns.second_person.find_iter(text).count();
    let colloquial = patterns.colloquial.find_iter(text).count();

    let informal = 0.5 * contractions as f64
        + 2.0 * colloquial as f64
        + 0.3 * first_person as f64
        + 0.4 * second_person as f64;
    let informality = informal / word_count as f64 * 100.0;

    StyleMarkers {
        contractions,
        first_person,
        second_person,
        colloquial,
        formality: (100.0 - informality).clamp(0.0, 100.0),
    }
}
