//! Word and phrase catalogs used by the extractors
//!
//! A [`Lexicon`] is immutable once built. The engine holds one behind an
//! `Arc`, so tests and callers can inject alternate catalogs.

mod catalog;

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::{Arc, OnceLock};

static STANDARD: OnceLock<Arc<Lexicon>> = OnceLock::new();

/// Discourse role of a connective word
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectiveCategory {
    Additive,
    Adversative,
    Causal,
    Temporal,
}

impl ConnectiveCategory {
    pub fn all() -> &'static [ConnectiveCategory] {
        &[
            ConnectiveCategory::Additive,
            ConnectiveCategory::Adversative,
            ConnectiveCategory::Causal,
            ConnectiveCategory::Temporal,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            ConnectiveCategory::Additive => "additive",
            ConnectiveCategory::Adversative => "adversative",
            ConnectiveCategory::Causal => "causal",
            ConnectiveCategory::Temporal => "temporal",
        }
    }
}

/// Catalog entry before compilation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhraseEntry {
    pub phrase: String,
    pub category: String,
    /// Severity weight, 1 to 3
    pub weight: u8,
    pub suggestion: String,
}

/// A compiled formulaic phrase
#[derive(Debug, Clone)]
pub struct FormulaicPhrase {
    pub entry: PhraseEntry,
    matcher: Regex,
}

impl FormulaicPhrase {
    pub fn count_in(&self, text: &str) -> usize {
        self.matcher.find_iter(text).count()
    }
}

/// A compiled connective word
#[derive(Debug, Clone)]
pub struct Connective {
    pub word: String,
    pub category: ConnectiveCategory,
    matcher: Regex,
}

impl Connective {
    pub fn count_in(&self, text: &str) -> usize {
        self.matcher.find_iter(text).count()
    }
}

/// Immutable word and phrase tables
#[derive(Debug, Clone)]
pub struct Lexicon {
    high_frequency: BTreeSet<String>,
    phrases: Vec<FormulaicPhrase>,
    connectives: Vec<Connective>,
    bigrams: Vec<String>,
    trigrams: Vec<String>,
}

impl Lexicon {
    /// Compile a lexicon from raw tables.
    pub fn new(
        high_frequency: impl IntoIterator<Item = String>,
        phrases: Vec<PhraseEntry>,
        connectives: Vec<(ConnectiveCategory, String)>,
        bigrams: Vec<String>,
        trigrams: Vec<String>,
    ) -> Result<Self, regex::Error> {
        let phrases = phrases
            .into_iter()
            .map(|entry| {
                let matcher = phrase_matcher(&entry.phrase)?;
                Ok(FormulaicPhrase { entry, matcher })
            })
            .collect::<Result<Vec<_>, regex::Error>>()?;

        let connectives = connectives
            .into_iter()
            .map(|(category, word)| {
                let matcher = Regex::new(&format!(r"(?i)\b{}\b", regex::escape(&word)))?;
                Ok(Connective {
                    word,
                    category,
                    matcher,
                })
            })
            .collect::<Result<Vec<_>, regex::Error>>()?;

        Ok(Self {
            high_frequency: high_frequency
                .into_iter()
                .map(|w| w.to_lowercase())
                .collect(),
            phrases,
            connectives,
            bigrams,
            trigrams,
        })
    }

    /// The built-in English lexicon
    pub fn standard() -> Arc<Lexicon> {
        STANDARD
            .get_or_init(|| {
                let phrases = catalog::FORMULAIC_PHRASES
                    .iter()
                    .map(|(phrase, category, weight, suggestion)| PhraseEntry {
                        phrase: phrase.to_string(),
                        category: category.to_string(),
                        weight: *weight,
                        suggestion: suggestion.to_string(),
                    })
                    .collect();
                let connectives = catalog::CONNECTIVES
                    .iter()
                    .flat_map(|(category, words)| {
                        words.iter().map(move |w| (*category, w.to_string()))
                    })
                    .collect();
                let lexicon = Lexicon::new(
                    catalog::HIGH_FREQUENCY_WORDS.iter().map(|w| w.to_string()),
                    phrases,
                    connectives,
                    catalog::FORMULAIC_BIGRAMS.iter().map(|s| s.to_string()).collect(),
                    catalog::FORMULAIC_TRIGRAMS.iter().map(|s| s.to_string()).collect(),
                )
                .expect("valid regex");
                Arc::new(lexicon)
            })
            .clone()
    }

    pub fn is_high_frequency(&self, word: &str) -> bool {
        self.high_frequency.contains(word)
    }

    /// High-frequency words in lexicographic order
    pub fn high_frequency_words(&self) -> impl Iterator<Item = &str> {
        self.high_frequency.iter().map(String::as_str)
    }

    pub fn phrases(&self) -> &[FormulaicPhrase] {
        &self.phrases
    }

    pub fn connectives(&self) -> &[Connective] {
        &self.connectives
    }

    /// Whether a lowercased sentence starts with a connective followed by
    /// a space or comma
    pub fn starts_with_connective(&self, sentence: &str) -> bool {
        self.connectives.iter().any(|c| {
            sentence
                .strip_prefix(c.word.as_str())
                .is_some_and(|rest| rest.starts_with(' ') || rest.starts_with(','))
        })
    }

    pub fn bigrams(&self) -> &[String] {
        &self.bigrams
    }

    pub fn trigrams(&self) -> &[String] {
        &self.trigrams
    }
}

/// Multi-word phrases match exactly; single words also match the
/// -s / -d / -ed / -ing variants.
fn phrase_matcher(phrase: &str) -> Result<Regex, regex::Error> {
    let escaped = regex::escape(phrase);
    if phrase.contains(' ') {
        Regex::new(&format!(r"(?i)\b{}\b", escaped))
    } else {
        Regex::new(&format!(r"(?i)\b{}(?:s|d|ed|ing)?\b", escaped))
    }
}
