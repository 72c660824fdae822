//! Sentence opening, clause marker and punctuation rule tables

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// How a sentence begins
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpeningCategory {
    Subject,
    Conjunction,
    Adverb,
    Prepositional,
    Subordinate,
    Interrogative,
    Infinitive,
    Participial,
    Other,
}

impl OpeningCategory {
    pub fn all() -> &'static [OpeningCategory] {
        &[
            OpeningCategory::Subject,
            OpeningCategory::Conjunction,
            OpeningCategory::Adverb,
            OpeningCategory::Prepositional,
            OpeningCategory::Subordinate,
            OpeningCategory::Interrogative,
            OpeningCategory::Infinitive,
            OpeningCategory::Participial,
            OpeningCategory::Other,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            OpeningCategory::Subject => "Subject",
            OpeningCategory::Conjunction => "Conjunction",
            OpeningCategory::Adverb => "Adverb",
            OpeningCategory::Prepositional => "Prepositional",
            OpeningCategory::Subordinate => "Subordinate",
            OpeningCategory::Interrogative => "Interrogative",
            OpeningCategory::Infinitive => "Infinitive",
            OpeningCategory::Participial => "Participial",
            OpeningCategory::Other => "Other",
        }
    }
}

/// Punctuation tracked for density
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PunctuationMark {
    Semicolon,
    Colon,
    Dash,
    Parenthetical,
    Comma,
}

impl PunctuationMark {
    pub fn all() -> &'static [PunctuationMark] {
        &[
            PunctuationMark::Semicolon,
            PunctuationMark::Colon,
            PunctuationMark::Dash,
            PunctuationMark::Parenthetical,
            PunctuationMark::Comma,
        ]
    }

    pub fn weight(&self) -> f64 {
        match self {
            PunctuationMark::Semicolon => 2.0,
            PunctuationMark::Colon => 1.0,
            PunctuationMark::Dash => 1.0,
            PunctuationMark::Parenthetical => 1.0,
            PunctuationMark::Comma => 0.5,
        }
    }

    pub fn count_in(&self, text: &str) -> usize {
        match self {
            PunctuationMark::Semicolon => text.matches(';').count(),
            // A "::" run counts once
            PunctuationMark::Colon => {
                let mut previous = None;
                let mut count = 0;
                for c in text.chars() {
                    if c == ':' && previous != Some(':') {
                        count += 1;
                    }
                    previous = Some(c);
                }
                count
            }
            PunctuationMark::Dash => dash_re().find_iter(text).count(),
            PunctuationMark::Parenthetical => parenthetical_re().find_iter(text).count(),
            PunctuationMark::Comma => text.matches(',').count(),
        }
    }
}

struct OpeningRule {
    category: OpeningCategory,
    pattern: Regex,
}

struct ClauseMarker {
    subordinating: bool,
    pattern: Regex,
}

static OPENING_RULES: OnceLock<Vec<OpeningRule>> = OnceLock::new();
static CLAUSE_MARKERS: OnceLock<Vec<ClauseMarker>> = OnceLock::new();
static DASH_RE: OnceLock<Regex> = OnceLock::new();
static PARENTHETICAL_RE: OnceLock<Regex> = OnceLock::new();

const COORDINATING: &[&str] = &["and", "but", "or", "so", "yet", "nor", "for"];

const SUBORDINATING: &[&str] = &[
    "because", "since", "as", "although", "though", "even though", "while", "whereas",
    "if", "unless", "until", "when", "whenever", "where", "wherever", "after", "before",
    "that", "which", "who",
];

/// Rules in priority order; the first match wins
fn opening_rules() -> &'static Vec<OpeningRule> {
    OPENING_RULES.get_or_init(|| {
        let rule = |category, pattern: &str| OpeningRule {
            category,
            pattern: Regex::new(pattern).expect("valid regex"),
        };
        vec![
            rule(
                OpeningCategory::Subject,
                r"(?i)^(i|we|he|she|it|they|the|this|that|these|those|many|some|most|all|each|every|any|a|an)\b",
            ),
            rule(OpeningCategory::Conjunction, r"(?i)^(and|but|or|so|yet|nor|for)\b"),
            rule(
                OpeningCategory::Adverb,
                r"(?i)^(however|therefore|moreover|furthermore|additionally|consequently|thus|hence|nevertheless|meanwhile|likewise|similarly|indeed|certainly|clearly|obviously|perhaps|possibly|probably|unfortunately|fortunately|interestingly|surprisingly|notably|specifically|particularly|especially)\b",
            ),
            rule(
                OpeningCategory::Prepositional,
                r"(?i)^(in|on|at|by|with|from|to|for|of|about|after|before|during|through|under|over|between|among|across|along|around|near|beyond)\b",
            ),
            rule(
                OpeningCategory::Subordinate,
                r"(?i)^(although|though|even though|whereas|while|whilst|because|since|as|if|unless|until|when|whenever|where|wherever|after|before)\b",
            ),
            rule(
                OpeningCategory::Interrogative,
                r"(?i)^(who|what|when|where|why|how|which|whose|whom)\b",
            ),
            rule(OpeningCategory::Infinitive, r"(?i)^(to\s+[a-z]+)\b"),
            rule(OpeningCategory::Participial, r"(?i)^([a-z]+ing|[a-z]+ed)\s"),
        ]
    })
}

fn clause_markers() -> &'static Vec<ClauseMarker> {
    CLAUSE_MARKERS.get_or_init(|| {
        let marker = |word: &str, subordinating| ClauseMarker {
            subordinating,
            pattern: Regex::new(&format!(r"(?i)\b{}\b", regex::escape(word))).expect("valid regex"),
        };
        COORDINATING
            .iter()
            .map(|w| marker(w, false))
            .chain(SUBORDINATING.iter().map(|w| marker(w, true)))
            .collect()
    })
}

fn dash_re() -> &'static Regex {
    DASH_RE.get_or_init(|| Regex::new(r"—|--").expect("valid regex"))
}

fn parenthetical_re() -> &'static Regex {
    PARENTHETICAL_RE.get_or_init(|| Regex::new(r"\([^)]+\)").expect("valid regex"))
}

/// Category of a trimmed sentence
pub fn classify_opening(sentence: &str) -> OpeningCategory {
    opening_rules()
        .iter()
        .find(|rule| rule.pattern.is_match(sentence))
        .map(|rule| rule.category)
        .unwrap_or(OpeningCategory::Other)
}

/// Clause estimate: 1 plus each marker occurrence plus each semicolon.
/// Returns the count and whether a subordinating marker was seen.
pub fn count_clauses(sentence: &str) -> (usize, bool) {
    let mut clauses = 1;
    let mut has_subordinating = false;
    for marker in clause_markers() {
        let hits = marker.pattern.find_iter(sentence).count();
        clauses += hits;
        if marker.subordinating && hits > 0 {
            has_subordinating = true;
        }
    }
    clauses += sentence.matches(';').count();
    (clauses, has_subordinating)
}

/// Per-sentence complexity, 0..=10
pub fn sentence_complexity(sentence: &str, clauses: usize, has_subordinating: bool) -> f64 {
    let mut score = (clauses * 2).min(6);
    if has_subordinating {
        score += 2;
    }
    let marks = sentence.chars().filter(|c| matches!(c, ';' | ':' | '—')).count();
    score += marks.min(2);
    score.min(10) as f64
}
