//! Word, sentence and syllable segmentation plus quoted-text exclusion

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

static WORD_RE: OnceLock<Regex> = OnceLock::new();
static SENTENCE_RE: OnceLock<Regex> = OnceLock::new();
static DOUBLE_QUOTED_RE: OnceLock<Regex> = OnceLock::new();
static SYLLABLE_SUFFIX_RE: OnceLock<Regex> = OnceLock::new();
static VOWEL_GROUP_RE: OnceLock<Regex> = OnceLock::new();

fn word_re() -> &'static Regex {
    WORD_RE.get_or_init(|| Regex::new(r"(?i)[a-z]+(?:['’][a-z]+)?").expect("valid regex"))
}

fn sentence_re() -> &'static Regex {
    SENTENCE_RE.get_or_init(|| Regex::new(r"[^.!?]+[.!?]+|[^.!?]+$").expect("valid regex"))
}

/// Lowercased words: letter runs with an optional internal apostrophe
pub fn words(text: &str) -> Vec<String> {
    word_re()
        .find_iter(text)
        .map(|m| m.as_str().to_lowercase())
        .collect()
}

/// Number of words without allocating them
pub fn word_count(text: &str) -> usize {
    word_re().find_iter(text).count()
}

/// Raw sentence spans: runs ended by `.`, `!` or `?`, plus any trailing
/// unterminated content. Spans are not trimmed and may hold no words.
pub fn sentence_spans(text: &str) -> Vec<&str> {
    sentence_re().find_iter(text).map(|m| m.as_str()).collect()
}

/// One sentence with its word and syllable counts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentenceDetail {
    /// 1-based position among all raw spans
    pub index: usize,
    pub text: String,
    pub word_count: usize,
    pub syllable_count: usize,
}

/// Sentences that contain at least one word
pub fn analyze_sentences(text: &str) -> Vec<SentenceDetail> {
    sentence_spans(text)
        .into_iter()
        .enumerate()
        .filter_map(|(i, span)| {
            let trimmed = span.trim();
            let words = words(trimmed);
            if words.is_empty() {
                return None;
            }
            Some(SentenceDetail {
                index: i + 1,
                text: trimmed.to_string(),
                word_count: words.len(),
                syllable_count: words.iter().map(|w| count_syllables(w)).sum(),
            })
        })
        .collect()
}

/// Heuristic English syllable count, minimum 1
pub fn count_syllables(word: &str) -> usize {
    let letters: String = word
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase())
        .collect();
    if letters.len() <= 3 {
        return 1;
    }

    let suffix_re = SYLLABLE_SUFFIX_RE
        .get_or_init(|| Regex::new(r"(?:[^laeiouy]es|ed|[^laeiouy]e)$").expect("valid regex"));
    let stripped = suffix_re.replace(&letters, "");
    let stripped = stripped.strip_prefix('y').unwrap_or(&stripped);

    let vowel_re = VOWEL_GROUP_RE.get_or_init(|| Regex::new(r"[aeiouy]{1,2}").expect("valid regex"));
    vowel_re.find_iter(stripped).count().max(1)
}

/// Replace quoted material with a single space.
///
/// Curly quotes are normalised first. Double-quoted spans are always
/// removed; single-quoted spans only when they open after whitespace,
/// punctuation or the start of text and close before whitespace,
/// punctuation or the end, which leaves contractions and possessives alone.
pub fn exclude_quoted_text(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let normalized: String = text
        .chars()
        .map(|c| match c {
            '\u{201C}' | '\u{201D}' => '"',
            '\u{2018}' | '\u{2019}' => '\'',
            other => other,
        })
        .collect();

    let double_re = DOUBLE_QUOTED_RE.get_or_init(|| Regex::new(r#""[^"]*""#).expect("valid regex"));
    let without_double = double_re.replace_all(&normalized, " ");

    strip_single_quoted(&without_double)
}

fn opens_quote(c: char) -> bool {
    c.is_whitespace() || matches!(c, ',' | '.' | ':' | ';' | '!' | '?' | '(')
}

fn closes_quote(c: char) -> bool {
    c.is_whitespace() || matches!(c, ',' | '.' | ':' | ';' | '!' | '?' | ')')
}

fn strip_single_quoted(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;

    while i < chars.len() {
        let opening = if i == 0 && chars[0] == '\'' {
            Some((None, 0))
        } else if opens_quote(chars[i]) && chars.get(i + 1) == Some(&'\'') {
            Some((Some(chars[i]), i + 1))
        } else {
            None
        };

        if let Some((prefix, quote_at)) = opening {
            let close = chars[quote_at + 1..]
                .iter()
                .position(|&c| c == '\'')
                .map(|offset| quote_at + 1 + offset);
            if let Some(close) = close {
                let follows_ok = chars.get(close + 1).map_or(true, |&c| closes_quote(c));
                if follows_ok {
                    if let Some(p) = prefix {
                        out.push(p);
                    }
                    out.push(' ');
                    i = close + 1;
                    continue;
                }
            }
        }

        out.push(chars[i]);
        i += 1;
    }

    out
}
