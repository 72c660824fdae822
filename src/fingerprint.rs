//! Vocabulary fingerprinting
//!
//! A profile captures what an author writes about (signature content
//! words) and how they write (function-word rates, word length, lexical
//! density, entropy). Baseline profiles pool word counts across every
//! sample before ranking, so one long sample does not get averaged away.

use crate::lexicon::Lexicon;
use crate::profile::stats::weighted_average;
use crate::text::tokenize::words;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashSet};

const SIGNATURE_WORD_LIMIT: usize = 20;
const NEW_WORD_LIMIT: usize = 10;
/// Baseline signature words checked for absence
const MISSING_CHECK_LIMIT: usize = 10;

const FUNCTION_WEIGHT: f64 = 0.7;
const CONTENT_WEIGHT: f64 = 0.3;
/// Function-word similarity when neither side uses any function word
const UNKNOWN_FUNCTION_SIMILARITY: f64 = 50.0;

/// Share of words by length, in percent
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WordLengthDistribution {
    /// Up to 4 letters
    pub short: f64,
    /// 5 to 7 letters
    pub medium: f64,
    /// 8 letters or more
    pub long: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignatureWord {
    pub word: String,
    pub frequency: usize,
    pub score: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VocabularyProfile {
    pub word_frequency: BTreeMap<String, usize>,
    /// Top content words by `tf × (1 + ln(count + 1))`
    pub signature_words: Vec<SignatureWord>,
    pub total_words: usize,
    pub unique_words: usize,
    pub avg_word_length: f64,
    /// Content words / total words, 0..=1
    pub lexical_density: f64,
    /// Shannon entropy of the word distribution, bits
    pub entropy: f64,
    pub word_lengths: WordLengthDistribution,
}

impl VocabularyProfile {
    fn signature_set(&self) -> BTreeSet<&str> {
        self.signature_words.iter().map(|s| s.word.as_str()).collect()
    }
}

fn is_content_word(word: &str, lexicon: &Lexicon) -> bool {
    word.chars().count() > 3 && !lexicon.is_high_frequency(word)
}

/// Profile a single document
pub fn extract_vocabulary_profile(text: &str, lexicon: &Lexicon) -> VocabularyProfile {
    profile_from_words(words(text), lexicon)
}

/// Profile several documents as one pooled frequency table.
/// Returns `None` when there are no documents.
pub fn build_vocabulary_profile<S: AsRef<str>>(texts: &[S], lexicon: &Lexicon) -> Option<VocabularyProfile> {
    if texts.is_empty() {
        return None;
    }
    let pooled = texts.iter().flat_map(|t| words(t.as_ref()));
    Some(profile_from_words(pooled, lexicon))
}

fn profile_from_words(words: impl IntoIterator<Item = String>, lexicon: &Lexicon) -> VocabularyProfile {
    let mut word_frequency: BTreeMap<String, usize> = BTreeMap::new();
    let mut total_words = 0usize;
    let mut total_length = 0usize;
    let mut content_words = 0usize;
    let (mut short, mut medium, mut long) = (0usize, 0usize, 0usize);

    for word in words {
        let len = word.chars().count();
        total_words += 1;
        total_length += len;
        match len {
            0..=4 => short += 1,
            5..=7 => medium += 1,
            _ => long += 1,
        }
        if is_content_word(&word, lexicon) {
            content_words += 1;
        }
        *word_frequency.entry(word).or_insert(0) += 1;
    }

    if total_words == 0 {
        return VocabularyProfile::default();
    }

    let total = total_words as f64;
    VocabularyProfile {
        signature_words: signature_words(&word_frequency, total_words, lexicon),
        entropy: entropy(&word_frequency, total_words),
        unique_words: word_frequency.len(),
        word_frequency,
        total_words,
        avg_word_length: total_length as f64 / total,
        lexical_density: content_words as f64 / total,
        word_lengths: WordLengthDistribution {
            short: short as f64 / total * 100.0,
            medium: medium as f64 / total * 100.0,
            long: long as f64 / total * 100.0,
        },
    }
}

/// Rank content words; ties break alphabetically
fn signature_words(
    frequency: &BTreeMap<String, usize>,
    total_words: usize,
    lexicon: &Lexicon,
) -> Vec<SignatureWord> {
    let mut ranked: Vec<SignatureWord> = frequency
        .iter()
        .filter(|(word, _)| is_content_word(word, lexicon))
        .map(|(word, &count)| {
            let tf = count as f64 / total_words as f64;
            SignatureWord {
                word: word.clone(),
                frequency: count,
                score: tf * (1.0 + ((count + 1) as f64).ln()),
            }
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.word.cmp(&b.word))
    });
    ranked.truncate(SIGNATURE_WORD_LIMIT);
    ranked
}

fn entropy(frequency: &BTreeMap<String, usize>, total_words: usize) -> f64 {
    frequency
        .values()
        .map(|&count| {
            let p = count as f64 / total_words as f64;
            -p * p.log2()
        })
        .sum()
}

/// How the current document's vocabulary relates to the baseline
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VocabularyComparison {
    /// `0.7 × function + 0.3 × content`; `None` when either side has no words
    pub overlap_score: Option<f64>,
    /// Symmetric signature-word overlap, 0..=100
    pub content_overlap: f64,
    /// Function-word rate similarity, 0..=100
    pub function_overlap: f64,
    /// Current signature words absent from the baseline signature
    pub new_words: Vec<String>,
    /// Top baseline signature words absent from the current signature
    pub missing_signature_words: Vec<String>,
    pub avg_word_length_diff: f64,
    pub lexical_density_diff: f64,
    pub entropy_diff: f64,
    /// Aggregate vocabulary shift, 0..=100 (higher means more change)
    pub style_shift: f64,
}

pub fn compare_vocabulary_profiles(
    baseline: &VocabularyProfile,
    current: &VocabularyProfile,
    lexicon: &Lexicon,
) -> VocabularyComparison {
    let baseline_sig = baseline.signature_set();
    let current_sig = current.signature_set();

    let content_overlap = content_overlap(&baseline_sig, &current_sig);
    let function_overlap = function_word_similarity(baseline, current, lexicon);
    let overlap_score = (baseline.total_words > 0 && current.total_words > 0)
        .then(|| function_overlap * FUNCTION_WEIGHT + content_overlap * CONTENT_WEIGHT);

    // Current signature keeps score order
    let new_words: Vec<String> = current
        .signature_words
        .iter()
        .filter(|s| !baseline_sig.contains(s.word.as_str()))
        .take(NEW_WORD_LIMIT)
        .map(|s| s.word.clone())
        .collect();
    let missing_signature_words: Vec<String> = baseline
        .signature_words
        .iter()
        .take(MISSING_CHECK_LIMIT)
        .filter(|s| !current_sig.contains(s.word.as_str()))
        .map(|s| s.word.clone())
        .collect();

    let avg_word_length_diff = current.avg_word_length - baseline.avg_word_length;
    let lexical_density_diff = current.lexical_density - baseline.lexical_density;
    let entropy_diff = current.entropy - baseline.entropy;

    let style_shift = style_shift_score(&ShiftInputs {
        overlap: overlap_score.unwrap_or(0.0),
        avg_word_length_diff,
        lexical_density_diff,
        entropy_diff,
        new_words: new_words.len(),
        missing_words: missing_signature_words.len(),
        current_total: current.total_words.max(1),
        baseline_total: baseline.total_words.max(1),
    });

    VocabularyComparison {
        overlap_score,
        content_overlap,
        function_overlap,
        new_words,
        missing_signature_words,
        avg_word_length_diff,
        lexical_density_diff,
        entropy_diff,
        style_shift,
    }
}

/// Average of the two coverage directions, so a growing vocabulary is
/// not penalised as heavily as a replaced one. Two empty signatures are
/// identical.
fn content_overlap(baseline: &BTreeSet<&str>, current: &BTreeSet<&str>) -> f64 {
    if baseline.is_empty() && current.is_empty() {
        return 100.0;
    }
    let shared = current.intersection(baseline).count() as f64;
    let coverage = |set: &BTreeSet<&str>| {
        if set.is_empty() {
            0.0
        } else {
            shared / set.len() as f64 * 100.0
        }
    };
    (coverage(current) + coverage(baseline)) / 2.0
}

/// Compare per-1000-word rates of each high-frequency word with a damped
/// ratio, weighting each word by `ln(total occurrences + 1)`.
fn function_word_similarity(baseline: &VocabularyProfile, current: &VocabularyProfile, lexicon: &Lexicon) -> f64 {
    let baseline_total = baseline.total_words.max(1) as f64;
    let current_total = current.total_words.max(1) as f64;

    let mut similarities = Vec::new();
    let mut weights = Vec::new();
    for word in lexicon.high_frequency_words() {
        let base_count = baseline.word_frequency.get(word).copied().unwrap_or(0);
        let curr_count = current.word_frequency.get(word).copied().unwrap_or(0);
        if base_count == 0 && curr_count == 0 {
            continue;
        }

        let base_rate = base_count as f64 / baseline_total * 1000.0;
        let curr_rate = curr_count as f64 / current_total * 1000.0;
        let damping = base_rate.max(curr_rate) * 0.5;
        let damping = if damping > 0.0 { damping } else { 1.0 };
        similarities.push(100.0 / (1.0 + (base_rate - curr_rate).abs() / damping));
        weights.push(((base_count + curr_count + 1) as f64).ln());
    }

    if similarities.is_empty() {
        UNKNOWN_FUNCTION_SIMILARITY
    } else {
        weighted_average(&similarities, &weights)
    }
}

struct ShiftInputs {
    overlap: f64,
    avg_word_length_diff: f64,
    lexical_density_diff: f64,
    entropy_diff: f64,
    new_words: usize,
    missing_words: usize,
    current_total: usize,
    baseline_total: usize,
}

fn style_shift_score(inputs: &ShiftInputs) -> f64 {
    let overlap_penalty = (100.0 - inputs.overlap).max(0.0);
    let length_penalty = inputs.avg_word_length_diff.abs() * 10.0;
    let density_penalty = inputs.lexical_density_diff.abs() * 100.0;
    let entropy_penalty = inputs.entropy_diff.abs() * 5.0;
    let new_penalty = inputs.new_words as f64 / inputs.current_total as f64 * 100.0 * 2.0;
    let missing_penalty = inputs.missing_words as f64 / inputs.baseline_total as f64 * 100.0 * 3.0;

    let total = overlap_penalty * 0.30
        + length_penalty * 0.15
        + density_penalty * 0.20
        + entropy_penalty * 0.15
        + new_penalty * 0.10
        + missing_penalty * 0.10;
    total.clamp(0.0, 100.0)
}

/// Percent of the document's distinct content words that appear anywhere
/// in the baseline texts.
pub fn vocabulary_overlap<S: AsRef<str>>(baseline_texts: &[S], text: &str, lexicon: &Lexicon) -> f64 {
    if baseline_texts.is_empty() || text.is_empty() {
        return 0.0;
    }

    let baseline: HashSet<String> = baseline_texts
        .iter()
        .flat_map(|t| words(t.as_ref()))
        .filter(|w| is_content_word(w, lexicon))
        .collect();
    let current: HashSet<String> = words(text)
        .into_iter()
        .filter(|w| is_content_word(w, lexicon))
        .collect();
    if current.is_empty() {
        return 0.0;
    }

    let shared = current.iter().filter(|w| baseline.contains(*w)).count();
    shared as f64 / current.len() as f64 * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    const GARDEN: &str = "The garden needs water every morning. Tomatoes grow quickly when \
                          the garden gets sunlight, and the gardener checks the tomatoes daily.";

    #[test]
    fn test_empty_profile() {
        let profile = extract_vocabulary_profile("", &Lexicon::standard());
        assert_eq!(profile, VocabularyProfile::default());
        let none: Vec<&str> = vec![];
        assert!(build_vocabulary_profile(&none, &Lexicon::standard()).is_none());
    }

    #[test]
    fn test_signature_words_ranked() {
        let profile = extract_vocabulary_profile(GARDEN, &Lexicon::standard());
        let top: Vec<&str> = profile.signature_words.iter().take(2).map(|s| s.word.as_str()).collect();
        assert_eq!(top, vec!["garden", "tomatoes"]);
        assert!(profile.signature_words.iter().all(|s| s.word.len() > 3));
        assert!(!profile.signature_words.iter().any(|s| s.word == "every"));
        let lengths = profile.word_lengths;
        assert!((lengths.short + lengths.medium + lengths.long - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_entropy_of_uniform_words() {
        let profile = extract_vocabulary_profile("alpha beta gamma delta", &Lexicon::standard());
        assert!((profile.entropy - 2.0).abs() < 1e-12);
        let repeated = extract_vocabulary_profile("echo echo echo", &Lexicon::standard());
        assert_eq!(repeated.entropy, 0.0);
    }

    #[test]
    fn test_baseline_pools_counts() {
        let lexicon = Lexicon::standard();
        let texts = ["river river stone", "river meadow"];
        let pooled = build_vocabulary_profile(&texts, &lexicon).expect("profile");
        assert_eq!(pooled.total_words, 5);
        assert_eq!(pooled.word_frequency.get("river"), Some(&3));
        assert_eq!(pooled.signature_words[0].word, "river");
    }

    #[test]
    fn test_self_comparison_is_perfect() {
        let lexicon = Lexicon::standard();
        let profile = extract_vocabulary_profile(GARDEN, &lexicon);
        let comparison = compare_vocabulary_profiles(&profile, &profile, &lexicon);
        assert!((comparison.overlap_score.expect("overlap") - 100.0).abs() < 1e-9);
        assert!(comparison.new_words.is_empty());
        assert!(comparison.missing_signature_words.is_empty());
        assert_eq!(comparison.style_shift, 0.0);
    }

    #[test]
    fn test_self_comparison_without_content_words() {
        let lexicon = Lexicon::standard();
        let profile = extract_vocabulary_profile("It is on the way to the end of it.", &lexicon);
        assert!(profile.signature_words.is_empty());
        let comparison = compare_vocabulary_profiles(&profile, &profile, &lexicon);
        assert_eq!(comparison.content_overlap, 100.0);
        assert!((comparison.overlap_score.expect("overlap") - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_topic_change_keeps_function_similarity() {
        let lexicon = Lexicon::standard();
        let baseline = extract_vocabulary_profile(GARDEN, &lexicon);
        let current = extract_vocabulary_profile(
            "The engine needs fuel every morning. Pistons move quickly when \
             the engine gets warm, and the mechanic checks the pistons daily.",
            &lexicon,
        );
        let comparison = compare_vocabulary_profiles(&baseline, &current, &lexicon);
        assert!(comparison.function_overlap > 90.0);
        assert!(comparison.content_overlap < 60.0);
        assert!(!comparison.new_words.is_empty());
        assert!(comparison.missing_signature_words.contains(&"garden".to_string()));
        assert!(comparison.style_shift > 0.0);
    }

    #[test]
    fn test_overlap_absent_for_empty_side() {
        let lexicon = Lexicon::standard();
        let baseline = extract_vocabulary_profile(GARDEN, &lexicon);
        let empty = VocabularyProfile::default();
        let comparison = compare_vocabulary_profiles(&baseline, &empty, &lexicon);
        assert!(comparison.overlap_score.is_none());
    }

    #[test]
    fn test_vocabulary_overlap_share() {
        let lexicon = Lexicon::standard();
        let overlap = vocabulary_overlap(&["garden water tomatoes"], "garden flowers", &lexicon);
        assert!((overlap - 50.0).abs() < 1e-9);
        let none: Vec<&str> = vec![];
        assert_eq!(vocabulary_overlap(&none, "garden", &lexicon), 0.0);
        assert_eq!(vocabulary_overlap(&["garden"], "the end", &lexicon), 0.0);
    }
}
