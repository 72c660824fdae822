//! Error pattern catalog

use regex::Regex;
use std::sync::OnceLock;

/// One catalog rule
pub struct ErrorPattern {
    pub id: &'static str,
    pub kind: &'static str,
    /// 0 to 3
    pub severity: u8,
    pub description: &'static str,
    pub pattern: Regex,
}

static ERROR_PATTERNS: OnceLock<Vec<ErrorPattern>> = OnceLock::new();

/// Weight applied per occurrence at each severity
pub fn severity_weight(severity: u8) -> f64 {
    match severity {
        0 => 0.5,
        1 => 1.0,
        2 => 2.0,
        3 => 3.0,
        _ => 1.0,
    }
}

/// Grammar and usage rules followed by punctuation-spacing rules
pub fn error_patterns() -> &'static Vec<ErrorPattern> {
    ERROR_PATTERNS.get_or_init(|| {
        let rule = |id, kind, severity, description, pattern: &str| ErrorPattern {
            id,
            kind,
            severity,
            description,
            pattern: Regex::new(pattern).expect("valid regex"),
        };
        vec![
            rule(
                "its-contraction",
                "contraction-misuse",
                1,
                "Possible its/it's confusion",
                r"(?i)\bits\s+(\w+ing)\b",
            ),
            rule(
                "could-of",
                "modal-preposition",
                2,
                "Modal + \"of\" instead of \"have\"",
                r"(?i)\b(could|should|would|might|must)\s+of\b",
            ),
            rule(
                "there-overuse",
                "expletive-overuse",
                1,
                "Expletive construction overuse",
                r"(?i)\bthere\s+(is|are|was|were)\s+(a|an|the|many|several|some|numerous)\b",
            ),
            rule(
                "your-youre",
                "possessive-contraction",
                2,
                "Possible your/you're confusion",
                r"(?i)\byour\s+(going|coming|being|doing|having)\b",
            ),
            rule(
                "affect-effect",
                "commonly-confused",
                1,
                "Commonly confused word pair",
                r"(?i)\b(affect|effect)(s|ed|ing)?\b",
            ),
            rule(
                "then-than",
                "commonly-confused",
                2,
                "Then/than confusion in comparison",
                r"(?i)\b(more|less|better|worse|rather)\s+then\b",
            ),
            rule(
                "alot",
                "spacing-error",
                2,
                "Spacing error: \"alot\" should be \"a lot\"",
                r"(?i)\balot\b",
            ),
            rule(
                "loose-lose",
                "commonly-confused",
                1,
                "Loose/lose confusion",
                r"(?i)\b(loose|lose)(s|d|ing)?\b",
            ),
            rule(
                "their-there",
                "commonly-confused",
                1,
                "Their/there/they're usage",
                r"(?i)\b(their|there|they're)\b",
            ),
            rule(
                "comma-splice-potential",
                "comma-splice",
                1,
                "Potential comma splice with conjunctive adverb",
                r"(?i),\s+(however|therefore|moreover|furthermore|nevertheless|thus|hence)\s+",
            ),
            rule(
                "fragment-because",
                "sentence-fragment",
                1,
                "Potential sentence fragment starting with \"because\"",
                r"(?m)^because\s+\w+.*[.!?]\s+[A-Z]",
            ),
            rule(
                "double-negative",
                "double-negative",
                2,
                "Double negative construction",
                r"(?i)\b(don't|doesn't|didn't|won't|can't|couldn't|shouldn't|wouldn't)\s+\w*\s+(no|nothing|nobody|nowhere|never|none)\b",
            ),
            rule(
                "subject-verb",
                "agreement",
                2,
                "Subject-verb agreement error",
                r"(?i)\b(he|she|it)\s+(have|do|are)\b",
            ),
            rule(
                "redundancy",
                "redundancy",
                1,
                "Redundant phrase",
                r"(?i)\b(advance\s+forward|past\s+history|future\s+plans|repeat\s+again|close\s+proximity|end\s+result)\b",
            ),
            rule(
                "wordiness",
                "wordiness",
                1,
                "Wordy construction",
                r"(?i)\b(in\s+order\s+to|due\s+to\s+the\s+fact\s+that|at\s+this\s+point\s+in\s+time|for\s+the\s+purpose\s+of)\b",
            ),
            rule(
                "space-before-punctuation",
                "punctuation-spacing",
                1,
                "Space before punctuation",
                r"\s+[.,!?;:]",
            ),
            rule(
                "multiple-punctuation",
                "punctuation-repetition",
                1,
                "Multiple punctuation marks",
                r"[.!?]{2,}",
            ),
            rule(
                "missing-space-after",
                "punctuation-spacing",
                1,
                "Missing space after punctuation",
                r"[.,!?;:][a-zA-Z]",
            ),
            rule(
                "quotation-spacing",
                "quotation-punctuation",
                1,
                "Quotation mark placement",
                r#"[.,!?]\s*["']"#,
            ),
        ]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(id: &str, text: &str) -> usize {
        error_patterns()
            .iter()
            .find(|p| p.id == id)
            .map(|p| p.pattern.find_iter(text).count())
            .unwrap_or(0)
    }

    #[test]
    fn test_catalog_ids_are_unique() {
        let mut ids: Vec<&str> = error_patterns().iter().map(|p| p.id).collect();
        let len = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), len);
        assert_eq!(len, 19);
    }

    #[test]
    fn test_grammar_rules() {
        assert_eq!(count("could-of", "I could of gone. You should of too."), 2);
        assert_eq!(count("could-of", "I could have gone."), 0);
        assert_eq!(count("alot", "I like it alot. A lot."), 1);
        assert_eq!(count("then-than", "This is better then that."), 1);
        assert_eq!(count("double-negative", "I don't have nothing."), 1);
        assert_eq!(count("subject-verb", "He have a dog."), 1);
    }

    #[test]
    fn test_fragment_is_case_sensitive_and_line_anchored() {
        assert_eq!(count("fragment-because", "because it rained. Then we left."), 1);
        assert_eq!(count("fragment-because", "Because it rained. Then we left."), 0);
        assert_eq!(count("fragment-because", "We left.\nbecause it rained. Then home."), 1);
    }

    #[test]
    fn test_punctuation_rules() {
        assert_eq!(count("space-before-punctuation", "Wait , what ?"), 2);
        assert_eq!(count("multiple-punctuation", "What?! No..."), 2);
        assert_eq!(count("missing-space-after", "End.Start"), 1);
    }

    #[test]
    fn test_severity_weights() {
        assert_eq!(severity_weight(0), 0.5);
        assert_eq!(severity_weight(2), 2.0);
        assert_eq!(severity_weight(9), 1.0);
    }
}
