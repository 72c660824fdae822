//! Error pattern detection
//!
//! Scans a document for a fixed catalog of usage and punctuation mistakes,
//! weights each hit by severity and turns the weighted rate into a
//! cleanliness score. Across a baseline the per-pattern coverage tells us
//! which mistakes an author habitually makes, so a document that is
//! suddenly free of them can be called out.

pub mod patterns;
pub mod style;

pub use patterns::{error_patterns, severity_weight, ErrorPattern};
pub use style::{analyze_style_patterns, StyleMarkers};

use crate::config::ErrorConfig;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::OnceLock;

static WORD_RE: OnceLock<Regex> = OnceLock::new();

/// Matches kept per detected pattern
const MAX_EXAMPLES: usize = 3;

/// One catalog pattern found in a document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedError {
    pub id: String,
    pub kind: String,
    pub severity: u8,
    pub count: usize,
    pub description: String,
    pub examples: Vec<String>,
}

impl DetectedError {
    pub fn weighted_count(&self) -> f64 {
        self.count as f64 * severity_weight(self.severity)
    }
}

/// Errors found in one document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorReport {
    /// Sorted by weighted count, highest first
    pub errors: Vec<DetectedError>,
    /// Occurrences per error kind
    pub errors_by_kind: BTreeMap<String, usize>,
    pub total_error_score: f64,
    /// Weighted errors per 100 words
    pub error_rate: f64,
    /// 0..=100
    pub cleanliness: f64,
    pub word_count: usize,
}

impl Default for ErrorReport {
    fn default() -> Self {
        Self {
            errors: Vec::new(),
            errors_by_kind: BTreeMap::new(),
            total_error_score: 0.0,
            error_rate: 0.0,
            cleanliness: 100.0,
            word_count: 0,
        }
    }
}

impl ErrorReport {
    pub fn contains(&self, id: &str) -> bool {
        self.errors.iter().any(|e| e.id == id)
    }
}

pub fn detect_error_patterns(text: &str) -> ErrorReport {
    if text.trim().is_empty() {
        return ErrorReport::default();
    }

    let word_re = WORD_RE.get_or_init(|| Regex::new(r"\b\w+\b").expect("valid regex"));
    let word_count = word_re.find_iter(text).count();

    let mut errors = Vec::new();
    let mut errors_by_kind: BTreeMap<String, usize> = BTreeMap::new();
    for pattern in error_patterns() {
        let matches: Vec<&str> = pattern.pattern.find_iter(text).map(|m| m.as_str()).collect();
        if matches.is_empty() {
            continue;
        }
        *errors_by_kind.entry(pattern.kind.to_string()).or_insert(0) += matches.len();
        errors.push(DetectedError {
            id: pattern.id.to_string(),
            kind: pattern.kind.to_string(),
            severity: pattern.severity,
            count: matches.len(),
            description: pattern.description.to_string(),
            examples: matches
                .iter()
                .take(MAX_EXAMPLES)
                .map(|m| m.to_string())
                .collect(),
        });
    }

    let total_error_score: f64 = errors.iter().map(DetectedError::weighted_count).sum();
    let error_rate = if word_count > 0 {
        total_error_score / word_count as f64 * 100.0
    } else {
        0.0
    };

    errors.sort_by(|a, b| {
        b.weighted_count()
            .partial_cmp(&a.weighted_count())
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    ErrorReport {
        errors,
        errors_by_kind,
        total_error_score,
        error_rate,
        cleanliness: (100.0 - error_rate * 10.0).clamp(0.0, 100.0),
        word_count,
    }
}

/// Baseline coverage of one pattern
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorTally {
    pub id: String,
    pub kind: String,
    pub severity: u8,
    pub description: String,
    pub occurrences: usize,
    pub samples_with_error: usize,
    /// `samples_with_error / sample_count`
    pub sample_fraction: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorProfile {
    pub patterns: BTreeMap<String, ErrorTally>,
    /// Present in at least the common fraction of samples, most widespread first
    pub common_patterns: Vec<ErrorTally>,
    /// Ids present in at least the consistent fraction of samples
    pub consistent_errors: Vec<String>,
    pub avg_error_rate: f64,
    pub avg_cleanliness: f64,
    pub sample_count: usize,
}

/// Minimum number of samples covering `fraction` of `n`
fn coverage_threshold(n: usize, fraction: f64) -> usize {
    (n as f64 * fraction).ceil() as usize
}

/// Tally per-document reports. `None` when there are none.
pub fn build_error_profile(reports: &[ErrorReport], config: &ErrorConfig) -> Option<ErrorProfile> {
    if reports.is_empty() {
        return None;
    }
    let n = reports.len();

    let mut patterns: BTreeMap<String, ErrorTally> = BTreeMap::new();
    for report in reports {
        for error in &report.errors {
            let tally = patterns.entry(error.id.clone()).or_insert_with(|| ErrorTally {
                id: error.id.clone(),
                kind: error.kind.clone(),
                severity: error.severity,
                description: error.description.clone(),
                occurrences: 0,
                samples_with_error: 0,
                sample_fraction: 0.0,
            });
            tally.occurrences += error.count;
            tally.samples_with_error += 1;
        }
    }
    for tally in patterns.values_mut() {
        tally.sample_fraction = tally.samples_with_error as f64 / n as f64;
    }

    let common_min = coverage_threshold(n, config.common_fraction);
    let mut common_patterns: Vec<ErrorTally> = patterns
        .values()
        .filter(|t| t.samples_with_error >= common_min)
        .cloned()
        .collect();
    common_patterns.sort_by(|a, b| b.samples_with_error.cmp(&a.samples_with_error));

    let consistent_min = coverage_threshold(n, config.consistent_fraction);
    let consistent_errors = patterns
        .values()
        .filter(|t| t.samples_with_error >= consistent_min)
        .map(|t| t.id.clone())
        .collect();

    Some(ErrorProfile {
        patterns,
        common_patterns,
        consistent_errors,
        avg_error_rate: reports.iter().map(|r| r.error_rate).sum::<f64>() / n as f64,
        avg_cleanliness: reports.iter().map(|r| r.cleanliness).sum::<f64>() / n as f64,
        sample_count: n,
    })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorComparison {
    /// Percent drop in error rate against the baseline average; negative is an increase
    pub error_reduction: f64,
    pub suspiciously_clean: bool,
    pub missing_consistent_errors: Vec<String>,
    /// Errors the baseline rarely or never shows
    pub new_errors: Vec<DetectedError>,
    /// Current cleanliness minus baseline average
    pub cleanliness_change: f64,
    pub current_cleanliness: f64,
    pub baseline_cleanliness: f64,
    pub confidence_note: Option<String>,
}

pub fn compare_error_profiles(baseline: &ErrorProfile, current: &ErrorReport, config: &ErrorConfig) -> ErrorComparison {
    let error_reduction = if baseline.avg_error_rate > 0.0 {
        (baseline.avg_error_rate - current.error_rate) / baseline.avg_error_rate * 100.0
    } else {
        0.0
    };

    let missing_consistent_errors: Vec<String> = baseline
        .consistent_errors
        .iter()
        .filter(|id| !current.contains(id))
        .cloned()
        .collect();

    let new_errors = current
        .errors
        .iter()
        .filter(|e| {
            !baseline.common_patterns.iter().any(|c| c.id == e.id) && !baseline.consistent_errors.contains(&e.id)
        })
        .cloned()
        .collect();

    let cleanliness_change = current.cleanliness - baseline.avg_cleanliness;
    let suspiciously_clean = current.cleanliness > config.suspicious_cleanliness
        && baseline.avg_cleanliness < config.baseline_cleanliness_ceiling
        && !missing_consistent_errors.is_empty();

    let confidence_note = if suspiciously_clean {
        Some(format!(
            "Text is unusually clean compared to baseline. {} consistent error pattern(s) are missing.",
            missing_consistent_errors.len()
        ))
    } else if error_reduction > 50.0 && baseline.avg_error_rate > 2.0 {
        Some("Significant error reduction detected. This could indicate improvement or assistance.".to_string())
    } else if error_reduction < -50.0 {
        Some("Error rate has increased significantly compared to baseline.".to_string())
    } else if cleanliness_change.abs() < 5.0 {
        Some("Error patterns are consistent with baseline.".to_string())
    } else {
        None
    };

    ErrorComparison {
        error_reduction,
        suspiciously_clean,
        missing_consistent_errors,
        new_errors,
        cleanliness_change,
        current_cleanliness: current.cleanliness,
        baseline_cleanliness: baseline.avg_cleanliness,
        confidence_note,
    }
}
