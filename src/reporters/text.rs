//! Text (terminal) reporter with colors and formatting

use crate::document::DocumentAnalysis;
use crate::engine::ComparisonResult;
use crate::profile::stats::confidence_interval;
use crate::profile::{BaselineProfile, MetricKey, Significance};
use crate::scoring::{FlagSeverity, Step};
use anyhow::Result;

/// Reset ANSI color
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

fn significance_color(significance: Significance) -> &'static str {
    match significance {
        Significance::High => "\x1b[31m",   // Red
        Significance::Medium => "\x1b[33m", // Yellow
        Significance::Low => "\x1b[34m",    // Blue
        Significance::None => "\x1b[32m",   // Green
    }
}

fn flag_color(severity: FlagSeverity) -> &'static str {
    match severity {
        FlagSeverity::High => "\x1b[31m",
        FlagSeverity::Medium => "\x1b[33m",
        FlagSeverity::Low => "\x1b[34m",
    }
}

fn format_score(score: f64) -> String {
    let color = if score >= 70.0 {
        "\x1b[32m"
    } else if score >= 50.0 {
        "\x1b[33m"
    } else {
        "\x1b[31m"
    };
    format!("{color}{BOLD}{:.0}/100{RESET}", score)
}

fn rule() -> String {
    format!("{DIM}──────────────────────────────────────{RESET}\n")
}

/// Metrics for one document
pub fn render_analysis(analysis: &DocumentAnalysis) -> Result<String> {
    let m = &analysis.metrics;
    let mut out = String::new();

    out.push_str(&format!("\n{BOLD}Document Analysis{RESET}\n"));
    out.push_str(&rule());
    out.push_str(&format!(
        "Words: {}  Sentences: {}  Paragraphs: {}\n\n",
        m.vocabulary.total_words,
        m.sentences.len(),
        m.paragraphs.count
    ));

    out.push_str(&format!("{BOLD}METRICS{RESET}\n"));
    for key in MetricKey::deviation_keys() {
        out.push_str(&format!(
            "  {:<22} {:>8.1}{}\n",
            key.label(),
            key.value(m),
            key.suffix()
        ));
    }
    out.push_str(&format!(
        "  {:<22} {:>8.1}\n",
        "Flesch Reading Ease", m.readability.flesch_score
    ));
    out.push_str(&format!(
        "  {:<22} {:>8.1}\n",
        "Formality", analysis.style.formality
    ));
    out.push_str(&format!(
        "  {:<22} {:>8.1}\n\n",
        "Cleanliness", analysis.errors.cleanliness
    ));

    if !m.register.phrases.is_empty() {
        out.push_str(&format!("{BOLD}FORMULAIC PHRASES{RESET} ({} total)\n", m.register.total_count));
        for phrase in m.register.phrases.iter().take(10) {
            out.push_str(&format!(
                "  {:<28} ×{:<3} {DIM}{} → {}{RESET}\n",
                phrase.phrase, phrase.count, phrase.category, phrase.suggestion
            ));
        }
        out.push('\n');
    }

    if !analysis.errors.errors.is_empty() {
        out.push_str(&format!("{BOLD}ERROR PATTERNS{RESET}\n"));
        for error in analysis.errors.errors.iter().take(10) {
            out.push_str(&format!(
                "  {:<26} ×{:<3} {DIM}{}{RESET}\n",
                error.id, error.count, error.description
            ));
        }
        out.push('\n');
    }

    Ok(out)
}

/// Baseline profile summary
pub fn render_profile(profile: &BaselineProfile) -> Result<String> {
    let r = &profile.reliability;
    let mut out = String::new();

    out.push_str(&format!("\n{BOLD}Baseline Profile{RESET}\n"));
    out.push_str(&rule());
    out.push_str(&format!(
        "Samples: {} ({})  Confidence: {:.0}/100  Outliers: {}\n",
        r.sample_count,
        r.strength.label(),
        r.confidence_score,
        r.outlier_count
    ));
    if !r.meets_minimum {
        out.push_str(&format!(
            "{DIM}Z-scores are unreliable with this few samples.{RESET}\n"
        ));
    }
    if !r.short_samples.is_empty() {
        let indices: Vec<String> = r.short_samples.iter().map(|i| (i + 1).to_string()).collect();
        out.push_str(&format!("{DIM}Short samples: {}{RESET}\n", indices.join(", ")));
    }
    out.push('\n');

    out.push_str(&format!(
        "{DIM}  METRIC                     MEAN    MEDIAN   STD DEV      MIN      MAX   95% CI ±{RESET}\n"
    ));
    for (key, stats) in &profile.metrics {
        let ci = confidence_interval(stats.mean, stats.std_dev, stats.count(), 0.95);
        out.push_str(&format!(
            "  {:<22} {:>9.1} {:>9.1} {:>9.2} {:>8.1} {:>8.1} {:>10.2}\n",
            key.label(),
            stats.mean,
            stats.median,
            stats.std_dev,
            stats.min,
            stats.max,
            ci.margin
        ));
    }
    out.push('\n');

    let signature: Vec<&str> = profile
        .vocabulary
        .signature_words
        .iter()
        .take(10)
        .map(|s| s.word.as_str())
        .collect();
    if !signature.is_empty() {
        out.push_str(&format!("{BOLD}SIGNATURE WORDS{RESET}\n  {}\n\n", signature.join(", ")));
    }

    if !profile.errors.consistent_errors.is_empty() {
        out.push_str(&format!(
            "{BOLD}CONSISTENT ERRORS{RESET}\n  {}\n\n",
            profile.errors.consistent_errors.join(", ")
        ));
    }

    Ok(out)
}

/// Full comparison report
pub fn render_comparison(result: &ComparisonResult) -> Result<String> {
    let mut out = String::new();

    out.push_str(&format!("\n{BOLD}Style Consistency{RESET}\n"));
    out.push_str(&rule());
    out.push_str(&format!(
        "Score: {}  Baseline samples: {}  Confidence: {:.0}/100\n",
        format_score(result.consistency_score()),
        result.profile.sample_count(),
        result.profile.reliability.confidence_score
    ));
    out.push_str(&format!("{DIM}{}{RESET}\n\n", result.composite.interpretation()));

    out.push_str(&format!("{BOLD}DEVIATIONS{RESET}\n"));
    out.push_str(&format!(
        "{DIM}  METRIC                  BASELINE   CURRENT       Z   STATUS{RESET}\n"
    ));
    for d in &result.deviations {
        let color = significance_color(d.significance);
        out.push_str(&format!(
            "  {:<22} {:>9.1} {:>9.1} {:>7.2}   {color}{}{RESET}\n",
            d.label,
            d.baseline_mean,
            d.current_value,
            d.z_score,
            d.significance.label()
        ));
    }
    out.push('\n');

    out.push_str(&format!("{BOLD}COMPONENTS{RESET}\n"));
    let c = &result.composite;
    out.push_str(&format!(
        "  Metrics: {:.0}  Vocabulary: {:.0}  Syntax: {:.0}  Errors: {:.0}\n\n",
        c.metric_score, c.vocab_score, c.syntax_score, c.error_score
    ));

    if result.flags.is_empty() {
        out.push_str(&format!("{DIM}No style-change flags.{RESET}\n"));
    } else {
        out.push_str(&format!("{BOLD}FLAGS{RESET} ({} total)\n", result.flags.len()));
        for flag in &result.flags {
            let color = flag_color(flag.severity);
            out.push_str(&format!(
                "  {color}[{}]{RESET} {}: {}\n",
                flag.severity, flag.kind, flag.message
            ));
            if !flag.detail.is_empty() {
                out.push_str(&format!("      {DIM}{}{RESET}\n", flag.detail));
            }
        }
    }

    if let Some(note) = &result.errors.confidence_note {
        out.push_str(&format!("\n{DIM}{}{RESET}\n", note));
    }

    Ok(out)
}

/// Numbered calculation trace
pub fn render_steps(title: &str, steps: &[Step]) -> String {
    let mut out = format!("\n{BOLD}{}{RESET}\n", title);
    out.push_str(&rule());
    for (i, step) in steps.iter().enumerate() {
        out.push_str(&format!("{BOLD}{}. {}{RESET}\n", i + 1, step.title));
        if let Some(formula) = &step.formula {
            out.push_str(&format!("   Formula:  {}\n", formula));
        }
        if let Some(substitution) = &step.substitution {
            out.push_str(&format!("   Values:   {}\n", substitution));
        }
        out.push_str(&format!("   Result:   {}\n", step.result));
        if let Some(interpretation) = &step.interpretation {
            out.push_str(&format!("   {DIM}{}{RESET}\n", interpretation));
        }
    }
    out
}
