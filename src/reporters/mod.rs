//! Output reporters for styleprint results
//!
//! Supports two output formats:
//! - `text` - Terminal output with colors
//! - `json` - Machine-readable JSON

mod json;
mod text;

use crate::document::DocumentAnalysis;
use crate::engine::ComparisonResult;
use crate::profile::BaselineProfile;
use crate::scoring::Step;
use anyhow::{anyhow, Result};
use std::str::FromStr;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" | "terminal" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(anyhow!("Unknown format '{}'. Valid formats: text, json", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Render a single-document analysis
pub fn render_analysis(analysis: &DocumentAnalysis, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => text::render_analysis(analysis),
        OutputFormat::Json => json::render(analysis),
    }
}

/// Render a baseline profile summary
pub fn render_profile(profile: &BaselineProfile, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => text::render_profile(profile),
        OutputFormat::Json => json::render(profile),
    }
}

/// Render a comparison. `traces` are appended as titled step lists.
pub fn render_comparison(result: &ComparisonResult, traces: &[(String, Vec<Step>)], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => {
            let mut out = text::render_comparison(result)?;
            for (title, steps) in traces {
                out.push_str(&text::render_steps(title, steps));
            }
            Ok(out)
        }
        OutputFormat::Json => json::render_comparison(result, traces),
    }
}

/// Render a standalone trace
pub fn render_steps(title: &str, steps: &[Step], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(text::render_steps(title, steps)),
        OutputFormat::Json => json::render(&serde_json::json!({ "title": title, "steps": steps })),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::engine::StyleEngine;

    pub(crate) const SAMPLE: &str = "The river runs past the old mill every spring. \
        Children gather on the bank to watch the water rise. \
        Some years it floods the lower field, and the farmers complain.";

    pub(crate) fn test_comparison() -> ComparisonResult {
        StyleEngine::default()
            .compare(&[SAMPLE, SAMPLE, SAMPLE], SAMPLE)
            .expect("comparison")
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!(OutputFormat::from_str("text").ok(), Some(OutputFormat::Text));
        assert_eq!(OutputFormat::from_str("JSON").ok(), Some(OutputFormat::Json));
        assert!(OutputFormat::from_str("sarif").is_err());
        assert_eq!(OutputFormat::Json.to_string(), "json");
    }
}
