//! JSON reporter
//!
//! Outputs results as pretty-printed JSON for piping to jq or other tools.

use crate::engine::ComparisonResult;
use crate::scoring::Step;
use anyhow::Result;
use serde::Serialize;

/// Render any result as JSON
pub fn render<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Comparison with the headline score and any requested traces lifted to the top level
pub fn render_comparison(result: &ComparisonResult, traces: &[(String, Vec<Step>)]) -> Result<String> {
    let explanations: Vec<serde_json::Value> = traces
        .iter()
        .map(|(title, steps)| serde_json::json!({ "title": title, "steps": steps }))
        .collect();
    let value = serde_json::json!({
        "consistency_score": result.consistency_score(),
        "interpretation": result.composite.interpretation(),
        "flags": result.flags,
        "deviations": result.deviations,
        "explanations": explanations,
        "result": result,
    });
    render(&value)
}
