//! Compare command - score a document against a baseline

use super::{emit, read_document};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use styleprint::reporters::{self, OutputFormat};
use styleprint::{ComparisonResult, EngineConfig, MetricKey, StyleEngine, Step};
use tracing::debug;

#[derive(Debug, Default)]
pub struct CompareOptions {
    pub explain: bool,
    pub explain_metric: Option<MetricKey>,
    pub fail_below: Option<f64>,
}

pub fn run(
    config: EngineConfig,
    baseline: &[PathBuf],
    file: &Path,
    options: CompareOptions,
    format: OutputFormat,
    output: Option<&Path>,
) -> Result<()> {
    let samples = baseline
        .iter()
        .map(|f| read_document(f))
        .collect::<Result<Vec<_>>>()?;
    let text = read_document(file)?;
    debug!("Comparing {} against {} samples", file.display(), samples.len());

    let engine = StyleEngine::new(config);
    let result = engine
        .compare(&samples, &text)
        .with_context(|| format!("Failed to compare {}", file.display()))?;

    let traces = collect_traces(&result, &options)?;
    emit(&reporters::render_comparison(&result, &traces, format)?, output)?;

    check_fail_threshold(options.fail_below, result.consistency_score());
    Ok(())
}

fn collect_traces(result: &ComparisonResult, options: &CompareOptions) -> Result<Vec<(String, Vec<Step>)>> {
    let mut traces = Vec::new();
    if let Some(key) = options.explain_metric {
        let steps = result
            .explain_metric(key)
            .with_context(|| format!("'{}' is not a scored metric", key.name()))?;
        traces.push((format!("{} z-score", key.label()), steps));
    }
    if options.explain {
        traces.push(("Composite consistency score".to_string(), result.explain_composite()));
    }
    Ok(traces)
}

/// Exit with code 1 when the score is under the threshold
fn check_fail_threshold(fail_below: Option<f64>, score: f64) {
    if let Some(threshold) = fail_below {
        if score < threshold {
            eprintln!(
                "Failing due to --fail-below={} (score {:.0})",
                threshold, score
            );
            std::process::exit(1);
        }
    }
}
