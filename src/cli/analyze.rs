//! Analyze and profile commands

use super::{emit, read_document};
use anyhow::{bail, Result};
use std::path::{Path, PathBuf};
use std::time::Instant;
use styleprint::reporters::{self, OutputFormat};
use styleprint::{EngineConfig, MetricKey, StyleEngine};
use tracing::info;

/// Metrics for a single document, optionally with one metric's trace
pub fn run(
    config: EngineConfig,
    file: &Path,
    explain: Option<MetricKey>,
    format: OutputFormat,
    output: Option<&Path>,
) -> Result<()> {
    let text = read_document(file)?;
    let engine = StyleEngine::new(config);

    let start = Instant::now();
    let analysis = engine.analyze(&text);
    info!("Analysed {} in {:?}", file.display(), start.elapsed());

    let rendered = match explain {
        Some(key) => {
            let Some(steps) = engine.explain_document_metric(key, &analysis) else {
                bail!(
                    "No single-document trace for '{}'. Try: grade, cv, sttr, formulaic_weight, predictability",
                    key.name()
                );
            };
            let title = format!("{} ({})", key.label(), file.display());
            match format {
                OutputFormat::Text => {
                    let mut out = reporters::render_analysis(&analysis, format)?;
                    out.push_str(&reporters::render_steps(&title, &steps, format)?);
                    out
                }
                OutputFormat::Json => reporters::render_steps(&title, &steps, format)?,
            }
        }
        None => reporters::render_analysis(&analysis, format)?,
    };

    emit(&rendered, output)
}

/// Baseline profile summary for a set of samples
pub fn profile(
    config: EngineConfig,
    files: &[PathBuf],
    format: OutputFormat,
    output: Option<&Path>,
) -> Result<()> {
    let samples = files
        .iter()
        .map(|f| read_document(f))
        .collect::<Result<Vec<_>>>()?;

    let engine = StyleEngine::new(config);
    let Some(profile) = engine.build_profile(&samples) else {
        bail!("At least one baseline sample is required");
    };

    emit(&reporters::render_profile(&profile, format)?, output)
}
