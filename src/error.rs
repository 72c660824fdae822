//! Error types for the analysis engine
//!
//! Extractors never fail: degenerate input produces zeroed structures.
//! Only the orchestrator and the config loader return errors.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while building a profile or running a comparison
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("At least one baseline sample is required")]
    NoBaselineSamples,

    #[error("Comparison text is empty")]
    EmptyComparisonText,

    /// Internal failure. Detail is logged, not returned.
    #[error("Analysis failed. Please check your input.")]
    AnalysisFailed,

    #[error("Invalid config at {path}: {message}")]
    Config { path: PathBuf, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type AnalysisResult<T> = Result<T, AnalysisError>;
