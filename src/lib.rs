//! Styleprint - per-author writing style fingerprints
//!
//! Builds a statistical profile from an author's baseline samples and
//! scores how consistent a new document is with it: per-metric z-scores,
//! a 0-100 composite consistency score, style-change flags and an
//! auditable calculation trace.
//!
//! The signals are heuristics drawn from one author's own history. They
//! point at changes worth a conversation; they do not prove authorship.

pub mod config;
pub mod document;
pub mod engine;
pub mod error;
pub mod fingerprint;
pub mod lexicon;
pub mod mistakes;
pub mod profile;
pub mod reporters;
pub mod scoring;
pub mod syntax;
pub mod text;

pub use config::EngineConfig;
pub use document::DocumentAnalysis;
pub use engine::{ComparisonResult, StyleEngine};
pub use error::{AnalysisError, AnalysisResult};
pub use profile::{BaselineProfile, MetricKey};
pub use scoring::Step;
pub use text::{extract_metrics, TextMetrics};
