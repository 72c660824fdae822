//! Deviation and Composite Scoring
//!
//! Scores a document against a baseline profile: a z-score per metric,
//! a composite consistency score and a set of independent flags.
//!
//! # Composite Formula
//!
//! ```text
//! RMS          = √(Σz² / n)
//! metricScore  = 100 / (1 + (RMS/2)²)
//! vocabScore   = overlap (50 when unavailable)
//! syntaxScore  = 100 / (1 + (overallDeviation/2)²)
//! errorScore   = max(40, 100 - |Δclean| × 1.5)   when suspiciously clean
//!              = max(0,  100 - |Δclean| × 0.8)   otherwise
//!
//! Score = clamp(0.40·metric + 0.10·vocab + 0.30·syntax + 0.15·error
//!               - penalties, 0, 100)
//! ```
//!
//! # Penalties
//!
//! - Suspiciously clean: 10
//! - Three or more significant deviations: 5 each, capped at 20

pub mod composite;
pub mod deviations;
pub mod explain;
pub mod flags;

pub use composite::{calculate_composite_score, decay_score, CompositeBreakdown};
pub use deviations::{calculate_metric_deviations, Deviation};
pub use explain::{explain_deviation, explain_document_metric, interpret_score, Step};
pub use flags::{generate_style_change_flags, FlagKind, FlagSeverity, StyleChangeFlag};
