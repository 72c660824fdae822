//! Engine configuration
//!
//! Every threshold and weight the engine uses lives here so alternate
//! tables can be injected at construction time. Values are loaded from
//! `styleprint.toml` (or `--config`) and fall back to the defaults below.
//!
//! # Configuration Format
//!
//! ```toml
//! # styleprint.toml
//!
//! [baseline]
//! min_samples = 3
//! outlier_method = "iqr"
//!
//! [composite]
//! metric_deviations = 0.40
//! vocabulary_overlap = 0.10
//! syntactic_patterns = 0.30
//! error_consistency = 0.15
//!
//! [flags]
//! vocabulary_overlap = 40.0
//! sophistication_z = 1.8
//! ```

use crate::error::{AnalysisError, AnalysisResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// File name searched for in the working directory
pub const CONFIG_FILENAME: &str = "styleprint.toml";

/// Root configuration for [`crate::StyleEngine`]
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct EngineConfig {
    #[serde(default)]
    pub baseline: BaselineConfig,

    #[serde(default)]
    pub significance: SignificanceLevels,

    #[serde(default)]
    pub composite: CompositeWeights,

    #[serde(default)]
    pub flags: FlagThresholds,

    #[serde(default)]
    pub ngrams: NgramConfig,

    #[serde(default)]
    pub errors: ErrorConfig,
}

/// How baseline outliers are detected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutlierMethod {
    /// Outside `[Q1 - 1.5·IQR, Q3 + 1.5·IQR]`
    #[default]
    Iqr,
    /// `|z| > outlier_zscore`
    Zscore,
}

/// Baseline sample-count requirements
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct BaselineConfig {
    /// Samples needed before z-scores are meaningful
    #[serde(default = "default_min_samples")]
    pub min_samples: usize,

    #[serde(default = "default_recommended_samples")]
    pub recommended_samples: usize,

    #[serde(default = "default_strong_samples")]
    pub strong_samples: usize,

    /// Outlier detection is skipped below this many samples
    #[serde(default = "default_outlier_min_samples")]
    pub outlier_min_samples: usize,

    /// Samples shorter than this are reported as short
    #[serde(default = "default_min_words")]
    pub min_words: usize,

    #[serde(default)]
    pub outlier_method: OutlierMethod,

    #[serde(default = "default_outlier_zscore")]
    pub outlier_zscore: f64,
}

impl Default for BaselineConfig {
    fn default() -> Self {
        Self {
            min_samples: default_min_samples(),
            recommended_samples: default_recommended_samples(),
            strong_samples: default_strong_samples(),
            outlier_min_samples: default_outlier_min_samples(),
            min_words: default_min_words(),
            outlier_method: OutlierMethod::default(),
            outlier_zscore: default_outlier_zscore(),
        }
    }
}

fn default_min_samples() -> usize {
    3
}
fn default_recommended_samples() -> usize {
    5
}
fn default_strong_samples() -> usize {
    7
}
fn default_outlier_min_samples() -> usize {
    4
}
fn default_min_words() -> usize {
    100
}
fn default_outlier_zscore() -> f64 {
    2.5
}

/// |z| tiers: below `low` is noise, `medium` and up is significant
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct SignificanceLevels {
    #[serde(default = "default_sig_low")]
    pub low: f64,
    #[serde(default = "default_sig_medium")]
    pub medium: f64,
    #[serde(default = "default_sig_high")]
    pub high: f64,
}

impl Default for SignificanceLevels {
    fn default() -> Self {
        Self {
            low: default_sig_low(),
            medium: default_sig_medium(),
            high: default_sig_high(),
        }
    }
}

fn default_sig_low() -> f64 {
    1.0
}
fn default_sig_medium() -> f64 {
    1.5
}
fn default_sig_high() -> f64 {
    2.0
}

/// Weights of the four composite sub-scores plus the special penalties.
///
/// The weights sum to [`CompositeWeights::EXPECTED_TOTAL`]; the remaining
/// 0.05 of the scale is reserved for the subtractive penalties.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct CompositeWeights {
    #[serde(default = "default_metric_weight")]
    pub metric_deviations: f64,

    #[serde(default = "default_vocab_weight")]
    pub vocabulary_overlap: f64,

    #[serde(default = "default_syntax_weight")]
    pub syntactic_patterns: f64,

    #[serde(default = "default_error_weight")]
    pub error_consistency: f64,

    /// Subtracted when the document is suspiciously clean
    #[serde(default = "default_clean_penalty")]
    pub suspiciously_clean_penalty: f64,

    /// Subtracted per significant deviation once the flag count is reached
    #[serde(default = "default_per_metric_penalty")]
    pub deviation_penalty_per_metric: f64,

    #[serde(default = "default_deviation_penalty_cap")]
    pub deviation_penalty_cap: f64,
}

impl Default for CompositeWeights {
    fn default() -> Self {
        Self {
            metric_deviations: default_metric_weight(),
            vocabulary_overlap: default_vocab_weight(),
            syntactic_patterns: default_syntax_weight(),
            error_consistency: default_error_weight(),
            suspiciously_clean_penalty: default_clean_penalty(),
            deviation_penalty_per_metric: default_per_metric_penalty(),
            deviation_penalty_cap: default_deviation_penalty_cap(),
        }
    }
}

fn default_metric_weight() -> f64 {
    0.40
}
fn default_vocab_weight() -> f64 {
    0.10
}
fn default_syntax_weight() -> f64 {
    0.30
}
fn default_error_weight() -> f64 {
    0.15
}
fn default_clean_penalty() -> f64 {
    10.0
}
fn default_per_metric_penalty() -> f64 {
    5.0
}
fn default_deviation_penalty_cap() -> f64 {
    20.0
}

impl CompositeWeights {
    pub const EXPECTED_TOTAL: f64 = 0.95;

    pub fn total(&self) -> f64 {
        self.metric_deviations
            + self.vocabulary_overlap
            + self.syntactic_patterns
            + self.error_consistency
    }

    /// Validate that weights sum to the expected total (with tolerance)
    pub fn is_valid(&self) -> bool {
        (self.total() - Self::EXPECTED_TOTAL).abs() < 0.001
            && self.metric_deviations >= 0.0
            && self.vocabulary_overlap >= 0.0
            && self.syntactic_patterns >= 0.0
            && self.error_consistency >= 0.0
    }

    /// Rescale weights so they sum to the expected total
    pub fn normalize(&mut self) {
        let sum = self.total();
        if sum > 0.0 {
            let factor = Self::EXPECTED_TOTAL / sum;
            self.metric_deviations *= factor;
            self.vocabulary_overlap *= factor;
            self.syntactic_patterns *= factor;
            self.error_consistency *= factor;
        }
    }
}

/// Trigger thresholds for style-change flags
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct FlagThresholds {
    /// Overlap score below this raises VOCABULARY_SHIFT
    #[serde(default = "default_flag_vocab")]
    pub vocabulary_overlap: f64,

    /// Significant-deviation count that raises MULTIPLE_DEVIATIONS
    #[serde(default = "default_flag_multiple")]
    pub multiple_deviations: usize,

    #[serde(default = "default_flag_syntax")]
    pub syntactic_deviation: f64,

    #[serde(default = "default_flag_sophistication")]
    pub sophistication_z: f64,

    #[serde(default = "default_flag_formulaic")]
    pub formulaic_z: f64,
}

impl Default for FlagThresholds {
    fn default() -> Self {
        Self {
            vocabulary_overlap: default_flag_vocab(),
            multiple_deviations: default_flag_multiple(),
            syntactic_deviation: default_flag_syntax(),
            sophistication_z: default_flag_sophistication(),
            formulaic_z: default_flag_formulaic(),
        }
    }
}

fn default_flag_vocab() -> f64 {
    40.0
}
fn default_flag_multiple() -> usize {
    3
}
fn default_flag_syntax() -> f64 {
    2.0
}
fn default_flag_sophistication() -> f64 {
    1.8
}
fn default_flag_formulaic() -> f64 {
    1.5
}

/// Human-writing n-gram baselines and segment sizes
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct NgramConfig {
    /// Expected formulaic bigram rate (% of words) in human writing
    #[serde(default = "default_bigram_rate")]
    pub bigram_rate: f64,

    /// Expected formulaic trigram rate (% of words) in human writing
    #[serde(default = "default_trigram_rate")]
    pub trigram_rate: f64,

    /// Texts shorter than this get a predictability of 0
    #[serde(default = "default_ngram_min_words")]
    pub min_words: usize,

    /// Window size for MSTTR
    #[serde(default = "default_msttr_segment")]
    pub msttr_segment: usize,
}

impl Default for NgramConfig {
    fn default() -> Self {
        Self {
            bigram_rate: default_bigram_rate(),
            trigram_rate: default_trigram_rate(),
            min_words: default_ngram_min_words(),
            msttr_segment: default_msttr_segment(),
        }
    }
}

fn default_bigram_rate() -> f64 {
    15.0
}
fn default_trigram_rate() -> f64 {
    3.0
}
fn default_ngram_min_words() -> usize {
    10
}
fn default_msttr_segment() -> usize {
    50
}

/// Error-profile thresholds
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ErrorConfig {
    /// Current cleanliness above this may be suspicious
    #[serde(default = "default_suspicious_cleanliness")]
    pub suspicious_cleanliness: f64,

    /// Baseline average cleanliness must be below this to be suspicious
    #[serde(default = "default_baseline_ceiling")]
    pub baseline_cleanliness_ceiling: f64,

    /// Share of samples an error must appear in to be common
    #[serde(default = "default_common_fraction")]
    pub common_fraction: f64,

    /// Share of samples an error must appear in to be consistent
    #[serde(default = "default_consistent_fraction")]
    pub consistent_fraction: f64,
}

impl Default for ErrorConfig {
    fn default() -> Self {
        Self {
            suspicious_cleanliness: default_suspicious_cleanliness(),
            baseline_cleanliness_ceiling: default_baseline_ceiling(),
            common_fraction: default_common_fraction(),
            consistent_fraction: default_consistent_fraction(),
        }
    }
}

fn default_suspicious_cleanliness() -> f64 {
    90.0
}
fn default_baseline_ceiling() -> f64 {
    75.0
}
fn default_common_fraction() -> f64 {
    0.5
}
fn default_consistent_fraction() -> f64 {
    0.7
}

impl EngineConfig {
    /// Log a warning for settings that will produce odd scores
    pub fn validate(&self) {
        if !self.composite.is_valid() {
            warn!(
                "Composite weights sum to {:.3}, expected {:.2}",
                self.composite.total(),
                CompositeWeights::EXPECTED_TOTAL
            );
        }
        if self.ngrams.msttr_segment == 0 {
            warn!("msttr_segment is 0, plain TTR will be used");
        }
        if self.significance.low > self.significance.medium
            || self.significance.medium > self.significance.high
        {
            warn!("Significance levels are not ascending");
        }
    }

    /// Path of the user-level config file
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("styleprint").join("config.toml"))
    }
}

/// Load engine configuration.
///
/// An explicit path must exist and parse. Discovered files that fail to
/// parse are skipped with a warning.
pub fn load_engine_config(explicit: Option<&Path>) -> AnalysisResult<EngineConfig> {
    if let Some(path) = explicit {
        let config = load_toml_config(path)?;
        debug!("Loaded engine config from {}", path.display());
        config.validate();
        return Ok(config);
    }

    let candidates = [
        Some(PathBuf::from(CONFIG_FILENAME)),
        EngineConfig::user_config_path(),
    ];

    for path in candidates.iter().flatten() {
        if !path.exists() {
            continue;
        }
        match load_toml_config(path) {
            Ok(config) => {
                debug!("Loaded engine config from {}", path.display());
                config.validate();
                return Ok(config);
            }
            Err(e) => {
                warn!("Failed to load {}: {}", path.display(), e);
            }
        }
    }

    debug!("No engine config found, using defaults");
    Ok(EngineConfig::default())
}

/// Load configuration from a TOML file
pub fn load_toml_config(path: &Path) -> AnalysisResult<EngineConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| AnalysisError::Config {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    toml::from_str(&content).map_err(|e| AnalysisError::Config {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Example config written by `styleprint init`
pub const EXAMPLE_CONFIG: &str = r#"# styleprint configuration
# Every value below is the built-in default.

[baseline]
min_samples = 3            # z-scores are unreliable below this
outlier_min_samples = 4
min_words = 100            # shorter samples are reported as short
outlier_method = "iqr"     # or "zscore"
outlier_zscore = 2.5

[significance]
low = 1.0
medium = 1.5
high = 2.0

[composite]
metric_deviations = 0.40
vocabulary_overlap = 0.10
syntactic_patterns = 0.30
error_consistency = 0.15
suspiciously_clean_penalty = 10.0
deviation_penalty_per_metric = 5.0
deviation_penalty_cap = 20.0

[flags]
vocabulary_overlap = 40.0
multiple_deviations = 3
syntactic_deviation = 2.0
sophistication_z = 1.8
formulaic_z = 1.5

[ngrams]
bigram_rate = 15.0
trigram_rate = 3.0
min_words = 10
msttr_segment = 50

[errors]
suspicious_cleanliness = 90.0
baseline_cleanliness_ceiling = 75.0
common_fraction = 0.5
consistent_fraction = 0.7
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_weights_are_valid() {
        let config = EngineConfig::default();
        assert!(config.composite.is_valid());
        assert!((config.composite.total() - 0.95).abs() < 1e-9);
    }

    #[test]
    fn test_example_config_matches_defaults() {
        let parsed: EngineConfig = toml::from_str(EXAMPLE_CONFIG).expect("parse example");
        assert_eq!(parsed, EngineConfig::default());
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let parsed: EngineConfig = toml::from_str(
            r#"
[flags]
vocabulary_overlap = 55.0

[baseline]
outlier_method = "zscore"
"#,
        )
        .expect("parse partial");
        assert_eq!(parsed.flags.vocabulary_overlap, 55.0);
        assert_eq!(parsed.flags.multiple_deviations, 3);
        assert_eq!(parsed.baseline.outlier_method, OutlierMethod::Zscore);
        assert_eq!(parsed.baseline.min_samples, 3);
        assert_eq!(parsed.composite, CompositeWeights::default());
    }

    #[test]
    fn test_normalize_weights() {
        let mut weights = CompositeWeights {
            metric_deviations: 2.0,
            vocabulary_overlap: 1.0,
            syntactic_patterns: 1.0,
            error_consistency: 0.0,
            ..CompositeWeights::default()
        };
        assert!(!weights.is_valid());
        weights.normalize();
        assert!(weights.is_valid());
        assert!((weights.metric_deviations - 0.475).abs() < 1e-9);
    }

    #[test]
    fn test_load_explicit_path() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "[significance]\nmedium = 1.75").expect("write");
        let config = load_engine_config(Some(file.path())).expect("load");
        assert_eq!(config.significance.medium, 1.75);
        assert_eq!(config.significance.high, 2.0);
    }

    #[test]
    fn test_load_explicit_missing_path_errors() {
        let result = load_engine_config(Some(Path::new("/nonexistent/styleprint.toml")));
        assert!(matches!(result, Err(AnalysisError::Config { .. })));
    }

    #[test]
    fn test_load_explicit_invalid_toml_errors() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "[composite\nmetric_deviations = ").expect("write");
        let result = load_engine_config(Some(file.path()));
        assert!(matches!(result, Err(AnalysisError::Config { .. })));
    }
}
