//! Summary statistics, z-scores and outlier detection
//!
//! Standard deviations are population deviations (divide by n). A zero
//! deviation yields a z-score of 0, never infinity.

use crate::config::{OutlierMethod, SignificanceLevels};
use serde::{Deserialize, Serialize};

/// Summary of one scalar metric across a sample set
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricStatistics {
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    /// Per-sample values in sample order
    pub values: Vec<f64>,
}

impl MetricStatistics {
    pub fn from_values(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self::default();
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let min = sorted[0];
        let max = sorted[sorted.len() - 1];
        // Summing can drift past the range; identical values have no spread
        let (mean, std_dev) = if min == max {
            (min, 0.0)
        } else {
            let m = mean(values).clamp(min, max);
            (m, std_dev(values, m))
        };
        Self {
            mean,
            median: median(&sorted),
            std_dev,
            min,
            max,
            values: values.to_vec(),
        }
    }

    pub fn count(&self) -> usize {
        self.values.len()
    }

    /// Relative spread, `std_dev / mean` (mean 0 is treated as 1)
    pub fn relative_spread(&self) -> f64 {
        let denominator = if self.mean != 0.0 { self.mean } else { 1.0 };
        self.std_dev / denominator
    }
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

fn median(sorted: &[f64]) -> f64 {
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

fn std_dev(values: &[f64], mean: f64) -> f64 {
    if values.len() < 2 || values.iter().all(|v| *v == values[0]) {
        return 0.0;
    }
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// `(value - mean) / std_dev`, or 0 when the deviation is 0
pub fn z_score(value: f64, mean: f64, std_dev: f64) -> f64 {
    if std_dev == 0.0 {
        return 0.0;
    }
    (value - mean) / std_dev
}

/// Significance tier of a deviation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Significance {
    None,
    /// Noticeable but not flagged significant
    Low,
    Medium,
    High,
}

impl Significance {
    /// Classify by `|z|`
    pub fn from_z(z: f64, levels: &SignificanceLevels) -> Self {
        let abs = z.abs();
        if abs >= levels.high {
            Significance::High
        } else if abs >= levels.medium {
            Significance::Medium
        } else if abs >= levels.low {
            Significance::Low
        } else {
            Significance::None
        }
    }

    pub fn is_significant(&self) -> bool {
        matches!(self, Significance::Medium | Significance::High)
    }

    /// Display label used in reports
    pub fn label(&self) -> &'static str {
        match self {
            Significance::None => "OK",
            Significance::Low => "NOTICE",
            Significance::Medium => "WARNING",
            Significance::High => "ALERT",
        }
    }
}

/// Percent of values strictly below `value`; 50 for an empty set
pub fn percentile_rank(value: f64, values: &[f64]) -> f64 {
    if values.is_empty() {
        return 50.0;
    }
    let below = values.iter().filter(|&&v| v < value).count();
    below as f64 / values.len() as f64 * 100.0
}

/// Indices of outlying values. Empty when fewer than `min_samples`.
pub fn detect_outliers(values: &[f64], method: OutlierMethod, min_samples: usize, z_threshold: f64) -> Vec<usize> {
    if values.len() < min_samples.max(1) {
        return Vec::new();
    }

    match method {
        OutlierMethod::Zscore => {
            let m = mean(values);
            let sd = std_dev(values, m);
            values
                .iter()
                .enumerate()
                .filter(|(_, &v)| z_score(v, m, sd).abs() > z_threshold)
                .map(|(i, _)| i)
                .collect()
        }
        OutlierMethod::Iqr => {
            let mut sorted = values.to_vec();
            sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
            let n = sorted.len();
            let q1 = sorted[(n as f64 * 0.25).floor() as usize];
            let q3 = sorted[((n as f64 * 0.75).floor() as usize).min(n - 1)];
            let iqr = q3 - q1;
            let lower = q1 - 1.5 * iqr;
            let upper = q3 + 1.5 * iqr;
            values
                .iter()
                .enumerate()
                .filter(|(_, &v)| v < lower || v > upper)
                .map(|(i, _)| i)
                .collect()
        }
    }
}

/// Two-sided confidence interval for a mean
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceInterval {
    pub lower: f64,
    pub upper: f64,
    pub margin: f64,
}

/// Normal-approximation interval. `confidence` of 0.90, 0.95 or 0.99;
/// anything else uses 0.95.
pub fn confidence_interval(mean: f64, std_dev: f64, sample_size: usize, confidence: f64) -> ConfidenceInterval {
    if sample_size < 2 {
        return ConfidenceInterval {
            lower: mean,
            upper: mean,
            margin: 0.0,
        };
    }
    let z = if (confidence - 0.90).abs() < 1e-9 {
        1.645
    } else if (confidence - 0.99).abs() < 1e-9 {
        2.576
    } else {
        1.96
    };
    let margin = z * std_dev / (sample_size as f64).sqrt();
    ConfidenceInterval {
        lower: mean - margin,
        upper: mean + margin,
        margin,
    }
}

/// Scale into 0..=100; 50 when the range is empty
pub fn normalize_score(value: f64, min: f64, max: f64) -> f64 {
    if max == min {
        return 50.0;
    }
    ((value - min) / (max - min) * 100.0).clamp(0.0, 100.0)
}

/// Weighted mean with weights normalised to sum to 1.
/// Zero total weight falls back to the plain mean.
pub fn weighted_average(values: &[f64], weights: &[f64]) -> f64 {
    if values.is_empty() || values.len() != weights.len() {
        return 0.0;
    }
    let weight_sum: f64 = weights.iter().sum();
    if weight_sum == 0.0 {
        return mean(values);
    }
    values
        .iter()
        .zip(weights)
        .map(|(v, w)| v * (w / weight_sum))
        .sum()
}
