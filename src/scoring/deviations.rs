//! Per-metric deviation against the baseline distribution

use crate::config::SignificanceLevels;
use crate::profile::stats::{z_score, Significance};
use crate::profile::{BaselineProfile, MetricKey};
use crate::text::TextMetrics;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deviation {
    pub key: MetricKey,
    pub label: String,
    pub baseline_mean: f64,
    pub baseline_std_dev: f64,
    pub baseline_min: f64,
    pub baseline_max: f64,
    pub current_value: f64,
    /// `current_value - baseline_mean`
    pub diff: f64,
    /// 0 when the baseline has no spread
    pub z_score: f64,
    pub significance: Significance,
    pub is_significant: bool,
    pub suffix: String,
}

impl Deviation {
    pub fn within_range(&self) -> bool {
        self.current_value >= self.baseline_min && self.current_value <= self.baseline_max
    }
}

/// Deviations for the user-facing metrics, in [`MetricKey::deviation_keys`] order
pub fn calculate_metric_deviations(
    profile: &BaselineProfile,
    current: &TextMetrics,
    levels: &SignificanceLevels,
) -> Vec<Deviation> {
    MetricKey::deviation_keys()
        .iter()
        .filter_map(|key| {
            let stats = profile.metric(*key)?;
            let current_value = key.value(current);
            let z = z_score(current_value, stats.mean, stats.std_dev);
            let significance = Significance::from_z(z, levels);
            Some(Deviation {
                key: *key,
                label: key.label().to_string(),
                baseline_mean: stats.mean,
                baseline_std_dev: stats.std_dev,
                baseline_min: stats.min,
                baseline_max: stats.max,
                current_value,
                diff: current_value - stats.mean,
                z_score: z,
                significance,
                is_significant: significance.is_significant(),
                suffix: key.suffix().to_string(),
            })
        })
        .collect()
}

/// Deviations flagged significant
pub fn significant_count(deviations: &[Deviation]) -> usize {
    deviations.iter().filter(|d| d.is_significant).count()
}

pub fn find(deviations: &[Deviation], key: MetricKey) -> Option<&Deviation> {
    deviations.iter().find(|d| d.key == key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::lexicon::Lexicon;
    use crate::profile::build_profile;
    use crate::text::extract_metrics;

    const SAMPLE: &str = "The river runs past the old mill every spring. \
        Children gather on the bank to watch the water rise.";

    #[test]
    fn test_zero_spread_gives_zero_z() {
        let profile = build_profile(&[SAMPLE, SAMPLE, SAMPLE], &EngineConfig::default(), &Lexicon::standard())
            .expect("profile");
        let current = extract_metrics("Short one. Then a much longer sentence follows it here.");
        let deviations = calculate_metric_deviations(&profile, &current, &SignificanceLevels::default());
        assert_eq!(deviations.len(), 9);
        for d in &deviations {
            assert_eq!(d.z_score, 0.0);
            assert_eq!(d.significance, Significance::None);
        }
        assert_eq!(significant_count(&deviations), 0);
        assert!(find(&deviations, MetricKey::TotalWords).is_none());
    }

    #[test]
    fn test_same_text_is_within_range() {
        let profile = build_profile(&[SAMPLE, SAMPLE], &EngineConfig::default(), &Lexicon::standard())
            .expect("profile");
        let deviations = calculate_metric_deviations(&profile, &extract_metrics(SAMPLE), &SignificanceLevels::default());
        assert!(deviations.iter().all(|d| d.diff == 0.0 && d.within_range()));
        let grade = find(&deviations, MetricKey::Grade).expect("grade");
        assert_eq!(grade.label, "Grade Level");
    }
}
