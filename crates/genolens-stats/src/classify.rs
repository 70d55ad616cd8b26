//! Cross-cohort z-score classification.
//!
//! A second-order aggregation: the z-score of a cohort is computed from
//! the distribution of per-cohort MEANS, not from raw sample values.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::aggregate::{sample_std, CohortStats};

/// z-score cutoff for calling a cohort high (> 1) or low (< −1).
const Z_THRESHOLD: f64 = 1.0;

/// One classified cohort as reported to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CohortSummary {
    pub cancer_type: String,
    /// Mean expression rounded to three decimal places.
    pub mean_expression: f64,
    pub sample_count: usize,
}

/// High/low expression partitions for one gene.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpressionClassification {
    /// Cohorts with z > 1, sorted by mean descending.
    pub high_expression_cancers: Vec<CohortSummary>,
    /// Cohorts with z < −1, sorted by mean ascending.
    pub low_expression_cancers: Vec<CohortSummary>,
}

/// Partition cohorts into high and low expression by z-score over the
/// distribution of cohort means.
///
/// When the standard deviation of means is zero or undefined (fewer than
/// two cohorts), every z-score is undefined and both partitions come back
/// empty. Pure function: identical input yields identical output.
pub fn classify(stats: &BTreeMap<String, CohortStats>) -> ExpressionClassification {
    let means: Vec<f64> = stats.values().map(|s| s.mean).collect();
    if means.len() < 2 {
        return ExpressionClassification::default();
    }

    let mean_of_means = means.iter().sum::<f64>() / means.len() as f64;
    let std_of_means = sample_std(&means, mean_of_means);
    if !(std_of_means > 0.0) {
        // Zero or NaN spread: no cohort can cross either threshold.
        return ExpressionClassification::default();
    }

    let mut high: Vec<(f64, CohortSummary)> = Vec::new();
    let mut low: Vec<(f64, CohortSummary)> = Vec::new();

    for (cohort, s) in stats {
        let z = (s.mean - mean_of_means) / std_of_means;
        if z.abs() <= Z_THRESHOLD {
            continue;
        }
        let entry = CohortSummary {
            cancer_type: cohort.clone(),
            mean_expression: round3(s.mean),
            sample_count: s.count,
        };
        if z > Z_THRESHOLD {
            high.push((s.mean, entry));
        } else {
            low.push((s.mean, entry));
        }
    }

    // Sort on the unrounded means so reporting precision never reorders.
    high.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));
    low.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));

    ExpressionClassification {
        high_expression_cancers: high.into_iter().map(|(_, e)| e).collect(),
        low_expression_cancers: low.into_iter().map(|(_, e)| e).collect(),
    }
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats_of(entries: &[(&str, f64, usize)]) -> BTreeMap<String, CohortStats> {
        entries
            .iter()
            .map(|(cohort, mean, count)| {
                (
                    cohort.to_string(),
                    CohortStats {
                        mean: *mean,
                        std: f64::NAN,
                        count: *count,
                    },
                )
            })
            .collect()
    }

    #[test]
    fn test_identical_means_yield_empty_partitions() {
        // A, B, C all at mean 10: std of means is 0, every z undefined.
        let result = classify(&stats_of(&[("A", 10.0, 5), ("B", 10.0, 5), ("C", 10.0, 5)]));
        assert!(result.high_expression_cancers.is_empty());
        assert!(result.low_expression_cancers.is_empty());
    }

    #[test]
    fn test_single_cohort_yields_empty_partitions() {
        let result = classify(&stats_of(&[("A", 10.0, 5)]));
        assert!(result.high_expression_cancers.is_empty());
        assert!(result.low_expression_cancers.is_empty());
    }

    #[test]
    fn test_outlier_cohort_is_called_high() {
        // Means 5, 5, 5, 20: mean of means 8.75, sample std 7.5,
        // so only D crosses a threshold (z = 1.5).
        let result = classify(&stats_of(&[
            ("A", 5.0, 3),
            ("B", 5.0, 3),
            ("C", 5.0, 3),
            ("D", 20.0, 4),
        ]));

        assert_eq!(result.high_expression_cancers.len(), 1);
        assert_eq!(result.high_expression_cancers[0].cancer_type, "D");
        assert!((result.high_expression_cancers[0].mean_expression - 20.0).abs() < 1e-12);
        assert_eq!(result.high_expression_cancers[0].sample_count, 4);
        assert!(result.low_expression_cancers.is_empty());
    }

    #[test]
    fn test_partitions_are_sorted_and_disjoint() {
        // Means 0, 0, 0, 10, 12, −10, −12: mean of means 0, sample std
        // ≈ 9.02, so the HI and LO cohorts sit just past |z| = 1.
        let result = classify(&stats_of(&[
            ("MID1", 0.0, 5),
            ("MID2", 0.0, 5),
            ("MID3", 0.0, 5),
            ("HI1", 10.0, 5),
            ("HI2", 12.0, 5),
            ("LO1", -10.0, 5),
            ("LO2", -12.0, 5),
        ]));

        let high: Vec<&str> = result
            .high_expression_cancers
            .iter()
            .map(|e| e.cancer_type.as_str())
            .collect();
        let low: Vec<&str> = result
            .low_expression_cancers
            .iter()
            .map(|e| e.cancer_type.as_str())
            .collect();

        // High descending by mean, low ascending by mean.
        assert_eq!(high, vec!["HI2", "HI1"]);
        assert_eq!(low, vec!["LO2", "LO1"]);
        assert!(high.iter().all(|c| !low.contains(c)));
    }

    #[test]
    fn test_mean_is_rounded_to_three_decimals() {
        let result = classify(&stats_of(&[
            ("A", 1.0, 2),
            ("B", 1.0, 2),
            ("C", 1.0, 2),
            ("D", 9.87654321, 2),
        ]));
        assert_eq!(result.high_expression_cancers[0].mean_expression, 9.877);
    }

    #[test]
    fn test_classify_is_idempotent() {
        let stats = stats_of(&[("A", 5.0, 3), ("B", 5.0, 3), ("C", 5.0, 3), ("D", 20.0, 4)]);
        assert_eq!(classify(&stats), classify(&stats));
    }
}
