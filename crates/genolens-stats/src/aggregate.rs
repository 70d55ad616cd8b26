//! Per-cohort grouping and summary statistics.

use std::collections::BTreeMap;

use genolens_common::{GenolensError, Result};
use serde::{Deserialize, Serialize};

/// Summary statistics for one cohort.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CohortStats {
    pub mean: f64,
    /// Sample standard deviation (n − 1 denominator).
    /// NaN when the cohort holds a single sample, never 0.0.
    pub std: f64,
    pub count: usize,
}

/// Group (cohort, value) samples by cohort and compute count, arithmetic
/// mean, and sample standard deviation per cohort.
///
/// The result is a `BTreeMap` so iteration order, and with it the float
/// summation order of any second-order statistic, is stable across runs.
///
/// Fails with `EmptyDataset` when there are no samples at all.
pub fn aggregate(samples: &[(String, f64)]) -> Result<BTreeMap<String, CohortStats>> {
    if samples.is_empty() {
        return Err(GenolensError::EmptyDataset);
    }

    let mut groups: BTreeMap<String, Vec<f64>> = BTreeMap::new();
    for (cohort, value) in samples {
        groups.entry(cohort.clone()).or_default().push(*value);
    }

    let stats = groups
        .into_iter()
        .map(|(cohort, values)| {
            let count = values.len();
            let mean = values.iter().sum::<f64>() / count as f64;
            let std = sample_std(&values, mean);
            (cohort, CohortStats { mean, std, count })
        })
        .collect();

    Ok(stats)
}

/// Sample standard deviation with an n − 1 denominator.
/// Undefined (NaN) for fewer than two values.
pub fn sample_std(values: &[f64], mean: f64) -> f64 {
    if values.len() < 2 {
        return f64::NAN;
    }
    let variance =
        values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    variance.sqrt()
}
