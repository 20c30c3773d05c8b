//! Summary Statistics
//!
//! Every derived value is computed from the CLEANED sample set (outliers
//! removed by [`filter_outliers`]). An empty set yields all-zero statistics.
//!
//! The median is the element at `sorted[len / 2]`: for even-length sets this
//! is the upper of the two middle values, never their average.

use crate::outliers::filter_outliers;

/// Summary of one sample column
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SummaryStatistics {
    /// Number of raw samples before filtering
    pub sample_count: usize,
    /// Number of samples kept by the outlier filter
    pub kept_count: usize,
    /// Sum of kept samples
    pub total: f64,
    /// Arithmetic mean of kept samples
    pub mean: f64,
    /// Floor-index median of kept samples
    pub median: f64,
    /// Smallest kept sample
    pub min: f64,
    /// Largest kept sample
    pub max: f64,
    /// Population standard deviation of kept samples
    pub std_dev: f64,
}

impl SummaryStatistics {
    /// Derive statistics from an already-filtered sample set.
    pub fn from_filtered(filtered: &[f64]) -> Self {
        if filtered.is_empty() {
            return Self::default();
        }

        let n = filtered.len() as f64;
        let total: f64 = filtered.iter().sum();
        let mean = total / n;

        let variance = filtered.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;

        let min = filtered.iter().copied().fold(f64::INFINITY, f64::min);
        let max = filtered.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        Self {
            sample_count: filtered.len(),
            kept_count: filtered.len(),
            total,
            mean,
            median: floor_median(filtered),
            min,
            max,
            std_dev: variance.sqrt(),
        }
    }

    /// Coefficient of variation as a percentage of the mean.
    ///
    /// Zero when the mean is not positive.
    pub fn coefficient_of_variation(&self) -> f64 {
        if self.mean > 0.0 {
            (self.std_dev / self.mean) * 100.0
        } else {
            0.0
        }
    }

    /// Number of samples the outlier filter rejected
    pub fn outlier_count(&self) -> usize {
        self.sample_count - self.kept_count
    }
}

/// Filter outliers from `samples`, then summarize what remains.
pub fn compute_summary(samples: &[f64]) -> SummaryStatistics {
    let filtered = filter_outliers(samples);
    SummaryStatistics {
        sample_count: samples.len(),
        ..SummaryStatistics::from_filtered(&filtered)
    }
}

/// Arithmetic mean, 0.0 for an empty slice
pub fn mean(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        0.0
    } else {
        samples.iter().sum::<f64>() / samples.len() as f64
    }
}

/// Median picked at index `len / 2` of the sorted samples, 0.0 for an empty slice
pub fn floor_median(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    let mut sorted = samples.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    sorted[sorted.len() / 2]
}
