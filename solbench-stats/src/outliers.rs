//! Outlier Filtering
//!
//! Uses an IQR (Interquartile Range) fence to drop noisy samples before
//! central-tendency statistics are derived.
//!
//! Quartiles are picked by position (`sorted[n / 4]` and `sorted[3n / 4]`),
//! not interpolated. The fence is `[Q1 - 1.5*IQR, Q3 + 1.5*IQR]`, inclusive.

/// Samples below this count are returned untouched.
pub const MIN_FILTER_SAMPLES: usize = 4;

/// Fence multiplier applied to the IQR.
pub const IQR_FENCE: f64 = 1.5;

/// Minimum fraction of samples the filter must keep; below it the
/// unfiltered input is returned instead.
pub const MIN_KEPT_FRACTION: f64 = 0.5;

/// Inclusive acceptance bounds computed from positional quartiles
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IqrBounds {
    /// First quartile (`sorted[n / 4]`)
    pub q1: f64,
    /// Third quartile (`sorted[3n / 4]`)
    pub q3: f64,
    /// Lowest accepted value
    pub lower: f64,
    /// Highest accepted value
    pub upper: f64,
}

impl IqrBounds {
    /// Interquartile range
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }

    /// Whether `value` lies inside the fence (inclusive)
    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        self.lower <= value && value <= self.upper
    }
}

/// Compute the IQR fence for `samples`.
///
/// Returns `None` when there are fewer than [`MIN_FILTER_SAMPLES`] samples.
pub fn iqr_bounds(samples: &[f64]) -> Option<IqrBounds> {
    if samples.len() < MIN_FILTER_SAMPLES {
        return None;
    }

    let mut sorted = samples.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let n = sorted.len();
    let q1 = sorted[n / 4];
    let q3 = sorted[3 * n / 4];
    let iqr = q3 - q1;

    Some(IqrBounds {
        q1,
        q3,
        lower: q1 - IQR_FENCE * iqr,
        upper: q3 + IQR_FENCE * iqr,
    })
}

/// Remove outliers from `samples`, preserving acquisition order.
///
/// Fewer than four samples are returned unchanged. If the fence would keep
/// less than half of the input, the unfiltered input is returned instead.
///
/// # Examples
///
/// ```
/// use solbench_stats::filter_outliers;
///
/// let kept = filter_outliers(&[1.0, 2.0, 3.0, 4.0, 5.0, 100.0]);
/// assert_eq!(kept, vec![1.0, 2.0, 3.0, 4.0, 5.0]);
/// ```
pub fn filter_outliers(samples: &[f64]) -> Vec<f64> {
    let Some(bounds) = iqr_bounds(samples) else {
        return samples.to_vec();
    };

    let kept: Vec<f64> = samples
        .iter()
        .copied()
        .filter(|&x| bounds.contains(x))
        .collect();

    if (kept.len() as f64) < samples.len() as f64 * MIN_KEPT_FRACTION {
        samples.to_vec()
    } else {
        kept
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_input_unchanged() {
        let samples = vec![9.0, 1.0, 500.0];
        assert_eq!(filter_outliers(&samples), samples);
        assert!(filter_outliers(&[]).is_empty());
    }

    #[test]
    fn test_no_outliers() {
        let samples = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(filter_outliers(&samples), samples);
    }

    #[test]
    fn test_high_outlier_removed() {
        let samples = vec![3.0, 100.0, 1.0, 2.0, 5.0, 4.0];
        let kept = filter_outliers(&samples);

        // Order of the survivors is the acquisition order
        assert_eq!(kept, vec![3.0, 1.0, 2.0, 5.0, 4.0]);
    }

    #[test]
    fn test_low_outlier_removed() {
        let samples = vec![-1000.0, 10.0, 11.0, 12.0, 13.0, 14.0, 15.0];
        let kept = filter_outliers(&samples);

        assert_eq!(kept.len(), 6);
        assert!(!kept.contains(&-1000.0));
    }

    #[test]
    fn test_positional_quartiles() {
        // n = 8: q1 = sorted[2], q3 = sorted[6]
        let samples = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
        let bounds = iqr_bounds(&samples).unwrap();

        assert_eq!(bounds.q1, 3.0);
        assert_eq!(bounds.q3, 7.0);
        assert_eq!(bounds.iqr(), 4.0);
        assert_eq!(bounds.lower, -3.0);
        assert_eq!(bounds.upper, 13.0);
    }

    #[test]
    fn test_bounds_are_inclusive() {
        // q1 = 2, q3 = 4, fence = [-1, 7]
        let samples = vec![2.0, 2.0, 3.0, 4.0, 4.0, 7.0];
        assert_eq!(filter_outliers(&samples).len(), 6);
    }

    #[test]
    fn test_constant_samples_kept() {
        let samples = vec![5.0; 10];
        assert_eq!(filter_outliers(&samples), samples);
    }

    #[test]
    fn test_over_rejection_falls_back() {
        // NaN quartile makes the fence reject everything
        let samples = vec![1.0, 2.0, f64::NAN, f64::NAN, f64::NAN];
        let kept = filter_outliers(&samples);

        assert_eq!(kept.len(), samples.len());
        assert_eq!(kept[0], 1.0);
        assert_eq!(kept[1], 2.0);
        assert!(kept[2..].iter().all(|x| x.is_nan()));
    }
}
