#![warn(missing_docs)]
//! SolBench Statistical Engine
//!
//! Pure, deterministic helpers used to turn raw measurement samples into
//! report statistics:
//! - Outlier rejection via a positional-quartile IQR fence
//! - Summary statistics (mean, floor-index median, extremes, population stddev)
//! - Coefficient of variation

mod outliers;
mod summary;

pub use outliers::{
    IQR_FENCE, IqrBounds, MIN_FILTER_SAMPLES, MIN_KEPT_FRACTION, filter_outliers, iqr_bounds,
};
pub use summary::{SummaryStatistics, compute_summary, floor_median, mean};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants() {
        assert_eq!(MIN_FILTER_SAMPLES, 4);
        assert!((IQR_FENCE - 1.5).abs() < f64::EPSILON);
        assert!((MIN_KEPT_FRACTION - 0.5).abs() < f64::EPSILON);
    }
}
