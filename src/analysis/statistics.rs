//! Descriptive statistics engine for one-dimensional intensity samples

use crate::io::error::{AnalysisError, Result, computation_error};
use crate::math::interpolation::{median_sorted, quartiles_sorted, sorted_copy};
use crate::math::moments::{kurtosis, mean, population_variance, skewness};
use num_traits::ToPrimitive;
use serde::Serialize;

/// Field names of [`StatisticsRecord`] in export column order
pub const STATISTICS_COLUMNS: [&str; 13] = [
    "min",
    "max",
    "mean",
    "median",
    "std",
    "variance",
    "range",
    "q1",
    "q3",
    "iqr",
    "skewness",
    "kurtosis",
    "pixel_count",
];

/// Fixed-shape descriptive summary of one sample
///
/// Spread and shape use population estimators (denominator `N`). Percentiles
/// use linear interpolation between order statistics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StatisticsRecord {
    /// Smallest value
    pub min: f64,
    /// Largest value
    pub max: f64,
    /// Arithmetic mean
    pub mean: f64,
    /// 50th percentile
    pub median: f64,
    /// Population standard deviation
    pub std: f64,
    /// Population variance
    pub variance: f64,
    /// `max - min`
    pub range: f64,
    /// 25th percentile
    pub q1: f64,
    /// 75th percentile
    pub q3: f64,
    /// `q3 - q1`
    pub iqr: f64,
    /// Fisher-Pearson skewness (population-biased)
    pub skewness: f64,
    /// Excess kurtosis (population-biased)
    pub kurtosis: f64,
    /// Number of values summarised
    pub pixel_count: usize,
}

impl StatisticsRecord {
    /// Float fields in [`STATISTICS_COLUMNS`] order, excluding `pixel_count`
    pub const fn float_fields(&self) -> [f64; 12] {
        [
            self.min,
            self.max,
            self.mean,
            self.median,
            self.std,
            self.variance,
            self.range,
            self.q1,
            self.q3,
            self.iqr,
            self.skewness,
            self.kurtosis,
        ]
    }
}

/// Summarise a non-empty numeric sample
///
/// All fields are computed over the whole sample; filtering is the extractor's
/// responsibility.
///
/// # Errors
///
/// Returns an error if:
/// - The sample is empty ([`AnalysisError::EmptyInput`])
/// - A value cannot be represented as `f64`
pub fn compute_statistics<T: ToPrimitive + Copy>(sample: &[T]) -> Result<StatisticsRecord> {
    if sample.is_empty() {
        return Err(AnalysisError::EmptyInput {
            operation: "compute_statistics",
        });
    }

    let values = sample
        .iter()
        .map(|v| {
            v.to_f64().ok_or_else(|| {
                computation_error("compute_statistics", &"value not representable as f64")
            })
        })
        .collect::<Result<Vec<f64>>>()?;

    let sorted = sorted_copy(&values);
    let (Some(&min), Some(&max)) = (sorted.first(), sorted.last()) else {
        return Err(AnalysisError::EmptyInput {
            operation: "compute_statistics",
        });
    };

    let mean_value = mean(&values).ok_or(AnalysisError::EmptyInput {
        operation: "mean",
    })?;
    let median = median_sorted(&sorted).ok_or(AnalysisError::EmptyInput {
        operation: "median",
    })?;
    let (q1, q3) = quartiles_sorted(&sorted).ok_or(AnalysisError::EmptyInput {
        operation: "quartiles",
    })?;

    // Identical values have no spread; their moments would only carry rounding noise
    let (variance, skew, kurt) = if min.total_cmp(&max).is_eq() {
        (0.0, 0.0, 0.0)
    } else {
        (
            population_variance(&values),
            skewness(&values),
            kurtosis(&values),
        )
    };

    Ok(StatisticsRecord {
        min,
        max,
        mean: mean_value,
        median,
        std: variance.sqrt(),
        variance,
        range: max - min,
        q1,
        q3,
        iqr: q3 - q1,
        skewness: skew,
        kurtosis: kurt,
        pixel_count: values.len(),
    })
}
