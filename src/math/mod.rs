//! Mathematical utilities for descriptive statistics

/// Linear interpolation percentiles over sorted data
pub mod interpolation;
/// Population central moments, skewness and kurtosis
pub mod moments;
