//! Population central moments and the shape statistics built on them
//!
//! All estimators divide by `N` (population, biased). Skewness is the
//! Fisher-Pearson coefficient `m3 / m2^1.5` and kurtosis is the excess form
//! `m4 / m2^2 - 3`. Degenerate inputs (empty, or zero variance) report 0 for
//! both shape statistics so downstream consumers never see NaN.
//!
//! Variance counts as zero once it is within rounding error of `mean^2`; a
//! constant float sample such as `[0.1; 3]` leaves a residue near `1e-34`.

/// Arithmetic mean, or `None` for empty input
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// `k`-th central moment about `center`, dividing by `N`
pub fn central_moment(values: &[f64], center: f64, k: i32) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().map(|&v| (v - center).powi(k)).sum::<f64>() / values.len() as f64
}

/// True when `m2` is indistinguishable from zero at the scale of `center`
pub const fn is_negligible_variance(m2: f64, center: f64) -> bool {
    m2 <= f64::EPSILON * center * center
}

/// Population variance (second central moment)
pub fn population_variance(values: &[f64]) -> f64 {
    mean(values).map_or(0.0, |m| central_moment(values, m, 2))
}

/// Population-biased skewness; 0 for empty or constant samples
pub fn skewness(values: &[f64]) -> f64 {
    let Some(m) = mean(values) else {
        return 0.0;
    };
    let m2 = central_moment(values, m, 2);
    if is_negligible_variance(m2, m) {
        return 0.0;
    }
    central_moment(values, m, 3) / m2.powf(1.5)
}

/// Population-biased excess kurtosis; 0 for empty or constant samples
pub fn kurtosis(values: &[f64]) -> f64 {
    let Some(m) = mean(values) else {
        return 0.0;
    };
    let m2 = central_moment(values, m, 2);
    if is_negligible_variance(m2, m) {
        return 0.0;
    }
    central_moment(values, m, 4) / (m2 * m2) - 3.0
}
