//! Linear interpolation percentiles over sorted samples
//!
//! Uses the "type 7" estimator: for `n` sorted values the percentile `p` sits at
//! fractional rank `h = (n - 1) * p`, interpolated between the two bracketing
//! order statistics. Median and quartiles share this single rule so results are
//! reproducible regardless of the input ordering.

/// Percentile `p` (in `[0, 1]`) of ascending-sorted data
///
/// Returns `None` for empty input. `p` outside `[0, 1]` is clamped.
pub fn percentile_sorted(sorted: &[f64], p: f64) -> Option<f64> {
    let last = sorted.len().checked_sub(1)?;
    let rank = last as f64 * p.clamp(0.0, 1.0);

    let lower_index = rank.floor() as usize;
    let fraction = rank - rank.floor();

    let lower = *sorted.get(lower_index)?;
    // At the top rank there is no upper neighbour and the fraction is zero
    let upper = sorted.get(lower_index + 1).copied().unwrap_or(lower);

    Some(fraction.mul_add(upper - lower, lower))
}

/// Median of ascending-sorted data
pub fn median_sorted(sorted: &[f64]) -> Option<f64> {
    percentile_sorted(sorted, 0.5)
}

/// Lower and upper quartiles of ascending-sorted data
pub fn quartiles_sorted(sorted: &[f64]) -> Option<(f64, f64)> {
    Some((
        percentile_sorted(sorted, 0.25)?,
        percentile_sorted(sorted, 0.75)?,
    ))
}

/// Sort a copy of the data ascending using a total order on floats
pub fn sorted_copy(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted
}
