//! Tests for population moments, skewness and kurtosis

#[cfg(test)]
mod tests {
    use uvfade::math::moments::{
        central_moment, is_negligible_variance, kurtosis, mean, population_variance, skewness,
    };

    const FIVE: [f64; 5] = [10.0, 20.0, 30.0, 40.0, 50.0];

    // Tests mean of empty and non-empty input
    // Verified by dividing by n - 1
    #[test]
    fn test_mean() {
        assert_eq!(mean(&[]), None);
        assert_eq!(mean(&[1.0, 2.0, 3.0]), Some(2.0));
    }

    // Tests second central moment divides by N
    // Verified by using the sample (n - 1) denominator
    #[test]
    fn test_central_moment_population() {
        assert!((central_moment(&FIVE, 30.0, 2) - 200.0).abs() < 1e-9);
        assert!((population_variance(&FIVE) - 200.0).abs() < 1e-9);
        assert_eq!(central_moment(&[], 0.0, 2), 0.0);
    }

    // Tests symmetric data has zero skewness
    // Verified by dropping the cube in the third moment
    #[test]
    fn test_skewness_symmetric() {
        assert!(skewness(&FIVE).abs() < 1e-12);
    }

    // Tests a long right tail gives positive skewness
    // Verified by negating the third moment
    #[test]
    fn test_skewness_right_tail() {
        assert!(skewness(&[1.0, 1.0, 1.0, 10.0]) > 0.0);
        assert!(skewness(&[10.0, 10.0, 10.0, 1.0]) < 0.0);
    }

    // Tests excess kurtosis of evenly spaced values
    // Verified by omitting the -3 excess correction
    #[test]
    fn test_kurtosis_uniform_spacing() {
        assert!((kurtosis(&FIVE) + 1.3).abs() < 1e-12);
    }

    // Tests degenerate samples report zero shape statistics
    // Verified by removing the zero-variance guard
    #[test]
    fn test_shape_degenerate() {
        assert_eq!(skewness(&[]), 0.0);
        assert_eq!(kurtosis(&[]), 0.0);
        assert_eq!(skewness(&[4.0; 10]), 0.0);
        assert_eq!(kurtosis(&[4.0; 10]), 0.0);
        assert_eq!(population_variance(&[]), 0.0);
    }

    // Tests constant non-representable floats still report zero shape
    // Verified by comparing the second moment against exact zero
    #[test]
    fn test_shape_constant_float_residue() {
        assert_eq!(skewness(&[0.1; 3]), 0.0);
        assert_eq!(kurtosis(&[0.1; 3]), 0.0);
        assert_eq!(skewness(&[0.1; 10]), 0.0);
        assert_eq!(kurtosis(&[0.1; 10]), 0.0);
    }

    // Tests the variance tolerance scales with the magnitude of the mean
    // Verified by using an absolute tolerance
    #[test]
    fn test_negligible_variance_scale() {
        assert!(is_negligible_variance(0.0, 0.0));
        assert!(is_negligible_variance(1e-34, 0.1));
        assert!(!is_negligible_variance(1e-20, 1e-9));
        assert!(!is_negligible_variance(200.0, 30.0));
    }
}
