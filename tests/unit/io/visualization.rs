//! Tests for histogram binning and figure rendering

#[cfg(test)]
mod tests {
    use uvfade::analysis::analyzer::{AnalysisResult, IntensityAnalyzer, Timepoint};
    use uvfade::io::configuration::{
        HISTOGRAM_PANEL_HEIGHT, HISTOGRAM_PANEL_PADDING, HISTOGRAM_PANEL_WIDTH,
    };
    use uvfade::io::visualization::{histogram, render_histograms, save_histograms};
    use uvfade::spatial::{Image, Rectangle, RectanglePair};

    fn result(timepoints: usize) -> AnalysisResult {
        let pair = RectanglePair::new(
            Rectangle::new(0, 0, 4, 4).expect("positive size"),
            Rectangle::new(4, 0, 4, 4).expect("positive size"),
        );
        let series: Vec<(Timepoint, Image)> = (0..timepoints)
            .map(|t| {
                let data = (0..32u8).map(|i| 20 + i * 6).collect();
                (
                    Timepoint::new(t as f64).expect("valid"),
                    Image::from_gray(8, 4, data).expect("valid dimensions"),
                )
            })
            .collect();
        IntensityAnalyzer::with_rectangles(pair)
            .analyze_all(&series)
            .expect("valid series")
    }

    // Tests bin counts account for every value
    // Verified by dropping values in the top bin
    #[test]
    fn test_histogram_total() {
        let sample: Vec<u8> = (0..=255).collect();
        let counts = histogram(&sample, 50);

        assert_eq!(counts.len(), 50);
        assert_eq!(counts.iter().sum::<usize>(), 256);
    }

    // Tests extremes land in the first and last bins
    // Verified by indexing bins with value / bins
    #[test]
    fn test_histogram_extremes() {
        let counts = histogram(&[0, 0, 255], 10);

        assert_eq!(counts.first(), Some(&2));
        assert_eq!(counts.last(), Some(&1));
    }

    // Tests zero bins yields no counts
    // Verified by dividing by the bin count unguarded
    #[test]
    fn test_histogram_zero_bins() {
        assert!(histogram(&[1, 2, 3], 0).is_empty());
    }

    // Tests figure grid size follows the panel count
    // Verified by laying out one panel per row
    #[test]
    fn test_render_grid_dimensions() {
        let figure = render_histograms(&result(3));

        assert_eq!(
            figure.width(),
            2 * HISTOGRAM_PANEL_WIDTH + 3 * HISTOGRAM_PANEL_PADDING
        );
        assert_eq!(
            figure.height(),
            2 * HISTOGRAM_PANEL_HEIGHT + 3 * HISTOGRAM_PANEL_PADDING
        );
    }

    // Tests a single panel figure
    // Verified by reserving two columns regardless of count
    #[test]
    fn test_render_single_panel() {
        let figure = render_histograms(&result(1));
        assert_eq!(figure.width(), HISTOGRAM_PANEL_WIDTH + 2 * HISTOGRAM_PANEL_PADDING);
    }

    // Tests saving refuses an empty result and writes otherwise
    // Verified by removing the empty result check
    #[test]
    fn test_save_histograms() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("figures/histograms.png");

        assert!(save_histograms(&AnalysisResult::default(), &path).is_err());
        save_histograms(&result(2), &path).expect("figure saved");
        assert!(path.exists());
    }
}
