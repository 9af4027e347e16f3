//! Tests for argument parsing and run orchestration

#[cfg(test)]
mod tests {
    use clap::Parser;
    use image::{GrayImage, Luma};
    use std::path::{Path, PathBuf};
    use uvfade::AnalysisError;
    use uvfade::analysis::analyzer::Timepoint;
    use uvfade::io::cli::{Cli, OutputPaths, RunProcessor, parse_timepoint_list};

    fn write_png(dir: &Path, name: &str, value: u8) -> String {
        let path = dir.join(name);
        GrayImage::from_pixel(30, 20, Luma([value]))
            .save(&path)
            .expect("png written");
        path.to_string_lossy().into_owned()
    }

    fn path_arg(path: &Path) -> String {
        path.to_string_lossy().into_owned()
    }

    // Tests comma-separated timepoints are parsed
    // Verified by splitting on whitespace
    #[test]
    fn test_parse_timepoint_list() {
        let parsed = parse_timepoint_list("0, 2.5,6").expect("valid list");
        let hours: Vec<f64> = parsed.into_iter().map(Timepoint::hours).collect();

        assert_eq!(hours, vec![0.0, 2.5, 6.0]);
        assert!(parse_timepoint_list("0,-2").is_err());
        assert!(parse_timepoint_list("0,,2").is_err());
    }

    // Tests default timepoints apply when none are given
    // Verified by returning an empty list
    #[test]
    fn test_resolved_timepoints_default() {
        let cli = Cli::try_parse_from(["uvfade", "a.png"]).expect("valid args");
        assert_eq!(cli.resolved_timepoints().map(|t| t.len()).ok(), Some(4));

        let cli = Cli::try_parse_from(["uvfade", "a.png", "b.png", "-t", "0,12"])
            .expect("valid args");
        assert_eq!(cli.resolved_timepoints().map(|t| t.len()).ok(), Some(2));
    }

    // Tests rectangles must be given together
    // Verified by removing the requires constraint
    #[test]
    fn test_rectangles_require_each_other() {
        assert!(Cli::try_parse_from(["uvfade", "a.png", "--treated", "1,2,3,4"]).is_err());

        let cli = Cli::try_parse_from([
            "uvfade",
            "a.png",
            "--treated",
            "1,2,3,4",
            "--control",
            "5,6,7,8",
        ])
        .expect("valid args");
        let pair = cli.rectangle_pair().expect("both rectangles given");
        assert_eq!(pair.treated.to_string(), "1,2,3,4");
        assert_eq!(pair.control.to_string(), "5,6,7,8");
    }

    // Tests malformed or conflicting options are rejected
    // Verified by accepting interactive alongside fixed rectangles
    #[test]
    fn test_invalid_arguments() {
        assert!(Cli::try_parse_from(["uvfade"]).is_err());
        assert!(Cli::try_parse_from(["uvfade", "a.png", "-t", "x"]).is_err());
        assert!(
            Cli::try_parse_from([
                "uvfade",
                "a.png",
                "--treated",
                "1,2,0,4",
                "--control",
                "5,6,7,8",
            ])
            .is_err()
        );
        assert!(
            Cli::try_parse_from([
                "uvfade",
                "a.png",
                "-i",
                "--treated",
                "1,2,3,4",
                "--control",
                "5,6,7,8",
            ])
            .is_err()
        );
    }

    // Tests output file layout under the output directory
    // Verified by writing figures into the reports directory
    #[test]
    fn test_output_paths() {
        let paths = OutputPaths::under(Path::new("out"));

        assert_eq!(paths.csv, PathBuf::from("out/reports/uv_data.csv"));
        assert_eq!(paths.json, PathBuf::from("out/reports/analysis_results.json"));
        assert_eq!(paths.histograms, PathBuf::from("out/figures/histograms.png"));
        assert_eq!(paths.overlay, PathBuf::from("out/figures/roi_overlay.png"));

        let cli = Cli::try_parse_from(["uvfade", "a.png", "-o", "out"]).expect("valid args");
        assert_eq!(cli.output_paths(), paths);
    }

    // Tests a full run writes every output
    // Verified by skipping the JSON export
    #[test]
    fn test_run_writes_outputs() {
        let dir = tempfile::tempdir().expect("temp dir");
        let first = write_png(dir.path(), "t0.png", 200);
        let second = write_png(dir.path(), "t2.png", 120);
        let out = path_arg(&dir.path().join("out"));

        let cli = Cli::try_parse_from([
            "uvfade",
            first.as_str(),
            second.as_str(),
            "-t",
            "0,2",
            "--treated",
            "0,0,10,10",
            "--control",
            "15,5,10,10",
            "-o",
            out.as_str(),
            "--quiet",
        ])
        .expect("valid args");
        let paths = cli.output_paths();

        let result = RunProcessor::new(cli).run().expect("run succeeds");

        assert_eq!(result.len(), 2);
        assert!(paths.csv.exists());
        assert!(paths.json.exists());
        assert!(paths.histograms.exists());
        assert!(paths.overlay.exists());
    }

    // Tests optional figures are skipped on request
    // Verified by ignoring the no-plot flag
    #[test]
    fn test_run_without_figures() {
        let dir = tempfile::tempdir().expect("temp dir");
        let image = write_png(dir.path(), "t0.png", 100);
        let out = path_arg(&dir.path().join("out"));

        let cli = Cli::try_parse_from([
            "uvfade",
            image.as_str(),
            "-t",
            "0",
            "--treated",
            "0,0,5,5",
            "--control",
            "5,5,5,5",
            "-o",
            out.as_str(),
            "--no-plot",
            "--no-overlay",
            "-q",
        ])
        .expect("valid args");
        let paths = cli.output_paths();

        RunProcessor::new(cli).run().expect("run succeeds");

        assert!(paths.csv.exists());
        assert!(!paths.histograms.exists());
        assert!(!paths.overlay.exists());
    }

    // Tests a timepoint count that differs from the image count fails before export
    // Verified by zipping to the shorter list
    #[test]
    fn test_run_mismatched_timepoints() {
        let dir = tempfile::tempdir().expect("temp dir");
        let image = write_png(dir.path(), "t0.png", 100);
        let out = path_arg(&dir.path().join("out"));

        let cli = Cli::try_parse_from([
            "uvfade",
            image.as_str(),
            "-o",
            out.as_str(),
            "-q",
        ])
        .expect("valid args");
        let paths = cli.output_paths();

        let result = RunProcessor::new(cli).run();
        assert!(matches!(result, Err(AnalysisError::InvalidParameter { .. })));
        assert!(!paths.csv.exists());
    }

    // Tests an unreadable image aborts the run
    // Verified by skipping images that fail to load
    #[test]
    fn test_run_missing_image() {
        let dir = tempfile::tempdir().expect("temp dir");
        let missing = path_arg(&dir.path().join("missing.png"));

        let cli = Cli::try_parse_from([
            "uvfade",
            missing.as_str(),
            "-t",
            "0",
            "-q",
        ])
        .expect("valid args");

        let result = RunProcessor::new(cli).run();
        assert!(matches!(result, Err(AnalysisError::ImageLoad { .. })));
    }
}
