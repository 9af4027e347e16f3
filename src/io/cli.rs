//! Command-line interface wiring image loading, analysis and export into one run

use crate::analysis::analyzer::{AnalysisResult, IntensityAnalyzer, Timepoint, pair_series};
use crate::analysis::providers::{FixedProvider, InteractiveProvider, RectanglePairProvider};
use crate::io::configuration::{
    CSV_FILE_NAME, DEFAULT_OUTPUT_DIR, DEFAULT_TIMEPOINTS, FIGURES_SUBDIR, HISTOGRAM_FILE_NAME,
    JSON_FILE_NAME, OVERLAY_FILE_NAME, REPORTS_SUBDIR,
};
use crate::io::error::{Result, invalid_parameter};
use crate::io::export::{save_csv, save_json};
use crate::io::image::{load_series_with, save_roi_overlay};
use crate::io::progress::ProgressManager;
use crate::io::report::write_summary;
use crate::io::visualization::save_histograms;
use crate::spatial::{Image, Rectangle, RectanglePair};
use clap::Parser;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "uvfade")]
#[command(
    author,
    version,
    about = "Measure intensity decay of a treated region against a control region"
)]
/// Command-line arguments for an analysis run
// CLI tools commonly need multiple boolean flags for optional outputs
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Photographs in chronological order
    #[arg(value_name = "IMAGES", required = true, num_args = 1..)]
    pub images: Vec<PathBuf>,

    /// Elapsed hours for each image, comma-separated [default: 0,2,4,6]
    #[arg(short, long, value_delimiter = ',', value_parser = parse_timepoint)]
    pub timepoints: Vec<Timepoint>,

    /// Treated rectangle as x,y,width,height
    #[arg(long, value_parser = parse_rectangle, requires = "control")]
    pub treated: Option<Rectangle>,

    /// Control rectangle as x,y,width,height
    #[arg(long, value_parser = parse_rectangle, requires = "treated")]
    pub control: Option<Rectangle>,

    /// Prompt for both rectangles on the terminal
    #[arg(short, long, conflicts_with_all = ["treated", "control"])]
    pub interactive: bool,

    /// Directory receiving reports and figures
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Skip the histogram figure
    #[arg(long)]
    pub no_plot: bool,

    /// Skip the ROI overlay preview
    #[arg(long)]
    pub no_overlay: bool,

    /// Suppress progress output and lower the log level to warnings
    #[arg(short, long)]
    pub quiet: bool,
}

fn parse_timepoint(s: &str) -> std::result::Result<Timepoint, String> {
    s.parse::<Timepoint>().map_err(|e| e.to_string())
}

fn parse_rectangle(s: &str) -> std::result::Result<Rectangle, String> {
    s.parse::<Rectangle>().map_err(|e| e.to_string())
}

/// Parse a comma-separated list of elapsed hours
///
/// # Errors
///
/// Returns an error if any entry is not a finite, non-negative number
pub fn parse_timepoint_list(list: &str) -> Result<Vec<Timepoint>> {
    list.split(',').map(str::parse::<Timepoint>).collect()
}

impl Cli {
    /// Timepoints given on the command line, or the default series
    ///
    /// # Errors
    ///
    /// Returns an error if the default list fails to parse
    pub fn resolved_timepoints(&self) -> Result<Vec<Timepoint>> {
        if self.timepoints.is_empty() {
            parse_timepoint_list(DEFAULT_TIMEPOINTS)
        } else {
            Ok(self.timepoints.clone())
        }
    }

    /// Rectangle pair given on the command line, if both were supplied
    pub const fn rectangle_pair(&self) -> Option<RectanglePair> {
        match (self.treated, self.control) {
            (Some(treated), Some(control)) => Some(RectanglePair { treated, control }),
            _ => None,
        }
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Locations of every file the run writes
    pub fn output_paths(&self) -> OutputPaths {
        OutputPaths::under(&self.output_dir)
    }
}

/// Files written by a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    /// Tabular export
    pub csv: PathBuf,
    /// Structured export
    pub json: PathBuf,
    /// Histogram figure
    pub histograms: PathBuf,
    /// ROI overlay preview
    pub overlay: PathBuf,
}

impl OutputPaths {
    /// Standard layout: reports and figures subdirectories under `root`
    pub fn under(root: &Path) -> Self {
        let reports = root.join(REPORTS_SUBDIR);
        let figures = root.join(FIGURES_SUBDIR);
        Self {
            csv: reports.join(CSV_FILE_NAME),
            json: reports.join(JSON_FILE_NAME),
            histograms: figures.join(HISTOGRAM_FILE_NAME),
            overlay: figures.join(OVERLAY_FILE_NAME),
        }
    }
}

/// Runs a whole analysis from CLI arguments: load, establish ROIs, analyse, export
pub struct RunProcessor {
    cli: Cli,
    progress: ProgressManager,
}

impl RunProcessor {
    /// Create a processor for the given CLI arguments
    pub const fn new(cli: Cli) -> Self {
        let progress = ProgressManager::new(cli.should_show_progress());
        Self { cli, progress }
    }

    /// Run the analysis, write every output and print the summary to stdout
    ///
    /// # Errors
    ///
    /// Returns an error if any stage fails; no export is written unless the
    /// analysis itself succeeded
    pub fn process(&mut self) -> Result<()> {
        let result = self.run()?;
        write_summary(&result, std::io::stdout().lock())?;

        let first = result
            .iter()
            .next()
            .map(|(timepoint, tr)| (*timepoint, tr.treated.pixel_count));
        if let Some((timepoint, pixels)) = first {
            log::info!("Total pixels analyzed at {timepoint}h treated ROI: {pixels}");
        }
        Ok(())
    }

    /// Load, analyse and export, returning the analysis result
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - An image cannot be loaded
    /// - The number of timepoints does not match the number of images
    /// - The rectangles cannot be established
    /// - Analysis or any export fails
    pub fn run(&mut self) -> Result<AnalysisResult> {
        let timepoints = self.cli.resolved_timepoints()?;
        let images = self.load_images()?;
        let series = pair_series(&timepoints, images)?;

        let reference = series
            .first()
            .map(|(_, image)| image)
            .ok_or_else(|| invalid_parameter("images", &0, &"at least one image is required"))?;

        let mut analyzer = IntensityAnalyzer::new();
        let mut provider = self.provider()?;
        let pair = analyzer.establish(provider.as_mut(), reference)?;

        let paths = self.cli.output_paths();
        if !self.cli.no_overlay {
            save_roi_overlay(reference, &pair, &paths.overlay)?;
        }

        self.progress.start_stage("Analysing", series.len());
        let progress = &self.progress;
        let result = analyzer.analyze_all_with(&series, |timepoint| {
            progress.advance(format!("{timepoint}h"));
        })?;

        self.export(&result, &paths)?;
        self.progress.finish_stage();
        Ok(result)
    }

    fn load_images(&mut self) -> Result<Vec<Image>> {
        self.progress.start_stage("Loading", self.cli.images.len());
        let progress = &self.progress;
        let images = load_series_with(&self.cli.images, |path| {
            progress.advance(
                path.file_name()
                    .unwrap_or_default()
                    .to_string_lossy()
                    .to_string(),
            );
        })?;
        self.progress.finish_stage();
        Ok(images)
    }

    fn provider(&self) -> Result<Box<dyn RectanglePairProvider>> {
        if self.cli.interactive {
            return Ok(Box::new(InteractiveProvider::stdio()));
        }
        if let Some(pair) = self.cli.rectangle_pair() {
            return Ok(Box::new(FixedProvider::new(pair)));
        }
        log::info!("No rectangles given; using the default fixed ROIs");
        Ok(Box::new(FixedProvider::from_defaults()?))
    }

    fn export(&mut self, result: &AnalysisResult, paths: &OutputPaths) -> Result<()> {
        let steps = if self.cli.no_plot { 2 } else { 3 };
        self.progress.start_stage("Exporting", steps);

        save_csv(result, &paths.csv)?;
        self.progress.advance(CSV_FILE_NAME);
        save_json(result, &paths.json)?;
        self.progress.advance(JSON_FILE_NAME);

        if !self.cli.no_plot {
            save_histograms(result, &paths.histograms)?;
            self.progress.advance(HISTOGRAM_FILE_NAME);
        }
        Ok(())
    }
}
