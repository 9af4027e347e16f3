//! Analysis constants and runtime configuration defaults

// Outlier rejection keeps values strictly inside (LOWER, UPPER)
/// Intensities at or below this value are treated as clipped shadows
pub const OUTLIER_LOWER_BOUND: u8 = 5;
/// Intensities at or above this value are treated as saturated highlights
pub const OUTLIER_UPPER_BOUND: u8 = 250;

// ITU-R BT.601 luma weights
/// Red channel weight for grayscale conversion
pub const LUMA_RED_WEIGHT: f64 = 0.299;
/// Green channel weight for grayscale conversion
pub const LUMA_GREEN_WEIGHT: f64 = 0.587;
/// Blue channel weight for grayscale conversion
pub const LUMA_BLUE_WEIGHT: f64 = 0.114;

/// Decimal places used for float columns in tabular export
pub const EXPORT_DECIMAL_PLACES: usize = 2;

// Histogram rendering
/// Number of bins covering the 0-255 intensity range
pub const HISTOGRAM_BINS: usize = 50;
/// Histogram panels per row in the rendered figure
pub const HISTOGRAM_PANELS_PER_ROW: usize = 2;
/// Width of a single histogram panel in pixels
pub const HISTOGRAM_PANEL_WIDTH: u32 = 500;
/// Height of a single histogram panel in pixels
pub const HISTOGRAM_PANEL_HEIGHT: u32 = 300;
/// Gap between panels and around the figure
pub const HISTOGRAM_PANEL_PADDING: u32 = 10;
/// Opacity used when overlaying the two regions' bars
pub const HISTOGRAM_BAR_ALPHA: f64 = 0.6;

// Region colors shared by overlays and histograms
/// Color used for the treated region
pub const TREATED_COLOR: [u8; 4] = [0, 160, 0, 255];
/// Color used for the control region
pub const CONTROL_COLOR: [u8; 4] = [200, 0, 0, 255];

/// Outline thickness for the ROI overlay preview
pub const OVERLAY_LINE_THICKNESS: u32 = 3;

/// Treated rectangle used when none is configured, as `(x, y, width, height)`
pub const DEFAULT_TREATED_ROI: (u32, u32, u32, u32) = (620, 813, 300, 326);
/// Control rectangle used when none is configured, as `(x, y, width, height)`
pub const DEFAULT_CONTROL_ROI: (u32, u32, u32, u32) = (1240, 773, 300, 373);

/// Elapsed hours assumed for each image when none are given
pub const DEFAULT_TIMEPOINTS: &str = "0,2,4,6";

/// Attempts allowed per rectangle in the interactive prompt
pub const MAX_PROMPT_ATTEMPTS: usize = 3;

// Output settings
/// Default directory for all generated files
pub const DEFAULT_OUTPUT_DIR: &str = "outputs";
/// Subdirectory for tabular and structured reports
pub const REPORTS_SUBDIR: &str = "reports";
/// Subdirectory for rendered figures
pub const FIGURES_SUBDIR: &str = "figures";
/// File name of the tabular export
pub const CSV_FILE_NAME: &str = "uv_data.csv";
/// File name of the structured export
pub const JSON_FILE_NAME: &str = "analysis_results.json";
/// File name of the histogram figure
pub const HISTOGRAM_FILE_NAME: &str = "histograms.png";
/// File name of the ROI overlay preview
pub const OVERLAY_FILE_NAME: &str = "roi_overlay.png";

// Logging
/// Log specification used unless `RUST_LOG` overrides it
pub const DEFAULT_LOG_SPEC: &str = "info";
/// Log specification used in quiet mode
pub const QUIET_LOG_SPEC: &str = "warn";
