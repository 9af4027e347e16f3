//! Orchestrates extraction and statistics across timepoints and regions

use crate::analysis::extraction::{IntensitySample, extract_intensities};
use crate::analysis::providers::RectanglePairProvider;
use crate::analysis::statistics::{StatisticsRecord, compute_statistics};
use crate::io::error::{AnalysisError, Result, invalid_parameter};
use crate::spatial::{ClippedRect, Image, Rectangle, RectanglePair};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::collections::btree_map;
use std::fmt;
use std::str::FromStr;

/// Which of the two measured rectangles a result belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Region {
    /// Area covered by the treatment
    Treated,
    /// Untreated reference area
    Control,
}

impl Region {
    /// Both regions in output order
    pub const ALL: [Self; 2] = [Self::Treated, Self::Control];

    /// Stable label used in exports
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Treated => "treated",
            Self::Control => "control",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Elapsed time of a photograph, in hours
///
/// Totally ordered so it can key the result map; only finite, non-negative
/// values are accepted.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(transparent)]
pub struct Timepoint(f64);

impl Timepoint {
    /// Validate and wrap an elapsed time
    ///
    /// # Errors
    ///
    /// Returns an error if `hours` is negative, NaN or infinite
    pub fn new(hours: f64) -> Result<Self> {
        if !hours.is_finite() || hours < 0.0 {
            return Err(invalid_parameter(
                "timepoint",
                &hours,
                &"must be a finite, non-negative number of hours",
            ));
        }
        // Adding zero folds -0.0 into 0.0 so both key the same entry
        Ok(Self(hours + 0.0))
    }

    /// Elapsed hours
    pub const fn hours(self) -> f64 {
        self.0
    }
}

impl PartialEq for Timepoint {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Timepoint {}

impl PartialOrd for Timepoint {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Timepoint {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl fmt::Display for Timepoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Shortest form that parses back exactly; whole hours have no ".0"
        write!(f, "{}", self.0)
    }
}

impl FromStr for Timepoint {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self> {
        let hours = s
            .trim()
            .parse::<f64>()
            .map_err(|e| invalid_parameter("timepoint", &s, &e))?;
        Self::new(hours)
    }
}

/// Outcome for one region of one image
#[derive(Debug, Clone, PartialEq)]
pub struct RegionResult {
    /// Cleaned intensities that were summarised
    pub sample: IntensitySample,
    /// Summary of `sample`
    pub statistics: StatisticsRecord,
    /// Rectangle as requested
    pub rectangle: Rectangle,
    /// Rectangle after clipping to the image
    pub clamped: ClippedRect,
    /// Length of `sample`
    pub pixel_count: usize,
}

/// Treated and control outcomes for one image
#[derive(Debug, Clone, PartialEq)]
pub struct TimepointResult {
    /// Outcome for the treated rectangle
    pub treated: RegionResult,
    /// Outcome for the control rectangle
    pub control: RegionResult,
}

impl TimepointResult {
    /// Look up a region's outcome by label
    pub const fn region(&self, region: Region) -> &RegionResult {
        match region {
            Region::Treated => &self.treated,
            Region::Control => &self.control,
        }
    }
}

/// Results of a whole run keyed by timepoint, iterated in ascending time order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AnalysisResult {
    timepoints: BTreeMap<Timepoint, TimepointResult>,
}

impl AnalysisResult {
    /// Result for a single timepoint
    pub fn get(&self, timepoint: Timepoint) -> Option<&TimepointResult> {
        self.timepoints.get(&timepoint)
    }

    /// All timepoints in ascending order
    pub fn timepoints(&self) -> Vec<Timepoint> {
        self.timepoints.keys().copied().collect()
    }

    /// Iterate `(timepoint, result)` pairs in ascending order
    pub fn iter(&self) -> btree_map::Iter<'_, Timepoint, TimepointResult> {
        self.timepoints.iter()
    }

    /// Number of analysed timepoints
    pub fn len(&self) -> usize {
        self.timepoints.len()
    }

    /// True when nothing was analysed
    pub fn is_empty(&self) -> bool {
        self.timepoints.is_empty()
    }
}

impl<'a> IntoIterator for &'a AnalysisResult {
    type Item = (&'a Timepoint, &'a TimepointResult);
    type IntoIter = btree_map::Iter<'a, Timepoint, TimepointResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.timepoints.iter()
    }
}

/// Pair timepoint labels with images in the order given
///
/// # Errors
///
/// Returns an error if the two lists have different lengths
pub fn pair_series(timepoints: &[Timepoint], images: Vec<Image>) -> Result<Vec<(Timepoint, Image)>> {
    if timepoints.len() != images.len() {
        return Err(invalid_parameter(
            "timepoints",
            &timepoints.len(),
            &format!("expected one timepoint per image ({} images)", images.len()),
        ));
    }
    Ok(timepoints.iter().copied().zip(images).collect())
}

/// Runs the extractor and statistics engine over every image for both rectangles
#[derive(Debug, Clone, Default)]
pub struct IntensityAnalyzer {
    treated: Option<Rectangle>,
    control: Option<Rectangle>,
}

impl IntensityAnalyzer {
    /// Create an analyzer with no rectangles established
    pub const fn new() -> Self {
        Self {
            treated: None,
            control: None,
        }
    }

    /// Create an analyzer with both rectangles already established
    pub const fn with_rectangles(pair: RectanglePair) -> Self {
        Self {
            treated: Some(pair.treated),
            control: Some(pair.control),
        }
    }

    /// Replace both rectangles
    pub const fn set_rectangles(&mut self, pair: RectanglePair) {
        self.treated = Some(pair.treated);
        self.control = Some(pair.control);
    }

    /// Ask a provider for the rectangle pair, using `reference` for display or validation
    ///
    /// # Errors
    ///
    /// Propagates any error from the provider
    pub fn establish(
        &mut self,
        provider: &mut dyn RectanglePairProvider,
        reference: &Image,
    ) -> Result<RectanglePair> {
        let pair = provider.provide(reference)?;
        log::info!("Treated ROI: {}", pair.treated);
        log::info!("Control ROI: {}", pair.control);
        self.set_rectangles(pair);
        Ok(pair)
    }

    /// The established rectangle pair
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::RoiNotSet`] naming the first missing region
    pub const fn rectangles(&self) -> Result<RectanglePair> {
        match (self.treated, self.control) {
            (Some(treated), Some(control)) => Ok(RectanglePair { treated, control }),
            (None, _) => Err(AnalysisError::RoiNotSet {
                region: Region::Treated.as_str(),
            }),
            (Some(_), None) => Err(AnalysisError::RoiNotSet {
                region: Region::Control.as_str(),
            }),
        }
    }

    /// Analyse both regions of a single image
    ///
    /// # Errors
    ///
    /// Returns an error if either rectangle is missing or a region yields no pixels
    pub fn analyze_timepoint(&self, image: &Image) -> Result<TimepointResult> {
        let pair = self.rectangles()?;
        Ok(TimepointResult {
            treated: Self::analyze_region(image, pair.treated)?,
            control: Self::analyze_region(image, pair.control)?,
        })
    }

    /// Analyse every `(timepoint, image)` pair
    ///
    /// The whole run fails on the first error; no partial result is returned.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Either rectangle has not been established
    /// - The series is empty or repeats a timepoint
    /// - Any region yields no pixels
    pub fn analyze_all(&self, series: &[(Timepoint, Image)]) -> Result<AnalysisResult> {
        self.analyze_all_with(series, |_| {})
    }

    /// [`Self::analyze_all`], calling `on_done` after each timepoint completes
    ///
    /// # Errors
    ///
    /// Same conditions as [`Self::analyze_all`]
    pub fn analyze_all_with<F: FnMut(Timepoint)>(
        &self,
        series: &[(Timepoint, Image)],
        mut on_done: F,
    ) -> Result<AnalysisResult> {
        self.rectangles()?;

        if series.is_empty() {
            return Err(invalid_parameter(
                "images",
                &0,
                &"at least one image is required",
            ));
        }

        let mut timepoints = BTreeMap::new();
        for (timepoint, image) in series {
            if timepoints.contains_key(timepoint) {
                return Err(invalid_parameter(
                    "timepoints",
                    timepoint,
                    &"each timepoint may appear only once",
                ));
            }

            let result = self.analyze_timepoint(image)?;
            log::debug!(
                "t={timepoint}h treated: n={} mean={:.2}; control: n={} mean={:.2}",
                result.treated.pixel_count,
                result.treated.statistics.mean,
                result.control.pixel_count,
                result.control.statistics.mean
            );
            timepoints.insert(*timepoint, result);
            on_done(*timepoint);
        }

        Ok(AnalysisResult { timepoints })
    }

    fn analyze_region(image: &Image, rectangle: Rectangle) -> Result<RegionResult> {
        let (sample, clamped) = extract_intensities(image, &rectangle);
        let statistics = compute_statistics(sample.values())?;
        Ok(RegionResult {
            pixel_count: sample.len(),
            sample,
            statistics,
            rectangle,
            clamped,
        })
    }
}
