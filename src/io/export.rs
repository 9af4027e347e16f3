//! Tabular (CSV) and structured (JSON) export of analysis results

use crate::analysis::analyzer::{AnalysisResult, Region, RegionResult, Timepoint};
use crate::analysis::extraction::IntensitySample;
use crate::analysis::statistics::{STATISTICS_COLUMNS, StatisticsRecord};
use crate::io::configuration::EXPORT_DECIMAL_PLACES;
use crate::io::error::{AnalysisError, Result, file_system_error};
use crate::io::image::ensure_parent_dir;
use crate::spatial::{ClippedRect, Rectangle};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

/// Leading columns of the tabular export, before the statistics fields
pub const KEY_COLUMNS: [&str; 2] = ["timepoint", "region"];

/// One parsed row of the tabular export
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CsvRow {
    /// Elapsed hours
    pub timepoint: f64,
    /// `treated` or `control`
    pub region: String,
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
    /// Fisher-Pearson skewness
    pub skewness: f64,
    /// Excess kurtosis
    pub kurtosis: f64,
    /// Number of pixels summarised
    pub pixel_count: usize,
}

impl CsvRow {
    /// Float fields in column order, matching [`StatisticsRecord::float_fields`]
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

/// Write one row per timepoint and region, ascending by time, treated first
///
/// # Errors
///
/// Returns an error if writing to `writer` fails
pub fn write_csv<W: Write>(result: &AnalysisResult, writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(KEY_COLUMNS.iter().chain(STATISTICS_COLUMNS.iter()))?;

    for (timepoint, timepoint_result) in result {
        for region in Region::ALL {
            let stats = &timepoint_result.region(region).statistics;
            let mut record = Vec::with_capacity(KEY_COLUMNS.len() + STATISTICS_COLUMNS.len());
            record.push(timepoint.to_string());
            record.push(region.as_str().to_string());
            record.extend(
                stats
                    .float_fields()
                    .iter()
                    .map(|v| format!("{v:.EXPORT_DECIMAL_PLACES$}")),
            );
            record.push(stats.pixel_count.to_string());
            csv_writer.write_record(&record)?;
        }
    }

    csv_writer.flush()?;
    Ok(())
}

/// Save the tabular export to `path`, creating parent directories
///
/// # Errors
///
/// Returns an error if the file cannot be created or written
pub fn save_csv(result: &AnalysisResult, path: &Path) -> Result<()> {
    ensure_parent_dir(path)?;
    let file = File::create(path).map_err(file_system_error(path, "create file"))?;
    write_csv(result, BufWriter::new(file)).map_err(|e| with_path(e, path))?;
    log::info!("CSV results saved to {}", path.display());
    Ok(())
}

/// Parse a tabular export back into rows
///
/// # Errors
///
/// Returns an error if the data is not a well-formed export
pub fn read_csv<R: Read>(reader: R) -> Result<Vec<CsvRow>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let rows = csv_reader
        .deserialize()
        .collect::<std::result::Result<Vec<CsvRow>, csv::Error>>()?;
    Ok(rows)
}

/// Map keyed by timepoint label that serializes in ascending time order
#[derive(Debug)]
pub struct TimepointMap<T>(Vec<(String, T)>);

impl<T: Serialize> Serialize for TimepointMap<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(k, v)| (k, v)))
    }
}

/// Structured export root
#[derive(Debug, Serialize)]
pub struct JsonDocument<'a> {
    /// Run description
    pub analysis_metadata: JsonMetadata,
    /// Per-timepoint, per-region results
    pub results: TimepointMap<JsonTimepoint<'a>>,
    /// Pixel totals per timepoint
    pub summary: JsonSummary,
}

/// Run description block
#[derive(Debug, Serialize)]
pub struct JsonMetadata {
    /// Export time, RFC 3339
    pub timestamp: String,
    /// Analysed timepoints in ascending order
    pub timepoints: Vec<Timepoint>,
    /// Number of analysed timepoints
    pub total_timepoints: usize,
}

/// Both regions for one timepoint
#[derive(Debug, Serialize)]
pub struct JsonTimepoint<'a> {
    /// Treated region
    pub treated: JsonRegion<'a>,
    /// Control region
    pub control: JsonRegion<'a>,
}

/// One region's data and statistics
#[derive(Debug, Serialize)]
pub struct JsonRegion<'a> {
    /// Cleaned intensities
    pub intensities: &'a IntensitySample,
    /// Statistics of `intensities`
    pub stats: &'a StatisticsRecord,
    /// Rectangle as requested
    pub roi: &'a Rectangle,
    /// Rectangle after clipping to the image
    pub clamped_roi: &'a ClippedRect,
    /// Length of `intensities`
    pub pixel_count: usize,
}

impl<'a> From<&'a RegionResult> for JsonRegion<'a> {
    fn from(region: &'a RegionResult) -> Self {
        Self {
            intensities: &region.sample,
            stats: &region.statistics,
            roi: &region.rectangle,
            clamped_roi: &region.clamped,
            pixel_count: region.pixel_count,
        }
    }
}

/// Pixel totals block
#[derive(Debug, Serialize)]
pub struct JsonSummary {
    /// Pixels per region for each timepoint
    pub total_pixels_analyzed: TimepointMap<PixelCounts>,
}

/// Pixel count per region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PixelCounts {
    /// Treated region pixels
    pub treated: usize,
    /// Control region pixels
    pub control: usize,
}

/// Build the structured document for `result`, stamped with `timestamp`
pub fn to_json_document(result: &AnalysisResult, timestamp: DateTime<Utc>) -> JsonDocument<'_> {
    let results = result
        .iter()
        .map(|(timepoint, tr)| {
            (
                timepoint.to_string(),
                JsonTimepoint {
                    treated: JsonRegion::from(&tr.treated),
                    control: JsonRegion::from(&tr.control),
                },
            )
        })
        .collect();

    let totals = result
        .iter()
        .map(|(timepoint, tr)| {
            (
                timepoint.to_string(),
                PixelCounts {
                    treated: tr.treated.pixel_count,
                    control: tr.control.pixel_count,
                },
            )
        })
        .collect();

    JsonDocument {
        analysis_metadata: JsonMetadata {
            timestamp: timestamp.to_rfc3339_opts(SecondsFormat::Secs, true),
            timepoints: result.timepoints(),
            total_timepoints: result.len(),
        },
        results: TimepointMap(results),
        summary: JsonSummary {
            total_pixels_analyzed: TimepointMap(totals),
        },
    }
}

/// Write the pretty-printed structured document
///
/// # Errors
///
/// Returns an error if serialization or writing fails
pub fn write_json<W: Write>(
    result: &AnalysisResult,
    timestamp: DateTime<Utc>,
    mut writer: W,
) -> Result<()> {
    let document = to_json_document(result, timestamp);
    serde_json::to_writer_pretty(&mut writer, &document)?;
    writer.flush()?;
    Ok(())
}

/// Save the structured export to `path`, stamped with the current time
///
/// # Errors
///
/// Returns an error if the file cannot be created or written
pub fn save_json(result: &AnalysisResult, path: &Path) -> Result<()> {
    ensure_parent_dir(path)?;
    let file = File::create(path).map_err(file_system_error(path, "create file"))?;
    write_json(result, Utc::now(), BufWriter::new(file)).map_err(|e| with_path(e, path))?;
    log::info!("JSON results saved to {}", path.display());
    Ok(())
}

// Replace the placeholder path attached by the `From` conversions
fn with_path(error: AnalysisError, path: &Path) -> AnalysisError {
    match error {
        AnalysisError::CsvExport { source, .. } => AnalysisError::CsvExport {
            path: path.to_path_buf(),
            source,
        },
        AnalysisError::JsonExport { source, .. } => AnalysisError::JsonExport {
            path: path.to_path_buf(),
            source,
        },
        AnalysisError::FileSystem {
            operation, source, ..
        } => AnalysisError::FileSystem {
            path: path.to_path_buf(),
            operation,
            source,
        },
        other => other,
    }
}
