//! Human-readable summary of an analysis run

use crate::analysis::analyzer::{AnalysisResult, Region};
use crate::io::error::{Result, file_system_error};
use std::io::{self, Write};

const BANNER_WIDTH: usize = 80;

/// Print a per-timepoint, per-region summary of the key statistics
///
/// # Errors
///
/// Returns an error if writing to `out` fails
pub fn write_summary<W: Write>(result: &AnalysisResult, mut out: W) -> Result<()> {
    write_sections(result, &mut out)
        .and_then(|()| out.flush())
        .map_err(file_system_error("<report>", "write summary"))
}

fn write_sections<W: Write>(result: &AnalysisResult, out: &mut W) -> io::Result<()> {
    let rule = "=".repeat(BANNER_WIDTH);
    writeln!(out, "\n{rule}\nANALYSIS RESULTS\n{rule}")?;

    for (timepoint, timepoint_result) in result {
        writeln!(out, "\n--- Timepoint: {timepoint} hours ---")?;

        for region in Region::ALL {
            let stats = &timepoint_result.region(region).statistics;
            writeln!(out, "\n  {} ROI:", region.as_str().to_uppercase())?;
            writeln!(out, "    Min intensity:    {:.2}", stats.min)?;
            writeln!(out, "    Max intensity:    {:.2}", stats.max)?;
            writeln!(out, "    Mean intensity:   {:.2}", stats.mean)?;
            writeln!(out, "    Median intensity: {:.2}", stats.median)?;
            writeln!(out, "    Std Dev:          {:.2}", stats.std)?;
            writeln!(out, "    Range:            {:.2}", stats.range)?;
            writeln!(out, "    Pixel count:      {}", stats.pixel_count)?;
        }
    }
    Ok(())
}
