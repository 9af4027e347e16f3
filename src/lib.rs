//! Intensity decay measurement for treated and control regions across timed photographs
//!
//! Each photograph is reduced to two cleaned intensity samples, one per rectangle,
//! and every sample is summarised by a fixed set of descriptive statistics.

#![forbid(unsafe_code)]

/// Region extraction, descriptive statistics and timepoint orchestration
pub mod analysis;
/// Input/output operations, configuration and error handling
pub mod io;
/// Percentile interpolation and central moment utilities
pub mod math;
/// Pixel grids and rectangle geometry
pub mod spatial;

pub use io::error::{AnalysisError, Result};
