//! Analysis pipeline: region extraction, statistics and timepoint orchestration

/// Per-timepoint orchestration and the result model
pub mod analyzer;
/// Region-of-interest extraction with bounds clipping and outlier rejection
pub mod extraction;
/// Rectangle pair providers (fixed and interactive)
pub mod providers;
/// Descriptive statistics over intensity samples
pub mod statistics;
