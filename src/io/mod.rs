//! Input/output operations, configuration and error handling

/// Command-line interface and run orchestration
pub mod cli;
/// Analysis constants and runtime defaults
pub mod configuration;
/// Error types
pub mod error;
/// Tabular and structured result export
pub mod export;
/// Photograph decoding and ROI overlay preview
pub mod image;
/// Logger initialisation
pub mod logging;
/// Stage progress display
pub mod progress;
/// Human-readable result summary
pub mod report;
/// Histogram figure rendering
pub mod visualization;
