//! Spatial data structures
//!
//! This module contains:
//! - The owned pixel grid read by the extractor
//! - Rectangle geometry and clipping to image bounds

/// Owned grayscale or RGB pixel grid
pub mod image;
/// Region-of-interest rectangles and bounds clipping
pub mod rectangle;

pub use self::image::Image;
pub use rectangle::{ClippedRect, Rectangle, RectanglePair};
