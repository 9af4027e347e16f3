//! Region-of-interest extraction: bounds clipping, grayscale conversion and outlier rejection

use crate::analysis::statistics::{StatisticsRecord, compute_statistics};
use crate::io::configuration::{OUTLIER_LOWER_BOUND, OUTLIER_UPPER_BOUND};
use crate::io::error::Result;
use crate::spatial::{ClippedRect, Image, Rectangle};
use serde::Serialize;

/// Grayscale intensities read from one rectangle of one image, in row-major order
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct IntensitySample(Vec<u8>);

impl IntensitySample {
    /// Wrap already-extracted intensities
    pub const fn new(values: Vec<u8>) -> Self {
        Self(values)
    }

    /// Borrow the intensities
    pub fn values(&self) -> &[u8] {
        &self.0
    }

    /// Number of pixels in the sample
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no pixels were read
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Take ownership of the intensities
    pub fn into_inner(self) -> Vec<u8> {
        self.0
    }

    /// Descriptive statistics of this sample
    ///
    /// # Errors
    ///
    /// Returns [`crate::AnalysisError::EmptyInput`] for an empty sample
    pub fn statistics(&self) -> Result<StatisticsRecord> {
        compute_statistics(&self.0)
    }
}

impl From<Vec<u8>> for IntensitySample {
    fn from(values: Vec<u8>) -> Self {
        Self(values)
    }
}

/// True for intensities strictly inside the unclipped range `(5, 250)`
pub const fn is_valid_intensity(value: u8) -> bool {
    value > OUTLIER_LOWER_BOUND && value < OUTLIER_UPPER_BOUND
}

/// Read the grayscale intensities of the part of `rect` that lies inside `image`
///
/// No filtering is applied. Returns the sample together with the clipped
/// rectangle that was actually scanned.
pub fn extract_region(image: &Image, rect: &Rectangle) -> (IntensitySample, ClippedRect) {
    let clipped = rect.clamp_to(image.width(), image.height());
    let mut values = Vec::with_capacity(clipped.area());

    for y in clipped.y..clipped.y + clipped.height {
        for x in clipped.x..clipped.x + clipped.width {
            if let Some(value) = image.luma(x, y) {
                values.push(value);
            }
        }
    }

    (IntensitySample(values), clipped)
}

/// Drop likely clipping artifacts, keeping the unfiltered sample if nothing survives
///
/// Values at or below [`OUTLIER_LOWER_BOUND`] or at or above
/// [`OUTLIER_UPPER_BOUND`] are discarded. A region that is entirely saturated
/// (or entirely black) would otherwise produce no data at all, so in that case
/// the input sample is returned as-is.
pub fn reject_outliers(sample: IntensitySample) -> IntensitySample {
    let valid: Vec<u8> = sample
        .values()
        .iter()
        .copied()
        .filter(|&v| is_valid_intensity(v))
        .collect();

    if valid.is_empty() {
        if !sample.is_empty() {
            log::warn!(
                "All {} pixels lie outside ({OUTLIER_LOWER_BOUND}, {OUTLIER_UPPER_BOUND}); keeping unfiltered sample",
                sample.len()
            );
        }
        return sample;
    }

    IntensitySample(valid)
}

/// Full extraction contract: clip, convert to grayscale, reject outliers
///
/// Never fails for out-of-range rectangles; the largest valid sub-rectangle is
/// used instead. The image is not modified.
pub fn extract_intensities(image: &Image, rect: &Rectangle) -> (IntensitySample, ClippedRect) {
    let (raw, clipped) = extract_region(image, rect);
    if clipped.area() < rect.width() as usize * rect.height() as usize {
        log::debug!(
            "Rectangle {rect} clipped to {}x{} at ({}, {}) for {}x{} image",
            clipped.width,
            clipped.height,
            clipped.x,
            clipped.y,
            image.width(),
            image.height()
        );
    }
    (reject_outliers(raw), clipped)
}
