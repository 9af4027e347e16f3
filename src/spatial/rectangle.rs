//! Rectangle geometry for regions of interest, including clipping to image bounds

use crate::io::error::{AnalysisError, Result, invalid_parameter};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Axis-aligned region of interest in pixel coordinates
///
/// Width and height are always positive; use [`Rectangle::clamp_to`] to obtain the
/// part of the rectangle that actually lies inside a given image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Rectangle {
    x: u32,
    y: u32,
    width: u32,
    height: u32,
}

impl Rectangle {
    /// Create a rectangle from its top-left corner and size
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::InvalidRectangle`] if `width` or `height` is zero
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(AnalysisError::InvalidRectangle { width, height });
        }
        Ok(Self {
            x,
            y,
            width,
            height,
        })
    }

    /// Create a rectangle from an `(x, y, width, height)` tuple
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::InvalidRectangle`] if either dimension is zero
    pub const fn from_tuple(rect: (u32, u32, u32, u32)) -> Result<Self> {
        Self::new(rect.0, rect.1, rect.2, rect.3)
    }

    /// Left edge
    pub const fn x(&self) -> u32 {
        self.x
    }

    /// Top edge
    pub const fn y(&self) -> u32 {
        self.y
    }

    /// Horizontal extent
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Vertical extent
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Clip the rectangle to an image of the given size
    ///
    /// The origin is clamped into `[0, width-1] x [0, height-1]` and the extent is
    /// shortened so the result never reaches past the image edge. The result may
    /// be empty, which only happens for a zero-sized image.
    pub fn clamp_to(&self, image_width: u32, image_height: u32) -> ClippedRect {
        if image_width == 0 || image_height == 0 {
            return ClippedRect::default();
        }

        let x = self.x.min(image_width - 1);
        let y = self.y.min(image_height - 1);

        ClippedRect {
            x,
            y,
            width: self.width.min(image_width - x),
            height: self.height.min(image_height - y),
        }
    }
}

impl fmt::Display for Rectangle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{},{}", self.x, self.y, self.width, self.height)
    }
}

impl FromStr for Rectangle {
    type Err = AnalysisError;

    /// Parse the `x,y,width,height` form, tolerating whitespace around each field
    fn from_str(s: &str) -> Result<Self> {
        let fields = s
            .split(',')
            .map(|field| field.trim().parse::<u32>())
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| invalid_parameter("rectangle", &s, &e))?;

        match fields.as_slice() {
            &[x, y, width, height] => Self::new(x, y, width, height),
            _ => Err(invalid_parameter(
                "rectangle",
                &s,
                &"expected four comma-separated integers x,y,width,height",
            )),
        }
    }
}

/// Rectangle after clipping to image bounds; may be empty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct ClippedRect {
    /// Left edge
    pub x: u32,
    /// Top edge
    pub y: u32,
    /// Horizontal extent
    pub width: u32,
    /// Vertical extent
    pub height: u32,
}

impl ClippedRect {
    /// Number of pixels covered
    pub const fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// True when the clipped region covers no pixels
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// The treated and control rectangles used for one analysis run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RectanglePair {
    /// Region receiving the treatment
    pub treated: Rectangle,
    /// Untreated reference region
    pub control: Rectangle,
}

impl RectanglePair {
    /// Pair up a treated and a control rectangle
    pub const fn new(treated: Rectangle, control: Rectangle) -> Self {
        Self { treated, control }
    }
}
