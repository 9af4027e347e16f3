//! Owned pixel grid with one (grayscale) or three (RGB) channels

use crate::io::configuration::{LUMA_BLUE_WEIGHT, LUMA_GREEN_WEIGHT, LUMA_RED_WEIGHT};
use crate::io::error::{Result, invalid_parameter};
use image::{DynamicImage, Rgba, RgbaImage};
use ndarray::Array3;

/// Read-only photograph handed to the extractor
///
/// Pixels are stored as `(height, width, channels)` with 8-bit channel values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    pixels: Array3<u8>,
}

impl Image {
    /// Build a single-channel image from row-major intensities
    ///
    /// # Errors
    ///
    /// Returns an error if `data.len() != width * height`
    pub fn from_gray(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        Self::from_channels(width, height, 1, data)
    }

    /// Build a three-channel image from row-major interleaved RGB values
    ///
    /// # Errors
    ///
    /// Returns an error if `data.len() != width * height * 3`
    pub fn from_rgb(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        Self::from_channels(width, height, 3, data)
    }

    fn from_channels(width: u32, height: u32, channels: usize, data: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize * channels;
        let actual = data.len();
        let pixels = Array3::from_shape_vec((height as usize, width as usize, channels), data)
            .map_err(|e| {
                invalid_parameter(
                    "pixel_data",
                    &actual,
                    &format!("expected {expected} values for {width}x{height}x{channels}: {e}"),
                )
            })?;
        Ok(Self { pixels })
    }

    /// Convert a decoded image, keeping grayscale sources single-channel
    ///
    /// Alpha is dropped and 16-bit sources are narrowed to 8 bits.
    ///
    /// # Errors
    ///
    /// Returns an error if the decoded buffer does not match its reported size
    pub fn from_dynamic(img: &DynamicImage) -> Result<Self> {
        if img.color().has_color() {
            let rgb = img.to_rgb8();
            let (width, height) = rgb.dimensions();
            Self::from_rgb(width, height, rgb.into_raw())
        } else {
            let gray = img.to_luma8();
            let (width, height) = gray.dimensions();
            Self::from_gray(width, height, gray.into_raw())
        }
    }

    /// Width in pixels
    pub fn width(&self) -> u32 {
        self.pixels.dim().1 as u32
    }

    /// Height in pixels
    pub fn height(&self) -> u32 {
        self.pixels.dim().0 as u32
    }

    /// Channels per pixel (1 or 3)
    pub fn channels(&self) -> usize {
        self.pixels.dim().2
    }

    /// True for single-channel images
    pub fn is_grayscale(&self) -> bool {
        self.channels() == 1
    }

    /// Grayscale intensity at `(x, y)`, or `None` outside the image
    ///
    /// Single-channel pixels are returned unchanged; RGB pixels go through [`luma`].
    pub fn luma(&self, x: u32, y: u32) -> Option<u8> {
        let (row, col) = (y as usize, x as usize);
        if self.is_grayscale() {
            return self.pixels.get((row, col, 0)).copied();
        }

        let r = *self.pixels.get((row, col, 0))?;
        let g = *self.pixels.get((row, col, 1))?;
        let b = *self.pixels.get((row, col, 2))?;
        Some(luma(r, g, b))
    }

    /// Expand to RGBA for drawing, replicating gray into all color channels
    pub fn to_rgba8(&self) -> RgbaImage {
        let mut out = RgbaImage::new(self.width(), self.height());
        for (x, y, pixel) in out.enumerate_pixels_mut() {
            let (row, col) = (y as usize, x as usize);
            let channel = |c: usize| self.pixels.get((row, col, c)).copied().unwrap_or(0);
            *pixel = if self.is_grayscale() {
                let v = channel(0);
                Rgba([v, v, v, 255])
            } else {
                Rgba([channel(0), channel(1), channel(2), 255])
            };
        }
        out
    }
}

/// BT.601 luma of an RGB triple, rounded to the nearest integer
pub fn luma(r: u8, g: u8, b: u8) -> u8 {
    let y = LUMA_BLUE_WEIGHT.mul_add(
        f64::from(b),
        LUMA_RED_WEIGHT.mul_add(f64::from(r), LUMA_GREEN_WEIGHT * f64::from(g)),
    );
    y.round().clamp(0.0, 255.0) as u8
}
