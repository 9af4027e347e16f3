//! Photograph decoding and the ROI overlay preview

use crate::io::configuration::{CONTROL_COLOR, OVERLAY_LINE_THICKNESS, TREATED_COLOR};
use crate::io::error::{AnalysisError, Result, file_system_error};
use crate::spatial::{ClippedRect, Image, RectanglePair};
use image::{Rgba, RgbaImage};
use std::path::{Path, PathBuf};

/// Decode one photograph from disk
///
/// # Errors
///
/// Returns [`AnalysisError::ImageLoad`] carrying `path` if the file is missing,
/// unreadable or not a supported image format
pub fn load_image<P: AsRef<Path>>(path: P) -> Result<Image> {
    let path = path.as_ref();
    let decoded = image::open(path).map_err(|e| AnalysisError::ImageLoad {
        path: path.to_path_buf(),
        source: e,
    })?;
    let img = Image::from_dynamic(&decoded)?;

    log::info!(
        "Loaded {} ({}x{}, {} channel{})",
        path.display(),
        img.width(),
        img.height(),
        img.channels(),
        if img.channels() == 1 { "" } else { "s" }
    );
    Ok(img)
}

/// Decode every photograph in order, failing on the first unreadable file
///
/// # Errors
///
/// Returns the first [`AnalysisError::ImageLoad`] encountered
pub fn load_series(paths: &[PathBuf]) -> Result<Vec<Image>> {
    load_series_with(paths, |_| {})
}

/// [`load_series`], calling `on_loaded` with each path once it has decoded
///
/// # Errors
///
/// Same conditions as [`load_series`]
pub fn load_series_with<F: FnMut(&Path)>(
    paths: &[PathBuf],
    mut on_loaded: F,
) -> Result<Vec<Image>> {
    let mut images = Vec::with_capacity(paths.len());
    for path in paths {
        images.push(load_image(path)?);
        on_loaded(path);
    }
    Ok(images)
}

/// Draw both rectangles, clipped to the image, over an RGBA copy of `image`
///
/// Treated is outlined in [`TREATED_COLOR`], control in [`CONTROL_COLOR`].
pub fn render_roi_overlay(image: &Image, pair: &RectanglePair) -> RgbaImage {
    let mut canvas = image.to_rgba8();
    let (width, height) = (image.width(), image.height());

    draw_outline(
        &mut canvas,
        pair.treated.clamp_to(width, height),
        Rgba(TREATED_COLOR),
        OVERLAY_LINE_THICKNESS,
    );
    draw_outline(
        &mut canvas,
        pair.control.clamp_to(width, height),
        Rgba(CONTROL_COLOR),
        OVERLAY_LINE_THICKNESS,
    );
    canvas
}

/// Write the overlay preview as a PNG, creating parent directories
///
/// # Errors
///
/// Returns an error if the directory cannot be created or the image cannot be saved
pub fn save_roi_overlay(image: &Image, pair: &RectanglePair, output_path: &Path) -> Result<()> {
    let canvas = render_roi_overlay(image, pair);
    save_png(&canvas, output_path)
}

/// Save an RGBA image, creating the parent directory first
///
/// # Errors
///
/// Returns an error if the directory cannot be created or encoding fails
pub fn save_png(canvas: &RgbaImage, output_path: &Path) -> Result<()> {
    ensure_parent_dir(output_path)?;
    canvas
        .save(output_path)
        .map_err(|e| AnalysisError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })?;
    log::info!("Saved {}", output_path.display());
    Ok(())
}

/// Create the directory that will hold `path`, if it has one
///
/// # Errors
///
/// Returns [`AnalysisError::FileSystem`] if creation fails
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(file_system_error(parent, "create directory"))?;
    }
    Ok(())
}

// Outline grows inward from the rectangle edge
fn draw_outline(canvas: &mut RgbaImage, rect: ClippedRect, color: Rgba<u8>, thickness: u32) {
    if rect.is_empty() {
        return;
    }

    let right = rect.x + rect.width;
    let bottom = rect.y + rect.height;
    let band = thickness.max(1);

    for y in rect.y..bottom {
        for x in rect.x..right {
            let on_edge = x < rect.x + band
                || x + band >= right
                || y < rect.y + band
                || y + band >= bottom;
            if on_edge && let Some(pixel) = canvas.get_pixel_mut_checked(x, y) {
                *pixel = color;
            }
        }
    }
}
