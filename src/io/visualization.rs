//! Histogram rendering of treated and control intensity distributions

use crate::analysis::analyzer::AnalysisResult;
use crate::io::configuration::{
    CONTROL_COLOR, HISTOGRAM_BAR_ALPHA, HISTOGRAM_BINS, HISTOGRAM_PANEL_HEIGHT,
    HISTOGRAM_PANEL_PADDING, HISTOGRAM_PANEL_WIDTH, HISTOGRAM_PANELS_PER_ROW, TREATED_COLOR,
};
use crate::io::error::{Result, invalid_parameter};
use crate::io::image::save_png;
use image::{Rgba, RgbaImage};
use std::path::Path;

const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);
const FRAME: Rgba<u8> = Rgba([96, 96, 96, 255]);
const GRID: Rgba<u8> = Rgba([225, 225, 225, 255]);

/// Count intensities into `bins` equal-width buckets spanning 0..=255
///
/// Returns an empty vector when `bins` is zero.
pub fn histogram(sample: &[u8], bins: usize) -> Vec<usize> {
    let mut counts = vec![0usize; bins];
    if bins == 0 {
        return counts;
    }

    for &value in sample {
        let bin = (usize::from(value) * bins / 256).min(bins - 1);
        if let Some(count) = counts.get_mut(bin) {
            *count += 1;
        }
    }
    counts
}

/// Render one panel per timepoint with both regions' histograms overlaid
///
/// Panels are laid out left to right, [`HISTOGRAM_PANELS_PER_ROW`] per row, in
/// ascending time order. Treated bars use [`TREATED_COLOR`] and control bars
/// [`CONTROL_COLOR`], alpha-blended so overlaps stay visible.
pub fn render_histograms(result: &AnalysisResult) -> RgbaImage {
    let panel_count = result.len();
    let cols = panel_count.clamp(1, HISTOGRAM_PANELS_PER_ROW) as u32;
    let rows = panel_count.div_ceil(HISTOGRAM_PANELS_PER_ROW).max(1) as u32;

    let width = cols * HISTOGRAM_PANEL_WIDTH + (cols + 1) * HISTOGRAM_PANEL_PADDING;
    let height = rows * HISTOGRAM_PANEL_HEIGHT + (rows + 1) * HISTOGRAM_PANEL_PADDING;
    let mut canvas = RgbaImage::from_pixel(width, height, BACKGROUND);

    for (index, (_, timepoint_result)) in result.iter().enumerate() {
        let col = (index % HISTOGRAM_PANELS_PER_ROW) as u32;
        let row = (index / HISTOGRAM_PANELS_PER_ROW) as u32;
        let origin = (
            HISTOGRAM_PANEL_PADDING + col * (HISTOGRAM_PANEL_WIDTH + HISTOGRAM_PANEL_PADDING),
            HISTOGRAM_PANEL_PADDING + row * (HISTOGRAM_PANEL_HEIGHT + HISTOGRAM_PANEL_PADDING),
        );

        let treated = histogram(timepoint_result.treated.sample.values(), HISTOGRAM_BINS);
        let control = histogram(timepoint_result.control.sample.values(), HISTOGRAM_BINS);
        let peak = treated
            .iter()
            .chain(control.iter())
            .copied()
            .max()
            .unwrap_or(0);

        draw_panel_frame(&mut canvas, origin);
        draw_bars(&mut canvas, origin, &treated, peak, TREATED_COLOR);
        draw_bars(&mut canvas, origin, &control, peak, CONTROL_COLOR);
    }

    canvas
}

/// Render and save the histogram figure as a PNG
///
/// # Errors
///
/// Returns an error if `result` is empty or the file cannot be written
pub fn save_histograms(result: &AnalysisResult, output_path: &Path) -> Result<()> {
    if result.is_empty() {
        return Err(invalid_parameter(
            "result",
            &0,
            &"no timepoints to plot",
        ));
    }
    save_png(&render_histograms(result), output_path)
}

fn draw_panel_frame(canvas: &mut RgbaImage, origin: (u32, u32)) {
    let (left, top) = origin;
    let right = left + HISTOGRAM_PANEL_WIDTH - 1;
    let bottom = top + HISTOGRAM_PANEL_HEIGHT - 1;

    // Horizontal guides at quarter heights
    for quarter in 1..4 {
        let y = top + HISTOGRAM_PANEL_HEIGHT * quarter / 4;
        for x in left..=right {
            if let Some(pixel) = canvas.get_pixel_mut_checked(x, y) {
                *pixel = GRID;
            }
        }
    }

    for x in left..=right {
        for y in [top, bottom] {
            if let Some(pixel) = canvas.get_pixel_mut_checked(x, y) {
                *pixel = FRAME;
            }
        }
    }
    for y in top..=bottom {
        for x in [left, right] {
            if let Some(pixel) = canvas.get_pixel_mut_checked(x, y) {
                *pixel = FRAME;
            }
        }
    }
}

fn draw_bars(
    canvas: &mut RgbaImage,
    origin: (u32, u32),
    counts: &[usize],
    peak: usize,
    color: [u8; 4],
) {
    if counts.is_empty() || peak == 0 {
        return;
    }

    let (left, top) = origin;
    // Leave the one-pixel frame untouched
    let inner_width = HISTOGRAM_PANEL_WIDTH - 2;
    let inner_height = HISTOGRAM_PANEL_HEIGHT - 2;
    let baseline = top + HISTOGRAM_PANEL_HEIGHT - 1;
    let bins = counts.len() as u32;

    for (bin, &count) in counts.iter().enumerate() {
        if count == 0 {
            continue;
        }
        let bin = bin as u32;
        let x_start = left + 1 + bin * inner_width / bins;
        let x_end = left + 1 + (bin + 1) * inner_width / bins;
        let bar_height =
            ((count as f64 / peak as f64) * f64::from(inner_height)).round() as u32;

        for x in x_start..x_end {
            for y in baseline.saturating_sub(bar_height)..baseline {
                if let Some(pixel) = canvas.get_pixel_mut_checked(x, y) {
                    *pixel = blend(*pixel, color, HISTOGRAM_BAR_ALPHA);
                }
            }
        }
    }
}

fn blend(under: Rgba<u8>, over: [u8; 4], alpha: f64) -> Rgba<u8> {
    let mix = |a: u8, b: u8| {
        alpha
            .mul_add(f64::from(b), (1.0 - alpha) * f64::from(a))
            .round()
            .clamp(0.0, 255.0) as u8
    };
    let Rgba([r, g, b, _]) = under;
    let [over_r, over_g, over_b, _] = over;
    Rgba([mix(r, over_r), mix(g, over_g), mix(b, over_b), 255])
}
