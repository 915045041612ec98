//! Rasterizer
//!
//! Re-walks the tagged sample sequence against a fixed pixel grid to produce
//! the final signature. Output is a pure function of the samples and the
//! extent: always black ink on a white background, whatever the theme of
//! the interactive surface was.

use kurbo::Point;
use signature_config::DEFAULT_RASTER_STROKE_WIDTH;
use tracing::{debug, info};

use crate::constants::{BACKGROUND_WHITE, INK_BLACK};
use crate::encoding::SignatureImage;
use crate::error::RasterizeError;
use crate::surface::{CpuSurface, DrawingSurface, StrokeStyle};
use crate::types::{CanvasExtent, StrokeSequence};

/// Stroke style of the final artifact at the given width
pub fn signature_style(width: f32) -> StrokeStyle {
    StrokeStyle::solid(INK_BLACK, width)
}

/// Rasterize with the standard 4px black round stroke
pub fn rasterize(
    points: &StrokeSequence,
    extent: CanvasExtent,
) -> Result<SignatureImage, RasterizeError> {
    rasterize_with(points, extent, &signature_style(DEFAULT_RASTER_STROKE_WIDTH))
}

/// Rasterize onto a fresh CPU surface with an explicit stroke style
pub fn rasterize_with(
    points: &StrokeSequence,
    extent: CanvasExtent,
    style: &StrokeStyle,
) -> Result<SignatureImage, RasterizeError> {
    check_preconditions(points, extent, style)?;

    let mut surface = CpuSurface::with_extent(extent);
    let strokes = rasterize_onto(&mut surface, points, style)?;

    info!(
        "Rasterized {} samples in {} strokes onto {}x{}",
        points.len(),
        strokes,
        extent.width,
        extent.height
    );
    Ok(SignatureImage::from_surface(&surface))
}

/// Walk `points` against any drawing surface.
///
/// Fills the background white, then strokes each run of samples between
/// start markers as one path. Returns the number of strokes drawn.
pub fn rasterize_onto<S: DrawingSurface + ?Sized>(
    surface: &mut S,
    points: &StrokeSequence,
    style: &StrokeStyle,
) -> Result<usize, RasterizeError> {
    check_preconditions(points, surface.extent(), style)?;

    surface.fill_background(BACKGROUND_WHITE);

    let mut path: Vec<Point> = Vec::new();
    let mut strokes = 0;
    for sample in points.points() {
        if sample.is_stroke_start && !path.is_empty() {
            surface.stroke_path(&path, style);
            strokes += 1;
            path.clear();
        }
        path.push(sample.to_point());
    }

    // A lone start sample is a zero-length path; the round cap makes it a dot
    if !path.is_empty() {
        surface.stroke_path(&path, style);
        strokes += 1;
    }

    debug!("rasterize_onto: stroked {} paths", strokes);
    Ok(strokes)
}

fn check_preconditions(
    points: &StrokeSequence,
    extent: CanvasExtent,
    style: &StrokeStyle,
) -> Result<(), RasterizeError> {
    if points.is_empty() {
        return Err(RasterizeError::EmptyInput);
    }
    if !extent.is_drawable() {
        return Err(RasterizeError::ZeroExtent(extent));
    }
    // A zero or NaN width paints nothing
    if !(style.width.is_finite() && style.width > 0.0) {
        return Err(RasterizeError::InvalidStrokeWidth(style.width));
    }
    Ok(())
}
