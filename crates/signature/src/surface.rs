//! Drawing surfaces for rasterization
//!
//! The rasterizer only needs two capabilities from a pixel target: fill the
//! background and stroke a polyline. [`DrawingSurface`] captures exactly
//! that so any 2D library can stand in; [`CpuSurface`] is the built-in
//! software implementation.

use kurbo::Point;
use tracing::debug;

use crate::constants::AA_RAMP_WIDTH;
use crate::types::CanvasExtent;

/// Line cap style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineCap {
    Butt,
    #[default]
    Round,
}

/// Stroke parameters for [`DrawingSurface::stroke_path`]
///
/// Joins are always round: a stroke is the union of its segments swept by
/// a disc.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    /// RGBA colour, components 0.0-1.0
    pub color: [f32; 4],
    /// Stroke width in pixels
    pub width: f32,
    pub cap: LineCap,
    pub anti_alias: bool,
}

impl StrokeStyle {
    /// Solid, round-capped, anti-aliased stroke
    pub fn solid(color: [f32; 4], width: f32) -> Self {
        Self {
            color,
            width,
            cap: LineCap::Round,
            anti_alias: true,
        }
    }
}

/// Minimal pixel target the rasterizer draws through
pub trait DrawingSurface {
    /// Pixel size of the surface
    fn extent(&self) -> CanvasExtent;

    /// Overwrite every pixel with `color`
    fn fill_background(&mut self, color: [f32; 4]);

    /// Stroke an open polyline.
    ///
    /// A single point is a zero-length path; with round caps it paints a dot.
    fn stroke_path(&mut self, points: &[Point], style: &StrokeStyle);
}

/// A CPU RGBA surface
/// Stores pixels as [f32; 4], row-major
#[derive(Debug, Clone)]
pub struct CpuSurface {
    /// Surface dimensions
    pub width: u32,
    pub height: u32,
    /// Pixel data in row-major order, each pixel is [r, g, b, a] as f32
    pixels: Vec<[f32; 4]>,
}

impl CpuSurface {
    /// Create a new surface with the given dimensions, initialized to transparent black
    pub fn new(width: u32, height: u32) -> Self {
        let pixel_count = (width as usize) * (height as usize);
        Self {
            width,
            height,
            pixels: vec![[0.0, 0.0, 0.0, 0.0]; pixel_count],
        }
    }

    /// Create a surface sized to a canvas extent
    pub fn with_extent(extent: CanvasExtent) -> Self {
        Self::new(extent.width, extent.height)
    }

    /// Get a pixel at the given coordinates
    /// Returns None if coordinates are out of bounds
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<[f32; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let index = (y as usize) * (self.width as usize) + (x as usize);
        Some(self.pixels[index])
    }

    /// Blend a color onto an existing pixel using alpha compositing
    /// Formula: out = src * alpha + dst * (1 - alpha)
    #[inline]
    pub fn blend_pixel(&mut self, x: u32, y: u32, color: [f32; 4], opacity: f32) {
        if x >= self.width || y >= self.height {
            return;
        }
        let index = (y as usize) * (self.width as usize) + (x as usize);
        let dst = self.pixels[index];

        let src_alpha = color[3] * opacity;
        let inv_src_alpha = 1.0 - src_alpha;

        self.pixels[index] = [
            color[0] * src_alpha + dst[0] * inv_src_alpha,
            color[1] * src_alpha + dst[1] * inv_src_alpha,
            color[2] * src_alpha + dst[2] * inv_src_alpha,
            src_alpha + dst[3] * inv_src_alpha,
        ];
    }

    /// Get direct access to pixel data
    #[inline]
    pub fn pixels(&self) -> &[[f32; 4]] {
        &self.pixels
    }

    /// Quantize to 8-bit RGBA, row-major
    pub fn to_rgba8(&self) -> Vec<[u8; 4]> {
        self.pixels
            .iter()
            .map(|px| px.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8))
            .collect()
    }
}

impl DrawingSurface for CpuSurface {
    fn extent(&self) -> CanvasExtent {
        CanvasExtent::new(self.width, self.height)
    }

    fn fill_background(&mut self, color: [f32; 4]) {
        self.pixels.fill(color);
    }

    fn stroke_path(&mut self, points: &[Point], style: &StrokeStyle) {
        let radius = style.width / 2.0;
        if points.is_empty() || radius <= 0.0 {
            return;
        }

        // Coverage is accumulated per path and blended once, so overlapping
        // segments of one stroke never darken twice.
        let Some(mut mask) = CoverageMask::for_path(points, radius, self.width, self.height) else {
            debug!("CpuSurface::stroke_path: path entirely outside surface");
            return;
        };

        if points.len() == 1 {
            mask.add_segment(points[0], points[0], radius, style);
        }
        for pair in points.windows(2) {
            mask.add_segment(pair[0], pair[1], radius, style);
        }

        mask.blend_onto(self, style.color);
    }
}

/// Per-pixel stroke coverage over a clipped bounding box
struct CoverageMask {
    x_min: u32,
    y_min: u32,
    width: u32,
    height: u32,
    coverage: Vec<f32>,
}

impl CoverageMask {
    /// Allocate a mask covering the path's bounds, clamped to the surface.
    /// Returns None if the path is completely outside.
    fn for_path(points: &[Point], radius: f32, surface_w: u32, surface_h: u32) -> Option<Self> {
        let pad = (radius + AA_RAMP_WIDTH) as f64;
        let (mut x0, mut y0) = (f64::INFINITY, f64::INFINITY);
        let (mut x1, mut y1) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
        for p in points {
            x0 = x0.min(p.x);
            y0 = y0.min(p.y);
            x1 = x1.max(p.x);
            y1 = y1.max(p.y);
        }

        let x_min = ((x0 - pad).floor().max(0.0) as u32).min(surface_w);
        let y_min = ((y0 - pad).floor().max(0.0) as u32).min(surface_h);
        let x_max = ((x1 + pad).ceil().max(0.0) as u32).min(surface_w);
        let y_max = ((y1 + pad).ceil().max(0.0) as u32).min(surface_h);

        if x_min >= x_max || y_min >= y_max {
            return None;
        }

        let width = x_max - x_min;
        let height = y_max - y_min;
        Some(Self {
            x_min,
            y_min,
            width,
            height,
            coverage: vec![0.0; (width as usize) * (height as usize)],
        })
    }

    /// Union one capsule (segment swept by a disc) into the mask
    fn add_segment(&mut self, a: Point, b: Point, radius: f32, style: &StrokeStyle) {
        let pad = (radius + AA_RAMP_WIDTH) as f64;
        let x_lo = ((a.x.min(b.x) - pad).floor().max(self.x_min as f64) as u32).max(self.x_min);
        let y_lo = ((a.y.min(b.y) - pad).floor().max(self.y_min as f64) as u32).max(self.y_min);
        let x_hi = ((a.x.max(b.x) + pad).ceil().max(0.0) as u32).min(self.x_min + self.width);
        let y_hi = ((a.y.max(b.y) + pad).ceil().max(0.0) as u32).min(self.y_min + self.height);

        for py in y_lo..y_hi {
            // Only the columns the capsule can reach on this row
            let Some((left, right)) = row_span(a, b, py as f64 + 0.5, pad) else {
                continue;
            };
            let row_lo = (left.floor().max(0.0) as u32).max(x_lo);
            let row_hi = (right.ceil().max(0.0) as u32).min(x_hi);

            for px in row_lo..row_hi {
                // Distance from the pixel center
                let center = Point::new(px as f64 + 0.5, py as f64 + 0.5);
                let distance = distance_to_segment(center, a, b, style.cap) as f32;
                let value = edge_coverage(distance, radius, style.anti_alias);
                if value <= 0.0 {
                    continue;
                }

                let index = ((py - self.y_min) as usize) * (self.width as usize)
                    + (px - self.x_min) as usize;
                if value > self.coverage[index] {
                    self.coverage[index] = value;
                }
            }
        }
    }

    fn blend_onto(&self, surface: &mut CpuSurface, color: [f32; 4]) {
        for row in 0..self.height {
            for col in 0..self.width {
                let value = self.coverage[(row as usize) * (self.width as usize) + col as usize];
                if value > 0.0 {
                    surface.blend_pixel(self.x_min + col, self.y_min + row, color, value);
                }
            }
        }
    }
}

/// Horizontal extent, on the row whose centers sit at `y`, of every point
/// within `pad` of segment `ab`. Returns None if the row misses the capsule.
#[inline]
fn row_span(a: Point, b: Point, y: f64, pad: f64) -> Option<(f64, f64)> {
    let dy = b.y - a.y;
    let (t0, t1) = if dy.abs() <= f64::EPSILON {
        if (y - a.y).abs() > pad {
            return None;
        }
        (0.0, 1.0)
    } else {
        let ta = (y - pad - a.y) / dy;
        let tb = (y + pad - a.y) / dy;
        let (t0, t1) = (ta.min(tb).max(0.0), ta.max(tb).min(1.0));
        if t0 > t1 {
            return None;
        }
        (t0, t1)
    };

    let x0 = a.x + (b.x - a.x) * t0;
    let x1 = a.x + (b.x - a.x) * t1;
    Some((x0.min(x1) - pad, x0.max(x1) + pad))
}

/// Distance from `p` to segment `ab`.
///
/// With butt caps, points beyond either end are treated as uncovered.
#[inline]
fn distance_to_segment(p: Point, a: Point, b: Point, cap: LineCap) -> f64 {
    let ab = b - a;
    let len_sq = ab.hypot2();
    if len_sq <= f64::EPSILON {
        return match cap {
            LineCap::Round => p.distance(a),
            LineCap::Butt => f64::INFINITY,
        };
    }

    let t = (p - a).dot(ab) / len_sq;
    match cap {
        LineCap::Butt if !(0.0..=1.0).contains(&t) => f64::INFINITY,
        _ => p.distance(a + ab * t.clamp(0.0, 1.0)),
    }
}

/// Coverage of a pixel whose center lies `distance` from the stroke spine
#[inline]
fn edge_coverage(distance: f32, radius: f32, anti_alias: bool) -> f32 {
    if anti_alias {
        ((radius + AA_RAMP_WIDTH / 2.0 - distance) / AA_RAMP_WIDTH).clamp(0.0, 1.0)
    } else if distance <= radius {
        1.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    const BLACK: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

    #[test]
    fn test_new_surface() {
        let surface = CpuSurface::new(100, 50);
        assert_eq!(surface.extent(), CanvasExtent::new(100, 50));
        assert_eq!(surface.pixels().len(), 5000);
    }

    #[test]
    fn test_fill_background() {
        let mut surface = CpuSurface::new(10, 10);
        surface.fill_background(WHITE);
        assert!(surface.pixels().iter().all(|px| *px == WHITE));
    }

    #[test]
    fn test_blend_pixel() {
        let mut surface = CpuSurface::new(10, 10);
        surface.fill_background(WHITE);

        // Blend 50% opaque red
        surface.blend_pixel(5, 5, [1.0, 0.0, 0.0, 1.0], 0.5);

        let result = surface.get_pixel(5, 5).unwrap();
        assert!((result[0] - 1.0).abs() < 0.01);
        assert!((result[1] - 0.5).abs() < 0.01);
        assert!((result[2] - 0.5).abs() < 0.01);
    }

    #[test]
    fn test_horizontal_stroke_width() {
        let mut surface = CpuSurface::new(20, 20);
        surface.fill_background(WHITE);
        let style = StrokeStyle::solid(BLACK, 4.0);

        surface.stroke_path(&[Point::new(2.0, 10.0), Point::new(18.0, 10.0)], &style);

        // Rows 8..12 are fully inside the 4px band around y = 10
        for y in 8..12 {
            assert_eq!(surface.get_pixel(10, y), Some(BLACK), "row {y}");
        }
        assert_eq!(surface.get_pixel(10, 6), Some(WHITE));
        assert_eq!(surface.get_pixel(10, 13), Some(WHITE));
    }

    #[test]
    fn test_single_point_paints_dot() {
        let mut surface = CpuSurface::new(20, 20);
        surface.fill_background(WHITE);

        surface.stroke_path(&[Point::new(10.0, 10.0)], &StrokeStyle::solid(BLACK, 4.0));

        assert_eq!(surface.get_pixel(9, 9), Some(BLACK));
        assert_eq!(surface.get_pixel(0, 0), Some(WHITE));
    }

    #[test]
    fn test_butt_cap_single_point_paints_nothing() {
        let mut surface = CpuSurface::new(20, 20);
        surface.fill_background(WHITE);
        let style = StrokeStyle {
            cap: LineCap::Butt,
            ..StrokeStyle::solid(BLACK, 4.0)
        };

        surface.stroke_path(&[Point::new(10.0, 10.0)], &style);

        assert!(surface.pixels().iter().all(|px| *px == WHITE));
    }

    #[test]
    fn test_self_overlap_blends_once() {
        let mut surface = CpuSurface::new(20, 20);
        surface.fill_background(WHITE);
        let grey = [0.0, 0.0, 0.0, 0.5];

        // Back and forth over the same segment
        let path = [
            Point::new(2.0, 10.0),
            Point::new(18.0, 10.0),
            Point::new(2.0, 10.0),
        ];
        surface.stroke_path(&path, &StrokeStyle::solid(grey, 4.0));

        let px = surface.get_pixel(10, 10).unwrap();
        assert!((px[0] - 0.5).abs() < 1e-4);
    }

    #[test]
    fn test_anti_aliased_edge_is_partial() {
        let mut surface = CpuSurface::new(20, 20);
        surface.fill_background(WHITE);

        // Spine at y = 10.25 puts row 12 center 2.25 away: partial coverage
        surface.stroke_path(
            &[Point::new(2.0, 10.25), Point::new(18.0, 10.25)],
            &StrokeStyle::solid(BLACK, 4.0),
        );

        let edge = surface.get_pixel(10, 12).unwrap();
        assert!(edge[0] > 0.0 && edge[0] < 1.0);
    }

    #[test]
    fn test_path_outside_surface_is_noop() {
        let mut surface = CpuSurface::new(10, 10);
        surface.fill_background(WHITE);

        surface.stroke_path(
            &[Point::new(-50.0, -50.0), Point::new(-40.0, -50.0)],
            &StrokeStyle::solid(BLACK, 4.0),
        );

        assert!(surface.pixels().iter().all(|px| *px == WHITE));
    }

    #[test]
    fn test_row_span_follows_diagonal() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(100.0, 100.0);

        let (left, right) = row_span(a, b, 50.5, 3.0).unwrap();
        assert!(left <= 47.5 && left > 40.0, "left {left}");
        assert!(right >= 53.5 && right < 60.0, "right {right}");

        assert_eq!(row_span(a, b, 120.0, 3.0), None);
        assert_eq!(row_span(a, Point::new(100.0, 0.0), 10.0, 3.0), None);
    }

    #[test]
    fn test_long_diagonal_stroke() {
        let mut surface = CpuSurface::new(100, 100);
        surface.fill_background(WHITE);

        surface.stroke_path(
            &[Point::new(0.0, 0.0), Point::new(100.0, 100.0)],
            &StrokeStyle::solid(BLACK, 4.0),
        );

        for i in [5, 30, 50, 77, 95] {
            assert_eq!(surface.get_pixel(i, i), Some(BLACK), "on spine at {i}");
            assert_eq!(surface.get_pixel(i, i + 6), Some(WHITE), "below spine at {i}");
            assert_eq!(surface.get_pixel(i + 6, i), Some(WHITE), "right of spine at {i}");
        }
        assert_eq!(surface.get_pixel(99, 0), Some(WHITE));
        assert_eq!(surface.get_pixel(0, 99), Some(WHITE));
    }

    #[test]
    fn test_to_rgba8() {
        let mut surface = CpuSurface::new(2, 1);
        surface.fill_background(WHITE);
        surface.blend_pixel(1, 0, BLACK, 1.0);
        assert_eq!(surface.to_rgba8(), vec![[255, 255, 255, 255], [0, 0, 0, 255]]);
    }
}
