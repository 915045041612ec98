//! Live renderer for the interactive preview
//!
//! Strokes the accumulated preview paths onto whatever 2D canvas the host UI
//! provides, once per display frame. Output need not match the rasterizer
//! pixel for pixel.

use kurbo::{BezPath, Cap, Join, Stroke};
use peniko::Color;
use signature_config::{SignatureConfig, SurfaceTheme};
use tracing::trace;

use crate::preview::{StrokePathBuilder, tap_dot};

/// A 2D canvas the live preview can stroke paths onto
pub trait PreviewCanvas {
    fn stroke(&mut self, path: &BezPath, style: &Stroke, color: Color);
}

/// Ink colour with contrast against the surface theme
pub fn ink_for_theme(theme: SurfaceTheme) -> Color {
    match theme {
        SurfaceTheme::Light => Color::BLACK,
        SurfaceTheme::Dark => Color::WHITE,
    }
}

/// Per-frame renderer for the preview paths
#[derive(Debug, Clone)]
pub struct LiveRenderer {
    style: Stroke,
    theme: SurfaceTheme,
}

impl Default for LiveRenderer {
    fn default() -> Self {
        Self::from_config(&SignatureConfig::default())
    }
}

impl LiveRenderer {
    /// Create a renderer with the given width in logical units
    pub fn new(width: f64, theme: SurfaceTheme) -> Self {
        Self {
            style: Stroke::new(width)
                .with_caps(Cap::Round)
                .with_join(Join::Round),
            theme,
        }
    }

    pub fn from_config(config: &SignatureConfig) -> Self {
        Self::new(config.preview_stroke_width as f64, config.theme)
    }

    /// Follow a theme change of the host surface
    pub fn set_theme(&mut self, theme: SurfaceTheme) {
        self.theme = theme;
    }

    pub fn theme(&self) -> SurfaceTheme {
        self.theme
    }

    pub fn style(&self) -> &Stroke {
        &self.style
    }

    pub fn ink(&self) -> Color {
        ink_for_theme(self.theme)
    }

    /// Stroke committed paths then the active path.
    ///
    /// Returns the number of paths drawn.
    pub fn render_frame(
        &self,
        paths: &StrokePathBuilder,
        canvas: &mut impl PreviewCanvas,
    ) -> usize {
        let ink = self.ink();
        let mut drawn = 0;
        for path in paths.paths() {
            // A held tap is still a lone MoveTo
            match tap_dot(path) {
                Some(dot) => canvas.stroke(&dot, &self.style, ink),
                None => canvas.stroke(path, &self.style, ink),
            }
            drawn += 1;
        }
        trace!("LiveRenderer::render_frame: stroked {} paths", drawn);
        drawn
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Point;

    use super::*;

    /// Canvas that records every stroke call
    #[derive(Default)]
    struct RecordingCanvas {
        calls: Vec<(BezPath, Stroke, Color)>,
    }

    impl PreviewCanvas for RecordingCanvas {
        fn stroke(&mut self, path: &BezPath, style: &Stroke, color: Color) {
            self.calls.push((path.clone(), style.clone(), color));
        }
    }

    fn two_stroke_builder() -> StrokePathBuilder {
        let mut builder = StrokePathBuilder::new();
        builder.begin_stroke(Point::new(0.0, 0.0));
        builder.stroke_to(Point::new(10.0, 0.0));
        builder.end_stroke();
        builder.begin_stroke(Point::new(20.0, 0.0));
        builder.stroke_to(Point::new(30.0, 5.0));
        builder
    }

    #[test]
    fn test_renders_committed_then_active() {
        let builder = two_stroke_builder();
        let mut canvas = RecordingCanvas::default();

        let drawn = LiveRenderer::default().render_frame(&builder, &mut canvas);

        assert_eq!(drawn, 2);
        assert_eq!(&canvas.calls[0].0, &builder.committed_paths()[0]);
        assert_eq!(&canvas.calls[1].0, builder.active_path().unwrap());
    }

    #[test]
    fn test_stroke_style_is_round() {
        let builder = two_stroke_builder();
        let mut canvas = RecordingCanvas::default();

        LiveRenderer::default().render_frame(&builder, &mut canvas);

        let style = &canvas.calls[0].1;
        assert_eq!(style.width, 2.0);
        assert_eq!(style.start_cap, Cap::Round);
        assert_eq!(style.end_cap, Cap::Round);
        assert_eq!(style.join, Join::Round);
    }

    #[test]
    fn test_ink_contrasts_with_theme() {
        let mut renderer = LiveRenderer::new(2.0, SurfaceTheme::Light);
        assert_eq!(renderer.ink().components, Color::BLACK.components);

        renderer.set_theme(SurfaceTheme::Dark);
        assert_eq!(renderer.ink().components, Color::WHITE.components);
    }

    #[test]
    fn test_held_tap_renders_as_dot() {
        let mut builder = StrokePathBuilder::new();
        builder.begin_stroke(Point::new(4.0, 4.0));
        let mut canvas = RecordingCanvas::default();

        LiveRenderer::default().render_frame(&builder, &mut canvas);

        assert_eq!(canvas.calls[0].0.elements().len(), 2);
        assert_eq!(builder.active_path().unwrap().elements().len(), 1);
    }

    #[test]
    fn test_empty_builder_draws_nothing() {
        let mut canvas = RecordingCanvas::default();
        let drawn = LiveRenderer::default().render_frame(&StrokePathBuilder::new(), &mut canvas);
        assert_eq!(drawn, 0);
        assert!(canvas.calls.is_empty());
    }
}
