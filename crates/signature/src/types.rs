use kurbo::Point;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One sampled location along a drag gesture
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplePoint {
    pub x: f32,
    pub y: f32,
    /// True for the first sample of a stroke
    pub is_stroke_start: bool,
}

impl SamplePoint {
    /// Sample opening a new stroke
    pub fn start(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            is_stroke_start: true,
        }
    }

    /// Sample continuing the current stroke
    pub fn continuation(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            is_stroke_start: false,
        }
    }

    /// Position as a kurbo point for path building
    #[inline]
    pub fn to_point(self) -> Point {
        Point::new(self.x as f64, self.y as f64)
    }
}

/// Ordered, append-only list of samples for one capture session.
///
/// Only the gesture tracker appends to a live sequence; everyone else builds
/// one with [`StrokeSequence::from_points`] or reads it.
///
/// The first sample of a non-empty sequence always carries
/// `is_stroke_start = true`, so the start markers split the sequence into
/// maximal, non-empty strokes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<SamplePoint>", into = "Vec<SamplePoint>")]
pub struct StrokeSequence {
    points: Vec<SamplePoint>,
}

impl StrokeSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a sequence from raw samples.
    ///
    /// A leading continuation sample is promoted to a stroke start so the
    /// sequence invariant holds for any input.
    pub fn from_points(points: impl IntoIterator<Item = SamplePoint>) -> Self {
        let mut sequence = Self::new();
        for point in points {
            sequence.push(point);
        }
        sequence
    }

    /// Append a sample
    pub(crate) fn push(&mut self, mut point: SamplePoint) {
        if self.points.is_empty() && !point.is_stroke_start {
            debug!(
                "StrokeSequence::push: promoting leading sample ({:.1}, {:.1}) to stroke start",
                point.x, point.y
            );
            point.is_stroke_start = true;
        }
        self.points.push(point);
    }

    /// Drop every sample (erase)
    pub(crate) fn clear(&mut self) {
        self.points.clear();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// All samples in capture order
    #[inline]
    pub fn points(&self) -> &[SamplePoint] {
        &self.points
    }

    /// Number of strokes (start markers) in the sequence
    pub fn stroke_count(&self) -> usize {
        self.points.iter().filter(|p| p.is_stroke_start).count()
    }

    /// Iterate over the strokes, each a non-empty slice beginning with its start sample
    pub fn strokes(&self) -> impl Iterator<Item = &[SamplePoint]> {
        self.points.chunk_by(|_, next| !next.is_stroke_start)
    }
}

impl From<Vec<SamplePoint>> for StrokeSequence {
    fn from(points: Vec<SamplePoint>) -> Self {
        Self::from_points(points)
    }
}

impl From<StrokeSequence> for Vec<SamplePoint> {
    fn from(sequence: StrokeSequence) -> Self {
        sequence.points
    }
}

/// Pixel size of the interactive surface at finalize time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CanvasExtent {
    pub width: u32,
    pub height: u32,
}

impl CanvasExtent {
    /// Extent reported before the first layout pass
    pub const UNMEASURED: Self = Self {
        width: 0,
        height: 0,
    };

    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// True when both dimensions are positive
    #[inline]
    pub fn is_drawable(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    #[inline]
    pub fn pixel_count(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }
}
