//! Stroke path builder for the live preview
//!
//! Reconstructs vector paths from gesture input purely for on-screen
//! feedback. The paths are transient: they are discarded with the pad and
//! never feed the rasterizer.

use kurbo::{BezPath, PathEl, Point, Vec2};
use tracing::debug;

use crate::constants::MIN_SEGMENT_LENGTH;
use crate::gesture::GestureEvent;
use crate::types::StrokeSequence;

/// Accumulates committed and in-progress preview paths
#[derive(Debug, Default, Clone)]
pub struct StrokePathBuilder {
    /// Finished strokes
    committed_paths: Vec<BezPath>,
    /// Stroke in progress
    active_path: Option<BezPath>,
    /// End point of the active path
    last_point: Option<Point>,
}

impl StrokePathBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild preview paths from a captured sequence.
    ///
    /// Every stroke ends up committed; none is left active.
    pub fn from_sequence(sequence: &StrokeSequence) -> Self {
        let mut builder = Self::new();
        for stroke in sequence.strokes() {
            let head = stroke[0];
            builder.begin_stroke(head.to_point());
            for point in &stroke[1..] {
                builder.stroke_to(point.to_point());
            }
            builder.end_stroke();
        }
        builder
    }

    /// Apply one gesture event
    pub fn handle(&mut self, event: GestureEvent) {
        match event {
            GestureEvent::Start { x, y } => self.begin_stroke(Point::new(x as f64, y as f64)),
            GestureEvent::Move { x, y } => self.stroke_to(Point::new(x as f64, y as f64)),
            GestureEvent::End => self.end_stroke(),
        }
    }

    /// Open the active path at `point`, committing any path left open
    pub fn begin_stroke(&mut self, point: Point) {
        self.end_stroke();

        let mut path = BezPath::new();
        path.move_to(point);
        self.active_path = Some(path);
        self.last_point = Some(point);
    }

    /// Extend the active path with a straight segment
    pub fn stroke_to(&mut self, point: Point) {
        let Some(path) = self.active_path.as_mut() else {
            debug!("StrokePathBuilder::stroke_to: no active path, ignoring");
            return;
        };

        // Repeated samples add nothing visible
        if let Some(last) = self.last_point
            && last.distance(point) < MIN_SEGMENT_LENGTH
        {
            return;
        }

        path.line_to(point);
        self.last_point = Some(point);
    }

    /// Commit the active path, if any
    pub fn end_stroke(&mut self) {
        if let Some(mut path) = self.active_path.take() {
            if let Some(dot) = tap_dot(&path) {
                path = dot;
            }
            self.committed_paths.push(path);
        }
        self.last_point = None;
    }

    /// Drop every path (erase)
    pub fn clear(&mut self) {
        self.committed_paths.clear();
        self.active_path = None;
        self.last_point = None;
    }

    pub fn committed_paths(&self) -> &[BezPath] {
        &self.committed_paths
    }

    pub fn active_path(&self) -> Option<&BezPath> {
        self.active_path.as_ref()
    }

    /// Committed paths followed by the active one, in draw order
    pub fn paths(&self) -> impl Iterator<Item = &BezPath> {
        self.committed_paths.iter().chain(self.active_path.as_ref())
    }

    /// Number of strokes, committed or active
    pub fn stroke_count(&self) -> usize {
        self.committed_paths.len() + usize::from(self.active_path.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.stroke_count() == 0
    }
}

/// Dot path for a stroke that never left its start point.
///
/// Returns `None` unless `path` is a lone `MoveTo`. Stroke expansion drops
/// zero-length segments, so the dot is a hair-length segment that round caps
/// widen into a disc.
pub fn tap_dot(path: &BezPath) -> Option<BezPath> {
    let [PathEl::MoveTo(start)] = path.elements() else {
        return None;
    };
    let mut dot = path.clone();
    dot.line_to(*start + Vec2::new(MIN_SEGMENT_LENGTH, 0.0));
    Some(dot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SamplePoint;

    #[test]
    fn test_two_strokes_commit_two_paths() {
        let mut builder = StrokePathBuilder::new();
        builder.handle(GestureEvent::Start { x: 0.0, y: 0.0 });
        builder.handle(GestureEvent::Move { x: 10.0, y: 0.0 });
        builder.handle(GestureEvent::Move { x: 10.0, y: 10.0 });
        builder.handle(GestureEvent::End);
        builder.handle(GestureEvent::Start { x: 20.0, y: 20.0 });
        builder.handle(GestureEvent::Move { x: 30.0, y: 20.0 });
        builder.handle(GestureEvent::End);

        assert_eq!(builder.committed_paths().len(), 2);
        assert!(builder.active_path().is_none());
    }

    #[test]
    fn test_from_sequence_matches_start_markers() {
        let sequence = StrokeSequence::from_points([
            SamplePoint::start(0.0, 0.0),
            SamplePoint::continuation(1.0, 1.0),
            SamplePoint::continuation(2.0, 2.0),
            SamplePoint::start(5.0, 5.0),
            SamplePoint::continuation(6.0, 6.0),
        ]);

        let builder = StrokePathBuilder::from_sequence(&sequence);
        assert_eq!(builder.committed_paths().len(), sequence.stroke_count());
        assert_eq!(builder.committed_paths().len(), 2);
    }

    #[test]
    fn test_segments_are_straight_lines() {
        let mut builder = StrokePathBuilder::new();
        builder.begin_stroke(Point::new(0.0, 0.0));
        builder.stroke_to(Point::new(5.0, 0.0));
        builder.stroke_to(Point::new(5.0, 5.0));

        let elements = builder.active_path().unwrap().elements().to_vec();
        assert_eq!(
            elements,
            vec![
                PathEl::MoveTo(Point::new(0.0, 0.0)),
                PathEl::LineTo(Point::new(5.0, 0.0)),
                PathEl::LineTo(Point::new(5.0, 5.0)),
            ]
        );
    }

    #[test]
    fn test_active_path_counts_as_stroke() {
        let mut builder = StrokePathBuilder::new();
        builder.begin_stroke(Point::new(1.0, 1.0));
        assert_eq!(builder.stroke_count(), 1);
        assert_eq!(builder.paths().count(), 1);
        assert!(builder.committed_paths().is_empty());
    }

    #[test]
    fn test_start_commits_open_path() {
        let mut builder = StrokePathBuilder::new();
        builder.begin_stroke(Point::new(0.0, 0.0));
        builder.begin_stroke(Point::new(3.0, 3.0));
        assert_eq!(builder.committed_paths().len(), 1);
        assert!(builder.active_path().is_some());
    }

    #[test]
    fn test_move_without_start_ignored() {
        let mut builder = StrokePathBuilder::new();
        builder.stroke_to(Point::new(1.0, 1.0));
        assert!(builder.is_empty());
    }

    #[test]
    fn test_tap_commits_dot() {
        let mut builder = StrokePathBuilder::new();
        builder.handle(GestureEvent::Start { x: 10.0, y: 10.0 });
        builder.handle(GestureEvent::Move { x: 10.0, y: 10.0 });
        builder.handle(GestureEvent::End);

        let elements = builder.committed_paths()[0].elements();
        assert_eq!(elements.len(), 2);
        assert_eq!(elements[0], PathEl::MoveTo(Point::new(10.0, 10.0)));
        let PathEl::LineTo(end) = elements[1] else {
            panic!("expected a line segment, got {:?}", elements[1]);
        };
        assert!(end.distance(Point::new(10.0, 10.0)) > 0.0);
    }

    #[test]
    fn test_tap_dot_leaves_drawn_paths_alone() {
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.line_to((5.0, 0.0));
        assert!(tap_dot(&path).is_none());
        assert!(tap_dot(&BezPath::new()).is_none());
    }

    #[test]
    fn test_clear() {
        let mut builder = StrokePathBuilder::new();
        builder.begin_stroke(Point::new(0.0, 0.0));
        builder.end_stroke();
        builder.begin_stroke(Point::new(1.0, 1.0));
        builder.clear();
        assert!(builder.is_empty());
        assert!(builder.active_path().is_none());
    }
}
