//! Gesture tracker
//!
//! Converts a drag-gesture event stream into the tagged sample sequence the
//! rasterizer consumes. Every reported position is kept; there is no
//! decimation.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::types::{SamplePoint, StrokeSequence};

/// A drag-gesture event in surface-local coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GestureEvent {
    Start { x: f32, y: f32 },
    Move { x: f32, y: f32 },
    End,
}

/// Tracks the current stroke and appends samples to the session sequence
#[derive(Debug, Default)]
pub struct GestureTracker {
    sequence: StrokeSequence,
    /// True between a start and its end
    stroke_open: bool,
    /// Samples past this count are dropped
    max_points: Option<usize>,
}

impl GestureTracker {
    /// Create a tracker with no capture cap
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a tracker that keeps at most `max_points` samples
    pub fn with_max_points(max_points: Option<usize>) -> Self {
        Self {
            max_points,
            ..Self::default()
        }
    }

    /// Feed one gesture event.
    ///
    /// Returns true when the event changed the sequence or stroke state, so
    /// callers can keep dependent state (the preview paths) in lock-step.
    pub fn handle(&mut self, event: GestureEvent) -> bool {
        match event {
            GestureEvent::Start { x, y } => self.begin_stroke(x, y),
            GestureEvent::Move { x, y } => self.stroke_to(x, y),
            GestureEvent::End => self.end_stroke(),
        }
    }

    /// Open a new stroke at the given point
    pub fn begin_stroke(&mut self, x: f32, y: f32) -> bool {
        if self.is_full() {
            warn!(
                "GestureTracker::begin_stroke: capture full ({} samples), dropping stroke",
                self.sequence.len()
            );
            self.stroke_open = false;
            return false;
        }

        self.sequence.push(SamplePoint::start(x, y));
        self.stroke_open = true;
        debug!(
            "GestureTracker::begin_stroke at ({:.1}, {:.1}), stroke #{}",
            x,
            y,
            self.sequence.stroke_count()
        );
        true
    }

    /// Extend the open stroke to the given point
    pub fn stroke_to(&mut self, x: f32, y: f32) -> bool {
        if !self.stroke_open {
            debug!("GestureTracker::stroke_to: no open stroke, ignoring");
            return false;
        }
        if self.is_full() {
            warn!(
                "GestureTracker::stroke_to: capture full ({} samples), dropping sample",
                self.sequence.len()
            );
            return false;
        }

        self.sequence.push(SamplePoint::continuation(x, y));
        true
    }

    /// Close the open stroke. Appends nothing.
    pub fn end_stroke(&mut self) -> bool {
        std::mem::replace(&mut self.stroke_open, false)
    }

    /// Drop every sample and any open stroke
    pub fn clear(&mut self) {
        self.sequence.clear();
        self.stroke_open = false;
    }

    /// Check if a stroke is currently in progress
    pub fn is_stroking(&self) -> bool {
        self.stroke_open
    }

    /// True once the capture cap is reached
    pub fn is_full(&self) -> bool {
        self.max_points.is_some_and(|max| self.sequence.len() >= max)
    }

    /// The samples captured so far
    pub fn sequence(&self) -> &StrokeSequence {
        &self.sequence
    }

    /// Immutable copy of the samples, safe to hand to another context
    pub fn snapshot(&self) -> StrokeSequence {
        self.sequence.clone()
    }
}
