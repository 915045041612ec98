//! Signature capture session
//!
//! This module provides the state object that connects:
//! - Gesture input (start/move/end from the host UI)
//! - Gesture tracker (tagged sample sequence)
//! - Stroke path builder and live renderer (interactive preview)
//! - Rasterizer (final artifact on finalize)
//!
//! The session does not depend on any UI framework. Hosts push events in,
//! draw the preview each frame, and observe state through callbacks.

use signature_config::{ConfigError, SignatureConfig, SurfaceTheme};
use tracing::{debug, info, warn};

use crate::encoding::SignatureImage;
use crate::error::RasterizeError;
use crate::gesture::{GestureEvent, GestureTracker};
use crate::preview::StrokePathBuilder;
use crate::raster::{rasterize_with, signature_style};
use crate::render::{LiveRenderer, PreviewCanvas};
use crate::types::{CanvasExtent, StrokeSequence};

/// Snapshot of session state handed to observers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionState {
    pub point_count: usize,
    pub stroke_count: usize,
    pub extent: CanvasExtent,
    /// Whether the finalize action should be enabled
    pub can_finalize: bool,
    /// Whether the capture cap has been reached
    pub is_full: bool,
}

type Observer = Box<dyn FnMut(&SessionState)>;

/// One "open the pad" interaction, from first layout to dismiss
pub struct SignatureSession {
    config: SignatureConfig,
    tracker: GestureTracker,
    paths: StrokePathBuilder,
    renderer: LiveRenderer,
    extent: CanvasExtent,
    observers: Vec<Observer>,
}

impl std::fmt::Debug for SignatureSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignatureSession")
            .field("point_count", &self.tracker.sequence().len())
            .field("stroke_count", &self.paths.stroke_count())
            .field("extent", &self.extent)
            .field("observer_count", &self.observers.len())
            .finish()
    }
}

impl Default for SignatureSession {
    fn default() -> Self {
        Self::with_valid_config(SignatureConfig::default())
    }
}

impl SignatureSession {
    /// Open a session with an empty sequence and an unmeasured surface.
    ///
    /// Fails if the config carries a stroke width that would draw nothing.
    pub fn new(config: SignatureConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::with_valid_config(config))
    }

    fn with_valid_config(config: SignatureConfig) -> Self {
        debug!("Opening signature session with {:?}", config);
        Self {
            tracker: GestureTracker::with_max_points(config.max_points),
            paths: StrokePathBuilder::new(),
            renderer: LiveRenderer::from_config(&config),
            extent: CanvasExtent::UNMEASURED,
            observers: Vec::new(),
            config,
        }
    }

    /// Register a callback fired after every state change
    pub fn on_change(&mut self, observer: impl FnMut(&SessionState) + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Feed one gesture event from the host
    pub fn handle(&mut self, event: GestureEvent) {
        let changed = self.tracker.handle(event);
        if changed {
            self.paths.handle(event);
        }

        // Keep the preview closed whenever the tracker is (dropped starts, ends)
        if !self.tracker.is_stroking() {
            self.paths.end_stroke();
        }

        if changed {
            self.notify();
        }
    }

    /// Record the measured surface size; (0, 0) is accepted until layout completes
    pub fn set_extent(&mut self, extent: CanvasExtent) {
        if extent == self.extent {
            return;
        }
        debug!("Surface extent now {}x{}", extent.width, extent.height);
        self.extent = extent;
        self.notify();
    }

    /// Follow a theme change of the host surface. Affects the preview only.
    pub fn set_theme(&mut self, theme: SurfaceTheme) {
        self.renderer.set_theme(theme);
    }

    /// Whether the finalize action should be enabled
    pub fn can_finalize(&self) -> bool {
        !self.tracker.sequence().is_empty() && self.extent.is_drawable()
    }

    /// Rasterize the captured signature.
    ///
    /// Works on a snapshot of the samples; the session stays usable and
    /// unchanged whether or not this succeeds.
    pub fn finalize(&self) -> Result<SignatureImage, RasterizeError> {
        let snapshot = self.tracker.snapshot();
        let style = signature_style(self.config.raster_stroke_width);

        match rasterize_with(&snapshot, self.extent, &style) {
            Ok(image) => {
                info!(
                    "Finalized signature: {} samples, {} strokes",
                    snapshot.len(),
                    snapshot.stroke_count()
                );
                Ok(image)
            }
            Err(e) => {
                warn!("Finalize rejected: {}", e);
                Err(e)
            }
        }
    }

    /// Clear every captured sample and preview path
    pub fn erase(&mut self) {
        self.tracker.clear();
        self.paths.clear();
        debug!("Signature erased");
        self.notify();
    }

    /// Close the pad. Nothing carries over to the next session.
    pub fn dismiss(self) {
        debug!(
            "Dismissing signature session with {} samples",
            self.tracker.sequence().len()
        );
    }

    /// Stroke the preview paths onto the host canvas for this frame
    pub fn render_preview(&self, canvas: &mut impl PreviewCanvas) -> usize {
        self.renderer.render_frame(&self.paths, canvas)
    }

    /// Immutable copy of the samples for off-context rasterization
    pub fn snapshot(&self) -> StrokeSequence {
        self.tracker.snapshot()
    }

    pub fn sequence(&self) -> &StrokeSequence {
        self.tracker.sequence()
    }

    pub fn paths(&self) -> &StrokePathBuilder {
        &self.paths
    }

    pub fn extent(&self) -> CanvasExtent {
        self.extent
    }

    pub fn config(&self) -> &SignatureConfig {
        &self.config
    }

    /// Current state as seen by observers
    pub fn state(&self) -> SessionState {
        SessionState {
            point_count: self.tracker.sequence().len(),
            stroke_count: self.tracker.sequence().stroke_count(),
            extent: self.extent,
            can_finalize: self.can_finalize(),
            is_full: self.tracker.is_full(),
        }
    }

    fn notify(&mut self) {
        if self.observers.is_empty() {
            return;
        }
        let state = self.state();
        for observer in &mut self.observers {
            observer(&state);
        }
    }
}
