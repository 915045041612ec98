//! Recorded gesture scripts

use std::path::Path;

use serde::{Deserialize, Serialize};
use signature_pad::{CanvasExtent, GestureEvent, SignatureSession};
use tracing::debug;

use crate::ReplayError;

/// A recorded capture: the surface size followed by the raw gesture stream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayScript {
    pub width: u32,
    pub height: u32,
    pub events: Vec<GestureEvent>,
}

impl ReplayScript {
    pub fn from_json_str(json: &str) -> Result<Self, ReplayError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ReplayError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn extent(&self) -> CanvasExtent {
        CanvasExtent::new(self.width, self.height)
    }

    /// Lay out the surface, then feed every event in order
    pub fn play(&self, session: &mut SignatureSession) {
        session.set_extent(self.extent());
        for event in &self.events {
            session.handle(*event);
        }
        debug!(
            "Replayed {} events into {} samples",
            self.events.len(),
            session.sequence().len()
        );
    }
}
