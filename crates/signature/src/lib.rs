//! Freehand signature capture and rasterization
//!
//! This crate turns a pointer-drag gesture into a live vector preview and a
//! final fixed-size pixel image suitable for embedding in a contract:
//! - [`types::StrokeSequence`] - Tagged samples of one capture session
//! - [`gesture`] - Gesture tracker (drag events to samples)
//! - [`preview`] - Stroke path builder for the live preview
//! - [`render`] - Per-frame live renderer
//! - [`surface`] - Drawing-surface capability and CPU implementation
//! - [`raster`] - Deterministic rasterizer
//! - [`encoding`] - Signature image and its PNG boundary
//! - [`session`] - State object tying it together for a host UI

pub mod constants;
pub mod encoding;
pub mod error;
pub mod gesture;
pub mod preview;
pub mod raster;
pub mod render;
pub mod session;
pub mod surface;
pub mod types;

pub use constants::*;
pub use encoding::*;
pub use error::*;
pub use gesture::*;
pub use preview::*;
pub use raster::*;
pub use render::*;
pub use session::*;
pub use surface::*;
pub use types::*;

pub use signature_config::{SignatureConfig, SurfaceTheme};
