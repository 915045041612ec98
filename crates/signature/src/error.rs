//! Error types for rasterization and image encoding.

use crate::types::CanvasExtent;

/// Errors that can occur when finalizing a signature.
///
/// All are recoverable; no partial image is ever produced.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum RasterizeError {
    #[error("No points captured")]
    EmptyInput,

    #[error("Surface not laid out yet: {}x{}", .0.width, .0.height)]
    ZeroExtent(CanvasExtent),

    #[error("Stroke width must be finite and positive, got {0}")]
    InvalidStrokeWidth(f32),
}

/// Errors that can occur when encoding a signature to PNG.
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error("PNG encoding failed: {0}")]
    Png(#[from] image::ImageError),
}

/// Errors that can occur when decoding a stored signature.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("Not a data URI")]
    NotDataUri,

    #[error("Unsupported MIME type: {0}")]
    UnsupportedMime(String),

    #[error("Invalid base64 payload")]
    InvalidBase64,

    #[error("PNG decoding failed: {0}")]
    Png(#[from] image::ImageError),

    #[error("Decoded image has zero size")]
    EmptyImage,
}
