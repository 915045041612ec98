//! Rasterized signature image and its PNG boundary
//!
//! The core stops at PNG bytes. Callers base64-encode them and prepend
//! [`PNG_DATA_URI_PREFIX`] to embed the signature in a contract payload;
//! [`SignatureImage::from_data_uri`] is the symmetric display path.

use data_url::DataUrl;
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ExtendedColorType, ImageEncoder, ImageFormat};
use tracing::debug;

use crate::error::{DecodeError, EncodeError};
use crate::surface::CpuSurface;
use crate::types::CanvasExtent;

/// Prefix of a PNG data URI, followed by the base64 payload
pub const PNG_DATA_URI_PREFIX: &str = "data:image/png;base64,";

const WHITE_RGBA8: [u8; 4] = [255, 255, 255, 255];

/// Immutable 8-bit RGBA pixel buffer of exactly the canvas extent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureImage {
    extent: CanvasExtent,
    /// Row-major pixels
    pixels: Vec<[u8; 4]>,
}

impl SignatureImage {
    pub(crate) fn from_surface(surface: &CpuSurface) -> Self {
        Self {
            extent: CanvasExtent::new(surface.width, surface.height),
            pixels: surface.to_rgba8(),
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.extent.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.extent.height
    }

    #[inline]
    pub fn extent(&self) -> CanvasExtent {
        self.extent
    }

    /// Get a pixel at the given coordinates
    /// Returns None if coordinates are out of bounds
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.extent.width || y >= self.extent.height {
            return None;
        }
        let index = (y as usize) * (self.extent.width as usize) + (x as usize);
        Some(self.pixels[index])
    }

    pub fn pixels(&self) -> &[[u8; 4]] {
        &self.pixels
    }

    /// Raw RGBA8 bytes, row-major, suitable for any PNG codec
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// True when no pixel differs from the white background
    pub fn is_blank(&self) -> bool {
        self.pixels.iter().all(|px| *px == WHITE_RGBA8)
    }

    /// Encode as a lossless PNG at maximum compression
    pub fn to_png(&self) -> Result<Vec<u8>, EncodeError> {
        let mut png = Vec::new();
        PngEncoder::new_with_quality(&mut png, CompressionType::Best, FilterType::Adaptive)
            .write_image(
                self.as_bytes(),
                self.width(),
                self.height(),
                ExtendedColorType::Rgba8,
            )?;
        debug!(
            "SignatureImage::to_png: {}x{} -> {} bytes",
            self.width(),
            self.height(),
            png.len()
        );
        Ok(png)
    }

    /// Decode a PNG produced by [`Self::to_png`] or any other encoder
    pub fn from_png(bytes: &[u8]) -> Result<Self, DecodeError> {
        let rgba = image::load_from_memory_with_format(bytes, ImageFormat::Png)?.into_rgba8();
        let extent = CanvasExtent::new(rgba.width(), rgba.height());
        if !extent.is_drawable() {
            return Err(DecodeError::EmptyImage);
        }

        let raw = rgba.into_raw();
        Ok(Self {
            extent,
            pixels: bytemuck::cast_slice(&raw).to_vec(),
        })
    }

    /// Decode a `data:image/png;base64,...` URI from a stored contract
    pub fn from_data_uri(uri: &str) -> Result<Self, DecodeError> {
        let Ok(data_url) = DataUrl::process(uri) else {
            return Err(DecodeError::NotDataUri);
        };

        let mime = data_url.mime_type();
        if mime.type_ != "image" || mime.subtype != "png" {
            return Err(DecodeError::UnsupportedMime(format!(
                "{}/{}",
                mime.type_, mime.subtype
            )));
        }

        let Ok((png, _fragment)) = data_url.decode_to_vec() else {
            return Err(DecodeError::InvalidBase64);
        };
        debug!("SignatureImage::from_data_uri: {} PNG bytes", png.len());
        Self::from_png(&png)
    }
}
