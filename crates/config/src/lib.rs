//! Shared configuration for the signature pad
//!
//! This crate provides the single source of truth for stroke widths,
//! capture limits and the interactive surface theme, shared by the core
//! library and the replay tool.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Preview stroke width in logical units
pub const DEFAULT_PREVIEW_STROKE_WIDTH: f32 = 2.0;

/// Rasterized stroke width in physical pixels
pub const DEFAULT_RASTER_STROKE_WIDTH: f32 = 4.0;

/// Maximum number of samples kept in one capture session
pub const DEFAULT_MAX_POINTS: usize = 10_000;

/// Errors that can occur while loading or saving configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config format: {0}")]
    Format(#[from] serde_json::Error),

    #[error("Invalid stroke width: {0}")]
    InvalidStrokeWidth(f32),
}

/// Theme of the interactive surface the pad is drawn on.
///
/// Only affects the live preview ink; the rasterized signature is always
/// black on white.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SurfaceTheme {
    #[default]
    Light,
    Dark,
}

/// Signature pad configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignatureConfig {
    /// Preview stroke width in logical units
    pub preview_stroke_width: f32,
    /// Rasterized stroke width in physical pixels
    pub raster_stroke_width: f32,
    /// Capture cap; samples past it are dropped. `None` disables the cap.
    pub max_points: Option<usize>,
    /// Theme of the interactive surface
    pub theme: SurfaceTheme,
}

impl Default for SignatureConfig {
    fn default() -> Self {
        Self {
            preview_stroke_width: DEFAULT_PREVIEW_STROKE_WIDTH,
            raster_stroke_width: DEFAULT_RASTER_STROKE_WIDTH,
            max_points: Some(DEFAULT_MAX_POINTS),
            theme: SurfaceTheme::default(),
        }
    }
}

impl SignatureConfig {
    /// Parse a config from JSON; missing fields take their defaults
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject stroke widths that would draw nothing
    pub fn validate(&self) -> Result<(), ConfigError> {
        for width in [self.preview_stroke_width, self.raster_stroke_width] {
            if !(width.is_finite() && width > 0.0) {
                return Err(ConfigError::InvalidStrokeWidth(width));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SignatureConfig::default();
        assert_eq!(config.preview_stroke_width, DEFAULT_PREVIEW_STROKE_WIDTH);
        assert_eq!(config.raster_stroke_width, DEFAULT_RASTER_STROKE_WIDTH);
        assert_eq!(config.max_points, Some(DEFAULT_MAX_POINTS));
        assert_eq!(config.theme, SurfaceTheme::Light);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = SignatureConfig::from_json_str(r#"{ "theme": "dark" }"#).unwrap();
        assert_eq!(config.theme, SurfaceTheme::Dark);
        assert_eq!(config.raster_stroke_width, DEFAULT_RASTER_STROKE_WIDTH);
    }

    #[test]
    fn test_uncapped_capture() {
        let config = SignatureConfig::from_json_str(r#"{ "max_points": null }"#).unwrap();
        assert_eq!(config.max_points, None);
    }

    #[test]
    fn test_rejects_zero_width() {
        let result = SignatureConfig::from_json_str(r#"{ "raster_stroke_width": 0.0 }"#);
        assert!(matches!(result, Err(ConfigError::InvalidStrokeWidth(_))));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let result = SignatureConfig::from_json_str("{ not json");
        assert!(matches!(result, Err(ConfigError::Format(_))));
    }

    #[test]
    fn test_json_preserves_settings() {
        let config = SignatureConfig {
            max_points: Some(42),
            theme: SurfaceTheme::Dark,
            ..Default::default()
        };
        let json = config.to_json_string().unwrap();
        assert_eq!(SignatureConfig::from_json_str(&json).unwrap(), config);
    }
}
