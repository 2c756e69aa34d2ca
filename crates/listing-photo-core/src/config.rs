//! Editor tunables.

use serde::{Deserialize, Serialize};

/// Finger-distance pixels per 1.0 of zoom during a pinch.
pub const DEFAULT_PINCH_SENSITIVITY: f64 = 200.0;
/// Space kept free around the preview surface, in host pixels.
pub const DEFAULT_PREVIEW_MARGIN: f64 = 32.0;
/// Export quality on the 0.0–1.0 scale.
pub const DEFAULT_EXPORT_QUALITY: f32 = 0.9;

/// Runtime configuration for an editor session.
///
/// Every field is optional when deserialized; missing fields keep their
/// defaults. Zoom bounds are not configurable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    /// Divisor turning a pinch distance delta into a zoom delta.
    pub pinch_sensitivity: f64,
    /// Margin subtracted from the available viewport before fitting the preview.
    pub preview_margin: f64,
    /// Lossy encoder quality, 0.0–1.0.
    pub export_quality: f32,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            pinch_sensitivity: DEFAULT_PINCH_SENSITIVITY,
            preview_margin: DEFAULT_PREVIEW_MARGIN,
            export_quality: DEFAULT_EXPORT_QUALITY,
        }
    }
}

impl EditorConfig {
    /// Pinch sensitivity, falling back to the default for unusable values.
    pub fn effective_pinch_sensitivity(&self) -> f64 {
        if self.pinch_sensitivity.is_finite() && self.pinch_sensitivity > 0.0 {
            self.pinch_sensitivity
        } else {
            DEFAULT_PINCH_SENSITIVITY
        }
    }

    /// Quality mapped onto the encoder's 1–100 scale.
    pub fn jpeg_quality(&self) -> u8 {
        let q = if self.export_quality.is_finite() {
            self.export_quality
        } else {
            DEFAULT_EXPORT_QUALITY
        };
        (q.clamp(0.01, 1.0) * 100.0).round() as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EditorConfig::default();
        assert_eq!(config.pinch_sensitivity, 200.0);
        assert_eq!(config.jpeg_quality(), 90);
    }

    #[test]
    fn test_quality_mapping_clamps() {
        let mut config = EditorConfig::default();
        config.export_quality = 2.0;
        assert_eq!(config.jpeg_quality(), 100);

        config.export_quality = -1.0;
        assert_eq!(config.jpeg_quality(), 1);

        config.export_quality = f32::NAN;
        assert_eq!(config.jpeg_quality(), 90);
    }

    #[test]
    fn test_invalid_sensitivity_falls_back() {
        let mut config = EditorConfig::default();
        config.pinch_sensitivity = 0.0;
        assert_eq!(config.effective_pinch_sensitivity(), DEFAULT_PINCH_SENSITIVITY);

        config.pinch_sensitivity = 100.0;
        assert_eq!(config.effective_pinch_sensitivity(), 100.0);
    }
}
