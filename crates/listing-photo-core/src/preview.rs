//! Bounded-resolution interactive preview.
//!
//! The preview surface is sized once per load to fit the host viewport and
//! is never upscaled past the source's native resolution. Transform
//! changes repaint it but never resize it, so pan offsets stay in stable
//! surface pixels.

use serde::{Deserialize, Serialize};

use crate::decode::DecodedImage;
use crate::transform::{render_placed, InterpolationFilter, Placement, TransformState};

/// Space the host makes available to the preview, in host pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Pixel size of the preview surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewSurface {
    pub width: u32,
    pub height: u32,
}

impl PreviewSurface {
    /// Fit a `source_width`×`source_height` image into the viewport minus `margin`.
    ///
    /// ```text
    /// scale = min((vw - margin) / sw, (vh - margin) / sh, 1)
    /// ```
    ///
    /// Each side is at least one pixel, even for a viewport smaller than
    /// the margin.
    pub fn fit(source_width: u32, source_height: u32, viewport: Viewport, margin: f64) -> Self {
        let sw = source_width.max(1) as f64;
        let sh = source_height.max(1) as f64;

        let scale = ((viewport.width - margin) / sw)
            .min((viewport.height - margin) / sh)
            .min(1.0);
        let scale = if scale.is_finite() { scale.max(0.0) } else { 1.0 };

        Self {
            width: ((sw * scale).round() as u32).max(1),
            height: ((sh * scale).round() as u32).max(1),
        }
    }

    pub fn center(&self) -> (f64, f64) {
        (self.width as f64 / 2.0, self.height as f64 / 2.0)
    }
}

/// Paint the preview surface from the preview bitmap and the transform.
///
/// The bitmap is normally the source resized to the surface, so at the
/// default transform the image exactly fills the surface. A bitmap of any
/// other size is stretched to the surface width first.
pub fn render_preview(
    bitmap: &DecodedImage,
    surface: PreviewSurface,
    transform: &TransformState,
) -> DecodedImage {
    let (cx, cy) = surface.center();
    let pan = transform.pan();
    let fit_scale = if bitmap.width == 0 {
        1.0
    } else {
        surface.width as f64 / bitmap.width as f64
    };

    let placement = Placement {
        origin_x: cx + pan.x,
        origin_y: cy + pan.y,
        rotation_radians: transform.rotation_radians(),
        scale: transform.zoom() * fit_scale,
    };

    render_placed(
        bitmap,
        surface.width,
        surface.height,
        &placement,
        InterpolationFilter::Bilinear,
    )
}
