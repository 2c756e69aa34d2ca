//! Full-resolution re-render of the edit.
//!
//! The export surface is sized from the rotated bounding box of the
//! source, so no rotation ever clips the image, then scaled by the zoom.
//! The pan offset the user set on the preview is rescaled per axis from
//! preview-surface pixels to export-surface pixels.

use thiserror::Error;
use tracing::{debug, info};

use super::jpeg::{encode_jpeg, EncodeError, JPEG_EXTENSION, JPEG_MIME_TYPE};
use super::result::{derive_filename, EditResult};
use crate::decode::DecodedImage;
use crate::preview::PreviewSurface;
use crate::transform::{
    compute_rotated_bounds, render_placed, InterpolationFilter, PanOffset, Placement,
    TransformState,
};

/// Largest side a raster surface may have, matching common canvas limits.
pub const MAX_SURFACE_DIMENSION: u32 = 16_384;
/// Largest pixel count a raster surface may have.
pub const MAX_SURFACE_AREA: u64 = 268_435_456;

/// Reasons an export produces no result.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Apply was requested before any image was loaded
    #[error("No source image loaded")]
    NoSource,

    /// The export surface is too large to allocate
    #[error("Export surface {width}x{height} is unavailable")]
    ResourceUnavailable { width: u32, height: u32 },

    /// The encoder failed or produced nothing
    #[error(transparent)]
    Encode(#[from] EncodeError),
}

/// Size of the export surface for a source and transform.
///
/// `round(bounds × zoom)` per axis, at least one pixel each.
pub fn export_surface_size(
    source_width: u32,
    source_height: u32,
    transform: &TransformState,
) -> (u32, u32) {
    let (bw, bh) = compute_rotated_bounds(source_width, source_height, transform.rotation_degrees());
    let zoom = transform.zoom();
    (
        ((bw as f64 * zoom).round() as u32).max(1),
        ((bh as f64 * zoom).round() as u32).max(1),
    )
}

/// Rescale a preview-space pan offset into export-surface pixels.
///
/// Each axis uses `export_dimension / preview_dimension`; without a known
/// preview size the offset is used 1:1.
pub fn rescale_pan(
    pan: PanOffset,
    export_size: (u32, u32),
    preview: Option<PreviewSurface>,
) -> PanOffset {
    match preview {
        Some(surface) if surface.width > 0 && surface.height > 0 => PanOffset::new(
            pan.x * export_size.0 as f64 / surface.width as f64,
            pan.y * export_size.1 as f64 / surface.height as f64,
        ),
        _ => pan,
    }
}

/// Renders and encodes the export for one apply.
#[derive(Debug, Clone)]
pub struct ExportComposer {
    pub transform: TransformState,
    /// Preview surface the pan offset was expressed in.
    pub preview: Option<PreviewSurface>,
    /// Encoder quality on the 1–100 scale.
    pub quality: u8,
}

impl ExportComposer {
    /// Render the export surface at full resolution.
    pub fn render(&self, source: &DecodedImage) -> Result<DecodedImage, ExportError> {
        let (width, height) = export_surface_size(source.width, source.height, &self.transform);
        if width > MAX_SURFACE_DIMENSION
            || height > MAX_SURFACE_DIMENSION
            || width as u64 * height as u64 > MAX_SURFACE_AREA
        {
            return Err(ExportError::ResourceUnavailable { width, height });
        }

        let pan = rescale_pan(self.transform.pan(), (width, height), self.preview);
        let placement = Placement {
            origin_x: width as f64 / 2.0 + pan.x,
            origin_y: height as f64 / 2.0 + pan.y,
            rotation_radians: self.transform.rotation_radians(),
            scale: self.transform.zoom(),
        };
        debug!(width, height, pan_x = pan.x, pan_y = pan.y, "rendering export surface");

        Ok(render_placed(
            source,
            width,
            height,
            &placement,
            InterpolationFilter::Lanczos3,
        ))
    }

    /// Render, encode and name the export.
    pub fn compose(
        &self,
        source: Option<&DecodedImage>,
        original_name: &str,
    ) -> Result<EditResult, ExportError> {
        let source = source.ok_or(ExportError::NoSource)?;
        let surface = self.render(source)?;
        let bytes = encode_jpeg(&surface.pixels, surface.width, surface.height, self.quality)?;

        info!(
            width = surface.width,
            height = surface.height,
            bytes = bytes.len(),
            "export encoded"
        );

        Ok(EditResult {
            bytes,
            mime_type: JPEG_MIME_TYPE.to_string(),
            filename: derive_filename(original_name, JPEG_EXTENSION),
            width: surface.width,
            height: surface.height,
        })
    }
}
