//! Decode-on-load as a ticketed, single-resolution task.
//!
//! `EditorController::begin_load` hands out a [`LoadRequest`]. The host may
//! run [`LoadRequest::decode`] wherever it likes and feed the outcome back
//! with `finish_load`. Only the outcome carrying the newest ticket is
//! installed; anything older was superseded by a later load and is
//! dropped.

use std::sync::Arc;

use crate::decode::{decode_image, resize, DecodeError, DecodedImage, FilterType};
use crate::preview::{PreviewSurface, Viewport};

/// Caller-supplied image: raw file bytes plus the display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageHandle {
    pub bytes: Vec<u8>,
    pub name: String,
}

impl ImageHandle {
    pub fn new(bytes: Vec<u8>, name: impl Into<String>) -> Self {
        Self {
            bytes,
            name: name.into(),
        }
    }
}

/// Generation number of a load; newer tickets supersede older ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LoadTicket(pub(crate) u64);

/// The image under edit, immutable for the session.
#[derive(Debug, Clone)]
pub struct SourceImage {
    name: String,
    full: Arc<DecodedImage>,
    preview_bitmap: DecodedImage,
    surface: PreviewSurface,
}

impl SourceImage {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn width(&self) -> u32 {
        self.full.width
    }

    pub fn height(&self) -> u32 {
        self.full.height
    }

    /// Full-resolution bitmap, shared read-only with the export renderer.
    pub fn full(&self) -> &Arc<DecodedImage> {
        &self.full
    }

    /// Source resized to the preview surface.
    pub fn preview_bitmap(&self) -> &DecodedImage {
        &self.preview_bitmap
    }

    pub fn surface(&self) -> PreviewSurface {
        self.surface
    }
}

/// A pending decode.
#[derive(Debug, Clone)]
pub struct LoadRequest {
    pub(crate) ticket: LoadTicket,
    pub(crate) handle: ImageHandle,
    pub(crate) viewport: Viewport,
    pub(crate) margin: f64,
}

impl LoadRequest {
    pub fn ticket(&self) -> LoadTicket {
        self.ticket
    }

    /// Decode the image and prepare the preview bitmap.
    pub fn decode(self) -> LoadOutcome {
        let result = prepare_source(self.handle, self.viewport, self.margin);
        LoadOutcome {
            ticket: self.ticket,
            result,
        }
    }
}

/// Result of running a [`LoadRequest`].
#[derive(Debug)]
pub struct LoadOutcome {
    pub(crate) ticket: LoadTicket,
    pub(crate) result: Result<SourceImage, DecodeError>,
}

impl LoadOutcome {
    pub fn ticket(&self) -> LoadTicket {
        self.ticket
    }

    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

fn prepare_source(
    handle: ImageHandle,
    viewport: Viewport,
    margin: f64,
) -> Result<SourceImage, DecodeError> {
    let full = decode_image(&handle.bytes)?;
    let surface = PreviewSurface::fit(full.width, full.height, viewport, margin);
    let preview_bitmap = resize(&full, surface.width, surface.height, FilterType::Lanczos3)?;

    Ok(SourceImage {
        name: handle.name,
        full: Arc::new(full),
        preview_bitmap,
        surface,
    })
}
