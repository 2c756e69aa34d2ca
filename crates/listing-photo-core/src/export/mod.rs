//! Export pipeline: full-resolution render, JPEG encode, result naming.
//!
//! Export runs once per apply. It never reuses preview pixels: the
//! transform is replayed against the full-resolution source, so preview
//! downscaling never limits output quality.

mod composer;
mod jpeg;
mod result;

pub use composer::{
    export_surface_size, rescale_pan, ExportComposer, ExportError, MAX_SURFACE_AREA,
    MAX_SURFACE_DIMENSION,
};
pub use jpeg::{encode_jpeg, EncodeError, JPEG_EXTENSION, JPEG_MIME_TYPE};
pub use result::{derive_filename, EditResult};
