//! Image decoding for the editor.
//!
//! This module provides functionality for:
//! - Decoding uploaded JPEG/PNG/WebP bytes with EXIF orientation applied
//! - Resizing the decoded bitmap to the preview surface
//!
//! Decoding is synchronous; the editor wraps it in a load ticket so a
//! host can run it off the interaction path and drop stale results.

mod load;
mod resize;
mod types;

#[cfg(test)]
pub(crate) use load::tests::encoded_fixture;
pub use load::decode_image;
pub use resize::resize;
pub use types::{DecodeError, DecodedImage, FilterType, Orientation};
