//! Decoding of caller-supplied image bytes with EXIF orientation handling.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::ImageReader;
use tracing::debug;

use super::{DecodeError, DecodedImage, Orientation};

/// Decode an image from bytes, applying EXIF orientation correction.
///
/// The format is sniffed from the content, so JPEG, PNG and WebP uploads
/// all take this path. The result is always RGB8.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the format cannot be detected,
/// `DecodeError::CorruptedFile` if decoding fails, and
/// `DecodeError::EmptyImage` for zero-area images.
pub fn decode_image(bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
    let orientation = extract_orientation(bytes);

    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    if reader.format().is_none() {
        return Err(DecodeError::InvalidFormat);
    }

    let img = reader
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    if !orientation.is_upright() {
        debug!(?orientation, "applying EXIF orientation");
    }
    let decoded = DecodedImage::from(orientation.apply(img).into_rgb8());
    if decoded.is_empty() {
        return Err(DecodeError::EmptyImage {
            width: decoded.width,
            height: decoded.height,
        });
    }

    Ok(decoded)
}

/// Read the EXIF orientation tag, falling back to upright.
fn extract_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);
    Reader::new()
        .read_from_container(&mut cursor)
        .ok()
        .and_then(|exif| {
            exif.get_field(Tag::Orientation, In::PRIMARY)
                .and_then(|field| field.value.get_uint(0))
        })
        .map(Orientation::from_exif)
        .unwrap_or_default()
}
