//! JPEG encoding of the export surface.

use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, ImageEncoder};
use thiserror::Error;

/// MIME type of the export codec.
pub const JPEG_MIME_TYPE: &str = "image/jpeg";
/// Canonical file extension of the export codec.
pub const JPEG_EXTENSION: &str = "jpg";

#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("Surface buffer holds {actual} bytes, {expected} expected for RGB8")]
    InvalidPixelData { expected: usize, actual: usize },

    #[error("Cannot encode an empty {width}x{height} surface")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("JPEG encoder rejected the surface: {0}")]
    EncodingFailed(String),

    /// The encoder finished without producing any bytes
    #[error("JPEG encoder produced no data")]
    EmptyOutput,
}

/// Encode a rendered RGB8 surface. `quality` is clamped to 1-100.
pub fn encode_jpeg(
    pixels: &[u8],
    width: u32,
    height: u32,
    quality: u8,
) -> Result<Vec<u8>, EncodeError> {
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected = width as usize * height as usize * 3;
    if pixels.len() != expected {
        let actual = pixels.len();
        return Err(EncodeError::InvalidPixelData { expected, actual });
    }

    // JPEG rarely compresses below a tenth of the raw size at export quality
    let mut out = Vec::with_capacity(expected / 10);
    let encoder = JpegEncoder::new_with_quality(&mut out, quality.clamp(1, 100));
    encoder
        .write_image(pixels, width, height, ExtendedColorType::Rgb8)
        .map_err(|err| EncodeError::EncodingFailed(err.to_string()))?;

    if out.is_empty() {
        Err(EncodeError::EmptyOutput)
    } else {
        Ok(out)
    }
}
