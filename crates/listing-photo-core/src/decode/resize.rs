//! Resizing of decoded bitmaps.
//!
//! The editor keeps a downscaled copy of the source sized to the preview
//! surface, so interactive repaints never touch the full-resolution pixels.

use super::{DecodeError, DecodedImage, FilterType};

/// Resize an image to exact dimensions.
///
/// # Errors
///
/// Returns `DecodeError::EmptyImage` for a zero target dimension and
/// `DecodeError::CorruptedFile` if the source buffer does not match its
/// declared dimensions.
pub fn resize(
    image: &DecodedImage,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Result<DecodedImage, DecodeError> {
    if width == 0 || height == 0 {
        return Err(DecodeError::EmptyImage { width, height });
    }

    if image.width == width && image.height == height {
        return Ok(image.clone());
    }

    let rgb_image = image
        .to_rgb_image()
        .ok_or_else(|| DecodeError::CorruptedFile("pixel buffer size mismatch".to_string()))?;

    let resized = image::imageops::resize(&rgb_image, width, height, filter.to_image_filter());

    Ok(DecodedImage::from(resized))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: u32, height: u32) -> DecodedImage {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.extend_from_slice(&[(x % 256) as u8, (y % 256) as u8, 128]);
            }
        }
        DecodedImage::new(width, height, pixels)
    }

    #[test]
    fn test_resize_downscales() {
        let img = gradient(200, 100);
        let result = resize(&img, 50, 25, FilterType::Bilinear).unwrap();

        assert_eq!((result.width, result.height), (50, 25));
        assert_eq!(result.pixels.len(), 50 * 25 * 3);
    }

    #[test]
    fn test_resize_same_size_is_copy() {
        let img = gradient(10, 10);
        let result = resize(&img, 10, 10, FilterType::Lanczos3).unwrap();
        assert_eq!(result, img);
    }

    #[test]
    fn test_resize_zero_target_fails() {
        let img = gradient(10, 10);
        assert!(resize(&img, 0, 10, FilterType::Nearest).is_err());
        assert!(resize(&img, 10, 0, FilterType::Nearest).is_err());
    }

    #[test]
    fn test_resize_mismatched_buffer_fails() {
        let img = DecodedImage {
            width: 10,
            height: 10,
            pixels: vec![0; 12],
        };
        assert!(matches!(
            resize(&img, 5, 5, FilterType::Bilinear),
            Err(DecodeError::CorruptedFile(_))
        ));
    }
}
