//! Affine raster pipeline shared by the preview and export renderers.
//!
//! A surface is painted the way a 2D canvas would be after
//! `translate(origin) → rotate(θ) → scale(s) → drawImage(img, -w/2, -h/2)`.
//! Rendering uses inverse mapping: for each surface pixel we undo the
//! transform to find the source position and interpolate there.
//!
//! For a surface pixel center `p`, the source position is:
//! ```text
//! d     = p - origin
//! local = R(-θ) · d / s
//! src   = local + (w/2, h/2)
//! ```
//! Surface pixels whose source position falls outside the image stay black.

use crate::decode::DecodedImage;

/// Interpolation filter for surface rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InterpolationFilter {
    /// Fast bilinear interpolation - used for the live preview.
    #[default]
    Bilinear,
    /// High-quality Lanczos3 interpolation - used for export.
    Lanczos3,
}

/// Where and how the image is drawn on a surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Translated origin in surface pixels; the image center lands here.
    pub origin_x: f64,
    pub origin_y: f64,
    /// Clockwise rotation in radians (y axis pointing down).
    pub rotation_radians: f64,
    /// Uniform scale applied after rotation.
    pub scale: f64,
}

/// Render `image` onto a new `width`×`height` surface using `placement`.
///
/// A zero or non-finite scale produces an all-black surface.
pub fn render_placed(
    image: &DecodedImage,
    width: u32,
    height: u32,
    placement: &Placement,
    filter: InterpolationFilter,
) -> DecodedImage {
    let mut output = DecodedImage::black(width, height);

    if output.is_empty()
        || image.is_empty()
        || placement.scale <= 0.0
        || !placement.scale.is_finite()
    {
        return output;
    }

    let (sin, cos) = placement.rotation_radians.sin_cos();
    let inv_scale = 1.0 / placement.scale;
    let src_w = image.width as f64;
    let src_h = image.height as f64;
    let half_w = src_w / 2.0;
    let half_h = src_h / 2.0;

    for (dst_y, row) in output.pixels.chunks_exact_mut(width as usize * 3).enumerate() {
        let dy = dst_y as f64 + 0.5 - placement.origin_y;

        for (dst_x, px) in row.chunks_exact_mut(3).enumerate() {
            let dx = dst_x as f64 + 0.5 - placement.origin_x;

            // Undo the rotation, then the scale
            let local_x = (dx * cos + dy * sin) * inv_scale;
            let local_y = (-dx * sin + dy * cos) * inv_scale;

            let u = local_x + half_w;
            let v = local_y + half_h;
            if u < 0.0 || u >= src_w || v < 0.0 || v >= src_h {
                continue;
            }

            // Continuous position relative to pixel centers
            let (sx, sy) = (u - 0.5, v - 0.5);
            let sample = match filter {
                InterpolationFilter::Bilinear => sample_bilinear(image, sx, sy),
                InterpolationFilter::Lanczos3 => sample_lanczos3(image, sx, sy),
            };
            px.copy_from_slice(&sample);
        }
    }

    output
}

/// Lanczos kernel radius; each axis reads `2 * LANCZOS_RADIUS` taps.
const LANCZOS_RADIUS: i64 = 3;

fn texel(image: &DecodedImage, x: usize, y: usize) -> [f64; 3] {
    let idx = (y * image.width as usize + x) * 3;
    let px = &image.pixels[idx..idx + 3];
    [px[0] as f64, px[1] as f64, px[2] as f64]
}

fn lerp(a: [f64; 3], b: [f64; 3], t: f64) -> [f64; 3] {
    std::array::from_fn(|i| a[i] + (b[i] - a[i]) * t)
}

fn to_rgb8(color: [f64; 3]) -> [u8; 3] {
    color.map(|v| v.clamp(0.0, 255.0).round() as u8)
}

/// Bilinear sample at a pixel-center-relative position, clamped to the edges.
fn sample_bilinear(image: &DecodedImage, x: f64, y: f64) -> [u8; 3] {
    let last_x = image.width as usize - 1;
    let last_y = image.height as usize - 1;
    let x = x.clamp(0.0, last_x as f64);
    let y = y.clamp(0.0, last_y as f64);

    let (left, top) = (x.floor() as usize, y.floor() as usize);
    let (right, bottom) = ((left + 1).min(last_x), (top + 1).min(last_y));
    let (tx, ty) = (x - left as f64, y - top as f64);

    let upper = lerp(texel(image, left, top), texel(image, right, top), tx);
    let lower = lerp(texel(image, left, bottom), texel(image, right, bottom), tx);
    to_rgb8(lerp(upper, lower, ty))
}

/// Separable Lanczos3 sample. Near the border, where the 6x6 window would
/// leave the image, this degrades to bilinear.
fn sample_lanczos3(image: &DecodedImage, x: f64, y: f64) -> [u8; 3] {
    let (w, h) = (image.width as i64, image.height as i64);
    let (x0, y0) = (x.floor() as i64, y.floor() as i64);
    let reach = LANCZOS_RADIUS - 1;

    if x0 - reach < 0 || x0 + LANCZOS_RADIUS >= w || y0 - reach < 0 || y0 + LANCZOS_RADIUS >= h {
        return sample_bilinear(image, x, y);
    }

    let weights_x = kernel_taps(x - x0 as f64);
    let weights_y = kernel_taps(y - y0 as f64);
    let norm = weights_x.iter().sum::<f64>() * weights_y.iter().sum::<f64>();
    if norm <= 0.0 {
        return [0; 3];
    }

    let mut acc = [0.0f64; 3];
    for (j, wy) in weights_y.iter().enumerate() {
        let row = (y0 - reach + j as i64) as usize;
        let mut row_acc = [0.0f64; 3];
        for (i, wx) in weights_x.iter().enumerate() {
            let color = texel(image, (x0 - reach + i as i64) as usize, row);
            for c in 0..3 {
                row_acc[c] += color[c] * wx;
            }
        }
        for c in 0..3 {
            acc[c] += row_acc[c] * wy;
        }
    }

    to_rgb8(acc.map(|v| v / norm))
}

/// Kernel weights for the taps at `floor - 2 ..= floor + 3`, given the
/// sample's fractional offset past `floor`.
fn kernel_taps(frac: f64) -> [f64; 6] {
    let reach = (LANCZOS_RADIUS - 1) as f64;
    std::array::from_fn(|i| lanczos_weight(frac + reach - i as f64))
}

/// `sinc(d) * sinc(d / 3)` inside the radius, zero outside.
fn lanczos_weight(d: f64) -> f64 {
    let radius = LANCZOS_RADIUS as f64;
    match d.abs() {
        a if a < 1e-12 => 1.0,
        a if a >= radius => 0.0,
        _ => {
            let pd = std::f64::consts::PI * d;
            radius * pd.sin() * (pd / radius).sin() / (pd * pd)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    /// 2x1 image: red on the left, blue on the right.
    fn red_blue() -> DecodedImage {
        DecodedImage::new(2, 1, vec![255, 0, 0, 0, 0, 255])
    }

    fn pixel(img: &DecodedImage, x: u32, y: u32) -> [u8; 3] {
        let idx = ((y * img.width + x) * 3) as usize;
        [img.pixels[idx], img.pixels[idx + 1], img.pixels[idx + 2]]
    }

    fn centered(width: u32, height: u32, rotation_radians: f64, scale: f64) -> Placement {
        Placement {
            origin_x: width as f64 / 2.0,
            origin_y: height as f64 / 2.0,
            rotation_radians,
            scale,
        }
    }

    #[test]
    fn test_identity_placement_copies_image() {
        let img = red_blue();
        let out = render_placed(&img, 2, 1, &centered(2, 1, 0.0, 1.0), InterpolationFilter::Bilinear);
        assert_eq!(out, img);
    }

    #[test]
    fn test_quarter_turn_is_clockwise() {
        // Clockwise 90°: the left (red) half ends up on top
        let img = red_blue();
        let out = render_placed(
            &img,
            1,
            2,
            &centered(1, 2, FRAC_PI_2, 1.0),
            InterpolationFilter::Bilinear,
        );

        assert_eq!(pixel(&out, 0, 0), [255, 0, 0]);
        assert_eq!(pixel(&out, 0, 1), [0, 0, 255]);
    }

    #[test]
    fn test_offset_origin_leaves_black_background() {
        let img = DecodedImage::new(2, 2, vec![200; 12]);
        let placement = Placement {
            origin_x: 1.0,
            origin_y: 1.0,
            rotation_radians: 0.0,
            scale: 1.0,
        };
        let out = render_placed(&img, 4, 4, &placement, InterpolationFilter::Bilinear);

        assert_eq!(pixel(&out, 0, 0), [200, 200, 200]);
        assert_eq!(pixel(&out, 3, 3), [0, 0, 0]);
    }

    #[test]
    fn test_scale_two_fills_double_surface() {
        let img = DecodedImage::new(3, 3, vec![90; 27]);
        let out = render_placed(&img, 6, 6, &centered(6, 6, 0.0, 2.0), InterpolationFilter::Bilinear);
        assert!(out.pixels.iter().all(|&v| v == 90));
    }

    #[test]
    fn test_zero_scale_is_black() {
        let img = DecodedImage::new(2, 2, vec![200; 12]);
        let out = render_placed(&img, 2, 2, &centered(2, 2, 0.0, 0.0), InterpolationFilter::Bilinear);
        assert!(out.pixels.iter().all(|&v| v == 0));
    }

    #[test]
    fn test_lanczos_uniform_image_stays_uniform() {
        let img = DecodedImage::new(16, 16, vec![77; 16 * 16 * 3]);
        let out = render_placed(
            &img,
            16,
            16,
            &centered(16, 16, 0.0, 1.0),
            InterpolationFilter::Lanczos3,
        );
        assert!(out.pixels.iter().all(|&v| v == 77));
    }

    #[test]
    fn test_single_pixel_image() {
        let img = DecodedImage::new(1, 1, vec![10, 20, 30]);
        let out = render_placed(&img, 3, 3, &centered(3, 3, 0.3, 3.0), InterpolationFilter::Lanczos3);
        assert_eq!(pixel(&out, 1, 1), [10, 20, 30]);
    }

    #[test]
    fn test_lanczos_weight_properties() {
        assert_eq!(lanczos_weight(0.0), 1.0);
        assert_eq!(lanczos_weight(3.0), 0.0);
        assert!(lanczos_weight(1.0).abs() < 1e-12);
        assert!((lanczos_weight(1.5) - lanczos_weight(-1.5)).abs() < 1e-12);
    }

    #[test]
    fn test_kernel_taps_at_pixel_center_pick_one_tap() {
        let taps = kernel_taps(0.0);
        assert!((taps[2] - 1.0).abs() < 1e-12);
        assert!(taps.iter().enumerate().all(|(i, w)| i == 2 || w.abs() < 1e-12));
    }

    #[test]
    fn test_lanczos_interior_matches_source_at_identity() {
        let mut pixels = Vec::new();
        for y in 0..12u32 {
            for x in 0..12u32 {
                pixels.extend_from_slice(&[(x * 20) as u8, (y * 20) as u8, 5]);
            }
        }
        let img = DecodedImage::new(12, 12, pixels);
        let out = render_placed(
            &img,
            12,
            12,
            &centered(12, 12, 0.0, 1.0),
            InterpolationFilter::Lanczos3,
        );
        assert_eq!(out, img);
    }
}
