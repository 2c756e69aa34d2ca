//! Axis-aligned bounding box of a rotated rectangle.

/// Tolerance used to snap cardinal angles and discard float noise.
const EPSILON: f64 = 1e-9;

/// Compute the dimensions of the bounding box for a rotated image.
///
/// ```text
/// new_w = ceil(w·|cos θ| + h·|sin θ|)
/// new_h = ceil(w·|sin θ| + h·|cos θ|)
/// ```
///
/// Rounding up guarantees the rotated rectangle is never clipped. Cardinal
/// angles are exact: 90° and 270° swap width and height, 0° and 180° keep
/// them, and trigonometric noise such as `cos(π/2) ≈ 6e-17` never adds a
/// pixel.
///
/// # Arguments
///
/// * `width` - Source width in pixels
/// * `height` - Source height in pixels
/// * `angle_degrees` - Rotation angle in degrees (any sign or magnitude)
pub fn compute_rotated_bounds(width: u32, height: u32, angle_degrees: f64) -> (u32, u32) {
    let normalized = angle_degrees.rem_euclid(360.0);

    let near = |target: f64| (normalized - target).abs() < EPSILON;
    if near(0.0) || near(180.0) || near(360.0) {
        return (width, height);
    }
    if near(90.0) || near(270.0) {
        return (height, width);
    }

    let angle_rad = normalized.to_radians();
    let cos = angle_rad.cos().abs();
    let sin = angle_rad.sin().abs();

    let w = width as f64;
    let h = height as f64;

    let new_w = ceil_tolerant(w * cos + h * sin);
    let new_h = ceil_tolerant(w * sin + h * cos);

    (new_w.max(1), new_h.max(1))
}

/// `ceil` that ignores a sub-epsilon overshoot past an integer.
fn ceil_tolerant(value: f64) -> u32 {
    (value - EPSILON).ceil().max(0.0) as u32
}
