//! The {rotation, zoom, pan} model the editor mutates.

use serde::{Deserialize, Serialize};

/// Smallest zoom factor the editor allows.
pub const MIN_ZOOM: f64 = 0.5;
/// Largest zoom factor the editor allows.
pub const MAX_ZOOM: f64 = 3.0;
/// Degrees added or removed by one rotate command.
pub const ROTATION_STEP: f64 = 90.0;

/// Pan offset in preview-surface pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PanOffset {
    pub x: f64,
    pub y: f64,
}

impl PanOffset {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl std::ops::Add for PanOffset {
    type Output = PanOffset;

    fn add(self, rhs: PanOffset) -> PanOffset {
        PanOffset::new(self.x + rhs.x, self.y + rhs.y)
    }
}

/// Current display transform of the source image.
///
/// All setters are total: they clamp or normalize instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransformState {
    rotation_degrees: f64,
    zoom: f64,
    pan: PanOffset,
}

impl Default for TransformState {
    fn default() -> Self {
        Self {
            rotation_degrees: 0.0,
            zoom: 1.0,
            pan: PanOffset::default(),
        }
    }
}

impl TransformState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rotation in degrees, always within [0, 360).
    pub fn rotation_degrees(&self) -> f64 {
        self.rotation_degrees
    }

    pub fn rotation_radians(&self) -> f64 {
        self.rotation_degrees.to_radians()
    }

    /// Zoom factor, always within [`MIN_ZOOM`, `MAX_ZOOM`].
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn pan(&self) -> PanOffset {
        self.pan
    }

    /// Rotate by `delta` degrees, normalizing into [0, 360).
    pub fn rotate_by(&mut self, delta: f64) {
        if !delta.is_finite() {
            return;
        }
        let r = ((self.rotation_degrees + delta) % 360.0 + 360.0) % 360.0;
        // -0.0 and 360.0 can fall out of the double modulo for tiny negatives
        self.rotation_degrees = if r >= 360.0 || r == 0.0 { 0.0 } else { r };
    }

    /// Set zoom, clamped to [`MIN_ZOOM`, `MAX_ZOOM`]. Non-finite values are ignored.
    pub fn set_zoom(&mut self, value: f64) {
        if !value.is_finite() {
            return;
        }
        self.zoom = value.clamp(MIN_ZOOM, MAX_ZOOM);
    }

    pub fn zoom_by(&mut self, delta: f64) {
        self.set_zoom(self.zoom + delta);
    }

    /// Pan is stored verbatim; the image may be dragged fully off-surface.
    pub fn set_pan(&mut self, offset: PanOffset) {
        self.pan = offset;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: any sequence of ±90 steps lands on the step sum mod 360.
        #[test]
        fn prop_rotation_matches_step_sum(steps in prop::collection::vec(prop::bool::ANY, 0..64)) {
            let mut state = TransformState::new();
            let mut sum: i64 = 0;
            for clockwise in &steps {
                let delta = if *clockwise { 90 } else { -90 };
                state.rotate_by(delta as f64);
                sum += delta;
            }

            let expected = sum.rem_euclid(360) as f64;
            prop_assert_eq!(state.rotation_degrees(), expected);
            prop_assert!((0.0..360.0).contains(&state.rotation_degrees()));
        }

        /// Property: zoom never leaves its bounds, whatever the deltas.
        #[test]
        fn prop_zoom_stays_in_bounds(deltas in prop::collection::vec(-1.0e6f64..1.0e6, 0..32)) {
            let mut state = TransformState::new();
            for delta in deltas {
                state.zoom_by(delta);
                prop_assert!(state.zoom() >= MIN_ZOOM && state.zoom() <= MAX_ZOOM);
            }
        }

        /// Property: reset yields the default from any reachable state.
        #[test]
        fn prop_reset_from_any_state(
            rotation in -3600.0f64..3600.0,
            zoom in -10.0f64..10.0,
            x in -1.0e4f64..1.0e4,
            y in -1.0e4f64..1.0e4,
        ) {
            let mut state = TransformState::new();
            state.rotate_by(rotation);
            state.set_zoom(zoom);
            state.set_pan(PanOffset::new(x, y));

            state.reset();
            prop_assert!(state.is_default());
        }
    }
}
