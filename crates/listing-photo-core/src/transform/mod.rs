//! Geometric transform model and the raster pipeline that applies it.
//!
//! # Pipeline Order
//!
//! Both the preview and the export surface are painted with the same
//! fixed order, acting in the image's local frame:
//! 1. Translate the origin to the surface center plus the pan offset
//! 2. Rotate by the current rotation
//! 3. Scale uniformly by the zoom
//! 4. Draw the image with its center on the origin
//!
//! # Coordinate System
//!
//! - Rotation angles are in degrees, positive = clockwise on screen
//! - Pan offsets are in preview-surface pixels
//! - Origin is top-left corner, y grows downward

mod bounds;
mod raster;
mod state;

pub use bounds::compute_rotated_bounds;
pub use raster::{render_placed, InterpolationFilter, Placement};
pub use state::{PanOffset, TransformState, MAX_ZOOM, MIN_ZOOM, ROTATION_STEP};
