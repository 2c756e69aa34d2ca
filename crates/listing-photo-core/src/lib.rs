//! Listing Photo Core - photo editing engine for listing uploads
//!
//! A user picks a photo, straightens it in quarter turns, zooms and pans it
//! on a preview, then applies. The result is a full-resolution JPEG ready
//! for upload.
//!
//! # Module Structure
//!
//! - `decode` - Image decoding with EXIF orientation, resizing
//! - `transform` - Rotation/zoom/pan state, bounding boxes, rasterization
//! - `gesture` - Pointer input to pan and pinch intents
//! - `preview` - Preview surface sizing and rendering
//! - `export` - Full-resolution render, JPEG encode, result naming
//! - `editor` - Session lifecycle tying the above together
//! - `config` - Tunables for a session

pub mod config;
pub mod decode;
pub mod editor;
pub mod export;
pub mod gesture;
pub mod preview;
pub mod transform;

pub use config::EditorConfig;
pub use decode::{decode_image, DecodeError, DecodedImage};
pub use editor::{EditorController, EditorKey, EditorState, ImageHandle};
pub use export::{EditResult, ExportError};
pub use gesture::{CaptureRequest, PointerInput, PointerSample};
pub use preview::{PreviewSurface, Viewport};
pub use transform::{PanOffset, TransformState};
